// Small synthetic datasets shared by the application-layer tests.

use crate::data::table::RawTable;
use crate::domain::records::{LifestyleRecord, PerformanceRecord, LIFESTYLE_FIELDS};

pub(crate) fn lifestyle_table() -> RawTable {
    let mut headers = vec!["Student_ID".to_string()];
    headers.extend(LIFESTYLE_FIELDS.iter().map(|s| s.to_string()));
    headers.push("GPA".to_string());

    let rows = (0..30)
        .map(|i| {
            let study = 1.0 + (i % 10) as f64;
            let extra = 1.0 + (i % 2) as f64;
            let sleep = 5.0 + (i % 4) as f64;
            let social = (i % 3) as f64;
            let physical = (i % 5) as f64;
            let stress = 1 + i % 7;
            let gpa = 2.0 + 0.15 * study + 0.05 * sleep - 0.02 * social;
            vec![
                (i + 1).to_string(),
                study.to_string(),
                extra.to_string(),
                sleep.to_string(),
                social.to_string(),
                physical.to_string(),
                stress.to_string(),
                gpa.to_string(),
            ]
        })
        .collect();
    RawTable::new("lifestyle.csv", headers, rows)
}

pub(crate) fn performance_table() -> RawTable {
    let headers = [
        "Student_ID", "StudyHoursPerWeek", "AttendanceRate", "Gender", "Major",
        "PartTimeJob", "ExtraCurricularActivities", "GPA",
    ];
    let genders = ["Female", "Male"];
    let majors = ["Arts", "Business", "Science"];
    let rows = (0..24)
        .map(|i| {
            let hours = 5.0 + (i % 7) as f64 * 3.0;
            let attendance = 60.0 + (i % 5) as f64 * 8.0;
            let major = majors[i % 3];
            let job = if i % 4 == 0 { "Yes" } else { "No" };
            let gpa = 1.0 + 0.05 * hours + 0.01 * attendance
                + (if major == "Science" { 0.2 } else { 0.0 });
            vec![
                i.to_string(),
                hours.to_string(),
                attendance.to_string(),
                genders[(i / 2) % 2].to_string(),
                major.to_string(),
                job.to_string(),
                if i % 2 == 1 { "Yes" } else { "No" }.to_string(),
                gpa.to_string(),
            ]
        })
        .collect();
    RawTable::new("performance.csv", headers.iter().map(|s| s.to_string()).collect(), rows)
}

pub(crate) fn lifestyle_record() -> LifestyleRecord {
    LifestyleRecord {
        study_hours_per_day:             4.0,
        extracurricular_hours_per_day:   1.0,
        sleep_hours_per_day:             7.0,
        social_hours_per_day:            2.0,
        physical_activity_hours_per_day: 1.0,
        stress_level:                    2,
    }
}

pub(crate) fn performance_record() -> PerformanceRecord {
    PerformanceRecord {
        study_hours_per_week:       14.0,
        attendance_rate:            84.0,
        gender:                     "Female".into(),
        major:                      "Science".into(),
        part_time_job:              "No".into(),
        extracurricular_activities: "Yes".into(),
    }
}
