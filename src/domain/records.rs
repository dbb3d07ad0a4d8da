// ============================================================
// Layer 3 — Student Input Records
// ============================================================
// The two halves of a prediction input:
//
//   LifestyleRecord   → fed to the lifestyle model
//   PerformanceRecord → encoded, then fed to the performance
//                       model together with the lifestyle estimate
//
// Field names on the wire (JSON keys, CSV headers) are the
// dataset column names, so serde renames every field.

use serde::{Deserialize, Serialize};

// ─── Column names ─────────────────────────────────────────────────────────────
pub const STUDY_HOURS_PER_DAY: &str = "Study_Hours_Per_Day";
pub const EXTRACURRICULAR_HOURS_PER_DAY: &str = "Extracurricular_Hours_Per_Day";
pub const SLEEP_HOURS_PER_DAY: &str = "Sleep_Hours_Per_Day";
pub const SOCIAL_HOURS_PER_DAY: &str = "Social_Hours_Per_Day";
pub const PHYSICAL_ACTIVITY_HOURS_PER_DAY: &str = "Physical_Activity_Hours_Per_Day";
pub const STRESS_LEVEL: &str = "Stress_Level";

pub const STUDY_HOURS_PER_WEEK: &str = "StudyHoursPerWeek";
pub const ATTENDANCE_RATE: &str = "AttendanceRate";
pub const GENDER: &str = "Gender";
pub const MAJOR: &str = "Major";
pub const PART_TIME_JOB: &str = "PartTimeJob";
pub const EXTRACURRICULAR_ACTIVITIES: &str = "ExtraCurricularActivities";

/// Column appended to the performance row at inference time.
pub const PREDICTED_LIFESTYLE_GPA: &str = "Predicted_Lifestyle_GPA";

pub const LIFESTYLE_FIELDS: [&str; 6] = [
    STUDY_HOURS_PER_DAY,
    EXTRACURRICULAR_HOURS_PER_DAY,
    SLEEP_HOURS_PER_DAY,
    SOCIAL_HOURS_PER_DAY,
    PHYSICAL_ACTIVITY_HOURS_PER_DAY,
    STRESS_LEVEL,
];

pub const PERFORMANCE_FIELDS: [&str; 6] = [
    STUDY_HOURS_PER_WEEK,
    ATTENDANCE_RATE,
    GENDER,
    MAJOR,
    PART_TIME_JOB,
    EXTRACURRICULAR_ACTIVITIES,
];

// ─── LifestyleRecord ──────────────────────────────────────────────────────────
/// Daily habits of one student. All hours are per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifestyleRecord {
    #[serde(rename = "Study_Hours_Per_Day")]
    pub study_hours_per_day: f64,
    #[serde(rename = "Extracurricular_Hours_Per_Day")]
    pub extracurricular_hours_per_day: f64,
    #[serde(rename = "Sleep_Hours_Per_Day")]
    pub sleep_hours_per_day: f64,
    #[serde(rename = "Social_Hours_Per_Day")]
    pub social_hours_per_day: f64,
    #[serde(rename = "Physical_Activity_Hours_Per_Day")]
    pub physical_activity_hours_per_day: f64,
    /// Small integer category (e.g. 1 = low, 3 = high).
    #[serde(rename = "Stress_Level")]
    pub stress_level: i64,
}

impl LifestyleRecord {
    /// Look a feature up by its dataset column name.
    ///
    /// The lifestyle model assembles its input row in the order
    /// its scaler was fitted on, so it asks for columns by name
    /// rather than relying on struct field order.
    pub fn value_of(&self, column: &str) -> Option<f64> {
        match column {
            STUDY_HOURS_PER_DAY             => Some(self.study_hours_per_day),
            EXTRACURRICULAR_HOURS_PER_DAY   => Some(self.extracurricular_hours_per_day),
            SLEEP_HOURS_PER_DAY             => Some(self.sleep_hours_per_day),
            SOCIAL_HOURS_PER_DAY            => Some(self.social_hours_per_day),
            PHYSICAL_ACTIVITY_HOURS_PER_DAY => Some(self.physical_activity_hours_per_day),
            STRESS_LEVEL                    => Some(self.stress_level as f64),
            _ => None,
        }
    }
}

// ─── PerformanceRecord ────────────────────────────────────────────────────────
/// Academic and demographic inputs. Categorical and flag fields
/// are kept as the raw strings the caller sent; the feature
/// encoder decides how they become numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    #[serde(rename = "StudyHoursPerWeek")]
    pub study_hours_per_week: f64,
    #[serde(rename = "AttendanceRate")]
    pub attendance_rate: f64,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Major")]
    pub major: String,
    /// "Yes" / "No"; anything else encodes as 0.
    #[serde(rename = "PartTimeJob")]
    pub part_time_job: String,
    #[serde(rename = "ExtraCurricularActivities")]
    pub extracurricular_activities: String,
}
