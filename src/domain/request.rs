// ============================================================
// Layer 3 — Prediction Request
// ============================================================
// The inbound contract with the (excluded) web layer: a flat
// JSON object holding an identifier plus every lifestyle and
// performance field. Validation collects ALL problems before
// failing so the caller sees every missing field at once.
//
// Numeric fields accept JSON numbers or numeric strings, since
// form posts arrive as strings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::error::{PredictorError, Result};
use crate::domain::records::*;

pub const USERNAME: &str = "username";

/// Every field a request must carry, in the order they are reported.
pub const REQUIRED_FIELDS: [&str; 13] = [
    USERNAME,
    STUDY_HOURS_PER_DAY,
    EXTRACURRICULAR_HOURS_PER_DAY,
    SLEEP_HOURS_PER_DAY,
    SOCIAL_HOURS_PER_DAY,
    PHYSICAL_ACTIVITY_HOURS_PER_DAY,
    STRESS_LEVEL,
    STUDY_HOURS_PER_WEEK,
    ATTENDANCE_RATE,
    GENDER,
    MAJOR,
    PART_TIME_JOB,
    EXTRACURRICULAR_ACTIVITIES,
];

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub username:    String,
    #[serde(flatten)]
    pub lifestyle:   LifestyleRecord,
    #[serde(flatten)]
    pub performance: PerformanceRecord,
}

/// What the caller persists after a successful prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    #[serde(flatten)]
    pub request: PredictionRequest,
    #[serde(rename = "GPA")]
    pub gpa: f64,
}

impl PredictionRequest {
    /// Validate a raw JSON body.
    pub fn from_json(body: &Value) -> Result<Self> {
        let Some(map) = body.as_object() else {
            return Err(PredictorError::Validation {
                missing: Vec::new(),
                invalid: vec!["<body is not a JSON object>".to_string()],
            });
        };
        Self::from_map(map)
    }

    pub fn from_map(map: &Map<String, Value>) -> Result<Self> {
        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|f| !map.contains_key(**f))
            .map(|f| f.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PredictorError::Validation { missing, invalid: Vec::new() });
        }

        let mut fields = FieldReader { map, invalid: Vec::new() };

        let username = fields.text(USERNAME);
        let lifestyle = LifestyleRecord {
            study_hours_per_day:             fields.number(STUDY_HOURS_PER_DAY),
            extracurricular_hours_per_day:   fields.number(EXTRACURRICULAR_HOURS_PER_DAY),
            sleep_hours_per_day:             fields.number(SLEEP_HOURS_PER_DAY),
            social_hours_per_day:            fields.number(SOCIAL_HOURS_PER_DAY),
            physical_activity_hours_per_day: fields.number(PHYSICAL_ACTIVITY_HOURS_PER_DAY),
            stress_level:                    fields.integer(STRESS_LEVEL),
        };
        let performance = PerformanceRecord {
            study_hours_per_week:       fields.number(STUDY_HOURS_PER_WEEK),
            attendance_rate:            fields.number(ATTENDANCE_RATE),
            gender:                     fields.text(GENDER),
            major:                      fields.text(MAJOR),
            part_time_job:              fields.flag(PART_TIME_JOB),
            extracurricular_activities: fields.flag(EXTRACURRICULAR_ACTIVITIES),
        };

        if !fields.invalid.is_empty() {
            return Err(PredictorError::Validation {
                missing: Vec::new(),
                invalid: fields.invalid,
            });
        }
        Ok(Self { username, lifestyle, performance })
    }
}

/// Pulls typed values out of the map, remembering every field that
/// could not be converted instead of stopping at the first one.
struct FieldReader<'a> {
    map:     &'a Map<String, Value>,
    invalid: Vec<String>,
}

impl FieldReader<'_> {
    fn number(&mut self, name: &str) -> f64 {
        let parsed = match self.map.get(name) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(v) if v.is_finite() => v,
            _ => {
                self.invalid.push(name.to_string());
                0.0
            }
        }
    }

    fn integer(&mut self, name: &str) -> i64 {
        let parsed = match self.map.get(name) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed.unwrap_or_else(|| {
            self.invalid.push(name.to_string());
            0
        })
    }

    fn text(&mut self, name: &str) -> String {
        match self.map.get(name) {
            Some(Value::String(s)) => s.clone(),
            _ => {
                self.invalid.push(name.to_string());
                String::new()
            }
        }
    }

    /// Flags never fail validation: any scalar is kept as text and
    /// the encoder maps everything except "Yes"/"No" to 0.
    fn flag(&mut self, name: &str) -> String {
        match self.map.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}
