use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::InputError;

/// Competency areas measured by the survey, in bucketing priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CompetencyCategory {
    DecisionMaking,
    Communication,
    RiskManagement,
    StrategicManagement,
    PeopleManagement,
    SystemsIntegration,
}

impl CompetencyCategory {
    /// Every category, ordered the way answers are matched against prefixes.
    pub const ALL: [CompetencyCategory; 6] = [
        CompetencyCategory::DecisionMaking,
        CompetencyCategory::Communication,
        CompetencyCategory::RiskManagement,
        CompetencyCategory::StrategicManagement,
        CompetencyCategory::PeopleManagement,
        CompetencyCategory::SystemsIntegration,
    ];

    /// Tag embedded in an answer string that routes it to this category.
    pub fn prefix(self) -> &'static str {
        match self {
            CompetencyCategory::DecisionMaking => "dm_",
            CompetencyCategory::Communication => "comm_",
            CompetencyCategory::RiskManagement => "rm_",
            CompetencyCategory::StrategicManagement => "sm_",
            CompetencyCategory::PeopleManagement => "pm_",
            CompetencyCategory::SystemsIntegration => "si_",
        }
    }
}

/// Seniority band of the respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RoleLevel {
    #[serde(rename = "level_entry")]
    Entry,
    #[serde(rename = "level_mid")]
    Mid,
    #[serde(rename = "level_senior")]
    Senior,
    #[serde(rename = "level_exec")]
    Exec,
}

impl RoleLevel {
    pub fn label(self) -> &'static str {
        match self {
            RoleLevel::Entry => "level_entry",
            RoleLevel::Mid => "level_mid",
            RoleLevel::Senior => "level_senior",
            RoleLevel::Exec => "level_exec",
        }
    }

    /// Scale applied to raw category averages.
    pub fn multiplier(self) -> f64 {
        match self {
            RoleLevel::Entry => 1.10,
            RoleLevel::Mid => 1.00,
            RoleLevel::Senior => 0.95,
            RoleLevel::Exec => 0.90,
        }
    }
}

/// Sector the respondent works in. Reported only; never affects scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Healthcare,
    Government,
    Corporate,
    Nonprofit,
    Other,
}

impl Sector {
    pub fn label(self) -> &'static str {
        match self {
            Sector::Healthcare => "healthcare",
            Sector::Government => "government",
            Sector::Corporate => "corporate",
            Sector::Nonprofit => "nonprofit",
            Sector::Other => "other",
        }
    }
}

/// Survey submission as received from the form integration.
///
/// Every field is optional on the wire. String fields holding any other JSON
/// type read as empty, and `answers` reads as empty unless it is an array;
/// non-string array elements are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreInput {
    pub email: String,
    pub role_level_raw: String,
    pub sector_raw: String,
    pub selected_competencies_raw: String,
    pub record_id: String,
    pub answers: Vec<String>,
}

impl ScoreInput {
    /// Parse a request body. Fails unless the body is a JSON object; a key
    /// given more than once keeps its last value.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, InputError> {
        Self::from_value(serde_json::from_slice(body)?)
    }

    pub fn from_value(value: Value) -> Result<Self, InputError> {
        match value {
            Value::Object(fields) => Ok(Self::from_fields(fields)),
            other => Err(InputError::NotAnObject(json_kind(&other))),
        }
    }

    fn from_fields(mut fields: Map<String, Value>) -> Self {
        Self {
            email: take_string(&mut fields, "email"),
            role_level_raw: take_string(&mut fields, "role_level_raw"),
            sector_raw: take_string(&mut fields, "sector_raw"),
            selected_competencies_raw: take_string(&mut fields, "selected_competencies_raw"),
            record_id: take_string(&mut fields, "record_id"),
            answers: take_answers(&mut fields),
        }
    }
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> String {
    match fields.remove(key) {
        Some(Value::String(value)) => value,
        _ => String::new(),
    }
}

fn take_answers(fields: &mut Map<String, Value>) -> Vec<String> {
    match fields.remove("answers") {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(answer) => Some(answer),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
