use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use super::domain::{CompetencyCategory, RoleLevel, Sector};

/// Scored survey submission as returned to callers.
///
/// Field names and order form the public response contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub email: String,
    pub role_level: RoleLevel,
    pub sector: Sector,
    pub selected_competencies: String,
    #[serde(serialize_with = "serialize_optional_number")]
    pub dm_score_raw: Option<f64>,
    #[serde(serialize_with = "serialize_optional_number")]
    pub comm_score_raw: Option<f64>,
    #[serde(serialize_with = "serialize_optional_number")]
    pub rm_score_raw: Option<f64>,
    #[serde(serialize_with = "serialize_optional_number")]
    pub sm_score_raw: Option<f64>,
    #[serde(serialize_with = "serialize_optional_number")]
    pub pm_score_raw: Option<f64>,
    #[serde(serialize_with = "serialize_optional_number")]
    pub si_score_raw: Option<f64>,
    pub dm_score_adj: Option<u8>,
    pub comm_score_adj: Option<u8>,
    pub rm_score_adj: Option<u8>,
    pub sm_score_adj: Option<u8>,
    pub pm_score_adj: Option<u8>,
    pub si_score_adj: Option<u8>,
    pub overall_score: Option<u8>,
    #[serde(serialize_with = "serialize_number")]
    pub level_adjustment_used: f64,
    pub record_id: String,
}

impl ScoreReport {
    pub fn raw_score(&self, category: CompetencyCategory) -> Option<f64> {
        match category {
            CompetencyCategory::DecisionMaking => self.dm_score_raw,
            CompetencyCategory::Communication => self.comm_score_raw,
            CompetencyCategory::RiskManagement => self.rm_score_raw,
            CompetencyCategory::StrategicManagement => self.sm_score_raw,
            CompetencyCategory::PeopleManagement => self.pm_score_raw,
            CompetencyCategory::SystemsIntegration => self.si_score_raw,
        }
    }

    pub fn adjusted_score(&self, category: CompetencyCategory) -> Option<u8> {
        match category {
            CompetencyCategory::DecisionMaking => self.dm_score_adj,
            CompetencyCategory::Communication => self.comm_score_adj,
            CompetencyCategory::RiskManagement => self.rm_score_adj,
            CompetencyCategory::StrategicManagement => self.sm_score_adj,
            CompetencyCategory::PeopleManagement => self.pm_score_adj,
            CompetencyCategory::SystemsIntegration => self.si_score_adj,
        }
    }
}

fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

// Whole numbers go out as JSON integers (85, not 85.0).
fn serialize_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn serialize_optional_number<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(value) => serialize_number(value, serializer),
        None => serializer.serialize_none(),
    }
}
