use chrono::{DateTime, Utc};
use tracing::debug;

use super::buckets::CategoryBuckets;
use super::domain::{CompetencyCategory, ScoreInput};
use super::normalize::{normalize_role_level, normalize_sector};
use super::report::ScoreReport;

const MAX_SCORE: f64 = 100.0;

/// Score a submission, stamping the report with the current time.
pub fn compute(input: &ScoreInput) -> ScoreReport {
    compute_at(input, Utc::now())
}

/// Score a submission with an explicit report timestamp. Never fails:
/// unusable input shows up as empty scores, not errors.
pub fn compute_at(input: &ScoreInput, timestamp: DateTime<Utc>) -> ScoreReport {
    let role_level = normalize_role_level(&input.role_level_raw);
    let sector = normalize_sector(&input.sector_raw);
    let multiplier = role_level.multiplier();
    let buckets = CategoryBuckets::from_answers(&input.answers);

    let raw = |category| buckets.mean(category);
    let adjusted = |category| raw(category).map(|score| adjust_score(score, multiplier));
    let overall_score = overall_score(CompetencyCategory::ALL.into_iter().filter_map(adjusted));

    debug!(
        record_id = %input.record_id,
        role_level = role_level.label(),
        overall_score = ?overall_score,
        "computed competency scores"
    );

    ScoreReport {
        timestamp,
        email: input.email.clone(),
        role_level,
        sector,
        selected_competencies: input.selected_competencies_raw.clone(),
        dm_score_raw: raw(CompetencyCategory::DecisionMaking),
        comm_score_raw: raw(CompetencyCategory::Communication),
        rm_score_raw: raw(CompetencyCategory::RiskManagement),
        sm_score_raw: raw(CompetencyCategory::StrategicManagement),
        pm_score_raw: raw(CompetencyCategory::PeopleManagement),
        si_score_raw: raw(CompetencyCategory::SystemsIntegration),
        dm_score_adj: adjusted(CompetencyCategory::DecisionMaking),
        comm_score_adj: adjusted(CompetencyCategory::Communication),
        rm_score_adj: adjusted(CompetencyCategory::RiskManagement),
        sm_score_adj: adjusted(CompetencyCategory::StrategicManagement),
        pm_score_adj: adjusted(CompetencyCategory::PeopleManagement),
        si_score_adj: adjusted(CompetencyCategory::SystemsIntegration),
        overall_score,
        level_adjustment_used: multiplier,
        record_id: input.record_id.clone(),
    }
}

/// Scale a raw average and round to the nearest integer, capped at 100.
pub fn adjust_score(raw: f64, multiplier: f64) -> u8 {
    (raw * multiplier).round().clamp(0.0, MAX_SCORE) as u8
}

fn overall_score(adjusted: impl Iterator<Item = u8>) -> Option<u8> {
    let (total, count) = adjusted.fold((0u32, 0u32), |(total, count), score| {
        (total + u32::from(score), count + 1)
    });
    if count == 0 {
        return None;
    }
    Some((f64::from(total) / f64::from(count)).round() as u8)
}
