//! Competency scoring for leadership index survey submissions.
//!
//! A submission flows through sanitize -> normalize -> bucket -> average ->
//! adjust -> summarize. Every step has a fallback, so scoring never fails.

pub mod buckets;
pub mod calculator;
pub mod domain;
pub mod normalize;
pub mod report;

pub use buckets::{classify_answer, extract_percentage, parse_answer, CategoryBuckets};
pub use calculator::{adjust_score, compute, compute_at};
pub use domain::{CompetencyCategory, RoleLevel, ScoreInput, Sector};
pub use normalize::{normalize_role_level, normalize_sector, sanitize_text};
pub use report::ScoreReport;
