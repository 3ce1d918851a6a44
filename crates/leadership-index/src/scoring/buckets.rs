use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use super::domain::CompetencyCategory;
use super::normalize::sanitize_text;

static PERCENTAGE: OnceLock<Regex> = OnceLock::new();

fn percentage_pattern() -> &'static Regex {
    PERCENTAGE.get_or_init(|| Regex::new(r"([0-9]{1,3})\s*%").expect("valid regex"))
}

/// First one-to-three digit number directly followed by `%`, allowing
/// whitespace before the sign.
pub fn extract_percentage(answer: &str) -> Option<u16> {
    percentage_pattern()
        .captures(answer)
        .and_then(|captures| captures.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

/// First category, in [`CompetencyCategory::ALL`] order, whose prefix appears
/// anywhere in the answer.
pub fn classify_answer(answer: &str) -> Option<CompetencyCategory> {
    let lower = answer.to_lowercase();
    CompetencyCategory::ALL
        .into_iter()
        .find(|category| lower.contains(category.prefix()))
}

/// Category and percentage carried by one answer string, if it has both.
pub fn parse_answer(answer: &str) -> Option<(CompetencyCategory, u16)> {
    let answer = sanitize_text(answer);
    let score = extract_percentage(&answer)?;
    let category = classify_answer(&answer)?;
    Some((category, score))
}

/// Percentages grouped by competency category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryBuckets {
    values: BTreeMap<CompetencyCategory, Vec<u16>>,
}

impl CategoryBuckets {
    pub fn from_answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buckets = Self::default();
        for (category, score) in answers
            .into_iter()
            .filter_map(|answer| parse_answer(answer.as_ref()))
        {
            buckets.push(category, score);
        }
        buckets
    }

    pub fn push(&mut self, category: CompetencyCategory, score: u16) {
        self.values.entry(category).or_default().push(score);
    }

    pub fn values(&self, category: CompetencyCategory) -> &[u16] {
        self.values
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(Vec::is_empty)
    }

    /// Unrounded arithmetic mean of a bucket; `None` when it holds nothing.
    pub fn mean(&self, category: CompetencyCategory) -> Option<f64> {
        let values = self.values(category);
        if values.is_empty() {
            return None;
        }
        let total: f64 = values.iter().map(|value| f64::from(*value)).sum();
        Some(total / values.len() as f64)
    }
}
