use super::domain::{RoleLevel, Sector};

/// Zero-width and non-breaking characters that survive copy/paste from forms.
const INVISIBLE_CHARS: [char; 5] = ['\u{200b}', '\u{200c}', '\u{200d}', '\u{feff}', '\u{a0}'];

/// Ordered classification table: the first entry with any keyword contained
/// in the text wins.
type KeywordRules<T> = [(&'static [&'static str], T)];

const ROLE_LEVEL_RULES: &KeywordRules<RoleLevel> = &[
    (&["entry"], RoleLevel::Entry),
    (&["mid"], RoleLevel::Mid),
    (&["senior"], RoleLevel::Senior),
    // also covers "executive"
    (&["exec"], RoleLevel::Exec),
];

const SECTOR_RULES: &KeywordRules<Sector> = &[
    (&["health"], Sector::Healthcare),
    (&["govern"], Sector::Government),
    (&["corp", "private"], Sector::Corporate),
    (&["non"], Sector::Nonprofit),
];

pub fn sanitize_text(value: &str) -> String {
    value.replace(INVISIBLE_CHARS, "")
}

fn classify<T: Copy>(text: &str, rules: &KeywordRules<T>) -> Option<T> {
    rules
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(_, value)| *value)
}

/// Resolve free-text role descriptions such as "Senior Manager". Unmatched
/// text resolves to [`RoleLevel::Mid`].
pub fn normalize_role_level(raw: &str) -> RoleLevel {
    let text = sanitize_text(raw).to_lowercase();
    classify(&text, ROLE_LEVEL_RULES).unwrap_or(RoleLevel::Mid)
}

/// Resolve free-text sector descriptions. Unmatched text resolves to
/// [`Sector::Other`].
pub fn normalize_sector(raw: &str) -> Sector {
    let text = sanitize_text(raw).to_lowercase();
    classify(&text, SECTOR_RULES).unwrap_or(Sector::Other)
}
