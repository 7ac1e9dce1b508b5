//! Calorie extraction from free-text descriptions.
//!
//! Imported recipe descriptions often carry a calorie figure in prose
//! ("around 450 calories per serving"). Listing backfills the `calories`
//! field from that text when the stored value is null.

use regex::Regex;
use std::sync::LazyLock;

// Tried in order; the first capture wins. The bare "cal" form is word-bounded
// so it does not fire inside "calcium" or "local".
static PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)(\d+)\s*calories?").expect("valid calorie pattern"),
        Regex::new(r"(?i)(\d+)\s*kcals?").expect("valid kcal pattern"),
        Regex::new(r"(?i)\b(\d+)\s*cal\b").expect("valid cal pattern"),
    ]
});

/// Extract a calorie count from free text, if any pattern matches.
pub fn extract_calories(text: &str) -> Option<i64> {
    PATTERNS
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps[1].parse().ok())
}
