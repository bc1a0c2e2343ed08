//! Recovers the meal titles from the plan's final line.
//!
//! The prompt instructs the backend to end its answer with a single
//! line containing only the recipe titles, comma-separated. That
//! contract is never verified beyond "take the last non-empty line";
//! reconciliation downstream deals with the cases where it was not
//! honored.

/// Extract the ordered title list from raw plan text.
///
/// Takes the last non-empty line, splits it on commas, trims
/// whitespace and surrounding single quotes from each fragment, and
/// drops fragments that end up empty. Returns an empty vec when the
/// input has no non-blank line at all.
pub fn extract_titles(raw: &str) -> Vec<String> {
    let Some(line) = raw.lines().rev().find(|l| !l.trim().is_empty()) else {
        return Vec::new();
    };

    line.split(',')
        .map(|fragment| {
            fragment
                .trim_matches(|c: char| c.is_whitespace() || c == '\'')
                .to_string()
        })
        .filter(|title| !title.is_empty())
        .collect()
}
