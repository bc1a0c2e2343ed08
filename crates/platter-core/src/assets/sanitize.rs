//! Title-to-filename sanitization.

/// Turn an arbitrary title into a filesystem-safe token: trim, replace
/// spaces with underscores, then keep only ASCII letters, digits,
/// underscores, and hyphens.
///
/// No length cap and no uniqueness guarantee: distinct titles can
/// sanitize to the same token. The three primary assets are keyed by
/// canonical slot names instead, so that collision class never reaches
/// them; this function serves derived display and diagnostic names.
pub fn sanitize(title: &str) -> String {
    title
        .trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}
