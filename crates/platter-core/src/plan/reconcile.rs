//! Aligns section and title counts into usable `(section, title)` pairs.
//!
//! The backend is asked for exactly three meals but routinely under-
//! or over-produces sections or titles. The policy here is an explicit
//! best-effort degrade: truncate both lists to their common usable
//! length, and fail only when that length is zero. Nothing is ever
//! fabricated to pad the plan back up to three. A caller that wants
//! "fail unless exactly 3" applies that check on top of this policy.

use thiserror::Error;

/// Upper bound on meals per plan: breakfast, lunch, dinner.
pub const MAX_MEALS: usize = 3;

/// Errors from reconciling segmented sections with extracted titles.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("no usable meal sections or titles were recoverable from the plan text")]
    EmptyOrMalformedPlan,
}

/// Zip sections with titles by position, truncated to
/// `min(3, sections, titles)` pairs.
///
/// Returns [`ReconcileError::EmptyOrMalformedPlan`] when either list
/// is empty; otherwise exactly the first `n` positional pairs, with
/// any excess sections or titles discarded.
pub fn reconcile(
    sections: Vec<String>,
    titles: Vec<String>,
) -> Result<Vec<(String, String)>, ReconcileError> {
    let n = MAX_MEALS.min(sections.len()).min(titles.len());
    if n == 0 {
        return Err(ReconcileError::EmptyOrMalformedPlan);
    }

    Ok(sections
        .into_iter()
        .take(n)
        .zip(titles.into_iter().take(n))
        .collect())
}
