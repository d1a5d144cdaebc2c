//! Filtering of attachment lists before rendering.
//!
//! Unsafe links are omitted entirely, never shown disabled or escaped.

use crate::is_safe_url;

/// Yield only the candidates that are safe to render, in their original
/// order.
pub fn filter_safe<I, S>(candidates: I) -> impl Iterator<Item = S>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates.into_iter().filter(|candidate| {
        let url: &str = candidate.as_ref();
        let safe = is_safe_url(url);
        if !safe {
            tracing::debug!(url, "omitting unsafe link");
        }
        safe
    })
}

/// Split candidates into `(safe, rejected)`, each keeping input order.
pub fn partition_links<I, S>(candidates: I) -> (Vec<S>, Vec<S>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .partition(|candidate| is_safe_url(candidate.as_ref()))
}
