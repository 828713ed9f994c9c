//! Retriever: maps a question to at most [`MAX_MATCHES`] ranked records.
//!
//! 1. Extract the implied title from the question.
//! 2. Exact pass: case-insensitive title equality. Any hit is returned as-is
//!    with score `0.0`, uncapped.
//! 3. Fuzzy pass over the catalog with the extracted title.
//! 4. Escalation: when the fuzzy pass is empty or its best score is worse
//!    than [`ESCALATION_SCORE`], rerun the fuzzy pass with the whole
//!    question and keep whichever pass has the strictly better best score.

use tracing::debug;

use crate::catalog::{CatalogIndex, RetrievalMatch};
use crate::query::extract_title;

/// Cap on fuzzy results handed to callers.
pub const MAX_MATCHES: usize = 5;

/// Best fuzzy score above which the whole question is tried as well.
pub const ESCALATION_SCORE: f64 = 0.4;

/// Rank catalog records against `query`, best first.
pub fn search<'a>(catalog: &'a CatalogIndex, query: &str) -> Vec<RetrievalMatch<'a>> {
    let title = extract_title(query);
    debug!(%title, "extracted movie title");

    let exact = catalog.exact_title_matches(&title);
    if !exact.is_empty() {
        debug!(count = exact.len(), "exact title matches");
        return exact.into_iter().map(RetrievalMatch::exact).collect();
    }

    let primary = catalog.fuzzy_search(&title);
    let mut chosen = escalate(primary, || catalog.fuzzy_search(query));
    chosen.truncate(MAX_MATCHES);
    chosen
}

/// Apply the escalation rule to the title pass `primary`. `full_query`
/// runs the whole-question pass and is only called when needed.
///
/// When both passes are empty the (empty) title pass is returned.
pub(crate) fn escalate<'a, F>(primary: Vec<RetrievalMatch<'a>>, full_query: F) -> Vec<RetrievalMatch<'a>>
where
    F: FnOnce() -> Vec<RetrievalMatch<'a>>,
{
    let primary_best = primary.first().map(|m| m.score);
    if matches!(primary_best, Some(best) if best <= ESCALATION_SCORE) {
        return primary;
    }

    let fallback = full_query();
    let fallback_wins = match (fallback.first(), primary_best) {
        (Some(_), None) => true,
        (Some(f), Some(p)) => f.score < p,
        (None, _) => false,
    };

    debug!(
        primary_best = ?primary_best,
        fallback_best = ?fallback.first().map(|m| m.score),
        fallback_wins,
        "fuzzy escalation to full query"
    );

    if fallback_wins { fallback } else { primary }
}
