//! Approximate substring scoring for catalog lookups.
//!
//! Scores are normalised edit distances in `[0, 1]`, lower is better. A
//! pattern is compared against every substring of a field (location does
//! not matter), so `"godfather"` scores well against
//! `"the godfather part ii"`. Field scores are then folded into one record
//! score weighted by field importance and field length.

use std::collections::HashSet;

/// Longest pattern slice scored in one pass; longer patterns are split.
const MAX_CHUNK_CHARS: usize = 32;

/// Floor applied to non-identical matches so only an identical field
/// can score exactly zero.
const MIN_PARTIAL_SCORE: f64 = 0.001;

/// Tunables for [`super::CatalogIndex`] fuzzy lookups.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyOptions {
    /// Highest per-field score still counted as a match.
    pub threshold: f64,
    /// A field must share a run of at least this many consecutive
    /// pattern characters to match.
    pub min_match_char_length: usize,
    pub title_weight: f64,
    pub searchable_weight: f64,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            min_match_char_length: 2,
            title_weight: 0.7,
            searchable_weight: 0.3,
        }
    }
}

/// Field text prepared once at index build time.
#[derive(Debug, Clone)]
pub(crate) struct IndexedField {
    lower: String,
    chars: Vec<char>,
    /// `1 / sqrt(token_count)`, rounded to three decimals.
    pub(crate) norm: f64,
}

impl IndexedField {
    /// Returns `None` for blank text; blank fields never match.
    pub(crate) fn new(text: &str) -> Option<Self> {
        if text.trim().is_empty() {
            return None;
        }
        let lower = text.to_lowercase();
        let tokens = lower.split(' ').filter(|t| !t.is_empty()).count().max(1);
        let norm = ((1.0 / (tokens as f64).sqrt()) * 1000.0).round() / 1000.0;
        Some(Self {
            chars: lower.chars().collect(),
            lower,
            norm,
        })
    }
}

/// A lowercased search pattern split into scoring chunks.
#[derive(Debug, Clone)]
pub(crate) struct Pattern {
    lower: String,
    chunks: Vec<Vec<char>>,
}

impl Pattern {
    pub(crate) fn new(text: &str) -> Self {
        let lower = text.to_lowercase();
        let chars: Vec<char> = lower.chars().collect();
        let chunks = chars.chunks(MAX_CHUNK_CHARS).map(<[char]>::to_vec).collect();
        Self { lower, chunks }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Score `pattern` against one field. `None` when the field does not match.
pub(crate) fn field_score(pattern: &Pattern, field: &IndexedField, opts: &FuzzyOptions) -> Option<f64> {
    if pattern.lower == field.lower {
        return Some(0.0);
    }
    if pattern.is_empty() {
        return None;
    }

    let mut matched = false;
    let mut total = 0.0;
    for chunk in &pattern.chunks {
        match chunk_score(chunk, &field.chars, opts) {
            Some(score) => {
                matched = true;
                total += score;
            }
            None => total += 1.0,
        }
    }

    matched.then(|| total / pattern.chunks.len() as f64)
}

fn chunk_score(chunk: &[char], text: &[char], opts: &FuzzyOptions) -> Option<f64> {
    let errors = min_substring_errors(chunk, text);
    let score = errors as f64 / chunk.len() as f64;
    if score > opts.threshold {
        return None;
    }
    if !shares_run(chunk, text, opts.min_match_char_length) {
        return None;
    }
    Some(score.max(MIN_PARTIAL_SCORE))
}

/// Fewest edits turning `pattern` into any substring of `text`.
///
/// Edit distance with a free start and end in `text`: row zero is all
/// zeros and the answer is the minimum of the last row.
fn min_substring_errors(pattern: &[char], text: &[char]) -> usize {
    let n = text.len();
    let mut prev = vec![0usize; n + 1];
    let mut curr = vec![0usize; n + 1];

    for (i, &pc) in pattern.iter().enumerate() {
        curr[0] = i + 1;
        for j in 1..=n {
            let cost = if pc == text[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j - 1] + cost)
                .min(prev[j] + 1)
                .min(curr[j - 1] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev.into_iter().min().unwrap_or(pattern.len())
}

/// Whether `text` contains any `min_len`-character window of `pattern`.
fn shares_run(pattern: &[char], text: &[char], min_len: usize) -> bool {
    if min_len <= 1 {
        return true;
    }
    if pattern.len() < min_len || text.len() < min_len {
        return false;
    }
    let windows: HashSet<&[char]> = pattern.windows(min_len).collect();
    text.windows(min_len).any(|w| windows.contains(w))
}

/// Fold matched field scores into one record score.
///
/// Each entry is `(score, normalised_weight, norm)`. An exact field
/// contributes `f64::EPSILON` so the product stays ordered.
pub(crate) fn combine(fields: &[(f64, f64, f64)]) -> f64 {
    fields.iter().fold(1.0, |acc, &(score, weight, norm)| {
        let base = if score == 0.0 { f64::EPSILON } else { score };
        acc * base.powf(weight * norm)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn substring_errors_zero_for_contained_pattern() {
        assert_eq!(min_substring_errors(&chars("father"), &chars("the godfather part ii")), 0);
    }

    #[test]
    fn substring_errors_counts_typos() {
        assert_eq!(min_substring_errors(&chars("godfathr"), &chars("the godfather")), 1);
        assert_eq!(min_substring_errors(&chars("incepton"), &chars("inception")), 1);
    }

    #[test]
    fn substring_errors_pattern_longer_than_text() {
        assert_eq!(min_substring_errors(&chars("abcd"), &chars("ab")), 2);
        assert_eq!(min_substring_errors(&chars("abc"), &[]), 3);
    }

    #[test]
    fn identical_field_scores_zero() {
        let field = IndexedField::new("Inception").unwrap();
        let score = field_score(&Pattern::new("inception"), &field, &FuzzyOptions::default());
        assert_eq!(score, Some(0.0));
    }

    #[test]
    fn contained_pattern_scores_floor() {
        let field = IndexedField::new("The Dark Knight Rises").unwrap();
        let score = field_score(&Pattern::new("dark knight"), &field, &FuzzyOptions::default());
        assert_eq!(score, Some(MIN_PARTIAL_SCORE));
    }

    #[test]
    fn distant_pattern_does_not_match() {
        let field = IndexedField::new("Casablanca").unwrap();
        assert!(field_score(&Pattern::new("interstellar"), &field, &FuzzyOptions::default()).is_none());
    }

    #[test]
    fn single_char_pattern_needs_exact_field() {
        let field = IndexedField::new("Up").unwrap();
        assert!(field_score(&Pattern::new("u"), &field, &FuzzyOptions::default()).is_none());
        assert_eq!(field_score(&Pattern::new("UP"), &field, &FuzzyOptions::default()), Some(0.0));
    }

    #[test]
    fn blank_field_is_not_indexed() {
        assert!(IndexedField::new("   ").is_none());
    }

    #[test]
    fn norm_shrinks_with_token_count() {
        assert_eq!(IndexedField::new("Alien").unwrap().norm, 1.0);
        assert_eq!(IndexedField::new("The Godfather Part II").unwrap().norm, 0.5);
        assert_eq!(IndexedField::new("a b c").unwrap().norm, 0.577);
    }

    #[test]
    fn long_patterns_are_chunked() {
        let p = Pattern::new(&"x".repeat(70));
        assert_eq!(p.chunks.len(), 3);
        assert_eq!(p.chunks[2].len(), 6);
    }

    #[test]
    fn combine_multiplies_weighted_scores() {
        assert_eq!(combine(&[]), 1.0);
        let single = combine(&[(0.25, 1.0, 1.0)]);
        assert!((single - 0.25).abs() < 1e-12);
        let both = combine(&[(0.25, 0.7, 1.0), (0.25, 0.3, 1.0)]);
        assert!((both - 0.25).abs() < 1e-12);
        assert!(combine(&[(0.0, 0.7, 1.0)]) < 1e-10);
    }
}
