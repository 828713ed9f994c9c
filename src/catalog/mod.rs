//! Movie catalog: immutable records plus exact and fuzzy lookup.
//!
//! The index is built once at startup from ingested rows and shared
//! read-only (behind an `Arc`) by every request afterwards.

mod fuzzy;
pub mod ingest;

pub use fuzzy::FuzzyOptions;

use serde::Deserialize;

use fuzzy::{IndexedField, Pattern};

/// One ingested catalog row. Every column is text; absent cells are empty.
///
/// Serde renames follow the IMDB dataset export headers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MovieRow {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Average Rating")]
    pub rating: String,
    #[serde(rename = "Director")]
    pub director: String,
    #[serde(rename = "Writer")]
    pub writer: String,
    #[serde(rename = "Metascore")]
    pub metascore: String,
    #[serde(rename = "Cast")]
    pub cast: String,
    #[serde(rename = "Release Date")]
    pub release_date: String,
    #[serde(rename = "Country of Origin")]
    pub country: String,
    #[serde(rename = "Languages")]
    pub languages: String,
    #[serde(rename = "Budget")]
    pub budget: String,
    #[serde(rename = "Worldwide Gross")]
    pub gross: String,
    #[serde(rename = "Runtime")]
    pub runtime: String,
}

/// An immutable movie record with its derived search text.
#[derive(Debug, Clone)]
pub struct MovieRecord {
    pub title: String,
    pub director: String,
    pub writer: String,
    pub cast: String,
    pub rating: String,
    pub metascore: String,
    pub release_date: String,
    pub country: String,
    pub languages: String,
    pub budget: String,
    pub gross: String,
    pub runtime: String,
    searchable_text: String,
}

impl MovieRecord {
    pub fn new(row: MovieRow) -> Self {
        let MovieRow {
            title,
            rating,
            director,
            writer,
            metascore,
            cast,
            release_date,
            country,
            languages,
            budget,
            gross,
            runtime,
        } = row;

        let searchable_text =
            format!("{title} {director} {writer} {cast} {country} {languages}").to_lowercase();

        Self {
            title,
            director,
            writer,
            cast,
            rating,
            metascore,
            release_date,
            country,
            languages,
            budget,
            gross,
            runtime,
            searchable_text,
        }
    }

    /// Lowercase title, director, writer, cast, country and languages.
    pub fn searchable_text(&self) -> &str {
        &self.searchable_text
    }
}

/// A retrieved record and its score in `[0, 1]`; lower is better.
#[derive(Debug, Clone, Copy)]
pub struct RetrievalMatch<'a> {
    pub record: &'a MovieRecord,
    pub score: f64,
}

impl<'a> RetrievalMatch<'a> {
    /// A case-insensitive title equality hit.
    pub fn exact(record: &'a MovieRecord) -> Self {
        Self { record, score: 0.0 }
    }
}

#[derive(Debug, Clone)]
struct IndexedRecord {
    title_lower: String,
    title: Option<IndexedField>,
    searchable: Option<IndexedField>,
}

/// Ordered, read-only collection of [`MovieRecord`]s.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    records: Vec<MovieRecord>,
    indexed: Vec<IndexedRecord>,
    options: FuzzyOptions,
}

impl CatalogIndex {
    pub fn new(records: Vec<MovieRecord>) -> Self {
        Self::with_options(records, FuzzyOptions::default())
    }

    pub fn with_options(records: Vec<MovieRecord>, options: FuzzyOptions) -> Self {
        let indexed = records
            .iter()
            .map(|r| IndexedRecord {
                title_lower: r.title.to_lowercase(),
                title: IndexedField::new(&r.title),
                searchable: IndexedField::new(&r.searchable_text),
            })
            .collect();
        Self { records, indexed, options }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// Records whose title equals `title`, ignoring case, in catalog order.
    pub fn exact_title_matches(&self, title: &str) -> Vec<&MovieRecord> {
        let wanted = title.to_lowercase();
        self.records
            .iter()
            .zip(&self.indexed)
            .filter(|(_, ix)| ix.title_lower == wanted)
            .map(|(r, _)| r)
            .collect()
    }

    /// All records whose title or search text approximately contains
    /// `pattern`, best first. Ties keep catalog order.
    pub fn fuzzy_search(&self, pattern: &str) -> Vec<RetrievalMatch<'_>> {
        let pattern = Pattern::new(pattern);
        let opts = &self.options;
        let total_weight = opts.title_weight + opts.searchable_weight;
        let title_weight = opts.title_weight / total_weight;
        let searchable_weight = opts.searchable_weight / total_weight;

        let mut matches: Vec<RetrievalMatch<'_>> = self
            .records
            .iter()
            .zip(&self.indexed)
            .filter_map(|(record, ix)| {
                let mut fields = Vec::with_capacity(2);
                if let Some(field) = &ix.title {
                    if let Some(s) = fuzzy::field_score(&pattern, field, opts) {
                        fields.push((s, title_weight, field.norm));
                    }
                }
                if let Some(field) = &ix.searchable {
                    if let Some(s) = fuzzy::field_score(&pattern, field, opts) {
                        fields.push((s, searchable_weight, field.norm));
                    }
                }
                (!fields.is_empty()).then(|| RetrievalMatch {
                    record,
                    score: fuzzy::combine(&fields),
                })
            })
            .collect();

        // Stable sort keeps catalog order for equal scores.
        matches.sort_by(|a, b| a.score.total_cmp(&b.score));
        matches
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn searchable_text_is_lowercase_concatenation() {
        let r = MovieRecord::new(MovieRow {
            title: "Parasite".into(),
            director: "Bong Joon Ho".into(),
            writer: "Han Jin-won".into(),
            cast: "Song Kang-ho".into(),
            country: "South Korea".into(),
            languages: "Korean".into(),
            rating: "8.5".into(),
            ..Default::default()
        });
        assert_eq!(
            r.searchable_text(),
            "parasite bong joon ho han jin-won song kang-ho south korea korean"
        );
    }

    #[test]
    fn exact_title_ignores_case() {
        let catalog = sample_catalog();
        let hits = catalog.exact_title_matches("the GODFATHER");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "The Godfather");
        assert!(catalog.exact_title_matches("Godfather").is_empty());
    }

    #[test]
    fn fuzzy_search_ranks_closest_title_first() {
        let catalog = sample_catalog();
        let results = catalog.fuzzy_search("inceptoin");
        assert!(!results.is_empty());
        assert_eq!(results[0].record.title, "Inception");
    }

    #[test]
    fn fuzzy_search_is_sorted_ascending() {
        let catalog = sample_catalog();
        let results = catalog.fuzzy_search("godfather");
        assert!(results.len() >= 2);
        assert!(results.windows(2).all(|w| w[0].score <= w[1].score));
        assert!(results.iter().all(|m| (0.0..=1.0).contains(&m.score)));
    }

    #[test]
    fn fuzzy_search_matches_people_through_search_text() {
        let catalog = sample_catalog();
        let results = catalog.fuzzy_search("christopher nolan");
        let titles: Vec<&str> = results.iter().map(|m| m.record.title.as_str()).collect();
        assert!(titles.contains(&"Inception"));
        assert!(titles.contains(&"Interstellar"));
        assert!(!titles.contains(&"Casablanca"));
    }

    #[test]
    fn fuzzy_search_without_hits_is_empty() {
        let catalog = sample_catalog();
        assert!(catalog.fuzzy_search("zzzzqqqq").is_empty());
    }

    #[test]
    fn empty_catalog_searches_cleanly() {
        let catalog = CatalogIndex::new(vec![]);
        assert!(catalog.is_empty());
        assert!(catalog.fuzzy_search("anything").is_empty());
        assert!(catalog.exact_title_matches("anything").is_empty());
    }
}
