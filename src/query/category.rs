//! Query classification: which movie attribute a question asks about.
//!
//! Classification is an ordered keyword rule list evaluated top to bottom;
//! the first rule with a keyword contained in the lowercased query wins.

use std::fmt;

use serde::Serialize;

/// Closed set of attributes a query can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryCategory {
    Director,
    Writer,
    Cast,
    Rating,
    ReleaseDate,
    Country,
    Languages,
    Budget,
    Gross,
    Runtime,
    General,
}

impl QueryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Director => "director",
            Self::Writer => "writer",
            Self::Cast => "cast",
            Self::Rating => "rating",
            Self::ReleaseDate => "releaseDate",
            Self::Country => "country",
            Self::Languages => "languages",
            Self::Budget => "budget",
            Self::Gross => "gross",
            Self::Runtime => "runtime",
            Self::General => "general",
        }
    }
}

impl fmt::Display for QueryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification rules in priority order. Keywords are substring tests,
/// so `"star"` also catches `"starred"` and `"stars"`.
pub const CATEGORY_RULES: &[(QueryCategory, &[&str])] = &[
    (QueryCategory::Director, &["director", "directed", "directing"]),
    (QueryCategory::Writer, &["writer", "screenplay", "script"]),
    (QueryCategory::Cast, &["cast", "actor", "actress", "star"]),
    (QueryCategory::Rating, &["rating", "score"]),
    (QueryCategory::ReleaseDate, &["release", "year", "date"]),
    (QueryCategory::Country, &["country", "origin"]),
    (QueryCategory::Languages, &["language"]),
    (QueryCategory::Budget, &["budget", "cost"]),
    (QueryCategory::Gross, &["gross", "earning", "revenue"]),
    (QueryCategory::Runtime, &["runtime", "duration", "length"]),
];

/// Classify `query`. Always exactly one category; `General` when no rule hits.
pub fn determine_query_type(query: &str) -> QueryCategory {
    let lower = query.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(QueryCategory::General)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_rule_is_reachable() {
        let cases = [
            ("Who is the director of Jaws?", QueryCategory::Director),
            ("Who wrote the screenplay for Fargo", QueryCategory::Writer),
            ("Which actress leads Alien", QueryCategory::Cast),
            ("What score did Heat get", QueryCategory::Rating),
            ("What year did Up come out", QueryCategory::ReleaseDate),
            ("Country of origin for Amelie", QueryCategory::Country),
            ("What languages are spoken in Babel", QueryCategory::Languages),
            ("How much did Avatar cost", QueryCategory::Budget),
            ("Total revenue of Titanic", QueryCategory::Gross),
            ("What's the duration of Dune", QueryCategory::Runtime),
            ("Tell me about Memento", QueryCategory::General),
        ];
        for (query, expected) in cases {
            assert_eq!(determine_query_type(query), expected, "query: {query}");
        }
    }

    #[test]
    fn earliest_rule_wins() {
        assert_eq!(
            determine_query_type("Who directed and starred in it"),
            QueryCategory::Director
        );
        assert_eq!(
            determine_query_type("cast and budget of Heat"),
            QueryCategory::Cast
        );
        assert_eq!(
            determine_query_type("release date and runtime"),
            QueryCategory::ReleaseDate
        );
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(determine_query_type("BUDGET OF JAWS"), QueryCategory::Budget);
    }

    #[test]
    fn serialises_with_wire_names() {
        let json = serde_json::to_string(&QueryCategory::ReleaseDate).unwrap();
        assert_eq!(json, "\"releaseDate\"");
        assert_eq!(QueryCategory::General.to_string(), "general");
    }
}
