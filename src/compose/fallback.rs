//! Deterministic answers, used when no provider is configured or the
//! provider call fails.

use crate::catalog::{MovieRecord, RetrievalMatch};
use crate::query::QueryCategory;

/// Reply for an empty match list when no generated text is available.
pub const NO_MATCH_APOLOGY: &str = "I couldn't find any movies matching your query. \
Please check the spelling or try a different movie title.";

/// Appended to template answers whose best score exceeds [`APPROXIMATE_SCORE`].
pub const APPROXIMATE_MATCH_NOTE: &str =
    "\n\n(Note: This might not be an exact match. Please verify the movie title.)";

pub const APPROXIMATE_SCORE: f64 = 0.2;

fn or<'a>(value: &'a str, missing: &'a str) -> &'a str {
    if value.is_empty() { missing } else { value }
}

/// Answer from the best match alone, phrased for `category`.
pub fn template_answer(best: &RetrievalMatch<'_>, category: QueryCategory) -> String {
    let mut text = category_sentence(best.record, category);
    if best.score > APPROXIMATE_SCORE {
        text.push_str(APPROXIMATE_MATCH_NOTE);
    }
    text
}

fn category_sentence(m: &MovieRecord, category: QueryCategory) -> String {
    let title = &m.title;
    match category {
        QueryCategory::Director => {
            format!("The director of \"{title}\" is {}.", or(&m.director, "not available"))
        }
        QueryCategory::Writer => {
            format!("The writer(s) of \"{title}\" are {}.", or(&m.writer, "not available"))
        }
        QueryCategory::Cast => {
            format!("The main cast of \"{title}\" includes: {}.", or(&m.cast, "not available"))
        }
        QueryCategory::Rating => {
            let mut s = format!("\"{title}\" has an average rating of {}", or(&m.rating, "not available"));
            if !m.metascore.is_empty() {
                s.push_str(&format!(" and a Metascore of {}", m.metascore));
            }
            s.push('.');
            s
        }
        QueryCategory::ReleaseDate => {
            format!("\"{title}\" was released on {}.", or(&m.release_date, "date not available"))
        }
        QueryCategory::Country => {
            format!("\"{title}\" is from {}.", or(&m.country, "country not available"))
        }
        QueryCategory::Languages => {
            format!("\"{title}\" is available in {}.", or(&m.languages, "languages not available"))
        }
        QueryCategory::Budget => {
            format!("The budget of \"{title}\" was {}.", or(&m.budget, "not available"))
        }
        QueryCategory::Gross => {
            format!("\"{title}\" grossed {} worldwide.", or(&m.gross, "earnings not available"))
        }
        QueryCategory::Runtime => {
            format!("The runtime of \"{title}\" is {}.", or(&m.runtime, "not available"))
        }
        QueryCategory::General => format!(
            "Here's information about \"{title}\":\n\
             - Director: {}\n\
             - Rating: {}\n\
             - Release Date: {}\n\
             - Cast: {}",
            or(&m.director, "Not available"),
            or(&m.rating, "Not available"),
            or(&m.release_date, "Not available"),
            or(&m.cast, "Not available"),
        ),
    }
}
