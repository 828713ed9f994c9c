//! Movie title extraction from free-text questions.
//!
//! Rules run in precedence order and the first one producing a non-empty
//! title wins:
//!
//! 1. quoted text (`'...'` or `"..."`), returned trimmed and verbatim
//! 2. question patterns such as `director of <title>` or `tell me about <title>`
//! 3. the query minus stop words, falling back to the query itself

use std::sync::LazyLock;

use regex::Regex;

static QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["']([^"']+)["']"#).unwrap());

/// Question shapes, tried in order. Capture group 1 is the title.
static TITLE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(?:director|writer|cast|actors?|rating|budget|runtime|gross|earnings?)\s+of\s+(.+?)(?:\?|$)",
        r"(?i)(?:who\s+(?:is|are|was|were)\s+(?:the\s+)?(?:director|writer|cast|actors?|stars?)\s+(?:of|in)\s+)(.+?)(?:\?|$)",
        r"(?i)(?:what\s+(?:is|was)\s+(?:the\s+)?(?:rating|budget|runtime|gross|earnings?)\s+(?:of|for)\s+)(.+?)(?:\?|$)",
        r"(?i)(?:when\s+(?:was|did)\s+)(.+?)(?:\s+(?:released?|come\s+out))(?:\?|$)",
        r"(?i)(?:how\s+long\s+(?:is|was)\s+)(.+?)(?:\?|$)",
        r"(?i)(?:tell\s+me\s+about\s+)(.+?)(?:\?|$)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static MEDIA_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:the\s+movie|the\s+film|movie|film)$").unwrap());

/// Words dropped by the last-resort extraction.
const STOP_WORDS: &[&str] = &[
    "what", "is", "the", "who", "when", "where", "how", "of", "a", "an", "and", "or", "but",
    "in", "on", "at", "to", "for", "with", "by", "was", "were", "are", "director", "writer",
    "cast", "actor", "actress", "rating", "budget", "runtime", "gross", "earnings", "released",
    "release", "date",
];

/// Derive the movie title a question refers to.
///
/// Never returns an empty string for non-empty input: when nothing better
/// is found the original query comes back unchanged.
pub fn extract_title(query: &str) -> String {
    if let Some(quoted) = quoted_title(query) {
        return quoted;
    }
    if let Some(title) = pattern_title(query) {
        return title;
    }
    keyword_title(query).unwrap_or_else(|| query.to_string())
}

fn quoted_title(query: &str) -> Option<String> {
    let caps = QUOTED_RE.captures(query)?;
    let inner = caps.get(1)?.as_str().trim();
    (!inner.is_empty()).then(|| inner.to_string())
}

fn pattern_title(query: &str) -> Option<String> {
    TITLE_PATTERNS.iter().find_map(|re| {
        let raw = re.captures(query)?.get(1)?.as_str().trim();
        let title = MEDIA_SUFFIX_RE.replace(raw, "");
        let title = title.trim();
        (!title.is_empty()).then(|| title.to_string())
    })
}

fn keyword_title(query: &str) -> Option<String> {
    let kept: Vec<&str> = query
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .filter(|w| !STOP_WORDS.contains(&w.to_lowercase().as_str()))
        .filter(|w| w.chars().count() > 1)
        .filter(|w| !w.chars().all(|c| c == '?'))
        .collect();

    let joined = kept.join(" ");
    (!joined.is_empty()).then_some(joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_title_takes_precedence() {
        assert_eq!(extract_title(r#"Who is the director of "Inception"?"#), "Inception");
        assert_eq!(extract_title(r#"budget of "  The Matrix  " please"#), "The Matrix");
        assert_eq!(extract_title("tell me about 'Heat'"), "Heat");
    }

    #[test]
    fn quoted_text_is_not_normalised() {
        assert_eq!(extract_title(r#"rating of "the godfather MOVIE""#), "the godfather MOVIE");
    }

    #[test]
    fn blank_quotes_fall_through() {
        assert_eq!(extract_title(r#"director of "   " Jaws"#), r#""   " Jaws"#);
    }

    #[test]
    fn field_of_pattern() {
        assert_eq!(extract_title("Who is the director of The Godfather?"), "The Godfather");
        assert_eq!(extract_title("budget of Avatar"), "Avatar");
        assert_eq!(extract_title("What are the earnings of Titanic?"), "Titanic");
    }

    #[test]
    fn who_is_the_star_in_pattern() {
        assert_eq!(extract_title("Who are the stars in Heat?"), "Heat");
    }

    #[test]
    fn what_is_the_field_for_pattern() {
        assert_eq!(extract_title("What was the runtime for Dune?"), "Dune");
    }

    #[test]
    fn release_pattern() {
        assert_eq!(extract_title("When was Jaws released?"), "Jaws");
        assert_eq!(extract_title("when did The Matrix come out"), "The Matrix");
    }

    #[test]
    fn how_long_pattern() {
        assert_eq!(extract_title("How long is Oppenheimer?"), "Oppenheimer");
    }

    #[test]
    fn tell_me_about_strips_media_suffix() {
        assert_eq!(extract_title("Tell me about Titanic the movie"), "Titanic");
        assert_eq!(extract_title("tell me about Casablanca film?"), "Casablanca");
    }

    #[test]
    fn stops_at_first_question_mark() {
        assert_eq!(extract_title("rating of Up? and more?"), "Up");
    }

    #[test]
    fn keyword_fallback_drops_stop_words() {
        assert_eq!(extract_title("Inception director"), "Inception");
        assert_eq!(extract_title("the dark knight rating?"), "dark knight");
    }

    #[test]
    fn keyword_fallback_drops_single_chars() {
        assert_eq!(extract_title("x men budget"), "men");
    }

    #[test]
    fn falls_back_to_original_query() {
        assert_eq!(extract_title("who is the director?"), "who is the director?");
        assert_eq!(extract_title("?"), "?");
    }
}
