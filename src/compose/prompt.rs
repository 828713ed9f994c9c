//! Prompt assembly for the generation provider.
//!
//! Templates are plain-text files under `config/prompts/`:
//!
//! ```text
//! movie_no_match.txt: nothing in the catalog matched; {{query}}
//! movie_answer.txt:   candidates found; {{query}} and {{movies}}
//! ```
//!
//! Missing or blank files fall back to the built-in text below, so the
//! binary runs without a `config/` directory.
//!
//! Variable substitution uses `{{key}}` syntax and is applied once at
//! [`build()`](PromptBuilder::build) time, after all parts are joined.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::catalog::RetrievalMatch;

const SEPARATOR: &str = "\n\n";

pub const NO_MATCH_FILE: &str = "movie_no_match.txt";
pub const ANSWER_FILE: &str = "movie_answer.txt";

/// Placeholder for empty record fields inside candidate blocks.
pub const NOT_AVAILABLE: &str = "Not available";

const DEFAULT_NO_MATCH: &str = r#"The user asked: "{{query}}"

No movies were found matching this query in the IMDB dataset. Please provide a comprehensive, helpful response that:

1. Acknowledges that no exact matches were found in the database
2. Suggests they might check the spelling of the movie title
3. Mention that movies might be known by different titles (original vs. international)
4. Suggest they can try searching with partial titles or alternative names
5. Encourage them to ask about other movies in the database
6. If the query seems to be about a specific genre, director, or topic, provide some general insights
7. Make the response friendly, encouraging, and detailed (3-4 sentences)

Keep the response conversational and helpful."#;

const DEFAULT_ANSWER: &str = r#"You are a knowledgeable movie information assistant with expertise in cinema history. A user asked: "{{query}}"

Here are the relevant movies from the IMDB database:

{{movies}}

Please provide a comprehensive, engaging response that:
1. Directly answers the user's question using the movie data above
2. Uses the movie with the best match score (lowest number) as the primary answer
3. Provides rich context and background information about the movie, director, or topic
4. Include interesting details about the production, cast, or cultural impact when relevant
5. If asking about a specific person (director, actor), mention their other notable works if you know them
6. For ratings or box office questions, provide context about what makes those numbers significant
7. If the match score is > 0.2, mention that this might not be exactly what they were looking for
8. Format movie titles in quotes like "The Godfather"
9. Make the response conversational, informative, and engaging
10. Aim for 3-5 sentences minimum to provide comprehensive information

Response:"#;

// ── PromptBuilder ─────────────────────────────────────────────────────────────

/// Fluent builder: join text parts, then substitute `{{key}}` variables.
///
/// Substitution is single-pass. Values are inserted verbatim and never
/// rescanned, so a question containing `{{movies}}` stays literal.
/// Unknown placeholders are left untouched.
#[derive(Debug, Default)]
pub struct PromptBuilder {
    parts: Vec<String>,
    vars: HashMap<String, String>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text fragment. Blank fragments are skipped.
    pub fn append(mut self, text: impl Into<String>) -> Self {
        let s = text.into();
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            self.parts.push(trimmed.to_string());
        }
        self
    }

    /// Register `{{key}}` → `value` substitution pairs applied at build time.
    pub fn with_vars<'a, I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (k, v) in vars {
            self.vars.insert(k.to_string(), v.to_string());
        }
        self
    }

    /// Register a single variable.
    pub fn var(mut self, key: &str, value: impl Into<String>) -> Self {
        self.vars.insert(key.to_string(), value.into());
        self
    }

    pub fn build(self) -> String {
        substitute(&self.parts.join(SEPARATOR), &self.vars)
    }
}

fn substitute(template: &str, vars: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let value = after
            .find("}}")
            .and_then(|end| vars.get(&after[..end]).map(|v| (v, end)));
        match value {
            Some((v, end)) => {
                out.push_str(v);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

// ── Templates ─────────────────────────────────────────────────────────────────

/// The two prompt bodies, loaded once at startup.
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub no_match: String,
    pub answer: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            no_match: DEFAULT_NO_MATCH.to_string(),
            answer: DEFAULT_ANSWER.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Read both templates from `dir`, using the built-in text for any
    /// file that is missing or blank.
    pub fn load(dir: &Path) -> Self {
        Self {
            no_match: read_or(dir, NO_MATCH_FILE, DEFAULT_NO_MATCH),
            answer: read_or(dir, ANSWER_FILE, DEFAULT_ANSWER),
        }
    }

    pub fn render_no_match(&self, query: &str) -> String {
        PromptBuilder::new()
            .append(self.no_match.as_str())
            .var("query", query)
            .build()
    }

    /// Render the match-branch prompt over `matches`, which the caller has
    /// already limited to the context window.
    pub fn render_answer(&self, query: &str, matches: &[RetrievalMatch<'_>]) -> String {
        let movies = matches
            .iter()
            .enumerate()
            .map(|(i, m)| candidate_block(i + 1, m))
            .collect::<Vec<_>>()
            .join(SEPARATOR);

        PromptBuilder::new()
            .append(self.answer.as_str())
            .with_vars([("query", query), ("movies", movies.as_str())])
            .build()
    }
}

fn read_or(dir: &Path, filename: &str, default: &str) -> String {
    let path = dir.join(filename);
    match fs::read_to_string(&path) {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            debug!("prompt: '{}' is blank, using built-in template", path.display());
            default.to_string()
        }
        Err(_) => {
            debug!("prompt: '{}' not found, using built-in template", path.display());
            default.to_string()
        }
    }
}

fn or_not_available(value: &str) -> &str {
    if value.is_empty() { NOT_AVAILABLE } else { value }
}

/// One candidate's section of the match-branch prompt. `index` is 1-based.
pub fn candidate_block(index: usize, m: &RetrievalMatch<'_>) -> String {
    let r = m.record;
    let fields = [
        ("Director", r.director.as_str()),
        ("Writer", r.writer.as_str()),
        ("Cast", r.cast.as_str()),
        ("Rating", r.rating.as_str()),
        ("Metascore", r.metascore.as_str()),
        ("Release Date", r.release_date.as_str()),
        ("Country", r.country.as_str()),
        ("Languages", r.languages.as_str()),
        ("Budget", r.budget.as_str()),
        ("Worldwide Gross", r.gross.as_str()),
        ("Runtime", r.runtime.as_str()),
    ];

    let mut block = format!("Movie {index}: \"{}\"", r.title);
    for (label, value) in fields {
        block.push_str(&format!("\n- {label}: {}", or_not_available(value)));
    }
    block.push_str(&format!("\n- Match Score: {:.3} (lower is better)", m.score));
    block
}
