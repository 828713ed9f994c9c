//! Response composer. Turns ranked matches into the answer text.
//!
//! Either branch first tries the configured provider. Any provider error is
//! absorbed here and answered deterministically:
//!
//! - no matches → [`fallback::NO_MATCH_APOLOGY`]
//! - matches    → a per-category template over the best match
//!
//! `compose` never fails and never returns empty text.

pub mod fallback;
pub mod prompt;

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::RetrievalMatch;
use crate::llm::LlmProvider;
use crate::query::QueryCategory;
pub use prompt::{PromptBuilder, PromptTemplates};

/// Candidates embedded in the match-branch prompt.
pub const MAX_CONTEXT_MATCHES: usize = 3;

/// Which path produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AnswerSource {
    Provider,
    Template,
    NoMatchApology,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedAnswer {
    pub text: String,
    pub source: AnswerSource,
}

impl ComposedAnswer {
    fn new(text: impl Into<String>, source: AnswerSource) -> Self {
        Self { text: text.into(), source }
    }
}

/// Holds the active provider (if any) and the prompt templates.
/// Cheap to clone.
#[derive(Debug, Clone)]
pub struct Composer {
    provider: Option<LlmProvider>,
    templates: Arc<PromptTemplates>,
}

impl Composer {
    pub fn new(provider: Option<LlmProvider>, templates: PromptTemplates) -> Self {
        Self { provider, templates: Arc::new(templates) }
    }

    pub fn provider(&self) -> Option<&LlmProvider> {
        self.provider.as_ref()
    }

    pub async fn compose(
        &self,
        query: &str,
        matches: &[RetrievalMatch<'_>],
        category: QueryCategory,
    ) -> ComposedAnswer {
        let Some(best) = matches.first() else {
            let prompt = self.templates.render_no_match(query);
            return match self.generate(&prompt).await {
                Some(text) => ComposedAnswer::new(text, AnswerSource::Provider),
                None => {
                    info!("no matches, answering with apology");
                    ComposedAnswer::new(fallback::NO_MATCH_APOLOGY, AnswerSource::NoMatchApology)
                }
            };
        };

        let context = &matches[..matches.len().min(MAX_CONTEXT_MATCHES)];
        let prompt = self.templates.render_answer(query, context);
        match self.generate(&prompt).await {
            Some(text) => ComposedAnswer::new(text, AnswerSource::Provider),
            None => {
                debug!(%category, title = %best.record.title, score = best.score, "answering from template");
                ComposedAnswer::new(fallback::template_answer(best, category), AnswerSource::Template)
            }
        }
    }

    /// One provider round-trip. `None` when no provider is configured or the
    /// call failed; failures are logged and never retried.
    async fn generate(&self, prompt: &str) -> Option<String> {
        let provider = self.provider.as_ref()?;
        match provider.complete(prompt).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "generation failed, using fallback");
                None
            }
        }
    }
}
