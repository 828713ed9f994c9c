//! The question-answering pipeline shared by the HTTP surface and `--ask`.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::{CatalogIndex, ingest};
use crate::compose::{Composer, PromptTemplates};
use crate::config::Config;
use crate::error::{AppError, QueryError};
use crate::llm::{LlmProvider, providers};
use crate::query::{QueryCategory, determine_query_type};
use crate::retrieval;

/// Result of answering one question.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOutcome {
    pub query: String,
    pub query_type: QueryCategory,
    pub response: String,
    /// Number of records retrieved.
    pub matches: usize,
    pub llm_used: bool,
}

/// Catalog size and provider state, for the health surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStatus {
    pub movies_loaded: usize,
    pub llm_enabled: bool,
    pub llm_type: &'static str,
}

/// Read-only catalog plus composer. Cheap to clone.
#[derive(Debug, Clone)]
pub struct MovieQa {
    catalog: Arc<CatalogIndex>,
    composer: Composer,
}

impl MovieQa {
    pub fn new(catalog: Arc<CatalogIndex>, composer: Composer) -> Self {
        Self { catalog, composer }
    }

    /// Startup wiring: load the catalog, build the provider, read prompts.
    ///
    /// A catalog that fails to load or holds no records is fatal. A provider
    /// that cannot be built (e.g. missing API key) is logged and the service
    /// runs template-only.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let records = ingest::load_csv(&config.catalog.path)?;
        if records.is_empty() {
            return Err(AppError::Catalog(format!(
                "no movies loaded from {}",
                config.catalog.path.display()
            )));
        }
        let catalog = CatalogIndex::new(records);
        info!(movies = catalog.len(), path = %config.catalog.path.display(), "catalog loaded");

        let provider = match providers::build(&config.llm, config.llm_api_key.clone()) {
            Ok(provider) => provider,
            Err(e) => {
                warn!(error = %e, "LLM provider unavailable, answering from templates only");
                None
            }
        };
        match &provider {
            Some(p) => info!(provider = p.name(), model = p.model(), "LLM provider ready"),
            None => info!("no LLM provider configured"),
        }

        let templates = PromptTemplates::load(&config.prompts_dir);
        Ok(Self::new(Arc::new(catalog), Composer::new(provider, templates)))
    }

    /// Active provider, if any.
    pub fn provider(&self) -> Option<&LlmProvider> {
        self.composer.provider()
    }

    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    /// Classify, retrieve and compose. Blank questions are rejected before
    /// the catalog is touched.
    pub async fn answer(&self, query: &str) -> Result<QueryOutcome, QueryError> {
        if query.trim().is_empty() {
            return Err(QueryError::EmptyQuery);
        }

        let query_type = determine_query_type(query);
        let matches = retrieval::search(&self.catalog, query);
        info!(%query, %query_type, matches = matches.len(), "processing query");

        let answer = self.composer.compose(query, &matches, query_type).await;
        info!(source = ?answer.source, "answer composed");

        Ok(QueryOutcome {
            query: query.to_string(),
            query_type,
            response: answer.text,
            matches: matches.len(),
            llm_used: self.composer.provider().is_some(),
        })
    }

    pub fn status(&self) -> ServiceStatus {
        let provider = self.provider();
        ServiceStatus {
            movies_loaded: self.catalog.len(),
            llm_enabled: provider.is_some(),
            llm_type: provider.map_or("none", |p| p.name()),
        }
    }
}
