//! Movie catalog question answering.
//!
//! A question flows through four stages:
//!
//! ```text
//! query::determine_query_type ─┐
//! retrieval::search ───────────┼─► compose::Composer ─► answer text
//!   (query::extract_title,     │     (LlmProvider or templates)
//!    catalog::CatalogIndex) ───┘
//! ```
//!
//! [`service::MovieQa`] wires them together; [`server`] exposes it over HTTP.

pub mod catalog;
pub mod compose;
pub mod config;
pub mod error;
pub mod llm;
pub mod logger;
pub mod query;
pub mod retrieval;
pub mod server;
pub mod service;
