//! Application-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("server error: {0}")]
    Server(String),

    #[error("query error: {0}")]
    Query(#[from] QueryError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejection raised before retrieval runs. The only error a well-formed
/// request can produce; provider failures never reach the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Query is required")]
    EmptyQuery,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn config_error_display() {
        let e = AppError::Config("missing field".into());
        assert!(e.to_string().contains("config error"));
        assert!(e.to_string().contains("missing field"));
    }

    #[test]
    fn catalog_error_display() {
        let e = AppError::Catalog("no records".into());
        assert_eq!(e.to_string(), "catalog error: no records");
    }

    #[test]
    fn logger_error_display() {
        let e = AppError::Logger("already initialized".into());
        assert!(e.to_string().contains("already initialized"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let e: AppError = io_err.into();
        assert!(e.to_string().contains("io error"));
        let _: &dyn Error = &e;
    }

    #[test]
    fn empty_query_message() {
        assert_eq!(QueryError::EmptyQuery.to_string(), "Query is required");
        let e: AppError = QueryError::EmptyQuery.into();
        assert_eq!(e.to_string(), "query error: Query is required");
    }
}
