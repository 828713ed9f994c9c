//! End-to-end question answering over tests/fixtures/movies.csv.

use std::path::{Path, PathBuf};

use movie_rag_bot::compose::fallback::{APPROXIMATE_MATCH_NOTE, NO_MATCH_APOLOGY};
use movie_rag_bot::config::{Config, ProviderKind};
use movie_rag_bot::error::QueryError;
use movie_rag_bot::query::QueryCategory;
use movie_rag_bot::retrieval;
use movie_rag_bot::service::MovieQa;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/movies.csv")
}

fn template_only() -> MovieQa {
    MovieQa::from_config(&Config::test_default(&fixture())).unwrap()
}

#[test]
fn fixture_loads_every_row() {
    assert_eq!(template_only().status().movies_loaded, 11);
}

#[tokio::test]
async fn exact_title_director_question() {
    let outcome = template_only().answer("Who is the director of The Godfather?").await.unwrap();
    assert_eq!(outcome.query_type, QueryCategory::Director);
    assert_eq!(outcome.matches, 1);
    assert_eq!(outcome.response, r#"The director of "The Godfather" is Francis Ford Coppola."#);
    assert!(!outcome.llm_used);
}

#[tokio::test]
async fn quoted_title_rating_question() {
    let outcome = template_only().answer(r#"What rating did "Casablanca" get?"#).await.unwrap();
    assert_eq!(outcome.query_type, QueryCategory::Rating);
    assert_eq!(
        outcome.response,
        r#""Casablanca" has an average rating of 8.5 and a Metascore of 100."#
    );
}

#[tokio::test]
async fn misspelled_title_gets_disclaimer() {
    let outcome = template_only().answer("What is the budget of Inceptoin?").await.unwrap();
    assert_eq!(outcome.query_type, QueryCategory::Budget);
    assert!(
        outcome.response.starts_with(r#"The budget of "Inception" was $160,000,000."#),
        "{}",
        outcome.response
    );
    assert!(outcome.response.ends_with(APPROXIMATE_MATCH_NOTE));
}

#[tokio::test]
async fn non_ascii_title_matches_case_insensitively() {
    let outcome = template_only().answer("tell me about AMÉLIE").await.unwrap();
    assert_eq!(outcome.matches, 1);
    assert!(outcome.response.starts_with("Here's information about \"Amélie\":"));
}

#[tokio::test]
async fn empty_fields_read_not_available() {
    let outcome = template_only().answer("Tell me about Unknown Pleasures").await.unwrap();
    assert_eq!(
        outcome.response,
        "Here's information about \"Unknown Pleasures\":\n\
         - Director: Not available\n\
         - Rating: Not available\n\
         - Release Date: Not available\n\
         - Cast: Not available"
    );
}

#[tokio::test]
async fn unknown_movie_gets_apology() {
    let outcome = template_only().answer("xqzvjjkw").await.unwrap();
    assert_eq!(outcome.matches, 0);
    assert_eq!(outcome.query_type, QueryCategory::General);
    assert_eq!(outcome.response, NO_MATCH_APOLOGY);
}

#[tokio::test]
async fn blank_query_is_rejected() {
    assert_eq!(template_only().answer("   ").await.unwrap_err(), QueryError::EmptyQuery);
}

#[test]
fn search_results_are_capped_and_sorted() {
    let qa = template_only();
    for query in ["nolan", "Christopher Nolan films", "Al Pacino", "godfather"] {
        let results = retrieval::search(qa.catalog(), query);
        assert!(results.len() <= retrieval::MAX_MATCHES, "{query}");
        assert!(results.windows(2).all(|w| w[0].score <= w[1].score), "{query}");
    }
}

#[tokio::test]
async fn provider_reply_is_used_when_available() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .match_body(mockito::Matcher::Regex(r#"Movie 1: \\"Heat\\""#.into()))
        .with_status(200)
        .with_body(r#"{"response":"Heat (1995) was directed by Michael Mann."}"#)
        .create_async()
        .await;

    let mut config = Config::test_default(&fixture());
    config.llm.provider = ProviderKind::Ollama;
    config.llm.ollama.url = server.url();
    let qa = MovieQa::from_config(&config).unwrap();

    let outcome = qa.answer("Tell me about Heat").await.unwrap();
    assert_eq!(outcome.response, "Heat (1995) was directed by Michael Mann.");
    assert!(outcome.llm_used);
    mock.assert_async().await;
}

#[tokio::test]
async fn failing_provider_falls_back_but_reports_llm_configured() {
    let mut config = Config::test_default(&fixture());
    config.llm.provider = ProviderKind::Ollama;
    config.llm.ollama.url = "http://127.0.0.1:1".into();
    let qa = MovieQa::from_config(&config).unwrap();

    let outcome = qa.answer("When was Parasite released?").await.unwrap();
    assert_eq!(outcome.response, r#""Parasite" was released on November 8, 2019."#);
    assert!(outcome.llm_used);
    assert_eq!(qa.status().llm_type, "ollama");
}
