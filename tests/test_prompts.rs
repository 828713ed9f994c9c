//! Tests for prompt template loading from config/prompts

use std::fs;
use std::path::Path;

use movie_rag_bot::compose::PromptTemplates;

#[test]
fn test_answer_prompt_file_exists() {
    let path = "config/prompts/movie_answer.txt";
    assert!(fs::metadata(path).is_ok(), "movie_answer.txt prompt file missing");
}

#[test]
fn test_no_match_prompt_file_exists() {
    let path = "config/prompts/movie_no_match.txt";
    assert!(fs::metadata(path).is_ok(), "movie_no_match.txt prompt file missing");
}

#[test]
fn test_answer_prompt_template_vars() {
    let text = fs::read_to_string("config/prompts/movie_answer.txt").unwrap();
    assert!(text.contains("{{query}}"), "movie_answer.txt should contain {{query}} variable");
    assert!(text.contains("{{movies}}"), "movie_answer.txt should contain {{movies}} variable");
}

#[test]
fn test_no_match_prompt_template_vars() {
    let text = fs::read_to_string("config/prompts/movie_no_match.txt").unwrap();
    assert!(text.contains("{{query}}"), "movie_no_match.txt should contain {{query}} variable");
    assert!(!text.contains("{{movies}}"), "movie_no_match.txt has no candidates to embed");
}

#[test]
fn test_shipped_prompts_match_builtin_defaults() {
    let loaded = PromptTemplates::load(Path::new("config/prompts"));
    let builtin = PromptTemplates::default();
    assert_eq!(loaded.answer, builtin.answer);
    assert_eq!(loaded.no_match, builtin.no_match);
}

#[test]
fn test_rendered_prompt_has_no_placeholders_left() {
    let templates = PromptTemplates::load(Path::new("config/prompts"));
    let prompt = templates.render_no_match("Who directed Xqzv?");
    assert!(prompt.contains("Who directed Xqzv?"));
    assert!(!prompt.contains("{{"));
}
