//! Research article input, keyword matching and prompt construction.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::PipelineConfig;
use crate::error::BriefError;

/// One entry of the input JSON array (as produced by the arXiv fetcher).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    /// The abstract
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub full_text: String,
    /// Fields we don't use directly but still search for keywords
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Load the article list from `path`; an empty list is an error.
pub fn load_articles(path: &Path) -> Result<Vec<Article>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let articles: Vec<Article> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid JSON input in {}", path.display()))?;

    if articles.is_empty() {
        return Err(BriefError::NoArticles(path.to_path_buf()).into());
    }

    log::info!(
        "🧠 Loaded {} research articles from {}",
        articles.len(),
        path.display()
    );
    Ok(articles)
}

/// Keywords occurring anywhere in `text`, case-insensitively, in keyword order.
pub fn extract_keywords(text: &str, keywords: &[String]) -> Vec<String> {
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .filter(|kw| haystack.contains(&kw.to_lowercase()))
        .cloned()
        .collect()
}

/// Keywords found in any field of the article.
pub fn article_keywords(article: &Article, keywords: &[String]) -> Result<Vec<String>> {
    let serialized = serde_json::to_string(article)?;
    Ok(extract_keywords(&serialized, keywords))
}

/// First `max_words` whitespace-separated words, joined by single spaces.
pub fn truncate_by_words(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Instructions asking the model for the configured sections, in order.
pub fn system_prompt(pipeline: &PipelineConfig) -> String {
    let marker = &pipeline.marker;
    let section_lines = pipeline
        .required_sections
        .iter()
        .map(|label| format!("{} {}", marker, label))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an AI research advisor.\n\n\
         Summarize the following research article using exactly {count} sections, \
         labeled with {marker} headers, in this exact order:\n\n\
         {section_lines}\n\n\
         You must prefix each section with {marker} in all caps, followed by the section title exactly as shown.\n\
         Do not use markdown headings, bullets, or colons in place of the section markers.\n\
         Respond in clear markdown, and bold any matched keywords.",
        count = pipeline.required_sections.len(),
    )
}

/// The article as presented to the model.
pub fn user_prompt(article: &Article, keywords: &[String], max_words: usize) -> String {
    format!(
        "**Title:** {}\n\
         **Matched Keywords:** {}\n\n\
         **Abstract:**\n{}\n\n\
         **Full Paper Content (truncated):**\n{}\n",
        article.title,
        keywords.join(", "),
        article.summary,
        truncate_by_words(&article.full_text, max_words),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords() -> Vec<String> {
        ["Copilot", "AI Agents", "Future of work"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn article() -> Article {
        serde_json::from_str(
            r#"{
                "title": "Copilot in the classroom",
                "summary": "We study ai agents.",
                "link": "https://arxiv.org/abs/2401.00001",
                "full_text": "one two   three\nfour",
                "arxiv_id": "2401.00001",
                "matched_keywords": ["Copilot"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_extract_keywords_case_insensitive() {
        let found = extract_keywords("we discuss COPILOT and the future of Work", &keywords());
        assert_eq!(found, vec!["Copilot", "Future of work"]);
    }

    #[test]
    fn test_article_keywords_searches_all_fields() {
        let found = article_keywords(&article(), &keywords()).unwrap();
        assert_eq!(found, vec!["Copilot", "AI Agents"]);
    }

    #[test]
    fn test_extra_fields_preserved() {
        let article = article();
        assert_eq!(article.extra["arxiv_id"], "2401.00001");
    }

    #[test]
    fn test_truncate_by_words() {
        assert_eq!(truncate_by_words("one two   three\nfour", 3), "one two three");
        assert_eq!(truncate_by_words("short", 10), "short");
        assert_eq!(truncate_by_words("", 10), "");
    }

    #[test]
    fn test_system_prompt_lists_sections_in_order() {
        let pipeline = PipelineConfig::default();
        let prompt = system_prompt(&pipeline);
        assert!(prompt.contains("exactly 6 sections"));

        let summary = prompt.find("[SECTION] Summary\n").unwrap();
        let linkedin = prompt.find("[SECTION] LinkedIn Post").unwrap();
        assert!(summary < linkedin);
    }

    #[test]
    fn test_user_prompt() {
        let prompt = user_prompt(&article(), &["Copilot".to_string()], 2);
        assert!(prompt.starts_with("**Title:** Copilot in the classroom\n"));
        assert!(prompt.contains("**Matched Keywords:** Copilot\n"));
        assert!(prompt.contains("**Abstract:**\nWe study ai agents."));
        assert!(prompt.contains("**Full Paper Content (truncated):**\none two\n"));
    }

    #[test]
    fn test_load_articles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.json");
        std::fs::write(&path, r#"[{"title": "A"}, {"title": "B"}]"#).unwrap();

        let articles = load_articles(&path).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "A");
        assert!(articles[0].full_text.is_empty());
    }

    #[test]
    fn test_load_articles_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.json");
        std::fs::write(&path, "[]").unwrap();

        let err = load_articles(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BriefError>(),
            Some(BriefError::NoArticles(_))
        ));
    }

    #[test]
    fn test_load_articles_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = load_articles(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON input"));
    }
}
