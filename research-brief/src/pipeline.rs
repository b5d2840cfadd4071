//! From model output to Slack payloads.
//!
//! The core is [`render_summary`]: clean, validate (fail-fast), parse, then
//! chunk and lay out every section. [`generate_briefing`] wraps it with the
//! article prompt and the completion call.

use anyhow::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::article::{Article, article_keywords, system_prompt, user_prompt};
use crate::config::{BriefConfig, PipelineConfig};
use crate::error::BriefError;
use crate::llm::LlmClient;
use crate::slack::{MessageBlock, Payload, build_blocks, parent_payload, thread_reply_payload};
use crate::summary::{missing_sections, parse_sections, strip_code_fences};

pub const PARENT_PAYLOAD_FILE: &str = "parent_payload.json";
pub const THREAD_PAYLOAD_FILE: &str = "thread_reply_payload.json";
pub const INVALID_SUMMARY_FILE: &str = "invalid_summary_output.txt";

/// Turn raw model output into ordered message blocks.
///
/// Every required section must be present before anything is built; if any
/// is missing the error carries their names and the untouched `raw` text.
pub fn render_summary(
    raw: &str,
    config: &PipelineConfig,
) -> std::result::Result<Vec<MessageBlock>, BriefError> {
    let cleaned = strip_code_fences(raw);

    let missing = missing_sections(&cleaned, &config.required_sections, &config.marker);
    if !missing.is_empty() {
        return Err(BriefError::MissingSections {
            missing,
            raw: raw.to_string(),
        });
    }

    let sections = parse_sections(&cleaned, &config.marker);
    log::debug!("Parsed {} section(s)", sections.len());
    if sections.is_empty() && !config.required_sections.is_empty() {
        log::warn!(
            "Required sections were found but no '{}' marker matched exactly; the summary is empty",
            config.marker
        );
    }

    Ok(build_blocks(&sections, &config.section_emojis, config.chunk))
}

/// The two messages posted for one article.
#[derive(Debug, Clone)]
pub struct Briefing {
    pub parent: Payload,
    pub thread: Payload,
}

impl Briefing {
    /// Write both payloads into `out_dir`, returning their paths.
    pub fn write_to(&self, out_dir: &Path) -> Result<(PathBuf, PathBuf)> {
        let parent_path = out_dir.join(PARENT_PAYLOAD_FILE);
        let thread_path = out_dir.join(THREAD_PAYLOAD_FILE);

        self.parent.write_to(&parent_path)?;
        self.thread.write_to(&thread_path)?;
        Ok((parent_path, thread_path))
    }
}

/// Summarize `article` with the model and lay the result out for Slack.
pub async fn generate_briefing(
    article: &Article,
    config: &BriefConfig,
    llm: &LlmClient,
    date: NaiveDate,
) -> Result<Briefing> {
    log::info!("📝 Summarizing article: {}", article.title);

    let keywords = article_keywords(article, &config.keywords)?;
    log::debug!("Matched keywords: {:?}", keywords);

    log::info!("🤖 Generating structured research summary...");
    let raw = llm
        .complete(
            &system_prompt(&config.pipeline),
            &user_prompt(article, &keywords, config.max_words),
        )
        .await?;

    let blocks = render_summary(&raw, &config.pipeline)?;
    log::info!("✅ Summary generated.");

    Ok(Briefing {
        parent: parent_payload(&article.title, date),
        thread: thread_reply_payload(&keywords, &article.link, blocks),
    })
}

/// If `err` is a missing-sections failure, save the raw model output for inspection.
pub fn persist_invalid_summary(err: &anyhow::Error, out_dir: &Path) -> Result<Option<PathBuf>> {
    let Some(BriefError::MissingSections { raw, .. }) = err.downcast_ref::<BriefError>() else {
        return Ok(None);
    };

    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(INVALID_SUMMARY_FILE);
    std::fs::write(&path, raw)?;
    Ok(Some(path))
}
