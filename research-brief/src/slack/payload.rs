//! Parent message and thread reply payloads, written as JSON files.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;

use super::MessageBlock;

/// A message ready to post: fallback text plus its blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    pub text: String,
    pub blocks: Vec<MessageBlock>,
}

impl Payload {
    /// Write the payload as pretty-printed JSON, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

/// "October 18, 2026"
pub fn briefing_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Channel message announcing the day's briefing.
pub fn parent_payload(title: &str, date: NaiveDate) -> Payload {
    let heading = format!("📚 Research Briefing – {}", briefing_date(date));

    Payload {
        text: heading.clone(),
        blocks: vec![
            MessageBlock::header(heading),
            MessageBlock::text(format!(
                "Here’s today’s top research insight:\n*{}*",
                title
            )),
        ],
    }
}

/// Thread reply carrying keywords, the paper link, and the summary blocks.
pub fn thread_reply_payload(
    keywords: &[String],
    link: &str,
    summary_blocks: Vec<MessageBlock>,
) -> Payload {
    let keyword_list = keywords
        .iter()
        .map(|k| format!("`{}`", k))
        .collect::<Vec<_>>()
        .join(", ");

    let mut blocks = vec![
        MessageBlock::context(format!("📌 *Matched Keywords:* {}", keyword_list)),
        MessageBlock::text(format!("<{}|Open full paper>", link)),
        MessageBlock::Divider,
    ];
    blocks.extend(summary_blocks);

    Payload {
        text: "Full research breakdown below 👇".to_string(),
        blocks,
    }
}
