//! research-brief configuration: section layout, chunk limits, keywords.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BriefError;
use crate::text::ChunkLimits;

const DEFAULT_MARKER: &str = "[SECTION]";
const DEFAULT_MAX_WORDS: usize = 2500;

const DEFAULT_SECTIONS: &[(&str, &str)] = &[
    ("Summary", "🧠"),
    ("Top 5 Findings", "🔍"),
    ("Soundbites", "🎤"),
    ("Comms Summary", "📢"),
    ("One-liner", "💡"),
    ("LinkedIn Post", "🔗"),
];

const DEFAULT_KEYWORDS: &[&str] = &[
    "Copilot",
    "AI Code Review",
    "Pair Programming with AI",
    "LLM in IDEs",
    "AI Developer Tools",
    "Developer Productivity AI",
    "Human-in-the-loop",
    "AI trust",
    "Education AI",
    "Responsible AI",
    "AI Alignment",
    "Fairness in AI",
    "AI open source",
    "AI Agents",
    "AI Assistants",
    "Autonomous Software Agents",
    "AI in APIs",
    "Developer Workflows",
    "Future of work",
];

/// How the model's summary is split, checked and laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Literal tag that introduces each section
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Section titles the summary must contain, in display order
    #[serde(default = "default_required_sections")]
    pub required_sections: Vec<String>,

    /// Emoji shown before each section title
    #[serde(default = "default_section_emojis")]
    pub section_emojis: HashMap<String, String>,

    #[serde(default)]
    pub chunk: ChunkLimits,
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

fn default_required_sections() -> Vec<String> {
    DEFAULT_SECTIONS
        .iter()
        .map(|(label, _)| label.to_string())
        .collect()
}

fn default_section_emojis() -> HashMap<String, String> {
    DEFAULT_SECTIONS
        .iter()
        .map(|(label, emoji)| (label.to_string(), emoji.to_string()))
        .collect()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            required_sections: default_required_sections(),
            section_emojis: default_section_emojis(),
            chunk: ChunkLimits::default(),
        }
    }
}

impl PipelineConfig {
    /// Reject settings the pipeline cannot work with.
    pub fn validate(&self) -> std::result::Result<(), BriefError> {
        if self.marker.trim().is_empty() {
            return Err(BriefError::InvalidConfig("marker must not be empty".into()));
        }
        if self.chunk.max_len == 0 {
            return Err(BriefError::InvalidConfig(
                "chunk.max_len must be at least 1".into(),
            ));
        }
        if let Some(blank) = self.required_sections.iter().position(|s| s.trim().is_empty()) {
            return Err(BriefError::InvalidConfig(format!(
                "required_sections[{}] is blank",
                blank
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefConfig {
    /// Keywords highlighted when they occur in the article
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    /// Word budget for the full text sent to the model
    #[serde(default = "default_max_words")]
    pub max_words: usize,

    /// Article JSON read when no input path is given
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Directory receiving the payload files
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    #[serde(default)]
    pub pipeline: PipelineConfig,
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_max_words() -> usize {
    DEFAULT_MAX_WORDS
}

fn default_input() -> PathBuf {
    PathBuf::from("data/input.json")
}

fn default_out_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for BriefConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            keywords: default_keywords(),
            max_words: default_max_words(),
            input: default_input(),
            out_dir: default_out_dir(),
        }
    }
}

impl BriefConfig {
    /// Get the config file path: ~/.config/cli-programs/research-brief.toml
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("cli-programs")
            .join("research-brief.toml"))
    }

    /// Load config from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, returning defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: BriefConfig = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.pipeline.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
