use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BriefError {
    /// The summary lacks sections; `raw` is the model output exactly as received
    #[error("Summary missing required sections: {}", missing.join(", "))]
    MissingSections { missing: Vec<String>, raw: String },

    #[error("No research articles found in {}", .0.display())]
    NoArticles(PathBuf),

    #[error("Invalid pipeline configuration: {0}")]
    InvalidConfig(String),
}
