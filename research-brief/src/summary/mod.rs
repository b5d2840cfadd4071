//! Parsing and validation of the model's section-delimited summary.

mod cleaner;
pub mod parser;
pub mod validator;

pub use cleaner::strip_code_fences;
pub use parser::parse_sections;
pub use validator::missing_sections;

use serde::Serialize;

/// A labeled span of the summary, e.g. `Summary` or `Top 5 Findings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Title that followed the marker; empty if the marker had none
    pub label: String,
    /// Raw text up to the next marker, trimmed; may be empty
    pub body: String,
}

impl Section {
    pub fn new(label: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_creation() {
        let section = Section::new("Summary", "Hello world.");
        assert_eq!(section.label, "Summary");
        assert_eq!(section.body, "Hello world.");
    }
}
