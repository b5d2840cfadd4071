//! Presence checks for the sections a summary must contain.
//!
//! Models drift from the requested `[SECTION] Title` format, so a title also
//! counts as present when it is written as bold text or a Markdown heading.
//! The check runs over the whole text, independently of how the parser split
//! it, so a parseable but mislabeled summary still gets flagged.

use regex::Regex;

/// A way the model may introduce a section title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// The literal section marker, e.g. `[SECTION] Summary`
    Marker,
    /// Bold text, e.g. `**Summary**`
    Emphasis,
    /// A Markdown heading, e.g. `## Summary`
    Heading,
}

pub const LABEL_STYLES: [LabelStyle; 3] =
    [LabelStyle::Marker, LabelStyle::Emphasis, LabelStyle::Heading];

impl LabelStyle {
    fn prefix_pattern(self, marker: &str) -> String {
        match self {
            Self::Marker => regex::escape(marker),
            Self::Emphasis => r"\*\*".to_string(),
            Self::Heading => "#+".to_string(),
        }
    }

    /// Case-insensitive search for `label` introduced in this style.
    pub fn matches(self, text: &str, label: &str, marker: &str) -> bool {
        if self == Self::Marker && marker.is_empty() {
            return false;
        }

        let pattern = format!(
            r"(?i){}\s*{}",
            self.prefix_pattern(marker),
            regex::escape(label)
        );

        match Regex::new(&pattern) {
            Ok(re) => re.is_match(text),
            Err(e) => {
                log::warn!("Skipping {:?} check for '{}': {}", self, label, e);
                false
            }
        }
    }
}

/// Whether `label` appears in any accepted style.
pub fn is_label_present(text: &str, label: &str, marker: &str) -> bool {
    LABEL_STYLES
        .iter()
        .any(|style| style.matches(text, label, marker))
}

/// Required labels not found in `text`, in the order they were required.
pub fn missing_sections(text: &str, required: &[String], marker: &str) -> Vec<String> {
    required
        .iter()
        .filter(|label| !is_label_present(text, label, marker))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "[SECTION]";

    fn required(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_all_present_in_marker_format() {
        let text = "[SECTION] Summary\nA\n[SECTION] Top 5 Findings\nB\n[SECTION] One-liner\nC";
        let missing = missing_sections(
            text,
            &required(&["Summary", "Top 5 Findings", "One-liner"]),
            MARKER,
        );
        assert!(missing.is_empty());
    }

    #[test]
    fn test_heading_counts_as_present() {
        let text = "# Summary\nA\n[SECTION] One-liner\nB";
        let missing = missing_sections(text, &required(&["Summary", "One-liner"]), MARKER);
        assert!(missing.is_empty());
        assert!(LabelStyle::Heading.matches(text, "Summary", MARKER));
        assert!(!LabelStyle::Marker.matches(text, "Summary", MARKER));
    }

    #[test]
    fn test_emphasis_counts_as_present() {
        let text = "**Soundbites**\n- \"quote\"";
        assert!(is_label_present(text, "Soundbites", MARKER));
    }

    #[test]
    fn test_case_insensitive() {
        let text = "[section] linkedin post\nBody";
        assert!(is_label_present(text, "LinkedIn Post", MARKER));
    }

    #[test]
    fn test_one_missing() {
        let text = "[SECTION] Summary\nA\n[SECTION] Soundbites\nB";
        let missing = missing_sections(
            text,
            &required(&["Summary", "Top 5 Findings", "Soundbites"]),
            MARKER,
        );
        assert_eq!(missing, vec!["Top 5 Findings".to_string()]);
    }

    #[test]
    fn test_missing_keeps_required_order() {
        let missing = missing_sections("", &required(&["One-liner", "Summary"]), MARKER);
        assert_eq!(missing, required(&["One-liner", "Summary"]));
    }

    #[test]
    fn test_plain_mention_is_not_a_label() {
        let text = "[SECTION] Overview\nThis summary covers the paper.";
        assert!(!is_label_present(text, "Summary", MARKER));
    }

    #[test]
    fn test_label_with_regex_metacharacters() {
        let text = "[SECTION] Q&A (short)\nBody";
        assert!(is_label_present(text, "Q&A (short)", MARKER));
        assert!(!is_label_present(text, "Q&A (long)", MARKER));
    }

    #[test]
    fn test_empty_required_set() {
        assert!(missing_sections("anything", &[], MARKER).is_empty());
    }
}
