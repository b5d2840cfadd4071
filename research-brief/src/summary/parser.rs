//! Splitting of marker-delimited text into labeled sections.

use super::Section;

/// Split `text` into sections introduced by `marker` (e.g. `[SECTION]`).
///
/// The label is the rest of the marker's line; the body is everything up to
/// the next marker or the end of the text. Text before the first marker is
/// dropped. This never fails: a marker without a title yields an empty label
/// and a trailing marker yields an empty body, both left for validation.
pub fn parse_sections(text: &str, marker: &str) -> Vec<Section> {
    if marker.is_empty() {
        return Vec::new();
    }

    let starts: Vec<usize> = text.match_indices(marker).map(|(i, _)| i).collect();
    let ends = starts
        .iter()
        .skip(1)
        .copied()
        .chain(std::iter::once(text.len()));

    starts
        .iter()
        .zip(ends)
        .map(|(&start, end)| split_fragment(&text[start + marker.len()..end]))
        .collect()
}

/// Split the text following one marker into its title line and body.
fn split_fragment(fragment: &str) -> Section {
    let fragment = fragment.trim_start_matches([' ', '\t']);
    let (title, body) = fragment.split_once('\n').unwrap_or((fragment, ""));

    let label = clean_label(title);
    if label.is_empty() {
        log::warn!("Section marker without a title; keeping it with an empty label");
    }

    Section::new(label, body.trim())
}

/// Strip emphasis and a trailing colon the model sometimes adds to titles.
fn clean_label(title: &str) -> &str {
    title
        .trim()
        .trim_matches(|c: char| c == '*' || c == '_')
        .trim_end_matches(':')
        .trim()
}
