//! Layout of parsed summary sections as Block Kit blocks.

use std::collections::HashMap;

use super::MessageBlock;
use crate::summary::Section;
use crate::text::{ChunkLimits, split_chunks};

/// Heading line for a section: `"<emoji> <label>:"`, or `"<label>:"` without an emoji.
pub fn section_heading(label: &str, emoji: Option<&str>) -> String {
    match emoji.filter(|e| !e.is_empty()) {
        Some(emoji) => format!("{} {}:", emoji, label),
        None => format!("{}:", label),
    }
}

/// Lay out `sections` in order: a header per section, then one text block per chunk.
///
/// Labels missing from `emojis` get a heading without an emoji. A section
/// whose body is empty contributes only its header.
pub fn build_blocks(
    sections: &[Section],
    emojis: &HashMap<String, String>,
    limits: ChunkLimits,
) -> Vec<MessageBlock> {
    let mut blocks = Vec::new();

    for section in sections {
        let emoji = emojis.get(&section.label).map(String::as_str);
        blocks.push(MessageBlock::header(section_heading(&section.label, emoji)));

        let before = blocks.len();
        blocks.extend(split_chunks(&section.body, limits).map(MessageBlock::text));
        log::debug!(
            "Section '{}': {} chunk(s)",
            section.label,
            blocks.len() - before
        );
    }

    blocks
}
