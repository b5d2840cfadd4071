//! Line-aware splitting of section bodies into render-safe chunks.

use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// Default maximum chunk size in characters (Slack caps section text at 3000).
pub const DEFAULT_MAX_CHUNK_LEN: usize = 2900;

/// Default minimum offset a newline must have before a chunk is cut there.
pub const DEFAULT_MIN_NEWLINE_BACKOFF: usize = 1000;

/// Size limits applied by [`split_chunks`]. Lengths count `char`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkLimits {
    /// Hard upper bound on a chunk's length
    #[serde(default = "default_max_len")]
    pub max_len: usize,
    /// A chunk is only cut at its last newline if that newline lies past this offset
    #[serde(default = "default_min_newline_backoff")]
    pub min_newline_backoff: usize,
}

fn default_max_len() -> usize {
    DEFAULT_MAX_CHUNK_LEN
}

fn default_min_newline_backoff() -> usize {
    DEFAULT_MIN_NEWLINE_BACKOFF
}

impl Default for ChunkLimits {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_MAX_CHUNK_LEN,
            min_newline_backoff: DEFAULT_MIN_NEWLINE_BACKOFF,
        }
    }
}

/// Iterator over the chunks of one body, see [`split_chunks`].
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    remaining: &'a str,
    limits: ChunkLimits,
}

impl<'a> Chunks<'a> {
    /// Byte length of the next candidate, before trimming.
    fn candidate_len(&self) -> usize {
        let max = self.limits.max_len.max(1);
        let window = self
            .remaining
            .char_indices()
            .nth(max)
            .map(|(i, _)| i)
            .unwrap_or(self.remaining.len());

        // Everything left fits: no reason to break early.
        if window == self.remaining.len() {
            return window;
        }

        match self.remaining[..window].rfind('\n') {
            Some(newline)
                if self.remaining[..newline].chars().count() > self.limits.min_newline_backoff =>
            {
                newline
            }
            _ => window,
        }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while !self.remaining.is_empty() {
            let (candidate, rest) = self.remaining.split_at(self.candidate_len());
            self.remaining = rest.trim_start();

            let chunk = candidate.trim();
            if !chunk.is_empty() {
                return Some(chunk);
            }
        }
        None
    }
}

impl FusedIterator for Chunks<'_> {}

/// Split `body` into trimmed chunks of at most `limits.max_len` characters.
///
/// Greedy and single pass: each candidate takes up to `max_len` characters
/// and is cut back to its last newline when that newline lies beyond
/// `min_newline_backoff`, so chunks end at line boundaries without becoming
/// degenerate. A line longer than the window is cut mid-line. Empty or
/// whitespace-only input yields no chunks; a body that already fits yields
/// exactly its trimmed self.
pub fn split_chunks(body: &str, limits: ChunkLimits) -> Chunks<'_> {
    Chunks {
        remaining: body.trim_start(),
        limits,
    }
}
