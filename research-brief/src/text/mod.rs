//! Text processing for chat rendering: size-bounded chunking.

pub mod chunker;

pub use chunker::{ChunkLimits, split_chunks};
