//! Slack Block Kit output: block model, summary layout, and payload files.

pub mod blocks;
pub mod builder;
pub mod payload;

pub use blocks::MessageBlock;
pub use builder::build_blocks;
pub use payload::{Payload, parent_payload, thread_reply_payload};
