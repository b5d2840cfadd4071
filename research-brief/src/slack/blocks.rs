use serde::Serialize;

/// Slack rejects header blocks whose text is longer than this (in characters).
pub const MAX_HEADER_LEN: usize = 150;

/// Kind of a Block Kit text object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    PlainText,
    Mrkdwn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextObject {
    #[serde(rename = "type")]
    pub kind: TextKind,
    pub text: String,
    /// Only meaningful for plain text: render `:emoji:` shortcodes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<bool>,
}

impl TextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::PlainText,
            text: text.into(),
            emoji: Some(true),
        }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::Mrkdwn,
            text: text.into(),
            emoji: None,
        }
    }
}

/// One renderable unit of a message, serialized with a `type` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageBlock {
    Header { text: TextObject },
    Section { text: TextObject },
    Context { elements: Vec<TextObject> },
    Divider,
}

impl MessageBlock {
    /// Plain-text header block, cut to [`MAX_HEADER_LEN`] characters with a trailing ellipsis
    pub fn header(text: impl Into<String>) -> Self {
        let mut text = text.into();
        if text.chars().count() > MAX_HEADER_LEN {
            log::warn!("Header longer than {} characters, truncating", MAX_HEADER_LEN);
            text = text.chars().take(MAX_HEADER_LEN - 1).chain(['…']).collect();
        }
        Self::Header {
            text: TextObject::plain(text),
        }
    }

    /// Section block with formatted (mrkdwn) text
    pub fn text(text: impl Into<String>) -> Self {
        Self::Section {
            text: TextObject::mrkdwn(text),
        }
    }

    pub fn context(text: impl Into<String>) -> Self {
        Self::Context {
            elements: vec![TextObject::mrkdwn(text)],
        }
    }

    /// Text payload of a header or section block
    pub fn text_content(&self) -> Option<&str> {
        match self {
            Self::Header { text } | Self::Section { text } => Some(&text.text),
            Self::Context { .. } | Self::Divider => None,
        }
    }
}
