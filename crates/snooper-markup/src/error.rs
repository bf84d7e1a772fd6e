//! Markup errors.

use std::fmt::Display;

/// Error returned when markup cannot be parsed, written or colorized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    /// The underlying reader rejected the input.
    #[error("malformed markup at byte {position}: {message}")]
    Syntax { position: u64, message: String },
    /// The input ended while an element was still open.
    #[error("element <{tag_name}> is never closed")]
    Unclosed { tag_name: String },
    /// A closing tag appeared with no element open.
    #[error("unexpected closing tag </{tag_name}>")]
    UnexpectedClose { tag_name: String },
    /// The stream finished away from the root level.
    #[error("markup ends at depth {depth}, expected 0")]
    Unbalanced { depth: usize },
    /// A second top-level element was found.
    #[error("markup has more than one root element")]
    MultipleRoots,
    /// The input holds no element at all.
    #[error("markup has no root element")]
    NoRoot,
    /// Writing the tree back to text failed.
    #[error("failed to write markup: {0}")]
    Write(String),
}

impl MarkupError {
    pub(crate) fn syntax(position: impl TryInto<u64>, message: impl Display) -> Self {
        MarkupError::Syntax {
            position: position.try_into().unwrap_or(u64::MAX),
            message: message.to_string(),
        }
    }
}
