use alloc::string::String;

use crate::{Position, Range};

/// A committed lexeme, as produced by
/// [`BufferedReader::accept_token`](crate::BufferedReader::accept_token).
///
/// `K` is the caller's token kind; `V` an optional semantic payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token<K, V = ()> {
    /// Token kind.
    pub kind: K,
    /// The committed text.
    pub text: String,
    /// Position of the first unit.
    pub start: Position,
    /// Position of the last unit; unknown for an empty token.
    pub end: Position,
    /// Payload supplied by the caller.
    pub value: V,
}

impl<K, V> Token<K, V> {
    /// The span `start..=end`, or `None` when the token is empty.
    #[must_use]
    pub fn range(&self) -> Option<Range> {
        Range::new(self.start, self.end).ok()
    }

    /// Whether no text was committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
