use thiserror::Error;

use crate::Position;

/// Errors raised by the reader and the position value types.
///
/// None of these are transient; the caller decides whether to abort the
/// lexing session or report and continue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A numeric argument was out of range.
    #[error("invalid argument `{name}`: {reason}")]
    Argument {
        /// Name of the offending parameter.
        name: &'static str,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// A range was built from reversed bounds, or from one known and one
    /// unknown bound.
    #[error("invalid range {start}..{end}")]
    InvalidRange {
        /// Requested start.
        start: Position,
        /// Requested end.
        end: Position,
    },
    /// The reader was used after [`dispose`](crate::BufferedReader::dispose).
    #[error("the reader has been disposed")]
    ClosedStream,
}

impl Error {
    pub(crate) fn argument(name: &'static str, reason: &'static str) -> Self {
        Self::Argument { name, reason }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
