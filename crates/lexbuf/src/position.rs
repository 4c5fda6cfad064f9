use core::fmt;

use crate::{Error, Result};

/// A location in the source: 0-based code unit index, 1-based line and
/// column.
///
/// [`Position::UNKNOWN`] (all zeros) stands for "no location". Positions
/// order lexicographically by `(index, line, col)`, so the index dominates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    index: usize,
    line: usize,
    col: usize,
}

impl Position {
    /// The unknown position.
    pub const UNKNOWN: Self = Self {
        index: 0,
        line: 0,
        col: 0,
    };

    /// Builds a known position.
    ///
    /// # Errors
    ///
    /// [`Error::Argument`] if `line` or `col` is zero.
    pub fn new(index: usize, line: usize, col: usize) -> Result<Self> {
        if line == 0 {
            return Err(Error::argument("line", "lines are 1-based"));
        }
        if col == 0 {
            return Err(Error::argument("col", "columns are 1-based"));
        }
        Ok(Self { index, line, col })
    }

    /// Builds a position without validation; callers keep `line, col >= 1`.
    #[inline]
    pub(crate) const fn new_unchecked(index: usize, line: usize, col: usize) -> Self {
        Self { index, line, col }
    }

    /// 0-based index of the code unit in the stream.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// 1-based line, or 0 when unknown.
    #[inline]
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// 1-based column, or 0 when unknown.
    #[inline]
    #[must_use]
    pub const fn col(&self) -> usize {
        self.col
    }

    /// Whether this is the unknown position.
    #[inline]
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        self.line == 0 || self.col == 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            f.write_str("?")
        } else {
            write!(f, "{}:{}", self.line, self.col)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn rejects_zero_line_or_column() {
        assert!(matches!(
            Position::new(0, 0, 1),
            Err(Error::Argument { name: "line", .. })
        ));
        assert!(matches!(
            Position::new(3, 2, 0),
            Err(Error::Argument { name: "col", .. })
        ));
        assert!(Position::new(0, 1, 1).is_ok());
    }

    #[test]
    fn orders_by_index_first() {
        let a = Position::new(4, 9, 9).unwrap();
        let b = Position::new(5, 1, 1).unwrap();
        let c = Position::new(5, 1, 2).unwrap();
        assert!(a < b);
        assert!(b < c);
        assert_eq!(a.max(c), c);
    }

    #[test]
    fn unknown_is_default_and_displays_as_question_mark() {
        assert_eq!(Position::default(), Position::UNKNOWN);
        assert!(Position::UNKNOWN.is_unknown());
        assert_eq!(Position::UNKNOWN.to_string(), "?");
        assert_eq!(Position::new(7, 2, 3).unwrap().to_string(), "2:3");
    }
}
