use alloc::sync::Arc;
use core::{cmp::Ordering, fmt};

use crate::{Error, Position, Result};

/// An inclusive span of source between two [`Position`]s.
///
/// Either both ends are known and `start <= end`, or both are unknown
/// ([`Range::UNKNOWN`]). An unknown range contains and overlaps nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    start: Position,
    end: Position,
}

impl Range {
    /// The unknown range.
    pub const UNKNOWN: Self = Self {
        start: Position::UNKNOWN,
        end: Position::UNKNOWN,
    };

    /// Builds a range from explicit bounds.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRange`] if exactly one bound is unknown or if
    /// `start > end`.
    pub fn new(start: Position, end: Position) -> Result<Self> {
        if start.is_unknown() != end.is_unknown() || start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering the single position `pos`.
    #[must_use]
    pub const fn at(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// First position of the range.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Last position of the range (inclusive).
    #[inline]
    #[must_use]
    pub const fn end(&self) -> Position {
        self.end
    }

    /// Whether this is the unknown range.
    #[inline]
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        self.start.is_unknown()
    }

    /// Whether `pos` lies within the range.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        !self.is_unknown() && !pos.is_unknown() && self.start <= pos && pos <= self.end
    }

    /// Whether `other` lies entirely within the range.
    #[must_use]
    pub fn contains_range(&self, other: &Range) -> bool {
        !self.is_unknown()
            && !other.is_unknown()
            && self.start <= other.start
            && other.end <= self.end
    }

    /// Whether the two ranges share at least one position.
    #[must_use]
    pub fn overlaps_with(&self, other: &Range) -> bool {
        !self.is_unknown()
            && !other.is_unknown()
            && self.start <= other.end
            && other.start <= self.end
    }

    /// The intersection of two ranges, or [`Range::UNKNOWN`] if they do not
    /// overlap.
    #[must_use]
    pub fn overlap(&self, other: &Range) -> Range {
        if !self.overlaps_with(other) {
            return Range::UNKNOWN;
        }
        Range {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        }
    }

    /// The smallest range covering every known input, in any order.
    ///
    /// Unknown inputs are skipped; the result is [`Range::UNKNOWN`] when no
    /// input is known.
    ///
    /// ```rust
    /// use lexbuf::{Position, Range};
    ///
    /// let p = |i| Position::new(i, 1, i + 1).unwrap();
    /// let merged = Range::merge([
    ///     Range::new(p(5), p(7)).unwrap(),
    ///     Range::UNKNOWN,
    ///     Range::new(p(1), p(2)).unwrap(),
    /// ]);
    /// assert_eq!(merged, Range::new(p(1), p(7)).unwrap());
    /// ```
    pub fn merge<I>(ranges: I) -> Range
    where
        I: IntoIterator<Item = Range>,
    {
        ranges
            .into_iter()
            .filter(|r| !r.is_unknown())
            .fold(Range::UNKNOWN, |acc, r| {
                if acc.is_unknown() {
                    r
                } else {
                    Range {
                        start: acc.start.min(r.start),
                        end: acc.end.max(r.end),
                    }
                }
            })
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A [`Range`] tagged with the name of the file it belongs to.
///
/// Ranges from different files are never ordered against each other:
/// `partial_cmp` returns `None` unless the file names match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileRange {
    file_name: Arc<str>,
    range: Range,
}

impl FileRange {
    /// Builds a file range from explicit bounds.
    ///
    /// # Errors
    ///
    /// Same as [`Range::new`].
    pub fn new(file_name: impl Into<Arc<str>>, start: Position, end: Position) -> Result<Self> {
        Ok(Self::with_range(file_name, Range::new(start, end)?))
    }

    /// Tags an existing range with a file name.
    pub fn with_range(file_name: impl Into<Arc<str>>, range: Range) -> Self {
        Self {
            file_name: file_name.into(),
            range,
        }
    }

    /// Name of the source file.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The untagged range.
    #[must_use]
    pub const fn range(&self) -> Range {
        self.range
    }

    /// First position of the range.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.range.start
    }

    /// Last position of the range (inclusive).
    #[must_use]
    pub const fn end(&self) -> Position {
        self.range.end
    }

    /// Whether `other` is in the same file and lies within this range.
    #[must_use]
    pub fn contains_range(&self, other: &FileRange) -> bool {
        self.file_name == other.file_name && self.range.contains_range(&other.range)
    }

    /// Whether `other` is in the same file and shares a position with this
    /// range.
    #[must_use]
    pub fn overlaps_with(&self, other: &FileRange) -> bool {
        self.file_name == other.file_name && self.range.overlaps_with(&other.range)
    }
}

impl From<FileRange> for Range {
    fn from(value: FileRange) -> Self {
        value.range
    }
}

impl PartialOrd for FileRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.file_name != other.file_name {
            return None;
        }
        Some(self.range.cmp(&other.range))
    }
}

impl fmt::Display for FileRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_name, self.range)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec::Vec};

    use super::*;

    fn p(index: usize) -> Position {
        Position::new(index, 1, index + 1).unwrap()
    }

    fn r(start: usize, end: usize) -> Range {
        Range::new(p(start), p(end)).unwrap()
    }

    #[test]
    fn rejects_reversed_and_half_known_bounds() {
        assert_eq!(
            Range::new(p(3), p(2)),
            Err(Error::InvalidRange {
                start: p(3),
                end: p(2)
            })
        );
        assert!(Range::new(p(3), Position::UNKNOWN).is_err());
        assert!(Range::new(Position::UNKNOWN, p(3)).is_err());
        assert_eq!(
            Range::new(Position::UNKNOWN, Position::UNKNOWN),
            Ok(Range::UNKNOWN)
        );
    }

    #[test]
    fn containment_is_inclusive() {
        let range = r(2, 5);
        assert!(range.contains(p(2)));
        assert!(range.contains(p(5)));
        assert!(!range.contains(p(6)));
        assert!(range.contains_range(&r(3, 5)));
        assert!(!range.contains_range(&r(1, 3)));
    }

    #[test]
    fn unknown_ranges_contain_and_overlap_nothing() {
        let unknown = Range::UNKNOWN;
        assert!(!unknown.contains(Position::UNKNOWN));
        assert!(!unknown.contains_range(&unknown));
        assert!(!unknown.overlaps_with(&r(0, 10)));
        assert!(!r(0, 10).overlaps_with(&unknown));
        assert_eq!(r(0, 10).overlap(&unknown), Range::UNKNOWN);
    }

    #[test]
    fn overlap_is_the_intersection() {
        assert!(r(0, 4).overlaps_with(&r(4, 8)));
        assert_eq!(r(0, 4).overlap(&r(4, 8)), r(4, 4));
        assert_eq!(r(2, 9).overlap(&r(0, 5)), r(2, 5));
        assert!(!r(0, 3).overlaps_with(&r(4, 8)));
        assert_eq!(r(0, 3).overlap(&r(4, 8)), Range::UNKNOWN);
    }

    #[test]
    fn merge_skips_unknown_and_ignores_order() {
        assert_eq!(Range::merge(Vec::new()), Range::UNKNOWN);
        assert_eq!(
            Range::merge([Range::UNKNOWN, Range::UNKNOWN]),
            Range::UNKNOWN
        );
        assert_eq!(
            Range::merge([r(8, 9), Range::UNKNOWN, r(3, 4), r(5, 6)]),
            r(3, 9)
        );
    }

    #[test]
    fn file_ranges_only_compare_within_a_file() {
        let a = FileRange::with_range("a.src", r(0, 1));
        let a2 = FileRange::with_range("a.src", r(2, 3));
        let b = FileRange::with_range("b.src", r(2, 3));
        assert_eq!(a.partial_cmp(&a2), Some(Ordering::Less));
        assert_eq!(a2.partial_cmp(&b), None);
        assert!(!a2.overlaps_with(&b));
        assert!(FileRange::with_range("a.src", r(0, 5)).contains_range(&a2));
        assert_eq!(Range::from(b.clone()), r(2, 3));
        assert_eq!(b.to_string(), "b.src:1:3-1:4");
    }

    fn arbitrary_range(a: u8, b: u8) -> Range {
        let (lo, hi) = (a.min(b), a.max(b));
        r(usize::from(lo), usize::from(hi))
    }

    #[quickcheck_macros::quickcheck]
    fn merge_covers_every_input(bounds: Vec<(u8, u8)>) -> bool {
        let ranges: Vec<Range> = bounds.iter().map(|&(a, b)| arbitrary_range(a, b)).collect();
        let merged = Range::merge(ranges.iter().copied());
        ranges.iter().all(|range| merged.contains_range(range))
    }

    #[quickcheck_macros::quickcheck]
    fn overlap_is_symmetric_and_contained(a: (u8, u8), b: (u8, u8)) -> bool {
        let (x, y) = (arbitrary_range(a.0, a.1), arbitrary_range(b.0, b.1));
        let both = x.overlap(&y);
        both == y.overlap(&x)
            && (both.is_unknown() || (x.contains_range(&both) && y.contains_range(&both)))
    }
}
