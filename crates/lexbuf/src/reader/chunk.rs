use alloc::{boxed::Box, vec};

use crate::{CharStream, CodeUnit};

/// One fixed-capacity block of the ring.
///
/// `units[..len]` is filled; the block holds absolute indices
/// `start..start + len`.
#[derive(Debug)]
pub(crate) struct Chunk<U> {
    units: Box<[U]>,
    len: usize,
    start: usize,
}

impl<U: CodeUnit> Chunk<U> {
    pub(crate) fn new(capacity: usize, start: usize) -> Self {
        Self {
            units: vec![U::ZERO; capacity].into_boxed_slice(),
            len: 0,
            start,
        }
    }

    /// Empties a recycled chunk and moves it to `start`.
    pub(crate) fn reset(&mut self, start: usize) {
        self.len = 0;
        self.start = start;
    }

    #[inline]
    pub(crate) fn start(&self) -> usize {
        self.start
    }

    /// One past the last filled absolute index.
    #[inline]
    pub(crate) fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.len == self.units.len()
    }

    #[inline]
    pub(crate) fn filled(&self) -> &[U] {
        &self.units[..self.len]
    }

    /// Pulls at most one partial read from `stream` into the free tail.
    pub(crate) fn fill_from<S>(&mut self, stream: &mut S) -> usize
    where
        S: CharStream<Unit = U> + ?Sized,
    {
        let n = stream.read_into(&mut self.units[self.len..]);
        self.len += n;
        n
    }
}
