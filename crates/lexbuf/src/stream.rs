//! Character sources a [`BufferedReader`](crate::BufferedReader) can pull
//! from.
//!
//! The reader only ever calls [`CharStream::read_into`], and never assumes a
//! request is satisfied in one call. A source signals end of input by
//! returning `0`.

use alloc::{boxed::Box, collections::VecDeque, string::String, vec::Vec};

use crate::CodeUnit;

/// The capability set the reader needs from its underlying source.
///
/// Releasing the source is `Drop`.
pub trait CharStream {
    /// The unit type produced by this source.
    type Unit: CodeUnit;

    /// Returns the next unit without consuming it.
    fn peek(&mut self) -> Option<Self::Unit>;

    /// Consumes and returns the next unit.
    fn read(&mut self) -> Option<Self::Unit>;

    /// Copies up to `buf.len()` units into `buf` and returns how many were
    /// written. May return fewer than requested; `0` means end of input.
    fn read_into(&mut self, buf: &mut [Self::Unit]) -> usize;

    /// Reads until `buf` is full or the source is exhausted.
    fn read_block(&mut self, buf: &mut [Self::Unit]) -> usize {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.read_into(&mut buf[filled..]);
            if n == 0 {
                break;
            }
            filled += n;
        }
        filled
    }
}

impl<S: CharStream + ?Sized> CharStream for Box<S> {
    type Unit = S::Unit;

    fn peek(&mut self) -> Option<Self::Unit> {
        (**self).peek()
    }

    fn read(&mut self) -> Option<Self::Unit> {
        (**self).read()
    }

    fn read_into(&mut self, buf: &mut [Self::Unit]) -> usize {
        (**self).read_into(buf)
    }

    fn read_block(&mut self, buf: &mut [Self::Unit]) -> usize {
        (**self).read_block(buf)
    }
}

/// Scalar values of an owned string.
#[derive(Debug, Clone, Default)]
pub struct TextSource {
    text: String,
    offset: usize,
}

impl TextSource {
    /// A source over `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            offset: 0,
        }
    }

    /// The text not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.text[self.offset..]
    }
}

impl From<&str> for TextSource {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TextSource {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl CharStream for TextSource {
    type Unit = char;

    fn peek(&mut self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn read(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        Some(ch)
    }

    fn read_into(&mut self, buf: &mut [char]) -> usize {
        let mut written = 0;
        for (slot, ch) in buf.iter_mut().zip(self.text[self.offset..].chars()) {
            *slot = ch;
            self.offset += ch.len_utf8();
            written += 1;
        }
        written
    }
}

/// UTF-16 code units, which may contain unpaired surrogates.
#[derive(Debug, Clone, Default)]
pub struct Utf16Source {
    units: Vec<u16>,
    offset: usize,
}

impl Utf16Source {
    /// A source over raw code units.
    #[must_use]
    pub fn from_units(units: Vec<u16>) -> Self {
        Self { units, offset: 0 }
    }
}

impl From<&str> for Utf16Source {
    fn from(value: &str) -> Self {
        Self::from_units(value.encode_utf16().collect())
    }
}

impl CharStream for Utf16Source {
    type Unit = u16;

    fn peek(&mut self) -> Option<u16> {
        self.units.get(self.offset).copied()
    }

    fn read(&mut self) -> Option<u16> {
        let unit = self.peek()?;
        self.offset += 1;
        Some(unit)
    }

    fn read_into(&mut self, buf: &mut [u16]) -> usize {
        let rest = &self.units[self.offset..];
        let n = rest.len().min(buf.len());
        buf[..n].copy_from_slice(&rest[..n]);
        self.offset += n;
        n
    }
}

/// Scalar values decoded from possibly ill-formed UTF-8 bytes.
///
/// Each maximal invalid subsequence becomes one U+FFFD.
#[derive(Debug, Clone, Default)]
pub struct Utf8Source {
    bytes: Vec<u8>,
    offset: usize,
}

impl Utf8Source {
    /// A source over `bytes`.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            offset: 0,
        }
    }

    fn decode_next(&self) -> Option<(char, usize)> {
        let (ch, len) = bstr::decode_utf8(&self.bytes[self.offset..]);
        if len == 0 {
            return None;
        }
        Some((ch.unwrap_or(char::REPLACEMENT_CHARACTER), len))
    }
}

impl CharStream for Utf8Source {
    type Unit = char;

    fn peek(&mut self) -> Option<char> {
        self.decode_next().map(|(ch, _)| ch)
    }

    fn read(&mut self) -> Option<char> {
        let (ch, len) = self.decode_next()?;
        self.offset += len;
        Some(ch)
    }

    fn read_into(&mut self, buf: &mut [char]) -> usize {
        let mut written = 0;
        while written < buf.len() {
            let Some((ch, len)) = self.decode_next() else {
                break;
            };
            buf[written] = ch;
            self.offset += len;
            written += 1;
        }
        written
    }
}

/// Several streams read back to back, as if concatenated.
///
/// A stream is dropped as soon as it reports end of input.
#[derive(Debug, Clone)]
pub struct CombinedStream<S> {
    streams: VecDeque<S>,
}

impl<S: CharStream> CombinedStream<S> {
    /// Concatenates `streams` in iteration order.
    pub fn new(streams: impl IntoIterator<Item = S>) -> Self {
        Self {
            streams: streams.into_iter().collect(),
        }
    }

    /// Appends another stream after the current ones.
    pub fn push(&mut self, stream: S) {
        self.streams.push_back(stream);
    }

    /// Number of streams not yet exhausted (or not yet known to be).
    #[must_use]
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Whether every stream has been exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}

impl<S: CharStream> CharStream for CombinedStream<S> {
    type Unit = S::Unit;

    fn peek(&mut self) -> Option<Self::Unit> {
        while let Some(front) = self.streams.front_mut() {
            if let Some(unit) = front.peek() {
                return Some(unit);
            }
            self.streams.pop_front();
        }
        None
    }

    fn read(&mut self) -> Option<Self::Unit> {
        while let Some(front) = self.streams.front_mut() {
            if let Some(unit) = front.read() {
                return Some(unit);
            }
            self.streams.pop_front();
        }
        None
    }

    fn read_into(&mut self, buf: &mut [Self::Unit]) -> usize {
        if buf.is_empty() {
            return 0;
        }
        while let Some(front) = self.streams.front_mut() {
            let n = front.read_into(buf);
            if n > 0 {
                return n;
            }
            self.streams.pop_front();
        }
        0
    }
}

/// Caps every [`read_into`](CharStream::read_into) at `limit` units.
///
/// Models sources that deliver input in small partial reads, such as pipes
/// or terminals.
#[derive(Debug, Clone)]
pub struct Trickle<S> {
    inner: S,
    limit: usize,
}

impl<S: CharStream> Trickle<S> {
    /// Wraps `inner`; a `limit` of zero is treated as one.
    pub fn new(inner: S, limit: usize) -> Self {
        Self {
            inner,
            limit: limit.max(1),
        }
    }

    /// Unwraps the inner stream.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: CharStream> CharStream for Trickle<S> {
    type Unit = S::Unit;

    fn peek(&mut self) -> Option<Self::Unit> {
        self.inner.peek()
    }

    fn read(&mut self) -> Option<Self::Unit> {
        self.inner.read()
    }

    fn read_into(&mut self, buf: &mut [Self::Unit]) -> usize {
        let n = buf.len().min(self.limit);
        self.inner.read_into(&mut buf[..n])
    }
}
