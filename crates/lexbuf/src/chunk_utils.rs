//! Helpers for feeding one input through several differently split sources.
//!
//! Tests and benches use these to check that the way input arrives (as a
//! [`CombinedStream`](crate::CombinedStream) of pieces) never changes what a
//! reader reports.

use alloc::vec::Vec;

use crate::{CombinedStream, TextSource};

/// Split `text` into about `parts` equal pieces without breaking UTF-8
/// scalars. Never yields an empty piece.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(text: &str, parts: usize) -> Vec<&str> {
    assert!(parts > 0, "parts must be positive");
    let len = text.len();
    let step = len.div_ceil(parts);
    let mut pieces = Vec::with_capacity(parts);
    let mut start = 0;
    while start < len {
        let mut end = (start + step).min(len);
        while !text.is_char_boundary(end) {
            end += 1;
        }
        pieces.push(&text[start..end]);
        start = end;
    }
    pieces
}

/// The growing prefixes of `text` at each [`produce_chunks`] boundary; the
/// last prefix is `text` itself.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_prefixes(text: &str, parts: usize) -> Vec<&str> {
    let mut end = 0;
    produce_chunks(text, parts)
        .into_iter()
        .map(|piece| {
            end += piece.len();
            &text[..end]
        })
        .collect()
}

/// A [`CombinedStream`] over the [`produce_chunks`] pieces of `text`.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn split_source(text: &str, parts: usize) -> CombinedStream<TextSource> {
    CombinedStream::new(produce_chunks(text, parts).into_iter().map(TextSource::from))
}
