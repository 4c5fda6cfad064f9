use alloc::{string::String, vec::Vec};
use core::fmt;

mod sealed {
    pub trait Sealed {}
    impl Sealed for char {}
    impl Sealed for u16 {}
}

/// A unit of text the reader buffers: a Unicode scalar (`char`) or a UTF-16
/// code unit (`u16`).
///
/// Only `u16` sources can produce surrogates; the position scanner pairs them
/// across calls and the text accessors decode them lossily.
pub trait CodeUnit: Copy + Eq + fmt::Debug + sealed::Sealed + 'static {
    /// Filler value for freshly allocated chunks.
    const ZERO: Self;

    /// The unit's numeric value (a scalar value or a UTF-16 code unit).
    fn to_u32(self) -> u32;

    /// Appends the encoding of `text` in this unit type.
    fn encode_str(text: &str, out: &mut Vec<Self>);

    /// Appends `units` to `out`, replacing unpaired surrogates with U+FFFD.
    fn decode_into(units: &[Self], out: &mut String);
}

impl CodeUnit for char {
    const ZERO: Self = '\0';

    #[inline]
    fn to_u32(self) -> u32 {
        u32::from(self)
    }

    fn encode_str(text: &str, out: &mut Vec<Self>) {
        out.extend(text.chars());
    }

    fn decode_into(units: &[Self], out: &mut String) {
        out.extend(units);
    }
}

impl CodeUnit for u16 {
    const ZERO: Self = 0;

    #[inline]
    fn to_u32(self) -> u32 {
        u32::from(self)
    }

    fn encode_str(text: &str, out: &mut Vec<Self>) {
        out.extend(text.encode_utf16());
    }

    fn decode_into(units: &[Self], out: &mut String) {
        out.extend(
            char::decode_utf16(units.iter().copied())
                .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
        );
    }
}

#[inline]
pub(crate) fn is_high_surrogate(u: u32) -> bool {
    (0xD800..0xDC00).contains(&u)
}

#[inline]
pub(crate) fn is_low_surrogate(u: u32) -> bool {
    (0xDC00..0xE000).contains(&u)
}

#[inline]
pub(crate) fn combine_surrogates(high: u32, low: u32) -> u32 {
    0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
}
