use alloc::{boxed::Box, string::String, vec::Vec};

use quickcheck::{Arbitrary, Gen};

/// Characters that exercise every column rule.
const ALPHABET: &[char] = &[
    'a', 'Z', '0', ' ', '=', '\n', '\n', '\t', '\t', 'é', '\u{301}', '\u{7}', '中', '😀',
    '\u{10348}',
];

/// Text drawn from [`ALPHABET`].
#[derive(Debug, Clone)]
pub(crate) struct SourceText(pub String);

impl Arbitrary for SourceText {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 64;
        Self((0..len).map(|_| *g.choose(ALPHABET).unwrap_or(&'a')).collect())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let chars: Vec<char> = self.0.chars().collect();
        Box::new(chars.shrink().map(|c| Self(c.into_iter().collect())))
    }
}

/// UTF-16 units: mostly well-formed text with stray surrogate halves mixed
/// in.
#[derive(Debug, Clone)]
pub(crate) struct Utf16Units(pub Vec<u16>);

impl Arbitrary for Utf16Units {
    fn arbitrary(g: &mut Gen) -> Self {
        let SourceText(text) = SourceText::arbitrary(g);
        let mut units: Vec<u16> = text.encode_utf16().collect();
        let strays = usize::arbitrary(g) % 4;
        for _ in 0..strays {
            let at = usize::arbitrary(g) % (units.len() + 1);
            let stray = *g.choose(&[0xD800, 0xDBFF, 0xDC00, 0xDFFF]).unwrap_or(&0xD800);
            units.insert(at, stray);
        }
        Self(units)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Self))
    }
}

/// One step of a lexer driving a reader.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Op {
    Read,
    ReadNth(usize),
    PeekNth(usize),
    Unget(usize),
    Discard,
    Accept,
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        match usize::arbitrary(g) % 8 {
            0 | 1 => Op::Read,
            2 => Op::ReadNth(usize::arbitrary(g) % 5),
            3 => Op::PeekNth(usize::arbitrary(g) % 12),
            4 => Op::Unget(usize::arbitrary(g) % 6),
            5 => Op::Discard,
            _ => Op::Accept,
        }
    }
}
