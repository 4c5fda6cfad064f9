use alloc::vec::Vec;

use quickcheck::QuickCheck;

use super::{
    arbitrary::{SourceText, Utf16Units},
    quickcheck_tests,
};
use crate::{CodeUnit, PositionScanner};

fn split_forward<U: CodeUnit>(units: &[U], splits: &[usize]) -> PositionScanner {
    let mut scanner = PositionScanner::new(4);
    let mut rest = units;
    for s in splits {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(s % (rest.len() + 1));
        scanner.forward(head);
        rest = tail;
    }
    scanner.forward(rest);
    scanner
}

fn stepwise<U: CodeUnit>(units: &[U]) -> PositionScanner {
    let mut scanner = PositionScanner::new(4);
    for u in units {
        scanner.forward(core::slice::from_ref(u));
    }
    scanner
}

/// Property: advancing over a run in arbitrary pieces ends in the same state
/// as advancing over it at once, and as advancing one unit at a time.
#[test]
fn scanner_partition_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: SourceText, splits: Vec<usize>) -> bool {
        let units: Vec<char> = text.0.chars().collect();
        let mut whole = PositionScanner::new(4);
        whole.forward(&units);
        split_forward(&units, &splits) == whole && stepwise(&units) == whole
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(SourceText, Vec<usize>) -> bool);
}

/// Same property over UTF-16, where splits may separate surrogate halves.
#[test]
fn scanner_partition_utf16_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(units: Utf16Units, splits: Vec<usize>) -> bool {
        let mut whole = PositionScanner::new(4);
        whole.forward(&units.0);
        split_forward(&units.0, &splits) == whole && stepwise(&units.0) == whole
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Utf16Units, Vec<usize>) -> bool);
}

/// Well-formed UTF-16 reaches the same line and column as the same text
/// scanned as scalars.
#[test]
fn scanner_utf16_matches_scalars_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: SourceText) -> bool {
        let scalars: Vec<char> = text.0.chars().collect();
        let units: Vec<u16> = text.0.encode_utf16().collect();
        let mut a = PositionScanner::new(4);
        a.forward(&scalars);
        let mut b = PositionScanner::new(4);
        b.forward(&units);
        let (a, b) = (a.next_position(), b.next_position());
        a.line() == b.line() && a.col() == b.col()
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(SourceText) -> bool);
}
