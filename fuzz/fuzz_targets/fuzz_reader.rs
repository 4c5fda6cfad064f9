#![no_main]
use arbitrary::Arbitrary;
use lexbuf::{
    BufferedReader, CombinedStream, PositionScanner, ReaderOptions, Trickle, Utf16Source,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Read,
    ReadNth(u8),
    PeekNth(u8),
    Unget(u8),
    ReadInto(u8),
    Discard,
    Accept,
    Placeholder(u8, String),
}

#[derive(Debug, Arbitrary)]
struct Input {
    chunk_size: u8,
    tab_size: u8,
    limit: u8,
    parts: Vec<Vec<u16>>,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let options = ReaderOptions {
        chunk_size: usize::from(input.chunk_size % 16) + 1,
        tab_size: usize::from(input.tab_size % 8) + 1,
    };
    let units: Vec<u16> = input.parts.concat();
    let source = Trickle::new(
        CombinedStream::new(input.parts.into_iter().map(Utf16Source::from_units)),
        usize::from(input.limit),
    );
    let mut reader = BufferedReader::with_options(source, options).unwrap();

    // Index model of the cursor and the commit boundary.
    let mut cursor = 0usize;
    let mut start = 0usize;
    // Queued placeholders, replayed against the whole input at the end.
    let mut placeholders = Vec::new();

    for op in input.ops {
        match op {
            Op::Read => {
                assert_eq!(reader.read().unwrap(), units.get(cursor).copied());
                cursor = (cursor + 1).min(units.len());
            }
            Op::ReadNth(n) => {
                let abs = cursor + usize::from(n);
                assert_eq!(reader.read_nth(usize::from(n)).unwrap(), units.get(abs).copied());
                cursor = (abs + 1).min(units.len());
            }
            Op::PeekNth(n) => {
                let abs = cursor + usize::from(n);
                assert_eq!(reader.peek_nth(usize::from(n)).unwrap(), units.get(abs).copied());
            }
            Op::Unget(n) => {
                let moved = usize::from(n).min(cursor - start);
                assert_eq!(reader.unget_n(usize::from(n)).unwrap(), moved);
                cursor -= moved;
            }
            Op::ReadInto(n) => {
                let mut buf = vec![0u16; usize::from(n)];
                let got = reader.read_into(&mut buf).unwrap();
                assert_eq!(&buf[..got], &units[cursor..cursor + got]);
                assert!(got > 0 || n == 0 || cursor == units.len());
                cursor += got;
            }
            Op::Discard => {
                reader.discard().unwrap();
                start = cursor;
            }
            Op::Accept => {
                let text = reader.accept().unwrap();
                assert_eq!(text, String::from_utf16_lossy(&units[start..cursor]));
                start = cursor;
            }
            Op::Placeholder(offset, replacement) => {
                let index = cursor + usize::from(offset);
                let accepted = reader.add_placeholder(index, &replacement).is_ok();
                let expected = index >= start
                    && placeholders.last().is_none_or(|&(last, _)| last < index);
                assert_eq!(accepted, expected);
                if accepted {
                    placeholders.push((index, replacement));
                }
            }
        }
        assert_eq!(reader.global_index(), cursor);
        assert_eq!(reader.committed_index(), start);
    }

    // Commit the rest and replay the positions in one go.
    while reader.read().unwrap().is_some() {}
    reader.discard().unwrap();
    let queued: Vec<_> = placeholders
        .into_iter()
        .map(|(index, replacement): (usize, String)| lexbuf::Placeholder {
            index,
            replacement: replacement.encode_utf16().collect(),
        })
        .collect();
    let expected = lexbuf::advance(PositionScanner::new(options.tab_size), 0, &units, &queued);
    assert_eq!(reader.scanner(), &expected);

    reader.dispose();
    assert!(reader.read().is_err());
});
