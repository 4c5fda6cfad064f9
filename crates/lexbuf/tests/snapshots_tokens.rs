#![expect(missing_docs)]

use core::fmt::Write;

use lexbuf::{
    BufferedReader, CharStream, ReaderOptions, TextSource, Token, Trickle, split_source,
};

const SOURCE: &str = "let a =\t\"中文\";\n  b\u{301} = 42";

fn eat_while<S: CharStream<Unit = char>>(
    reader: &mut BufferedReader<S>,
    pred: impl Fn(char) -> bool,
) {
    while reader.peek().unwrap().is_some_and(&pred) {
        reader.read().unwrap();
    }
}

fn lex<S: CharStream<Unit = char>>(source: S) -> Vec<Token<&'static str>> {
    let options = ReaderOptions {
        chunk_size: 4,
        ..Default::default()
    };
    let mut reader = BufferedReader::with_options(source, options).unwrap();
    let mut tokens = Vec::new();
    while let Some(ch) = reader.read().unwrap() {
        let kind = match ch {
            c if c.is_whitespace() => {
                reader.discard().unwrap();
                continue;
            }
            '"' => {
                while reader.read().unwrap().is_some_and(|c| c != '"') {}
                "string"
            }
            c if c.is_ascii_digit() => {
                eat_while(&mut reader, |c| c.is_ascii_digit());
                "number"
            }
            c if c.is_alphabetic() => {
                eat_while(&mut reader, |c| {
                    c.is_alphabetic() || ('\u{300}'..='\u{36F}').contains(&c)
                });
                "ident"
            }
            _ => "punct",
        };
        tokens.push(reader.accept_token(kind, ()).unwrap());
    }
    tokens
}

fn render(tokens: &[Token<&'static str>]) -> String {
    let mut out = String::new();
    for token in tokens {
        let range = token.range().expect("non-empty token");
        writeln!(out, "{} {range} {:?}", token.kind, token.text).unwrap();
    }
    out
}

#[test]
fn snapshot_token_positions() {
    insta::assert_snapshot!(render(&lex(TextSource::from(SOURCE))), @r#"
    ident 1:1-1:3 "let"
    ident 1:5-1:5 "a"
    punct 1:7-1:7 "="
    string 1:9-1:14 "\"中文\""
    punct 1:15-1:15 ";"
    ident 2:3-2:4 "b\u{301}"
    punct 2:5-2:5 "="
    number 2:7-2:8 "42"
    "#);
}

#[test]
fn token_positions_ignore_how_input_arrives() {
    let whole = lex(TextSource::from(SOURCE));
    for parts in 1..=6 {
        assert_eq!(lex(split_source(SOURCE, parts)), whole);
        assert_eq!(lex(Trickle::new(TextSource::from(SOURCE), parts)), whole);
    }
}
