//! A chunked, position-tracking character reader for hand-written lexers.
//!
//! [`BufferedReader`] sits between a character source and a scanner loop. It
//! offers unbounded lookahead ([`BufferedReader::peek_nth`]), backtracking
//! over input that has not been committed yet ([`BufferedReader::unget_n`]),
//! and commits lexemes with [`BufferedReader::discard`],
//! [`BufferedReader::accept`] or [`BufferedReader::accept_token`]. Committing
//! drives a [`PositionScanner`] so every token carries exact
//! [`Position`]s, including tab stops, double-width characters and UTF-16
//! surrogate pairs.
//!
//! ```rust
//! use lexbuf::{BufferedReader, Position, TextSource};
//!
//! let mut reader = BufferedReader::new(TextSource::from("x=1\ny"));
//! assert_eq!(reader.read().unwrap(), Some('x'));
//! assert_eq!(reader.peek().unwrap(), Some('='));
//! let ident = reader.accept_token("ident", ()).unwrap();
//! assert_eq!(ident.text, "x");
//! assert_eq!(ident.start, Position::new(0, 1, 1).unwrap());
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod options;
mod position;
mod position_scanner;
mod range;
mod reader;
mod stream;
mod token;
mod unit;
mod width;

#[doc(hidden)]
pub mod chunk_utils;

#[cfg(test)]
mod tests;

pub use chunk_utils::{produce_chunks, produce_prefixes, split_source};
pub use error::{Error, Result};
pub use options::ReaderOptions;
pub use position::Position;
pub use position_scanner::{DEFAULT_TAB_SIZE, Placeholder, PositionScanner, advance};
pub use range::{FileRange, Range};
pub use reader::BufferedReader;
pub use stream::{CharStream, CombinedStream, TextSource, Trickle, Utf8Source, Utf16Source};
pub use token::Token;
pub use unit::CodeUnit;
pub use width::code_point_width;
