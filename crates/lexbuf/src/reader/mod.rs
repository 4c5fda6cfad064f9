//! Reader: a seekable window over a chunked character stream.
//!
//! What it does
//! - Pulls units from a [`CharStream`] into fixed-size chunks on demand, so
//!   lookahead is unbounded while memory is bounded by what has not been
//!   committed yet.
//! - Moves a cursor forward (`read*`) and back (`unget*`) over the retained
//!   window.
//! - Commits everything before the cursor with [`BufferedReader::discard`],
//!   [`BufferedReader::accept`] or [`BufferedReader::accept_token`]. Only
//!   commits drive the [`PositionScanner`], and only commits consult the
//!   placeholder queue.
//!
//! Layout
//! - `chunks` is the retained window, oldest first. Every chunk but the last
//!   is full, so the chunk holding an absolute index is found arithmetically
//!   from `chunks[0].start()`.
//! - Chunks that a commit has passed move to `spare` and are reused for the
//!   next pull from the stream.
//!
//! Invariants
//! - `chunks` is non-empty until the reader is disposed.
//! - `start_index <= global_index <= available_end()`.
//! - `chunks[0].start() <= start_index`; unget never crosses `start_index`.
//! - Placeholder indices strictly increase and are `>= start_index`.

use alloc::{collections::VecDeque, string::String, vec::Vec};

use tracing::{debug, trace};

use crate::{
    CharStream, CodeUnit, Error, Placeholder, Position, PositionScanner, ReaderOptions, Result,
    Token, advance,
};

mod chunk;

use chunk::Chunk;

/// A buffered, position-tracking reader for scanner loops.
///
/// ```rust
/// use lexbuf::{BufferedReader, TextSource};
///
/// let mut reader = BufferedReader::new(TextSource::from("a <= b"));
/// reader.read().unwrap();
/// reader.discard().unwrap();
/// // skip the space, then look ahead for a two-character operator
/// reader.read().unwrap();
/// reader.discard().unwrap();
/// assert_eq!(reader.peek_nth(1).unwrap(), Some('='));
/// reader.read_nth(1).unwrap();
/// assert_eq!(reader.accept().unwrap(), "<=");
/// assert_eq!(reader.position().col(), 4);
/// ```
#[derive(Debug)]
pub struct BufferedReader<S: CharStream> {
    // `None` once disposed
    stream: Option<S>,
    chunks: VecDeque<Chunk<S::Unit>>,
    spare: Vec<Chunk<S::Unit>>,
    chunk_size: usize,

    global_index: usize,
    start_index: usize,

    placeholders: VecDeque<Placeholder<S::Unit>>,
    scanner: PositionScanner,

    // Accept buffers, reused across commits
    scratch: Vec<S::Unit>,
    lexeme: String,
}

impl<S: CharStream> BufferedReader<S> {
    /// A reader over `stream` with default [`ReaderOptions`].
    pub fn new(stream: S) -> Self {
        Self::from_valid_options(stream, ReaderOptions::default())
    }

    /// A reader over `stream` with explicit options.
    ///
    /// # Errors
    ///
    /// [`Error::Argument`] if `chunk_size` or `tab_size` is zero.
    pub fn with_options(stream: S, options: ReaderOptions) -> Result<Self> {
        if options.chunk_size == 0 {
            return Err(Error::argument("chunk_size", "must be positive"));
        }
        if options.tab_size == 0 {
            return Err(Error::argument("tab_size", "must be positive"));
        }
        Ok(Self::from_valid_options(stream, options))
    }

    fn from_valid_options(stream: S, options: ReaderOptions) -> Self {
        let mut chunks = VecDeque::new();
        chunks.push_back(Chunk::new(options.chunk_size, 0));
        Self {
            stream: Some(stream),
            chunks,
            spare: Vec::new(),
            chunk_size: options.chunk_size,
            global_index: 0,
            start_index: 0,
            placeholders: VecDeque::new(),
            scanner: PositionScanner::new(options.tab_size),
            scratch: Vec::new(),
            lexeme: String::new(),
        }
    }

    // --- Cursor movement ---------------------------------------------------

    /// The unit under the cursor, without moving.
    ///
    /// # Errors
    ///
    /// [`Error::ClosedStream`] after [`dispose`](Self::dispose).
    pub fn peek(&mut self) -> Result<Option<S::Unit>> {
        self.peek_nth(0)
    }

    /// The unit `n` places after the cursor, without moving. Returns `None`
    /// past the end of input.
    ///
    /// # Errors
    ///
    /// [`Error::ClosedStream`] after [`dispose`](Self::dispose);
    /// [`Error::Argument`] if the offset overflows.
    pub fn peek_nth(&mut self, n: usize) -> Result<Option<S::Unit>> {
        self.check_open()?;
        let abs = self.offset(n)?;
        Ok(self.ensure_available(abs).then(|| self.unit_at(abs)))
    }

    /// Consumes and returns the unit under the cursor.
    ///
    /// # Errors
    ///
    /// [`Error::ClosedStream`] after [`dispose`](Self::dispose).
    pub fn read(&mut self) -> Result<Option<S::Unit>> {
        self.read_nth(0)
    }

    /// Skips `n` units and consumes the next one, like [`Iterator::nth`].
    ///
    /// If input ends first, returns `None` and leaves the cursor at the end
    /// of the available input.
    ///
    /// # Errors
    ///
    /// [`Error::ClosedStream`] after [`dispose`](Self::dispose);
    /// [`Error::Argument`] if the offset overflows.
    pub fn read_nth(&mut self, n: usize) -> Result<Option<S::Unit>> {
        self.check_open()?;
        let abs = self.offset(n)?;
        if self.ensure_available(abs) {
            let unit = self.unit_at(abs);
            self.global_index = abs + 1;
            Ok(Some(unit))
        } else {
            self.global_index = self.available_end();
            Ok(None)
        }
    }

    /// Copies units from the cursor into `buf`, pulling from the stream at
    /// most once. Returns the number copied; `0` means end of input (or an
    /// empty `buf`).
    ///
    /// # Errors
    ///
    /// [`Error::ClosedStream`] after [`dispose`](Self::dispose).
    pub fn read_into(&mut self, buf: &mut [S::Unit]) -> Result<usize> {
        self.check_open()?;
        if buf.is_empty() {
            return Ok(0);
        }
        if self.global_index >= self.available_end() && !self.fill() {
            return Ok(0);
        }

        let end = self.available_end();
        let mut copied = 0;
        while copied < buf.len() && self.global_index < end {
            let (c, o) = self.locate(self.global_index);
            let src = &self.chunks[c].filled()[o..];
            let n = src.len().min(buf.len() - copied);
            buf[copied..copied + n].copy_from_slice(&src[..n]);
            copied += n;
            self.global_index += n;
        }
        Ok(copied)
    }

    /// Like [`read_into`](Self::read_into), but keeps pulling until `buf` is
    /// full or input is exhausted.
    ///
    /// # Errors
    ///
    /// [`Error::ClosedStream`] after [`dispose`](Self::dispose).
    pub fn read_block(&mut self, buf: &mut [S::Unit]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.read_into(&mut buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        Ok(filled)
    }

    /// Moves the cursor back by one. Returns `false` at the committed
    /// boundary.
    ///
    /// # Errors
    ///
    /// [`Error::ClosedStream`] after [`dispose`](Self::dispose).
    pub fn unget(&mut self) -> Result<bool> {
        Ok(self.unget_n(1)? == 1)
    }

    /// Moves the cursor back by up to `n` units, stopping at the committed
    /// boundary, and returns how far it actually moved.
    ///
    /// # Errors
    ///
    /// [`Error::ClosedStream`] after [`dispose`](Self::dispose).
    pub fn unget_n(&mut self, n: usize) -> Result<usize> {
        self.check_open()?;
        let moved = n.min(self.global_index - self.start_index);
        self.global_index -= moved;
        Ok(moved)
    }

    // --- Commits -----------------------------------------------------------

    /// Commits everything before the cursor without materializing it.
    ///
    /// The position scanner advances over the committed units (honoring
    /// placeholders), passed chunks are recycled, and [`unget`](Self::unget)
    /// can no longer cross the cursor.
    ///
    /// # Errors
    ///
    /// [`Error::ClosedStream`] after [`dispose`](Self::dispose).
    pub fn discard(&mut self) -> Result<()> {
        self.check_open()?;
        self.commit(false);
        Ok(())
    }

    /// Commits everything before the cursor and returns it as text.
    ///
    /// The text is built in a buffer owned by the reader and reused across
    /// calls; unpaired UTF-16 surrogates decode to U+FFFD.
    ///
    /// # Errors
    ///
    /// [`Error::ClosedStream`] after [`dispose`](Self::dispose).
    pub fn accept(&mut self) -> Result<&str> {
        self.check_open()?;
        self.commit(true);
        self.lexeme.clear();
        S::Unit::decode_into(&self.scratch, &mut self.lexeme);
        Ok(&self.lexeme)
    }

    /// Commits everything before the cursor as a [`Token`].
    ///
    /// `start` is the scanner's next position before the commit and `end`
    /// the position of the last committed unit.
    ///
    /// # Errors
    ///
    /// [`Error::ClosedStream`] after [`dispose`](Self::dispose).
    pub fn accept_token<K, V>(&mut self, kind: K, value: V) -> Result<Token<K, V>> {
        self.check_open()?;
        let start = self.scanner.next_position();
        let text = String::from(self.accept()?);
        let end = self.scanner.position();
        Ok(Token {
            kind,
            text,
            start,
            end,
            value,
        })
    }

    /// Queues a placeholder: when a commit passes absolute `index`, the
    /// position scanner advances over `replacement` instead of the unit
    /// stored there.
    ///
    /// # Errors
    ///
    /// [`Error::ClosedStream`] after [`dispose`](Self::dispose);
    /// [`Error::Argument`] if `index` was already committed or is not greater
    /// than the last queued placeholder.
    pub fn add_placeholder(&mut self, index: usize, replacement: &str) -> Result<()> {
        self.check_open()?;
        if index < self.start_index {
            return Err(Error::argument("index", "already committed"));
        }
        if self.placeholders.back().is_some_and(|p| p.index >= index) {
            return Err(Error::argument(
                "index",
                "placeholders must be queued in increasing index order",
            ));
        }
        let mut units = Vec::with_capacity(replacement.len());
        S::Unit::encode_str(replacement, &mut units);
        self.placeholders.push_back(Placeholder {
            index,
            replacement: units,
        });
        Ok(())
    }

    /// Releases the chunks and the underlying stream and resets the position
    /// scanner. Every later cursor or commit call fails with
    /// [`Error::ClosedStream`]. Disposing twice is a no-op.
    pub fn dispose(&mut self) {
        if self.stream.take().is_some() {
            debug!(
                index = self.global_index,
                chunks = self.chunks.len() + self.spare.len(),
                "disposing reader"
            );
        }
        self.chunks = VecDeque::new();
        self.spare = Vec::new();
        self.placeholders = VecDeque::new();
        self.scratch = Vec::new();
        self.lexeme = String::new();
        self.scanner = PositionScanner::new(self.scanner.tab_size());
    }

    // --- Bookkeeping -------------------------------------------------------

    /// Position of the last committed unit.
    #[must_use]
    pub fn position(&self) -> Position {
        self.scanner.position()
    }

    /// Position the next committed unit will have.
    #[must_use]
    pub fn next_position(&self) -> Position {
        self.scanner.next_position()
    }

    /// Reseeds the position scanner; see
    /// [`PositionScanner::set_next_position`]. Absolute stream indices used
    /// by the cursor and placeholders are unaffected.
    pub fn set_next_position(&mut self, pos: Position) {
        self.scanner.set_next_position(pos);
    }

    /// The position scanner driven by commits.
    #[must_use]
    pub fn scanner(&self) -> &PositionScanner {
        &self.scanner
    }

    /// Distance between tab stops.
    #[must_use]
    pub fn tab_size(&self) -> usize {
        self.scanner.tab_size()
    }

    /// Absolute index of the cursor in the stream.
    #[must_use]
    pub fn global_index(&self) -> usize {
        self.global_index
    }

    /// Absolute index of the first uncommitted unit.
    #[must_use]
    pub fn committed_index(&self) -> usize {
        self.start_index
    }

    /// Units read since the last commit, i.e. how far [`unget_n`] can go.
    ///
    /// [`unget_n`]: Self::unget_n
    #[must_use]
    pub fn uncommitted_len(&self) -> usize {
        self.global_index - self.start_index
    }

    /// Units already buffered ahead of the cursor.
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.available_end() - self.global_index
    }

    /// Number of chunks in the retained window.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of placeholders not yet passed by a commit.
    #[must_use]
    pub fn pending_placeholders(&self) -> usize {
        self.placeholders.len()
    }

    /// Whether [`dispose`](Self::dispose) has been called.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.stream.is_none()
    }

    // --- Internals ---------------------------------------------------------

    fn check_open(&self) -> Result<()> {
        if self.stream.is_none() {
            return Err(Error::ClosedStream);
        }
        Ok(())
    }

    fn offset(&self, n: usize) -> Result<usize> {
        self.global_index
            .checked_add(n)
            .ok_or(Error::argument("n", "offset overflows the stream index"))
    }

    #[inline]
    fn available_end(&self) -> usize {
        self.chunks.back().map_or(self.global_index, Chunk::end)
    }

    /// Chunk slot and intra-chunk offset of absolute index `abs`.
    #[inline]
    fn locate(&self, abs: usize) -> (usize, usize) {
        let rel = abs - self.chunks[0].start();
        (rel / self.chunk_size, rel % self.chunk_size)
    }

    #[inline]
    fn unit_at(&self, abs: usize) -> S::Unit {
        let (c, o) = self.locate(abs);
        self.chunks[c].filled()[o]
    }

    fn ensure_available(&mut self, abs: usize) -> bool {
        while abs >= self.available_end() {
            if !self.fill() {
                return false;
            }
        }
        true
    }

    /// One partial read from the stream into the newest chunk, growing the
    /// window when it is full. Returns `false` at end of input.
    fn fill(&mut self) -> bool {
        let Some(stream) = self.stream.as_mut() else {
            return false;
        };
        if self.chunks.back().is_none_or(Chunk::is_full) {
            let start = self.chunks.back().map_or(self.start_index, Chunk::end);
            let chunk = if let Some(mut chunk) = self.spare.pop() {
                chunk.reset(start);
                chunk
            } else {
                debug!(
                    chunks = self.chunks.len() + 1,
                    chunk_size = self.chunk_size,
                    "growing chunk ring"
                );
                Chunk::new(self.chunk_size, start)
            };
            self.chunks.push_back(chunk);
        }
        let Some(last) = self.chunks.back_mut() else {
            return false;
        };
        last.fill_from(stream) > 0
    }

    /// Advances the scanner over `start_index..global_index`, optionally
    /// capturing the units into `scratch`, then moves the boundary.
    fn commit(&mut self, capture: bool) {
        let run_start = self.start_index;
        let run_end = self.global_index;
        if capture {
            self.scratch.clear();
        }

        self.placeholders.make_contiguous();
        let (placeholders, _) = self.placeholders.as_slices();
        let mut scanner = self.scanner;
        let mut abs = run_start;
        while abs < run_end {
            let (c, o) = self.locate(abs);
            let filled = self.chunks[c].filled();
            let take = (filled.len() - o).min(run_end - abs);
            let units = &filled[o..o + take];
            scanner = advance(scanner, abs, units, placeholders);
            if capture {
                self.scratch.extend_from_slice(units);
            }
            abs += take;
        }
        self.scanner = scanner;

        let passed = self
            .placeholders
            .iter()
            .take_while(|p| p.index < run_end)
            .count();
        if passed > 0 {
            trace!(passed, "placeholders applied");
            self.placeholders.drain(..passed);
        }

        self.start_index = run_end;
        self.recycle();
        trace!(start = run_start, end = run_end, capture, "committed");
    }

    /// Moves chunks wholly before the committed boundary to the spare pool,
    /// keeping at least one chunk in the window.
    fn recycle(&mut self) {
        while self.chunks.len() > 1 && self.chunks[0].end() <= self.start_index {
            if let Some(chunk) = self.chunks.pop_front() {
                self.spare.push(chunk);
            }
        }
    }
}

impl<S: CharStream> Iterator for BufferedReader<S> {
    type Item = S::Unit;

    /// Reads the next unit; a disposed reader yields `None`.
    fn next(&mut self) -> Option<Self::Item> {
        self.read().ok().flatten()
    }
}
