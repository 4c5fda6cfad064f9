//! Incremental line/column bookkeeping over runs of code units.
//!
//! What it does
//! - Tracks the position of the last consumed unit and of the next unconsumed
//!   unit while the reader commits input.
//! - Expands tabs to the next tab stop, counts combining marks as zero
//!   columns and wide characters as two.
//! - Pairs UTF-16 surrogates across calls: a high surrogate's width is only
//!   known once the following unit arrives, so it is held in `pending_high`.
//!
//! Invariants
//! - `forward(a); forward(b)` ends in the same state as `forward(a ++ b)` for
//!   any split, including splits between surrogate halves.
//! - Runs longer than one unit take the batch path: one forward pass counts
//!   line feeds, one backward pass after the last line feed sums widths per
//!   tab-delimited run, and the tab stops are folded in run order. The last
//!   unit of every run goes through the single-unit path so that the
//!   "last consumed" position is exact.

use alloc::vec::Vec;

use crate::{
    CodeUnit, Position,
    unit::{combine_surrogates, is_high_surrogate, is_low_surrogate},
    width::code_point_width,
};

/// Tab stop distance used when none is configured.
pub const DEFAULT_TAB_SIZE: usize = 4;

const LF: u32 = 0x0A;
const TAB: u32 = 0x09;

/// Replaces one buffered unit with different text for position purposes.
///
/// When a commit passes `index`, the scanner advances over `replacement`
/// instead of the unit stored there. The index still advances by one; only
/// line and column follow the replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<U> {
    /// Absolute index of the replaced unit in the reader's stream.
    pub index: usize,
    /// Text that the line/column bookkeeping sees instead.
    pub replacement: Vec<U>,
}

/// Line, column and index bookkeeping for a run of committed code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionScanner {
    tab_size: usize,
    pending_high: Option<u32>,

    // Last consumed unit; `cur_line == 0` until something is consumed.
    cur_index: usize,
    cur_line: usize,
    cur_col: usize,

    // Next unconsumed unit
    next_index: usize,
    next_line: usize,
    next_col: usize,
}

impl Default for PositionScanner {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_SIZE)
    }
}

impl PositionScanner {
    /// A scanner at index 0, line 1, column 1.
    ///
    /// # Panics
    ///
    /// Debug builds assert that `tab_size` is non-zero;
    /// [`ReaderOptions`](crate::ReaderOptions) validation rejects zero before
    /// it gets here.
    #[must_use]
    pub fn new(tab_size: usize) -> Self {
        debug_assert!(tab_size > 0, "tab size must be positive");
        Self {
            tab_size,
            pending_high: None,
            cur_index: 0,
            cur_line: 0,
            cur_col: 0,
            next_index: 0,
            next_line: 1,
            next_col: 1,
        }
    }

    /// Distance between tab stops.
    #[must_use]
    pub const fn tab_size(&self) -> usize {
        self.tab_size
    }

    /// Position of the last consumed unit, or [`Position::UNKNOWN`] if
    /// nothing has been consumed since the last reset.
    #[must_use]
    pub fn position(&self) -> Position {
        if self.cur_line == 0 {
            return Position::UNKNOWN;
        }
        Position::new_unchecked(self.cur_index, self.cur_line, self.cur_col)
    }

    /// Position of the next unit to be consumed.
    ///
    /// While a high surrogate awaits its partner, the column does not yet
    /// include the pair's width.
    #[must_use]
    pub fn next_position(&self) -> Position {
        Position::new_unchecked(self.next_index, self.next_line, self.next_col)
    }

    /// Reseeds the scanner so that the next unit is at `pos`.
    ///
    /// [`Position::UNKNOWN`] resets every counter to index 0, line 1,
    /// column 1. Either way the last consumed position becomes unknown and
    /// any pending surrogate is forgotten.
    pub fn set_next_position(&mut self, pos: Position) {
        *self = Self::new(self.tab_size);
        if !pos.is_unknown() {
            self.next_index = pos.index();
            self.next_line = pos.line();
            self.next_col = pos.col();
        }
    }

    /// Whether a high surrogate is waiting for its low half.
    #[must_use]
    pub const fn has_pending_surrogate(&self) -> bool {
        self.pending_high.is_some()
    }

    /// Advances over `units`.
    pub fn forward<U: CodeUnit>(&mut self, units: &[U]) {
        let Some((last, init)) = units.split_last() else {
            return;
        };
        if !init.is_empty() {
            self.skip_run(init);
        }
        self.step(last.to_u32());
    }

    /// Advances over `replacement` in place of a single unit.
    ///
    /// Lines and columns follow `replacement`; the index advances by exactly
    /// one and the consumed position reports the replaced unit's index.
    pub fn forward_replaced<U: CodeUnit>(&mut self, replacement: &[U]) {
        let index = self.next_index;
        if replacement.is_empty() {
            self.cur_index = index;
            self.cur_line = self.next_line;
            self.cur_col = self.next_col;
        } else {
            self.forward(replacement);
            self.cur_index = index;
        }
        self.next_index = index + 1;
    }

    #[inline]
    fn tab_stop(&self, col: usize) -> usize {
        self.tab_size * (1 + (col - 1) / self.tab_size) + 1
    }

    /// Single-unit path.
    fn step(&mut self, unit: u32) {
        if let Some(high) = self.pending_high.take() {
            if is_low_surrogate(unit) {
                // The low half shares the column of its high half.
                self.cur_index = self.next_index;
                self.cur_line = self.next_line;
                self.cur_col = self.next_col;
                self.next_index += 1;
                self.next_col += code_point_width(combine_surrogates(high, unit));
                return;
            }
            self.next_col += 1;
        }

        self.cur_index = self.next_index;
        self.cur_line = self.next_line;
        self.cur_col = self.next_col;
        self.next_index += 1;

        match unit {
            LF => {
                self.next_line += 1;
                self.next_col = 1;
            }
            TAB => self.next_col = self.tab_stop(self.next_col),
            u if is_high_surrogate(u) => self.pending_high = Some(u),
            u if is_low_surrogate(u) => self.next_col += 1,
            u => self.next_col += code_point_width(u),
        }
    }

    /// Batch path: updates the next position and pending surrogate, leaving
    /// the consumed position to the caller's final `step`.
    fn skip_run<U: CodeUnit>(&mut self, units: &[U]) {
        self.next_index += units.len();

        let mut newlines = 0;
        let mut last_newline = None;
        for (i, unit) in units.iter().enumerate() {
            if unit.to_u32() == LF {
                newlines += 1;
                last_newline = Some(i);
            }
        }

        let (tail, mut col, mut pending) = match last_newline {
            Some(i) => {
                self.next_line += newlines;
                (&units[i + 1..], 1, None)
            }
            None => (units, self.next_col, self.pending_high),
        };

        // A trailing high surrogate stays pending for the next call.
        let mut end = tail.len();
        let mut trailing_high = None;
        if let Some(last) = tail.last().map(|u| u.to_u32()) {
            if is_high_surrogate(last) {
                trailing_high = Some(last);
                end -= 1;
            }
        }

        // Backward pass: `width` accumulates the run right of the cursor;
        // each tab closes a run. `later_runs` ends up in reverse order.
        let mut later_runs = Vec::new();
        let mut width = 0;
        let mut i = end;
        while i > 0 {
            let u = tail[i - 1].to_u32();
            if u == TAB {
                later_runs.push(width);
                width = 0;
                i -= 1;
            } else if is_low_surrogate(u) {
                if i >= 2 && is_high_surrogate(tail[i - 2].to_u32()) {
                    width += code_point_width(combine_surrogates(tail[i - 2].to_u32(), u));
                    i -= 2;
                } else if let (1, Some(high)) = (i, pending) {
                    pending = None;
                    width += code_point_width(combine_surrogates(high, u));
                    i -= 1;
                } else {
                    width += 1;
                    i -= 1;
                }
            } else if is_high_surrogate(u) {
                // Followed by something other than a low surrogate.
                width += 1;
                i -= 1;
            } else {
                width += code_point_width(u);
                i -= 1;
            }
        }
        if pending.is_some() {
            // The carried high surrogate met a non-low unit.
            width += 1;
        }

        col += width;
        for run in later_runs.iter().rev() {
            col = self.tab_stop(col) + run;
        }

        self.next_col = col;
        self.pending_high = trailing_high;
    }
}

/// Pure form of the commit step: advances `state` over `units`, whose first
/// element sits at absolute `base`, applying any `placeholders` that fall in
/// `base..base + units.len()`.
///
/// `placeholders` must be sorted by strictly increasing index; entries
/// outside the run are ignored.
///
/// ```rust
/// use lexbuf::{Placeholder, PositionScanner, advance};
///
/// let units: Vec<char> = "a\tb".chars().collect();
/// let state = advance(PositionScanner::new(4), 0, &units, &[]);
/// assert_eq!(state.next_position().col(), 6);
///
/// let swap = [Placeholder { index: 0, replacement: "xyz".chars().collect() }];
/// let state = advance(PositionScanner::new(4), 0, &units[..1], &swap);
/// assert_eq!(state.next_position().col(), 4);
/// assert_eq!(state.next_position().index(), 1);
/// ```
#[must_use]
pub fn advance<U: CodeUnit>(
    mut state: PositionScanner,
    base: usize,
    units: &[U],
    placeholders: &[Placeholder<U>],
) -> PositionScanner {
    let end = base + units.len();
    let mut from = 0;
    for placeholder in placeholders
        .iter()
        .skip_while(|p| p.index < base)
        .take_while(|p| p.index < end)
    {
        let at = placeholder.index - base;
        state.forward(&units[from..at]);
        state.forward_replaced(&placeholder.replacement);
        from = at + 1;
    }
    state.forward(&units[from..]);
    state
}
