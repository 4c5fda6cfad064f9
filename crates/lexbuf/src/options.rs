use crate::DEFAULT_TAB_SIZE;

/// Configuration for a [`BufferedReader`](crate::BufferedReader).
///
/// # Examples
///
/// ```rust
/// use lexbuf::{BufferedReader, ReaderOptions, TextSource};
///
/// let options = ReaderOptions {
///     chunk_size: 64,
///     ..Default::default()
/// };
/// let reader = BufferedReader::with_options(TextSource::from("abc"), options).unwrap();
/// assert_eq!(reader.tab_size(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReaderOptions {
    /// Number of code units held by each chunk of the ring.
    ///
    /// Lookahead is unbounded regardless of this value; it only controls the
    /// granularity at which memory is pulled from the source and recycled.
    ///
    /// # Default
    ///
    /// `1024`
    pub chunk_size: usize,

    /// Distance between tab stops, in columns.
    ///
    /// A tab advances the column to the next multiple of `tab_size`, plus
    /// one.
    ///
    /// # Default
    ///
    /// `4`
    pub tab_size: usize,
}

impl ReaderOptions {
    /// Default number of code units per chunk.
    pub const DEFAULT_CHUNK_SIZE: usize = 1024;
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            tab_size: DEFAULT_TAB_SIZE,
        }
    }
}
