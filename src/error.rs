//! Error types for grid search and layout parsing.

use thiserror::Error;

/// Every way a search can end without a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The frontier ran dry before the end cell was reached.
    #[error("no path found between start and end")]
    NoPathFound,

    /// The search was asked to run on an unusable start/end pair.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The observer asked the search to stop.
    #[error("search aborted by observer")]
    Aborted,
}

impl SearchError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }
}

/// Errors raised while parsing a text layout into a [`crate::Grid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// No grid rows were found.
    #[error("layout is empty")]
    Empty,

    /// Row count differs from column count.
    #[error("layout must be square, got {rows} rows of {cols} columns")]
    NotSquare {
        /// Number of rows parsed.
        rows: usize,
        /// Width of the first row.
        cols: usize,
    },

    /// A row is shorter or longer than the first one.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        found: usize,
    },

    /// A character outside the layout alphabet.
    #[error("unknown symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        col: usize,
        /// The offending character.
        symbol: char,
    },

    /// More than one start or end marker.
    #[error("layout contains more than one {symbol:?} marker")]
    DuplicateMarker {
        /// The repeated marker character.
        symbol: char,
    },
}
