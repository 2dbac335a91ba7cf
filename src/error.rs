//! Error types for identifier generation and dataset I/O.
//!
//! Per-value failures ([`ValueError`]) are wrapped with record context
//! ([`RecordError`]) so a caller can report the offending row and field, then
//! decide for itself whether to skip, halt or collect. Table-level failures
//! from the CSV adapter are reported as [`DatasetError`].

use thiserror::Error;

/// A byte-offset span into the original source text.
///
/// Both `start` and `end` are byte offsets (not character indices) from the
/// beginning of the source string.  `start` is inclusive, `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpan {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl SourceSpan {
    /// Create a new `SourceSpan`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Field name constants for consistent error reporting.
pub mod fields {
    pub const AUTHOR: &str = "author";
    pub const TITLE: &str = "title";
}

/// Top-level error type for a whole run.
#[derive(Error, Debug)]
pub enum BookIdError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Batch(#[from] BatchError),
}

/// Specific value-level errors raised while deriving tokens.
///
/// Titles and sequences have no failure modes, so every variant concerns the
/// author field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("Invalid author name: \"{name}\" has no usable initial")]
    InvalidAuthorName { name: String },

    #[error("Invalid author field \"{field}\": empty author at position {piece}")]
    InvalidAuthorField {
        /// The raw author field as given.
        field: String,
        /// 0-based index of the empty piece after splitting on `&`.
        piece: usize,
    },
}

/// A [`ValueError`] tied to the record it came from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Error in record at row {row} ({field}): {error}")]
pub struct RecordError {
    /// Row identifier of the failing record
    pub row: usize,
    /// Which field was malformed (see [`fields`])
    pub field: &'static str,
    /// The offending text, verbatim
    pub value: String,
    /// Byte-offset span of the record in its source text, when known.
    pub span: Option<SourceSpan>,
    /// The specific error that occurred
    pub error: ValueError,
}

impl RecordError {
    /// Create a new RecordError without span information.
    pub fn new(row: usize, field: &'static str, value: impl Into<String>, error: ValueError) -> Self {
        Self {
            row,
            field,
            value: value.into(),
            span: None,
            error,
        }
    }

    /// Attach a byte-offset span to this error, returning `self` (builder style).
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }
}

/// Every record that failed in one run, in input order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} record(s) failed identifier generation{}", .errors.len(), list_rows(.errors))]
pub struct BatchError {
    pub errors: Vec<RecordError>,
}

fn list_rows(errors: &[RecordError]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let rows: Vec<String> = errors.iter().map(|e| e.row.to_string()).collect();
    format!(" (rows {})", rows.join(", "))
}

/// Table-level error from a dataset adapter, with position when available.
#[derive(Error, Debug)]
#[error("Dataset error{}: {error}", position(.line, .column))]
pub struct DatasetError {
    /// Line number where the error occurred (1-based, None if not available)
    pub line: Option<usize>,
    /// Column number where the error occurred (1-based, None if not available)
    pub column: Option<usize>,
    /// The specific error that occurred
    pub error: TableError,
}

fn position(line: &Option<usize>, column: &Option<usize>) -> String {
    match (line, column) {
        (Some(l), Some(c)) => format!(" at line {} column {}", l, c),
        (Some(l), None) => format!(" at line {}", l),
        (None, Some(c)) => format!(" at column {}", c),
        (None, None) => String::new(),
    }
}

impl DatasetError {
    /// Create a new DatasetError.
    pub fn new(line: Option<usize>, column: Option<usize>, error: TableError) -> Self {
        Self {
            line,
            column,
            error,
        }
    }

    /// Create a DatasetError with just line information.
    pub fn at_line(line: usize, error: TableError) -> Self {
        Self::new(Some(line), None, error)
    }

    /// Create a DatasetError without position information.
    pub fn without_position(error: TableError) -> Self {
        Self::new(None, None, error)
    }
}

/// What went wrong with a table as a whole.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Bad syntax: {0}")]
    Syntax(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("No {field} column found (expected one of: {aliases})")]
    MissingColumn {
        field: &'static str,
        aliases: String,
    },

    #[error("Failed to write output: {0}")]
    Write(String),
}

#[cfg(feature = "csv")]
impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        let (line, column) = if let Some(position) = err.position() {
            (
                Some(position.line() as usize),
                Some(position.byte() as usize),
            )
        } else {
            (None, None)
        };

        DatasetError::new(line, column, TableError::Syntax(err.to_string()))
    }
}
