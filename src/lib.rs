//! Deterministic, human-readable identifiers for book catalogues.
//!
//! `bookid` derives a compact key for every record of a book list from its
//! author and title text alone:
//!
//! ```text
//! ("Austin, Jane", "The Lord of Rings")                     -> JA_LotR_01
//! ("Austin, Jane", "Emma")                                  -> JA_E_02
//! ("Sanderson, Brandon & Patterson, Janci", "101 Dalmatians") -> BS&JP_101D_01
//! ```
//!
//! An identifier is `AuthorToken_TitleToken_SequenceValue`:
//!
//! - **AuthorToken**: given and family initials of each author, joined by `&`
//!   ([`author`], [`name`])
//! - **TitleToken**: first letter of each title word with case preserved,
//!   numerals kept whole and a leading "The" dropped ([`title`])
//! - **SequenceValue**: zero-padded running count of records sharing the exact
//!   same raw author text, in input order ([`sequence`])
//!
//! # Features
//!
//! - `csv` - CSV dataset adapter (enabled by default)
//! - `parallel` - compute per-record tokens with rayon (enabled by default)
//! - `cli` - the `bookid` command-line tool (enabled by default)
//! - `diagnostics` - render record errors against their source with ariadne
//!
//! # Basic Usage
//!
//! ```rust
//! use bookid::{IdGenerator, Record};
//!
//! let records = vec![
//!     Record::new(1, "Austin, Jane", "The Lord of Rings"),
//!     Record::new(2, "Austin, Jane", "Emma"),
//! ];
//!
//! for outcome in IdGenerator::new().generate(&records) {
//!     match outcome.result {
//!         Ok(id) => println!("row {}: {}", outcome.row, id),
//!         Err(e) => eprintln!("{}", e),
//!     }
//! }
//! ```
//!
//! # CSV Files
//!
//! ```rust
//! # #[cfg(feature = "csv")]
//! # {
//! use bookid::{CsvAdapter, IdGenerator};
//!
//! let input = "Author,Title,Shelf\nJane Austen,Emma,B2\nJane Austen,Persuasion,B3\n";
//!
//! let adapter = CsvAdapter::new();
//! let table = adapter.read(input).unwrap();
//! let outcomes = IdGenerator::new().generate(&table.records());
//! let output = adapter.write(&table, &outcomes).unwrap();
//!
//! assert!(output.contains("Jane Austen,Persuasion,B3,JA_P_02"));
//! # }
//! ```
//!
//! # Error Handling
//!
//! Only author fields can fail. Each failure is returned as a [`RecordError`]
//! carrying the row, the field and the offending text; the caller decides
//! whether to skip, halt or collect. [`IdGenerator::generate_all`] collects
//! every failure of a run into a [`BatchError`].
//!
//! # Thread Safety
//!
//! All configuration is immutable once a generator is built, and the only
//! mutable state of a run (the per-author counts) lives inside a single call.

use serde::{Deserialize, Serialize};

pub mod author;
#[cfg(feature = "csv")]
pub mod csv;
#[cfg(feature = "diagnostics")]
pub mod diagnostics;
pub mod error;
pub mod generator;
pub mod identifier;
pub mod name;
pub mod sequence;
pub mod title;

// Reexports
pub use author::{AuthorFieldParser, AuthorToken};
#[cfg(feature = "csv")]
pub use self::csv::{CsvAdapter, CsvConfig, CsvTable};
pub use error::{BatchError, BookIdError, DatasetError, RecordError, SourceSpan, TableError, ValueError};
pub use generator::{IdGenerator, IdGeneratorConfig};
pub use identifier::{Identifier, compose};
pub use name::{NameConfig, NameInitializer, ParsedAuthor};
pub use sequence::{SequenceCounter, SequenceValue};
pub use title::{TitleAcronymizer, TitleConfig, TitleToken};

/// One input row: raw author and title text plus a row identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Opaque row identifier used to correlate output with input.
    pub row: usize,
    /// Raw author field; one or more names joined by `&`.
    pub author_text: String,
    /// Raw title field.
    pub title_text: String,
    /// Location of the row in its source text, for diagnostics.
    #[serde(skip)]
    pub span: Option<SourceSpan>,
}

impl Record {
    /// Create a new Record.
    pub fn new(row: usize, author_text: impl Into<String>, title_text: impl Into<String>) -> Self {
        Self {
            row,
            author_text: author_text.into(),
            title_text: title_text.into(),
            span: None,
        }
    }

    /// Attach the record's source span, returning `self` (builder style).
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }
}

/// A successfully derived identifier and the row it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedIdentifier {
    pub row: usize,
    pub identifier: Identifier,
}

/// Result of identifier generation for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub row: usize,
    pub result: Result<Identifier, RecordError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_equality() {
        let a = Record::new(1, "Austin, Jane", "Emma");
        let b = Record::new(1, "Austin, Jane".to_string(), "Emma".to_string());
        assert_eq!(a, b);
        assert_ne!(a, b.clone().with_span(SourceSpan::new(0, 5)));
    }
}
