//! Pretty diagnostic reporting using [ariadne].
//!
//! Renders [`RecordError`] and [`DatasetError`] values against the source
//! text they came from, with the offending row underlined.  Only compiled
//! when the `diagnostics` Cargo feature is enabled:
//!
//! ```toml
//! [dependencies]
//! bookid = { version = "0.1", features = ["diagnostics"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use bookid::{CsvAdapter, IdGenerator};
//!
//! let source = "Author,Title\nPlato &,Laws\n";
//! let table = CsvAdapter::new().read(source)?;
//! for outcome in IdGenerator::new().generate(&table.records()) {
//!     if let Err(e) = outcome.result {
//!         eprintln!("{}", e.to_diagnostic("books.csv", source));
//!     }
//! }
//! ```

use crate::error::{DatasetError, RecordError, SourceSpan};
use ariadne::{Color, Label, Report, ReportKind, Source};
use std::ops::Range;

impl RecordError {
    /// Render this error as a pretty Ariadne diagnostic.
    ///
    /// The label points at the record's span when one is attached, otherwise
    /// at the source line numbered by the record's row.
    ///
    /// # Arguments
    ///
    /// * `filename` – Label shown in the report header (e.g. `"books.csv"`).
    /// * `source`   – The original source text the record was read from.
    pub fn to_diagnostic(&self, filename: &str, source: &str) -> String {
        let range = byte_range(source, self.span.as_ref(), Some(self.row));
        render(
            filename,
            source,
            range,
            self.to_string(),
            format!("{} field \"{}\": {}", self.field, self.value, self.error),
        )
    }
}

impl DatasetError {
    /// Render this error as a pretty Ariadne diagnostic.
    pub fn to_diagnostic(&self, filename: &str, source: &str) -> String {
        let range = byte_range(source, None, self.line);
        render(filename, source, range, self.to_string(), self.error.to_string())
    }
}

fn render(filename: &str, source: &str, range: Range<usize>, message: String, label: String) -> String {
    let mut buf = Vec::new();

    let report = Report::build(ReportKind::Error, (filename, range.clone()))
        .with_message(&message)
        .with_label(
            Label::new((filename, range))
                .with_message(label)
                .with_color(Color::Red),
        )
        .finish();

    if let Err(e) = report.write((filename, Source::from(source)), &mut buf) {
        tracing::debug!(error = %e, "Failed to render diagnostic");
        return message;
    }

    String::from_utf8_lossy(&buf).into_owned()
}

/// Byte range that best represents an error location.
///
/// Priority: explicit span > line-derived range > start of file.
fn byte_range(source: &str, span: Option<&SourceSpan>, line: Option<usize>) -> Range<usize> {
    if let Some(span) = span {
        let end = span.end.min(source.len());
        return span.start.min(end)..end;
    }
    if let Some(line) = line {
        let line_start: usize = source
            .lines()
            .take(line.saturating_sub(1))
            .map(|l| l.len() + 1) // +1 for '\n'
            .sum();
        let line_len = source
            .lines()
            .nth(line.saturating_sub(1))
            .map(|l| l.len())
            .unwrap_or(0);
        let start = line_start.min(source.len());
        return start..(start + line_len).min(source.len());
    }
    0..0
}
