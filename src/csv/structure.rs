//! CSV table structures.
//!
//! The table keeps every cell of the source so identifiers can be written
//! back without disturbing unrelated data.

use crate::csv::config::CsvConfig;
use crate::error::{DatasetError, SourceSpan, TableError};
use crate::{Record, RecordOutcome};
use csv::{Terminator, WriterBuilder};
use std::collections::HashMap;

/// One data row of the source table.
#[derive(Debug, Clone)]
pub(crate) struct CsvRow {
    /// Cells in column order
    pub(crate) cells: Vec<String>,
    /// 1-based line number of the row in the source
    pub(crate) line_number: usize,
    /// Byte range of the row in the source text.
    pub(crate) span: SourceSpan,
}

/// A parsed book table with its author and title columns located.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub(crate) headers: Vec<String>,
    pub(crate) rows: Vec<CsvRow>,
    pub(crate) author_column: usize,
    pub(crate) title_column: usize,
    /// Existing identifier column, refreshed on write
    pub(crate) output_column: Option<usize>,
    pub(crate) trim: bool,
    /// Delimiter the table was read with, reused on write
    pub(crate) delimiter: u8,
    /// Whether the source used `\r\n` line endings, reused on write
    pub(crate) crlf: bool,
}

impl CsvTable {
    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column headers as read.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Records in row order. The row identifier is the source line number.
    ///
    /// Missing cells are read as empty text and left for the core to reject.
    pub fn records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| {
                let cell = |i: usize| {
                    let value = row.cells.get(i).map(String::as_str).unwrap_or_default();
                    if self.trim { value.trim() } else { value }
                };
                Record::new(row.line_number, cell(self.author_column), cell(self.title_column))
                    .with_span(row.span)
            })
            .collect()
    }

    /// Serializes the table with identifiers filled in.
    ///
    /// Rows are matched to outcomes by row identifier. A failed record gets an
    /// empty identifier cell; a row with no outcome keeps whatever the
    /// identifier column held before.
    pub(crate) fn write(
        &self,
        outcomes: &[RecordOutcome],
        config: &CsvConfig,
    ) -> Result<String, DatasetError> {
        if self.headers.is_empty() {
            return Ok(String::new());
        }

        let by_row: HashMap<usize, &RecordOutcome> = outcomes.iter().map(|o| (o.row, o)).collect();
        let (output_column, width) = match self.output_column {
            Some(i) => (i, self.headers.len()),
            None => (self.headers.len(), self.headers.len() + 1),
        };

        let mut writer = WriterBuilder::new()
            .delimiter(config.delimiter)
            .quote(config.quote)
            .terminator(if self.crlf {
                Terminator::CRLF
            } else {
                Terminator::Any(b'\n')
            })
            .from_writer(Vec::new());

        let mut headers = self.headers.clone();
        if self.output_column.is_none() {
            headers.push(config.output_column.clone());
        }
        writer.write_record(&headers)?;

        for row in &self.rows {
            let mut cells = row.cells.clone();
            cells.resize(width, String::new());
            if let Some(outcome) = by_row.get(&row.line_number) {
                cells[output_column] = match &outcome.result {
                    Ok(identifier) => identifier.to_string(),
                    Err(_) => String::new(),
                };
            }
            writer.write_record(&cells)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| DatasetError::without_position(TableError::Write(e.to_string())))?;
        String::from_utf8(bytes)
            .map_err(|e| DatasetError::without_position(TableError::Write(e.to_string())))
    }
}
