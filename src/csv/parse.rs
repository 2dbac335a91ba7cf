//! CSV table parsing.
//!
//! This module handles the low-level reading of delimited text into a
//! [`CsvTable`], locating the author, title and identifier columns.

use crate::csv::config::{AUTHOR_FIELD, CsvConfig, TITLE_FIELD};
use crate::csv::structure::{CsvRow, CsvTable};
use crate::error::{DatasetError, SourceSpan, TableError};
use csv::ReaderBuilder;

/// Parse the content of a CSV file into a table.
pub fn csv_parse<S: AsRef<str>>(csv_text: S, config: &CsvConfig) -> Result<CsvTable, DatasetError> {
    let text = csv_text.as_ref();

    if text.trim().is_empty() {
        return Ok(CsvTable::default());
    }

    config.validate().map_err(|msg| {
        DatasetError::without_position(TableError::Config(msg))
    })?;

    let mut reader = ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .quote(config.quote)
        .trim(csv::Trim::None)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| {
            DatasetError::at_line(1, TableError::Syntax(format!("Header parsing error: {}", e)))
        })?
        .iter()
        .map(String::from)
        .collect();

    let find_column = |field: &'static str| {
        headers
            .iter()
            .position(|h| config.get_field_for_header(h) == Some(field))
            .ok_or_else(|| {
                DatasetError::at_line(
                    1,
                    TableError::MissingColumn {
                        field,
                        aliases: config.aliases_of(field),
                    },
                )
            })
    };
    let author_column = find_column(AUTHOR_FIELD)?;
    let title_column = find_column(TITLE_FIELD)?;
    let output_column = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(config.output_column.trim()));

    let mut rows = Vec::new();
    let mut lines = LineCounter::new(text);

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| lines.line_at(skip_line_breaks(text, p.byte() as usize)));
                let mut err = DatasetError::from(e);
                if line.is_some() {
                    err.line = line;
                }
                return Err(err);
            }
        };

        // A CRLF terminator leaves the reader positioned on the '\n'
        let position = record.position().map_or(text.len(), |p| p.byte() as usize);
        let start = skip_line_breaks(text, position);

        rows.push(CsvRow {
            cells: record.iter().map(String::from).collect(),
            line_number: lines.line_at(start),
            span: SourceSpan::new(start, start),
        });
    }

    // A record runs up to the start of the next one, minus the line break
    let starts: Vec<usize> = rows.iter().map(|row| row.span.start).collect();
    for (i, row) in rows.iter_mut().enumerate() {
        let next = starts.get(i + 1).copied().unwrap_or(text.len());
        let end = row.span.start + text[row.span.start..next].trim_end_matches(['\r', '\n']).len();
        row.span.end = end;
    }

    tracing::debug!(
        rows = rows.len(),
        author_column,
        title_column,
        refresh = output_column.is_some(),
        "Parsed CSV table"
    );

    Ok(CsvTable {
        headers,
        rows,
        author_column,
        title_column,
        output_column,
        trim: config.trim,
        delimiter: config.delimiter,
        crlf: uses_crlf(text),
    })
}

/// First byte at or after `offset` that is not a line break.
fn skip_line_breaks(text: &str, offset: usize) -> usize {
    let offset = offset.min(text.len());
    text.len() - text[offset..].trim_start_matches(['\r', '\n']).len()
}

/// Whether the header line ends with `\r\n`.
fn uses_crlf(text: &str) -> bool {
    text.find('\n')
        .is_some_and(|i| text[..i].ends_with('\r'))
}

/// Maps byte offsets to 1-based line numbers, for offsets visited in order.
struct LineCounter<'a> {
    text: &'a str,
    offset: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, offset: usize) -> usize {
        let offset = offset.clamp(self.offset, self.text.len());
        self.line += self.text.as_bytes()[self.offset..offset]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        self.offset = offset;
        self.line
    }
}

/// Number of records sampled when detecting the delimiter.
const DETECTION_SAMPLE: usize = 5;

/// Detect CSV delimiter by analyzing the content.
///
/// Each candidate is tried with a quote-aware reader over the first few
/// records, so a quoted `"Austin, Jane"` cell counts as one field. The
/// candidate that splits every sampled record into the same number of fields,
/// with the most fields overall, wins. Ties go to the earlier candidate.
pub fn detect_csv_delimiter(content: &str, quote: u8) -> u8 {
    let delimiters = [b',', b';', b'\t', b'|'];

    let mut best_delimiter = b','; // Default to comma
    let mut best_score = 0;

    for delimiter in delimiters {
        if delimiter == quote {
            continue;
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .quote(quote)
            .flexible(true)
            .has_headers(false)
            .from_reader(content.as_bytes());

        let Ok(field_counts) = reader
            .records()
            .take(DETECTION_SAMPLE)
            .map(|record| record.map(|r| r.len()))
            .collect::<Result<Vec<_>, _>>()
        else {
            continue;
        };

        let Some(&expected) = field_counts.first() else {
            continue;
        };
        if field_counts.iter().any(|&count| count != expected) {
            continue;
        }

        let score: usize = field_counts.iter().sum();
        if score > best_score {
            best_score = score;
            best_delimiter = delimiter;
        }
    }

    tracing::debug!(delimiter = %char::from(best_delimiter), "Detected CSV delimiter");
    best_delimiter
}
