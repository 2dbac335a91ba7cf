//! CSV dataset adapter.
//!
//! Reads a book table from delimited text, hands its author and title
//! columns to the generator as [`Record`](crate::Record)s, and writes the
//! identifiers back into an output column while leaving every other cell as
//! it was.
//!
//! # Example
//!
//! ```
//! use bookid::{IdGenerator, csv::CsvAdapter};
//!
//! let input = "Author,Title\n\"Austin, Jane\",The Lord of Rings\n\"Austin, Jane\",Emma\n";
//!
//! let adapter = CsvAdapter::new();
//! let table = adapter.read(input).unwrap();
//! let outcomes = IdGenerator::new().generate(&table.records());
//!
//! let output = adapter.write(&table, &outcomes).unwrap();
//! assert_eq!(
//!     output,
//!     "Author,Title,Custom ID\n\"Austin, Jane\",The Lord of Rings,JA_LotR_01\n\"Austin, Jane\",Emma,JA_E_02\n"
//! );
//! ```

mod config;
mod parse;
mod structure;

use crate::RecordOutcome;
use crate::error::DatasetError;
pub use config::{CsvConfig, DEFAULT_OUTPUT_COLUMN};
use parse::csv_parse;
pub use structure::CsvTable;

/// Reader and writer for book tables in CSV form.
///
/// # Features
///
/// - Configurable header aliases for the author and title columns
/// - Configurable delimiter, quote and output column header
/// - Automatic delimiter detection
/// - Existing identifier columns are refreshed in place
///
/// # Examples
///
/// With custom configuration:
/// ```
/// use bookid::csv::{CsvAdapter, CsvConfig};
///
/// let mut config = CsvConfig::new();
/// config.set_delimiter(b';').set_output_column("Key");
///
/// let adapter = CsvAdapter::with_config(config);
/// ```
///
/// Auto-detection of the delimiter:
/// ```
/// use bookid::csv::CsvAdapter;
///
/// let adapter = CsvAdapter::with_auto_detection();
/// let table = adapter.read("Author\tTitle\nPlato\tRepublic\n").unwrap();
/// assert_eq!(table.records()[0].title_text, "Republic");
/// ```
#[derive(Debug, Clone)]
pub struct CsvAdapter {
    config: CsvConfig,
    auto_detect: bool,
}

impl Default for CsvAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvAdapter {
    /// Creates a new CSV adapter with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: CsvConfig::new(),
            auto_detect: false,
        }
    }

    /// Creates a new CSV adapter with custom configuration
    #[must_use]
    pub fn with_config(config: CsvConfig) -> Self {
        Self {
            config,
            auto_detect: false,
        }
    }

    /// Creates a new CSV adapter with automatic delimiter detection
    #[must_use]
    pub fn with_auto_detection() -> Self {
        Self {
            config: CsvConfig::new(),
            auto_detect: true,
        }
    }

    /// Gets a reference to the current configuration
    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    /// Gets a mutable reference to the current configuration
    pub fn config_mut(&mut self) -> &mut CsvConfig {
        &mut self.config
    }

    /// Enables or disables automatic delimiter detection
    pub fn set_auto_detection(&mut self, enabled: bool) -> &mut Self {
        self.auto_detect = enabled;
        self
    }

    /// Configuration to use for `input`, with the delimiter sniffed if enabled.
    fn effective_config(&self, input: &str) -> CsvConfig {
        let mut config = self.config.clone();
        if self.auto_detect {
            config.set_delimiter(parse::detect_csv_delimiter(input, config.quote));
        }
        config
    }

    /// Reads a book table.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] for malformed CSV, an invalid configuration,
    /// or a missing author or title column.
    pub fn read(&self, input: &str) -> Result<CsvTable, DatasetError> {
        csv_parse(input, &self.effective_config(input))
    }

    /// Writes `table` back with the identifiers from `outcomes`, using the
    /// delimiter the table was read with.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the output cannot be serialized.
    pub fn write(&self, table: &CsvTable, outcomes: &[RecordOutcome]) -> Result<String, DatasetError> {
        let mut config = self.config.clone();
        config.set_delimiter(table.delimiter);
        table.write(outcomes, &config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IdGenerator;
    use crate::error::{TableError, ValueError};
    use pretty_assertions::assert_eq;

    fn run(adapter: &CsvAdapter, input: &str) -> (Vec<RecordOutcome>, String) {
        let table = adapter.read(input).unwrap();
        let outcomes = IdGenerator::new().generate(&table.records());
        let output = adapter.write(&table, &outcomes).unwrap();
        (outcomes, output)
    }

    #[test]
    fn test_round_trip_preserves_other_columns() {
        let input = "\
ISBN,Author,Shelf,Title,Notes
978-0141439518,\"Austin, Jane\",B2,Emma,\"first, edition\"
978-0261103252,\"Tolkien, J.R.R.\",C1,The Lord of the Rings,
978-0141439686,\"Austin, Jane\",B2,Persuasion,signed
";
        let (_, output) = run(&CsvAdapter::new(), input);
        assert_eq!(
            output,
            "\
ISBN,Author,Shelf,Title,Notes,Custom ID
978-0141439518,\"Austin, Jane\",B2,Emma,\"first, edition\",JA_E_01
978-0261103252,\"Tolkien, J.R.R.\",C1,The Lord of the Rings,,JT_LotR_01
978-0141439686,\"Austin, Jane\",B2,Persuasion,signed,JA_P_02
"
        );
    }

    #[test]
    fn test_rerun_refreshes_identifier_column() {
        let input = "Author,Title\nPlato,Republic\nPlato,Symposium\n";
        let adapter = CsvAdapter::new();
        let (_, first) = run(&adapter, input);
        let (_, second) = run(&adapter, &first);
        assert_eq!(first, second);
        assert_eq!(
            second,
            "Author,Title,Custom ID\nPlato,Republic,P_R_01\nPlato,Symposium,P_S_02\n"
        );
    }

    #[test]
    fn test_failed_rows_are_reported_with_line() {
        let input = "Author,Title\nPlato,Republic\n\"Plato &\",Laws\n,Untitled\n";
        let (outcomes, output) = run(&CsvAdapter::new(), input);

        let failed: Vec<_> = outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err())
            .collect();
        assert_eq!(failed.len(), 2);
        assert_eq!(failed[0].row, 3);
        assert_eq!(failed[0].value, "Plato &");
        assert!(matches!(failed[0].error, ValueError::InvalidAuthorField { piece: 1, .. }));
        assert_eq!(failed[1].row, 4);

        let span = failed[1].span.unwrap();
        assert_eq!(&input[span.start..span.end], ",Untitled");

        assert_eq!(
            output,
            "Author,Title,Custom ID\nPlato,Republic,P_R_01\nPlato &,Laws,\n,Untitled,\n"
        );
    }

    #[test]
    fn test_auto_detection_keeps_delimiter() {
        let input = "Author;Title;Year\nHugo, Victor;Les Misérables;1862\n";
        let (_, output) = run(&CsvAdapter::with_auto_detection(), input);
        assert_eq!(
            output,
            "Author;Title;Year;Custom ID\nHugo, Victor;Les Misérables;1862;VH_LM_01\n"
        );
    }

    #[test]
    fn test_auto_detection_with_quoted_comma_names() {
        let input = "Author,Title\n\"Austin, Jane\",The Lord of Rings\n\"Austin, Jane\",Emma\n";
        let (outcomes, output) = run(&CsvAdapter::with_auto_detection(), input);
        assert!(outcomes.iter().all(|o| o.result.is_ok()));
        assert_eq!(
            output,
            "Author,Title,Custom ID\n\"Austin, Jane\",The Lord of Rings,JA_LotR_01\n\"Austin, Jane\",Emma,JA_E_02\n"
        );
    }

    #[test]
    fn test_crlf_round_trip_keeps_line_endings() {
        let input = "Author,Title,Shelf\r\n\"Austin, Jane\",Emma,B2\r\nPlato,Republic,A1\r\n";
        let (_, output) = run(&CsvAdapter::with_auto_detection(), input);
        assert_eq!(
            output,
            "Author,Title,Shelf,Custom ID\r\n\"Austin, Jane\",Emma,B2,JA_E_01\r\nPlato,Republic,A1,P_R_01\r\n"
        );
    }

    #[test]
    fn test_crlf_failed_row_points_at_its_line() {
        let input = "Author,Title\r\nPlato,Republic\r\n\"Plato &\",Laws\r\n";
        let (outcomes, _) = run(&CsvAdapter::new(), input);
        let err = outcomes[1].result.as_ref().unwrap_err();
        assert_eq!(err.row, 3);
        let span = err.span.unwrap();
        assert_eq!(&input[span.start..span.end], "\"Plato &\",Laws");
    }

    #[test]
    fn test_custom_output_column() {
        let mut adapter = CsvAdapter::new();
        adapter.config_mut().set_output_column("Key");
        let (_, output) = run(&adapter, "Author,Title\nPlato,Republic\n");
        assert_eq!(output, "Author,Title,Key\nPlato,Republic,P_R_01\n");
    }

    #[test]
    fn test_empty_input() {
        let (outcomes, output) = run(&CsvAdapter::new(), "");
        assert!(outcomes.is_empty());
        assert_eq!(output, "");
    }

    #[test]
    fn test_missing_author_column() {
        let err = CsvAdapter::new().read("Title,Year\nEmma,1815\n").unwrap_err();
        assert!(matches!(
            err.error,
            TableError::MissingColumn { field: "author", .. }
        ));
        assert!(err.to_string().contains("No author column found"));
    }

    #[test]
    fn test_parser_configuration_methods() {
        let mut adapter = CsvAdapter::new();
        assert_eq!(adapter.config().delimiter, b',');

        adapter.config_mut().set_delimiter(b';');
        assert_eq!(adapter.config().delimiter, b';');

        adapter.set_auto_detection(true);
        assert!(adapter.auto_detect);
    }
}
