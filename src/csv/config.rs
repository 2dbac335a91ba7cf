//! CSV header mapping definitions and configuration.
//!
//! This module defines the default header aliases used to locate the author
//! and title columns, and the options for reading and writing the table.

use std::collections::HashMap;

/// Field name for the author column
pub(crate) const AUTHOR_FIELD: &str = "author";
/// Field name for the title column
pub(crate) const TITLE_FIELD: &str = "title";

/// Default header mappings for common column names
pub(crate) const DEFAULT_HEADERS: &[(&str, &[&str])] = &[
    (AUTHOR_FIELD, &["author", "authors", "creator", "creators", "writer"]),
    (TITLE_FIELD, &["title", "book title", "name", "book"]),
];

/// Default header of the column identifiers are written to.
pub const DEFAULT_OUTPUT_COLUMN: &str = "Custom ID";

/// Configuration for reading a book table and writing identifiers back.
///
/// # Default Mappings
///
/// - "author" → ["author", "authors", "creator", "creators", "writer"]
/// - "title" → ["title", "book title", "name", "book"]
///
/// Header matching is case-insensitive and ignores surrounding whitespace.
///
/// # Examples
///
/// ```
/// use bookid::csv::CsvConfig;
///
/// let mut config = CsvConfig::new();
/// config
///     .add_header_aliases("author", vec!["Auteur".to_string()])
///     .set_output_column("Shelf Key")
///     .set_delimiter(b';');
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Header aliases per field
    pub(crate) header_map: HashMap<String, Vec<String>>,
    /// Reverse lookup map for O(1) header-to-field mapping
    pub(crate) reverse_map: HashMap<String, String>,
    /// Header of the identifier column
    pub(crate) output_column: String,
    /// Delimiter to use for parsing and writing the CSV
    pub(crate) delimiter: u8,
    /// Quote character
    pub(crate) quote: u8,
    /// Whether to trim whitespace around author and title values
    pub(crate) trim: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvConfig {
    /// Creates a new CSV configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        let mut config = Self {
            header_map: HashMap::new(),
            reverse_map: HashMap::new(),
            output_column: DEFAULT_OUTPUT_COLUMN.to_string(),
            delimiter: b',',
            quote: b'"',
            trim: false,
        };
        config.set_default_headers();
        config
    }

    /// Sets the default header mappings
    fn set_default_headers(&mut self) {
        for (field, aliases) in DEFAULT_HEADERS {
            self.header_map.insert(
                field.to_string(),
                aliases.iter().map(|s| s.to_string()).collect(),
            );
        }
        self.rebuild_reverse_map();
    }

    /// Rebuild the reverse lookup map after header mappings change
    fn rebuild_reverse_map(&mut self) {
        self.reverse_map.clear();
        for (field, aliases) in &self.header_map {
            for alias in aliases {
                self.reverse_map
                    .insert(alias.trim().to_lowercase(), field.clone());
            }
        }
    }

    /// Replaces the aliases of a field
    pub fn set_header_mapping(&mut self, field: &str, aliases: Vec<String>) -> &mut Self {
        self.header_map.insert(field.to_string(), aliases);
        self.rebuild_reverse_map();
        self
    }

    /// Adds additional aliases to an existing field mapping
    pub fn add_header_aliases(&mut self, field: &str, aliases: Vec<String>) -> &mut Self {
        self.header_map
            .entry(field.to_string())
            .or_default()
            .extend(aliases);
        self.rebuild_reverse_map();
        self
    }

    /// Sets the header of the identifier column
    pub fn set_output_column(&mut self, header: &str) -> &mut Self {
        self.output_column = header.to_string();
        self
    }

    /// Sets the delimiter character
    pub fn set_delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the quote character
    pub fn set_quote(&mut self, quote: u8) -> &mut Self {
        self.quote = quote;
        self
    }

    /// Sets whether author and title values are trimmed before use.
    ///
    /// Off by default: author grouping compares raw text, so trailing
    /// whitespace distinguishes two authors unless trimming is enabled.
    pub fn set_trim(&mut self, trim: bool) -> &mut Self {
        self.trim = trim;
        self
    }

    /// Gets the header of the identifier column
    pub fn output_column(&self) -> &str {
        &self.output_column
    }

    /// Finds the field name for a given header using O(1) lookup
    pub(crate) fn get_field_for_header(&self, header: &str) -> Option<&str> {
        let header_lower = header.trim().to_lowercase();
        self.reverse_map.get(&header_lower).map(|s| s.as_str())
    }

    /// Aliases of a field, for error messages
    pub(crate) fn aliases_of(&self, field: &str) -> String {
        self.header_map
            .get(field)
            .map(|aliases| aliases.join(", "))
            .unwrap_or_default()
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), String> {
        for field in [AUTHOR_FIELD, TITLE_FIELD] {
            match self.header_map.get(field) {
                None => return Err(format!("Field '{}' has no mapping", field)),
                Some(aliases) if aliases.is_empty() => {
                    return Err(format!("Field '{}' has no aliases defined", field));
                }
                Some(aliases) => {
                    if aliases.iter().any(|a| a.trim().is_empty()) {
                        return Err(format!("Empty alias found for field '{}'", field));
                    }
                }
            }
        }

        if self.output_column.trim().is_empty() {
            return Err("Output column header cannot be empty".to_string());
        }
        if self.get_field_for_header(&self.output_column).is_some() {
            return Err(format!(
                "Output column '{}' collides with an input column alias",
                self.output_column
            ));
        }

        // Check for invalid delimiter characters
        if self.delimiter == b'\n' || self.delimiter == b'\r' {
            return Err("Delimiter cannot be a newline character".to_string());
        }
        if self.delimiter == self.quote {
            return Err("Delimiter and quote character must differ".to_string());
        }

        // Check for duplicate aliases across different fields
        let mut all_aliases = HashMap::new();
        for (field, aliases) in &self.header_map {
            for alias in aliases {
                let alias_lower = alias.trim().to_lowercase();
                if let Some(existing_field) = all_aliases.get(&alias_lower)
                    && existing_field != field
                {
                    return Err(format!(
                        "Alias '{}' is mapped to both '{}' and '{}'",
                        alias, existing_field, field
                    ));
                }
                all_aliases.insert(alias_lower, field.clone());
            }
        }

        Ok(())
    }
}
