//! Batch identifier generation.
//!
//! Author and title tokens depend only on their own record, so they are
//! computed independently (in parallel with the `parallel` feature). The
//! sequence numbers are then assigned in one ordered pass and paired with the
//! tokens, so the output never depends on how the token work was scheduled.
//!
//! ```
//! use bookid::{IdGenerator, Record};
//!
//! let records = vec![
//!     Record::new(1, "Austin, Jane", "The Lord of Rings"),
//!     Record::new(2, "Austin, Jane", "Emma"),
//! ];
//!
//! let assigned = IdGenerator::new().generate_all(&records).unwrap();
//! assert_eq!(assigned[0].identifier.as_str(), "JA_LotR_01");
//! assert_eq!(assigned[1].identifier.as_str(), "JA_E_02");
//! ```

use crate::author::{AuthorFieldParser, AuthorToken};
use crate::error::{BatchError, RecordError, fields};
use crate::identifier::compose;
use crate::name::NameConfig;
use crate::sequence::SequenceCounter;
use crate::title::{TitleAcronymizer, TitleConfig, TitleToken};
use crate::{AssignedIdentifier, Record, RecordOutcome};
use serde::{Deserialize, Serialize};

/// Configuration options for an identifier run.
///
/// # Examples
///
/// ```
/// use bookid::generator::IdGeneratorConfig;
///
/// let config = IdGeneratorConfig {
///     run_in_parallel: false,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdGeneratorConfig {
    /// Name decomposition and initials order.
    pub name: NameConfig,
    /// Title stopwords.
    pub title: TitleConfig,
    /// Whether to compute per-record tokens on the rayon thread pool.
    /// Ignored without the `parallel` feature.
    pub run_in_parallel: bool,
}

impl Default for IdGeneratorConfig {
    fn default() -> Self {
        Self {
            name: NameConfig::default(),
            title: TitleConfig::default(),
            run_in_parallel: cfg!(feature = "parallel"),
        }
    }
}

/// Derives identifiers for an ordered set of records.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    authors: AuthorFieldParser,
    titles: TitleAcronymizer,
    run_in_parallel: bool,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Creates a generator with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(IdGeneratorConfig::default())
    }

    #[must_use]
    pub fn with_config(config: IdGeneratorConfig) -> Self {
        Self {
            authors: AuthorFieldParser::with_config(config.name),
            titles: TitleAcronymizer::with_config(config.title),
            run_in_parallel: config.run_in_parallel,
        }
    }

    /// Computes one outcome per record, in input order.
    ///
    /// Failures are returned in place rather than aborting the batch; use
    /// [`IdGenerator::generate_all`] for an all-or-nothing result.
    pub fn generate(&self, records: &[Record]) -> Vec<RecordOutcome> {
        tracing::debug!(
            records = records.len(),
            parallel = self.run_in_parallel,
            "Generating identifiers"
        );

        let tokens = self.record_tokens(records);
        let mut counter = SequenceCounter::new();

        let outcomes: Vec<RecordOutcome> = records
            .iter()
            .zip(tokens)
            .map(|(record, tokens)| {
                let sequence = counter.next(&record.author_text);
                RecordOutcome {
                    row: record.row,
                    result: tokens.map(|(author, title)| compose(&author, &title, sequence)),
                }
            })
            .collect();

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        tracing::debug!(
            records = outcomes.len(),
            authors = counter.authors(),
            failed,
            "Generated identifiers"
        );
        outcomes
    }

    /// Computes every identifier, or reports every record that failed.
    ///
    /// # Errors
    ///
    /// Returns a [`BatchError`] listing all failed records in input order.
    pub fn generate_all(&self, records: &[Record]) -> Result<Vec<AssignedIdentifier>, BatchError> {
        let mut assigned = Vec::with_capacity(records.len());
        let mut errors = Vec::new();

        for outcome in self.generate(records) {
            match outcome.result {
                Ok(identifier) => assigned.push(AssignedIdentifier {
                    row: outcome.row,
                    identifier,
                }),
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() {
            Ok(assigned)
        } else {
            Err(BatchError { errors })
        }
    }

    fn record_tokens(&self, records: &[Record]) -> Vec<Result<(AuthorToken, TitleToken), RecordError>> {
        #[cfg(feature = "parallel")]
        if self.run_in_parallel {
            use rayon::prelude::*;

            return records.par_iter().map(|r| self.tokens(r)).collect();
        }

        records.iter().map(|r| self.tokens(r)).collect()
    }

    fn tokens(&self, record: &Record) -> Result<(AuthorToken, TitleToken), RecordError> {
        let author = self.authors.parse(&record.author_text).map_err(|error| {
            tracing::debug!(row = record.row, %error, "Rejected author field");
            let err = RecordError::new(record.row, fields::AUTHOR, &record.author_text, error);
            match record.span {
                Some(span) => err.with_span(span),
                None => err,
            }
        })?;
        let title = self.titles.acronym(&record.title_text);
        Ok((author, title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SourceSpan, ValueError};
    use pretty_assertions::assert_eq;

    fn sequential() -> IdGenerator {
        IdGenerator::with_config(IdGeneratorConfig {
            run_in_parallel: false,
            ..Default::default()
        })
    }

    fn identifiers(outcomes: &[RecordOutcome]) -> Vec<String> {
        outcomes
            .iter()
            .map(|o| match &o.result {
                Ok(id) => id.to_string(),
                Err(e) => format!("error: {}", e.error),
            })
            .collect()
    }

    #[test]
    fn test_end_to_end_single_author() {
        let records = vec![
            Record::new(1, "Austin, Jane", "The Lord of Rings"),
            Record::new(2, "Austin, Jane", "Emma"),
        ];
        let outcomes = sequential().generate(&records);
        assert_eq!(identifiers(&outcomes), vec!["JA_LotR_01", "JA_E_02"]);
    }

    #[test]
    fn test_end_to_end_multiple_authors() {
        let records = vec![Record::new(
            1,
            "Sanderson, Brandon & Patterson, Janci",
            "101 Dalmatians",
        )];
        let outcomes = sequential().generate(&records);
        assert_eq!(identifiers(&outcomes), vec!["BS&JP_101D_01"]);
    }

    #[test]
    fn test_raw_author_text_groups_counts() {
        let records = vec![
            Record::new(1, "Austin, Jane", "Emma"),
            Record::new(2, "Jane Austin", "Persuasion"),
            Record::new(3, "Austin, Jane", "Sense and Sensibility"),
            Record::new(4, "Plato", "The Republic"),
        ];
        let outcomes = sequential().generate(&records);
        assert_eq!(
            identifiers(&outcomes),
            vec!["JA_E_01", "JA_P_01", "JA_SaS_02", "P_R_01"]
        );
    }

    #[test]
    fn test_failed_record_keeps_position_and_context() {
        let records = vec![
            Record::new(10, "Austin, Jane", "Emma"),
            Record::new(11, "Austin, Jane &", "Persuasion").with_span(SourceSpan::new(40, 70)),
            Record::new(12, "Austin, Jane", "Mansfield Park"),
        ];
        let outcomes = sequential().generate(&records);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[1].row, 11);

        let err = outcomes[1].result.as_ref().unwrap_err();
        assert_eq!(err.field, fields::AUTHOR);
        assert_eq!(err.value, "Austin, Jane &");
        assert_eq!(err.span, Some(SourceSpan::new(40, 70)));
        assert!(matches!(err.error, ValueError::InvalidAuthorField { piece: 1, .. }));

        assert_eq!(outcomes[2].result.as_ref().unwrap().as_str(), "JA_MP_02");
    }

    #[test]
    fn test_generate_all_reports_every_failure() {
        let records = vec![
            Record::new(2, "", "Untitled"),
            Record::new(3, "Plato", "Republic"),
            Record::new(4, "...", "Dots"),
        ];
        let err = sequential().generate_all(&records).unwrap_err();
        let rows: Vec<usize> = err.errors.iter().map(|e| e.row).collect();
        assert_eq!(rows, vec![2, 4]);
        assert!(matches!(err.errors[0].error, ValueError::InvalidAuthorField { .. }));
        assert!(matches!(err.errors[1].error, ValueError::InvalidAuthorName { .. }));
    }

    #[test]
    fn test_generate_all_success() {
        let records = vec![Record::new(7, "Plato", "")];
        let assigned = sequential().generate_all(&records).unwrap();
        assert_eq!(
            assigned,
            vec![AssignedIdentifier {
                row: 7,
                identifier: crate::Identifier::parse("P__01").unwrap(),
            }]
        );
    }

    #[test]
    fn test_empty_batch() {
        assert!(sequential().generate(&[]).is_empty());
        assert!(sequential().generate_all(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_idempotent() {
        let records: Vec<Record> = (0..50)
            .map(|i| Record::new(i, format!("Author {}", i % 7), format!("Volume {i}")))
            .collect();
        let generator = sequential();
        assert_eq!(
            identifiers(&generator.generate(&records)),
            identifiers(&generator.generate(&records))
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let records: Vec<Record> = (0..500)
            .map(|i| {
                let author = match i % 5 {
                    0 => "Austin, Jane".to_string(),
                    1 => "Sanderson, Brandon & Patterson, Janci".to_string(),
                    2 => format!("Writer Number{}", i % 11),
                    3 => "broken &".to_string(),
                    _ => "Plato".to_string(),
                };
                Record::new(i, author, format!("The {i} Tales of Nowhere"))
            })
            .collect();

        let parallel = IdGenerator::with_config(IdGeneratorConfig {
            run_in_parallel: true,
            ..Default::default()
        });
        assert_eq!(
            identifiers(&parallel.generate(&records)),
            identifiers(&sequential().generate(&records))
        );
    }
}
