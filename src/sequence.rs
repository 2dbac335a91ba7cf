//! Per-author occurrence counting.
//!
//! Records are grouped by their raw author text, compared exactly and
//! case-sensitively. Two spellings of the same person ("Austin, Jane" and
//! "Jane Austin") are counted as different authors even though they share
//! initials.

use crate::Record;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Minimum number of digits when a [`SequenceValue`] is displayed.
pub const SEQUENCE_WIDTH: usize = 2;

/// 1-based occurrence index of a record within its author group.
///
/// Displays zero-padded to two digits ("01", "42") and grows past that
/// without truncation ("100"). Ordering is numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceValue(u32);

impl SequenceValue {
    /// First occurrence.
    pub const FIRST: SequenceValue = SequenceValue(1);

    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SequenceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:0width$}", self.0, width = SEQUENCE_WIDTH)
    }
}

impl std::str::FromStr for SequenceValue {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(SequenceValue)
    }
}

/// Running count keyed by raw author text, owned by a single run.
///
/// # Examples
///
/// ```
/// use bookid::sequence::SequenceCounter;
///
/// let mut counter = SequenceCounter::new();
/// assert_eq!(counter.next("Austin, Jane").to_string(), "01");
/// assert_eq!(counter.next("Plato").to_string(), "01");
/// assert_eq!(counter.next("Austin, Jane").to_string(), "02");
/// ```
#[derive(Debug, Default)]
pub struct SequenceCounter<'a> {
    counts: HashMap<&'a str, u32>,
}

impl<'a> SequenceCounter<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one more record for `author_text` and returns its index.
    pub fn next(&mut self, author_text: &'a str) -> SequenceValue {
        let count = self.counts.entry(author_text).or_insert(0);
        *count += 1;
        SequenceValue(*count)
    }

    /// Number of distinct raw author texts seen so far.
    pub fn authors(&self) -> usize {
        self.counts.len()
    }

    /// Assigns a value to every record in input order.
    pub fn assign(records: &'a [Record]) -> Vec<SequenceValue> {
        let mut counter = Self::new();
        records
            .iter()
            .map(|record| counter.next(&record.author_text))
            .collect()
    }
}
