//! Identifier composition and decomposition.

use crate::author::AuthorToken;
use crate::sequence::SequenceValue;
use crate::title::TitleToken;
use serde::{Deserialize, Serialize};

/// Separator between the three identifier fields. Never produced inside a token.
pub const FIELD_SEPARATOR: char = '_';

/// `AuthorToken_TitleToken_SequenceValue`, e.g. `JA_LotR_01`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

/// Borrowed view of the three fields of an [`Identifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierParts<'a> {
    pub author: &'a str,
    pub title: &'a str,
    pub sequence: SequenceValue,
}

impl Identifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Splits the identifier back into its fields.
    ///
    /// Returns `None` for strings that were not produced by [`compose`].
    ///
    /// ```
    /// use bookid::identifier::Identifier;
    ///
    /// let id = Identifier::parse("BS&JP_101D_01").unwrap();
    /// let parts = id.parts().unwrap();
    /// assert_eq!(parts.author, "BS&JP");
    /// assert_eq!(parts.title, "101D");
    /// assert_eq!(parts.sequence.get(), 1);
    /// ```
    pub fn parts(&self) -> Option<IdentifierParts<'_>> {
        let mut fields = self.0.split(FIELD_SEPARATOR);
        let (author, title, sequence) = (fields.next()?, fields.next()?, fields.next()?);
        if fields.next().is_some() || author.is_empty() {
            return None;
        }
        if !sequence.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value: SequenceValue = sequence.parse().ok()?;
        // Only the canonical rendering of a count of at least one
        if value < SequenceValue::FIRST || value.to_string() != sequence {
            return None;
        }
        Some(IdentifierParts {
            author,
            title,
            sequence: value,
        })
    }

    /// Accepts a stored identifier if it has the composed shape.
    pub fn parse(s: &str) -> Option<Self> {
        let id = Identifier(s.to_string());
        id.parts().is_some().then_some(id)
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Joins the three tokens of one record.
pub fn compose(author: &AuthorToken, title: &TitleToken, sequence: SequenceValue) -> Identifier {
    Identifier(format!(
        "{author}{FIELD_SEPARATOR}{title}{FIELD_SEPARATOR}{sequence}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::author::AuthorFieldParser;
    use crate::sequence::SequenceCounter;
    use crate::title::TitleAcronymizer;
    use pretty_assertions::assert_eq;

    fn id(author: &str, title: &str, repeats: usize) -> Identifier {
        let author_token = AuthorFieldParser::new().parse(author).unwrap();
        let title_token = TitleAcronymizer::new().acronym(title);
        let mut counter = SequenceCounter::new();
        let mut sequence = counter.next(author);
        for _ in 1..repeats {
            sequence = counter.next(author);
        }
        compose(&author_token, &title_token, sequence)
    }

    #[test]
    fn test_compose() {
        assert_eq!(id("Austin, Jane", "The Lord of Rings", 1).as_str(), "JA_LotR_01");
        assert_eq!(
            id("Sanderson, Brandon & Patterson, Janci", "101 Dalmatians", 1).as_str(),
            "BS&JP_101D_01"
        );
        assert_eq!(id("Plato", "Republic", 12).as_str(), "P_R_12");
    }

    #[test]
    fn test_compose_empty_title() {
        let composed = id("Austin, Jane", "", 1);
        assert_eq!(composed.as_str(), "JA__01");
        let parts = composed.parts().unwrap();
        assert_eq!(parts.title, "");
    }

    #[test]
    fn test_parts_round_trip() {
        let composed = id("Austin, Jane", "Emma", 2);
        assert_eq!(
            composed.parts(),
            Some(IdentifierParts {
                author: "JA",
                title: "E",
                sequence: "02".parse().unwrap(),
            })
        );
    }

    #[test]
    fn test_parse_rejects_foreign_strings() {
        assert!(Identifier::parse("JA_LotR_01").is_some());
        assert!(Identifier::parse("JA_LotR_100").is_some());
        assert!(Identifier::parse("JA_LotR").is_none());
        assert!(Identifier::parse("JA_LotR_1").is_none());
        assert!(Identifier::parse("JA_Lo_tR_01").is_none());
        assert!(Identifier::parse("_LotR_01").is_none());
        assert!(Identifier::parse("JA_LotR_xx").is_none());
    }

    #[test]
    fn test_parse_rejects_non_canonical_sequence() {
        assert!(Identifier::parse("JA_T_00").is_none());
        assert!(Identifier::parse("JA_T_000").is_none());
        assert!(Identifier::parse("JA_T_007").is_none());
        assert!(Identifier::parse("JA_T_0100").is_none());
        assert!(Identifier::parse("JA_T_+1").is_none());

        let id = Identifier::parse("JA_T_07").unwrap();
        let parts = id.parts().unwrap();
        assert_eq!(parts.sequence.get(), 7);
        assert_eq!(parts.sequence.to_string(), "07");
    }

    #[test]
    fn test_ordering_follows_text() {
        let mut ids = vec![id("Plato", "Republic", 2), id("Austin, Jane", "Emma", 1)];
        ids.sort();
        assert_eq!(ids[0].as_str(), "JA_E_01");
    }
}
