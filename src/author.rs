//! Author-field parsing.
//!
//! A raw author field holds one or more names joined by `&`
//! ("Sanderson, Brandon & Patterson, Janci"). Each name is reduced to its
//! initials and the results are joined back with a bare `&`.

use crate::error::ValueError;
use crate::name::{NameConfig, NameInitializer};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Separator between authors, both in the raw field and in the token.
pub const AUTHOR_SEPARATOR: char = '&';

/// `&`-joined initials of every author on a record, e.g. `BS&JP`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorToken(String);

impl AuthorToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Initials of each author, in field order.
    pub fn initials(&self) -> impl Iterator<Item = &str> {
        self.0.split(AUTHOR_SEPARATOR)
    }
}

impl std::fmt::Display for AuthorToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parser from a raw author field to an [`AuthorToken`].
///
/// # Examples
///
/// ```
/// use bookid::author::AuthorFieldParser;
///
/// let parser = AuthorFieldParser::new();
/// let token = parser.parse("Sanderson, Brandon & Patterson, Janci").unwrap();
/// assert_eq!(token.as_str(), "BS&JP");
/// ```
#[derive(Debug, Clone, Default)]
pub struct AuthorFieldParser {
    names: NameInitializer,
}

impl AuthorFieldParser {
    /// Creates a parser with the default [`NameConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser whose names are initialized with `config`.
    #[must_use]
    pub fn with_config(config: NameConfig) -> Self {
        Self {
            names: NameInitializer::with_config(config),
        }
    }

    /// Parses a raw author field.
    ///
    /// # Errors
    ///
    /// - [`ValueError::InvalidAuthorField`] if any piece is empty after
    ///   trimming (leading, trailing or doubled `&`, or a blank field).
    /// - [`ValueError::InvalidAuthorName`] if a piece has no usable initial.
    pub fn parse(&self, field: &str) -> Result<AuthorToken, ValueError> {
        let initials = field
            .split(AUTHOR_SEPARATOR)
            .map(str::trim)
            .enumerate()
            .map(|(piece, name)| {
                if name.is_empty() {
                    return Err(ValueError::InvalidAuthorField {
                        field: field.to_string(),
                        piece,
                    });
                }
                self.names.initials(name)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AuthorToken(initials.iter().join("&")))
    }
}
