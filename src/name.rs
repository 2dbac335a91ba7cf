//! Personal-name decomposition and initials.
//!
//! A name fragment is decomposed into a [`ParsedAuthor`] with an explicit,
//! documented algorithm:
//!
//! 1. Leading honorifics ("Dr.", "Prof", ...) are dropped.
//! 2. If the fragment contains a comma it is read as `Last, First Middle`,
//!    after discarding comma pieces that are name suffixes ("Jr.", "III").
//!    When nothing but suffixes follows the comma (`Jane Austin, Jr.`) the
//!    part before the comma is decomposed as below.
//! 3. Otherwise it is read as `First Middle Last`, ignoring trailing suffixes.
//! 4. A single token is taken as the given name alone.
//!
//! Only the first given name and the family name contribute to the initials.

use crate::error::ValueError;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Honorifics skipped at the start of a name.
pub(crate) const DEFAULT_TITLES: &[&str] = &["dr", "mr", "mrs", "ms", "miss", "prof", "sir", "rev"];

/// Generational and academic suffixes skipped at the end of a name.
pub(crate) const DEFAULT_SUFFIXES: &[&str] = &["jr", "sr", "ii", "iii", "iv", "phd", "md", "esq"];

/// Order in which the two initials are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InitialsOrder {
    /// Given name first: "Jane Austin" -> "JA"
    #[default]
    GivenFamily,
    /// Family name first: "Jane Austin" -> "AJ"
    FamilyGiven,
}

/// Immutable name-formatting settings shared by every worker in a run.
///
/// # Examples
///
/// ```
/// use bookid::name::{InitialsOrder, NameConfig};
///
/// let mut config = NameConfig::new();
/// config
///     .set_order(InitialsOrder::FamilyGiven)
///     .add_titles(vec!["Capt".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameConfig {
    /// Initials order
    pub(crate) order: InitialsOrder,
    /// Normalized honorifics (lowercase, no periods)
    pub(crate) titles: Vec<String>,
    /// Normalized suffixes (lowercase, no periods)
    pub(crate) suffixes: Vec<String>,
}

impl Default for NameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl NameConfig {
    /// Creates a configuration with given-then-family order and the default
    /// title and suffix lists.
    #[must_use]
    pub fn new() -> Self {
        Self {
            order: InitialsOrder::default(),
            titles: DEFAULT_TITLES.iter().map(|s| s.to_string()).collect(),
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Sets the initials order
    pub fn set_order(&mut self, order: InitialsOrder) -> &mut Self {
        self.order = order;
        self
    }

    /// Adds honorifics to skip at the start of a name
    pub fn add_titles(&mut self, titles: Vec<String>) -> &mut Self {
        self.titles
            .extend(titles.iter().map(|t| normalize_affix(t)));
        self
    }

    /// Adds suffixes to skip at the end of a name
    pub fn add_suffixes(&mut self, suffixes: Vec<String>) -> &mut Self {
        self.suffixes
            .extend(suffixes.iter().map(|s| normalize_affix(s)));
        self
    }

    /// Gets the initials order
    pub fn order(&self) -> InitialsOrder {
        self.order
    }

    fn is_title(&self, token: &str) -> bool {
        let token = normalize_affix(token);
        self.titles.iter().any(|t| *t == token)
    }

    fn is_suffix(&self, token: &str) -> bool {
        let token = normalize_affix(token);
        self.suffixes.iter().any(|s| *s == token)
    }
}

/// "Ph.D." -> "phd", "Jr." -> "jr"
fn normalize_affix(token: &str) -> String {
    token
        .trim()
        .chars()
        .filter(|c| *c != '.')
        .collect::<String>()
        .to_lowercase()
}

/// Given and family name extracted from one name fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedAuthor {
    /// First given name, without middle names.
    pub given_name: Option<String>,
    /// Family name. May contain several words in comma form ("van Gogh, Vincent").
    pub family_name: Option<String>,
}

impl ParsedAuthor {
    /// Decomposes a single name fragment.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidAuthorName`] if the fragment is blank.
    pub fn parse(fragment: &str, config: &NameConfig) -> Result<Self, ValueError> {
        let trimmed = fragment.trim();
        if trimmed.is_empty() {
            return Err(ValueError::InvalidAuthorName {
                name: fragment.to_string(),
            });
        }

        let parsed = if trimmed.contains(',') {
            parse_comma_form(trimmed, config)
        } else {
            parse_whitespace_form(trimmed, config)
        };

        if parsed.given_name.is_none() && parsed.family_name.is_none() {
            return Err(ValueError::InvalidAuthorName {
                name: fragment.to_string(),
            });
        }
        Ok(parsed)
    }

    /// Initials in the configured order. Missing components are skipped, so a
    /// single-token name yields a single initial.
    pub fn initials(&self, order: InitialsOrder) -> CompactString {
        let given = self.given_name.as_deref().and_then(initial_of);
        let family = self.family_name.as_deref().and_then(initial_of);
        let (first, second) = match order {
            InitialsOrder::GivenFamily => (given, family),
            InitialsOrder::FamilyGiven => (family, given),
        };
        first.into_iter().chain(second).flatten().collect()
    }
}

/// Uppercased first alphanumeric character of a name component.
fn initial_of(component: &str) -> Option<std::char::ToUppercase> {
    component
        .chars()
        .find(|c| c.is_alphanumeric())
        .map(|c| c.to_uppercase())
}

fn parse_comma_form(name: &str, config: &NameConfig) -> ParsedAuthor {
    let mut pieces = name.split(',').map(str::trim);
    let head = pieces.next().unwrap_or_default();
    let rest: Vec<&str> = pieces
        .filter(|p| !p.is_empty() && !config.is_suffix(p))
        .collect();

    match rest.first() {
        Some(given_part) => {
            let given = strip_titles(given_part.split_whitespace().collect(), config)
                .first()
                .map(|s| s.to_string());
            ParsedAuthor {
                given_name: given,
                family_name: non_empty(head),
            }
        }
        // "Jane Austin, Jr." reads as a plain name; "Austin," is a bare family name
        None if head.split_whitespace().count() > 1 => parse_whitespace_form(head, config),
        None => ParsedAuthor {
            given_name: None,
            family_name: non_empty(head),
        },
    }
}

fn parse_whitespace_form(name: &str, config: &NameConfig) -> ParsedAuthor {
    let mut tokens = strip_titles(name.split_whitespace().collect(), config);
    while tokens.len() > 1 && tokens.last().is_some_and(|t| config.is_suffix(t)) {
        tokens.pop();
    }

    match tokens.as_slice() {
        [] => ParsedAuthor::default(),
        [sole] => ParsedAuthor {
            given_name: Some(sole.to_string()),
            family_name: None,
        },
        [first, .., last] => ParsedAuthor {
            given_name: Some(first.to_string()),
            family_name: Some(last.to_string()),
        },
    }
}

fn strip_titles<'a>(tokens: Vec<&'a str>, config: &NameConfig) -> Vec<&'a str> {
    let skip = tokens
        .iter()
        .take_while(|t| config.is_title(t))
        .count()
        .min(tokens.len().saturating_sub(1));
    tokens[skip..].to_vec()
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Turns one personal name into its initials token ("Jane Austin" -> "JA").
#[derive(Debug, Clone, Default)]
pub struct NameInitializer {
    config: NameConfig,
}

impl NameInitializer {
    /// Creates an initializer with the default [`NameConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an initializer with a custom configuration.
    #[must_use]
    pub fn with_config(config: NameConfig) -> Self {
        Self { config }
    }

    /// Gets a reference to the current configuration
    pub fn config(&self) -> &NameConfig {
        &self.config
    }

    /// Decomposes `fragment` without reducing it to initials.
    pub fn parse(&self, fragment: &str) -> Result<ParsedAuthor, ValueError> {
        ParsedAuthor::parse(fragment, &self.config)
    }

    /// Computes the initials for one name fragment.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidAuthorName`] if the fragment is blank or
    /// contains no alphanumeric character in any name component.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookid::name::NameInitializer;
    ///
    /// let names = NameInitializer::new();
    /// assert_eq!(names.initials("Austin, Jane").unwrap(), "JA");
    /// assert_eq!(names.initials("Jane Austin").unwrap(), "JA");
    /// ```
    pub fn initials(&self, fragment: &str) -> Result<CompactString, ValueError> {
        let initials = self.parse(fragment)?.initials(self.config.order);
        if initials.is_empty() {
            return Err(ValueError::InvalidAuthorName {
                name: fragment.to_string(),
            });
        }
        Ok(initials)
    }
}
