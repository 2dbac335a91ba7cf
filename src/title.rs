//! Title-to-acronym reduction.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Maximal runs of Unicode word characters, excluding underscore.
static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\W_]+").unwrap());

/// Default stopwords dropped when they open a title.
pub(crate) const DEFAULT_LEADING_STOPWORDS: &[&str] = &["the"];

/// Acronym of a title: first letters of words, numerals kept whole.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TitleToken(String);

impl TitleToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for TitleToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Settings for [`TitleAcronymizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleConfig {
    /// Lowercased words dropped when they are the first token of a title
    pub(crate) leading_stopwords: Vec<String>,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TitleConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            leading_stopwords: DEFAULT_LEADING_STOPWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Replaces the leading stopword list
    pub fn set_leading_stopwords(&mut self, stopwords: Vec<String>) -> &mut Self {
        self.leading_stopwords = stopwords.iter().map(|s| s.to_lowercase()).collect();
        self
    }

    fn is_leading_stopword(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        self.leading_stopwords.iter().any(|s| *s == token)
    }
}

/// Reduces titles to [`TitleToken`]s.
///
/// Tokens are maximal runs of letters and digits; punctuation, whitespace and
/// underscores separate them. A leading "The" is dropped. Purely alphabetic
/// tokens contribute their first character with its case unchanged, anything
/// containing a digit is kept whole.
///
/// # Examples
///
/// ```
/// use bookid::title::TitleAcronymizer;
///
/// let titles = TitleAcronymizer::new();
/// assert_eq!(titles.acronym("The Lord of Rings").as_str(), "LotR");
/// assert_eq!(titles.acronym("101 Dalmatians").as_str(), "101D");
/// assert_eq!(titles.acronym("").as_str(), "");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TitleAcronymizer {
    config: TitleConfig,
}

impl TitleAcronymizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: TitleConfig) -> Self {
        Self { config }
    }

    /// Computes the acronym of `title`. Never fails; a title without word
    /// characters yields an empty token.
    pub fn acronym(&self, title: &str) -> TitleToken {
        let mut words = WORD_REGEX.find_iter(title).map(|m| m.as_str()).peekable();

        if words
            .peek()
            .is_some_and(|first| self.config.is_leading_stopword(first))
        {
            words.next();
        }

        let mut acronym = String::new();
        for word in words {
            if word.chars().all(char::is_alphabetic) {
                acronym.extend(word.chars().next());
            } else {
                acronym.push_str(word);
            }
        }
        TitleToken(acronym)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("The Lord of Rings", "LotR")]
    #[case("101 Dalmatians", "101D")]
    #[case("", "")]
    #[case("The", "")]
    #[case("the", "")]
    #[case("THE END", "E")]
    #[case("Emma", "E")]
    #[case("Catch-22", "C22")]
    #[case("Harry Potter and the Chamber of Secrets", "HPatCoS")]
    #[case("Nineteen Eighty-Four", "NEF")]
    #[case("2001: A Space Odyssey", "2001ASO")]
    #[case("Fahrenheit 451", "F451")]
    #[case("R2D2 returns", "R2D2r")]
    #[case("Theory of Everything", "ToE")]
    #[case("A Tale of The Two Cities", "AToTTC")]
    #[case("snake_case title", "sct")]
    #[case("L'Étranger", "LÉ")]
    #[case("...!?", "")]
    #[case("  The   Hobbit  ", "H")]
    fn test_acronym(#[case] title: &str, #[case] expected: &str) {
        let titles = TitleAcronymizer::new();
        assert_eq!(titles.acronym(title).as_str(), expected);
    }

    #[test]
    fn test_token_never_contains_underscore() {
        let titles = TitleAcronymizer::new();
        for title in ["__init__", "a_b_c", "_1_2_", "The_Hobbit"] {
            assert!(!titles.acronym(title).as_str().contains('_'), "{title}");
        }
    }

    #[test]
    fn test_only_first_token_is_a_stopword() {
        let titles = TitleAcronymizer::new();
        assert_eq!(titles.acronym("The The").as_str(), "T");
    }

    #[test]
    fn test_custom_stopwords() {
        let mut config = TitleConfig::new();
        config.set_leading_stopwords(vec!["The".to_string(), "A".to_string()]);
        let titles = TitleAcronymizer::with_config(config);
        assert_eq!(titles.acronym("A Game of Thrones").as_str(), "GoT");
        assert_eq!(titles.acronym("The Hobbit").as_str(), "H");
    }

    #[test]
    fn test_empty_stopwords_keep_leading_the() {
        let mut config = TitleConfig::new();
        config.set_leading_stopwords(Vec::new());
        let titles = TitleAcronymizer::with_config(config);
        assert_eq!(titles.acronym("The Hobbit").as_str(), "TH");
    }
}
