//! Player name resolution.
//!
//! The UI takes "First Last" in any case; the store is keyed by
//! "Last, First" with each part capitalized.

use crate::error::{CoreError, Result};
use std::fmt;

/// A parsed two-token player name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerName {
    first: String,
    last: String,
}

impl PlayerName {
    /// Parses free text into a name.
    ///
    /// # Errors
    /// `CoreError::InvalidName` unless the input is exactly two
    /// whitespace-separated tokens.
    pub fn parse(raw: &str) -> Result<Self> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        match tokens.as_slice() {
            [first, last] => Ok(Self {
                first: capitalize(first),
                last: capitalize(last),
            }),
            _ => Err(CoreError::InvalidName(format!(
                "expected \"First Last\", got {:?} ({} tokens)",
                raw.trim(),
                tokens.len()
            ))),
        }
    }

    /// Store key, e.g. `"Skenes, Paul"`.
    pub fn query_key(&self) -> String {
        format!("{}, {}", self.last, self.first)
    }

    /// Scene title for a season, e.g. `"Paul Skenes, 2024"`.
    pub fn title(&self, season: i32) -> String {
        format!("{}, {}", self, season)
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.last)
    }
}

/// Upper-cases the first character and lower-cases the rest.
fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(head) => head
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_key_is_last_first() {
        let name = PlayerName::parse("paul skenes").unwrap();
        assert_eq!(name.query_key(), "Skenes, Paul");
        assert_eq!(name.to_string(), "Paul Skenes");
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let name = PlayerName::parse("  TARIK\t  skUBAL ").unwrap();
        assert_eq!(name.query_key(), "Skubal, Tarik");
        assert_eq!(name.title(2024), "Tarik Skubal, 2024");
    }

    #[test]
    fn test_wrong_token_counts_rejected() {
        for raw in ["", "   ", "Skenes", "Luis Garcia Jr.", "a b c d"] {
            let err = PlayerName::parse(raw).unwrap_err();
            assert!(matches!(err, CoreError::InvalidName(_)), "{:?}", raw);
        }
    }

    #[test]
    fn test_capitalize_mirrors_simple_title_case() {
        assert_eq!(capitalize("mcclanahan"), "Mcclanahan");
        assert_eq!(capitalize("o'NEIL"), "O'neil");
        assert_eq!(capitalize("édgar"), "Édgar");
        assert_eq!(capitalize(""), "");
    }
}
