//! # Candidate Keys
//!
//! Derives the raw-data keys that may hold the value of a constructor parameter.
//!
//! For a parameter name `p` the candidates are tried in this order:
//!
//! 1. `underscored(p)` - snake_case conversion (`userId` -> `user_id`)
//! 2. `separate_digits(underscored(p))` - letters/digits split (`alpha2` -> `alpha_2`)
//! 3. `p` as declared
//!
//! ```rust
//! use hydrator::keys::candidate_keys;
//!
//! let keys = candidate_keys("addressLine1");
//! assert_eq!(
//!     keys.as_slice(),
//!     &["address_line1", "address_line_1", "addressLine1"]
//! );
//! ```

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

fn uppercase_boundary() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\B([A-Z])").expect("uppercase boundary pattern is valid"))
}

fn separator_run() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[-_\s]+").expect("separator pattern is valid"))
}

fn letters_then_digits() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([a-z]+)([0-9]+)").expect("digit pattern is valid"))
}

/// Convert an identifier to lowercase words joined by underscores.
///
/// Uppercase letters that follow a word character start a new word, then the
/// whole name is lowercased and any run of `-`, `_` or whitespace collapses
/// into a single `_`. Digits are left attached to the preceding word.
pub fn underscored(name: &str) -> String {
    let split = uppercase_boundary().replace_all(name.trim(), "_${1}");
    let lowered = split.to_lowercase();
    separator_run().replace_all(&lowered, "_").into_owned()
}

/// Insert `_` between a run of lowercase letters and the digits that follow it.
pub fn separate_digits(name: &str) -> String {
    letters_then_digits()
        .replace_all(name, "${1}_${2}")
        .into_owned()
}

/// Ordered raw-data keys to try for one constructor parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateKeys {
    keys: [String; 3],
}

impl CandidateKeys {
    pub fn for_parameter(parameter: &str) -> Self {
        let snake = underscored(parameter);
        let digits = separate_digits(&snake);
        Self {
            keys: [snake, digits, parameter.to_string()],
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.keys
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl fmt::Display for CandidateKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.keys.join(", "))
    }
}

/// Candidate keys for `parameter`, in priority order
pub fn candidate_keys(parameter: &str) -> CandidateKeys {
    CandidateKeys::for_parameter(parameter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underscored_camel_and_pascal_case() {
        assert_eq!(underscored("userId"), "user_id");
        assert_eq!(underscored("FirstName"), "first_name");
        assert_eq!(underscored("createdAtTimestamp"), "created_at_timestamp");
    }

    #[test]
    fn test_underscored_leaves_snake_case_alone() {
        assert_eq!(underscored("user_id"), "user_id");
        assert_eq!(underscored("x"), "x");
    }

    #[test]
    fn test_underscored_collapses_separators() {
        assert_eq!(underscored("user-name"), "user_name");
        assert_eq!(underscored("  user  name "), "user_name");
        assert_eq!(underscored("user_Name"), "user_name");
    }

    #[test]
    fn test_underscored_keeps_digits_attached() {
        assert_eq!(underscored("alpha2"), "alpha2");
        assert_eq!(underscored("addressLine1"), "address_line1");
    }

    #[test]
    fn test_separate_digits() {
        assert_eq!(separate_digits("alpha2"), "alpha_2");
        assert_eq!(separate_digits("address_line12"), "address_line_12");
        assert_eq!(separate_digits("v2beta3"), "v_2beta_3");
        assert_eq!(separate_digits("plain"), "plain");
    }

    #[test]
    fn test_candidate_order() {
        let keys = candidate_keys("alpha2");
        let ordered: Vec<&str> = keys.iter().collect();
        assert_eq!(ordered, vec!["alpha2", "alpha_2", "alpha2"]);

        let keys = candidate_keys("userId");
        let ordered: Vec<&str> = keys.iter().collect();
        assert_eq!(ordered, vec!["user_id", "user_id", "userId"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            candidate_keys("userId").to_string(),
            "[user_id, user_id, userId]"
        );
    }
}
