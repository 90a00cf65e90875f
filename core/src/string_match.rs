//! String matching — the string-valued collaborator of the match engine
//!
//! The engine delegates string comparison through the [`StringMatch`] seam
//! and adopts the verdict unmodified. [`StringMatcher`] is the stock
//! implementation: exact/prefix/suffix/contains with optional ASCII
//! case-insensitivity, plus linear-time regex.

use std::fmt::Debug;

/// Collaborator seam for string predicates.
///
/// Implementations must be `Send + Sync`: a compiled rule is shared across
/// concurrent evaluations.
pub trait StringMatch: Send + Sync + Debug {
    /// Check whether the given string matches.
    fn matches(&self, value: &str) -> bool;
}

impl StringMatch for Box<dyn StringMatch> {
    fn matches(&self, value: &str) -> bool {
        (**self).matches(value)
    }
}

/// Stock string matcher covering the five matching strategies.
///
/// # Example
///
/// ```
/// use metka::{StringMatch, StringMatcher};
///
/// let matcher = StringMatcher::prefix("pr", false);
/// assert!(matcher.matches("pro"));
/// assert!(!matcher.matches("dev"));
///
/// let matcher = StringMatcher::regex(r"^user-\d+$").unwrap();
/// assert!(matcher.matches("user-123"));
/// assert!(!matcher.matches("user-abc"));
/// ```
#[derive(Debug, Clone)]
pub enum StringMatcher {
    /// Exact string equality.
    Exact { value: String, ignore_case: bool },
    /// String prefix match.
    Prefix { value: String, ignore_case: bool },
    /// String suffix match.
    Suffix { value: String, ignore_case: bool },
    /// Substring contains match.
    Contains { value: String, ignore_case: bool },
    /// Regular expression match (RE2 semantics, linear time).
    Regex(regex::Regex),
}

impl StringMatcher {
    /// Create an exact match.
    #[must_use]
    pub fn exact(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::Exact {
            value: value.into(),
            ignore_case,
        }
    }

    /// Create a prefix match.
    #[must_use]
    pub fn prefix(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::Prefix {
            value: value.into(),
            ignore_case,
        }
    }

    /// Create a suffix match.
    #[must_use]
    pub fn suffix(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::Suffix {
            value: value.into(),
            ignore_case,
        }
    }

    /// Create a contains match.
    ///
    /// When `ignore_case` is true, the pattern is pre-lowercased at
    /// construction to avoid redundant allocation per match call.
    #[must_use]
    pub fn contains(value: impl Into<String>, ignore_case: bool) -> Self {
        let value = value.into();
        Self::Contains {
            value: if ignore_case {
                value.to_ascii_lowercase()
            } else {
                value
            },
            ignore_case,
        }
    }

    /// Create a regex match.
    ///
    /// Uses Rust's `regex` crate which guarantees linear time matching (no
    /// `ReDoS`).
    ///
    /// # Errors
    ///
    /// Returns `Err` if the regex pattern is invalid.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        regex::Regex::new(pattern).map(Self::Regex)
    }

    /// Create a case-insensitive regex match.
    ///
    /// Prepends `(?i)` to the pattern for case-insensitivity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the regex pattern is invalid.
    pub fn regex_ignore_case(pattern: &str) -> Result<Self, regex::Error> {
        regex::Regex::new(&format!("(?i){pattern}")).map(Self::Regex)
    }
}

impl StringMatch for StringMatcher {
    fn matches(&self, input: &str) -> bool {
        match self {
            Self::Exact { value, ignore_case } => {
                if *ignore_case {
                    input.eq_ignore_ascii_case(value)
                } else {
                    input == value
                }
            }
            Self::Prefix { value, ignore_case } => {
                if *ignore_case {
                    input
                        .get(..value.len())
                        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(value))
                } else {
                    input.starts_with(value.as_str())
                }
            }
            Self::Suffix { value, ignore_case } => {
                if *ignore_case {
                    input
                        .len()
                        .checked_sub(value.len())
                        .and_then(|start| input.get(start..))
                        .is_some_and(|suffix| suffix.eq_ignore_ascii_case(value))
                } else {
                    input.ends_with(value.as_str())
                }
            }
            Self::Contains { value, ignore_case } => {
                if *ignore_case {
                    // value is pre-lowercased at construction time
                    input.to_ascii_lowercase().contains(value.as_str())
                } else {
                    input.contains(value.as_str())
                }
            }
            Self::Regex(re) => re.is_match(input),
        }
    }
}
