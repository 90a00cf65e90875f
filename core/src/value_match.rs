//! `ValueMatcher` — Typed predicates over resolved metadata values
//!
//! A `ValueMatcher` combines a path-resolution outcome with one typed
//! condition to produce the final boolean. The whole evaluation is one
//! decision table: no state machine, no retries, no error path. Anything
//! that is not a clean match — unresolved path, type mismatch, container
//! where a primitive is expected — is `false`.

use crate::{NumberMatch, Resolution, StringMatch};

/// A typed value predicate. Exactly one condition per matcher — the sum
/// type makes an empty or doubled-up predicate unrepresentable at runtime;
/// the authored form is validated once at rule construction.
///
/// # Example
///
/// ```
/// use metka::{Resolution, MetadataValue, StringMatcher, ValueMatcher};
///
/// let predicate = ValueMatcher::string(StringMatcher::prefix("pr", false));
/// let value = MetadataValue::String("pro".into());
///
/// assert!(predicate.matches(Resolution::Found(&value)));
/// assert!(!predicate.matches(Resolution::NotFound));
/// ```
#[derive(Debug)]
pub enum ValueMatcher {
    /// Matches iff the resolved value is null.
    Null,

    /// Matches iff the resolved value is a bool equal to the literal.
    Bool(bool),

    /// Delegates a resolved number to the number collaborator.
    Double(Box<dyn NumberMatch>),

    /// Delegates a resolved string to the string collaborator.
    String(Box<dyn StringMatch>),

    /// Matches iff the path resolved to a primitive value. Lists and maps
    /// count as not-present. The flag is carried from the authored rule but
    /// never consulted; presence depends only on the resolved value's shape.
    Present(bool),
}

impl ValueMatcher {
    /// Wrap a number collaborator.
    pub fn double(matcher: impl NumberMatch + 'static) -> Self {
        Self::Double(Box::new(matcher))
    }

    /// Wrap a string collaborator.
    pub fn string(matcher: impl StringMatch + 'static) -> Self {
        Self::String(Box::new(matcher))
    }

    /// Evaluate this predicate against a resolution outcome.
    ///
    /// The decision table, in full:
    ///
    /// | Predicate  | `NotFound`/`NotTraversable` | `Found(v)` |
    /// |------------|------------------------------|------------|
    /// | `Present`  | false | `v` is a primitive |
    /// | `Null`     | false | `v` is Null |
    /// | `Bool(b)`  | false | `v` is Bool and equals `b` |
    /// | `Double`   | false | `v` is Number and the collaborator agrees |
    /// | `String`   | false | `v` is String and the collaborator agrees |
    ///
    /// Strict type equality gates every delegation: a number never reaches
    /// the string collaborator and vice versa.
    #[must_use]
    pub fn matches(&self, resolution: Resolution<'_>) -> bool {
        let Resolution::Found(value) = resolution else {
            return false;
        };

        match self {
            Self::Present(_) => value.is_primitive(),
            Self::Null => value.is_null(),
            Self::Bool(expected) => value.as_bool().is_some_and(|b| b == *expected),
            Self::Double(matcher) => value.as_number().is_some_and(|n| matcher.matches(n)),
            Self::String(matcher) => value.as_str().is_some_and(|s| matcher.matches(s)),
        }
    }
}
