//! metka - metadata match engine for authorization layers
//!
//! Decides whether a namespaced, nested, dynamically-typed metadata document
//! satisfies a typed value rule. Access-control decision points call this
//! per request; higher-level rule combinators (AND/OR/NOT) treat the result
//! as an opaque boolean leaf.
//!
//! # Architecture
//!
//! Three parts, evaluated leaf-first:
//!
//! - [`MetadataValue`] — Closed tagged union (null, bool, number, string,
//!   list, map) over everything a metadata store may hold
//! - [`resolve`] — Walks a key path through nested maps inside a named
//!   namespace, producing a [`Resolution`] (found / not found / blocked)
//! - [`ValueMatcher`] — Typed predicate applied to the resolution outcome,
//!   delegating string and number comparison to the [`StringMatch`] and
//!   [`NumberMatch`] collaborator seams
//!
//! [`MetadataMatcher`] packages the three into a reusable rule object.
//!
//! # Key Invariants
//!
//! 1. **Fail-closed**: every runtime condition that is not a clean match —
//!    missing namespace or key, traversal blocked by a list, type mismatch —
//!    is an ordinary `false`, never an error, panic, or exception. A fault
//!    on the decision path must not be interpretable as "matched".
//!
//! 2. **Validate once**: rule invariants (non-empty namespace, non-empty
//!    path and segments, exactly one predicate condition) are enforced at
//!    construction, not re-checked per evaluation.
//!
//! 3. **No coercion**: variants never convert; `String("true")` does not
//!    satisfy a bool predicate and numbers never reach the string matcher.
//!
//! # Example
//!
//! ```
//! use metka::prelude::*;
//!
//! // Metadata attached upstream: { "acme.auth": { "a": { "b": { "c": "pro" } } } }
//! let mut b = ValueMap::new();
//! b.insert("c".into(), "pro".into());
//! let mut a = ValueMap::new();
//! a.insert("b".into(), MetadataValue::Map(b));
//! let mut root = ValueMap::new();
//! root.insert("a".into(), MetadataValue::Map(a));
//! let store = MetadataStore::new().with("acme.auth", root);
//!
//! // Rule: does acme.auth metadata have a.b.c starting with "pr"?
//! let rule = MetadataMatcher::new(
//!     "acme.auth",
//!     vec![PathSegment::key("a"), PathSegment::key("b"), PathSegment::key("c")],
//!     ValueMatcher::string(StringMatcher::prefix("pr", false)),
//! )
//! .unwrap();
//!
//! assert!(rule.matches(&store));
//! ```
//!
//! # Features
//!
//! - `serde` — (de)serialization for [`MetadataValue`] / [`MetadataStore`]
//! - `config` — implies `serde`; adds the [`config`] module for loading
//!   authored rules, plus JSON document conversion

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod double_match;
mod matcher;
mod path;
mod store;
mod string_match;
mod value;
mod value_match;

#[cfg(feature = "config")]
pub mod config;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

pub use double_match::{DoubleMatcher, NumberMatch};
pub use matcher::{evaluate, MetadataMatcher};
pub use path::{resolve, PathSegment, Resolution};
pub use store::MetadataStore;
pub use string_match::{StringMatch, StringMatcher};
pub use value::{MetadataValue, ValueMap};
pub use value_match::ValueMatcher;

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use metka::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        evaluate,
        resolve,
        DoubleMatcher,
        MetadataMatcher,
        MetadataStore,
        MetadataValue,
        NumberMatch,
        PathSegment,
        Resolution,
        RuleError,
        StringMatch,
        StringMatcher,
        ValueMap,
        ValueMatcher,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from rule construction and validation.
///
/// These surface to the rule author at policy-load time. Evaluation has no
/// error path: once a rule constructs, every evaluation is a plain boolean.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleError {
    /// The rule's namespace is the empty string.
    EmptyNamespace,

    /// The rule's path has no segments.
    EmptyPath,

    /// A path segment key is the empty string.
    EmptySegment {
        /// Zero-based position of the offending segment.
        index: usize,
    },

    /// An authored oneof has no condition set.
    NoVariantSet {
        /// Which oneof field group is empty (`"value"`, `"string_match"`,
        /// `"double_match"`).
        oneof: &'static str,
    },

    /// An authored oneof has more than one condition set.
    MultipleVariantsSet {
        /// Which oneof field group is over-populated.
        oneof: &'static str,
        /// The fields that were set.
        fields: Vec<&'static str>,
    },

    /// A regex pattern failed to compile.
    InvalidPattern {
        /// The pattern that failed.
        pattern: String,
        /// The underlying error message.
        source: String,
    },

    /// A numeric range with `start > end` (or a NaN bound).
    InvalidRange {
        /// Lower bound as authored.
        start: f64,
        /// Upper bound as authored.
        end: f64,
    },

    /// A metadata document could not be converted into a store.
    InvalidDocument {
        /// The underlying error message.
        source: String,
    },
}

impl std::fmt::Display for RuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyNamespace => {
                write!(f, "rule namespace must not be empty")
            }
            Self::EmptyPath => {
                write!(f, "rule path must have at least one segment")
            }
            Self::EmptySegment { index } => {
                write!(f, "path segment {index} has an empty key")
            }
            Self::NoVariantSet { oneof } => {
                write!(f, "\"{oneof}\" must set exactly one condition, found none")
            }
            Self::MultipleVariantsSet { oneof, fields } => {
                write!(
                    f,
                    "\"{oneof}\" must set exactly one condition, found {}: {}",
                    fields.len(),
                    fields.join(", ")
                )
            }
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid pattern \"{pattern}\": {source}")
            }
            Self::InvalidRange { start, end } => {
                write!(f, "invalid range [{start}, {end}): start must not exceed end")
            }
            Self::InvalidDocument { source } => {
                write!(f, "invalid metadata document: {source}")
            }
        }
    }
}

impl std::error::Error for RuleError {}
