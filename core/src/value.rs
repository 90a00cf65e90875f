//! `MetadataValue` — The closed value model for namespaced metadata
//!
//! Metadata is a nested, dynamically-typed document. Its value space is closed
//! under six variants (null, bool, number, string, list, map), which keeps
//! traversal and type checks exhaustive and compiler-verified. The engine only
//! ever reads values; producers build them once per request and hand out
//! shared references.
//!
//! # No coercion
//!
//! Variants never convert into each other: `String("true")` is not
//! `Bool(true)`, `String("3")` is not `Number(3.0)`. A predicate that expects
//! one variant and finds another is a non-match, never an error.

use std::collections::BTreeMap;

/// Ordered string-keyed mapping of metadata values. Keys are unique.
pub type ValueMap = BTreeMap<String, MetadataValue>;

/// A single metadata value.
///
/// The tagged union mirrors a generic structured-data document (the same
/// shape JSON carries). It is closed by design: matching code can be
/// exhaustive, and new variants would be a semantic change, not an extension.
///
/// # Example
///
/// ```
/// use metka::MetadataValue;
///
/// let value = MetadataValue::String("pro".to_string());
/// assert_eq!(value.as_str(), Some("pro"));
/// assert!(value.is_primitive());
/// assert!(!value.is_list());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum MetadataValue {
    /// The null value. Distinct from "absent": a key can be present and null.
    Null,

    /// Boolean value.
    Bool(bool),

    /// Numeric value. All numbers are doubles, as in the source document model.
    Number(f64),

    /// String value — the most common leaf in practice.
    String(String),

    /// Ordered sequence of values. Lists are terminal for path traversal:
    /// the resolver never descends into list elements.
    List(Vec<MetadataValue>),

    /// Ordered string-keyed mapping. The only variant the resolver descends
    /// through.
    Map(ValueMap),
}

impl MetadataValue {
    /// Returns `true` if this is the `Null` variant.
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if this is the `Bool` variant.
    #[inline]
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// Returns `true` if this is the `Number` variant.
    #[inline]
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns `true` if this is the `String` variant.
    #[inline]
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Returns `true` if this is the `List` variant.
    #[inline]
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns `true` if this is the `Map` variant.
    #[inline]
    #[must_use]
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Returns `true` for the four scalar variants (Null, Bool, Number,
    /// String). Only primitives are matchable leaves; lists and maps count
    /// as not-present under a present predicate.
    #[inline]
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_)
        )
    }

    /// Try to get the value as a boolean.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a number.
    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a string slice.
    ///
    /// # Example
    ///
    /// ```
    /// use metka::MetadataValue;
    ///
    /// assert_eq!(MetadataValue::String("x".into()).as_str(), Some("x"));
    /// assert_eq!(MetadataValue::Bool(true).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Try to get the value as a list slice.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[MetadataValue]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Try to get the value as a map reference.
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns a string naming this value's variant, for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

impl Default for MetadataValue {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for MetadataValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for MetadataValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for MetadataValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<Vec<MetadataValue>> for MetadataValue {
    fn from(items: Vec<MetadataValue>) -> Self {
        Self::List(items)
    }
}

impl From<ValueMap> for MetadataValue {
    fn from(map: ValueMap) -> Self {
        Self::Map(map)
    }
}

impl<T> From<Option<T>> for MetadataValue
where
    T: Into<MetadataValue>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

#[cfg(feature = "config")]
impl From<serde_json::Value> for MetadataValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            // NaN for the unrepresentable case: NaN never matches anything.
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(entries) => {
                Self::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}
