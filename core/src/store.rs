//! `MetadataStore` — Namespaced metadata attached to a request or connection
//!
//! Upstream processing populates the store; the match engine only reads it.
//! Each namespace (a filter name in practice) owns one root [`ValueMap`], so
//! path traversal always starts from a map. Namespace lookup is exact string
//! match.
//!
//! Callers must not mutate a store snapshot while evaluations against it are
//! in flight; the engine itself never writes.

use crate::ValueMap;
use std::collections::BTreeMap;

/// A read-only-during-matching collection of namespaced metadata documents.
///
/// # Example
///
/// ```
/// use metka::{MetadataStore, MetadataValue, ValueMap};
///
/// let mut doc = ValueMap::new();
/// doc.insert("role".into(), MetadataValue::String("admin".into()));
///
/// let store = MetadataStore::new().with("acme.auth", doc);
/// assert!(store.namespace("acme.auth").is_some());
/// assert!(store.namespace("acme.other").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MetadataStore {
    namespaces: BTreeMap<String, ValueMap>,
}

impl MetadataStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a namespace document (builder pattern).
    #[must_use]
    pub fn with(mut self, namespace: impl Into<String>, document: ValueMap) -> Self {
        self.namespaces.insert(namespace.into(), document);
        self
    }

    /// Insert a namespace document, replacing any existing one.
    pub fn insert(&mut self, namespace: impl Into<String>, document: ValueMap) {
        self.namespaces.insert(namespace.into(), document);
    }

    /// Look up a namespace's root document.
    #[must_use]
    pub fn namespace(&self, name: &str) -> Option<&ValueMap> {
        self.namespaces.get(name)
    }

    /// Number of namespaces in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    /// Returns `true` if the store holds no namespaces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Iterate over `(namespace, document)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValueMap)> {
        self.namespaces.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(feature = "config")]
impl MetadataStore {
    /// Build a store from a JSON document of the shape
    /// `{ "namespace": { ...nested values... }, ... }`.
    ///
    /// Top-level values that are not objects are rejected: a namespace root
    /// is a map by construction.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidDocument`](crate::RuleError::InvalidDocument)
    /// naming the offending namespace.
    pub fn from_json(value: serde_json::Value) -> Result<Self, crate::RuleError> {
        use crate::{MetadataValue, RuleError};

        let serde_json::Value::Object(entries) = value else {
            return Err(RuleError::InvalidDocument {
                source: "metadata document must be a JSON object".to_string(),
            });
        };

        let mut store = Self::new();
        for (namespace, doc) in entries {
            match MetadataValue::from(doc) {
                MetadataValue::Map(map) => store.insert(namespace, map),
                other => {
                    return Err(RuleError::InvalidDocument {
                        source: format!(
                            "namespace \"{namespace}\" must hold an object, found {}",
                            other.type_name()
                        ),
                    });
                }
            }
        }
        Ok(store)
    }
}
