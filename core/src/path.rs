//! Path resolution — locating a candidate value inside a namespace document
//!
//! A path is an ordered sequence of key segments walked through nested maps.
//! Resolution is a pure function of (store, namespace, path): no side
//! effects, bounded by path length, safe to repeat and to memoize against a
//! fixed store snapshot.
//!
//! # Lists block traversal
//!
//! Only maps are traversable. Encountering a list (or any scalar) with
//! segments still to consume ends resolution with
//! [`Resolution::NotTraversable`] — even when the next segment looks like a
//! numeric index. This is a structural limit of the path language, not a
//! missing feature; rules rely on the fail-closed outcome.

use crate::{MetadataStore, MetadataValue};

/// One segment of a path.
///
/// Currently a key lookup is the only segment kind. The enum is open for
/// future segment kinds, which is why construction goes through
/// [`PathSegment::key`] rather than struct literals downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PathSegment {
    /// Plain string key looked up in a map.
    Key(String),
}

impl PathSegment {
    /// Create a key segment.
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }

    /// The segment's key.
    #[must_use]
    pub fn as_key(&self) -> &str {
        match self {
            Self::Key(key) => key,
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

/// Outcome of resolving a path against a store.
///
/// All three outcomes are ordinary, non-exceptional results. `NotFound` and
/// `NotTraversable` both mean "no value to match against"; they are kept
/// distinct because they arise from different conditions (absent key vs.
/// traversal blocked by a non-map node).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    /// The path resolved to this value.
    Found(&'a MetadataValue),

    /// The namespace or one of the keys does not exist.
    NotFound,

    /// A non-map node (list or scalar) was reached with segments left to
    /// consume.
    NotTraversable,
}

impl<'a> Resolution<'a> {
    /// Returns `true` if a value was found.
    #[inline]
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The found value, if any.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&'a MetadataValue> {
        match *self {
            Self::Found(value) => Some(value),
            _ => None,
        }
    }
}

/// Resolve `path` inside `namespace` of `store`.
///
/// Walks key segments from the namespace's root map. Absent namespace or
/// absent key → [`Resolution::NotFound`]. A list or scalar encountered
/// before the last segment → [`Resolution::NotTraversable`]. The value the
/// final segment lands on — whatever its variant, including lists and maps —
/// is returned as [`Resolution::Found`].
///
/// An empty path resolves to `NotFound`; rule construction rejects empty
/// paths before evaluation, so this arm only serves direct callers.
///
/// # Example
///
/// ```
/// use metka::{resolve, MetadataStore, MetadataValue, PathSegment, ValueMap};
///
/// let mut inner = ValueMap::new();
/// inner.insert("c".into(), "pro".into());
/// let mut root = ValueMap::new();
/// root.insert("b".into(), MetadataValue::Map(inner));
///
/// let store = MetadataStore::new().with("ns", root);
/// let path = [PathSegment::key("b"), PathSegment::key("c")];
///
/// let resolution = resolve(&store, "ns", &path);
/// assert_eq!(resolution.value().and_then(MetadataValue::as_str), Some("pro"));
/// ```
#[must_use]
pub fn resolve<'a>(
    store: &'a MetadataStore,
    namespace: &str,
    path: &[PathSegment],
) -> Resolution<'a> {
    let Some(root) = store.namespace(namespace) else {
        return Resolution::NotFound;
    };

    let mut current: Option<&MetadataValue> = None;
    for segment in path {
        // The node being descended through must be a map: the root always
        // is, and anything else blocks traversal.
        let map = match current {
            None => root,
            Some(MetadataValue::Map(map)) => map,
            Some(_) => return Resolution::NotTraversable,
        };

        let PathSegment::Key(key) = segment;
        match map.get(key) {
            Some(value) => current = Some(value),
            None => return Resolution::NotFound,
        }
    }

    match current {
        Some(value) => Resolution::Found(value),
        None => Resolution::NotFound, // empty path
    }
}
