//! `MetadataMatcher` — The rule object tying namespace, path, and predicate
//!
//! A rule is constructed once from configuration, validated at construction,
//! and then shared read-only across any number of concurrent evaluations.
//! Evaluation itself is total: every input resolves to `true` or `false`,
//! never to an error. The engine sits on an access-control decision path, so
//! anything ambiguous must read as "not matched", never as "matched".

use crate::{resolve, MetadataStore, PathSegment, Resolution, RuleError, ValueMatcher};

/// A compiled metadata match rule.
///
/// # Construction invariants
///
/// Checked once in [`new`](Self::new), never re-checked per evaluation:
/// the namespace is non-empty, the path has at least one segment, and every
/// segment key is non-empty.
///
/// # Example
///
/// ```
/// use metka::{
///     MetadataMatcher, MetadataStore, PathSegment, StringMatcher, ValueMap, ValueMatcher,
/// };
///
/// let rule = MetadataMatcher::new(
///     "acme.auth",
///     vec![PathSegment::key("role")],
///     ValueMatcher::string(StringMatcher::exact("admin", false)),
/// )
/// .unwrap();
///
/// let mut doc = ValueMap::new();
/// doc.insert("role".into(), "admin".into());
/// let store = MetadataStore::new().with("acme.auth", doc);
///
/// assert!(rule.matches(&store));
/// assert!(!rule.matches(&MetadataStore::new()));
/// ```
#[derive(Debug)]
pub struct MetadataMatcher {
    namespace: String,
    path: Vec<PathSegment>,
    value: ValueMatcher,
}

impl MetadataMatcher {
    /// Create a rule, validating the structural invariants.
    ///
    /// # Errors
    ///
    /// - [`RuleError::EmptyNamespace`] — namespace is the empty string
    /// - [`RuleError::EmptyPath`] — path has no segments
    /// - [`RuleError::EmptySegment`] — a segment key is the empty string
    pub fn new(
        namespace: impl Into<String>,
        path: Vec<PathSegment>,
        value: ValueMatcher,
    ) -> Result<Self, RuleError> {
        let namespace = namespace.into();
        if namespace.is_empty() {
            return Err(RuleError::EmptyNamespace);
        }
        if path.is_empty() {
            return Err(RuleError::EmptyPath);
        }
        for (index, segment) in path.iter().enumerate() {
            if segment.as_key().is_empty() {
                return Err(RuleError::EmptySegment { index });
            }
        }

        Ok(Self {
            namespace,
            path,
            value,
        })
    }

    /// The namespace this rule searches.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The key path within the namespace.
    #[must_use]
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// The value predicate applied to the resolved value.
    #[must_use]
    pub fn value(&self) -> &ValueMatcher {
        &self.value
    }

    /// Resolve this rule's path against the store without applying the
    /// predicate. Exposed for callers that want to inspect the candidate
    /// value (e.g. audit logging around a decision point).
    #[must_use]
    pub fn resolve<'a>(&self, store: &'a MetadataStore) -> Resolution<'a> {
        resolve(store, &self.namespace, &self.path)
    }

    /// Evaluate this rule against a store snapshot.
    ///
    /// Total function: missing namespaces, missing keys, blocked traversal,
    /// and type mismatches all yield `false`.
    #[must_use]
    pub fn matches(&self, store: &MetadataStore) -> bool {
        self.value.matches(self.resolve(store))
    }
}

/// Evaluate a rule expressed as loose parts.
///
/// Same decision table as [`MetadataMatcher::matches`], for callers that
/// manage rule storage themselves. Construction invariants are not enforced
/// here; an empty path or namespace simply fails to resolve (fail-closed).
#[must_use]
pub fn evaluate(
    namespace: &str,
    path: &[PathSegment],
    value: &ValueMatcher,
    store: &MetadataStore,
) -> bool {
    value.matches(resolve(store, namespace, path))
}
