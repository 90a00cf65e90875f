//! metka-test: conformance fixtures for the metka match engine
//!
//! Provides document builders for constructing nested metadata in tests,
//! plus a YAML fixture model and runner (feature = `"fixtures"`).
//!
//! # Example
//!
//! ```
//! use metka_test::prelude::*;
//!
//! let store = MetadataStore::new().with(
//!     "acme.auth",
//!     DocBuilder::new()
//!         .with("a", DocBuilder::new().with("b", "pro").into_value())
//!         .build(),
//! );
//!
//! let resolution = resolve(
//!     &store,
//!     "acme.auth",
//!     &[PathSegment::key("a"), PathSegment::key("b")],
//! );
//! assert!(resolution.is_found());
//! ```

use metka::prelude::*;

#[cfg(feature = "fixtures")]
pub mod fixture;

/// Builder for nested metadata documents.
///
/// Keeps test setup flat where hand-rolled `ValueMap` inserts would be
/// noisy. Nest documents by passing [`into_value`](Self::into_value) of an
/// inner builder to [`with`](Self::with).
#[derive(Debug, Clone, Default)]
pub struct DocBuilder {
    map: ValueMap,
}

impl DocBuilder {
    /// Create an empty document builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key-value pair (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.map.insert(key.into(), value.into());
        self
    }

    /// Finish as a root document for a [`MetadataStore`] namespace.
    #[must_use]
    pub fn build(self) -> ValueMap {
        self.map
    }

    /// Finish as a nested map value.
    #[must_use]
    pub fn into_value(self) -> MetadataValue {
        MetadataValue::Map(self.map)
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::DocBuilder;
    pub use metka::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_nested_documents() {
        let doc = DocBuilder::new()
            .with("name", "alice")
            .with("flag", true)
            .with("level", 7)
            .with("inner", DocBuilder::new().with("k", "v").into_value())
            .build();

        assert_eq!(doc["name"].as_str(), Some("alice"));
        assert_eq!(doc["flag"].as_bool(), Some(true));
        assert_eq!(doc["level"].as_number(), Some(7.0));
        assert!(doc["inner"].is_map());
    }
}
