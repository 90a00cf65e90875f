//! Rule configuration — the authored form of a metadata match rule.
//!
//! These types mirror the runtime rule types but are serde-deserializable.
//! A rule file names a `filter` (namespace), a `path` of key segments, and a
//! `value` condition, and compiles into a runtime [`MetadataMatcher`] with
//! every invariant checked at load time:
//!
//! ```yaml
//! filter: acme.auth
//! path:
//!   - key: a
//!   - key: b
//!   - key: c
//! value:
//!   string_match:
//!     prefix: pr
//! ```
//!
//! # Oneofs as optional fields
//!
//! The authored `value` (and the nested `string_match` / `double_match`)
//! expose one optional field per condition, because that is the shape rule
//! authors write. [`compile`](ValueMatchConfig::compile) enforces
//! exactly-one-set and produces the runtime sum type, so the check happens
//! once at load time and the engine never re-validates per evaluation.

use crate::{
    DoubleMatcher, MetadataMatcher, PathSegment, RuleError, StringMatcher, ValueMatcher,
};
use serde::Deserialize;

/// Configuration for a [`MetadataMatcher`].
///
/// Deserializes from JSON/YAML and compiles into a runtime rule via
/// [`compile`](Self::compile).
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataMatcherConfig {
    /// The namespace to search (a filter name in practice).
    pub filter: String,

    /// Key path within the namespace, outermost first.
    pub path: Vec<PathSegmentConfig>,

    /// The value condition applied to the resolved value.
    pub value: ValueMatchConfig,
}

impl MetadataMatcherConfig {
    /// Compile this configuration into a runtime rule.
    ///
    /// # Errors
    ///
    /// Any [`RuleError`]: structural violations (empty filter/path/segment),
    /// oneof violations, invalid regex, invalid range.
    pub fn compile(self) -> Result<MetadataMatcher, RuleError> {
        let path = self
            .path
            .into_iter()
            .map(|segment| PathSegment::key(segment.key))
            .collect();
        let value = self.value.compile()?;
        MetadataMatcher::new(self.filter, path, value)
    }
}

/// One authored path segment.
///
/// A struct rather than a bare string: the segment schema is a oneof with a
/// single `key` kind today, and the struct form keeps rule files forward
/// compatible with future segment kinds.
#[derive(Debug, Clone, Deserialize)]
pub struct PathSegmentConfig {
    /// Plain string key looked up in a map.
    pub key: String,
}

/// The authored value condition: one optional field per predicate kind.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValueMatchConfig {
    /// Matches a null value. The payload is empty; `{}` or `null` both parse.
    #[serde(default)]
    pub null_match: Option<NullMatchConfig>,

    /// Matches a numeric value via the number collaborator.
    #[serde(default)]
    pub double_match: Option<DoubleMatchConfig>,

    /// Matches a string value via the string collaborator.
    #[serde(default)]
    pub string_match: Option<StringMatchConfig>,

    /// Matches a bool value equal to the literal.
    #[serde(default)]
    pub bool_match: Option<bool>,

    /// Matches any primitive value at the path. The flag is carried but not
    /// consulted.
    #[serde(default)]
    pub present_match: Option<bool>,
}

impl ValueMatchConfig {
    fn set_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.null_match.is_some() {
            fields.push("null_match");
        }
        if self.double_match.is_some() {
            fields.push("double_match");
        }
        if self.string_match.is_some() {
            fields.push("string_match");
        }
        if self.bool_match.is_some() {
            fields.push("bool_match");
        }
        if self.present_match.is_some() {
            fields.push("present_match");
        }
        fields
    }

    /// Compile into the runtime [`ValueMatcher`], enforcing exactly one
    /// condition.
    ///
    /// # Errors
    ///
    /// [`RuleError::NoVariantSet`] / [`RuleError::MultipleVariantsSet`] on
    /// oneof violations; pattern and range errors from the nested configs.
    pub fn compile(self) -> Result<ValueMatcher, RuleError> {
        let fields = self.set_fields();
        if fields.len() > 1 {
            return Err(RuleError::MultipleVariantsSet {
                oneof: "value",
                fields,
            });
        }

        if self.null_match.is_some() {
            return Ok(ValueMatcher::Null);
        }
        if let Some(double) = self.double_match {
            return Ok(ValueMatcher::Double(Box::new(double.compile()?)));
        }
        if let Some(string) = self.string_match {
            return Ok(ValueMatcher::String(Box::new(string.compile()?)));
        }
        if let Some(expected) = self.bool_match {
            return Ok(ValueMatcher::Bool(expected));
        }
        if let Some(flag) = self.present_match {
            return Ok(ValueMatcher::Present(flag));
        }
        Err(RuleError::NoVariantSet { oneof: "value" })
    }
}

/// Empty payload for `null_match`.
///
/// Accepts any value (`{}`, `null`, `true`, ...) and ignores it; only the
/// field's presence selects the condition.
#[derive(Debug, Clone, Copy)]
pub struct NullMatchConfig;

impl<'de> Deserialize<'de> for NullMatchConfig {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde::de::IgnoredAny::deserialize(deserializer)?;
        Ok(NullMatchConfig)
    }
}

/// The authored string condition: one optional field per strategy, plus
/// shared `ignore_case`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StringMatchConfig {
    /// Exact string equality.
    #[serde(default)]
    pub exact: Option<String>,

    /// String prefix match.
    #[serde(default)]
    pub prefix: Option<String>,

    /// String suffix match.
    #[serde(default)]
    pub suffix: Option<String>,

    /// Substring contains match.
    #[serde(default)]
    pub contains: Option<String>,

    /// Regular expression match.
    #[serde(default)]
    pub regex: Option<String>,

    /// ASCII case-insensitive matching (default: false). For `regex`, the
    /// pattern is compiled with `(?i)`.
    #[serde(default)]
    pub ignore_case: bool,
}

impl StringMatchConfig {
    fn set_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.exact.is_some() {
            fields.push("exact");
        }
        if self.prefix.is_some() {
            fields.push("prefix");
        }
        if self.suffix.is_some() {
            fields.push("suffix");
        }
        if self.contains.is_some() {
            fields.push("contains");
        }
        if self.regex.is_some() {
            fields.push("regex");
        }
        fields
    }

    /// Compile into a runtime [`StringMatcher`].
    ///
    /// # Errors
    ///
    /// Oneof violations, or [`RuleError::InvalidPattern`] for a bad regex.
    pub fn compile(self) -> Result<StringMatcher, RuleError> {
        let fields = self.set_fields();
        if fields.len() > 1 {
            return Err(RuleError::MultipleVariantsSet {
                oneof: "string_match",
                fields,
            });
        }

        let ignore_case = self.ignore_case;
        if let Some(value) = self.exact {
            return Ok(StringMatcher::exact(value, ignore_case));
        }
        if let Some(value) = self.prefix {
            return Ok(StringMatcher::prefix(value, ignore_case));
        }
        if let Some(value) = self.suffix {
            return Ok(StringMatcher::suffix(value, ignore_case));
        }
        if let Some(value) = self.contains {
            return Ok(StringMatcher::contains(value, ignore_case));
        }
        if let Some(pattern) = self.regex {
            let compiled = if ignore_case {
                StringMatcher::regex_ignore_case(&pattern)
            } else {
                StringMatcher::regex(&pattern)
            };
            return compiled.map_err(|e| RuleError::InvalidPattern {
                pattern,
                source: e.to_string(),
            });
        }
        Err(RuleError::NoVariantSet {
            oneof: "string_match",
        })
    }
}

/// The authored number condition: exact value or half-open range.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DoubleMatchConfig {
    /// Exact floating-point equality.
    #[serde(default)]
    pub exact: Option<f64>,

    /// Half-open range `start <= value < end`.
    #[serde(default)]
    pub range: Option<DoubleRangeConfig>,
}

/// Bounds of an authored numeric range.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DoubleRangeConfig {
    /// Inclusive lower bound.
    pub start: f64,
    /// Exclusive upper bound.
    pub end: f64,
}

impl DoubleMatchConfig {
    fn set_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.exact.is_some() {
            fields.push("exact");
        }
        if self.range.is_some() {
            fields.push("range");
        }
        fields
    }

    /// Compile into a runtime [`DoubleMatcher`].
    ///
    /// # Errors
    ///
    /// Oneof violations, or [`RuleError::InvalidRange`] for an inverted
    /// range.
    pub fn compile(self) -> Result<DoubleMatcher, RuleError> {
        let fields = self.set_fields();
        if fields.len() > 1 {
            return Err(RuleError::MultipleVariantsSet {
                oneof: "double_match",
                fields,
            });
        }

        if let Some(value) = self.exact {
            return Ok(DoubleMatcher::exact(value));
        }
        if let Some(range) = self.range {
            return DoubleMatcher::range(range.start, range.end);
        }
        Err(RuleError::NoVariantSet {
            oneof: "double_match",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetadataStore;

    fn compile_yaml(yaml: &str) -> Result<MetadataMatcher, RuleError> {
        let config: MetadataMatcherConfig = serde_yaml::from_str(yaml).unwrap();
        config.compile()
    }

    #[test]
    fn compile_string_prefix_rule() {
        let rule = compile_yaml(
            "filter: acme.auth\n\
             path: [{key: a}, {key: b}, {key: c}]\n\
             value:\n  string_match:\n    prefix: pr\n",
        )
        .unwrap();

        let store: MetadataStore =
            serde_yaml::from_str("acme.auth:\n  a:\n    b:\n      c: pro\n").unwrap();
        assert!(rule.matches(&store));

        assert_eq!(rule.namespace(), "acme.auth");
        assert_eq!(rule.path().len(), 3);
    }

    #[test]
    fn compile_bool_rule() {
        let rule = compile_yaml(
            "filter: ns\npath: [{key: flag}]\nvalue:\n  bool_match: true\n",
        )
        .unwrap();
        let store: MetadataStore = serde_yaml::from_str("ns:\n  flag: true\n").unwrap();
        assert!(rule.matches(&store));
    }

    #[test]
    fn compile_null_rule() {
        let rule =
            compile_yaml("filter: ns\npath: [{key: k}]\nvalue:\n  null_match: {}\n").unwrap();
        let store: MetadataStore = serde_yaml::from_str("ns:\n  k: null\n").unwrap();
        assert!(rule.matches(&store));
    }

    #[test]
    fn compile_present_rule() {
        let rule =
            compile_yaml("filter: ns\npath: [{key: k}]\nvalue:\n  present_match: true\n").unwrap();
        let store: MetadataStore = serde_yaml::from_str("ns:\n  k: 1\n").unwrap();
        assert!(rule.matches(&store));
    }

    #[test]
    fn compile_double_range_rule() {
        let rule = compile_yaml(
            "filter: ns\npath: [{key: level}]\nvalue:\n  double_match:\n    range: {start: 5, end: 10}\n",
        )
        .unwrap();
        let store: MetadataStore = serde_yaml::from_str("ns:\n  level: 7\n").unwrap();
        assert!(rule.matches(&store));
    }

    #[test]
    fn no_condition_is_rejected() {
        let err = compile_yaml("filter: ns\npath: [{key: k}]\nvalue: {}\n").unwrap_err();
        assert_eq!(err, RuleError::NoVariantSet { oneof: "value" });
    }

    #[test]
    fn two_conditions_are_rejected() {
        let err = compile_yaml(
            "filter: ns\npath: [{key: k}]\nvalue:\n  bool_match: true\n  present_match: true\n",
        )
        .unwrap_err();
        assert_eq!(
            err,
            RuleError::MultipleVariantsSet {
                oneof: "value",
                fields: vec!["bool_match", "present_match"],
            }
        );
    }

    #[test]
    fn nested_string_oneof_is_enforced() {
        let err = compile_yaml(
            "filter: ns\npath: [{key: k}]\nvalue:\n  string_match:\n    exact: a\n    prefix: b\n",
        )
        .unwrap_err();
        assert_eq!(
            err,
            RuleError::MultipleVariantsSet {
                oneof: "string_match",
                fields: vec!["exact", "prefix"],
            }
        );

        let err = compile_yaml("filter: ns\npath: [{key: k}]\nvalue:\n  string_match: {}\n")
            .unwrap_err();
        assert_eq!(
            err,
            RuleError::NoVariantSet {
                oneof: "string_match"
            }
        );
    }

    #[test]
    fn nested_double_oneof_is_enforced() {
        let err = compile_yaml(
            "filter: ns\npath: [{key: k}]\nvalue:\n  double_match: {}\n",
        )
        .unwrap_err();
        assert_eq!(
            err,
            RuleError::NoVariantSet {
                oneof: "double_match"
            }
        );
    }

    #[test]
    fn invalid_regex_is_rejected() {
        let err = compile_yaml(
            "filter: ns\npath: [{key: k}]\nvalue:\n  string_match:\n    regex: '[unclosed'\n",
        )
        .unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { .. }));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = compile_yaml(
            "filter: ns\npath: [{key: k}]\nvalue:\n  double_match:\n    range: {start: 9, end: 1}\n",
        )
        .unwrap_err();
        assert!(matches!(err, RuleError::InvalidRange { .. }));
    }

    #[test]
    fn structural_violations_are_rejected() {
        let err = compile_yaml("filter: ''\npath: [{key: k}]\nvalue:\n  bool_match: true\n")
            .unwrap_err();
        assert_eq!(err, RuleError::EmptyNamespace);

        let err =
            compile_yaml("filter: ns\npath: []\nvalue:\n  bool_match: true\n").unwrap_err();
        assert_eq!(err, RuleError::EmptyPath);

        let err = compile_yaml("filter: ns\npath: [{key: ''}]\nvalue:\n  bool_match: true\n")
            .unwrap_err();
        assert_eq!(err, RuleError::EmptySegment { index: 0 });
    }

    #[test]
    fn rule_parses_from_json_too() {
        let json = serde_json::json!({
            "filter": "ns",
            "path": [{"key": "k"}],
            "value": {"string_match": {"exact": "m", "ignore_case": true}}
        });
        let config: MetadataMatcherConfig = serde_json::from_value(json).unwrap();
        let rule = config.compile().unwrap();

        let store: MetadataStore = serde_yaml::from_str("ns:\n  k: M\n").unwrap();
        assert!(rule.matches(&store));
    }
}
