//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against the metka engine. A fixture is
//! one authored rule plus a set of metadata snapshots with expected boolean
//! outcomes.

use metka::config::MetadataMatcherConfig;
use metka::MetadataStore;
use serde::Deserialize;

/// A complete test fixture: one rule, many cases.
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    pub description: String,
    pub rule: MetadataMatcherConfig,
    pub cases: Vec<TestCase>,
}

/// One metadata snapshot and its expected outcome.
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    /// The store the rule is evaluated against. Defaults to an empty store
    /// for absent-namespace cases.
    #[serde(default)]
    pub metadata: MetadataStore,
    pub expect: bool,
}

/// Result of running a single test case.
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: bool,
    pub actual: bool,
}

impl Fixture {
    /// Parse a fixture from YAML.
    ///
    /// # Errors
    ///
    /// Returns the underlying YAML error on malformed input.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators.
    ///
    /// # Errors
    ///
    /// Returns the underlying YAML error on malformed input.
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Run all test cases and return results.
    ///
    /// # Panics
    ///
    /// Panics if the fixture's rule fails to compile — a fixture authoring
    /// error, reported with the fixture name.
    pub fn run(&self) -> Vec<CaseResult> {
        let rule = self
            .rule
            .clone()
            .compile()
            .unwrap_or_else(|e| panic!("fixture '{}' has an invalid rule: {e}", self.name));

        self.cases
            .iter()
            .map(|case| {
                let actual = rule.matches(&case.metadata);
                CaseResult {
                    case_name: case.name.clone(),
                    passed: actual == case.expect,
                    expected: case.expect,
                    actual,
                }
            })
            .collect()
    }

    /// Run all test cases and panic on first failure.
    pub fn run_and_assert(&self) {
        for result in self.run() {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {}, got {}",
                self.name, result.case_name, result.expected, result.actual
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_round_trip() {
        let yaml = "\
name: smoke
description: inline smoke fixture
rule:
  filter: ns
  path: [{key: k}]
  value:
    string_match:
      exact: hit
cases:
  - name: hit
    metadata:
      ns: {k: hit}
    expect: true
  - name: miss
    metadata:
      ns: {k: other}
    expect: false
  - name: empty-store
    expect: false
";
        let fixture = Fixture::from_yaml(yaml).unwrap();
        assert_eq!(fixture.cases.len(), 3);
        fixture.run_and_assert();
    }

    #[test]
    fn multi_document_parsing() {
        let yaml = "\
name: first
description: one
rule:
  filter: ns
  path: [{key: k}]
  value: {present_match: true}
cases:
  - name: absent
    expect: false
---
name: second
description: two
rule:
  filter: ns
  path: [{key: k}]
  value: {bool_match: true}
cases:
  - name: hit
    metadata:
      ns: {k: true}
    expect: true
";
        let fixtures = Fixture::from_yaml_multi(yaml).unwrap();
        assert_eq!(fixtures.len(), 2);
        for fixture in &fixtures {
            fixture.run_and_assert();
        }
    }
}
