//! Generator Configuration
//!
//! Defines the options that shape generated test files.

use sagac::analysis::{AnalysisOptions, DEFAULT_PLACEHOLDER_PREFIX, DEFAULT_VARIATION_MARKER};
use serde::{Deserialize, Serialize};

/// Configuration for the test generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix of placeholder names for free variables.
    pub placeholder_prefix: String,

    /// Marker prepended to a test title once per alternate branch taken.
    pub variation_marker: String,

    /// JavaScript source assigned to every placeholder constant.
    pub sample_value: String,

    /// Name the module under test is imported as.
    pub sagas_binding: String,

    /// Suffix of the `describe` title, after the module stem.
    pub suite_suffix: String,

    /// Inserted before the extension of the output file.
    pub test_suffix: String,

    /// Namespace imports added for identifiers used in the tests.
    pub imports: ImportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            placeholder_prefix: DEFAULT_PLACEHOLDER_PREFIX.to_string(),
            variation_marker: DEFAULT_VARIATION_MARKER.to_string(),
            sample_value: "\"Sample\"".to_string(),
            sagas_binding: "sagas".to_string(),
            suite_suffix: "sagas".to_string(),
            test_suffix: "test".to_string(),
            imports: ImportConfig::default(),
        }
    }
}

impl Config {
    /// Options for the core analysis.
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            placeholder_prefix: self.placeholder_prefix.clone(),
            variation_marker: self.variation_marker.clone(),
        }
    }
}

/// Import configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Identifier suffixes that trigger a namespace import.
    pub groups: Vec<ImportGroup>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            groups: vec![
                ImportGroup::new("Actions", "../actions"),
                ImportGroup::new("Helpers", "../helpers"),
            ],
        }
    }
}

/// `fooActions` used in a test adds
/// `import * as fooActions from "../actions/foo"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportGroup {
    /// Identifier suffix, e.g. `Actions`.
    pub suffix: String,
    /// Directory the module is imported from, relative to the test file.
    pub directory: String,
}

impl ImportGroup {
    pub fn new(suffix: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            directory: directory.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{ "placeholder_prefix": "mock" }"#).unwrap();
        assert_eq!(config.placeholder_prefix, "mock");
        assert_eq!(config.variation_marker, "fail to ");
        assert_eq!(config.imports.groups.len(), 2);
    }

    #[test]
    fn test_analysis_options() {
        let config = Config {
            variation_marker: "without ".to_string(),
            ..Config::default()
        };
        let options = config.analysis_options();
        assert_eq!(options.placeholder_prefix, "sample");
        assert_eq!(options.variation_marker, "without ");
    }
}
