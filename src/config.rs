//! Configuration for descents and the markup writer.
//!
//! Both sections deserialize from JSON with every field optional:
//!
//! ```json
//! { "generate_required_ids": true }
//! { "indent": 2, "id_prefix": "gml_" }
//! ```

use serde::{Deserialize, Serialize};

use crate::sink::OpenOptions;
use crate::{Error, Result};

// ============================================================================
// DescentConfig
// ============================================================================

/// Settings carried by a `Descent` and applied to every scope it opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescentConfig {
    /// Ask the sink to emit identifiers for steps marked `requires_id`.
    pub generate_required_ids: bool,
}

impl DescentConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::ConfigError(e.to_string()))
    }

    pub fn with_required_ids(mut self, enabled: bool) -> Self {
        self.generate_required_ids = enabled;
        self
    }

    pub(crate) fn open_options(&self) -> OpenOptions {
        OpenOptions { generate_id: self.generate_required_ids }
    }
}

// ============================================================================
// MarkupConfig
// ============================================================================

/// Layout settings for `MarkupSink`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Spaces per nesting level. `None` writes everything on one line.
    pub indent: Option<usize>,
    /// Prefix for generated identifiers, followed by a running counter.
    pub id_prefix: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            indent: None,
            id_prefix: "_".to_string(),
        }
    }
}

impl MarkupConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn indented(spaces: usize) -> Self {
        Self { indent: Some(spaces), ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        if self.id_prefix.is_empty() {
            return Err(Error::ConfigError("id_prefix must not be empty".into()));
        }
        // IDs must start like an XML name
        let first = self.id_prefix.chars().next();
        if first.is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '.') {
            return Err(Error::ConfigError(format!(
                "id_prefix '{}' must not start with a digit, '-' or '.'",
                self.id_prefix
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descent_config_defaults() {
        let config = DescentConfig::from_json("{}").unwrap();
        assert_eq!(config, DescentConfig::default());
        assert!(!config.open_options().generate_id);
    }

    #[test]
    fn test_descent_config_from_json() {
        let config = DescentConfig::from_json(r#"{"generate_required_ids": true}"#).unwrap();
        assert!(config.generate_required_ids);
        assert!(config.open_options().generate_id);
    }

    #[test]
    fn test_descent_config_rejects_garbage() {
        let err = DescentConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_markup_config_from_json() {
        let config = MarkupConfig::from_json(r#"{"indent": 2, "id_prefix": "gml_"}"#).unwrap();
        assert_eq!(config.indent, Some(2));
        assert_eq!(config.id_prefix, "gml_");
        assert_eq!(MarkupConfig::from_json("{}").unwrap(), MarkupConfig::default());
    }

    #[test]
    fn test_markup_config_validation() {
        assert!(MarkupConfig::from_json(r#"{"id_prefix": ""}"#).is_err());
        assert!(MarkupConfig::from_json(r#"{"id_prefix": "1x"}"#).is_err());
        assert!(MarkupConfig::indented(4).validate().is_ok());
    }
}
