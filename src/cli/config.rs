//! TOML configuration file support.
//!
//! Settings that would otherwise be passed as flags can live in a file:
//!
//! ```toml
//! # meshparse.toml
//! [conversion]
//! skip_invalid = true
//! buffer_size = 262144
//! progress_interval = 5000
//! compress_output = true
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure for meshparse.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Conversion-specific settings.
    #[serde(default)]
    pub conversion: ConversionSection,
}

/// Configuration for the convert command.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionSection {
    /// Skip records that fail validation.
    pub skip_invalid: Option<bool>,

    /// Input buffer size in bytes.
    pub buffer_size: Option<usize>,

    /// Progress log interval in records.
    pub progress_interval: Option<usize>,

    /// Gzip the output regardless of its extension.
    pub compress_output: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [conversion]
            skip_invalid = true
            buffer_size = 262144
            progress_interval = 5000
            compress_output = false
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.conversion.skip_invalid, Some(true));
        assert_eq!(config.conversion.buffer_size, Some(262_144));
        assert_eq!(config.conversion.progress_interval, Some(5_000));
        assert_eq!(config.conversion.compress_output, Some(false));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [conversion]
            skip_invalid = true
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.conversion.skip_invalid, Some(true));
        assert_eq!(config.conversion.buffer_size, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.conversion.skip_invalid, None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let toml = r#"
            [conversion]
            skip_invalids = true
        "#;
        assert!(Config::from_str(toml).is_err());
    }
}
