//! TOML configuration file support for power users.
//!
//! Instead of passing the same flags on every call, users can keep their
//! preferred report layout in a config file:
//!
//! ```toml
//! # mzbind.toml
//! [describe]
//! max_depth = 3
//! include_advanced = false
//! humanize = true
//! ```
//!
//! Explicit command-line flags take precedence.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure for mzbind.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Settings of the describe command.
    #[serde(default)]
    pub describe: DescribeConfig,
}

/// Configuration for the describe command.
#[derive(Debug, Default, Deserialize)]
pub struct DescribeConfig {
    /// Maximum column depth.
    pub max_depth: Option<usize>,

    /// Include advanced and obsolete columns.
    pub include_advanced: Option<bool>,

    /// Split camel-case names into words.
    pub humanize: Option<bool>,
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
            [describe]
            max_depth = 3
            include_advanced = true
            humanize = true
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.describe.max_depth, Some(3));
        assert_eq!(config.describe.include_advanced, Some(true));
        assert_eq!(config.describe.humanize, Some(true));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [describe]
            humanize = false
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.describe.humanize, Some(false));
        assert_eq!(config.describe.max_depth, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.describe.max_depth, None);
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_str("[describe]\nmax_depth = \"deep\"").is_err());
    }
}
