use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::controller::DEFAULT_MAX_DESCEND_DEPTH;

/// Navigator settings, loaded from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Display name for the repository root in breadcrumb labels.
    pub repo_name: String,
    /// Upper bound on singleton-chain auto-descend steps per expand.
    pub max_auto_descend_depth: usize,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            repo_name: "repository".to_string(),
            max_auto_descend_depth: DEFAULT_MAX_DESCEND_DEPTH,
        }
    }
}

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl NavigatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_auto_descend_depth == 0 {
            return Err(ConfigError::Validation(
                "max_auto_descend_depth must be at least 1".to_string(),
            ));
        }
        if self.repo_name.is_empty() {
            return Err(ConfigError::Validation(
                "repo_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NavigatorConfig::default();
        assert_eq!(config.repo_name, "repository");
        assert_eq!(config.max_auto_descend_depth, DEFAULT_MAX_DESCEND_DEPTH);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = NavigatorConfig::default();
        config.max_auto_descend_depth = 0;
        assert!(config.validate().is_err());

        config.max_auto_descend_depth = 1;
        config.repo_name.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let config = NavigatorConfig {
            repo_name: "demo".to_string(),
            max_auto_descend_depth: 32,
        };
        config.save_to_file(&config_path).unwrap();

        let loaded = NavigatorConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.repo_name, "demo");
        assert_eq!(loaded.max_auto_descend_depth, 32);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: NavigatorConfig = serde_json::from_str(r#"{"repo_name": "x"}"#).unwrap();
        assert_eq!(config.repo_name, "x");
        assert_eq!(config.max_auto_descend_depth, DEFAULT_MAX_DESCEND_DEPTH);
    }
}
