//! Configuration management for platelens
//!
//! Config stored at: ~/.config/platelens/config.json
//! API keys can also come from PLATELENS_VISION_API_KEY and
//! PLATELENS_USDA_API_KEY, which take precedence over the file.

use platelens_types::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Google Cloud Vision API key
    #[serde(default)]
    pub vision_api_key: String,

    /// USDA FoodData Central API key
    #[serde(default)]
    pub usda_api_key: String,

    /// HTTP port the analysis server listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Vision endpoint override (optional)
    #[serde(default)]
    pub vision_endpoint: Option<String>,

    /// Nutrition database base URL override (optional)
    #[serde(default)]
    pub usda_base_url: Option<String>,

    /// Recipe index base URL override (optional)
    #[serde(default)]
    pub mealdb_base_url: Option<String>,
}

fn default_port() -> u16 {
    5000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vision_api_key: String::new(),
            usda_api_key: String::new(),
            port: default_port(),
            vision_endpoint: None,
            usda_base_url: None,
            mealdb_base_url: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("platelens");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from the default path, then apply env overrides
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            Config::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load config from an explicit path, no env overrides
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Ok(config)
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("PLATELENS_VISION_API_KEY") {
            if !key.is_empty() {
                self.vision_api_key = key;
            }
        }
        if let Ok(key) = std::env::var("PLATELENS_USDA_API_KEY") {
            if !key.is_empty() {
                self.usda_api_key = key;
            }
        }
    }
}

fn mask(key: &str) -> String {
    if key.is_empty() {
        "(unset)".to_string()
    } else {
        let head: String = key.chars().take(4).collect();
        format!("{head}…")
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Platelens Configuration")?;
        writeln!(f, "=======================")?;
        writeln!(f)?;
        writeln!(f, "Port:            {}", self.port)?;
        writeln!(f, "Vision API key:  {}", mask(&self.vision_api_key))?;
        writeln!(f, "USDA API key:    {}", mask(&self.usda_api_key))?;
        writeln!(
            f,
            "Vision endpoint: {}",
            self.vision_endpoint.as_deref().unwrap_or("(default)")
        )?;
        writeln!(
            f,
            "USDA base URL:   {}",
            self.usda_base_url.as_deref().unwrap_or("(default)")
        )?;
        writeln!(
            f,
            "MealDB base URL: {}",
            self.mealdb_base_url.as_deref().unwrap_or("(default)")
        )?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:     {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.port, 5000);
        assert!(config.vision_api_key.is_empty());
        assert!(config.usda_base_url.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"vision_api_key": "abc123"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.vision_api_key, "abc123");
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn display_masks_keys() {
        let config = Config {
            vision_api_key: "super-secret-key".to_string(),
            ..Default::default()
        };
        let shown = config.to_string();
        assert!(!shown.contains("super-secret-key"));
        assert!(shown.contains("supe…"));
    }

    #[test]
    fn display_masks_multibyte_keys_without_panicking() {
        let config = Config {
            usda_api_key: "éclair-key".to_string(),
            ..Default::default()
        };
        let shown = config.to_string();
        assert!(!shown.contains("éclair-key"));
        assert!(shown.contains("écla…"));
    }
}
