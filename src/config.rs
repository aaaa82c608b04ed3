//! Demo Configuration
//!
//! Handles parsing and management of boundary.toml configuration files.
//! Only the `boundary-demo` driver reads configuration; the exported C
//! functions take everything they need as arguments.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// File name searched for by [`BoundaryConfig::find_and_load`].
pub const CONFIG_FILE_NAME: &str = "boundary.toml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Root configuration structure matching boundary.toml.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BoundaryConfig {
    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Inputs for each demo call
    #[serde(default)]
    pub demo: DemoConfig,
}

impl BoundaryConfig {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: BoundaryConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the current directory or parents.
    pub fn load_from_cwd() -> ConfigResult<Self> {
        let cwd = std::env::current_dir().map_err(ConfigError::Io)?;
        Self::find_and_load(&cwd)
    }

    /// Find and load configuration by searching up from the given directory.
    pub fn find_and_load(start_dir: &Path) -> ConfigResult<Self> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Self::load(&config_path);
            }
            if !dir.pop() {
                // Reached root without finding config
                return Ok(Self::default());
            }
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Inputs for the demo run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemoConfig {
    /// Value passed to both doubling paths
    #[serde(default = "default_double_input")]
    pub double_input: i32,

    /// Strings checked for the forbidden food
    #[serde(default = "default_hotdog_samples")]
    pub hotdog_samples: Vec<String>,

    /// String whose characters and bytes are counted
    #[serde(default = "default_sample_text")]
    pub sample_text: String,

    /// Array handed to sum_of_even
    #[serde(default = "default_even_numbers")]
    pub even_numbers: Vec<u32>,

    /// Tuple handed to flip_things_around
    #[serde(default = "default_tuple")]
    pub tuple: [u32; 2],

    /// Zip codes queried after populate; the first two are subtracted
    #[serde(default = "default_zip_codes")]
    pub zip_codes: Vec<String>,

    /// Array incremented directly and then through the native helper
    #[serde(default = "default_increment")]
    pub increment: Vec<i32>,
}

fn default_double_input() -> i32 {
    4
}

fn default_hotdog_samples() -> Vec<String> {
    vec![
        "This string has \"hotdog\" in it".to_string(),
        "This string doesn't have the forbidden food".to_string(),
    ]
}

fn default_sample_text() -> String {
    "göes to élevên".to_string()
}

fn default_even_numbers() -> Vec<u32> {
    vec![1, 2, 3, 4, 5, 6]
}

fn default_tuple() -> [u32; 2] {
    [10, 20]
}

fn default_zip_codes() -> Vec<String> {
    vec!["90210".to_string(), "20500".to_string()]
}

fn default_increment() -> Vec<i32> {
    (0..8).collect()
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            double_input: default_double_input(),
            hotdog_samples: default_hotdog_samples(),
            sample_text: default_sample_text(),
            even_numbers: default_even_numbers(),
            tuple: default_tuple(),
            zip_codes: default_zip_codes(),
            increment: default_increment(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BoundaryConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.demo.double_input, 4);
        assert_eq!(config.demo.tuple, [10, 20]);
        assert_eq!(config.demo.increment, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
[logging]
level = "debug"

[demo]
double_input = 21
even_numbers = [2, 4]
zip_codes = ["00001"]
"#;
        let config: BoundaryConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.demo.double_input, 21);
        assert_eq!(config.demo.even_numbers, vec![2, 4]);
        assert_eq!(config.demo.zip_codes, vec!["00001".to_string()]);
        // Unspecified fields fall back to defaults
        assert_eq!(config.demo.sample_text, "göes to élevên");
    }

    #[test]
    fn test_empty_config() {
        let config: BoundaryConfig = toml::from_str("").unwrap();
        assert_eq!(config, BoundaryConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("boundary-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);

        let mut config = BoundaryConfig::default();
        config.demo.tuple = [1, 2];
        config.save(&path).unwrap();

        let loaded = BoundaryConfig::find_and_load(&dir).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_missing() {
        let err = BoundaryConfig::load(Path::new("/nonexistent/boundary.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
