use crate::api::utils::DEFAULT_MAX_ATTEMPTS;
use crate::error::{RestavoError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";
const CONFIG_DIR: &str = ".restavo";
const CONFIG_FILE: &str = "config.toml";

/// Central configuration for Restavo
#[derive(Debug, Clone, PartialEq)]
pub struct RestavoConfig {
    pub base_url: String,
    /// Attempt bound for the chat endpoint's rate-limit retries
    pub max_chat_attempts: u32,
    pub request_timeout_secs: u64,
    pub default_city: String,
    pub default_min_rating: f64,
    pub default_stay_nights: u32,
}

impl Default for RestavoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_chat_attempts: DEFAULT_MAX_ATTEMPTS,
            request_timeout_secs: 30,
            default_city: "Dubai".to_string(),
            default_min_rating: 4.0,
            default_stay_nights: 1,
        }
    }
}

/// Partial config as read from a TOML file; absent keys keep the lower layer's value.
#[derive(Debug, Default, Deserialize)]
struct ConfigLayer {
    base_url: Option<String>,
    max_chat_attempts: Option<u32>,
    request_timeout_secs: Option<u64>,
    default_city: Option<String>,
    default_min_rating: Option<f64>,
    default_stay_nights: Option<u32>,
}

impl RestavoConfig {
    /// Load defaults, then `~/.restavo/config.toml`, then the workspace file, then `explicit`.
    pub fn load(workspace: &Path, explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(home) = std::env::var_os("HOME") {
            let global = PathBuf::from(home).join(CONFIG_DIR).join(CONFIG_FILE);
            config.apply_file(&global)?;
        }

        config.apply_file(&workspace.join(CONFIG_DIR).join(CONFIG_FILE))?;

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(RestavoError::Config(format!(
                    "Config file {} does not exist",
                    path.display()
                )));
            }
            config.apply_file(path)?;
        }

        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(path).map_err(|e| RestavoError::Context {
            message: format!("Failed to read config from {}", path.display()),
            source: Box::new(e.into()),
        })?;
        let layer: ConfigLayer = toml::from_str(&content).map_err(|e| {
            RestavoError::Config(format!("Invalid config {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), "Applying config file");
        self.apply_layer(layer);
        Ok(())
    }

    fn apply_layer(&mut self, layer: ConfigLayer) {
        if let Some(base_url) = layer.base_url {
            self.base_url = base_url;
        }
        if let Some(attempts) = layer.max_chat_attempts {
            self.max_chat_attempts = attempts;
        }
        if let Some(timeout) = layer.request_timeout_secs {
            self.request_timeout_secs = timeout;
        }
        if let Some(city) = layer.default_city {
            self.default_city = city;
        }
        if let Some(rating) = layer.default_min_rating {
            self.default_min_rating = rating;
        }
        if let Some(nights) = layer.default_stay_nights {
            self.default_stay_nights = nights;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(RestavoError::Config(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.max_chat_attempts == 0 {
            return Err(RestavoError::Config(
                "max_chat_attempts must be at least 1".to_string(),
            ));
        }
        if !(0.0..=5.0).contains(&self.default_min_rating) {
            return Err(RestavoError::Config(format!(
                "default_min_rating must be between 0 and 5, got {}",
                self.default_min_rating
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(RestavoError::Config(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.default_stay_nights == 0 {
            return Err(RestavoError::Config(
                "default_stay_nights must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = RestavoConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_chat_attempts, 5);
        assert_eq!(config.default_city, "Dubai");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_workspace_file_overrides_defaults() {
        let workspace = TempDir::new().unwrap();
        let dir = workspace.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(CONFIG_FILE),
            "base_url = \"https://hotels.example.com/api\"\ndefault_city = \"Cairo\"\n",
        )
        .unwrap();

        let mut config = RestavoConfig::default();
        config
            .apply_file(&workspace.path().join(CONFIG_DIR).join(CONFIG_FILE))
            .unwrap();

        assert_eq!(config.base_url, "https://hotels.example.com/api");
        assert_eq!(config.default_city, "Cairo");
        assert_eq!(config.max_chat_attempts, 5);
    }

    #[test]
    fn test_explicit_file_is_applied_last() {
        let workspace = TempDir::new().unwrap();
        let explicit = workspace.path().join("custom.toml");
        std::fs::write(&explicit, "max_chat_attempts = 2\n").unwrap();

        let config = RestavoConfig::load(workspace.path(), Some(&explicit)).unwrap();
        assert_eq!(config.max_chat_attempts, 2);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let workspace = TempDir::new().unwrap();
        let missing = workspace.path().join("nope.toml");
        let result = RestavoConfig::load(workspace.path(), Some(&missing));
        assert!(matches!(result, Err(RestavoError::Config(_))));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let workspace = TempDir::new().unwrap();
        let path = workspace.path().join("bad.toml");
        std::fs::write(&path, "base_url = [").unwrap();

        let mut config = RestavoConfig::default();
        assert!(matches!(
            config.apply_file(&path),
            Err(RestavoError::Config(_))
        ));
    }

    #[test]
    fn test_unreadable_file_keeps_path_in_error() {
        let workspace = TempDir::new().unwrap();
        let path = workspace.path().join("config.toml");
        std::fs::create_dir_all(&path).unwrap();

        let mut config = RestavoConfig::default();
        match config.apply_file(&path) {
            Err(RestavoError::Context { message, source }) => {
                assert!(message.contains("config.toml"));
                assert!(matches!(*source, RestavoError::Io(_)));
            }
            other => panic!("Expected Context error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation() {
        let config = RestavoConfig {
            base_url: "ftp://nope".to_string(),
            ..RestavoConfig::default()
        };
        assert!(config.validate().is_err());

        let config = RestavoConfig {
            max_chat_attempts: 0,
            ..RestavoConfig::default()
        };
        assert!(config.validate().is_err());

        let config = RestavoConfig {
            request_timeout_secs: 0,
            ..RestavoConfig::default()
        };
        assert!(matches!(config.validate(), Err(RestavoError::Config(_))));

        let config = RestavoConfig {
            default_min_rating: 7.5,
            ..RestavoConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
