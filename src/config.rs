use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FieldmapConfig {
    pub logging: LoggingConfig,
    pub embedding: EmbeddingConfig,
    pub matching: MatchingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: String,
    pub model: String,
    pub cache_dir: String,
}

/// Default weights and threshold for the matching run. Each value can be
/// overridden per invocation with CLI flags.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MatchingConfig {
    pub desc_weight: f32,
    pub field_weight: f32,
    pub threshold: f32,
}

impl Default for FieldmapConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            embedding: EmbeddingConfig::default(),
            matching: MatchingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        let cache_dir = default_fieldmap_dir()
            .join("models")
            .to_string_lossy()
            .into_owned();
        Self {
            provider: "local".into(),
            model: "all-MiniLM-L6-v2".into(),
            cache_dir,
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            desc_weight: 0.7,
            field_weight: 0.3,
            threshold: 0.5,
        }
    }
}

/// Returns `~/.fieldmap/`
pub fn default_fieldmap_dir() -> PathBuf {
    dirs::home_dir()
        .expect("home directory must exist")
        .join(".fieldmap")
}

/// Returns the default config file path: `~/.fieldmap/config.toml`
pub fn default_config_path() -> PathBuf {
    default_fieldmap_dir().join("config.toml")
}

impl FieldmapConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            FieldmapConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (FIELDMAP_LOG_LEVEL, FIELDMAP_MODEL_DIR).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("FIELDMAP_LOG_LEVEL") {
            self.logging.log_level = val;
        }
        if let Ok(val) = std::env::var("FIELDMAP_MODEL_DIR") {
            self.embedding.cache_dir = val;
        }
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .expect("home directory must exist")
            .join(rest)
    } else {
        PathBuf::from(path)
    }
}
