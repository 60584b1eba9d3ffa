use crate::error::{Result, VocabError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "vocab.toml";
pub const CONFIG_ENV_VAR: &str = "VOCAB_CONFIG";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub storage_key: String,
    pub sample_sizes: Vec<usize>,
    pub default_sample_size: usize,
    pub rows_per_page: usize,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("vocab.sqlite3"),
            storage_key: "wordDatasets".to_string(),
            sample_sizes: vec![5, 10, 15, 20],
            default_sample_size: 10,
            rows_per_page: 10,
            window_width: 1000.0,
            window_height: 700.0,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sample_sizes.is_empty() || self.sample_sizes.contains(&0) {
            return Err(VocabError::Config(
                "sample_sizes must list at least one positive size".to_string(),
            ));
        }
        if !self.sample_sizes.contains(&self.default_sample_size) {
            return Err(VocabError::Config(format!(
                "default_sample_size {} is not one of sample_sizes {:?}",
                self.default_sample_size, self.sample_sizes
            )));
        }
        if self.rows_per_page == 0 {
            return Err(VocabError::Config("rows_per_page must be positive".to_string()));
        }
        if self.storage_key.is_empty() {
            return Err(VocabError::Config("storage_key must not be empty".to_string()));
        }
        Ok(())
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig =
        toml::from_str(contents).map_err(|e| VocabError::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Reads the config file; a missing file means the defaults
pub fn load_config_from_file(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = fs::read_to_string(path)?;
    parse_config(&contents).map_err(|e| match e {
        VocabError::Config(msg) => {
            VocabError::Config(format!("Failed to parse {}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// `$VOCAB_CONFIG` when set, `vocab.toml` otherwise
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}
