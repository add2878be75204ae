use crate::store::{APP_FOLDER_NAME, STATE_FILE_NAME};
use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "TASKAID_DATA_DIR";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    #[serde(default = "default_app_folder_name")]
    pub app_folder_name: String,
    #[serde(default = "default_state_file_name")]
    pub state_file_name: String,
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            app_folder_name: default_app_folder_name(),
            state_file_name: default_state_file_name(),
            data_dir: None,
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        validate_file_name("app_folder_name", &self.app_folder_name)?;
        validate_file_name("state_file_name", &self.state_file_name)?;
        Ok(())
    }

    /// Environment override for the base data directory, applied after file values.
    pub fn apply_env(&mut self) {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
    }
}

pub fn load_config(config_path: Option<&Path>) -> Result<StoreConfig> {
    let mut config = match config_path {
        Some(path) => load_config_file(path)?,
        None => StoreConfig::default(),
    };
    config.apply_env();
    match config_path {
        Some(path) => config
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?,
        None => config.validate()?,
    }
    Ok(config)
}

pub fn load_config_file(config_path: &Path) -> Result<StoreConfig> {
    let text = std::fs::read_to_string(config_path)
        .with_context(|| format!("failed to read config: {}", config_path.display()))?;
    let mut config: StoreConfig = toml::from_str(&text)
        .with_context(|| format!("failed to parse toml in {}", config_path.display()))?;
    if let Some(dir) = config.data_dir.take() {
        config.data_dir = Some(resolve_path(config_path, &dir)?);
    }
    Ok(config)
}

pub fn resolve_path(base_config_path: &Path, maybe_relative: &Path) -> Result<PathBuf> {
    if maybe_relative.is_absolute() {
        return Ok(maybe_relative.to_path_buf());
    }

    let parent = base_config_path.parent().ok_or_else(|| {
        anyhow!(
            "config has no parent directory: {}",
            base_config_path.display()
        )
    })?;

    Ok(parent.join(maybe_relative))
}

fn validate_file_name(field: &str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        bail!("{field} must not be empty");
    }
    if trimmed == "." || trimmed == ".." || trimmed.contains(['/', '\\']) {
        bail!("{field} must be a single path component, got {value:?}");
    }
    Ok(())
}

fn default_app_folder_name() -> String {
    APP_FOLDER_NAME.to_string()
}

fn default_state_file_name() -> String {
    STATE_FILE_NAME.to_string()
}
