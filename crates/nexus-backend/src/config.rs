use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use nexus_bridge::config::Config;
use tokio::{
    fs::{OpenOptions, create_dir_all, read_to_string},
    io::AsyncWriteExt,
};

/// Errors that can occur while loading or resolving application configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to determine the user's configuration directory. This usually
    /// occurs when required environment variables are missing (e.g., `$HOME`
    /// on Unix or `%APPDATA%` on Windows).
    #[error("failed to obtain user's directories")]
    DirectoriesNotFound,
    /// An I/O error occurred while reading or writing the configuration file.
    #[error("failed to read config: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid TOML or does not match the expected structure.
    #[error("failed to deserialize config: {0}")]
    DeserializeError(#[from] toml::de::Error),
    /// Failed to serialize the configuration to TOML (e.g., when saving changes).
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

fn config_path() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("dev", "nexus", "nexus-shield")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .ok_or(ConfigError::DirectoriesNotFound)
}

/// Loads the application configuration from disk, writing the defaults on
/// first run.
pub async fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path()?).await
}

/// Saves the configuration to `config.toml` in the user's configuration
/// directory, overwriting any existing file.
pub async fn save_config(config: &Config) -> Result<(), ConfigError> {
    save_config_to(&config_path()?, config).await
}

async fn load_config_from(config_path: &Path) -> Result<Config, ConfigError> {
    log::info!("Loading configuration from {config_path:?}");
    if config_path.exists() {
        let contents = read_to_string(config_path).await?;
        return Ok(toml::from_str(&contents)?);
    }

    let config = Config::default();
    if let Some(parent) = config_path.parent() {
        create_dir_all(parent).await?;
    }

    let contents = toml::to_string_pretty(&config)?;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(config_path)
        .await?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    Ok(config)
}

async fn save_config_to(config_path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = config_path.parent() {
        create_dir_all(parent).await?;
    }

    let contents = toml::to_string_pretty(config)?;
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(config_path)
        .await?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use nexus_bridge::config::BootStep;
    use nexus_bridge::stage::LoadingStage;

    use super::*;

    #[tokio::test]
    async fn first_load_writes_the_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_config_from(&path).await.unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let reloaded = load_config_from(&path).await.unwrap();
        assert_eq!(reloaded, Config::default());
    }

    #[tokio::test]
    async fn saved_config_is_loaded_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.loader.typing_interval_ms = 20;
        config.notifications.default_duration_ms = 1500;
        config.boot_sequence.announce_events = false;
        config.boot_sequence.steps = vec![BootStep::new(LoadingStage::QuantumSync, 900, 100)];

        save_config_to(&path, &config).await.unwrap();
        assert_eq!(load_config_from(&path).await.unwrap(), config);

        // Saving a shorter file truncates the previous one.
        save_config_to(&path, &Config::default()).await.unwrap();
        assert_eq!(load_config_from(&path).await.unwrap(), Config::default());
    }

    #[tokio::test]
    async fn malformed_file_is_a_deserialize_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "[loader\ntyping_interval_ms = ").await.unwrap();

        let error = load_config_from(&path).await.unwrap_err();
        assert!(matches!(error, ConfigError::DeserializeError(_)));
    }
}
