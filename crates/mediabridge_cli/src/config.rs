//! Configuration file handling for the CLI

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use mediabridge_core::config::{BridgeConfig, CONFIG_FILE};

/// Load configuration from a file or directory, falling back to defaults
/// when no path was given and no `mediabridge.toml` exists in the working directory
pub fn load_config(path: Option<&Path>) -> Result<BridgeConfig> {
    let Some(path) = path else {
        let local = Path::new(CONFIG_FILE);
        if local.exists() {
            return load_config(Some(local));
        }
        tracing::debug!("No {} found, using defaults", CONFIG_FILE);
        return Ok(BridgeConfig::default());
    };

    let config_path = if path.is_dir() {
        path.join(CONFIG_FILE)
    } else {
        path.to_path_buf()
    };

    if !config_path.exists() {
        anyhow::bail!(
            "No {} found at {}. Run `mediabridge init` to create one.",
            CONFIG_FILE,
            config_path.display()
        );
    }

    BridgeConfig::load(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))
}

/// Write the default configuration into `dir`
pub fn write_default_config(dir: &Path, force: bool) -> Result<std::path::PathBuf> {
    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let content = BridgeConfig::default()
        .to_toml()
        .context("Failed to serialize config")?;
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}
