use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

/// Root configuration structure, deserialized from `.license-bundlr/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub filter: FilterConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Notice file destination, resolved relative to the project path
    /// unless absolute.
    pub path: PathBuf,
    /// Product name used in the aggregate header. When unset, the project
    /// directory name is used.
    pub product: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            path: PathBuf::from("THIRD-PARTY-LICENSES.txt"),
            product: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FilterConfig {
    /// Crates whose name starts with any of these prefixes are the
    /// project's own sub-crates and are excluded from the notice file.
    pub internal_prefixes: Vec<String>,
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.license-bundlr/config.toml`
/// 3. `~/.config/license-bundlr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let project_config = project_path.join(".license-bundlr").join("config.toml");
    if project_config.exists() {
        let content = std::fs::read_to_string(&project_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-bundlr")
            .join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}
