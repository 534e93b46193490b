use anyhow::{Context, Result, bail};
use colored::*;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".smash.toml";

#[derive(Debug, Default, Deserialize)]
pub struct SmashConfig {
    pub prompt: Option<String>,
    pub watch_interval: Option<u64>,
    #[serde(default, rename = "alias")]
    pub aliases: Vec<AliasConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AliasConfig {
    pub name: String,
    pub command: String,
}

/// Loads the explicit path if given, else `~/.smash.toml` when it exists,
/// else the built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<SmashConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("❌ Config file not found: {:?}", path);
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(SmashConfig::default()),
        },
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    eprintln!("{} Loaded config from: {}", "🌿".green(), path.display().to_string().bold());
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<SmashConfig> {
    let config: SmashConfig = toml::from_str(content)?;
    if config.watch_interval == Some(0) {
        bail!("watch_interval must be a positive number of seconds");
    }
    Ok(config)
}

fn default_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE_NAME))
}
