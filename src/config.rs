use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.nytimes.com/svc/topstories/v2/";
pub const API_KEY_ENV: &str = "NYT_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub header: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub api_key: String,
    pub base_url: String,
    pub header: Option<String>,
}

pub fn load(config_override: Option<String>) -> Result<RuntimeConfig> {
    let file = match config_override {
        Some(path_str) => {
            let p = PathBuf::from(&path_str);
            if !p.is_file() {
                bail!("config file not found: {}", path_str);
            }
            read_file(&p)?
        }
        None => match default_config_path() {
            Some(path) if path.is_file() => read_file(&path)?,
            _ => AppConfig::default(),
        },
    };
    resolve(file, env::var(API_KEY_ENV).ok())
}

fn read_file(path: &Path) -> Result<AppConfig> {
    let txt = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&txt).with_context(|| format!("failed to parse toml: {}", path.display()))
}

/// Merges the file settings with the key taken from the environment, which wins.
fn resolve(file: AppConfig, env_key: Option<String>) -> Result<RuntimeConfig> {
    let api_key = env_key
        .or(file.api_key)
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            anyhow!(
                "no API key configured: set {} or api_key in config.toml",
                API_KEY_ENV
            )
        })?;

    let base_url = file.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.into());
    let parsed =
        Url::parse(&base_url).with_context(|| format!("invalid base_url: {}", base_url))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => bail!("base_url must be http or https, got {}", other),
    }
    if !base_url.ends_with('/') {
        bail!("base_url must end with '/': {}", base_url);
    }

    Ok(RuntimeConfig {
        api_key,
        base_url,
        header: file.header,
    })
}

fn default_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let mut p = PathBuf::from(xdg);
        p.push("top-stories");
        p.push("config.toml");
        return Some(p);
    }
    if let Ok(home) = env::var("HOME") {
        let mut p = PathBuf::from(home);
        p.push(".config");
        p.push("top-stories");
        p.push("config.toml");
        return Some(p);
    }
    None
}
