use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_CONFIG_FILE: &str = "medicine.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    base_url: Option<String>,
}

/// Defaults, then the config file, then `base_url` from the command line
/// (which clap already resolved against `MEDICINE_API_URL`).
///
/// An explicit `config_path` must exist; the default file is optional.
pub fn load_settings(config_path: Option<&Path>, base_url: Option<String>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match config_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    if let Some(file_cfg) = read_config_file(&path, required)? {
        if let Some(v) = file_cfg.base_url {
            settings.base_url = v;
        }
    }

    if let Some(v) = base_url {
        settings.base_url = v;
    }

    settings.base_url = validate_base_url(&settings.base_url)?;
    Ok(settings)
}

fn read_config_file(path: &Path, required: bool) -> anyhow::Result<Option<FileConfig>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) if !required => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config file '{}'", path.display()));
        }
    };
    let file_cfg = toml::from_str(&raw).with_context(|| format!("invalid config file '{}'", path.display()))?;
    Ok(Some(file_cfg))
}

fn validate_base_url(raw: &str) -> anyhow::Result<String> {
    let raw = raw.trim();
    let url = Url::parse(raw).with_context(|| format!("invalid base url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("base url '{raw}' must use http or https");
    }
    Ok(raw.trim_end_matches('/').to_string())
}
