use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context};
use client_core::{normalize_api_base, DEFAULT_API_BASE, DEFAULT_REQUEST_TIMEOUT};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "docqa.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
        }
    }
}

impl Settings {
    /// A zero timeout would fail every request, so it is refused up front.
    pub fn request_timeout(&self) -> anyhow::Result<Duration> {
        if self.request_timeout_secs == 0 {
            bail!("request timeout must be at least 1 second");
        }
        Ok(Duration::from_secs(self.request_timeout_secs))
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then `config_path` (or `docqa.toml`), then environment.
pub fn load_settings(config_path: Option<&Path>) -> Settings {
    let mut settings = Settings::default();
    let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    apply_file(&mut settings, path);
    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file(settings: &mut Settings, path: &Path) {
    let Ok(raw) = fs::read_to_string(path) else {
        return;
    };
    match toml::from_str::<FileSettings>(&raw) {
        Ok(file_cfg) => {
            if let Some(v) = file_cfg.api_base {
                settings.api_base = v;
            }
            if let Some(v) = file_cfg.request_timeout_secs {
                settings.request_timeout_secs = v;
            }
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "ignoring unreadable config file");
        }
    }
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("DOCQA_API_BASE") {
        settings.api_base = v;
    }
    if let Some(v) = lookup("APP__API_BASE") {
        settings.api_base = v;
    }

    for key in ["DOCQA_REQUEST_TIMEOUT_SECS", "APP__REQUEST_TIMEOUT_SECS"] {
        if let Some(v) = lookup(key) {
            if let Ok(parsed) = v.trim().parse::<u64>() {
                settings.request_timeout_secs = parsed;
            }
        }
    }
}

pub fn validate_api_base(raw_api_base: &str) -> anyhow::Result<String> {
    let api_base = normalize_api_base(raw_api_base);
    let url = Url::parse(&api_base).with_context(|| format!("invalid API base URL '{api_base}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("API base URL must use http or https, got '{}'", url.scheme());
    }
    Ok(api_base)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
