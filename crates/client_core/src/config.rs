use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_SETTINGS_FILE: &str = "dashboard.toml";
const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub service_url: String,
    pub request_timeout_secs: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    /// `None` when the timeout is disabled (`request_timeout_secs = 0`).
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn with_service_url(mut self, service_url: &str) -> Self {
        self.service_url = normalize_service_url(service_url);
        self
    }
}

/// Defaults, then the TOML file (explicit path or `dashboard.toml` in the
/// working directory), then environment variables.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
    match fs::read_to_string(&path) {
        Ok(raw) => apply_file_overrides(&mut settings, &raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?,
        Err(err) if config_path.is_some() => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()));
        }
        Err(_) => {}
    }

    apply_env_overrides(&mut settings);
    validate_service_url(&settings.service_url)?;
    Ok(settings)
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, toml::Value>>(raw)?;

    if let Some(v) = file_cfg.get("service_url").and_then(toml::Value::as_str) {
        settings.service_url = normalize_service_url(v);
    }
    if let Some(v) = file_cfg.get("request_timeout_secs") {
        settings.request_timeout_secs = match v {
            toml::Value::Integer(secs) => u64::try_from(*secs)
                .context("request_timeout_secs must not be negative")?,
            toml::Value::String(secs) => secs
                .trim()
                .parse()
                .context("request_timeout_secs must be a whole number of seconds")?,
            _ => anyhow::bail!("request_timeout_secs must be a whole number of seconds"),
        };
    }
    if let Some(v) = file_cfg.get("log_filter").and_then(toml::Value::as_str) {
        settings.log_filter = v.to_string();
    }

    Ok(())
}

fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(v) = std::env::var("SCORING_SERVICE_URL") {
        settings.service_url = normalize_service_url(&v);
    }
    if let Ok(v) = std::env::var("APP__SERVICE_URL") {
        settings.service_url = normalize_service_url(&v);
    }

    if let Ok(v) = std::env::var("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    if let Ok(v) = std::env::var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

fn normalize_service_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Settings::default().service_url;
    }
    trimmed.to_string()
}

fn validate_service_url(service_url: &str) -> anyhow::Result<()> {
    let parsed = url::Url::parse(service_url)
        .with_context(|| format!("invalid scoring service url '{service_url}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("scoring service url '{service_url}' must use http or https");
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
