use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use client_core::DEFAULT_ENDPOINT;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "predictor.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub request_timeout_secs: Option<u64>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            request_timeout_secs: None,
            log_level: "info".into(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    endpoint: Option<String>,
    request_timeout_secs: Option<u64>,
    log_level: Option<String>,
}

/// Defaults, then the config file, then environment variables.
///
/// A missing default config file is fine; a missing file named explicitly
/// with `--config` is an error.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, explicit) = match config_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    if explicit || path.exists() {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.endpoint {
        settings.endpoint = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = Some(v);
    }
    if let Some(v) = file_cfg.log_level {
        settings.log_level = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("PREDICTOR_ENDPOINT") {
        settings.endpoint = v;
    }
    if let Some(v) = lookup("APP__ENDPOINT") {
        settings.endpoint = v;
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = Some(parsed);
        }
    }

    if let Some(v) = lookup("APP__LOG_LEVEL") {
        settings.log_level = v;
    }
}
