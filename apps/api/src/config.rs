use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::inference::{InferenceConfig, DEFAULT_NAME_WINDOW_CHARS};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;
const DEFAULT_MAX_STORED_BATCHES: usize = 100;

/// Application configuration loaded from environment variables.
/// Every setting has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Working storage root for uploaded documents.
    pub upload_dir: PathBuf,
    pub persist_uploads: bool,
    pub max_upload_bytes: usize,
    pub max_stored_batches: usize,
    pub inference: InferenceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            upload_dir: PathBuf::from("uploads"),
            persist_uploads: true,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_stored_batches: DEFAULT_MAX_STORED_BATCHES,
            inference: InferenceConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            upload_dir: lookup("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            persist_uploads: parse_or(&lookup, "PERSIST_UPLOADS", defaults.persist_uploads)?,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            max_stored_batches: parse_or(
                &lookup,
                "MAX_STORED_BATCHES",
                defaults.max_stored_batches,
            )?,
            inference: InferenceConfig {
                name_window_chars: parse_or(
                    &lookup,
                    "NAME_WINDOW_CHARS",
                    DEFAULT_NAME_WINDOW_CHARS,
                )?,
                email_window_chars: match lookup("EMAIL_WINDOW_CHARS") {
                    Some(raw) => Some(
                        raw.trim()
                            .parse::<usize>()
                            .context("EMAIL_WINDOW_CHARS must be a non-negative integer")?,
                    ),
                    None => None,
                },
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}
