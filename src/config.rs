//! Configuration management for CineSearch
//!
//! Config is read from ~/.config/cinesearch/config.toml (or `--config`).
//! Credentials come from the environment or that file, never from the binary.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::tmdb::{self, TmdbClient};

pub const API_KEY_ENV: &str = "TMDB_API_KEY";
pub const ACCESS_TOKEN_ENV: &str = "TMDB_READ_ACCESS_TOKEN";

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB v3 API key, sent as the `api_key` query parameter
    pub tmdb_api_key: Option<String>,
    /// TMDB v4 read-access token, sent as a bearer token
    pub tmdb_access_token: Option<String>,
    pub api_base_url: Option<String>,
    pub image_base_url: Option<String>,
    pub placeholder_image: Option<String>,
    pub request_timeout_secs: Option<u64>,
    /// tracing filter directive, e.g. "info" or "cinesearch=debug"
    pub log_level: Option<String>,
}

/// Resolved TMDB credentials; at least one is present
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub api_key: Option<String>,
    pub access_token: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Get config file path (~/.config/cinesearch/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cinesearch").join("config.toml"))
    }

    /// Load config from the default path, or defaults if not found
    pub fn load() -> Self {
        Self::path().map(|p| Self::load_from(&p)).unwrap_or_default()
    }

    /// Load config from a file; missing or unparseable files yield defaults
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Credentials from the process environment, falling back to the file
    pub fn credentials(&self) -> Result<Credentials> {
        self.resolve_credentials(
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(ACCESS_TOKEN_ENV).ok(),
        )
    }

    /// Environment values win over file values; blank values count as unset
    pub fn resolve_credentials(
        &self,
        env_key: Option<String>,
        env_token: Option<String>,
    ) -> Result<Credentials> {
        let api_key = non_empty(env_key).or_else(|| non_empty(self.tmdb_api_key.clone()));
        let access_token =
            non_empty(env_token).or_else(|| non_empty(self.tmdb_access_token.clone()));

        if api_key.is_none() && access_token.is_none() {
            let location = Self::path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "config.toml".to_string());
            bail!(
                "No TMDB credentials configured. Set {} or {}, or add tmdb_api_key to {}",
                API_KEY_ENV,
                ACCESS_TOKEN_ENV,
                location
            );
        }

        Ok(Credentials {
            api_key,
            access_token,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.request_timeout_secs
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
            .unwrap_or(tmdb::DEFAULT_TIMEOUT)
    }

    pub fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Build a TMDB client from this config and the given credentials
    pub fn build_client(&self, credentials: Credentials) -> TmdbClient {
        let base_url = self
            .api_base_url
            .as_deref()
            .unwrap_or(tmdb::DEFAULT_BASE_URL);

        let mut client =
            TmdbClient::with_base_url(credentials.api_key.unwrap_or_default(), base_url)
                .with_timeout(self.timeout());
        if let Some(token) = credentials.access_token {
            client = client.with_access_token(token);
        }
        if let Some(url) = &self.image_base_url {
            client = client.with_image_base_url(url.as_str());
        }
        if let Some(placeholder) = &self.placeholder_image {
            client = client.with_placeholder(placeholder.as_str());
        }
        client
    }

    /// Resolve credentials and build the client in one go
    pub fn client(&self) -> Result<TmdbClient> {
        let credentials = self.credentials()?;
        Ok(self.build_client(credentials))
    }
}
