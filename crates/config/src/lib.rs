//! Layered configuration for feedkit.
//!
//! Sources are merged in increasing order of precedence:
//!
//! 1. Built-in defaults ([`Config::default()`]).
//! 2. A configuration file, in TOML, YAML or JSON (chosen by extension).
//! 3. Environment variables prefixed with `FEEDKIT_`, using `__` to separate
//!    nested keys (`FEEDKIT_API__TIMEOUT_SECS=10` sets `api.timeout_secs`).
//!
//! The merged result is validated before it is returned, so a [`Config`]
//! obtained through [`Config::load()`] or [`Config::load_from()`] is always
//! usable as-is.
//!
//! ```toml
//! [api]
//! base_url = "https://api.example.com/"
//! timeout_secs = 30
//!
//! [cache]
//! enabled = true
//! max_age_days = 7
//! ```

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::instrument;
use url::Url;

pub const ENV_PREFIX: &str = "FEEDKIT_";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Root that endpoint paths are joined onto. Required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<Url>,
    pub timeout_secs: u64,
}
impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// When disabled, nothing is kept and every cache lookup misses.
    pub enabled: bool,
    pub max_age_days: u32,
}
impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_age_days: 7,
        }
    }
}

impl Config {
    /// Platform configuration file location, e.g. `~/.config/feedkit/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "feedkit").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from the default file (when it exists) and the environment.
    #[instrument(level = "debug")]
    pub fn load() -> Result<Self> {
        let path = Self::default_path().filter(|path| path.is_file());
        if path.is_none() {
            tracing::debug!("No configuration file found; using defaults and environment");
        }
        Self::extract(path.as_deref())
    }

    /// Load from `path` and the environment. The file must exist.
    #[instrument(level = "debug")]
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            exn::bail!(ErrorKind::NotFound);
        }
        Self::extract(Some(path))
    }

    fn extract(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = Self::merge_file(figment, path)?;
        }
        let config: Self = figment
            .merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR))
            .extract()
            .or_raise(|| ErrorKind::Extract)?;
        config.validate()?;
        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }

    fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
        let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
        Ok(match extension.as_deref() {
            Some("toml") => figment.merge(Toml::file(path)),
            Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
            Some("json") => figment.merge(Json::file(path)),
            _ => {
                tracing::warn!(path = %path.display(), "Unrecognised configuration file extension");
                exn::bail!(ErrorKind::UnsupportedFormat);
            },
        })
    }

    pub fn validate(&self) -> Result<()> {
        let Some(base_url) = &self.api.base_url else {
            exn::bail!(ErrorKind::Invalid("api.base_url is required"));
        };
        if base_url.cannot_be_a_base() {
            exn::bail!(ErrorKind::Invalid("api.base_url must be able to hold paths"));
        }
        if self.api.timeout_secs == 0 {
            exn::bail!(ErrorKind::Invalid("api.timeout_secs must be positive"));
        }
        if self.cache.max_age_days == 0 {
            exn::bail!(ErrorKind::Invalid("cache.max_age_days must be positive"));
        }
        Ok(())
    }
}
