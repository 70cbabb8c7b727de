//! Shared configuration for SmartStore tools.
//!
//! TOML profiles layered with environment overrides, and translation to
//! `smartstore_core::BackendConfig`. The CLI adds `GlobalOpts`-aware
//! wrappers on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use smartstore_core::{BackendConfig, BackendMode, ResourceKind, RetryPolicy};

/// Prefix of environment overrides; nested keys are separated by `__`
/// (`SMARTSTORE_DEFAULTS__TIMEOUT=5`).
pub const ENV_PREFIX: &str = "SMARTSTORE_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub backend: BackendMode,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Retries after the initial attempt.
    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            backend: BackendMode::default(),
            timeout: default_timeout(),
            retries: default_retries(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    10
}
fn default_retries() -> u32 {
    3
}

/// A named backend profile. Unset fields fall back to `[defaults]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Products collection URL (default `http://localhost:8081/api/products`).
    pub products_url: Option<String>,

    /// Categories collection URL (default `http://localhost:8082/api/categories`).
    pub categories_url: Option<String>,

    /// `remote` or `memory`.
    pub backend: Option<BackendMode>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override retry count.
    pub retries: Option<u32>,

    /// Pause between retries, in milliseconds.
    pub retry_backoff_ms: Option<u64>,
}

impl Profile {
    /// A profile pointing both collections at one host
    /// (`http://host:8080` → `/api/products`, `/api/categories`).
    pub fn for_host(host: &str) -> Self {
        let host = host.trim_end_matches('/');
        Self {
            products_url: Some(format!("{host}{}", ResourceKind::Product.endpoint())),
            categories_url: Some(format!("{host}{}", ResourceKind::Category.endpoint())),
            ..Self::default()
        }
    }
}

impl Config {
    /// Name of the profile to use: `requested`, else `default_profile`,
    /// else `"default"`.
    pub fn profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    /// Resolve a profile by name.
    ///
    /// A missing *default* profile resolves to an empty one (all defaults);
    /// a missing explicitly requested profile is an error.
    pub fn resolve_profile(&self, requested: Option<&str>) -> Result<(String, Profile), ConfigError> {
        let name = self.profile_name(requested);
        match self.profiles.get(&name) {
            Some(profile) => Ok((name, profile.clone())),
            None if requested.is_none() => Ok((name, Profile::default())),
            None => Err(ConfigError::UnknownProfile { name }),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "smartstore", "smartstore").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("smartstore");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load defaults, then `path` (if it exists), then `SMARTSTORE_*` variables.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to core ─────────────────────────────────────────────

/// Build a `BackendConfig` from a profile and the global defaults.
pub fn profile_to_backend_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<BackendConfig, ConfigError> {
    let products_url = parse_url(
        "products_url",
        profile.products_url.as_deref(),
        ResourceKind::Product,
    )?;
    let categories_url = parse_url(
        "categories_url",
        profile.categories_url.as_deref(),
        ResourceKind::Category,
    )?;

    let retry = RetryPolicy {
        retries: profile.retries.unwrap_or(defaults.retries),
        backoff: Duration::from_millis(profile.retry_backoff_ms.unwrap_or(0)),
    };

    Ok(BackendConfig {
        mode: profile.backend.unwrap_or(defaults.backend),
        products_url,
        categories_url,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        retry,
    })
}

fn parse_url(field: &str, raw: Option<&str>, kind: ResourceKind) -> Result<url::Url, ConfigError> {
    let raw = raw.map_or_else(|| kind.default_base_url(), str::to_owned);
    let url: url::Url = raw.parse().map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL '{raw}': {e}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: format!("expected an http(s) URL, got '{raw}'"),
        });
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_jail| {
            let config = load_config_from(Path::new("absent.toml")).unwrap();
            assert_eq!(config, Config::default());
            assert_eq!(config.defaults.timeout, 10);
            Ok(())
        });
    }

    #[test]
    fn file_then_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                default_profile = "staging"

                [defaults]
                retries = 1

                [profiles.staging]
                products_url = "http://staging:8081/api/products"
                backend = "memory"
                "#,
            )?;
            jail.set_env("SMARTSTORE_DEFAULTS__TIMEOUT", "5");

            let config = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(config.defaults.timeout, 5);
            assert_eq!(config.defaults.retries, 1);

            let (name, profile) = config.resolve_profile(None).unwrap();
            assert_eq!(name, "staging");
            assert_eq!(profile.backend, Some(BackendMode::Memory));
            Ok(())
        });
    }

    #[test]
    fn unknown_explicit_profile_is_an_error() {
        let config = Config::default();
        assert!(config.resolve_profile(None).is_ok());
        let err = config.resolve_profile(Some("prod")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile { .. }));
    }

    #[test]
    fn profile_translation_uses_defaults() {
        let backend = profile_to_backend_config(&Profile::default(), &Defaults::default()).unwrap();
        assert_eq!(backend, BackendConfig::default());
    }

    #[test]
    fn profile_overrides() {
        let profile = Profile {
            timeout: Some(2),
            retries: Some(0),
            retry_backoff_ms: Some(250),
            ..Profile::for_host("http://shop.local:9000/")
        };
        let backend = profile_to_backend_config(&profile, &Defaults::default()).unwrap();
        assert_eq!(
            backend.products_url.as_str(),
            "http://shop.local:9000/api/products"
        );
        assert_eq!(backend.timeout, Duration::from_secs(2));
        assert_eq!(backend.retry.attempts(), 1);
        assert_eq!(backend.retry.backoff, Duration::from_millis(250));
    }

    #[test]
    fn rejects_non_http_urls() {
        let profile = Profile {
            categories_url: Some("ftp://files/api/categories".into()),
            ..Profile::default()
        };
        let err = profile_to_backend_config(&profile, &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "categories_url"));
    }

    #[test]
    fn save_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config
            .profiles
            .insert("default".into(), Profile::for_host("http://localhost"));

        save_config_to(&config, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profiles, config.profiles);
    }
}
