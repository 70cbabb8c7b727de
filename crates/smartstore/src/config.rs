//! CLI configuration: thin wrapper around `smartstore_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--products-url, --mock, --timeout, ...).

use smartstore_core::{BackendConfig, BackendMode};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use smartstore_config::{
    Config, ConfigError, Profile, config_path, load_config, profile_to_backend_config,
    save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.profile_name(global.profile.as_deref())
}

/// Translate the active profile + global flags into a `BackendConfig`.
///
/// CLI flag overrides take priority over profile values, which take
/// priority over `[defaults]`.
pub fn resolve_backend_config(global: &GlobalOpts, config: &Config) -> Result<BackendConfig, CliError> {
    let (_, mut profile) = config
        .resolve_profile(global.profile.as_deref())
        .map_err(|err| match err {
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: available_profiles(config),
            },
            other => other.into(),
        })?;

    if let Some(ref url) = global.products_url {
        profile.products_url = Some(url.clone());
    }
    if let Some(ref url) = global.categories_url {
        profile.categories_url = Some(url.clone());
    }
    if global.mock {
        profile.backend = Some(BackendMode::Memory);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if let Some(retries) = global.retries {
        profile.retries = Some(retries);
    }

    Ok(profile_to_backend_config(&profile, &config.defaults)?)
}

/// Comma-separated profile names, for help text.
pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
