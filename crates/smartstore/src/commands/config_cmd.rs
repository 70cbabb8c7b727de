//! Config subcommand handlers.

use std::io::{self, IsTerminal};

use dialoguer::{Input, Select};
use smartstore_core::{BackendMode, ResourceKind};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Ask for a URL, or take the flag / default without prompting.
fn prompt_url(label: &str, flag: Option<&str>, kind: ResourceKind, interactive: bool) -> Result<String, CliError> {
    if let Some(url) = flag {
        return Ok(url.to_owned());
    }
    if !interactive {
        return Ok(kind.default_base_url());
    }
    Input::new()
        .with_prompt(label)
        .default(kind.default_base_url())
        .interact_text()
        .map_err(prompt_err)
}

fn prompt_backend(global: &GlobalOpts, interactive: bool) -> Result<BackendMode, CliError> {
    if global.mock {
        return Ok(BackendMode::Memory);
    }
    if !interactive {
        return Ok(BackendMode::Remote);
    }
    let choices = &[
        "REST services (products and categories APIs)",
        "In-memory mock with sample data",
    ];
    let selection = Select::new()
        .with_prompt("Backend")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    Ok(if selection == 0 {
        BackendMode::Remote
    } else {
        BackendMode::Memory
    })
}

/// TOML rendering of the config for `config show` in table mode.
fn format_config(cfg: &Config) -> String {
    toml::to_string_pretty(cfg).unwrap_or_else(|e| format!("# unrenderable config: {e}"))
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: guided setup ──────────────────────────────────────
        ConfigCommand::Init { force } => {
            let config_path = config::config_path();
            if config_path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: config_path.display().to_string(),
                });
            }

            let interactive = io::stdin().is_terminal() && !global.yes;
            if interactive {
                eprintln!("SmartStore CLI configuration");
                eprintln!("   Config path: {}\n", config_path.display());
            }

            // 1. Profile name
            let profile_name = match (&global.profile, interactive) {
                (Some(name), _) => name.clone(),
                (None, false) => "default".into(),
                (None, true) => Input::new()
                    .with_prompt("Profile name")
                    .default("default".to_owned())
                    .interact_text()
                    .map_err(prompt_err)?,
            };

            // 2. Service URLs
            let products_url = prompt_url(
                "Products URL",
                global.products_url.as_deref(),
                ResourceKind::Product,
                interactive,
            )?;
            let categories_url = prompt_url(
                "Categories URL",
                global.categories_url.as_deref(),
                ResourceKind::Category,
                interactive,
            )?;

            // 3. Backend
            let backend = prompt_backend(global, interactive)?;

            // 4. Build profile and validate it before writing
            let profile = Profile {
                products_url: Some(products_url),
                categories_url: Some(categories_url),
                backend: Some(backend),
                timeout: global.timeout,
                retries: global.retries,
                retry_backoff_ms: None,
            };

            let mut cfg = Config::default();
            config::profile_to_backend_config(&profile, &cfg.defaults)?;
            cfg.default_profile = Some(profile_name.clone());
            cfg.profiles.insert(profile_name.clone(), profile);

            // 5. Write config
            let path = config::save_config(&cfg)?;

            if !global.quiet {
                eprintln!("✓ Configuration written to {}", path.display());
                eprintln!("  Active profile: {profile_name}");
            }
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = output::render_single(&global.output, &cfg, format_config, |_| {
                config::config_path().display().to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            let default = config::active_profile_name(global, &cfg);
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: smartstore config init");
            } else {
                for name in cfg.profiles.keys() {
                    let marker = if *name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config()?;

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Default profile set to '{name}'");
            }
            Ok(())
        }
    }
}
