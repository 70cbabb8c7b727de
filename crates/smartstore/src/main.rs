mod cli;
mod commands;
mod config;
mod console;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use smartstore_core::{BackendConfig, Session};

use crate::cli::{Cli, Command};
use crate::commands::Context;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose, cli.global.quiet);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, quiet: bool) {
    let filter = match (verbosity, quiet) {
        (0, true) => "error",
        (0, false) => "warn",
        (1, _) => "info",
        (2, _) => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a backend
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "smartstore", &mut std::io::stdout());
            Ok(())
        }

        // All other commands load both collections first
        cmd => {
            let backend_config = build_backend_config(&cli.global)?;
            let session = open_session(backend_config, cli.global.quiet).await?;
            let ctx = Context::new(session, &cli.global);

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &ctx, &cli.global).await
        }
    }
}

/// Build a `BackendConfig` from the config file, profile, and CLI overrides.
fn build_backend_config(global: &cli::GlobalOpts) -> Result<BackendConfig, CliError> {
    let cfg = config::load_config()?;
    config::resolve_backend_config(global, &cfg)
}

async fn open_session(backend_config: BackendConfig, quiet: bool) -> Result<Session, CliError> {
    let spinner = console::spinner("Loading products and categories...", quiet);
    let session = Session::open(backend_config).await;
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    Ok(session?)
}
