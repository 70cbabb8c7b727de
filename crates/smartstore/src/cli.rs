//! Clap derive structures for the `smartstore` CLI.
//!
//! Defines the command tree, global flags, and shared argument groups.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use smartstore_core::ExportFormat;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// smartstore -- admin client for the SmartStore catalog
#[derive(Debug, Parser)]
#[command(
    name = "smartstore",
    version,
    about = "Manage SmartStore products and categories from the command line",
    long_about = "Administer the SmartStore catalog: list, filter, create, edit and delete\n\
        products and categories, and export reports as CSV or PDF.\n\n\
        Talks to the products and categories REST services, or to a seeded\n\
        in-memory mock with --mock.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "SMARTSTORE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Products collection URL (overrides profile)
    #[arg(long, env = "SMARTSTORE_PRODUCTS_URL", global = true)]
    pub products_url: Option<String>,

    /// Categories collection URL (overrides profile)
    #[arg(long, env = "SMARTSTORE_CATEGORIES_URL", global = true)]
    pub categories_url: Option<String>,

    /// Use the seeded in-memory backend instead of the REST services
    #[arg(long, global = true)]
    pub mock: bool,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SMARTSTORE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "SMARTSTORE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Retries after a failed request
    #[arg(long, env = "SMARTSTORE_RETRIES", global = true)]
    pub retries: Option<u32>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage products
    #[command(alias = "prod", alias = "p")]
    Products(ProductsArgs),

    /// Manage categories
    #[command(alias = "cat", alias = "c")]
    Categories(CategoriesArgs),

    /// Show product and category counts
    Summary,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// Filtering and sorting for list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Keep rows where any column contains TEXT (case-insensitive)
    #[arg(long, short = 'f')]
    pub filter: Option<String>,

    /// Sort by column (key or header, e.g. "price", "Created At")
    #[arg(long, short = 's')]
    pub sort: Option<String>,

    /// Sort in descending order
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

/// Report export.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Report format: csv or pdf
    pub format: ExportFormat,

    /// Directory to write the report into
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    #[command(flatten)]
    pub list: ListArgs,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PRODUCTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List products
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one product
    Get {
        /// Product id
        id: i64,
    },

    /// Create a product
    Create {
        #[command(flatten)]
        fields: ProductFields,

        /// Read fields from a JSON object
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },

    /// Update a product (unspecified fields keep their values)
    Update {
        /// Product id
        id: i64,

        #[command(flatten)]
        fields: ProductFields,

        /// Read fields from a JSON object
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },

    /// Delete a product
    #[command(alias = "rm")]
    Delete {
        /// Product id
        id: i64,
    },

    /// Export products as a CSV or PDF report
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct ProductFields {
    /// Product name (max 20 characters)
    #[arg(long)]
    pub name: Option<String>,

    /// Product description (max 30 characters)
    #[arg(long)]
    pub description: Option<String>,

    /// Price in dollars (at least 0.01)
    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CATEGORIES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: CategoriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    /// List categories
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one category
    Get {
        /// Category id
        id: i64,
    },

    /// Create a category
    Create {
        #[command(flatten)]
        fields: CategoryFields,

        /// Read fields from a JSON object
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },

    /// Update a category (unspecified fields keep their values)
    Update {
        /// Category id
        id: i64,

        #[command(flatten)]
        fields: CategoryFields,

        /// Read fields from a JSON object
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },

    /// Delete a category
    #[command(alias = "rm")]
    Delete {
        /// Category id
        id: i64,
    },

    /// Export categories as a CSV or PDF report
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct CategoryFields {
    /// Category name (3 to 50 characters)
    #[arg(long)]
    pub name: Option<String>,

    /// Category description (max 200 characters)
    #[arg(long)]
    pub description: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file (prompts when interactive)
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Display the resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
