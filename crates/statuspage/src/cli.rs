//! Clap derive structures for the `statuspage` CLI.
//!
//! Also pulled into `build.rs` for man page generation, so it must only
//! depend on `clap` and `clap_complete`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// statuspage -- drive Statuspage.io components and component groups
#[derive(Debug, Parser)]
#[command(
    name = "statuspage",
    version,
    about = "Manage Statuspage.io components and component groups",
    long_about = "Runs single provider operations (exists, get, create, update, delete,\n\
        import) against the Statuspage.io REST API.\n\n\
        Credentials come from --api-key, STATUSPAGEIO_API_KEY, or the config file.",
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
    /// Path to the config file (defaults to the platform config dir)
    #[arg(long, env = "STATUSPAGEIO_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides config)
    #[arg(long, env = "STATUSPAGEIO_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Statuspage API key
    #[arg(long, env = "STATUSPAGEIO_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "STATUSPAGEIO_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Log line format on stderr
    #[arg(long, default_value = "text", global = true, hide = true)]
    pub log_format: LogFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output Enums ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Key/value table (default)
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
    /// Plain text: the resource id only (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check credentials with one probe request
    Validate,

    /// Print the provider and resource schemas
    Schema,

    /// Manage components
    #[command(alias = "c")]
    Component(ComponentArgs),

    /// Manage component groups
    #[command(alias = "g")]
    Group(GroupArgs),

    /// Inspect or write the config file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Components ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ComponentArgs {
    #[command(subcommand)]
    pub command: ComponentCommand,
}

#[derive(Debug, Subcommand)]
pub enum ComponentCommand {
    /// Report whether a component still exists
    Exists(ComponentAddress),

    /// Read a component
    Get(ComponentAddress),

    /// Create a component
    Create(ComponentFields),

    /// Update a component in place
    Update {
        /// Current address as `<page>/<id>`, e.g. `abc123/comp_1`
        address: String,

        #[command(flatten)]
        fields: ComponentFields,
    },

    /// Delete a component
    Delete(ComponentAddress),

    /// Adopt an existing component by `<page>/<id>`
    Import {
        /// Import id, e.g. `abc123/comp_1`
        import_id: String,
    },
}

#[derive(Debug, Args)]
pub struct ComponentAddress {
    /// Page id
    #[arg(long)]
    pub page: String,

    /// Component id
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ComponentFields {
    /// Page id
    #[arg(long)]
    pub page: String,

    /// Display name
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub description: Option<String>,

    /// operational, degraded_performance, partial_outage, major_outage, under_maintenance
    #[arg(long)]
    pub status: Option<String>,

    /// Show the component's uptime on the page
    #[arg(long)]
    pub showcase: Option<bool>,

    /// Hide the component while it is operational
    #[arg(long)]
    pub only_show_if_degraded: Option<bool>,
}

// ── Component Groups ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GroupArgs {
    #[command(subcommand)]
    pub command: GroupCommand,
}

#[derive(Debug, Subcommand)]
pub enum GroupCommand {
    /// Report whether a component group still exists
    Exists(GroupAddress),

    /// Read a component group
    Get(GroupAddress),

    /// Create a component group
    Create(GroupFields),

    /// Update a component group in place
    Update {
        /// Current address as `<page_id>/<id>`, e.g. `abc123/grp_1`
        address: String,

        #[command(flatten)]
        fields: GroupFields,
    },

    /// Delete a component group
    Delete(GroupAddress),

    /// Adopt an existing component group by `<page_id>/<id>`
    Import {
        /// Import id, e.g. `abc123/grp_1`
        import_id: String,
    },
}

#[derive(Debug, Args)]
pub struct GroupAddress {
    /// Page id
    #[arg(long)]
    pub page_id: String,

    /// Component group id
    pub id: String,
}

#[derive(Debug, Args)]
pub struct GroupFields {
    /// Page id
    #[arg(long)]
    pub page_id: String,

    /// Display name
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Member component ids (repeat or comma-separate)
    #[arg(long = "component", value_delimiter = ',', required = true)]
    pub components: Vec<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Print the effective settings as TOML
    Show {
        /// Include the API key
        #[arg(long)]
        show_key: bool,
    },

    /// Write the effective settings to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
