//! Clap derive structures for the `cableflow` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// cableflow -- PacketCable flow provisioning test harness
#[derive(Debug, Parser)]
#[command(
    name = "cableflow",
    version,
    about = "Exercise a controller's RESTCONF flow and CMTS configuration API",
    long_about = "A test harness for provisioning CMTS nodes and OpenFlow flows on a\n\
        controller's RESTCONF northbound API, listing topology and flow\n\
        statistics, and inspecting local flow/CMTS fixture files.\n\n\
        Without a command, the interactive numbered menu runs.",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Option<Command>,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller profile to use
    #[arg(long, short = 'p', env = "CABLEFLOW_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Controller host name or address (overrides profile)
    #[arg(long, short = 'H', env = "CABLEFLOW_HOST", global = true)]
    pub host: Option<String>,

    /// RESTCONF port (overrides profile)
    #[arg(long, short = 'P', env = "CABLEFLOW_PORT", global = true)]
    pub port: Option<u16>,

    /// Basic-auth username (overrides profile)
    #[arg(long, short = 'u', env = "CABLEFLOW_USERNAME", global = true)]
    pub username: Option<String>,

    /// Basic-auth password (overrides profile)
    #[arg(long, env = "CABLEFLOW_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Send no Authorization header, whatever the profile says
    #[arg(long, global = true)]
    pub no_auth: bool,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(long, short = 't', env = "CABLEFLOW_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// OpenFlow node listed and swept by flow list/remove-all
    #[arg(long, global = true)]
    pub node: Option<u64>,

    /// Flow table on that node
    #[arg(long, global = true)]
    pub table: Option<u64>,

    /// Directory scanned recursively for fixture files
    #[arg(long, short = 'd', env = "CABLEFLOW_FIXTURES_DIR", global = true)]
    pub fixtures_dir: Option<PathBuf>,

    /// Fixture file extension
    #[arg(long, short = 'e', global = true)]
    pub extension: Option<String>,

    /// Output format (default: profile setting, then table)
    #[arg(long, short = 'o', env = "CABLEFLOW_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

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
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Run the interactive numbered menu (default)
    Menu,

    /// List the operational inventory of all nodes
    #[command(alias = "topo")]
    Topology,

    /// Manage configured flows
    #[command(alias = "f")]
    Flows(FlowsArgs),

    /// Show per-switch flow statistics
    Stats,

    /// Manage CMTS nodes
    Cmts(CmtsArgs),

    /// Inspect local fixture files
    #[command(alias = "fx")]
    Fixtures(FixturesArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Flows
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct FlowsArgs {
    #[command(subcommand)]
    pub command: FlowsCommand,
}

#[derive(Debug, Subcommand)]
pub enum FlowsCommand {
    /// List flows in the target node's table
    #[command(alias = "ls")]
    List,

    /// Provision a flow
    Add(RecordArg),

    /// Provision the five built-in flows
    AddSeveral,

    /// Update an existing flow in place
    Update(RecordArg),

    /// Remove a flow
    #[command(alias = "rm")]
    Remove(RecordArg),

    /// Remove every flow in the target node's table
    RemoveAll,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CMTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CmtsArgs {
    #[command(subcommand)]
    pub command: CmtsCommand,
}

#[derive(Debug, Subcommand)]
pub enum CmtsCommand {
    /// Register a CMTS node
    Add(RecordArg),

    /// Remove a CMTS node
    #[command(alias = "rm")]
    Remove(RecordArg),
}

/// A record to send: a fixture name, a built-in name, or a JSON file.
#[derive(Debug, Args)]
pub struct RecordArg {
    /// Fixture name (file stem), built-in record (cmts1, cmts2, flow1..flow5),
    /// or path to a JSON file
    pub record: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Fixtures
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct FixturesArgs {
    #[command(subcommand)]
    pub command: FixturesCommand,
}

#[derive(Debug, Subcommand)]
pub enum FixturesCommand {
    /// List fixtures with their menu letter and classification
    #[command(alias = "ls")]
    List,

    /// Print one fixture
    Show {
        /// Fixture name or menu letter
        fixture: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a starter config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// List configured profiles
    Profiles,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Completions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
