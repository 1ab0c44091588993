//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use scaffold_verify_core::config::DEFAULT_CONFIG_FILE;

/// scaffold-verify -- render a project template and verify the generated project.
///
/// Use `scaffold-verify <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "scaffold-verify", version, about, long_about = None)]
pub struct Cli {
    /// Path to the scaffold-verify.toml configuration file.
    ///
    /// When the default file does not exist, built-in defaults are used.
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the template, sync dependencies and run every check.
    Verify(VerifyArgs),

    /// Render the template only (no dependency sync, no checks).
    Render(RenderArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- shared template overrides ----

/// Template selection flags shared by `verify` and `render`.
#[derive(Args, Debug, Default, Clone)]
pub struct TemplateArgs {
    /// Template root directory (overrides `[template].src`).
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Version reference passed to the template engine (overrides `[template].vcs_ref`).
    #[arg(long)]
    pub vcs_ref: Option<String>,

    /// Extra template parameter, `key=value`. May be repeated.
    #[arg(short, long = "data", value_name = "KEY=VALUE")]
    pub data: Vec<String>,
}

// ---- verify ----

/// Run the full verification.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Keep the rendered project instead of deleting it.
    #[arg(long)]
    pub keep: bool,

    /// Also render twice and compare the trees.
    #[arg(long)]
    pub idempotence: bool,
}

// ---- render ----

/// Render the template into a destination directory.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Destination directory (created if missing).
    #[arg(long)]
    pub dest: PathBuf,

    #[command(flatten)]
    pub template: TemplateArgs,
}

// ---- config ----

/// Manage scaffold-verify configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, template, sync, structure, checks).
        #[arg(long)]
        section: Option<String>,
    },
}
