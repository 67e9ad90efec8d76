//! Nomen CLI — the command-line interface for the naming-convention checker.
//!
//! Provides `nomen check` to report types whose names lack the suffix their
//! interfaces require, `nomen fix` to rename them across the whole program,
//! and `nomen explain` to describe a rule.

#![warn(missing_docs)]

mod check;
mod explain;
mod fix;
mod logging;
mod pipeline;

use std::io::IsTerminal;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Nomen — enforces interface-driven type naming conventions.
#[derive(Parser, Debug)]
#[command(name = "nomen", version, about = "Naming-convention checker")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `nomen.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report naming-convention violations.
    Check(CheckArgs),
    /// Rename every violating type and write the changed files.
    Fix(FixArgs),
    /// Describe a rule.
    Explain {
        /// Rule code (`NC001`) or name (`suffix-convention`).
        rule: String,
    },
}

/// Arguments for the `nomen check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Rule names or codes to suppress (e.g., `--allow suffix-convention`).
    #[arg(long, num_args = 1..)]
    pub allow: Vec<String>,

    /// Rule names or codes to promote to errors (e.g., `--deny NC001`).
    #[arg(long, num_args = 1..)]
    pub deny: Vec<String>,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `nomen fix` subcommand.
#[derive(Parser, Debug)]
pub struct FixArgs {
    /// Report what would change without writing any file.
    #[arg(long)]
    pub dry_run: bool,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };
    logging::init(&global);

    let result = match cli.command {
        Command::Check(ref args) => check::run(args, &global),
        Command::Fix(ref args) => fix::run(args, &global),
        Command::Explain { ref rule } => explain::run(rule),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
