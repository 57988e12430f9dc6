/// `usmap` command-line tool: inspect, validate, and export `.usmap`
/// mapping files.
///
/// # Command overview
///
/// ```text
/// usmap <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print the header and table sizes of a mapping file
///   validate   Decode a mapping file and report success or the first error
///   schemas    List struct schemas and their property types
///   enums      List enums and their members
///   dump       Export the decoded document as JSON
///   help       Print help information
///
/// Global options:
///   -v, --verbose        Log decode phases to stderr
///   --max-depth <N>      Deepest property type tree to accept (default 64)
///   -h, --help           Print help
///   -V, --version        Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, invalid file, etc.) |
///
/// Errors and log output go to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use usmap_decoder::DecoderConfig;

mod cmd_dump;
mod cmd_enums;
mod cmd_inspect;
mod cmd_schemas;
mod cmd_validate;
mod input;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Decode `.usmap` property mapping files.
#[derive(Parser)]
#[command(name = "usmap", version, about = "USMAP mapping file CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decode phases (header fields, sizes, table counts) to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Deepest property type tree to accept before giving up.
    #[arg(long, global = true, default_value_t = DecoderConfig::default().max_property_depth)]
    max_depth: usize,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print the header and table sizes of a mapping file.
    Inspect(InspectArgs),
    /// Decode a mapping file and report success or the first error.
    Validate(ValidateArgs),
    /// List struct schemas with their super types and properties.
    Schemas(SchemasArgs),
    /// List enums and their members.
    Enums(EnumsArgs),
    /// Export the decoded document as JSON.
    Dump(DumpArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `usmap inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the `.usmap` file.
    pub file: PathBuf,
}

/// Arguments for `usmap validate`.
///
/// Runs a full decode and prints `✓` lines for each phase, or a single
/// `✗` line naming the error kind. Exits with code 1 on failure.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the `.usmap` file.
    pub file: PathBuf,
}

/// Arguments for `usmap schemas`.
///
/// ```text
/// ┌─────────────┬──────────────────────────────────────────────┐
/// │ Flag        │ Effect                                       │
/// ├─────────────┼──────────────────────────────────────────────┤
/// │ --name N    │ Show only the schema named N                 │
/// │ --ancestors │ Also print the resolved super type chain     │
/// └─────────────┴──────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct SchemasArgs {
    /// Path to the `.usmap` file.
    pub file: PathBuf,

    /// Show only the schema with this exact name.
    #[arg(long)]
    pub name: Option<String>,

    /// Print the super type chain of each schema.
    #[arg(long)]
    pub ancestors: bool,
}

/// Arguments for `usmap enums`.
#[derive(clap::Args)]
pub struct EnumsArgs {
    /// Path to the `.usmap` file.
    pub file: PathBuf,

    /// Show only the enum with this exact name.
    #[arg(long)]
    pub name: Option<String>,
}

/// Arguments for `usmap dump`.
#[derive(clap::Args)]
pub struct DumpArgs {
    /// Path to the `.usmap` file.
    pub file: PathBuf,

    /// Write JSON to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit compact JSON on a single line.
    #[arg(long)]
    pub compact: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    // --verbose enables debug; RUST_LOG overrides.
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_module("usmap", level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let config = DecoderConfig::default().with_max_property_depth(cli.max_depth);

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args, config),
        Commands::Validate(args) => cmd_validate::run(&args, config),
        Commands::Schemas(args) => cmd_schemas::run(&args, config),
        Commands::Enums(args) => cmd_enums::run(&args, config),
        Commands::Dump(args) => cmd_dump::run(&args, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
