use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "license-bundlr",
    about = "Bundle third-party crate license texts into a single notice file",
    version
)]
pub struct Cli {
    /// Project path containing the lockfile
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Lockfile path, relative to the project [default: Cargo.lock]
    #[arg(long, value_name = "FILE")]
    pub lockfile: Option<PathBuf>,

    /// Notice file destination, relative to the project [default: THIRD-PARTY-LICENSES.txt]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Cargo cache root [default: $CARGO_HOME, fallback ~/.cargo]
    #[arg(long, value_name = "DIR")]
    pub cargo_home: Option<PathBuf>,

    /// Product name used in the notice header [default: project directory name]
    #[arg(long, value_name = "NAME")]
    pub product: Option<String>,

    /// Exclude crates whose name starts with this prefix (repeatable)
    #[arg(long = "internal-prefix", value_name = "PREFIX")]
    pub internal_prefix: Vec<String>,

    /// Config file [default: ./.license-bundlr/config.toml, fallback ~/.config/license-bundlr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Resolve and report without writing the notice file
    #[arg(long)]
    pub dry_run: bool,

    /// Show per-crate resolution detail
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the notice file path
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
