//! bipdoc CLI - generates the bipscript example documentation site.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod build;

#[derive(Parser)]
#[command(name = "bipdoc")]
#[command(about = "Generate HTML documentation from annotated bipscript examples")]
#[command(version)]
pub struct Cli {
    /// Path to bipdoc.toml config file
    #[arg(short, long, default_value = "bipdoc.toml")]
    config: PathBuf,

    /// Input directory (defaults to config or "src")
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory (defaults to config or "html")
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    build::run(&cli.config, cli.input, cli.output)
}
