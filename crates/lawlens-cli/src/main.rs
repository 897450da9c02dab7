//! # lawlens CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lawlens_cli::config::load_api_config;
use lawlens_cli::fetch::{run_fetch, FetchArgs};
use lawlens_cli::link::{run_link, LinkArgs};
use lawlens_cli::render::{run_render, RenderArgs};
use lawlens_cli::resolve::{run_resolve, ResolveArgs};

/// lawlens: statute citation previews from the e-Gov Law API.
///
/// Resolves abbreviated citation fragments, classifies statute links,
/// fetches statute text, and renders saved payloads.
#[derive(Parser, Debug)]
#[command(name = "lawlens", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML file with statute API settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Expand a citation fragment into an element path.
    Resolve(ResolveArgs),

    /// Classify a link and show the statute request it implies.
    Link(LinkArgs),

    /// Fetch statute text from the statute API.
    Fetch(FetchArgs),

    /// Render a saved statute payload.
    Render(RenderArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let mut out = std::io::stdout().lock();
    match cli.command {
        Commands::Resolve(args) => run_resolve(&args, &mut out),
        Commands::Render(args) => run_render(&args, &mut out),
        Commands::Link(args) => {
            let config = load_api_config(cli.config.as_deref())?;
            run_link(&args, &config, &mut out)
        }
        Commands::Fetch(args) => {
            let config = load_api_config(cli.config.as_deref())?;
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to start async runtime")?;
            runtime.block_on(run_fetch(&args, &config, &mut out))
        }
    }
}
