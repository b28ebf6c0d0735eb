//! Reel Showcase
//!
//! Plays a scripted session against the carousel demo screen and prints
//! every slide change.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reel_showcase::{OutputFormat, Renderer, Script, Session, SessionOptions, ShowcaseConfig};

#[derive(Parser)]
#[command(name = "reel-showcase")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scripted carousel demo screen", long_about = None)]
struct Cli {
    /// Showcase configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Session script to play
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Follow the wall clock instead of simulating frames
    #[arg(long)]
    realtime: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Override the session length
    #[arg(long)]
    duration_ms: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout carries session output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let config = match &cli.config {
        Some(path) => ShowcaseConfig::load(path)?,
        None => ShowcaseConfig::default(),
    };

    let script = match &cli.script {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Script::parse(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => Script::empty(),
    };

    let mut options = SessionOptions::from_config(&config);
    options.realtime = cli.realtime;
    if let Some(duration_ms) = cli.duration_ms {
        options.duration = Duration::from_millis(duration_ms);
    }

    info!(
        realtime = options.realtime,
        duration_ms = options.duration.as_millis() as u64,
        "Starting session"
    );

    let renderer = Renderer::new(io::stdout().lock(), cli.format);
    Session::new(&config, script, renderer, options).run().await?;
    Ok(())
}
