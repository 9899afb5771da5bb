//! Confetti CLI - run bursts headless

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, render, simulate, BurstArgs};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "confetti")]
#[command(about = "Self-cleaning confetti bursts, rendered headless", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a burst to a numbered PNG sequence
    Render {
        #[command(flatten)]
        burst: BurstArgs,

        /// Output directory for frames
        #[arg(short, long, default_value = "frames")]
        output: String,

        /// Stop the burst after this many frames
        #[arg(long)]
        max_frames: Option<usize>,
    },

    /// Run a burst without writing images and report how it ended
    Simulate {
        #[command(flatten)]
        burst: BurstArgs,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Print the resolved burst configuration as TOML
    Config {
        #[command(flatten)]
        burst: BurstArgs,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("confetti=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            burst,
            output,
            max_frames,
        } => render::run(render::RenderArgs {
            burst,
            output,
            max_frames,
        }),
        Commands::Simulate { burst, format } => simulate::run(&burst, &format),
        Commands::Config { burst } => config::run(&burst),
    }
}
