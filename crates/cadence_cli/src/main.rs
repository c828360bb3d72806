//! Cadence CLI
//!
//! Plan and play keyframe timelines described in TOML.

mod config;
mod init;
mod plan;
mod play;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::TimelineFile;

#[derive(Parser)]
#[command(name = "cadence", version, about = "Plan and play keyframe timelines")]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the normalized keyframes a timeline hands to its executor
    Plan {
        /// Timeline file
        file: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Play a timeline with the frame scheduler, printing effects as they fire
    Play {
        /// Timeline file
        file: PathBuf,

        /// Frames per second to step at
        #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
        fps: u32,

        /// Cycles to play before stopping a repeating timeline
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        cycles: u32,

        /// Sleep between frames to play at wall-clock speed
        #[arg(long)]
        realtime: bool,
    },

    /// Write a sample timeline file
    Init {
        /// Where to write the file
        #[arg(default_value = "timeline.toml")]
        file: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Plan { file, json } => {
            let timeline = TimelineFile::load(&file)?;
            let plan = plan::plan(&timeline);
            plan::print(&plan, json)?;
        }
        Commands::Play {
            file,
            fps,
            cycles,
            realtime,
        } => {
            let timeline = TimelineFile::load(&file)?;
            tracing::info!("Playing {}", file.display());
            let outcome = play::play(
                &timeline,
                play::PlaySettings {
                    fps,
                    cycles,
                    realtime,
                },
            )?;
            play::print(&outcome);
        }
        Commands::Init { file, force } => {
            init::create_timeline(&file, force)?;
            tracing::info!("Created {}", file.display());
        }
    }

    Ok(())
}
