//! `advgpt`: create, check and inspect `.advgpt` game files.

mod commands;
mod config;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use advgpt_format::ValidationOptions;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::NewOptions;
use crate::config::load_config;

#[derive(Parser)]
#[command(name = "advgpt")]
#[command(about = "Tools for AdventureGPT game files", long_about = None)]
struct Cli {
    /// Config file (defaults to $ADVGPT_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new game file
    New {
        path: PathBuf,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        author: Option<String>,

        /// Start from the three-room sample game instead of an empty one
        #[arg(long)]
        sample: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Check a game file and list every problem found
    Validate {
        path: PathBuf,

        /// Also check that item references resolve
        #[arg(long)]
        check_items: bool,

        /// Also warn about content the game engine would truncate
        #[arg(long)]
        engine_limits: bool,
    },

    /// Summarise a game file
    Info { path: PathBuf },

    /// Print the format reference
    Spec,
}

/// Log filter used when `RUST_LOG` is unset. The binary's own events are
/// under the `advgpt` target, the library's under `advgpt_format`.
const DEFAULT_LOG_FILTER: &str = "advgpt=info,advgpt_format=info";

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = load_config(cli.config.as_deref())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let ok = match cli.command {
        Command::New {
            path,
            title,
            author,
            sample,
            force,
        } => {
            let options = NewOptions {
                title,
                author: author.or(config.author),
                sample,
                force,
            };
            commands::new_game(&path, options, chrono::Utc::now(), &mut out)?;
            true
        }
        Command::Validate {
            path,
            check_items,
            engine_limits,
        } => {
            let options = ValidationOptions {
                check_item_references: check_items || config.check_items,
            };
            commands::validate_file(
                &path,
                &options,
                engine_limits || config.engine_limits,
                &mut out,
            )?
        }
        Command::Info { path } => {
            commands::info(&path, &mut out)?;
            true
        }
        Command::Spec => {
            commands::spec(&mut out)?;
            true
        }
    };
    out.flush()?;
    Ok(ok)
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
