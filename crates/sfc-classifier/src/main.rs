//! sfc-classifier - SFC classifier flow renderer
//!
//! Builds the classifier flows of a plan file and prints them, either as
//! JSON or as ovs-ofctl flow lines.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use sfc_classifier::{build_plan, load_plan, VirtualMacGenerator, VirtualMacTable};
use sfc_types::{PathId, ServiceIndex};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// SFC classifier flow renderer
#[derive(Parser, Debug)]
#[command(name = "sfc-classifier")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short = 'l', long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the flows of a plan file and print them
    Render {
        /// Plan file (.yaml, .yml or .json)
        plan: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Ofctl)]
        format: Format,
    },
    /// Print the virtual MAC of a hop on a path
    Vmac {
        #[arg(long)]
        path_id: PathId,

        #[arg(long)]
        hop: ServiceIndex,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Ofctl,
}

/// Initializes tracing; logs go to stderr so stdout only carries flows
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let vmacs = VirtualMacGenerator::new();

    match args.command {
        Command::Render { plan, format } => {
            let loaded = load_plan(&plan)?;
            let flows = build_plan(&loaded, &vmacs)
                .with_context(|| format!("building flows of {}", plan.display()))?;
            info!("Rendered {} classifier flows", flows.len());

            match format {
                Format::Json => {
                    let json = serde_json::to_string_pretty(&flows)
                        .context("serializing flows")?;
                    println!("{}", json);
                }
                Format::Ofctl => {
                    for flow in &flows {
                        println!("{}", flow);
                    }
                }
            }
        }
        Command::Vmac { path_id, hop } => {
            println!("{}", vmacs.forward_path(path_id).hop(hop));
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("sfc-classifier failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
