//! settle: run the off-line settlement for one pool batch.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use settlement_engine::settle_json;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "settle", version, about = "Settle a stake-commit pool batch")]
struct Args {
    /// Batch input JSON (pool_info + users)
    #[arg(short, long)]
    input: PathBuf,

    /// Report output path (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,
}

fn run(args: &Args) -> settlement_engine::Result<()> {
    let batch = fs::read_to_string(&args.input)?;
    let report = settle_json(&batch, args.pretty)?;

    match &args.output {
        Some(path) => {
            fs::write(path, report)?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{report}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!(input = %args.input.display(), "settling batch");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("settlement aborted: {e}");
            ExitCode::FAILURE
        }
    }
}
