//! # tcping - Main Entry Point
//!
//! Parses arguments, resolves the target, runs one probing session and
//! prints the summary. The exit code tells how the run ended.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use tcping::analysis::Statistics;
use tcping::cli::Args;
use tcping::config::RunConfig;
use tcping::domain::ResolveError;
use tcping::probing::{RunState, Scheduler, StopSignal, TcpProbe};
use tcping::report::Renderer;
use tcping::resolve::resolve;
use tcping::session::{interrupt_signal, run_session};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;
const EXIT_INTERRUPTED: i32 = 130;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(state) => exit_code_for_state(state),
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for_state(state: RunState) -> i32 {
    match state {
        RunState::Interrupted | RunState::Cancelled => EXIT_INTERRUPTED,
        RunState::Idle | RunState::Running | RunState::Completed => EXIT_SUCCESS,
    }
}

/// Configuration problems are usage errors; anything else is a plain failure
fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.chain().any(|cause| cause.is::<ResolveError>()) {
        EXIT_USAGE
    } else {
        EXIT_ERROR
    }
}

#[tokio::main]
async fn run() -> Result<RunState> {
    // Exits with clap's usage code on bad arguments, --help or --version
    let args = Args::parse();

    let target = resolve(&args.host, args.family(), args.effective_port())
        .await
        .context("Failed to resolve target")?;
    let config = RunConfig::from_args(&args, target);
    debug!("run config: {config:?}");

    let renderer = Renderer::new(config.target.clone(), args.color, args.verbose);
    println!("{}", renderer.header());

    let probe = TcpProbe::from_config(&config);
    let scheduler = Arc::new(Scheduler::new(config, probe, renderer, Arc::new(Statistics::new())));

    let report = run_session(Arc::clone(&scheduler), StopSignal::new(), interrupt_signal())
        .await
        .context("Probe loop did not shut down cleanly")?;

    let renderer = scheduler.observer();
    if report.state == RunState::Interrupted {
        println!("\n{}", renderer.interrupted_line());
    }
    println!("{}", renderer.summary(&report.snapshot));

    Ok(report.state)
}
