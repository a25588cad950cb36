#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use dirtree::cli::Args;
use dirtree::color::ColorRuleSet;
use dirtree::discovery::{discover, GitCli};
use dirtree::render::write_tree;
use dirtree::terminal::{buffered_stdout, stdout_is_terminal};
use dirtree::tree::FsMetadata;
use std::io;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Conventional exit status for a run stopped by SIGINT.
const INTERRUPTED: u8 = 130;

fn main() -> ExitCode {
    let args = Args::parse().validated();
    init_tracing(args.verbose);

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        debug!(error = %e, "could not install interrupt handler");
    }

    match run_app(&args, &interrupted) {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) if interrupted.load(Ordering::SeqCst) => ExitCode::from(INTERRUPTED),
        Err(e) => {
            eprintln!("dirtree: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn run_app(args: &Args, interrupted: &AtomicBool) -> Result<()> {
    // Cancellation is coarse: checked before each phase starts.
    anyhow::ensure!(!interrupted.load(Ordering::SeqCst), "interrupted");

    let tree = discover(&args.path, args.depth, args.file_mode, &GitCli, &FsMetadata)
        .context("finding files")?;

    anyhow::ensure!(!interrupted.load(Ordering::SeqCst), "interrupted");

    let colors = ColorRuleSet::resolve(args.color, stdout_is_terminal, |key| {
        std::env::var(key).ok()
    });

    let mut stdout = buffered_stdout();
    write_tree(&mut stdout, &tree, &colors).context("writing tree")
}
