//! tts-chunks CLI entry point.

use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tts_chunks::cli::{Args, run};

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    std::process::exit(run(&args));
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
