//! Command dispatch: from parsed arguments to a process exit status.

use std::io;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::chunk::{Chunk, load_chunks};
use crate::invoker::{DryRunInvoker, Invoker, ProcessInvoker};
use crate::runner::{ChunkRunner, RunConfig, RunReport};
use crate::template::{TemplateSet, load_templates};

use super::Args;

/// Execute the command described by `args` and return the exit status.
///
/// Usage errors (no or unknown template, unreadable chunks file) yield 1. An
/// aborted run yields the failing tool's exit code, or 1 when it has none.
pub fn run(args: &Args) -> i32 {
    match dispatch(args) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            1
        }
    }
}

fn dispatch(args: &Args) -> Result<i32> {
    let templates = load_templates(&args.templates_file);

    // Listing never touches the chunks file
    if args.list_templates {
        list_templates(&templates)?;
        return Ok(0);
    }

    let template = templates.select(args.template.as_deref())?.clone();
    info!("Using template: {}", template.name);

    let chunks = load_chunks(&args.chunks_file).context("Failed to load chunks")?;

    let config = RunConfig {
        options: args.model_options(),
        template,
        output_prefix: args.output_prefix.clone(),
        policy: args.failure_policy(),
    };

    let code = if args.dry_run {
        run_chunks(ChunkRunner::new(DryRunInvoker::new(), config), &chunks)
    } else {
        run_chunks(ChunkRunner::new(ProcessInvoker::new(), config), &chunks)
    };
    Ok(code)
}

fn list_templates(templates: &TemplateSet) -> Result<()> {
    templates
        .write_listing(&mut io::stdout().lock())
        .context("Failed to write template listing")
}

fn run_chunks<I: Invoker>(runner: ChunkRunner<I>, chunks: &[Chunk]) -> i32 {
    match runner.run(chunks) {
        Ok(report) => {
            print_summary("Done", &report);
            0
        }
        Err(e) => {
            print_summary("Aborted", e.report());
            error!("Aborting run: {e}");
            e.exit_code()
        }
    }
}

fn print_summary(heading: &str, report: &RunReport) {
    println!(
        "{heading}: {} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );

    for outcome in report.failures() {
        println!(
            "  Failed: {} ({})",
            outcome.id.as_deref().unwrap_or("<no id>"),
            outcome.output.display()
        );
    }
}
