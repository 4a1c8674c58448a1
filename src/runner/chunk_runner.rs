//! Sequential chunk runner implementation.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, info};

use crate::chunk::Chunk;
use crate::invoker::{InvokeError, Invocation, Invoker, ModelOptions};
use crate::template::Template;

/// What to do when a chunk's invocation fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the run at the first failing chunk.
    #[default]
    Abort,
    /// Log the failure and move on to the next chunk.
    Continue,
}

/// Errors that end a run early.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Chunk {id} failed: {source}")]
    ChunkFailed {
        id: String,
        source: InvokeError,
        report: RunReport,
    },
}

impl RunError {
    /// Process exit status to surface for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::ChunkFailed { source, .. } => source
                .exit_code()
                .filter(|code| *code != 0)
                .unwrap_or(1),
        }
    }

    /// Outcomes recorded before the run stopped.
    pub fn report(&self) -> &RunReport {
        match self {
            RunError::ChunkFailed { report, .. } => report,
        }
    }
}

/// Result of a single chunk.
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkStatus {
    Succeeded,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChunkOutcome {
    pub id: Option<String>,
    pub output: PathBuf,
    pub status: ChunkStatus,
}

impl ChunkOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, ChunkStatus::Succeeded)
    }
}

/// Per-chunk outcomes, in processing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub outcomes: Vec<ChunkOutcome>,
}

impl RunReport {
    /// Number of chunks whose invocation was attempted.
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ChunkOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

/// Settings shared by every chunk of a run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub options: ModelOptions,
    pub template: Template,
    pub output_prefix: String,
    pub policy: FailurePolicy,
}

/// Runs one invocation per chunk, strictly in order.
pub struct ChunkRunner<I: Invoker> {
    invoker: I,
    config: RunConfig,
}

impl<I: Invoker> ChunkRunner<I> {
    /// Create a new runner.
    pub fn new(invoker: I, config: RunConfig) -> Self {
        Self { invoker, config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Build the invocation for a chunk without running it.
    pub fn invocation_for(&self, chunk: &Chunk) -> Invocation {
        Invocation::for_chunk(
            &self.config.options,
            &self.config.template,
            chunk,
            &self.config.output_prefix,
        )
    }

    /// Synthesize every chunk.
    ///
    /// Under [`FailurePolicy::Abort`] the first failure stops the run and is
    /// returned as [`RunError::ChunkFailed`]. Under [`FailurePolicy::Continue`]
    /// failures are recorded in the report and the run always completes.
    pub fn run(&self, chunks: &[Chunk]) -> Result<RunReport, RunError> {
        info!(
            "Synthesizing {} chunks with template '{}'",
            chunks.len(),
            self.config.template.name
        );

        let mut report = RunReport::default();

        for chunk in chunks {
            let invocation = self.invocation_for(chunk);

            println!(
                "Running chunk {} -> {}",
                chunk.label(),
                invocation.output.display()
            );

            match self.invoker.invoke(&invocation) {
                Ok(()) => {
                    report.outcomes.push(ChunkOutcome {
                        id: chunk.id.clone(),
                        output: invocation.output,
                        status: ChunkStatus::Succeeded,
                    });
                }
                Err(e) => {
                    error!("Chunk {} failed: {e}", chunk.label());
                    report.outcomes.push(ChunkOutcome {
                        id: chunk.id.clone(),
                        output: invocation.output,
                        status: ChunkStatus::Failed {
                            reason: e.to_string(),
                        },
                    });

                    if self.config.policy == FailurePolicy::Abort {
                        return Err(RunError::ChunkFailed {
                            id: chunk.label().to_string(),
                            source: e,
                            report,
                        });
                    }
                }
            }
        }

        Ok(report)
    }
}

