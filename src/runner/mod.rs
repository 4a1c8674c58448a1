//! Chunk runner orchestrator.
//!
//! This module drives the external synthesis tool over a chunk list, one
//! blocking invocation at a time, and applies the run's failure policy.

mod chunk_runner;

pub use chunk_runner::{
    ChunkOutcome, ChunkRunner, ChunkStatus, FailurePolicy, RunConfig, RunError, RunReport,
};
