//! CLI argument parsing and command dispatch.

mod args;
mod run;

pub use args::{Args, DEFAULT_CHUNKS_FILE, DEFAULT_TEMPLATES_FILE};
pub use run::run;
