//! CLI argument definitions and parsing.

use clap::Parser;
use std::path::PathBuf;

use crate::invoker::{DEFAULT_TOOL, ModelOptions};
use crate::runner::FailurePolicy;

/// Default location of the chunk list.
pub const DEFAULT_CHUNKS_FILE: &str = "/content/F5-TTS-Vietnamese/chunks.json";

/// Default location of the optional templates file.
pub const DEFAULT_TEMPLATES_FILE: &str = "templates.json";

/// Run TTS inference on chunks with selectable voice/text templates.
#[derive(Parser, Debug)]
#[command(name = "tts-chunks")]
#[command(about = "Run TTS inference on chunks with selectable voice/text templates")]
#[command(version)]
pub struct Args {
    /// Path to chunks.json
    #[arg(long, default_value = DEFAULT_CHUNKS_FILE)]
    pub chunks_file: PathBuf,

    /// Path to templates.json (optional)
    #[arg(long, default_value = DEFAULT_TEMPLATES_FILE)]
    pub templates_file: PathBuf,

    /// Name of template to use (from templates.json or builtin)
    #[arg(long)]
    pub template: Option<String>,

    /// List available templates and exit
    #[arg(long)]
    pub list_templates: bool,

    /// Prefix for output files
    #[arg(long, default_value = "result_")]
    pub output_prefix: String,

    /// Model name
    #[arg(long, default_value = "F5TTS_Base")]
    pub model: String,

    /// Vocoder name
    #[arg(long, default_value = "vocos")]
    pub vocoder: String,

    /// Vocab file
    #[arg(long, default_value = "F5-TTS-Vietnamese-ViVoice/vocab.txt")]
    pub vocab_file: String,

    /// Checkpoint file
    #[arg(long, default_value = "F5-TTS-Vietnamese-ViVoice/model_last.pt")]
    pub ckpt_file: String,

    /// Speed multiplier
    #[arg(long, default_value = "1")]
    pub speed: String,

    /// Continue to next chunk if a command fails
    #[arg(long)]
    pub continue_on_error: bool,

    /// External synthesis program to run for each chunk
    #[arg(long, default_value = DEFAULT_TOOL)]
    pub tool: String,

    /// Print the commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Model parameters forwarded to every invocation.
    pub fn model_options(&self) -> ModelOptions {
        ModelOptions {
            tool: self.tool.clone(),
            model: self.model.clone(),
            speed: self.speed.clone(),
            vocoder: self.vocoder.clone(),
            vocab_file: self.vocab_file.clone(),
            ckpt_file: self.ckpt_file.clone(),
        }
    }

    /// Failure handling selected by `--continue-on-error`.
    pub fn failure_policy(&self) -> FailurePolicy {
        if self.continue_on_error {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Abort
        }
    }
}
