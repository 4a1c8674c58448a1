//! Invocation request and result types.

use std::path::PathBuf;

use thiserror::Error;

use crate::chunk::Chunk;
use crate::template::Template;

/// Default external synthesis program.
pub const DEFAULT_TOOL: &str = "f5-tts_infer-cli";

/// Errors returned by a single external invocation.
#[derive(Error, Debug)]
pub enum InvokeError {
    #[error("Failed to start process: {0}")]
    SpawnFailed(String),

    #[error("Process exited with status {0}")]
    ExitStatus(i32),

    #[error("Process terminated by signal")]
    Terminated,
}

impl InvokeError {
    /// Exit code reported by the child, if it ran to completion.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            InvokeError::ExitStatus(code) => Some(*code),
            _ => None,
        }
    }
}

/// Fixed model parameters passed to every invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelOptions {
    pub tool: String,
    pub model: String,
    pub speed: String,
    pub vocoder: String,
    pub vocab_file: String,
    pub ckpt_file: String,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            model: "F5TTS_Base".to_string(),
            speed: "1".to_string(),
            vocoder: "vocos".to_string(),
            vocab_file: "F5-TTS-Vietnamese-ViVoice/vocab.txt".to_string(),
            ckpt_file: "F5-TTS-Vietnamese-ViVoice/model_last.pt".to_string(),
        }
    }
}

/// A fully built command line for one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub output: PathBuf,
}

impl Invocation {
    /// Build the command that synthesizes `chunk` with `template`.
    ///
    /// Reference audio and text are only passed when non-empty. The output
    /// file is `{output_prefix}{id}.wav`.
    pub fn for_chunk(
        options: &ModelOptions,
        template: &Template,
        chunk: &Chunk,
        output_prefix: &str,
    ) -> Self {
        let output = format!("{output_prefix}{}.wav", chunk.id_segment());

        let mut args: Vec<String> = [
            "--model",
            options.model.as_str(),
            "--speed",
            options.speed.as_str(),
            "--vocoder_name",
            options.vocoder.as_str(),
            "--vocab_file",
            options.vocab_file.as_str(),
            "--ckpt_file",
            options.ckpt_file.as_str(),
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        if !template.ref_audio.is_empty() {
            args.push("--ref_audio".to_string());
            args.push(template.ref_audio.clone());
        }
        if !template.ref_text.is_empty() {
            args.push("--ref_text".to_string());
            args.push(template.ref_text.clone());
        }

        args.push("--gen_text".to_string());
        args.push(chunk.script.clone());
        args.push("-w".to_string());
        args.push(output.clone());

        Self {
            program: options.tool.clone(),
            args,
            output: PathBuf::from(output),
        }
    }

    /// Render as a single shell-like line, quoting arguments with whitespace.
    pub fn command_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|arg| {
                if arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || c == '"') {
                    format!("{arg:?}")
                } else {
                    arg.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
