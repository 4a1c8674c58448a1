//! External synthesis tool invocation.
//!
//! Provides the command-line builder and a trait over process execution,
//! so the runner can be driven by a mock in tests.

mod process;
mod types;

pub use process::{DryRunInvoker, ProcessInvoker};
pub use types::{DEFAULT_TOOL, InvokeError, Invocation, ModelOptions};

/// Trait for running one synthesis invocation to completion.
///
/// Implementations block until the external program has exited.
#[cfg_attr(test, mockall::automock)]
pub trait Invoker {
    /// Run the invocation, mapping any non-zero exit to an error.
    fn invoke(&self, invocation: &Invocation) -> Result<(), InvokeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;
    use crate::template::Template;
    use std::path::PathBuf;

    fn arg_pair<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .map(String::as_str)
    }

    // ===========================================
    // Invocation builder tests
    // ===========================================

    #[test]
    fn test_invocation_fixed_options_first() {
        let options = ModelOptions::default();
        let template = Template::new("t", "ref.wav", "reference");
        let chunk = Chunk::new(Some("1"), "hello");

        let invocation = Invocation::for_chunk(&options, &template, &chunk, "result_");

        assert_eq!(invocation.program, "f5-tts_infer-cli");
        assert_eq!(
            invocation.args[..10],
            [
                "--model",
                "F5TTS_Base",
                "--speed",
                "1",
                "--vocoder_name",
                "vocos",
                "--vocab_file",
                "F5-TTS-Vietnamese-ViVoice/vocab.txt",
                "--ckpt_file",
                "F5-TTS-Vietnamese-ViVoice/model_last.pt",
            ]
        );
        assert_eq!(arg_pair(&invocation.args, "--ref_audio"), Some("ref.wav"));
        assert_eq!(arg_pair(&invocation.args, "--ref_text"), Some("reference"));
    }

    #[test]
    fn test_invocation_omits_empty_ref_audio() {
        let options = ModelOptions::default();
        let template = Template::new("t", "", "hello");
        let chunk = Chunk::new(Some("1"), "text");

        let invocation = Invocation::for_chunk(&options, &template, &chunk, "result_");

        assert!(!invocation.args.iter().any(|a| a == "--ref_audio"));
        assert_eq!(arg_pair(&invocation.args, "--ref_text"), Some("hello"));
    }

    #[test]
    fn test_invocation_omits_empty_ref_text() {
        let options = ModelOptions::default();
        let template = Template::new("t", "ref.wav", "");
        let chunk = Chunk::new(Some("1"), "text");

        let invocation = Invocation::for_chunk(&options, &template, &chunk, "result_");

        assert!(!invocation.args.iter().any(|a| a == "--ref_text"));
        assert_eq!(arg_pair(&invocation.args, "--ref_audio"), Some("ref.wav"));
    }

    #[test]
    fn test_invocation_output_path_and_gen_text() {
        let options = ModelOptions::default();
        let template = Template::new("t", "ref.wav", "reference");
        let chunk = Chunk::new(Some("007"), "xin chào");

        let invocation = Invocation::for_chunk(&options, &template, &chunk, "result_");

        assert_eq!(invocation.output, PathBuf::from("result_007.wav"));
        let tail = &invocation.args[invocation.args.len() - 4..];
        assert_eq!(tail, ["--gen_text", "xin chào", "-w", "result_007.wav"]);
    }

    #[test]
    fn test_invocation_missing_id_leaves_empty_segment() {
        let options = ModelOptions::default();
        let template = Template::new("t", "ref.wav", "reference");
        let chunk = Chunk::new(None, "orphan");

        let invocation = Invocation::for_chunk(&options, &template, &chunk, "out/part_");

        assert_eq!(invocation.output, PathBuf::from("out/part_.wav"));
    }

    #[test]
    fn test_invocation_uses_custom_options() {
        let options = ModelOptions {
            tool: "my-tts".to_string(),
            model: "F5TTS_v1_Base".to_string(),
            speed: "0.8".to_string(),
            vocoder: "bigvgan".to_string(),
            vocab_file: "v.txt".to_string(),
            ckpt_file: "m.pt".to_string(),
        };
        let template = Template::new("t", "", "");
        let chunk = Chunk::new(Some("a"), "text");

        let invocation = Invocation::for_chunk(&options, &template, &chunk, "");

        assert_eq!(invocation.program, "my-tts");
        assert_eq!(arg_pair(&invocation.args, "--speed"), Some("0.8"));
        assert_eq!(arg_pair(&invocation.args, "--vocoder_name"), Some("bigvgan"));
        assert_eq!(invocation.args.len(), 14);
    }

    #[test]
    fn test_command_line_quotes_whitespace() {
        let invocation = Invocation {
            program: "tool".to_string(),
            args: vec!["--gen_text".to_string(), "two words".to_string()],
            output: PathBuf::from("x.wav"),
        };

        assert_eq!(invocation.command_line(), r#"tool --gen_text "two words""#);
    }

    // ===========================================
    // Process invoker tests
    // ===========================================

    #[cfg(unix)]
    fn shell(script: &str) -> Invocation {
        Invocation {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            output: PathBuf::from("unused.wav"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_process_invoker_success() {
        let result = ProcessInvoker::new().invoke(&shell("exit 0"));

        assert!(result.is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_process_invoker_reports_exit_code() {
        let result = ProcessInvoker::new().invoke(&shell("exit 3"));

        let err = result.unwrap_err();
        assert!(matches!(err, InvokeError::ExitStatus(3)));
        assert_eq!(err.exit_code(), Some(3));
    }

    #[test]
    fn test_process_invoker_spawn_failure() {
        let invocation = Invocation {
            program: "definitely-not-a-real-tts-binary".to_string(),
            args: Vec::new(),
            output: PathBuf::from("unused.wav"),
        };

        let result = ProcessInvoker::new().invoke(&invocation);

        let err = result.unwrap_err();
        assert!(matches!(err, InvokeError::SpawnFailed(_)));
        assert_eq!(err.exit_code(), None);
    }

    #[test]
    fn test_dry_run_invoker_never_fails() {
        let invocation = Invocation {
            program: "definitely-not-a-real-tts-binary".to_string(),
            args: Vec::new(),
            output: PathBuf::from("unused.wav"),
        };

        assert!(DryRunInvoker::new().invoke(&invocation).is_ok());
    }
}
