//! tts-chunks: batch text-to-speech over a JSON chunk list.
//!
//! This crate drives an external speech-synthesis CLI (F5-TTS by default) once
//! per text chunk, using a selectable voice template for reference audio and
//! reference text.

pub mod chunk;
pub mod cli;
pub mod invoker;
pub mod runner;
pub mod template;
