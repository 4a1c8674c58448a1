//! Chunk list: the ordered texts to synthesize.

mod loader;

pub use loader::{Chunk, ChunkError, ChunkLabel, load_chunks, parse_chunks};
