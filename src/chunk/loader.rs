//! Chunk list loading.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when loading the chunks file.
#[derive(Error, Debug)]
pub enum ChunkError {
    #[error("Chunks file not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid chunks file: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// One unit of text to synthesize into its own output file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Chunk {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_script")]
    pub script: String,
}

impl Chunk {
    pub fn new(id: Option<&str>, script: &str) -> Self {
        Self {
            id: id.map(str::to_string),
            script: script.to_string(),
        }
    }

    /// Identifier as it appears in output filenames; empty when absent.
    pub fn id_segment(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    /// Displayable form of the chunk identifier.
    pub fn label(&self) -> ChunkLabel<'_> {
        ChunkLabel(self.id.as_deref())
    }
}

/// Display adapter that renders a missing id as `<no id>`.
pub struct ChunkLabel<'a>(Option<&'a str>);

impl fmt::Display for ChunkLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => f.write_str(id),
            None => f.write_str("<no id>"),
        }
    }
}

// Ids are usually strings ("007") but numeric ids are common too.
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn deserialize_script<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a chunks document: a JSON array of `{id, script}` objects.
pub fn parse_chunks(json: &str) -> Result<Vec<Chunk>, ChunkError> {
    Ok(serde_json::from_str(json)?)
}

/// Load the chunk list from `path`.
pub fn load_chunks(path: &Path) -> Result<Vec<Chunk>, ChunkError> {
    if !path.is_file() {
        return Err(ChunkError::NotFound(path.to_path_buf()));
    }

    let json = std::fs::read_to_string(path)?;
    parse_chunks(&json)
}
