//! Template loading, fallback and selection.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Errors that can occur while resolving templates.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Unrecognized templates format: {0}")]
    UnrecognizedShape(String),

    #[error("No template selected. Use --template NAME or --list-templates to see options.")]
    NotSelected,

    #[error("Template '{0}' not found. Use --list-templates to see available templates.")]
    NotFound(String),
}

/// A named reference voice: audio clip plus its transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub ref_audio: String,
    pub ref_text: String,
}

impl Template {
    pub fn new(name: &str, ref_audio: &str, ref_text: &str) -> Self {
        Self {
            name: name.to_string(),
            ref_audio: ref_audio.to_string(),
            ref_text: ref_text.to_string(),
        }
    }
}

/// Where a [`TemplateSet`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    /// No templates file; the built-in table was used.
    Builtin,
    /// Loaded from a templates file.
    File(PathBuf),
    /// The templates file was unusable and the built-in table was substituted.
    Fallback { path: PathBuf, reason: String },
}

/// Ordered, read-only collection of templates.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    templates: Vec<Template>,
    origin: TemplateOrigin,
}

/// Value side of the object-shaped templates file.
#[derive(Debug, Deserialize)]
struct TemplateEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    ref_audio: String,
    #[serde(default, deserialize_with = "lenient_text")]
    ref_text: String,
}

/// Item of the list-shaped templates file.
#[derive(Debug, Deserialize)]
struct TemplateRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    ref_audio: String,
    #[serde(default, deserialize_with = "lenient_text")]
    ref_text: String,
}

// Non-string values (null, numbers, nested data) read as empty text.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

impl TemplateSet {
    /// The fixed table used when no usable templates file exists.
    pub fn builtin() -> Self {
        let templates = vec![
            Template::new(
                "mien_nam",
                "/content/F5-TTS-Vietnamese/mien_nam.wav",
                "tâm tỉnh dậy trong dinh thự, nhìn xuống ao tôm mênh mông. nhưng giàu sang không mua được mạng sống.",
            ),
            Template::new(
                "lieubachhop",
                "/content/F5-TTS-Vietnamese/0119.WAV",
                "chỉ cho mọi người một cách nói yêu mà không cần dùng chữ yêu, ừ thì tôi lỡ bước, lỡ bước vào mắt xanh",
            ),
            Template::new(
                "nhiii",
                "/content/F5-TTS-Vietnamese/0124.WAV",
                "và một muỗng canh tương ớt là 20 gam tương ớt, nấu mắm nêm mình nhớ cho thêm tương ớt vào, để cho vừa tạo độ sánh mà cái mắm nêm mình [...]",
            ),
        ];

        Self {
            templates,
            origin: TemplateOrigin::Builtin,
        }
    }

    fn empty(origin: TemplateOrigin) -> Self {
        Self {
            templates: Vec::new(),
            origin,
        }
    }

    /// Insert a template, replacing any existing one with the same name in place.
    fn insert(&mut self, template: Template) {
        match self.templates.iter_mut().find(|t| t.name == template.name) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
    }

    pub fn origin(&self) -> &TemplateOrigin {
        &self.origin
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Resolve the template chosen on the command line.
    pub fn select(&self, name: Option<&str>) -> Result<&Template, TemplateError> {
        let name = name.ok_or(TemplateError::NotSelected)?;
        self.get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))
    }

    /// Write the human-readable template listing.
    pub fn write_listing<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "Available templates:")?;
        for template in &self.templates {
            writeln!(
                out,
                "- {}: ref_audio={}, ref_text={:?}",
                template.name, template.ref_audio, template.ref_text
            )?;
        }
        Ok(())
    }
}

/// Decode a templates document.
///
/// Accepts either an object mapping name to `{ref_audio, ref_text}` or an array
/// of `{name, ref_audio, ref_text}` records. Object values that are not records
/// are skipped; an array item that is not an object rejects the whole document,
/// as does any other top-level value.
pub fn parse_templates(json: &str, origin: TemplateOrigin) -> Result<TemplateSet, TemplateError> {
    let value: Value = serde_json::from_str(json)?;
    let mut set = TemplateSet::empty(origin);

    match value {
        Value::Object(map) => {
            for (name, entry) in map {
                if !entry.is_object() {
                    warn!(
                        "Skipping template '{name}': expected an object, found {}",
                        json_kind(&entry)
                    );
                    continue;
                }
                let entry: TemplateEntry = serde_json::from_value(entry)?;
                set.insert(Template {
                    name,
                    ref_audio: entry.ref_audio,
                    ref_text: entry.ref_text,
                });
            }
        }
        Value::Array(items) => {
            for (index, item) in items.into_iter().enumerate() {
                if !item.is_object() {
                    return Err(TemplateError::UnrecognizedShape(format!(
                        "entry {index} is {}, expected an object",
                        json_kind(&item)
                    )));
                }
                let record: TemplateRecord = serde_json::from_value(item)?;
                if record.name.is_empty() {
                    debug!("Skipping templates entry {index} without a name");
                    continue;
                }
                set.insert(Template {
                    name: record.name,
                    ref_audio: record.ref_audio,
                    ref_text: record.ref_text,
                });
            }
        }
        other => {
            return Err(TemplateError::UnrecognizedShape(format!(
                "expected an object or an array, found {}",
                json_kind(&other)
            )));
        }
    }

    Ok(set)
}

/// Load templates from `path`, falling back to the built-in table.
///
/// This never fails: a missing file silently yields the built-in table, and
/// an unreadable or malformed file is reported on stderr before falling back.
pub fn load_templates(path: &Path) -> TemplateSet {
    if !path.is_file() {
        debug!("No templates file at {}, using builtin templates", path.display());
        return TemplateSet::builtin();
    }

    let result = std::fs::read_to_string(path)
        .map_err(TemplateError::from)
        .and_then(|json| parse_templates(&json, TemplateOrigin::File(path.to_path_buf())));

    match result {
        Ok(set) => {
            debug!("Loaded {} templates from {}", set.len(), path.display());
            set
        }
        Err(e @ TemplateError::UnrecognizedShape(_)) => {
            warn!("{e} in {}, using builtin templates.", path.display());
            fallback(path, &e)
        }
        Err(e) => {
            error!("Failed to load templates from {}: {e}", path.display());
            fallback(path, &e)
        }
    }
}

fn fallback(path: &Path, reason: &TemplateError) -> TemplateSet {
    let mut set = TemplateSet::builtin();
    set.origin = TemplateOrigin::Fallback {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };
    set
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
