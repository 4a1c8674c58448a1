//! Voice templates: reference audio plus reference text.
//!
//! Templates come from an optional JSON file (object or list form) and fall
//! back to a built-in table when that file is missing or unusable.

mod store;

pub use store::{
    Template, TemplateError, TemplateOrigin, TemplateSet, load_templates, parse_templates,
};
