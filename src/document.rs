//! Turning whole JSON documents into SASS variable declarations

use std::fmt;
use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::config::ConvertConfig;
use crate::renderer::SassRenderer;
use crate::ConvertError;

/// A top-level `$name: value;` statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

impl Declaration {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}: {};", self.name, self.value)
    }
}

/// Name of a document derived from its path: the file name minus a `.json` suffix
pub fn document_name(path: &str) -> String {
    let file_name = Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    match file_name.strip_suffix(".json") {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => file_name,
    }
}

/// Human readable kind of a JSON value, used in error messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Build the declarations for a parsed document
///
/// `name` is the document name used when no variable name is configured.
/// In map mode the whole document becomes one variable; otherwise every
/// top-level key becomes its own variable, which requires an object.
pub fn declarations(
    name: &str,
    value: &Value,
    config: &ConvertConfig,
) -> Result<Vec<Declaration>, ConvertError> {
    let renderer = SassRenderer::new(config);

    if config.use_map {
        let var_name = config.var_name.as_deref().unwrap_or(name);
        return Ok(vec![Declaration::new(
            var_name,
            renderer.render_value(value, 1),
        )]);
    }

    let Value::Object(map) = value else {
        return Err(ConvertError::TypeMismatch {
            path: name.to_string(),
            found: value_kind(value),
        });
    };

    let prefix = config.var_name.as_deref().unwrap_or("");
    Ok(map
        .iter()
        .map(|(key, value)| {
            Declaration::new(format!("{}{}", prefix, key), renderer.render_value(value, 1))
        })
        .collect())
}

/// Parse `source` and build its declarations
pub fn document_declarations(
    path: &str,
    source: &str,
    config: &ConvertConfig,
) -> Result<Vec<Declaration>, ConvertError> {
    let value: Value = serde_json::from_str(source)
        .map_err(|err| crate::ParseError::from_json(path, &err))?;
    debug!("Converting {} ({})", path, value_kind(&value));

    declarations(&document_name(path), &value, config).map_err(|err| match err {
        ConvertError::TypeMismatch { found, .. } => ConvertError::TypeMismatch {
            path: path.to_string(),
            found,
        },
        other => other,
    })
}

/// Join declarations into SASS source, one per line
pub fn join(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
