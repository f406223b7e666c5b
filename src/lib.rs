//! Sasson - convert JSON data into SASS/SCSS variables
//!
//! This library turns JSON documents into SASS maps, lists and scalar
//! variables so that design data can be shared between scripts and
//! stylesheets at build time.
//!
//! # Example
//!
//! ```rust
//! use sasson::{convert_document, ConvertConfig};
//!
//! let scss = convert_document(
//!     "data/colors.json",
//!     r##"{"primary": "#336699", "rounded": "true"}"##,
//!     &ConvertConfig::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(scss, "$colors: (\n  \"primary\": #336699,\n  \"rounded\": true\n);");
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod renderer;
pub mod task;

pub use config::{ConfigError, ConvertConfig};
pub use document::{declarations, document_declarations, Declaration};
pub use error::ParseError;
pub use renderer::SassRenderer;
pub use task::{FileGroup, FsSink, OutputSink, TaskError, TaskFile, TaskReport};

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while converting a document
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The source text is not valid JSON
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Per-key mode needs an object at the top level
    #[error("{path}: expected a JSON object at the top level, found {found}")]
    TypeMismatch { path: String, found: &'static str },
}

/// Convert the JSON text of one document to SASS
///
/// `path` identifies the document. Without a configured variable name, its
/// file name (minus `.json`) names the generated map.
///
/// # Example
///
/// ```rust
/// use sasson::{convert_document, ConvertConfig};
///
/// let config = ConvertConfig::new().with_use_map(false).with_var_name("font-");
/// let scss = convert_document("fonts.json", r#"{"size": "16", "family": "Inter"}"#, &config)
///     .unwrap();
///
/// assert_eq!(scss, "$font-size: 16;\n$font-family: \"Inter\";");
/// ```
pub fn convert_document(
    path: &str,
    source: &str,
    config: &ConvertConfig,
) -> Result<String, ConvertError> {
    let decls = document_declarations(path, source, config)?;
    Ok(document::join(&decls))
}

/// Convert an already parsed JSON value to SASS
///
/// `name` stands in for the document name derived from a path.
pub fn convert_value(
    name: &str,
    value: &Value,
    config: &ConvertConfig,
) -> Result<String, ConvertError> {
    let decls = declarations(name, value, config)?;
    Ok(document::join(&decls))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_convert_map_mode() {
        let scss = convert_document(
            "colors.json",
            r##"{"colors": {"a": "#fff"}}"##,
            &ConvertConfig::default(),
        )
        .unwrap();
        assert_eq!(scss, "$colors: (\n  \"colors\": (\n    \"a\": #fff\n  )\n);");
    }

    #[test]
    fn test_convert_per_key_mode() {
        let config = ConvertConfig::default().with_use_map(false);
        let scss =
            convert_document("theme.json", r##"{"colors": {"a": "#fff"}}"##, &config).unwrap();
        assert_eq!(scss, "$colors: (\n  \"a\": #fff\n);");
    }

    #[test]
    fn test_convert_invalid_json() {
        let result = convert_document("bad.json", "{\"a\": }", &ConvertConfig::default());
        let err = result.unwrap_err();
        assert!(matches!(err, ConvertError::Parse(_)));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_convert_type_mismatch() {
        let config = ConvertConfig::default().with_use_map(false);
        let err = convert_document("list.json", "[1, 2]", &config).unwrap_err();
        assert!(matches!(err, ConvertError::TypeMismatch { found: "array", .. }));
    }

    #[test]
    fn test_convert_value() {
        let scss = convert_value("flags", &json!({"dark": false}), &ConvertConfig::default())
            .unwrap();
        assert_eq!(scss, "$flags: (\n  \"dark\": false\n);");
    }

    #[test]
    fn test_convert_is_deterministic() {
        let source = r##"{"z": [1, "2", "#abc"], "a": {"nested": "text \"quoted\""}}"##;
        let config = ConvertConfig::default();
        let first = convert_document("d.json", source, &config).unwrap();
        for _ in 0..5 {
            assert_eq!(convert_document("d.json", source, &config).unwrap(), first);
        }
    }
}
