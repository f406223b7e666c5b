//! Scalar rendering and string value inference
//!
//! SASS has no way to import JSON, so strings are sniffed for values that
//! SASS understands natively. Rules are checked in order and the first
//! match wins: colors, then booleans, then numbers, then quoted text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::config::ConvertConfig;

/// `rgba(...)` is tried before `rgb(...)` so the longer form wins at the same position.
static COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)",
        r"rgba\( *[0-9]{1,3} *, *[0-9]{1,3} *, *[0-9]{1,3} *, *[0-9.]+\)",
        r"|rgb\( *[0-9]{1,3} *, *[0-9]{1,3} *, *[0-9]{1,3} *\)",
        r"|#[0-9a-f]{3,6}",
    ))
    .expect("color pattern is valid")
});

/// How a JSON string will be emitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringKind<'a> {
    /// A color literal found somewhere in the string
    Color(&'a str),
    /// The exact text `true` or `false`
    Boolean(bool),
    /// Text that survives a numeric round trip unchanged
    Number,
    /// Anything else
    Text,
}

/// Classify a JSON string value
pub fn classify(text: &str) -> StringKind<'_> {
    if let Some(color) = find_color(text) {
        return StringKind::Color(color);
    }
    match text {
        "true" => return StringKind::Boolean(true),
        "false" => return StringKind::Boolean(false),
        _ => {}
    }
    if is_number(text) {
        return StringKind::Number;
    }
    StringKind::Text
}

/// Find the leftmost color literal in `text`
pub fn find_color(text: &str) -> Option<&str> {
    COLOR.find(text).map(|m| m.as_str())
}

/// Whether `text` is the canonical spelling of a finite number
pub fn is_number(text: &str) -> bool {
    let Ok(value) = text.parse::<f64>() else {
        return false;
    };
    canonical_number(value).is_some_and(|canonical| canonical == text)
}

/// Canonical text of a number as ECMAScript's `Number.prototype.toString` spells it
///
/// Plain decimal notation in `[1e-6, 1e21)`, exponent notation with an
/// explicit sign outside of it, `0` for both zeros. Non-finite values have no
/// SASS spelling and yield `None`.
pub fn canonical_number(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    if value == 0.0 {
        return Some("0".to_string());
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return Some(format!("{}", value));
    }

    let exponential = format!("{:e}", value);
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            Some(format!("{}e+{}", mantissa, exponent))
        }
        _ => Some(exponential),
    }
}

/// Quote `text` as a SASS string literal
///
/// Every occurrence of the active quote character is escaped with a backslash.
pub fn quote(text: &str, config: &ConvertConfig) -> String {
    let quote = config.quote_char();
    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        if c == quote {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(quote);
    out
}

/// Render a string value according to its inferred kind
pub fn render_string(text: &str, config: &ConvertConfig) -> String {
    match classify(text) {
        StringKind::Color(color) => color.to_string(),
        StringKind::Boolean(value) => value.to_string(),
        StringKind::Number => text.to_string(),
        StringKind::Text => quote(text, config),
    }
}

/// Render a scalar JSON value
///
/// Numbers keep their literal source text and `null` becomes the SASS
/// `null` keyword. Collections are not scalars; callers dispatch them to the
/// map and list renderers, and they are only accepted here for completeness.
pub fn render_scalar(value: &Value, config: &ConvertConfig) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => render_string(s, config),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
