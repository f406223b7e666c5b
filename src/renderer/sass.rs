//! SASS generation from JSON values

use serde_json::{Map, Value};

use crate::config::ConvertConfig;

use super::scalar::{quote, render_scalar};

/// Renders JSON values as SASS maps, lists and scalars
///
/// `depth` is the indentation level of a collection's items; the closing
/// parenthesis sits one level shallower. Top-level values start at depth 1.
pub struct SassRenderer<'a> {
    config: &'a ConvertConfig,
    indent: String,
}

impl<'a> SassRenderer<'a> {
    /// Create a renderer for the given options
    pub fn new(config: &'a ConvertConfig) -> Self {
        Self {
            config,
            indent: config.indent(),
        }
    }

    fn indent_str(&self, depth: usize) -> String {
        self.indent.repeat(depth)
    }

    /// Render any JSON value
    pub fn render_value(&self, value: &Value, depth: usize) -> String {
        match value {
            Value::Object(map) => self.render_map(map, depth),
            Value::Array(list) => self.render_list(list, depth),
            Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => {
                render_scalar(value, self.config)
            }
        }
    }

    /// Render an object as a SASS map, keeping key order
    pub fn render_map(&self, map: &Map<String, Value>, depth: usize) -> String {
        let items = map.iter().map(|(key, value)| {
            format!(
                "{}{}: {}",
                self.indent_str(depth),
                quote(key, self.config),
                self.render_value(value, depth + 1)
            )
        });
        self.wrap(items, depth)
    }

    /// Render an array as a SASS list
    pub fn render_list(&self, list: &[Value], depth: usize) -> String {
        let items = list.iter().map(|value| {
            format!(
                "{}{}",
                self.indent_str(depth),
                self.render_value(value, depth + 1)
            )
        });
        self.wrap(items, depth)
    }

    fn wrap(&self, items: impl Iterator<Item = String>, depth: usize) -> String {
        let body = items.collect::<Vec<_>>().join(",\n");
        format!(
            "(\n{}\n{})",
            body,
            self.indent_str(depth.saturating_sub(1))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render(value: Value, config: &ConvertConfig) -> String {
        SassRenderer::new(config).render_value(&value, 1)
    }

    #[test]
    fn test_flat_map() {
        let out = render(json!({"primary": "#333", "size": 12}), &ConvertConfig::default());
        assert_eq!(out, "(\n  \"primary\": #333,\n  \"size\": 12\n)");
    }

    #[test]
    fn test_map_keeps_insertion_order() {
        let value: Value = serde_json::from_str(r#"{"b": 1, "a": 2}"#).unwrap();
        let out = render(value, &ConvertConfig::default());
        assert_eq!(out, "(\n  \"b\": 1,\n  \"a\": 2\n)");
    }

    #[test]
    fn test_list() {
        let out = render(json!(["a", "#fff", 3]), &ConvertConfig::default());
        assert_eq!(out, "(\n  \"a\",\n  #fff,\n  3\n)");
    }

    #[test]
    fn test_nested_indentation() {
        let out = render(
            json!({"outer": {"inner": [1, 2]}}),
            &ConvertConfig::default(),
        );
        let expected = "(\n  \"outer\": (\n    \"inner\": (\n      1,\n      2\n    )\n  )\n)";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_custom_indent_width() {
        let config = ConvertConfig::default().with_tab_spaces(4);
        let out = render(json!({"a": {"b": null}}), &config);
        assert_eq!(out, "(\n    \"a\": (\n        \"b\": null\n    )\n)");

        let config = ConvertConfig::default().with_tab_spaces(0);
        let out = render(json!({"a": [true]}), &config);
        assert_eq!(out, "(\n\"a\": (\ntrue\n)\n)");
    }

    #[test]
    fn test_empty_collections() {
        let config = ConvertConfig::default();
        assert_eq!(render(json!({}), &config), "(\n\n)");
        assert_eq!(render(json!([]), &config), "(\n\n)");
        assert_eq!(
            render(json!({"a": {}}), &config),
            "(\n  \"a\": (\n\n  )\n)"
        );
    }

    #[test]
    fn test_no_trailing_comma() {
        let out = render(
            json!({"a": [1, [2, 3], {"b": "c"}], "d": {}}),
            &ConvertConfig::default(),
        );
        let lines: Vec<&str> = out.lines().collect();
        for pair in lines.windows(2) {
            if pair[1].trim_start().starts_with(')') {
                assert!(!pair[0].ends_with(','), "trailing comma before {:?}", pair[1]);
            }
        }
    }

    #[test]
    fn test_keys_are_quoted_without_inference() {
        let config = ConvertConfig::default().with_double_quotes(false);
        let out = render(json!({"#fff": "true", "it's": "x"}), &config);
        assert_eq!(out, "(\n  '#fff': true,\n  'it\\'s': 'x'\n)");
    }

    #[test]
    fn test_scalar_at_top_level() {
        let config = ConvertConfig::default();
        assert_eq!(render(json!("rgb(0, 0, 0)"), &config), "rgb(0, 0, 0)");
        assert_eq!(render(json!(null), &config), "null");
    }
}
