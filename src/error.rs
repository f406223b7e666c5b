//! Error types for reading JSON sources

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Character range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid JSON in {path} at line {line} column {column}: {message}")]
    Json {
        path: String,
        line: usize,
        column: usize,
        message: String,
    },
}

impl ParseError {
    /// Wrap a `serde_json` error raised while reading `path`
    pub fn from_json(path: impl Into<String>, err: &serde_json::Error) -> Self {
        // serde_json appends the position to its message; it is kept separately.
        let full = err.to_string();
        let suffix = format!(" at line {} column {}", err.line(), err.column());
        let message = full.strip_suffix(&suffix).unwrap_or(&full).to_string();

        ParseError::Json {
            path: path.into(),
            line: err.line(),
            column: err.column(),
            message,
        }
    }

    /// Location of the error as a character span into the source
    pub fn span(&self, source: &str) -> Span {
        match self {
            ParseError::Json { line, column, .. } => char_span(source, *line, *column),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            ParseError::Json { message, .. } => {
                let span = self.span(source);
                let written = Report::build(ReportKind::Error, filename, span.start)
                    .with_message("invalid JSON")
                    .with_label(
                        Label::new((filename, span))
                            .with_message(message)
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf);
                if written.is_err() {
                    return self.to_string();
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Convert a 1-based line and byte column into a one character span.
///
/// Positions past the end of the input collapse onto the last character.
fn char_span(source: &str, line: usize, column: usize) -> Span {
    let total = source.chars().count();
    if total == 0 {
        return 0..0;
    }

    let mut offset = 0;
    for (index, text) in source.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let byte = column.saturating_sub(1).min(text.len());
            let chars = text
                .char_indices()
                .take_while(|(i, _)| *i < byte)
                .count();
            let start = (offset + chars).min(total - 1);
            return start..start + 1;
        }
        offset += text.chars().count();
    }

    total - 1..total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error(source: &str) -> ParseError {
        let err = serde_json::from_str::<serde_json::Value>(source).unwrap_err();
        ParseError::from_json("data.json", &err)
    }

    #[test]
    fn test_message_keeps_position_separate() {
        let err = parse_error("{\n  \"a\": @\n}");
        let ParseError::Json {
            line,
            message,
            path,
            ..
        } = &err;
        assert_eq!(*line, 2);
        assert_eq!(path, "data.json");
        assert!(!message.contains("at line"));
        assert!(err.to_string().starts_with("invalid JSON in data.json at line 2"));
    }

    #[test]
    fn test_span_points_into_line() {
        let source = "{\n  \"a\": [1, 2,, 3]\n}";
        let err = parse_error(source);
        let span = err.span(source);
        let line_start = source.find('\n').unwrap() + 1;
        assert!(span.start >= line_start);
        assert!(span.end <= source.chars().count());
        assert_eq!(span.end - span.start, 1);
    }

    #[test]
    fn test_span_clamped_at_end_of_input() {
        assert_eq!(char_span("{}", 9, 9), 1..2);
        assert_eq!(char_span("{}", 1, 50), 1..2);
        assert_eq!(char_span("", 1, 1), 0..0);
    }

    #[test]
    fn test_format_includes_filename_and_message() {
        let source = "{\"a\": }";
        let err = parse_error(source);
        let report = err.format(source, "broken.json");
        assert!(report.contains("broken.json"));
        assert!(report.contains("invalid JSON"));
    }
}
