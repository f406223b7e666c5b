//! Conversion options
//!
//! Options can be built in code with the `with_*` methods or loaded from a
//! TOML table using the same camelCase keys the build task accepts:
//!
//! ```toml
//! useMap = false
//! varName = "theme-"
//! doubleQuotes = false
//! tabSpaces = 4
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading options from disk
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read options file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse options TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Options controlling how JSON documents are turned into SASS declarations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ConvertConfig {
    /// Emit one map variable per document instead of one variable per top-level key
    pub use_map: bool,

    /// Variable name (map mode) or variable prefix (per-key mode)
    pub var_name: Option<String>,

    /// Quote string literals with `"` instead of `'`
    pub double_quotes: bool,

    /// Number of spaces per indentation level
    pub tab_spaces: usize,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            use_map: true,
            var_name: None,
            double_quotes: true,
            tab_spaces: 2,
        }
    }
}

impl ConvertConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load options from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set map mode
    pub fn with_use_map(mut self, use_map: bool) -> Self {
        self.use_map = use_map;
        self
    }

    /// Set the variable name or prefix
    pub fn with_var_name(mut self, name: impl Into<String>) -> Self {
        self.var_name = Some(name.into());
        self
    }

    /// Derive variable names from the document name or keys
    pub fn without_var_name(mut self) -> Self {
        self.var_name = None;
        self
    }

    /// Set the quote style for string literals
    pub fn with_double_quotes(mut self, double_quotes: bool) -> Self {
        self.double_quotes = double_quotes;
        self
    }

    /// Set the indentation width
    pub fn with_tab_spaces(mut self, spaces: usize) -> Self {
        self.tab_spaces = spaces;
        self
    }

    /// One level of indentation
    pub fn indent(&self) -> String {
        " ".repeat(self.tab_spaces)
    }

    /// Quote character used for string literals
    pub fn quote_char(&self) -> char {
        if self.double_quotes {
            '"'
        } else {
            '\''
        }
    }
}
