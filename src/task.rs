//! Build task: converting groups of JSON files into SASS partials
//!
//! A task file lists groups of sources and where their output goes:
//!
//! ```toml
//! [options]
//! useMap = true
//!
//! [[files]]
//! src = ["data/colors.json", "data/fonts/*.json"]
//! dest = "scss/settings"
//! output = "tokens"
//! ```
//!
//! Every group is written to `<dest>/_<name>.scss`, where `name` is the
//! group's `output` or the name of its first source. Missing sources are
//! skipped with a warning, and a document that fails to convert only fails
//! its own group.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::config::{ConfigError, ConvertConfig};
use crate::document::document_name;
use crate::{convert_document, ConvertError};

/// Errors that fail a single file group
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("invalid source pattern '{pattern}': {error}")]
    Pattern {
        pattern: String,
        #[source]
        error: glob::PatternError,
    },

    #[error("failed to read {}: {error}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        error: io::Error,
    },

    #[error("{error}")]
    Convert {
        path: PathBuf,
        /// Text of the document that failed, kept for diagnostics
        input: String,
        #[source]
        error: ConvertError,
    },

    #[error("failed to write {}: {error}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
}

/// A set of sources converted into one output file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileGroup {
    /// Source paths or glob patterns
    pub src: Vec<String>,
    /// Directory receiving the generated partial
    pub dest: PathBuf,
    /// Explicit output name, without the leading `_` and extension
    #[serde(default)]
    pub output: Option<String>,
}

impl FileGroup {
    pub fn new(src: Vec<String>, dest: impl Into<PathBuf>) -> Self {
        Self {
            src,
            dest: dest.into(),
            output: None,
        }
    }

    /// Set the output name
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }
}

/// A task file: shared options plus the groups to convert
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskFile {
    #[serde(default)]
    pub options: ConvertConfig,
    #[serde(default)]
    pub files: Vec<FileGroup>,
}

impl TaskFile {
    /// Load a task from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a task from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Run every group with the task's own options
    pub fn run(&self, sink: &mut dyn OutputSink) -> TaskReport {
        run_groups(&self.files, &self.options, sink)
    }
}

/// Destination for generated SASS text
pub trait OutputSink {
    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Writes generated files to disk, creating directories as needed
#[derive(Debug, Default)]
pub struct FsSink;

impl OutputSink for FsSink {
    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, contents)?;
        info!("File \"{}\" created.", path.display());
        Ok(())
    }
}

/// Outcome of running a set of groups
#[derive(Debug, Default)]
pub struct TaskReport {
    /// Files written, in group order
    pub written: Vec<PathBuf>,
    /// Sources that did not exist
    pub missing: Vec<PathBuf>,
    /// Groups that failed
    pub failures: Vec<TaskError>,
}

impl TaskReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Path of the partial generated for `name` inside `dest`
pub fn output_path(dest: &Path, name: &str) -> PathBuf {
    dest.join(format!("_{}.scss", name))
}

fn is_pattern(src: &str) -> bool {
    src.contains(['*', '?', '['])
}

/// Expand glob patterns; plain paths are kept as written
///
/// Duplicates are dropped, keeping the first occurrence.
pub fn expand_sources(src: &[String]) -> Result<Vec<PathBuf>, TaskError> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in src {
        if !is_pattern(entry) {
            push_unique(&mut paths, PathBuf::from(entry));
            continue;
        }

        let matches = glob::glob(entry).map_err(|error| TaskError::Pattern {
            pattern: entry.clone(),
            error,
        })?;
        let mut found = 0;
        for item in matches {
            match item {
                Ok(path) => {
                    found += 1;
                    push_unique(&mut paths, path);
                }
                Err(err) => warn!("Skipping unreadable match for '{}': {}", entry, err),
            }
        }
        if found == 0 {
            warn!("Pattern \"{}\" matched no files.", entry);
        }
    }
    Ok(paths)
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

/// Drop sources that do not exist, warning about each
pub fn existing_sources(paths: Vec<PathBuf>, missing: &mut Vec<PathBuf>) -> Vec<PathBuf> {
    paths
        .into_iter()
        .filter(|path| {
            if path.exists() {
                true
            } else {
                warn!("Source file \"{}\" not found.", path.display());
                missing.push(path.clone());
                false
            }
        })
        .collect()
}

/// Convert the given sources and join their text
pub fn convert_sources(paths: &[PathBuf], config: &ConvertConfig) -> Result<String, TaskError> {
    let mut parts = Vec::with_capacity(paths.len());
    for path in paths {
        let input = fs::read_to_string(path).map_err(|error| TaskError::Read {
            path: path.clone(),
            error,
        })?;
        let text = convert_document(&path.to_string_lossy(), &input, config).map_err(|error| {
            TaskError::Convert {
                path: path.clone(),
                input: input.clone(),
                error,
            }
        })?;
        parts.push(text);
    }
    Ok(parts.join("\n"))
}

/// Convert one group and hand its output to `sink`
///
/// Returns the written path, or `None` when no source of the group exists.
pub fn run_group(
    group: &FileGroup,
    config: &ConvertConfig,
    sink: &mut dyn OutputSink,
    missing: &mut Vec<PathBuf>,
) -> Result<Option<PathBuf>, TaskError> {
    let sources = existing_sources(expand_sources(&group.src)?, missing);
    let Some(first) = sources.first() else {
        warn!(
            "No sources found for destination \"{}\".",
            group.dest.display()
        );
        return Ok(None);
    };

    let name = match &group.output {
        Some(output) => output.clone(),
        None => document_name(&first.to_string_lossy()),
    };
    let dest = output_path(&group.dest, &name);
    debug!("Converting {} source(s) into {}", sources.len(), dest.display());

    let text = convert_sources(&sources, config)?;
    sink.write(&dest, &text).map_err(|error| TaskError::Write {
        path: dest.clone(),
        error,
    })?;
    Ok(Some(dest))
}

/// Run every group, collecting failures instead of stopping at the first
pub fn run_groups(
    groups: &[FileGroup],
    config: &ConvertConfig,
    sink: &mut dyn OutputSink,
) -> TaskReport {
    let mut report = TaskReport::default();
    for group in groups {
        match run_group(group, config, sink, &mut report.missing) {
            Ok(Some(path)) => report.written.push(path),
            Ok(None) => {}
            Err(err) => report.failures.push(err),
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct MemorySink {
        files: Vec<(PathBuf, String)>,
    }

    impl OutputSink for MemorySink {
        fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
            self.files.push((path.to_path_buf(), contents.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_output_path_is_partial() {
        assert_eq!(
            output_path(Path::new("scss/settings"), "colors"),
            PathBuf::from("scss/settings/_colors.scss")
        );
    }

    #[test]
    fn test_parse_task_file() {
        let toml_str = r#"
[options]
useMap = false
varName = "x-"

[[files]]
src = ["a.json", "b/*.json"]
dest = "out"
output = "combined"

[[files]]
src = ["c.json"]
dest = "out"
"#;
        let task = TaskFile::from_str(toml_str).expect("Should parse");
        assert!(!task.options.use_map);
        assert_eq!(task.options.var_name.as_deref(), Some("x-"));
        assert_eq!(task.files.len(), 2);
        assert_eq!(
            task.files[0],
            FileGroup::new(vec!["a.json".into(), "b/*.json".into()], "out").with_output("combined")
        );
        assert_eq!(task.files[1].output, None);
    }

    #[test]
    fn test_task_file_defaults() {
        let task = TaskFile::from_str("").expect("Should parse");
        assert_eq!(task.options, ConvertConfig::default());
        assert!(task.files.is_empty());
    }

    #[test]
    fn test_plain_sources_kept_in_order() {
        let src = vec!["b.json".to_string(), "a.json".to_string(), "b.json".to_string()];
        let paths = expand_sources(&src).unwrap();
        assert_eq!(paths, vec![PathBuf::from("b.json"), PathBuf::from("a.json")]);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = expand_sources(&["data/[.json".to_string()]).unwrap_err();
        assert!(matches!(err, TaskError::Pattern { .. }));
    }

    #[test]
    fn test_group_with_only_missing_sources() {
        let mut sink = MemorySink::default();
        let group = FileGroup::new(vec!["does/not/exist.json".to_string()], "out");
        let report = run_groups(&[group], &ConvertConfig::default(), &mut sink);
        assert!(report.is_success());
        assert!(report.written.is_empty());
        assert_eq!(report.missing, vec![PathBuf::from("does/not/exist.json")]);
        assert!(sink.files.is_empty());
    }
}
