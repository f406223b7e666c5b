//! Sasson CLI
//!
//! Usage:
//!   sasson [OPTIONS] [FILES]...
//!
//! Options:
//!   -c, --config <FILE>     Task file (TOML) with [options] and [[files]] groups
//!   -d, --dest <DIR>        Write `<DIR>/_<name>.scss` instead of printing
//!   -o, --output <NAME>     Output name used with --dest
//!       --options <FILE>    Conversion options file (TOML)
//!       --no-map            One variable per top-level key
//!       --var-name <NAME>   Variable name, or prefix with --no-map
//!       --single-quotes     Quote strings with '
//!       --tab-spaces <N>    Spaces per indentation level
//!   -v, -q                  More or less logging
//!   -h, --help              Print help

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use log::debug;

use sasson::task::{self, FileGroup, FsSink, TaskError, TaskFile, TaskReport};
use sasson::{convert_document, ConvertConfig, ConvertError};

#[derive(Parser)]
#[command(name = "sasson")]
#[command(about = "Convert JSON data into SASS/SCSS variables")]
struct Cli {
    /// JSON files or glob patterns (reads stdin if none are given)
    files: Vec<String>,

    /// Task file (TOML) listing [options] and [[files]] groups
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory receiving the generated `_<name>.scss` partial
    #[arg(short, long)]
    dest: Option<PathBuf>,

    /// Output name used with --dest (defaults to the first file's name)
    #[arg(short, long, requires = "dest")]
    output: Option<String>,

    /// Conversion options file (TOML)
    #[arg(long)]
    options: Option<PathBuf>,

    /// Emit one variable per top-level key instead of one map
    #[arg(long)]
    no_map: bool,

    /// Variable name, or variable prefix together with --no-map
    #[arg(long)]
    var_name: Option<String>,

    /// Quote strings with single quotes
    #[arg(long)]
    single_quotes: bool,

    /// Number of spaces per indentation level
    #[arg(long)]
    tab_spaces: Option<usize>,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

impl Cli {
    /// Apply command-line flags on top of options loaded from a file
    fn apply_overrides(&self, mut config: ConvertConfig) -> ConvertConfig {
        if self.no_map {
            config = config.with_use_map(false);
        }
        if let Some(name) = &self.var_name {
            config = config.with_var_name(name.clone());
        }
        if self.single_quotes {
            config = config.with_double_quotes(false);
        }
        if let Some(spaces) = self.tab_spaces {
            config = config.with_tab_spaces(spaces);
        }
        config
    }

    fn cli_group(&self) -> Option<FileGroup> {
        let dest = self.dest.as_ref()?;
        if self.files.is_empty() {
            return None;
        }
        let group = FileGroup::new(self.files.clone(), dest.clone());
        Some(match &self.output {
            Some(output) => group.with_output(output.clone()),
            None => group,
        })
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .format_timestamp(None)
        .format_target(false)
        .init();

    // Load options and groups
    let (base, mut groups) = match &cli.config {
        Some(path) => match TaskFile::from_file(path) {
            Ok(task) => (task.options, task.files),
            Err(e) => {
                eprintln!("Error loading task file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => match &cli.options {
            Some(path) => match ConvertConfig::from_file(path) {
                Ok(config) => (config, Vec::new()),
                Err(e) => {
                    eprintln!("Error loading options '{}': {}", path.display(), e);
                    std::process::exit(1);
                }
            },
            None => (ConvertConfig::default(), Vec::new()),
        },
    };
    let config = cli.apply_overrides(base);
    debug!("Using options {:?}", config);

    if let Some(group) = cli.cli_group() {
        groups.push(group);
    }

    if !groups.is_empty() {
        let report = task::run_groups(&groups, &config, &mut FsSink);
        finish(&report);
        return;
    }

    if cli.config.is_some() {
        eprintln!("Error: the task file lists no [[files]] groups");
        std::process::exit(1);
    }

    if cli.files.is_empty() {
        convert_stdin(&config);
    } else {
        print_files(&cli.files, &config);
    }
}

/// Convert JSON read from stdin and print the result
fn convert_stdin(config: &ConvertConfig) {
    let mut source = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut source) {
        eprintln!("Error reading from stdin: {}", e);
        std::process::exit(1);
    }

    match convert_document("stdin", &source, config) {
        Ok(scss) => println!("{}", scss),
        Err(e) => {
            print_convert_error(&e, &source, Path::new("stdin"));
            std::process::exit(1);
        }
    }
}

/// Convert files and print their joined output
fn print_files(files: &[String], config: &ConvertConfig) {
    let paths = match task::expand_sources(files) {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let mut missing = Vec::new();
    let sources = task::existing_sources(paths, &mut missing);
    if sources.is_empty() {
        eprintln!("Error: no source files found");
        std::process::exit(1);
    }

    match task::convert_sources(&sources, config) {
        Ok(scss) => println!("{}", scss),
        Err(e) => {
            print_task_error(&e);
            std::process::exit(1);
        }
    }
}

fn finish(report: &TaskReport) {
    for failure in &report.failures {
        print_task_error(failure);
    }
    if !report.is_success() {
        std::process::exit(1);
    }
}

fn print_task_error(err: &TaskError) {
    match err {
        TaskError::Convert { path, input, error } => print_convert_error(error, input, path),
        other => eprintln!("Error: {}", other),
    }
}

fn print_convert_error(err: &ConvertError, source: &str, path: &Path) {
    match err {
        ConvertError::Parse(parse) => {
            let filename = path.display().to_string();
            eprint!("{}", parse.format(source, &filename));
        }
        other => eprintln!("Error: {}", other),
    }
}
