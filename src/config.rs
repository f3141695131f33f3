//! Run configuration for fileproc.
//! Merges command-line arguments with an optional JSON or YAML preset and the
//! built-in defaults into a single immutable [`RunConfiguration`].

use crate::cli::Args;
use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Order in which the collected files are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Directory traversal order.
    None,
    /// Byte ordering of the full path.
    Lexicographical,
    /// Embedded numbers compared by value, text case-insensitively.
    #[default]
    Human,
}

impl TryFrom<u8> for SortMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(SortMode::None),
            1 => Ok(SortMode::Lexicographical),
            2 => Ok(SortMode::Human),
            other => Err(Error::ConfigError(format!(
                "invalid sort mode {other} (expected 0, 1 or 2)"
            ))),
        }
    }
}

/// Console verbosity bit field. Bits combine freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verbosity(pub u8);

impl Verbosity {
    pub const NONE: u8 = 0x00;
    /// Echo the stdout/stderr of the executed command.
    pub const EXEC: u8 = 0x01;
    /// Echo "Processing X -> Y" progress lines.
    pub const PROGRESS: u8 = 0x01 << 1;
    /// Echo the rendered command before it runs.
    pub const DEBUG: u8 = 0x01 << 2;

    pub fn exec(self) -> bool {
        self.0 & Self::EXEC != 0
    }

    pub fn progress(self) -> bool {
        self.0 & Self::PROGRESS != 0
    }

    pub fn debug(self) -> bool {
        self.0 & Self::DEBUG != 0
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity(Self::PROGRESS)
    }
}

/// Option values read from a preset file. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Preset {
    pub output_path: Option<PathBuf>,
    pub sort_mode: Option<u8>,
    pub file_filter: Option<String>,
    pub sampling_step: Option<usize>,
    pub name_format: Option<String>,
    pub counter_offset: Option<i64>,
    pub command: Option<String>,
    pub recursive: Option<bool>,
    pub parallel: Option<bool>,
    pub jobs: Option<usize>,
    pub log_filename: Option<PathBuf>,
    pub verbosity: Option<u8>,
    pub no_color: Option<bool>,
}

/// Parses preset content, trying JSON first and YAML second.
pub fn parse_preset(content: &str) -> Result<Preset> {
    match serde_json::from_str(content) {
        Ok(preset) => Ok(preset),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid preset format: {e}"))),
    }
}

/// Loads a preset file from disk.
pub fn load_preset<P: AsRef<Path>>(path: P) -> Result<Preset> {
    let path = path.as_ref();
    debug!("Loading preset from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::ConfigError(format!("cannot read preset '{}': {e}", path.display()))
    })?;
    parse_preset(&content)
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Fully resolved options of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfiguration {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub file_filter: Option<String>,
    /// `None` means no output file name is produced.
    pub name_format: Option<String>,
    pub command: String,
    pub recursive: bool,
    pub parallel: bool,
    /// Worker pool size used in parallel mode.
    pub workers: usize,
    pub sort_mode: SortMode,
    pub sampling_step: usize,
    pub counter_offset: i64,
    pub verbosity: Verbosity,
    pub log_filename: Option<PathBuf>,
    pub no_color: bool,
}

impl RunConfiguration {
    /// Creates a configuration with default options for `input_path`.
    /// The output folder defaults to the input folder.
    pub fn new<P: Into<PathBuf>, S: Into<String>>(input_path: P, command: S) -> Self {
        let input_path = input_path.into();
        Self {
            output_path: input_path.clone(),
            input_path,
            file_filter: None,
            name_format: None,
            command: command.into(),
            recursive: false,
            parallel: false,
            workers: default_workers(),
            sort_mode: SortMode::default(),
            sampling_step: 1,
            counter_offset: 0,
            verbosity: Verbosity::default(),
            log_filename: None,
            no_color: false,
        }
    }

    /// Resolves the command line, loading the preset it names if any.
    pub fn from_args(args: Args) -> Result<Self> {
        let preset = match &args.preset {
            Some(path) => load_preset(path)?,
            None => Preset::default(),
        };
        Self::resolve(args, preset)
    }

    /// Merges `args` over `preset` over the defaults and validates the result.
    pub fn resolve(args: Args, preset: Preset) -> Result<Self> {
        let command = args.command.or(preset.command).ok_or_else(|| {
            Error::ConfigError("a command is required (use -c/--command)".to_string())
        })?;

        let mut config = Self::new(args.input_path, command);
        if let Some(output_path) = args.output_path.or(preset.output_path) {
            config.output_path = output_path;
        }
        if let Some(mode) = args.sort_mode.or(preset.sort_mode) {
            config.sort_mode = SortMode::try_from(mode)?;
        }
        config.file_filter = args.file_filter.or(preset.file_filter);
        config.name_format = args.name_format.or(preset.name_format);
        config.sampling_step = args.sampling_step.or(preset.sampling_step).unwrap_or(1);
        config.counter_offset = args.counter_offset.or(preset.counter_offset).unwrap_or(0);
        config.recursive = args.recursive || preset.recursive.unwrap_or(false);
        config.parallel = args.parallel || preset.parallel.unwrap_or(false);
        if let Some(workers) = args.jobs.or(preset.jobs) {
            config.workers = workers;
        }
        config.log_filename = args.log_filename.or(preset.log_filename);
        if let Some(bits) = args.verbosity.or(preset.verbosity) {
            config.verbosity = Verbosity(bits);
        }
        config.no_color = args.no_color || preset.no_color.unwrap_or(false);

        config.validate()?;
        debug!("Resolved configuration: {config:?}");
        Ok(config)
    }

    /// Checks the options that cannot be enforced by their types.
    pub fn validate(&self) -> Result<()> {
        if self.sampling_step == 0 {
            return Err(Error::ConfigError(
                "the sampling step must be at least 1".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(Error::ConfigError(
                "the number of parallel jobs must be at least 1".to_string(),
            ));
        }
        if self.command.trim().is_empty() {
            return Err(Error::ConfigError("the command is empty".to_string()));
        }
        Ok(())
    }
}
