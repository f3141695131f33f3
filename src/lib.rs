//! fileproc applies a shell command to every file of a directory tree.
//! Output file names and commands are rendered from `${FP_LABEL}` templates,
//! and the commands run either sequentially or on a pool of workers.

/// Command-line interface module for the fileproc application
pub mod cli;

/// Collection of input files: filtering, ordering and sampling
pub mod collector;

/// Run options, presets, sort modes and verbosity
pub mod config;

/// Console colors
pub mod console;

/// Names of the template and environment variables
pub mod constants;

/// Sequential and parallel job execution
pub mod dispatcher;

/// Error types and handling for the fileproc application
pub mod error;

/// Logger setup for the binary
pub mod logger;

/// Input/output pairs and rendered commands
pub mod processor;

/// Job results and the CSV log
pub mod sink;

/// Human friendly file ordering
pub mod sort;

/// Placeholder scanning and substitution
pub mod template;

/// Variables of the name and command formats
pub mod variables;

use crate::collector::{sample, FileCollector};
use crate::config::RunConfiguration;
use crate::console::Palette;
use crate::dispatcher::{CommandRunner, Dispatcher, ExecutionStrategy, ShellRunner};
use crate::error::Result;
use crate::processor::Processor;
use crate::sink::{write_log, JobResult, ResultSink};
use log::{debug, info};

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Files that passed the filter, before sampling.
    pub considered: usize,
    /// One result per executed job, in completion order.
    pub results: Vec<JobResult>,
}

impl RunSummary {
    /// Results of the commands that did not exit with status 0.
    pub fn failed(&self) -> impl Iterator<Item = &JobResult> {
        self.results.iter().filter(|r| !r.success())
    }
}

/// Runs `config` with commands executed through the system shell.
pub fn run(config: &RunConfiguration, palette: &Palette) -> Result<RunSummary> {
    run_with(config, palette, &ShellRunner)
}

/// Runs `config`, executing commands with `runner`.
///
/// # Flow
/// 1. Validates the input folder and the file filter
/// 2. Collects, orders and samples the input files
/// 3. Renders every output name and command
/// 4. Creates the output folder
/// 5. Dispatches the jobs and waits for all of them
/// 6. Writes the log, if requested
pub fn run_with(
    config: &RunConfiguration,
    palette: &Palette,
    runner: &dyn CommandRunner,
) -> Result<RunSummary> {
    config.validate()?;

    let collector = FileCollector::from_config(config)?;
    let files = collector.files();
    let considered = files.len();
    let candidates = sample(files, config.sampling_step, config.counter_offset)?;
    debug!("{} of {considered} files selected", candidates.len());

    let jobs = Processor::from_config(config).build_jobs(&candidates)?;

    if !config.output_path.exists() {
        info!("Creating output folder {}", config.output_path.display());
        std::fs::create_dir_all(&config.output_path)?;
    }

    if config.verbosity.progress() {
        println!(
            "{}Processing{} {} {}files{}",
            palette.progress,
            palette.reset,
            jobs.len(),
            palette.progress,
            palette.reset
        );
    }

    let sink = ResultSink::new();
    Dispatcher::new(
        ExecutionStrategy::from_config(config),
        config.verbosity,
        palette,
        runner,
    )
    .dispatch(&jobs, &sink);
    let results = sink.drain();

    if let Some(log_filename) = &config.log_filename {
        write_log(log_filename, &results)?;
    }

    Ok(RunSummary {
        considered,
        results,
    })
}
