//! Builds the jobs of a run: one input/output pair and one rendered command
//! per selected file. Every template is rendered here, before anything runs.

use crate::collector::Candidate;
use crate::config::RunConfiguration;
use crate::constants::{
    VAR_IN, VAR_IN_BASENAME, VAR_IN_EXTENSION, VAR_IN_FOLDER, VAR_OUT, VAR_OUT_FOLDER, VAR_PREFIX,
};
use crate::error::Result;
use crate::template::render;
use crate::variables::{CommandVariables, FileParts, NameVariables};
use log::debug;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Input file and the output file derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputOutputPair {
    pub input: PathBuf,
    /// `None` when no name format is configured or it rendered an empty name.
    pub output: Option<PathBuf>,
}

/// One command ready to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Position of the job in processing order.
    pub index: usize,
    pub pair: InputOutputPair,
    pub command: String,
    /// Variables added to the environment of the command, with the exact
    /// path bytes of the input and output files.
    pub env: Vec<(String, OsString)>,
}

fn env_name(name: &str) -> String {
    format!("{VAR_PREFIX}{name}")
}

/// Environment exported to the command of `pair`.
///
/// Values are taken from the paths unchanged, so names that are not valid
/// UTF-8 still reach the command intact. `FP_OUT` is only present when the
/// pair has an output file.
pub fn environment(pair: &InputOutputPair, output_folder: &Path) -> Vec<(String, OsString)> {
    let input = pair.input.as_path();
    let folder = input
        .parent()
        .map(|p| p.as_os_str().to_os_string())
        .unwrap_or_default();
    let base_name = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    let extension = input
        .extension()
        .map(|e| {
            let mut dotted = OsString::from(".");
            dotted.push(e);
            dotted
        })
        .unwrap_or_default();

    let mut env = vec![
        (env_name(VAR_IN), input.as_os_str().to_os_string()),
        (env_name(VAR_IN_FOLDER), folder),
        (env_name(VAR_IN_BASENAME), base_name),
        (env_name(VAR_IN_EXTENSION), extension),
        (env_name(VAR_OUT_FOLDER), output_folder.as_os_str().to_os_string()),
    ];
    if let Some(output) = &pair.output {
        env.push((env_name(VAR_OUT), output.as_os_str().to_os_string()));
    }
    env
}

/// Renders output names and commands for the selected files.
#[derive(Debug)]
pub struct Processor<'a> {
    name_format: Option<&'a str>,
    command_format: &'a str,
    output_folder: &'a Path,
}

impl<'a> Processor<'a> {
    pub fn new(name_format: Option<&'a str>, command_format: &'a str, output_folder: &'a Path) -> Self {
        Self {
            name_format,
            command_format,
            output_folder,
        }
    }

    pub fn from_config(config: &'a RunConfiguration) -> Self {
        Self::new(
            config.name_format.as_deref(),
            &config.command,
            &config.output_path,
        )
    }

    /// Renders the output path of `input`, joined with the output folder.
    ///
    /// # Returns
    /// * `None` if there is no name format or it renders to an empty name
    pub fn output_path(&self, input: &Path, counter: Option<i64>) -> Result<Option<PathBuf>> {
        let Some(name_format) = self.name_format else {
            return Ok(None);
        };
        let parts = FileParts::of(input);
        let name = render(
            name_format,
            &NameVariables {
                parts: &parts,
                counter,
            },
        )?;
        if name.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.output_folder.join(name)))
    }

    /// Renders the command of `pair`.
    pub fn command(&self, pair: &InputOutputPair) -> Result<String> {
        render(
            self.command_format,
            &CommandVariables {
                input: &pair.input,
                output: pair.output.as_deref(),
                output_folder: self.output_folder,
            },
        )
    }

    pub fn job(&self, index: usize, candidate: &Candidate) -> Result<Job> {
        let output = self.output_path(&candidate.path, Some(candidate.counter))?;
        let pair = InputOutputPair {
            input: candidate.path.clone(),
            output,
        };
        let command = self.command(&pair)?;
        let env = environment(&pair, self.output_folder);
        debug!("Job {index}: {command}");

        Ok(Job {
            index,
            pair,
            command,
            env,
        })
    }

    /// Builds every job, stopping at the first template error.
    pub fn build_jobs(&self, candidates: &[Candidate]) -> Result<Vec<Job>> {
        candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| self.job(index, candidate))
            .collect()
    }
}
