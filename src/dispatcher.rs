//! Job execution, either sequential or on a fixed-size pool of worker threads.
//! Each job's command runs through the system shell; its output is captured
//! in full and handed to the result sink.

use crate::config::{RunConfiguration, Verbosity};
use crate::console::Palette;
use crate::processor::Job;
use crate::sink::{JobResult, ResultSink};
use log::debug;
use std::process::Command;
use std::thread;

/// How the jobs of a run are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// One job at a time, in job order, on the calling thread.
    Sequential,
    /// A pool of `workers` threads pulling from a shared queue.
    Parallel { workers: usize },
}

impl ExecutionStrategy {
    pub fn from_config(config: &RunConfiguration) -> Self {
        if config.parallel {
            ExecutionStrategy::Parallel {
                workers: config.workers.max(1),
            }
        } else {
            ExecutionStrategy::Sequential
        }
    }
}

/// Executes the command of a job.
pub trait CommandRunner: Send + Sync {
    /// Runs `job` to completion. Failures are reported in the result, never returned.
    fn run(&self, job: &Job) -> JobResult;
}

/// Runs commands with `sh -c` (`cmd /C` on Windows), inheriting the caller's
/// environment extended with the job's variables.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl ShellRunner {
    fn shell(command: &str) -> Command {
        if cfg!(windows) {
            let mut shell = Command::new("cmd");
            shell.arg("/C").arg(command);
            shell
        } else {
            let mut shell = Command::new("sh");
            shell.arg("-c").arg(command);
            shell
        }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, job: &Job) -> JobResult {
        let output = Self::shell(&job.command)
            .envs(job.env.iter().map(|(k, v)| (k.as_str(), v.as_os_str())))
            .output();

        match output {
            Ok(output) => JobResult {
                index: job.index,
                command: job.command.clone(),
                status: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            },
            Err(e) => JobResult {
                index: job.index,
                command: job.command.clone(),
                status: None,
                stdout: String::new(),
                stderr: format!("failed to start the shell: {e}"),
            },
        }
    }
}

/// Dispatches jobs to a [`CommandRunner`] and echoes progress on the console.
pub struct Dispatcher<'a> {
    strategy: ExecutionStrategy,
    verbosity: Verbosity,
    palette: &'a Palette,
    runner: &'a dyn CommandRunner,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        strategy: ExecutionStrategy,
        verbosity: Verbosity,
        palette: &'a Palette,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            strategy,
            verbosity,
            palette,
            runner,
        }
    }

    fn announce(&self, job: &Job) {
        let p = self.palette;
        if self.verbosity.progress() {
            match &job.pair.output {
                Some(output) => println!(
                    "{}Processing{} {} {}->{} {}",
                    p.progress,
                    p.reset,
                    job.pair.input.display(),
                    p.progress,
                    p.reset,
                    output.display()
                ),
                None => println!(
                    "{}Processing{} {}",
                    p.progress,
                    p.reset,
                    job.pair.input.display()
                ),
            }
        }
        if self.verbosity.debug() {
            println!("{}Executing{} {}", p.debug, p.reset, job.command);
        }
    }

    fn echo(&self, result: &JobResult) {
        if !self.verbosity.exec() {
            return;
        }
        let p = self.palette;
        if !result.stdout.is_empty() {
            println!("{}{}{}", p.exec, result.stdout.trim_end(), p.reset);
        }
        if !result.stderr.is_empty() {
            println!("{}{}{}", p.fail, result.stderr.trim_end(), p.reset);
        }
    }

    fn execute(&self, job: &Job) -> JobResult {
        self.announce(job);
        let result = self.runner.run(job);
        debug!("Job {} finished with status {:?}", job.index, result.status);
        self.echo(&result);
        result
    }

    /// Runs every job and submits each result to `sink`.
    ///
    /// Returns once all jobs have completed. A failing command never stops
    /// the other jobs.
    pub fn dispatch(&self, jobs: &[Job], sink: &ResultSink) {
        let results = sink.sender();
        match self.strategy {
            ExecutionStrategy::Sequential => {
                for job in jobs {
                    let _ = results.send(self.execute(job));
                }
            }
            ExecutionStrategy::Parallel { workers } => {
                let (queue, pending) = crossbeam_channel::unbounded::<&Job>();
                for job in jobs {
                    let _ = queue.send(job);
                }
                drop(queue);

                let workers = workers.clamp(1, jobs.len().max(1));
                debug!("Starting {workers} workers for {} jobs", jobs.len());

                thread::scope(|scope| {
                    for worker in 0..workers {
                        let pending = pending.clone();
                        let results = results.clone();
                        scope.spawn(move || {
                            for job in pending.iter() {
                                let _ = results.send(self.execute(job));
                            }
                            debug!("Worker {worker} done");
                        });
                    }
                });
            }
        }
    }
}
