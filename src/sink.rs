//! Collection of job results and the optional CSV log.

use crate::constants::LOG_HEADER;
use crate::error::Result;
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::debug;
use std::path::Path;

/// Outcome of one command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobResult {
    /// Index of the job that produced this result.
    pub index: usize,
    pub command: String,
    /// Exit code, `None` if the process could not be started or was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl JobResult {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Multi-producer queue of job results, drained once every producer is done.
#[derive(Debug)]
pub struct ResultSink {
    sender: Sender<JobResult>,
    receiver: Receiver<JobResult>,
}

impl ResultSink {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Returns a handle workers use to submit results.
    pub fn sender(&self) -> Sender<JobResult> {
        self.sender.clone()
    }

    /// Takes every submitted result, in arrival order.
    pub fn drain(self) -> Vec<JobResult> {
        let ResultSink { sender, receiver } = self;
        drop(sender);
        let results: Vec<JobResult> = receiver.try_iter().collect();
        debug!("Drained {} results", results.len());
        results
    }
}

impl Default for ResultSink {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes `results` as CSV: a header row, then command, stdout and stderr per job.
/// Every field is quoted.
pub fn write_log<P: AsRef<Path>>(path: P, results: &[JobResult]) -> Result<()> {
    let path = path.as_ref();
    debug!("Writing log to {}", path.display());

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_path(path)?;
    writer.write_record(LOG_HEADER)?;
    for result in results {
        writer.write_record([&result.command, &result.stdout, &result.stderr])?;
    }
    writer.flush()?;
    Ok(())
}
