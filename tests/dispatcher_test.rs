use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use fileproc::config::Verbosity;
use fileproc::console::Palette;
use fileproc::dispatcher::{CommandRunner, Dispatcher, ExecutionStrategy, ShellRunner};
use fileproc::processor::{InputOutputPair, Job};
use fileproc::sink::{JobResult, ResultSink};

fn jobs(count: usize) -> Vec<Job> {
    (0..count)
        .map(|index| Job {
            index,
            pair: InputOutputPair {
                input: PathBuf::from(format!("in{index}.txt")),
                output: None,
            },
            command: format!("job {index}"),
            env: Vec::new(),
        })
        .collect()
}

/// Records call order and how many jobs ran at the same time.
#[derive(Default)]
struct RecordingRunner {
    calls: Mutex<Vec<usize>>,
    running: AtomicUsize,
    peak: AtomicUsize,
}

impl CommandRunner for RecordingRunner {
    fn run(&self, job: &Job) -> JobResult {
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.calls.lock().unwrap().push(job.index);
        thread::sleep(Duration::from_millis(5));
        self.running.fetch_sub(1, Ordering::SeqCst);

        JobResult {
            index: job.index,
            command: job.command.clone(),
            // Odd jobs fail; the others must still run.
            status: Some((job.index % 2) as i32),
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

fn dispatch(strategy: ExecutionStrategy, runner: &RecordingRunner, count: usize) -> Vec<JobResult> {
    let palette = Palette::plain();
    let sink = ResultSink::new();
    Dispatcher::new(strategy, Verbosity(Verbosity::NONE), &palette, runner).dispatch(&jobs(count), &sink);
    sink.drain()
}

#[test]
fn test_sequential_keeps_job_order() {
    let runner = RecordingRunner::default();
    let results = dispatch(ExecutionStrategy::Sequential, &runner, 6);

    assert_eq!(results.iter().map(|r| r.index).collect::<Vec<_>>(), (0..6).collect::<Vec<_>>());
    assert_eq!(*runner.calls.lock().unwrap(), (0..6).collect::<Vec<_>>());
    assert_eq!(runner.peak.load(Ordering::SeqCst), 1);
}

#[test]
fn test_parallel_produces_one_result_per_job() {
    let runner = RecordingRunner::default();
    let results = dispatch(ExecutionStrategy::Parallel { workers: 4 }, &runner, 20);

    let mut indices: Vec<usize> = results.iter().map(|r| r.index).collect();
    indices.sort();
    assert_eq!(indices, (0..20).collect::<Vec<_>>());
    assert_eq!(results.iter().filter(|r| !r.success()).count(), 10);
}

#[test]
fn test_parallel_respects_worker_limit() {
    let runner = RecordingRunner::default();
    dispatch(ExecutionStrategy::Parallel { workers: 3 }, &runner, 12);
    assert!(runner.peak.load(Ordering::SeqCst) <= 3);
}

#[test]
fn test_parallel_with_no_jobs() {
    let runner = RecordingRunner::default();
    assert!(dispatch(ExecutionStrategy::Parallel { workers: 4 }, &runner, 0).is_empty());
}

#[cfg(unix)]
#[test]
fn test_shell_runner_captures_output_and_status() {
    let job = Job {
        index: 0,
        pair: InputOutputPair {
            input: PathBuf::from("/a/in.txt"),
            output: None,
        },
        command: "echo \"$FP_IN\"; echo oops >&2; exit 3".to_string(),
        env: vec![("FP_IN".to_string(), "/a/in.txt".into())],
    };

    let result = ShellRunner.run(&job);
    assert_eq!(result.status, Some(3));
    assert_eq!(result.stdout, "/a/in.txt\n");
    assert_eq!(result.stderr, "oops\n");
    assert_eq!(result.command, job.command);
}

#[cfg(unix)]
#[test]
fn test_shell_runner_keeps_caller_environment() {
    let job = Job {
        index: 0,
        pair: InputOutputPair {
            input: PathBuf::from("x"),
            output: None,
        },
        command: "test -n \"$PATH\" && echo ok".to_string(),
        env: Vec::new(),
    };
    let result = ShellRunner.run(&job);
    assert!(result.success());
    assert_eq!(result.stdout, "ok\n");
}
