//! External process execution with a hard deadline.

use crate::error::{Result, ValidateError};
use std::ffi::OsStr;
use std::io::{ErrorKind, Read};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// How often a running child is polled for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Captured output of a process that ran to completion.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,
}

impl CapturedOutput {
    /// Whether the process exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Outcome of a process that was successfully launched.
///
/// Spawn failures are reported through the `Err` side of [`execute`].
#[derive(Debug, Clone)]
pub enum ProcessOutcome {
    /// The process finished before the deadline.
    Exited(CapturedOutput),
    /// The deadline expired; the process was killed.
    TimedOut,
}

/// Options for command execution.
#[derive(Debug, Clone)]
pub struct CommandOptions {
    /// Working directory (None = inherit).
    pub cwd: Option<PathBuf>,

    /// Hard deadline for the whole invocation.
    pub timeout: Duration,
}

impl CommandOptions {
    /// Options with the given deadline and everything else inherited.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cwd: None,
            timeout,
        }
    }
}

/// Render a program and its arguments for log and error messages.
pub fn display_command<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
    let mut rendered = program.to_string();
    for arg in args {
        rendered.push(' ');
        rendered.push_str(&arg.as_ref().to_string_lossy());
    }
    rendered
}

/// Execute `program` directly (no shell) with captured output and a deadline.
///
/// Returns [`ValidateError::MissingTool`] when the executable cannot be
/// found. Once the deadline passes the child is killed and
/// [`ProcessOutcome::TimedOut`] is returned without waiting for its pipes.
///
/// Output collection shares the same deadline: if a descendant keeps the
/// pipes open after the child exits, whatever arrived in time is returned.
pub fn execute<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    options: &CommandOptions,
) -> Result<ProcessOutcome> {
    let start = Instant::now();
    let rendered = display_command(program, args);
    tracing::debug!(command = %rendered, timeout = ?options.timeout, "spawning process");

    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            ValidateError::MissingTool {
                tool: program.to_string(),
            }
        } else {
            ValidateError::Io(e)
        }
    })?;

    // Drain both pipes on helper threads so a chatty child never blocks on a
    // full pipe while we poll it.
    let deadline = start + options.timeout;
    let (tx, rx) = mpsc::channel();
    if let Some(pipe) = child.stdout.take() {
        spawn_reader(pipe, Stream::Stdout, tx.clone());
    }
    if let Some(pipe) = child.stderr.take() {
        spawn_reader(pipe, Stream::Stderr, tx.clone());
    }
    drop(tx);

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    kill_and_reap(&mut child);
                    tracing::debug!(command = %rendered, "process timed out");
                    return Ok(ProcessOutcome::TimedOut);
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                kill_and_reap(&mut child);
                return Err(ValidateError::Io(e));
            }
        }
    };

    let collected = collect(&rx, deadline);
    let duration = start.elapsed();

    if !collected.complete {
        tracing::debug!(
            command = %rendered,
            "output still held open by a descendant at the deadline"
        );
    }
    tracing::debug!(
        command = %rendered,
        exit_code = ?status.code(),
        ?duration,
        "process exited"
    );

    Ok(ProcessOutcome::Exited(CapturedOutput {
        exit_code: status.code(),
        stdout: String::from_utf8_lossy(&collected.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&collected.stderr).into_owned(),
        duration,
    }))
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

#[derive(Debug, Default)]
struct Collected {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    /// Both pipes reached EOF before the deadline.
    complete: bool,
}

fn spawn_reader<R: Read + Send + 'static>(
    mut pipe: R,
    stream: Stream,
    tx: Sender<(Stream, Vec<u8>)>,
) {
    thread::spawn(move || {
        let mut buf = [0u8; 8192];
        loop {
            match pipe.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    if tx.send((stream, buf[..n].to_vec())).is_err() {
                        break;
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
    });
}

/// Gather reader chunks until both pipes close or `deadline` passes.
fn collect(rx: &Receiver<(Stream, Vec<u8>)>, deadline: Instant) -> Collected {
    let mut collected = Collected::default();
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok((Stream::Stdout, chunk)) => collected.stdout.extend_from_slice(&chunk),
            Ok((Stream::Stderr, chunk)) => collected.stderr.extend_from_slice(&chunk),
            Err(RecvTimeoutError::Disconnected) => {
                collected.complete = true;
                return collected;
            }
            Err(RecvTimeoutError::Timeout) => return collected,
        }
    }
}

fn kill_and_reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
