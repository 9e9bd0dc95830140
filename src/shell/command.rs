//! Subprocess execution with per-line output capture.
//!
//! The workflow never looks at exit codes: install decisions are made from
//! the text a tool prints. So the runner's job is to hand back *complete*
//! ordered line collections for both streams: each stream is drained on its
//! own reader thread, and the call does not return until the process has
//! exited and both readers have hit end-of-stream. Without the join, output
//! buffered at process exit can be lost to the exit/flush race.

use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

/// A single external command invocation.
///
/// Created per check, immutable, discarded after execution.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Program to launch, resolved via PATH or given as an absolute path.
    pub program: String,
    /// Arguments passed verbatim, no shell involved.
    pub args: Vec<String>,
    /// Working directory for the child process.
    pub cwd: PathBuf,
}

impl Invocation {
    /// Build an invocation from a program name, argument list, and working
    /// directory.
    pub fn new(program: impl Into<String>, args: &[&str], cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            cwd: cwd.into(),
        }
    }
}

/// Captured output of one invocation.
#[derive(Debug, Clone, Default)]
pub struct ExecutionResult {
    /// Stdout lines in arrival order.
    pub stdout: Vec<String>,
    /// Stderr lines in arrival order. A recovered launch failure appears
    /// here as a single `Process failed: <message>` line.
    pub stderr: Vec<String>,
}

impl ExecutionResult {
    /// Whether the invocation produced any stderr output.
    pub fn has_errors(&self) -> bool {
        !self.stderr.is_empty()
    }
}

/// Runs invocations on behalf of the workflow.
///
/// The workflow depends on this trait rather than on [`ProcessRunner`]
/// directly so tests can substitute a scripted runner.
pub trait CommandRunner {
    /// Run one invocation to completion and return its captured output.
    fn run(&self, invocation: &Invocation) -> ExecutionResult;
}

/// Subprocess-backed runner.
///
/// Blocks until the child exits and both streams are fully drained. There is
/// no timeout: a hung child blocks the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> ExecutionResult {
        let span = tracing::info_span!("run", program = %invocation.program);
        let _guard = span.enter();
        tracing::info!(
            args = ?invocation.args,
            cwd = %invocation.cwd.display(),
            "launching process"
        );

        let mut result = ExecutionResult::default();

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        hide_console_window(&mut cmd);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::error!(error = %e, "spawn failed");
                result.stderr.push(format!("Process failed: {}", e));
                return result;
            }
        };

        let stdout = child.stdout.take().unwrap();
        let stderr = child.stderr.take().unwrap();

        let stdout_handle = spawn_reader(stdout, span.clone(), StreamKind::Stdout);
        let stderr_handle = spawn_reader(stderr, span.clone(), StreamKind::Stderr);

        // Both readers must reach EOF before the wait: a line flushed at
        // exit is still delivered through the pipe after the process dies.
        result.stdout = stdout_handle.join().unwrap_or_default();
        result.stderr = stderr_handle.join().unwrap_or_default();

        if let Err(e) = child.wait() {
            tracing::error!(error = %e, "wait failed");
            result.stderr.push(format!("Process failed: {}", e));
            return result;
        }

        tracing::info!("process completed");
        result
    }
}

#[derive(Debug, Clone, Copy)]
enum StreamKind {
    Stdout,
    Stderr,
}

/// Drain one stream line-by-line on its own thread.
///
/// Every captured line is forwarded to the log sink under the invocation's
/// span before being collected.
fn spawn_reader<R: Read + Send + 'static>(
    stream: R,
    span: tracing::Span,
    kind: StreamKind,
) -> thread::JoinHandle<Vec<String>> {
    thread::spawn(move || {
        let _guard = span.enter();
        let reader = BufReader::new(stream);
        let mut lines = Vec::new();
        for line in reader.lines().map_while(std::result::Result::ok) {
            match kind {
                StreamKind::Stdout => tracing::info!("{}", line),
                StreamKind::Stderr => tracing::error!("{}", line),
            }
            lines.push(line);
        }
        lines
    })
}

#[cfg(windows)]
fn hide_console_window(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    cmd.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_console_window(_cmd: &mut Command) {}
