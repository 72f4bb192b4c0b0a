//! Tool process abstraction.
//!
//! The driver only needs "run this program with these arguments and give me
//! the exit status and captured output". Tests use the scripted runner, which
//! writes or withholds the `-o` target the way the real tool would.

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;
use std::sync::Mutex;

/// Captured result of one tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` when terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn succeeded(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs external programs to completion.
///
/// # Examples
/// ```
/// use deck_render::runner::{ScriptedRunner, Scripted, ToolRunner};
/// let runner = ScriptedRunner::new(Scripted::Exit { status: 1, stderr: "boom".into() });
/// let out = runner.run("openscad", &["--version".to_string()]).unwrap();
/// assert!(!out.succeeded());
/// assert_eq!(out.stderr, "boom");
/// ```
pub trait ToolRunner: Send + Sync {
    /// Runs `program` and waits for it to exit.
    ///
    /// `Err` means the program could not be started at all.
    fn run(&self, program: &str, args: &[String]) -> io::Result<ToolOutput>;
}

/// Runs programs with [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<ToolOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(ToolOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

// =============================================================================
// SCRIPTED RUNNER
// =============================================================================

/// One scripted tool behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scripted {
    /// Exit 0 after writing these bytes to the `-o` target.
    Write(Vec<u8>),
    /// Exit 0 without touching the `-o` target.
    Silent,
    /// Exit with a status and stderr text, writing nothing.
    Exit { status: i32, stderr: String },
    /// Fail to start.
    NotFound,
}

/// Deterministic in-process runner intended for tests.
///
/// Queued behaviors are consumed first, then the default repeats. Every
/// invocation is recorded.
#[derive(Debug)]
pub struct ScriptedRunner {
    default: Scripted,
    queue: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn new(default: Scripted) -> Self {
        Self {
            default,
            queue: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A runner that always writes a small ASCII STL.
    pub fn succeeding() -> Self {
        Self::new(Scripted::Write(b"solid deckforge\nendsolid deckforge\n".to_vec()))
    }

    /// Queues a behavior for the next unqueued call.
    pub fn push(&self, behavior: Scripted) {
        lock(&self.queue).push_back(behavior);
    }

    /// Arguments of every call so far, program first.
    pub fn calls(&self) -> Vec<Vec<String>> {
        lock(&self.calls).clone()
    }

    fn next(&self) -> Scripted {
        lock(&self.queue)
            .pop_front()
            .unwrap_or_else(|| self.default.clone())
    }
}

impl ToolRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<ToolOutput> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().cloned());
        lock(&self.calls).push(call);

        match self.next() {
            Scripted::NotFound => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{program}: command not found"),
            )),
            Scripted::Exit { status, stderr } => Ok(ToolOutput {
                status: Some(status),
                stdout: String::new(),
                stderr,
            }),
            Scripted::Silent => Ok(ToolOutput {
                status: Some(0),
                ..ToolOutput::default()
            }),
            Scripted::Write(bytes) => {
                if let Some(target) = output_target(args) {
                    fs::write(target, bytes)?;
                }
                Ok(ToolOutput {
                    status: Some(0),
                    stdout: String::new(),
                    stderr: "OpenSCAD version 2021.01\n".to_string(),
                })
            }
        }
    }
}

fn output_target(args: &[String]) -> Option<&Path> {
    args.windows(2)
        .find(|pair| pair[0] == "-o")
        .map(|pair| Path::new(&pair[1]))
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
