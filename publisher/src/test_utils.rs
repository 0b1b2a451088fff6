//! Shared test utilities for the publisher crate.

use crate::error::{PublishError, Result};
use crate::executor::CommandExecutor;
use crate::tool::ToolResolver;
use camino::Utf8PathBuf;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::process::{ExitStatus, Output};

/// Creates an `ExitStatus` from an exit code (Unix implementation).
#[cfg(unix)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Creates an `ExitStatus` from an exit code (Windows implementation).
#[cfg(windows)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code as u32)
}

/// Creates a successful command `Output` with empty stdout and stderr.
#[must_use]
pub fn success_output() -> Output {
    output_with(0, "", "")
}

/// Creates a failed command `Output` with the given stderr message.
#[must_use]
pub fn failure_output(stderr: &str) -> Output {
    output_with(1, "", stderr)
}

/// Creates a command `Output` with the given exit code and captured streams.
#[must_use]
pub fn output_with(code: i32, stdout: &str, stderr: &str) -> Output {
    Output {
        status: exit_status(code),
        stdout: stdout.as_bytes().to_vec(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// Represents an expected command invocation for testing.
#[derive(Debug)]
pub struct ExpectedCall {
    /// The command to execute (e.g., "/usr/bin/gext").
    pub cmd: String,
    /// The arguments to pass to the command.
    pub args: Vec<String>,
    /// The result to return when this command is invoked.
    ///
    /// Inherited-stream invocations return only the status of this output.
    pub result: Result<Output>,
}

impl ExpectedCall {
    /// Creates an expectation for `cmd` invoked with exactly `args`.
    #[must_use]
    pub fn new(cmd: &str, args: &[&str], result: Result<Output>) -> Self {
        Self {
            cmd: cmd.to_owned(),
            args: args.iter().map(|arg| (*arg).to_owned()).collect(),
            result,
        }
    }
}

/// A stub implementation of `CommandExecutor` for testing.
///
/// Replays expected command invocations in order and returns predefined
/// results. Any unexpected or mismatched invocation yields
/// [`PublishError::StubMismatch`].
#[derive(Debug)]
pub struct StubExecutor {
    expected: RefCell<VecDeque<ExpectedCall>>,
    invocations: RefCell<Vec<Vec<String>>>,
}

impl StubExecutor {
    /// Creates a new `StubExecutor` with the given expected calls.
    #[must_use]
    pub fn new(expected: Vec<ExpectedCall>) -> Self {
        Self {
            expected: RefCell::new(expected.into()),
            invocations: RefCell::new(Vec::new()),
        }
    }

    /// Returns every invocation received so far as `[cmd, args...]`.
    #[must_use]
    pub fn invocations(&self) -> Vec<Vec<String>> {
        self.invocations.borrow().clone()
    }

    /// Asserts that all expected command invocations have been consumed.
    ///
    /// # Panics
    ///
    /// Panics if there are remaining expected calls that were not invoked.
    pub fn assert_finished(&self) {
        assert!(
            self.expected.borrow().is_empty(),
            "expected no further command invocations"
        );
    }

    fn next_call(&self, cmd: &str, args: &[&str]) -> Result<Output> {
        let mut invocation = vec![cmd.to_owned()];
        invocation.extend(args.iter().map(|arg| (*arg).to_owned()));
        self.invocations.borrow_mut().push(invocation);

        let call = self
            .expected
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| PublishError::StubMismatch {
                message: format!("unexpected command invocation: {cmd} {args:?}"),
            })?;

        if call.cmd != cmd || call.args.iter().ne(args.iter()) {
            return Err(PublishError::StubMismatch {
                message: format!(
                    "expected {} {:?}, received {cmd} {args:?}",
                    call.cmd, call.args
                ),
            });
        }

        call.result
    }
}

impl CommandExecutor for StubExecutor {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output> {
        self.next_call(cmd, args)
    }

    fn run_inherited(&self, cmd: &str, args: &[&str]) -> Result<ExitStatus> {
        self.next_call(cmd, args).map(|output| output.status)
    }
}

/// A stub implementation of `ToolResolver` backed by a fixed table.
#[derive(Debug, Default)]
pub struct StubResolver {
    tools: HashMap<String, Utf8PathBuf>,
}

impl StubResolver {
    /// Creates a resolver that knows no tools.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a resolver that resolves `name` to `path`.
    #[must_use]
    pub fn with_tool(name: &str, path: &str) -> Self {
        let mut tools = HashMap::new();
        tools.insert(name.to_owned(), Utf8PathBuf::from(path));
        Self { tools }
    }
}

impl ToolResolver for StubResolver {
    fn resolve(&self, name: &str) -> Result<Utf8PathBuf> {
        self.tools
            .get(name)
            .cloned()
            .ok_or_else(|| PublishError::ToolNotFound {
                tool: name.to_owned(),
            })
    }
}
