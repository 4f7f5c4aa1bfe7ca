// Command Runner Port
// Abstraction for running an external command and capturing its stdout

use thiserror::Error;

/// What to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    /// Command line handed verbatim to a shell.
    ///
    /// Any caller-controlled substring becomes shell syntax: this variant is
    /// a command-injection surface and must only carry trusted input.
    Shell(Vec<u8>),
    /// Program plus argument list, spawned directly without a shell
    Program { program: String, args: Vec<String> },
}

impl CommandSpec {
    pub fn shell(command: impl Into<Vec<u8>>) -> Self {
        CommandSpec::Shell(command.into())
    }

    pub fn program<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec::Program {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Short label for logs
    pub fn describe(&self) -> String {
        match self {
            CommandSpec::Shell(command) => String::from_utf8_lossy(command).into_owned(),
            CommandSpec::Program { program, args } if args.is_empty() => program.clone(),
            CommandSpec::Program { program, args } => format!("{} {}", program, args.join(" ")),
        }
    }
}

/// Stdout of a terminated child plus its exit code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub exit_code: i32,
    pub stdout: Vec<u8>,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Which buffer allocation failed while capturing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocStage {
    /// The initial capture buffer
    Initial,
    /// A doubling step during the read loop
    Growth,
}

/// Capture errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("Out of memory during {0:?} buffer allocation")]
    OutOfMemory(AllocStage),
}

/// Command Runner trait
///
/// Implementations:
/// - SubprocessRunner: spawns a real child process (infra-system)
/// - MockCommandRunner: scripted results for tests
pub trait CommandRunner: Send + Sync {
    /// Run `spec` to completion and capture all of its stdout
    ///
    /// Blocks until the child exits. A nonzero exit code is not an error.
    ///
    /// # Errors
    /// - CaptureError::SpawnFailed if the process cannot be started
    /// - CaptureError::OutOfMemory if the capture buffer cannot grow
    fn capture(&self, spec: &CommandSpec) -> Result<CapturedOutput, CaptureError>;
}
