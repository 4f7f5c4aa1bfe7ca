// Subprocess runner implementation
// reason: std::process for blocking spawn + stdout capture, nix for signal names
use std::process::{Child, Command, ExitStatus, Stdio};
use tracing::{debug, info, warn};

use textbridge_core::application::constants::INITIAL_CAPTURE_CAPACITY;
use textbridge_core::port::command_runner::{
    CaptureError, CapturedOutput, CommandRunner, CommandSpec,
};

use crate::capture_buffer::{read_to_end_doubling_with, try_reserve_exact, Reserve};

/// Exit code reported when the child's status cannot be collected
pub const UNKNOWN_EXIT_CODE: i32 = -1;

/// Shell used for `CommandSpec::Shell`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub program: String,
    pub flag: String,
}

impl ShellConfig {
    pub fn new(program: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flag: flag.into(),
        }
    }
}

impl Default for ShellConfig {
    #[cfg(unix)]
    fn default() -> Self {
        Self::new("/bin/sh", "-c")
    }

    #[cfg(windows)]
    fn default() -> Self {
        Self::new("cmd", "/C")
    }
}

/// Subprocess runner
///
/// Blocks the calling thread until the child exits. No timeout: a hung child
/// hangs the caller. Stdin and stderr are inherited, only stdout is captured.
pub struct SubprocessRunner {
    shell: ShellConfig,
    initial_capacity: usize,
    reserve: Reserve,
}

impl SubprocessRunner {
    /// Create a new subprocess runner
    ///
    /// # Arguments
    /// * `shell` - Shell program and flag for shell command lines
    /// * `initial_capacity` - First capture buffer size in bytes
    ///
    /// # Example
    /// ```ignore
    /// let runner = SubprocessRunner::new(ShellConfig::default(), 4096);
    /// ```
    pub fn new(shell: ShellConfig, initial_capacity: usize) -> Self {
        Self {
            shell,
            initial_capacity,
            reserve: try_reserve_exact,
        }
    }

    /// Route capture buffer reservations through `reserve`
    #[cfg(test)]
    fn with_reserve(mut self, reserve: Reserve) -> Self {
        self.reserve = reserve;
        self
    }

    pub fn shell(&self) -> &ShellConfig {
        &self.shell
    }

    /// Build the std Command for a spec
    fn build_command(&self, spec: &CommandSpec) -> Command {
        match spec {
            CommandSpec::Shell(line) => {
                let mut command = Command::new(&self.shell.program);
                command.arg(&self.shell.flag);
                append_shell_line(&mut command, line);
                command
            }
            CommandSpec::Program { program, args } => {
                let mut command = Command::new(program);
                command.args(args);
                command
            }
        }
    }

    /// Drain stdout, then reap the child
    ///
    /// The child is waited on even when the read is abandoned.
    fn collect(&self, mut child: Child) -> Result<CapturedOutput, CaptureError> {
        let read = match child.stdout.take() {
            Some(mut stdout) => {
                read_to_end_doubling_with(&mut stdout, self.initial_capacity, self.reserve)
            }
            None => Ok(Vec::new()),
        };

        // stdout is closed here, a child still writing gets EPIPE
        let exit_code = match child.wait() {
            Ok(status) => exit_code(status),
            Err(e) => {
                warn!(pid = child.id(), error = %e, "Failed to collect child status");
                UNKNOWN_EXIT_CODE
            }
        };

        let stdout = read.map_err(CaptureError::OutOfMemory)?;
        Ok(CapturedOutput { exit_code, stdout })
    }
}

impl Default for SubprocessRunner {
    fn default() -> Self {
        Self::new(ShellConfig::default(), INITIAL_CAPTURE_CAPACITY)
    }
}

impl CommandRunner for SubprocessRunner {
    fn capture(&self, spec: &CommandSpec) -> Result<CapturedOutput, CaptureError> {
        let mut command = self.build_command(spec);
        command
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        let child = command.spawn().map_err(|e| {
            warn!(command = %spec.describe(), error = %e, "Spawn failed");
            CaptureError::SpawnFailed(e.to_string())
        })?;

        debug!(pid = child.id(), "Child spawned, reading stdout");

        let output = self.collect(child)?;

        info!(
            exit_code = output.exit_code,
            stdout_len = output.stdout.len(),
            "Child terminated"
        );

        Ok(output)
    }
}

#[cfg(unix)]
fn append_shell_line(command: &mut Command, line: &[u8]) {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    command.arg(OsStr::from_bytes(line));
}

#[cfg(windows)]
fn append_shell_line(command: &mut Command, line: &[u8]) {
    use std::os::windows::process::CommandExt;

    // cmd does its own parsing; pass the line through untouched
    command.raw_arg(String::from_utf8_lossy(line).into_owned());
}

/// The child's true exit code
///
/// A child killed by a signal reports `128 + signal`, as shells do.
#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use nix::sys::signal::Signal;
    use std::os::unix::process::ExitStatusExt;

    if let Some(code) = status.code() {
        return code;
    }
    match status.signal() {
        Some(signo) => {
            let name = Signal::try_from(signo)
                .map(|s| s.as_str())
                .unwrap_or("unknown");
            warn!(signal = signo, name = name, "Child terminated by signal");
            128 + signo
        }
        None => UNKNOWN_EXIT_CODE,
    }
}

#[cfg(windows)]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(UNKNOWN_EXIT_CODE)
}
