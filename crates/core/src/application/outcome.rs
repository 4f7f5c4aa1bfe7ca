// Command Outcome - typed result of a capture, serialized only at the boundary

use super::constants::{
    ERROR_PREFIX, GROWTH_ALLOC_FAILED_MESSAGE, INITIAL_ALLOC_FAILED_MESSAGE,
    SPAWN_FAILED_MESSAGE,
};
use crate::port::{AllocStage, CaptureError, CapturedOutput};
use std::collections::TryReserveError;
use tracing::warn;

/// Result of running one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Exit code 0: raw stdout
    Completed(Vec<u8>),
    /// Nonzero exit code: stdout is kept
    Exited { code: i32, stdout: Vec<u8> },
    /// The capture itself failed
    Failed(CaptureError),
}

impl CommandOutcome {
    pub fn is_error(&self) -> bool {
        !matches!(self, CommandOutcome::Completed(_))
    }

    /// Serialize into the single-string wire format
    ///
    /// - `Completed` -> stdout unchanged
    /// - `Exited` -> `ERROR: exit code <N>: <stdout>`
    /// - `Failed` -> `ERROR: popen failed` / `ERROR: malloc failed` / `ERROR: realloc failed`
    ///
    /// If the combined `Exited` buffer cannot be allocated, only the prefix
    /// is returned.
    pub fn into_wire_bytes(self) -> Vec<u8> {
        match self {
            CommandOutcome::Completed(stdout) => stdout,
            CommandOutcome::Exited { code, stdout } => {
                assemble_exit_message(exit_code_prefix(code), &stdout, |buf, additional| {
                    buf.try_reserve_exact(additional)
                })
            }
            CommandOutcome::Failed(error) => failure_message(&error).as_bytes().to_vec(),
        }
    }
}

impl From<Result<CapturedOutput, CaptureError>> for CommandOutcome {
    fn from(result: Result<CapturedOutput, CaptureError>) -> Self {
        match result {
            Ok(output) if output.success() => CommandOutcome::Completed(output.stdout),
            Ok(output) => CommandOutcome::Exited {
                code: output.exit_code,
                stdout: output.stdout,
            },
            Err(error) => CommandOutcome::Failed(error),
        }
    }
}

/// `ERROR: exit code <N>: `
pub fn exit_code_prefix(code: i32) -> String {
    format!("{}exit code {}: ", ERROR_PREFIX, code)
}

/// Concatenate `prefix` and `stdout` into one buffer sized by `reserve`
///
/// Falls back to the prefix alone when the reservation fails.
pub fn assemble_exit_message<F>(prefix: String, stdout: &[u8], reserve: F) -> Vec<u8>
where
    F: FnOnce(&mut Vec<u8>, usize) -> Result<(), TryReserveError>,
{
    let mut combined = Vec::new();
    if let Err(e) = reserve(&mut combined, prefix.len() + stdout.len()) {
        warn!(
            prefix = %prefix,
            stdout_len = stdout.len(),
            error = %e,
            "Error message allocation failed, emitting prefix only"
        );
        return prefix.into_bytes();
    }
    combined.extend_from_slice(prefix.as_bytes());
    combined.extend_from_slice(stdout);
    combined
}

/// Fixed message for a failed capture
pub fn failure_message(error: &CaptureError) -> &'static str {
    match error {
        CaptureError::SpawnFailed(_) => SPAWN_FAILED_MESSAGE,
        CaptureError::OutOfMemory(AllocStage::Initial) => INITIAL_ALLOC_FAILED_MESSAGE,
        CaptureError::OutOfMemory(AllocStage::Growth) => GROWTH_ALLOC_FAILED_MESSAGE,
    }
}
