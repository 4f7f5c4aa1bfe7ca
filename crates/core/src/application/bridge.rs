// Bridge Service - boundary operations returning UTF-16 text
use crate::domain::{until_nul, Codec, Utf16Text};
use crate::port::{CommandRunner, CommandSpec, EnvSource};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::outcome::CommandOutcome;

/// Boundary operations: run a command or read an env var, encoded as UTF-16
///
/// Every operation is total. Failures come back as `ERROR: ` prefixed text.
pub struct BridgeService {
    runner: Arc<dyn CommandRunner>,
    env: Arc<dyn EnvSource>,
    codec: Codec,
}

impl BridgeService {
    /// Create a new bridge service
    ///
    /// # Arguments
    /// * `runner` - Command runner used for captures
    /// * `env` - Environment source for `get_env`
    ///
    /// # Example
    /// ```text
    /// let bridge = BridgeService::new(
    ///     Arc::new(SubprocessRunner::default()),
    ///     Arc::new(ProcessEnv),
    /// );
    /// ```
    pub fn new(runner: Arc<dyn CommandRunner>, env: Arc<dyn EnvSource>) -> Self {
        Self {
            runner,
            env,
            codec: Codec::default(),
        }
    }

    /// Use `codec` for every encoding this service performs
    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// Run a command line through the shell and return stdout or an error text
    ///
    /// The command is read up to its first NUL byte and passed verbatim: the
    /// caller is responsible for quoting.
    pub fn run_command(&self, command: &[u8]) -> Utf16Text {
        let spec = CommandSpec::shell(until_nul(command));
        self.run(&spec)
    }

    /// Run a program with arguments, no shell involved
    pub fn run_program(&self, program: &str, args: &[String]) -> Utf16Text {
        let spec = CommandSpec::program(program, args.iter().cloned());
        self.run(&spec)
    }

    /// Run `spec` and encode the wire form of its outcome
    pub fn run(&self, spec: &CommandSpec) -> Utf16Text {
        let bytes = self.outcome(spec).into_wire_bytes();
        self.codec.encode(&bytes)
    }

    /// Run `spec` and return the typed outcome without encoding it
    pub fn outcome(&self, spec: &CommandSpec) -> CommandOutcome {
        let command = spec.describe();
        info!(command = %command, "Running command");

        let outcome = CommandOutcome::from(self.runner.capture(spec));

        match &outcome {
            CommandOutcome::Completed(stdout) => {
                info!(command = %command, stdout_len = stdout.len(), "Command completed");
            }
            CommandOutcome::Exited { code, stdout } => {
                warn!(
                    command = %command,
                    exit_code = code,
                    stdout_len = stdout.len(),
                    "Command exited with nonzero status"
                );
            }
            CommandOutcome::Failed(error) => {
                warn!(command = %command, error = %error, "Command capture failed");
            }
        }

        outcome
    }

    /// Environment variable value as UTF-16, empty if unset
    pub fn get_env(&self, key: &[u8]) -> Utf16Text {
        let key = until_nul(key);
        match self.env.var(key) {
            Some(value) => self.codec.encode(&value),
            None => {
                debug!(key = %String::from_utf8_lossy(key), "Environment variable not set");
                Utf16Text::new()
            }
        }
    }

    /// Encode arbitrary UTF-8 bytes with this service's codec
    pub fn encode(&self, bytes: &[u8]) -> Utf16Text {
        self.codec.encode(bytes)
    }
}
