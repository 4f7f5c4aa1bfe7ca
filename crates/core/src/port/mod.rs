// Port Layer - Interfaces for external dependencies

pub mod command_runner;
pub mod env_source;

// Re-exports
pub use command_runner::{AllocStage, CaptureError, CapturedOutput, CommandRunner, CommandSpec};
pub use env_source::EnvSource;

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Mock runner behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Exit with the given code after printing stdout
        Exit { code: i32, stdout: Vec<u8> },
        /// Fail with a capture error
        Fail(CaptureError),
    }

    /// Mock Command Runner for testing
    pub struct MockCommandRunner {
        behavior: Arc<Mutex<MockBehavior>>,
        calls: Arc<Mutex<Vec<CommandSpec>>>,
    }

    impl MockCommandRunner {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }
        pub fn new_exit(code: i32, stdout: impl Into<Vec<u8>>) -> Self {
            Self::new(MockBehavior::Exit {
                code,
                stdout: stdout.into(),
            })
        }
        pub fn new_fail(error: CaptureError) -> Self {
            Self::new(MockBehavior::Fail(error))
        }
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
        pub fn calls(&self) -> Vec<CommandSpec> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CommandRunner for MockCommandRunner {
        fn capture(&self, spec: &CommandSpec) -> Result<CapturedOutput, CaptureError> {
            self.calls.lock().unwrap().push(spec.clone());

            match self.behavior.lock().unwrap().clone() {
                MockBehavior::Exit { code, stdout } => Ok(CapturedOutput {
                    exit_code: code,
                    stdout,
                }),
                MockBehavior::Fail(error) => Err(error),
            }
        }
    }

    /// Mock Environment Source for testing
    #[derive(Default)]
    pub struct MockEnvSource {
        vars: HashMap<Vec<u8>, Vec<u8>>,
    }

    impl MockEnvSource {
        pub fn new() -> Self {
            Self::default()
        }
        pub fn with(mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
            self.vars.insert(key.into(), value.into());
            self
        }
    }

    impl EnvSource for MockEnvSource {
        fn var(&self, key: &[u8]) -> Option<Vec<u8>> {
            self.vars.get(key).cloned()
        }
    }
}
