// Textbridge Infrastructure - System Adapters
// Implements: CommandRunner, EnvSource

pub mod capture_buffer;
pub mod process_env;
pub mod subprocess_runner;

pub use process_env::ProcessEnv;
pub use subprocess_runner::{ShellConfig, SubprocessRunner};
