// Textbridge Core - Codec, Ports & Boundary Operations
// NO process or environment access (Hexagonal Architecture)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::{BridgeService, CommandOutcome};
pub use domain::{Codec, TruncatedSequence, Utf16Text};
pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
