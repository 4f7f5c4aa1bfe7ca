// Application Layer - Boundary operations

pub mod bridge;
pub mod constants;
pub mod outcome;

// Re-exports
pub use bridge::BridgeService;
pub use outcome::CommandOutcome;
