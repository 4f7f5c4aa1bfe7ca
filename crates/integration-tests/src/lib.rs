//! Shared fixtures for Textbridge integration tests

use std::sync::Arc;

use textbridge_core::application::constants::INITIAL_CAPTURE_CAPACITY;
use textbridge_core::BridgeService;
use textbridge_infra_system::{ProcessEnv, ShellConfig, SubprocessRunner};

/// Bridge wired to the real shell and process environment
pub fn system_bridge() -> BridgeService {
    system_bridge_with_capacity(INITIAL_CAPTURE_CAPACITY)
}

/// Same as `system_bridge` with a custom initial capture buffer
pub fn system_bridge_with_capacity(capacity: usize) -> BridgeService {
    bridge_with_shell(ShellConfig::default(), capacity)
}

/// Bridge using an explicit shell
pub fn bridge_with_shell(shell: ShellConfig, capacity: usize) -> BridgeService {
    BridgeService::new(
        Arc::new(SubprocessRunner::new(shell, capacity)),
        Arc::new(ProcessEnv),
    )
}
