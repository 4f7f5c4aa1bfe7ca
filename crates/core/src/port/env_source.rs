// Environment Source Port

/// Read access to environment variables (allows mocking in tests)
pub trait EnvSource: Send + Sync {
    /// Raw value of `key`, or None if unset
    fn var(&self, key: &[u8]) -> Option<Vec<u8>>;
}
