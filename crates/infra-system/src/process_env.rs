// Process environment adapter

use std::ffi::OsString;
use textbridge_core::port::EnvSource;

/// Environment source backed by the current process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &[u8]) -> Option<Vec<u8>> {
        // Names the OS cannot hold are never set
        if key.is_empty() || key.contains(&b'=') || key.contains(&0) {
            return None;
        }
        std::env::var_os(os_key(key)?).map(into_bytes)
    }
}

#[cfg(unix)]
fn os_key(key: &[u8]) -> Option<OsString> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    Some(OsStr::from_bytes(key).to_os_string())
}

#[cfg(not(unix))]
fn os_key(key: &[u8]) -> Option<OsString> {
    std::str::from_utf8(key).ok().map(OsString::from)
}

#[cfg(unix)]
fn into_bytes(value: OsString) -> Vec<u8> {
    use std::os::unix::ffi::OsStringExt;

    value.into_vec()
}

#[cfg(not(unix))]
fn into_bytes(value: OsString) -> Vec<u8> {
    value.to_string_lossy().into_owned().into_bytes()
}
