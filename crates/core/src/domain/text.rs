// Unicode Text Value (UTF-16 code units)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Owned UTF-16 code unit sequence
///
/// Produced per call and owned by the caller. Not guaranteed to be
/// well-formed UTF-16: the codec may emit unpaired surrogates for
/// malformed input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Utf16Text(Vec<u16>);

impl Utf16Text {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_units(units: Vec<u16>) -> Self {
        Self(units)
    }

    pub fn as_units(&self) -> &[u16] {
        &self.0
    }

    pub fn into_units(self) -> Vec<u16> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Host string view; unpaired surrogates become U+FFFD
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.0)
    }

    /// Strict host string conversion
    pub fn to_string_checked(&self) -> Result<String, std::string::FromUtf16Error> {
        String::from_utf16(&self.0)
    }

    /// Compare the leading code units against `prefix`
    pub fn starts_with_str(&self, prefix: &str) -> bool {
        let mut units = self.0.iter();
        prefix
            .encode_utf16()
            .all(|expected| units.next() == Some(&expected))
    }
}

impl From<&str> for Utf16Text {
    fn from(s: &str) -> Self {
        Self(s.encode_utf16().collect())
    }
}

impl From<Vec<u16>> for Utf16Text {
    fn from(units: Vec<u16>) -> Self {
        Self(units)
    }
}

impl fmt::Display for Utf16Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in char::decode_utf16(self.0.iter().copied()) {
            write!(f, "{}", c.unwrap_or(char::REPLACEMENT_CHARACTER))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_and_back() {
        let text = Utf16Text::from("héllo 😀");
        assert_eq!(text.len(), 8);
        assert_eq!(text.to_string_lossy(), "héllo 😀");
        assert_eq!(text.to_string(), "héllo 😀");
    }

    #[test]
    fn test_unpaired_surrogate_is_lossy() {
        let text = Utf16Text::from_units(vec![0x61, 0xD800]);
        assert_eq!(text.to_string_lossy(), "a\u{FFFD}");
        assert!(text.to_string_checked().is_err());
    }

    #[test]
    fn test_starts_with_str() {
        let text = Utf16Text::from("ERROR: popen failed");
        assert!(text.starts_with_str("ERROR: "));
        assert!(!text.starts_with_str("ERROR: popen failed and more"));
        assert!(Utf16Text::new().starts_with_str(""));
    }

    #[test]
    fn test_serializes_as_unit_array() {
        let json = serde_json::to_string(&Utf16Text::from("hi")).unwrap();
        assert_eq!(json, "[104,105]");
    }
}
