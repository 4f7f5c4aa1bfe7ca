// UTF-8 -> UTF-16 Codec
// Two passes (measure, fill) over the same bytes, sharing one decode routine

use super::text::Utf16Text;

/// Replacement code point for malformed input
pub const REPLACEMENT: u32 = 0xFFFD;

/// First code point that needs a surrogate pair
const SUPPLEMENTARY_BASE: u32 = 0x10000;

const HIGH_SURROGATE: u32 = 0xD800;
const LOW_SURROGATE: u32 = 0xDC00;

/// How a lead byte whose continuation bytes run past the end of input is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TruncatedSequence {
    /// Accumulate only the continuation bytes present and advance the cursor
    /// by the lead's nominal width (2/3/4). The decoded value may be wrong.
    #[default]
    NominalWidth,
    /// Decode to U+FFFD and advance only by the bytes actually available.
    Replace,
}

/// One decoded code point and the cursor advance that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub code_point: u32,
    pub advance: usize,
}

impl Step {
    /// Number of UTF-16 code units this code point contributes (1 or 2)
    pub fn units(&self) -> usize {
        if self.code_point >= SUPPLEMENTARY_BASE {
            2
        } else {
            1
        }
    }
}

/// UTF-8 byte decoder producing UTF-16 code units
///
/// Total: never fails. Malformed input degrades to U+FFFD.
#[derive(Debug, Clone, Copy, Default)]
pub struct Codec {
    truncated: TruncatedSequence,
}

impl Codec {
    pub fn new(truncated: TruncatedSequence) -> Self {
        Self { truncated }
    }

    pub fn truncated_sequence(&self) -> TruncatedSequence {
        self.truncated
    }

    /// Decode the code point starting at `index`, None past the end
    ///
    /// Both passes go through here, which keeps the measured length and the
    /// written length identical.
    pub fn decode_at(&self, bytes: &[u8], index: usize) -> Option<Step> {
        let lead = *bytes.get(index)?;
        let (payload, width) = match lead {
            b if b < 0x80 => {
                return Some(Step {
                    code_point: u32::from(b),
                    advance: 1,
                })
            }
            b if b & 0xE0 == 0xC0 => (u32::from(b & 0x1F), 2),
            b if b & 0xF0 == 0xE0 => (u32::from(b & 0x0F), 3),
            b if b & 0xF8 == 0xF0 => (u32::from(b & 0x07), 4),
            // Stray continuation byte or invalid lead
            _ => {
                return Some(Step {
                    code_point: REPLACEMENT,
                    advance: 1,
                })
            }
        };

        let available = bytes.len() - index;
        if available < width && self.truncated == TruncatedSequence::Replace {
            return Some(Step {
                code_point: REPLACEMENT,
                advance: available,
            });
        }

        let code_point = bytes[index + 1..]
            .iter()
            .take(width - 1)
            .fold(payload, |cp, &b| (cp << 6) | u32::from(b & 0x3F));

        Some(Step {
            code_point,
            advance: width,
        })
    }

    /// Measuring pass: number of UTF-16 code units `bytes` decodes to
    pub fn measure(&self, bytes: &[u8]) -> usize {
        let mut units = 0;
        let mut i = 0;
        while let Some(step) = self.decode_at(bytes, i) {
            units += step.units();
            i += step.advance;
        }
        units
    }

    /// Filling pass: decode `bytes` into an exactly sized code unit buffer
    ///
    /// # Example
    /// ```
    /// use textbridge_core::domain::Codec;
    ///
    /// let text = Codec::default().encode("é😀".as_bytes());
    /// assert_eq!(text.as_units(), &[0x00E9, 0xD83D, 0xDE00]);
    /// ```
    pub fn encode(&self, bytes: &[u8]) -> Utf16Text {
        if bytes.is_empty() {
            return Utf16Text::new();
        }

        let expected = self.measure(bytes);
        let mut units = Vec::with_capacity(expected);
        let mut i = 0;
        while let Some(step) = self.decode_at(bytes, i) {
            push_code_point(&mut units, step.code_point);
            i += step.advance;
        }

        debug_assert_eq!(
            units.len(),
            expected,
            "measured and written code unit counts diverged"
        );
        Utf16Text::from_units(units)
    }
}

/// Append `cp` as one code unit, or as a surrogate pair above the BMP
fn push_code_point(units: &mut Vec<u16>, cp: u32) {
    if cp >= SUPPLEMENTARY_BASE {
        let offset = cp - SUPPLEMENTARY_BASE;
        // Lead payloads are at most 21 bits, so both halves fit in u16
        units.push((HIGH_SURROGATE | (offset >> 10)) as u16);
        units.push((LOW_SURROGATE | (offset & 0x3FF)) as u16);
    } else {
        units.push(cp as u16);
    }
}

/// Encode with the default codec (nominal-width truncation)
pub fn encode(bytes: &[u8]) -> Utf16Text {
    Codec::default().encode(bytes)
}

/// Measure with the default codec
pub fn measure(bytes: &[u8]) -> usize {
    Codec::default().measure(bytes)
}

/// C-string view: the prefix before the first zero byte
pub fn until_nul(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == 0) {
        Some(end) => &bytes[..end],
        None => bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_empty_input() {
        assert!(encode(b"").is_empty());
        assert_eq!(measure(b""), 0);
    }

    #[test]
    fn test_ascii_maps_to_itself() {
        let bytes: Vec<u8> = (0u8..0x80).collect();
        let text = encode(&bytes);
        let expected: Vec<u16> = (0u16..0x80).collect();
        assert_eq!(text.as_units(), expected.as_slice());
    }

    #[test]
    fn test_two_byte_sequence() {
        assert_eq!(encode(&[0xC3, 0xA9]).as_units(), &[0x00E9]);
    }

    #[test]
    fn test_three_byte_sequence() {
        // U+20AC EURO SIGN
        assert_eq!(encode(&[0xE2, 0x82, 0xAC]).as_units(), &[0x20AC]);
    }

    #[test]
    fn test_four_byte_sequence_surrogate_pair() {
        assert_eq!(
            encode(&[0xF0, 0x9F, 0x98, 0x80]).as_units(),
            &[0xD83D, 0xDE00]
        );
    }

    #[test]
    fn test_isolated_continuation_byte() {
        let codec = Codec::default();
        let step = codec.decode_at(&[0x80], 0);
        assert_eq!(
            step,
            Some(Step {
                code_point: REPLACEMENT,
                advance: 1
            })
        );
        assert_eq!(encode(&[0x80]).as_units(), &[0xFFFD]);
        assert_eq!(encode(&[0x80, b'a']).as_units(), &[0xFFFD, 0x61]);
    }

    #[test]
    fn test_decode_past_end_is_none() {
        let codec = Codec::default();
        assert_eq!(codec.decode_at(b"", 0), None);
        assert_eq!(codec.decode_at(b"ab", 2), None);
        assert_eq!(codec.decode_at(b"ab", usize::MAX), None);
    }

    #[test]
    fn test_invalid_lead_bytes() {
        // 0xF8..=0xFF match no lead pattern
        assert_eq!(encode(&[0xF8, 0xFF]).as_units(), &[0xFFFD, 0xFFFD]);
    }

    #[test]
    fn test_truncated_nominal_width_quirk() {
        // 3-byte lead with one continuation byte: partial value, cursor advances 3
        let bytes = [0xE2, 0x82];
        let step = Codec::default().decode_at(&bytes, 0).unwrap();
        assert_eq!(step.advance, 3);
        assert_eq!(step.code_point, (0x02 << 6) | 0x02);
        assert_eq!(encode(&bytes).as_units(), &[0x0082]);
    }

    #[test]
    fn test_truncated_four_byte_lead_stays_in_bmp() {
        let bytes = [0xF0, 0x9F];
        let text = encode(&bytes);
        assert_eq!(text.len(), measure(&bytes));
        assert_eq!(text.as_units(), &[0x001F]);
    }

    #[test]
    fn test_truncated_replace_policy() {
        let codec = Codec::new(TruncatedSequence::Replace);
        let step = codec.decode_at(&[b'x', 0xE2, 0x82], 1);
        assert_eq!(
            step,
            Some(Step {
                code_point: REPLACEMENT,
                advance: 2
            })
        );
        assert_eq!(codec.encode(&[b'x', 0xE2, 0x82]).as_units(), &[0x78, 0xFFFD]);
    }

    #[test]
    fn test_replace_policy_matches_default_on_complete_input() {
        let bytes = "héllo wörld 😀 €".as_bytes();
        let strict = Codec::new(TruncatedSequence::Replace);
        assert_eq!(strict.encode(bytes), encode(bytes));
    }

    #[test]
    fn test_valid_utf8_matches_std_encoder() {
        let s = "mixed: a é € 😀 𝄞 end";
        let expected: Vec<u16> = s.encode_utf16().collect();
        assert_eq!(encode(s.as_bytes()).as_units(), expected.as_slice());
    }

    #[test]
    fn test_until_nul() {
        assert_eq!(until_nul(b"echo hi\0garbage"), b"echo hi");
        assert_eq!(until_nul(b"no terminator"), b"no terminator");
        assert_eq!(until_nul(b"\0"), b"");
    }

    #[quickcheck]
    fn prop_measure_matches_written(bytes: Vec<u8>) -> bool {
        encode(&bytes).len() == measure(&bytes)
    }

    #[quickcheck]
    fn prop_measure_matches_written_replace(bytes: Vec<u8>) -> bool {
        let codec = Codec::new(TruncatedSequence::Replace);
        codec.encode(&bytes).len() == codec.measure(&bytes)
    }

    #[quickcheck]
    fn prop_valid_strings_round_trip(s: String) -> bool {
        encode(s.as_bytes()).to_string_lossy() == s
    }
}
