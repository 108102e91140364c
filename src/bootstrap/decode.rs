//! Base64 payload decoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Decode standard base64, ignoring ASCII whitespace (line wrapping).
pub fn try_decode(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    STANDARD.decode(compact)
}

/// Decode a payload field, yielding nothing on malformed input.
///
/// The failure is logged; callers write the empty result as-is.
pub fn decode_payload(field: &str, encoded: &str) -> Vec<u8> {
    match try_decode(encoded) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(field, error = %e, "Base64 decode failed");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_binary_content() {
        let raw: Vec<u8> = (0u8..=255).collect();
        let encoded = STANDARD.encode(&raw);
        assert_eq!(try_decode(&encoded).unwrap(), raw);
    }

    #[test]
    fn ignores_line_wrapping() {
        assert_eq!(try_decode("aGVs\nbG8g\r\nd29y bGQ=\n").unwrap(), b"hello world");
    }

    #[test]
    fn shell_metacharacters_are_just_invalid_input() {
        assert!(try_decode("'; rm -rf / #").is_err());
        assert!(decode_payload("cert", "$(touch /tmp/x)").is_empty());
    }

    #[test]
    fn bad_padding_yields_empty() {
        assert!(decode_payload("reference", "aGVsbG8").is_empty());
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(try_decode("").unwrap(), Vec::<u8>::new());
    }
}
