//! Base64 text as carried in request and response bodies.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::decode::DecodeError;

/// Remove a leading `data:<mime>;base64,` prefix, if present.
pub fn strip_data_uri_prefix(text: &str) -> &str {
    let trimmed = text.trim_start();
    if !trimmed.starts_with("data:") {
        return text;
    }
    match trimmed.find(";base64,") {
        Some(idx) => &trimmed[idx + ";base64,".len()..],
        None => text,
    }
}

/// Decode base64 transport text into raw bytes.
///
/// A data-URI prefix and any ASCII whitespace (line breaks from wrapping
/// encoders) are ignored.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, DecodeError> {
    let payload: String = strip_data_uri_prefix(text)
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    STANDARD
        .decode(payload.as_bytes())
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))
}

/// Encode bytes as standard, padded base64 without a data-URI prefix.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
