use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encode captured body bytes for lossless JSON transport.
pub fn encode_content(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Inverse of [`encode_content`]; what the collector applies on receipt.
pub fn decode_content(content: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(content)
}
