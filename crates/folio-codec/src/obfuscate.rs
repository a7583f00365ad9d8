use anyhow::Result;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

/// Reversible, keyless transform applied to values before they are stored.
pub trait Obfuscator: Send + Sync {
    fn encode(&self, plain: &[u8]) -> String;

    fn decode(&self, encoded: &str) -> Result<Vec<u8>>;
}

/// Standard-alphabet base64, padded. Reads back values written by the
/// browser's `btoa`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Obfuscator;

impl Obfuscator for Base64Obfuscator {
    fn encode(&self, plain: &[u8]) -> String {
        BASE64.encode(plain)
    }

    fn decode(&self, encoded: &str) -> Result<Vec<u8>> {
        let bytes = BASE64.decode(encoded.trim())?;
        Ok(bytes)
    }
}
