use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

use crate::extract::SpkiDer;

/// A `pin-sha256` value: the base64 SHA-256 digest of a SubjectPublicKeyInfo.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pin(String);

impl Pin {
    /// Hashes DER bytes into a pin.
    pub fn compute(der: &[u8]) -> Self {
        let digest = Sha256::digest(der);
        Pin(STANDARD.encode(digest))
    }

    pub fn from_spki(spki: &SpkiDer) -> Self {
        Self::compute(spki.as_bytes())
    }

    /// The base64 digest, without quotes or directive name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
