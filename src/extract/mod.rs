pub mod external;
pub mod key;

use der::{Decode, Encode};
use x509_cert::Certificate;
use x509_cert::request::CertReq;

use crate::document::DocumentKind;
use crate::error::ExtractError;
use key::PublicKey;

pub use external::OpensslCommand;

pub type Result<T> = std::result::Result<T, ExtractError>;

const PEM_MARKER: &[u8] = b"-----BEGIN ";

const CERTIFICATE_LABELS: &[&str] = &["CERTIFICATE", "X509 CERTIFICATE", "TRUSTED CERTIFICATE"];
const REQUEST_LABELS: &[&str] = &["CERTIFICATE REQUEST", "NEW CERTIFICATE REQUEST"];
const PRIVATE_KEY_LABELS: &[&str] = &[
    "PRIVATE KEY",
    "RSA PRIVATE KEY",
    "EC PRIVATE KEY",
    "ENCRYPTED PRIVATE KEY",
];

/// DER encoding of a SubjectPublicKeyInfo structure.
///
/// Every extractor must produce the same bytes for the same key, whichever
/// document the key was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpkiDer(Vec<u8>);

impl SpkiDer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for SpkiDer {
    fn from(der: Vec<u8>) -> Self {
        SpkiDer(der)
    }
}

impl AsRef<[u8]> for SpkiDer {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Obtains the SubjectPublicKeyInfo of a key-bearing document.
///
/// This is the only place the pipeline touches a parsing library, so a fake
/// implementation is enough to exercise everything downstream of it.
pub trait SpkiExtractor {
    /// Extracts the DER-encoded SubjectPublicKeyInfo from `bytes`, which hold
    /// a document of the given `kind` in PEM or DER form.
    fn subject_public_key_info(&self, kind: DocumentKind, bytes: &[u8]) -> Result<SpkiDer>;
}

/// Extracts public keys in-process with the RustCrypto crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoExtractor;

impl SpkiExtractor for RustCryptoExtractor {
    fn subject_public_key_info(&self, kind: DocumentKind, bytes: &[u8]) -> Result<SpkiDer> {
        match kind {
            DocumentKind::Certificate => {
                let der = der_for(bytes, CERTIFICATE_LABELS)?;
                let cert = Certificate::from_der(&der.contents)?;
                Ok(cert.tbs_certificate.subject_public_key_info.to_der()?.into())
            }
            DocumentKind::CertificateRequest => {
                let der = der_for(bytes, REQUEST_LABELS)?;
                let request = CertReq::from_der(&der.contents)?;
                Ok(request.info.public_key.to_der()?.into())
            }
            DocumentKind::PrivateKey => {
                let der = der_for(bytes, PRIVATE_KEY_LABELS)?;
                let public_key = match der.label {
                    Some("PRIVATE KEY") => PublicKey::from_pkcs8_der(&der.contents)?,
                    Some("RSA PRIVATE KEY") => PublicKey::from_pkcs1_der(&der.contents)?,
                    Some("EC PRIVATE KEY") => PublicKey::from_sec1_der(&der.contents)?,
                    Some(_) => return Err(ExtractError::EncryptedKey),
                    None => PublicKey::from_private_key_der(&der.contents)?,
                };
                public_key.to_spki_der()
            }
        }
    }
}

/// DER contents of a document, with the PEM label it came from, if any.
struct DerDocument {
    label: Option<&'static str>,
    contents: Vec<u8>,
}

/// Returns true when the bytes look like PEM rather than raw DER.
///
/// Text in front of the first block (PKCS#12 bag attributes, `openssl x509
/// -text` dumps) is allowed.
pub fn is_pem(bytes: &[u8]) -> bool {
    bytes
        .windows(PEM_MARKER.len())
        .any(|window| window == PEM_MARKER)
}

/// Unwraps PEM armor, picking the first block whose label is in `labels`.
/// Raw DER input is passed through untouched.
///
/// Blocks encrypted with the legacy `Proc-Type: 4,ENCRYPTED` header are
/// refused with [`ExtractError::EncryptedKey`].
fn der_for(bytes: &[u8], labels: &[&'static str]) -> Result<DerDocument> {
    if !is_pem(bytes) {
        return Ok(DerDocument {
            label: None,
            contents: bytes.to_vec(),
        });
    }

    let blocks = pem::parse_many(bytes)?;
    let (label, block) = blocks
        .iter()
        .find_map(|block| {
            labels
                .iter()
                .find(|label| **label == block.tag())
                .map(|label| (*label, block))
        })
        .ok_or(ExtractError::MissingPemBlock {
            expected: labels[0],
        })?;

    if block
        .headers()
        .get("Proc-Type")
        .is_some_and(|proc_type| proc_type.contains("ENCRYPTED"))
    {
        return Err(ExtractError::EncryptedKey);
    }

    Ok(DerDocument {
        label: Some(label),
        contents: block.contents().to_vec(),
    })
}
