use std::fmt;
use std::path::Path;

use tracing::warn;

use crate::error::{HpkpError, Result};

/// The kinds of documents a pin can be derived from.
///
/// The kind is decided by the file name alone; the contents are only
/// inspected later, by an [`SpkiExtractor`](crate::extract::SpkiExtractor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// An X.509 certificate (`.crt`, `.cert`, `.pem`).
    Certificate,
    /// A PKCS#10 certificate signing request (`.csr`).
    CertificateRequest,
    /// An unencrypted private key (`.key`).
    PrivateKey,
}

impl DocumentKind {
    /// Maps an extension to a document kind. Matching is exact and case-sensitive.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "crt" | "cert" | "pem" => Some(DocumentKind::Certificate),
            "csr" => Some(DocumentKind::CertificateRequest),
            "key" => Some(DocumentKind::PrivateKey),
            // Deprecated synonym, still accepted for old scripts.
            "u" => Some(DocumentKind::PrivateKey),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentKind::Certificate => "certificate",
            DocumentKind::CertificateRequest => "certificate request",
            DocumentKind::PrivateKey => "private key",
        };
        f.write_str(name)
    }
}

/// Returns the text after the final `.` of the file name, or the whole file
/// name when it has no dot.
fn extension_of(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    match file_name.rsplit_once('.') {
        Some((_, extension)) => extension.to_string(),
        None => file_name,
    }
}

/// Classifies a file by its extension.
///
/// # Errors
/// [`HpkpError::UnknownExtension`] when the extension is not one of
/// `crt`, `cert`, `pem`, `csr` or `key`.
pub fn classify(path: &Path) -> Result<DocumentKind> {
    let extension = extension_of(path);
    match DocumentKind::from_extension(&extension) {
        Some(kind) => {
            if extension == "u" {
                warn!(
                    "{}: the '.u' extension is deprecated, rename the file to '.key'",
                    path.display()
                );
            }
            Ok(kind)
        }
        None => Err(HpkpError::UnknownExtension {
            path: path.to_path_buf(),
            extension,
        }),
    }
}
