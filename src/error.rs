//! Error types shared by the pin pipeline and the command line.

use std::path::PathBuf;

use const_oid::ObjectIdentifier;
use thiserror::Error;

/// Represents errors that can abort a pin generation run.
///
/// Every variant is fatal: a header is never emitted once one of these is raised.
#[derive(Debug, Error)]
pub enum HpkpError {
    /// The file name does not end in a recognized key-bearing extension.
    #[error("Unknown file extension '{extension}' for {path}")]
    UnknownExtension { path: PathBuf, extension: String },

    /// The file could not be read from disk.
    #[error("Failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No public key could be extracted from the file.
    #[error("Failed to extract public key from {path}: {source}")]
    ExtractionFailed {
        path: PathBuf,
        #[source]
        source: ExtractError,
    },

    /// Fewer pins than HPKP requires for a usable header.
    #[error("At least 2 pins are required (one of them a backup pin), found {found}")]
    InsufficientPins { found: usize },

    /// The external crypto tool could not be executed.
    #[error("Required tool '{tool}' is not available")]
    MissingDependency { tool: String },

    /// The command line was well-formed but unusable.
    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, HpkpError>;

/// Errors raised while turning document bytes into a SubjectPublicKeyInfo.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Error during data decoding.
    #[error("Failed to decode data: {0}")]
    DecodingError(String),

    /// Error during data encoding.
    #[error("Failed to encode data: {0}")]
    EncodingError(String),

    /// PEM input without a block this document kind can use.
    #[error("No {expected} PEM block found")]
    MissingPemBlock { expected: &'static str },

    #[error("Encrypted private keys are not supported")]
    EncryptedKey,

    #[error("Unsupported key algorithm {0}")]
    UnsupportedAlgorithm(ObjectIdentifier),

    /// The external tool could not be spawned.
    #[error("Failed to run '{tool}': {source}")]
    ToolUnavailable {
        tool: String,
        source: std::io::Error,
    },

    /// The external tool ran but rejected the input.
    #[error("'{tool}' exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// Error from RSA PKCS1 operations.
    #[error("RSA PKCS1 error: {0}")]
    RsaPkcs1Error(String),
}

impl From<der::Error> for ExtractError {
    /// Converts a `der::Error` into an `ExtractError`.
    fn from(err: der::Error) -> Self {
        ExtractError::DecodingError(err.to_string())
    }
}

impl From<pem::PemError> for ExtractError {
    fn from(err: pem::PemError) -> Self {
        ExtractError::DecodingError(err.to_string())
    }
}

impl From<pkcs8::Error> for ExtractError {
    fn from(err: pkcs8::Error) -> Self {
        ExtractError::DecodingError(err.to_string())
    }
}

impl From<pkcs8::spki::Error> for ExtractError {
    fn from(err: pkcs8::spki::Error) -> Self {
        ExtractError::EncodingError(err.to_string())
    }
}

impl From<rsa::pkcs1::Error> for ExtractError {
    fn from(err: rsa::pkcs1::Error) -> Self {
        ExtractError::RsaPkcs1Error(err.to_string())
    }
}

impl HpkpError {
    /// Attaches the offending path to an extraction error.
    ///
    /// A tool that cannot be spawned is reported as a missing dependency rather
    /// than as a problem with the file.
    pub fn extraction(path: impl Into<PathBuf>, source: ExtractError) -> Self {
        match source {
            ExtractError::ToolUnavailable { tool, .. } => HpkpError::MissingDependency { tool },
            source => HpkpError::ExtractionFailed {
                path: path.into(),
                source,
            },
        }
    }
}
