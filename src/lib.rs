//! # HpkpKit - HTTP Public Key Pinning Header Generation
//!
//! HpkpKit derives `pin-sha256` values from certificates, certificate signing
//! requests and private keys, and assembles them into a `Public-Key-Pins`
//! header as described in RFC 7469. Keys are parsed with the rustcrypto
//! libraries; an external `openssl` executable can be used instead.
//!
//! ## How a Pin is Computed
//!
//! A pin is the base64-encoded SHA-256 digest of the DER-encoded
//! SubjectPublicKeyInfo of a key. Because only the public key is hashed, a
//! certificate, the CSR it was requested with and the private key behind it
//! all produce the same pin.
//!
//! ## Supported Inputs
//!
//! The document kind is decided by the file extension:
//! - **Certificates**: `.crt`, `.cert`, `.pem`
//! - **Certificate signing requests**: `.csr`
//! - **Private keys**: `.key` (PKCS#8, PKCS#1 or SEC1, unencrypted)
//!
//! Files may be PEM or DER encoded. RSA, ECDSA (P-256, P-384, P-521) and
//! Ed25519 keys are supported.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hpkpkit::{
//!     extract::RustCryptoExtractor,
//!     header::{HeaderConfig, OutputMode},
//! };
//!
//! # fn main() -> Result<(), hpkpkit::error::HpkpError> {
//! let pins = hpkpkit::pins_for_files(
//!     &RustCryptoExtractor,
//!     &["/etc/ssl/site.crt", "/root/backup.csr"],
//! )?;
//!
//! let config = HeaderConfig::builder()
//!     .pins(pins)
//!     .max_age(2_592_000)
//!     .include_subdomains(true)
//!     .output_mode(OutputMode::Nginx)
//!     .quiet(true)
//!     .build();
//!
//! // add_header Public-Key-Pins 'pin-sha256="..."; pin-sha256="..."; max-age=2592000; includeSubDomains';
//! print!("{}", hpkpkit::generate(&config)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every failure is fatal for a run; no header is produced from a partial set
//! of pins:
//!
//! ```rust
//! use hpkpkit::{error::HpkpError, header::{HeaderConfig, HeaderValue}, pin::Pin};
//!
//! let config = HeaderConfig::builder()
//!     .pins(vec![Pin::compute(b"only one key")])
//!     .build();
//!
//! match HeaderValue::assemble(&config) {
//!     Ok(header) => println!("{header}"),
//!     Err(HpkpError::InsufficientPins { found }) => println!("need a backup pin, have {found}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`document`]: File classification by extension
//! - [`extract`]: SubjectPublicKeyInfo extraction, in-process or via `openssl`
//! - [`pin`]: SHA-256 pin computation
//! - [`header`]: Header configuration and assembly
//! - [`output`]: Plain, nginx and Apache rendering
//! - [`error`]: Error types

pub mod document;
pub mod error;
pub mod extract;
pub mod header;
pub mod output;
pub mod pin;

use std::path::Path;

use tracing::{debug, info};

use document::classify;
use error::{HpkpError, Result};
use extract::SpkiExtractor;
use header::{HeaderConfig, HeaderValue};
use pin::Pin;

/// Classifies, reads and pins a single file.
///
/// # Errors
/// Fails when the extension is unknown, the file cannot be read, or no public
/// key can be extracted from it.
pub fn pin_for_file<E>(extractor: &E, path: &Path) -> Result<Pin>
where
    E: SpkiExtractor + ?Sized,
{
    let kind = classify(path)?;
    debug!("{}: reading as {}", path.display(), kind);

    let bytes = std::fs::read(path).map_err(|source| HpkpError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let spki = extractor
        .subject_public_key_info(kind, &bytes)
        .map_err(|source| HpkpError::extraction(path, source))?;

    let pin = Pin::from_spki(&spki);
    info!("{}: pin-sha256={}", path.display(), pin);
    Ok(pin)
}

/// Pins every file in order, stopping at the first failure.
///
/// The returned pins are in the same order as `paths`.
pub fn pins_for_files<E, P>(extractor: &E, paths: &[P]) -> Result<Vec<Pin>>
where
    E: SpkiExtractor + ?Sized,
    P: AsRef<Path>,
{
    paths
        .iter()
        .map(|path| pin_for_file(extractor, path.as_ref()))
        .collect()
}

/// Assembles, renders and frames the header described by `config`.
///
/// # Errors
/// [`HpkpError::InsufficientPins`] when the configuration holds fewer than two pins.
pub fn generate(config: &HeaderConfig) -> Result<String> {
    let header = HeaderValue::assemble(config)?;
    let rendered = output::render(&header, config.output_mode);
    Ok(output::frame(&rendered, config.output_mode, config.quiet))
}
