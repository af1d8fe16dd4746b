use const_oid::ObjectIdentifier;
use const_oid::db::{rfc5912, rfc8410};
use der::Decode;
use ed25519_dalek::{SigningKey as Ed25519SigningKey, VerifyingKey as Ed25519VerifyingKey};
use pkcs8::{DecodePrivateKey, EncodePublicKey, EncryptedPrivateKeyInfo, PrivateKeyInfo};
use rsa::{RsaPrivateKey, RsaPublicKey, pkcs1::DecodeRsaPrivateKey};
use sec1::EcPrivateKey;

use super::{Result, SpkiDer};
use crate::error::ExtractError;

/// Public half of a private key, for the key types a pin can be derived from.
#[derive(Clone, Debug)]
pub enum PublicKey {
    Rsa(RsaPublicKey),
    EcdsaP256(p256::PublicKey),
    EcdsaP384(p384::PublicKey),
    EcdsaP521(p521::PublicKey),
    Ed25519(Ed25519VerifyingKey),
}

impl PublicKey {
    /// Derives the public key from a DER private key of unknown encoding.
    ///
    /// PKCS#8 is tried first, then PKCS#1 (RSA) and SEC1 (EC).
    pub fn from_private_key_der(der: &[u8]) -> Result<Self> {
        if EncryptedPrivateKeyInfo::from_der(der).is_ok() {
            return Err(ExtractError::EncryptedKey);
        }
        if PrivateKeyInfo::from_der(der).is_ok() {
            return Self::from_pkcs8_der(der);
        }
        Self::from_pkcs1_der(der)
            .or_else(|_| Self::from_sec1_der(der))
            .map_err(|_| {
                ExtractError::DecodingError(
                    "not a PKCS#8, PKCS#1 or SEC1 private key".to_string(),
                )
            })
    }

    /// Derives the public key from a PKCS#8 `PrivateKeyInfo`.
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        let info = PrivateKeyInfo::from_der(der)?;
        match info.algorithm.oid {
            rfc5912::RSA_ENCRYPTION => {
                let private = RsaPrivateKey::from_pkcs8_der(der)?;
                Ok(PublicKey::Rsa(RsaPublicKey::from(&private)))
            }
            rfc5912::ID_EC_PUBLIC_KEY => {
                let curve = info
                    .algorithm
                    .parameters_oid()
                    .map_err(|e| ExtractError::DecodingError(e.to_string()))?;
                match curve {
                    rfc5912::SECP_256_R_1 => Ok(PublicKey::EcdsaP256(
                        p256::SecretKey::from_pkcs8_der(der)?.public_key(),
                    )),
                    rfc5912::SECP_384_R_1 => Ok(PublicKey::EcdsaP384(
                        p384::SecretKey::from_pkcs8_der(der)?.public_key(),
                    )),
                    rfc5912::SECP_521_R_1 => Ok(PublicKey::EcdsaP521(
                        p521::SecretKey::from_pkcs8_der(der)?.public_key(),
                    )),
                    other => Err(ExtractError::UnsupportedAlgorithm(other)),
                }
            }
            rfc8410::ID_ED_25519 => {
                let signing_key = Ed25519SigningKey::from_pkcs8_der(der)?;
                Ok(PublicKey::Ed25519(signing_key.verifying_key()))
            }
            other => Err(ExtractError::UnsupportedAlgorithm(other)),
        }
    }

    /// Derives the public key from a PKCS#1 `RSAPrivateKey`.
    pub fn from_pkcs1_der(der: &[u8]) -> Result<Self> {
        let private = RsaPrivateKey::from_pkcs1_der(der)?;
        Ok(PublicKey::Rsa(RsaPublicKey::from(&private)))
    }

    /// Derives the public key from a SEC1 `ECPrivateKey`.
    ///
    /// The curve comes from the embedded parameters; keys written without them
    /// are matched on the length of the private scalar.
    pub fn from_sec1_der(der: &[u8]) -> Result<Self> {
        let ec_key = EcPrivateKey::from_der(der)?;
        let curve = match ec_key.parameters.and_then(|params| params.named_curve()) {
            Some(oid) => oid,
            None => curve_for_scalar_len(ec_key.private_key.len())?,
        };

        let decode_err = |e: p256::elliptic_curve::Error| ExtractError::DecodingError(e.to_string());
        match curve {
            rfc5912::SECP_256_R_1 => Ok(PublicKey::EcdsaP256(
                p256::SecretKey::from_sec1_der(der)
                    .map_err(decode_err)?
                    .public_key(),
            )),
            rfc5912::SECP_384_R_1 => Ok(PublicKey::EcdsaP384(
                p384::SecretKey::from_sec1_der(der)
                    .map_err(decode_err)?
                    .public_key(),
            )),
            rfc5912::SECP_521_R_1 => Ok(PublicKey::EcdsaP521(
                p521::SecretKey::from_sec1_der(der)
                    .map_err(decode_err)?
                    .public_key(),
            )),
            other => Err(ExtractError::UnsupportedAlgorithm(other)),
        }
    }

    /// Encodes the key as a DER SubjectPublicKeyInfo, the form pins are computed over.
    pub fn to_spki_der(&self) -> Result<SpkiDer> {
        let document = match self {
            PublicKey::Rsa(public) => public.to_public_key_der()?,
            PublicKey::EcdsaP256(public) => public.to_public_key_der()?,
            PublicKey::EcdsaP384(public) => public.to_public_key_der()?,
            PublicKey::EcdsaP521(public) => public.to_public_key_der()?,
            PublicKey::Ed25519(verifying_key) => verifying_key.to_public_key_der()?,
        };
        Ok(document.as_bytes().to_vec().into())
    }
}

fn curve_for_scalar_len(len: usize) -> Result<ObjectIdentifier> {
    match len {
        32 => Ok(rfc5912::SECP_256_R_1),
        48 => Ok(rfc5912::SECP_384_R_1),
        66 => Ok(rfc5912::SECP_521_R_1),
        _ => Err(ExtractError::DecodingError(format!(
            "EC private key of {len} bytes has no curve parameters"
        ))),
    }
}
