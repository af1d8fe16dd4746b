#![allow(dead_code)]

use std::path::{Path, PathBuf};

use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::ec::{EcGroup, EcKey};
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::{Id, PKey, Private};
use openssl::rsa::Rsa;
use openssl::x509::{X509, X509Name, X509NameBuilder, X509Req, X509ReqBuilder};

/// Pin of the RSA key behind `primary.key`, `primary.crt`, `primary.csr` and `legacy.u`.
pub const PRIMARY_PIN: &str = "VunZCPecHMwbTdd61xzX/FPo+Rj8o78+6mZhu7VTSKU=";
/// Pin of the P-256 key behind `backup.key` and `backup.csr`.
pub const BACKUP_PIN: &str = "vifEU6KuWX5lyyA2ptDlKqikx908DkSHwE/ZG+j3WHg=";
pub const ED25519_PIN: &str = "XM0T/UVx4i5P8pKl9HbKh6Kppix0wWNZgESg7YgQU5s=";
pub const P384_PIN: &str = "+OAgyfdy9FPokdYSV+XxS19lAfXU8EboV+UbAxVXNiQ=";
pub const P521_PIN: &str = "/gE2GmMU9CYqrlRhn7zayQMlzjJS3BCL+SKPySbG1RI=";

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn rsa_key() -> PKey<Private> {
    PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap()
}

pub fn ec_key(curve: Nid) -> PKey<Private> {
    let group = EcGroup::from_curve_name(curve).unwrap();
    PKey::from_ec_key(EcKey::generate(&group).unwrap()).unwrap()
}

pub fn ed25519_key() -> PKey<Private> {
    PKey::generate_ed25519().unwrap()
}

/// The pin OpenSSL itself computes for a key.
pub fn openssl_pin(key: &PKey<Private>) -> String {
    let spki = key.public_key_to_der().unwrap();
    openssl::base64::encode_block(&openssl::sha::sha256(&spki))
}

fn digest_for(key: &PKey<Private>) -> MessageDigest {
    // EdDSA signs the message directly.
    if key.id() == Id::ED25519 {
        MessageDigest::null()
    } else {
        MessageDigest::sha256()
    }
}

fn subject() -> X509Name {
    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_text("CN", "www.example.com").unwrap();
    name.build()
}

pub fn self_signed_cert(key: &PKey<Private>) -> X509 {
    let mut builder = X509::builder().unwrap();
    builder.set_version(2).unwrap();
    let serial = BigNum::from_u32(1).unwrap().to_asn1_integer().unwrap();
    builder.set_serial_number(&serial).unwrap();
    let name = subject();
    builder.set_subject_name(&name).unwrap();
    builder.set_issuer_name(&name).unwrap();
    builder.set_pubkey(key).unwrap();
    builder
        .set_not_before(&Asn1Time::days_from_now(0).unwrap())
        .unwrap();
    builder
        .set_not_after(&Asn1Time::days_from_now(365).unwrap())
        .unwrap();
    builder.sign(key, digest_for(key)).unwrap();
    builder.build()
}

pub fn signing_request(key: &PKey<Private>) -> X509Req {
    let mut builder = X509ReqBuilder::new().unwrap();
    builder.set_subject_name(&subject()).unwrap();
    builder.set_pubkey(key).unwrap();
    builder.sign(key, digest_for(key)).unwrap();
    builder.build()
}

/// Writes `contents` to `name` inside `dir` and returns the path.
pub fn write(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
