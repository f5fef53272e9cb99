//! Shared test helpers for license tests.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use offline_license::keys::{Ed25519Signer, RsaSigner, RsaVerifier};
use offline_license::{LicenseRecord, SignatureAlgorithm, SignedLicenseRecord};

/// DER X.509 public half of the test RSA key pair.
pub const RSA_PUBLIC_KEY_DER: &[u8] = include_bytes!("../fixtures/license-public-test.key");

/// DER PKCS#8 private half of the test RSA key pair.
pub const RSA_PRIVATE_KEY_DER: &[u8] = include_bytes!("../fixtures/license-private-test.key");

/// DER X.509 Ed25519 public key.
pub const ED25519_PUBLIC_KEY_DER: &[u8] = include_bytes!("../fixtures/ed25519-public-test.key");

/// DER PKCS#8 Ed25519 private key matching [`ED25519_PUBLIC_KEY_DER`].
pub const ED25519_PRIVATE_KEY_DER: &[u8] = include_bytes!("../fixtures/ed25519-private-test.key");

/// Golden license signed with the test RSA key (SHA-1).
pub const VALID_RSA_SHA1_LICENSE: &str = include_str!("../fixtures/valid-sha1.license");

/// The same license signed with SHA-256.
pub const VALID_RSA_SHA256_LICENSE: &str = include_str!("../fixtures/valid-sha256.license");

/// Armored form of [`golden_license`].
pub const GOLDEN_TEXT: &str = "----BEGIN COMMERCIAL LICENSE KEY 01-23-4567----\n\
AAAhMDEtMjMtNDU2NwBBIFRlc3QgTGljZW5zZWUAD7wBD77MAQIDBAUGBw==\n\
----END COMMERCIAL LICENSE KEY 01-23-4567----\n";

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec).unwrap()
}

/// The record used by every fixed vector.
pub fn golden_record() -> LicenseRecord {
    LicenseRecord::new(
        "01-23-4567",
        "A Test Licensee",
        date(2014, 1, 1),
        date(2015, 7, 23),
    )
    .unwrap()
}

/// The golden record with signature bytes `1..=7`.
pub fn golden_license() -> SignedLicenseRecord {
    golden_record().with_signature(vec![1, 2, 3, 4, 5, 6, 7])
}

pub fn rsa_verifier(algorithm: SignatureAlgorithm) -> RsaVerifier {
    RsaVerifier::from_public_key_der(RSA_PUBLIC_KEY_DER, algorithm).unwrap()
}

pub fn rsa_signer(algorithm: SignatureAlgorithm) -> RsaSigner {
    RsaSigner::from_pkcs8_der(RSA_PRIVATE_KEY_DER, algorithm).unwrap()
}

/// Returns a deterministic Ed25519 signer from a fixed seed.
pub fn ed25519_signer() -> Ed25519Signer {
    let seed: [u8; 32] = [
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24,
        25, 26, 27, 28, 29, 30, 31, 32,
    ];
    Ed25519Signer::from_seed(&seed)
}
