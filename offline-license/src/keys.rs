//! Signature algorithms and key loading.
//!
//! Public keys are read as DER-encoded X.509 SubjectPublicKeyInfo and
//! private keys as unencrypted DER PKCS#8. With OpenSSL:
//!
//! ```text
//! $ openssl genrsa -out license-private.pem 2048
//! $ openssl rsa -in license-private.pem -pubout -outform der -out license-public.key
//! $ openssl pkcs8 -topk8 -inform pem -outform der -in license-private.pem \
//!       -out license-private.key -nocrypt
//! ```
//!
//! Loading failures are configuration errors: they mean the deployment is
//! broken, not that a particular license is bad.

use crate::error::{LicenseError, LicenseResult};
use rsa::pkcs1v15;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::Sha256;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Supported signature algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureAlgorithm {
    /// RSASSA-PKCS1-v1_5 over SHA-1.
    #[default]
    RsaSha1,
    /// RSASSA-PKCS1-v1_5 over SHA-256.
    RsaSha256,
    /// Ed25519.
    Ed25519,
}

impl SignatureAlgorithm {
    /// Returns the configuration name of the algorithm.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RsaSha1 => "rsa-sha1",
            Self::RsaSha256 => "rsa-sha256",
            Self::Ed25519 => "ed25519",
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = LicenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rsa-sha1" => Ok(Self::RsaSha1),
            "rsa-sha256" => Ok(Self::RsaSha256),
            "ed25519" => Ok(Self::Ed25519),
            other => Err(LicenseError::Configuration(format!(
                "unsupported signature algorithm: {other}"
            ))),
        }
    }
}

/// Checks signatures with a public key.
pub trait SignatureVerifier: Send + Sync {
    /// Returns the algorithm this key verifies.
    fn algorithm(&self) -> SignatureAlgorithm;

    /// Returns true if `signature` is valid for `message`.
    ///
    /// Malformed signature bytes are reported as `false`.
    fn verify_bytes(&self, message: &[u8], signature: &[u8]) -> bool;
}

/// Produces signatures with a private key.
pub trait SignatureSigner: Send + Sync {
    /// Returns the algorithm this key signs with.
    fn algorithm(&self) -> SignatureAlgorithm;

    /// Signs `message`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Signing`] if the private key operation fails.
    fn sign_bytes(&self, message: &[u8]) -> LicenseResult<Vec<u8>>;
}

enum RsaVerifyingKey {
    Sha1(pkcs1v15::VerifyingKey<Sha1>),
    Sha256(pkcs1v15::VerifyingKey<Sha256>),
}

/// RSA PKCS#1 v1.5 public key.
pub struct RsaVerifier {
    key: RsaVerifyingKey,
}

impl RsaVerifier {
    /// Wraps a parsed RSA public key for the given RSA algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Configuration`] if `algorithm` is not an RSA
    /// algorithm.
    pub fn new(key: RsaPublicKey, algorithm: SignatureAlgorithm) -> LicenseResult<Self> {
        let key = match algorithm {
            SignatureAlgorithm::RsaSha1 => RsaVerifyingKey::Sha1(pkcs1v15::VerifyingKey::new(key)),
            SignatureAlgorithm::RsaSha256 => {
                RsaVerifyingKey::Sha256(pkcs1v15::VerifyingKey::new(key))
            }
            SignatureAlgorithm::Ed25519 => return Err(not_rsa(algorithm)),
        };
        Ok(Self { key })
    }

    /// Parses a DER X.509 SubjectPublicKeyInfo.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Configuration`] if the DER is not an RSA
    /// public key or `algorithm` is not an RSA algorithm.
    pub fn from_public_key_der(der: &[u8], algorithm: SignatureAlgorithm) -> LicenseResult<Self> {
        let key = RsaPublicKey::from_public_key_der(der)
            .map_err(|e| LicenseError::Configuration(format!("invalid RSA public key: {e}")))?;
        Self::new(key, algorithm)
    }
}

impl SignatureVerifier for RsaVerifier {
    fn algorithm(&self) -> SignatureAlgorithm {
        match self.key {
            RsaVerifyingKey::Sha1(_) => SignatureAlgorithm::RsaSha1,
            RsaVerifyingKey::Sha256(_) => SignatureAlgorithm::RsaSha256,
        }
    }

    fn verify_bytes(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(signature) = pkcs1v15::Signature::try_from(signature) else {
            return false;
        };
        match &self.key {
            RsaVerifyingKey::Sha1(key) => key.verify(message, &signature).is_ok(),
            RsaVerifyingKey::Sha256(key) => key.verify(message, &signature).is_ok(),
        }
    }
}

impl fmt::Debug for RsaVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaVerifier")
            .field("algorithm", &self.algorithm())
            .finish_non_exhaustive()
    }
}

enum RsaSigningKey {
    Sha1(pkcs1v15::SigningKey<Sha1>),
    Sha256(pkcs1v15::SigningKey<Sha256>),
}

/// RSA PKCS#1 v1.5 private key.
pub struct RsaSigner {
    key: RsaSigningKey,
}

impl RsaSigner {
    /// Wraps a parsed RSA private key for the given RSA algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Configuration`] if `algorithm` is not an RSA
    /// algorithm.
    pub fn new(key: RsaPrivateKey, algorithm: SignatureAlgorithm) -> LicenseResult<Self> {
        let key = match algorithm {
            SignatureAlgorithm::RsaSha1 => RsaSigningKey::Sha1(pkcs1v15::SigningKey::new(key)),
            SignatureAlgorithm::RsaSha256 => RsaSigningKey::Sha256(pkcs1v15::SigningKey::new(key)),
            SignatureAlgorithm::Ed25519 => return Err(not_rsa(algorithm)),
        };
        Ok(Self { key })
    }

    /// Parses an unencrypted DER PKCS#8 private key.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Configuration`] if the DER is not an RSA
    /// private key or `algorithm` is not an RSA algorithm.
    pub fn from_pkcs8_der(der: &[u8], algorithm: SignatureAlgorithm) -> LicenseResult<Self> {
        let key = RsaPrivateKey::from_pkcs8_der(der)
            .map_err(|e| LicenseError::Configuration(format!("invalid RSA private key: {e}")))?;
        Self::new(key, algorithm)
    }
}

impl SignatureSigner for RsaSigner {
    fn algorithm(&self) -> SignatureAlgorithm {
        match self.key {
            RsaSigningKey::Sha1(_) => SignatureAlgorithm::RsaSha1,
            RsaSigningKey::Sha256(_) => SignatureAlgorithm::RsaSha256,
        }
    }

    fn sign_bytes(&self, message: &[u8]) -> LicenseResult<Vec<u8>> {
        let signature = match &self.key {
            RsaSigningKey::Sha1(key) => key.try_sign(message),
            RsaSigningKey::Sha256(key) => key.try_sign(message),
        }
        .map_err(|e| LicenseError::Signing(e.to_string()))?;
        Ok(Vec::from(signature.to_bytes()))
    }
}

impl fmt::Debug for RsaSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaSigner")
            .field("algorithm", &self.algorithm())
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Ed25519 public key.
#[derive(Debug, Clone)]
pub struct Ed25519Verifier {
    key: ed25519_dalek::VerifyingKey,
}

impl Ed25519Verifier {
    /// Wraps a parsed Ed25519 public key.
    #[must_use]
    pub fn new(key: ed25519_dalek::VerifyingKey) -> Self {
        Self { key }
    }

    /// Parses a raw 32-byte Ed25519 public key.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Configuration`] if the bytes are not a valid
    /// curve point.
    pub fn from_bytes(bytes: &[u8; 32]) -> LicenseResult<Self> {
        ed25519_dalek::VerifyingKey::from_bytes(bytes)
            .map(Self::new)
            .map_err(|e| LicenseError::Configuration(format!("invalid Ed25519 public key: {e}")))
    }

    /// Parses a DER X.509 SubjectPublicKeyInfo.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Configuration`] if the DER is not an Ed25519
    /// public key.
    pub fn from_public_key_der(der: &[u8]) -> LicenseResult<Self> {
        ed25519_dalek::VerifyingKey::from_public_key_der(der)
            .map(Self::new)
            .map_err(|e| LicenseError::Configuration(format!("invalid Ed25519 public key: {e}")))
    }
}

impl SignatureVerifier for Ed25519Verifier {
    fn algorithm(&self) -> SignatureAlgorithm {
        SignatureAlgorithm::Ed25519
    }

    fn verify_bytes(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(signature) = ed25519_dalek::Signature::from_slice(signature) else {
            return false;
        };
        self.key.verify(message, &signature).is_ok()
    }
}

/// Ed25519 private key.
pub struct Ed25519Signer {
    key: ed25519_dalek::SigningKey,
}

impl Ed25519Signer {
    /// Wraps an Ed25519 signing key.
    #[must_use]
    pub fn new(key: ed25519_dalek::SigningKey) -> Self {
        Self { key }
    }

    /// Creates a signer from a raw 32-byte seed.
    #[must_use]
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self::new(ed25519_dalek::SigningKey::from_bytes(seed))
    }

    /// Parses an unencrypted DER PKCS#8 private key.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Configuration`] if the DER is not an Ed25519
    /// private key.
    pub fn from_pkcs8_der(der: &[u8]) -> LicenseResult<Self> {
        ed25519_dalek::SigningKey::from_pkcs8_der(der)
            .map(Self::new)
            .map_err(|e| LicenseError::Configuration(format!("invalid Ed25519 private key: {e}")))
    }

    /// Returns the matching public key.
    #[must_use]
    pub fn verifier(&self) -> Ed25519Verifier {
        Ed25519Verifier::new(self.key.verifying_key())
    }
}

impl SignatureSigner for Ed25519Signer {
    fn algorithm(&self) -> SignatureAlgorithm {
        SignatureAlgorithm::Ed25519
    }

    fn sign_bytes(&self, message: &[u8]) -> LicenseResult<Vec<u8>> {
        Ok(self.key.sign(message).to_bytes().to_vec())
    }
}

impl fmt::Debug for Ed25519Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519Signer")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Parses a DER public key for `algorithm`.
///
/// # Errors
///
/// Returns [`LicenseError::Configuration`] if the key does not parse.
pub fn load_verifier(
    algorithm: SignatureAlgorithm,
    der: &[u8],
) -> LicenseResult<Box<dyn SignatureVerifier>> {
    Ok(match algorithm {
        SignatureAlgorithm::RsaSha1 | SignatureAlgorithm::RsaSha256 => {
            Box::new(RsaVerifier::from_public_key_der(der, algorithm)?)
        }
        SignatureAlgorithm::Ed25519 => Box::new(Ed25519Verifier::from_public_key_der(der)?),
    })
}

/// Parses a DER PKCS#8 private key for `algorithm`.
///
/// # Errors
///
/// Returns [`LicenseError::Configuration`] if the key does not parse.
pub fn load_signer(
    algorithm: SignatureAlgorithm,
    der: &[u8],
) -> LicenseResult<Box<dyn SignatureSigner>> {
    Ok(match algorithm {
        SignatureAlgorithm::RsaSha1 | SignatureAlgorithm::RsaSha256 => {
            Box::new(RsaSigner::from_pkcs8_der(der, algorithm)?)
        }
        SignatureAlgorithm::Ed25519 => Box::new(Ed25519Signer::from_pkcs8_der(der)?),
    })
}

/// Reads and parses a DER public key file.
///
/// # Errors
///
/// Returns [`LicenseError::Configuration`] if the file cannot be read or
/// the key does not parse.
pub fn read_verifier(
    algorithm: SignatureAlgorithm,
    path: &Path,
) -> LicenseResult<Box<dyn SignatureVerifier>> {
    let der = read_key_file(path)?;
    let verifier = load_verifier(algorithm, &der)?;
    info!("Loaded {algorithm} public key from {:?}", path);
    Ok(verifier)
}

/// Reads and parses a DER PKCS#8 private key file.
///
/// # Errors
///
/// Returns [`LicenseError::Configuration`] if the file cannot be read or
/// the key does not parse.
pub fn read_signer(
    algorithm: SignatureAlgorithm,
    path: &Path,
) -> LicenseResult<Box<dyn SignatureSigner>> {
    let der = read_key_file(path)?;
    let signer = load_signer(algorithm, &der)?;
    info!("Loaded {algorithm} private key from {:?}", path);
    Ok(signer)
}

fn read_key_file(path: &Path) -> LicenseResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        LicenseError::Configuration(format!("cannot read key file {}: {e}", path.display()))
    })
}

fn not_rsa(algorithm: SignatureAlgorithm) -> LicenseError {
    LicenseError::Configuration(format!("{algorithm} is not an RSA algorithm"))
}
