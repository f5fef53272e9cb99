//! License issuance with a caller-held private key.

use crate::armor;
use crate::details::serialize_details;
use crate::error::LicenseResult;
use crate::keys::{SignatureAlgorithm, SignatureSigner};
use crate::record::{LicenseRecord, SignedLicenseRecord};
use std::fmt;
use tracing::info;

/// Signs license records.
pub struct LicenseIssuer {
    private_key: Box<dyn SignatureSigner>,
}

impl LicenseIssuer {
    /// Creates an issuer for a private key.
    pub fn new(private_key: impl SignatureSigner + 'static) -> Self {
        Self::from_boxed(Box::new(private_key))
    }

    /// Creates an issuer from an already boxed key, e.g. from
    /// [`crate::keys::load_signer`].
    #[must_use]
    pub fn from_boxed(private_key: Box<dyn SignatureSigner>) -> Self {
        Self { private_key }
    }

    /// Returns the signing algorithm.
    #[must_use]
    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.private_key.algorithm()
    }

    /// Signs the canonical detail bytes of `record`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LicenseError::Signing`] if the key operation fails.
    pub fn sign(&self, record: LicenseRecord) -> LicenseResult<SignedLicenseRecord> {
        let signature = self.private_key.sign_bytes(&serialize_details(&record))?;
        info!(
            "Issued license {} for {:?} (expires {})",
            record.identifier(),
            record.licensed_name(),
            record.expiry_date()
        );
        Ok(record.with_signature(signature))
    }

    /// Signs `record` and returns the armored license text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LicenseError::Signing`] if the key operation fails.
    pub fn issue(&self, record: LicenseRecord) -> LicenseResult<String> {
        self.sign(record).map(|license| armor::serialize(&license))
    }
}

impl fmt::Debug for LicenseIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LicenseIssuer")
            .field("algorithm", &self.algorithm())
            .finish_non_exhaustive()
    }
}
