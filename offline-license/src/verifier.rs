//! License verification bound to a public key and a clock.

use crate::armor;
use crate::clock::{Clock, SystemClock};
use crate::error::LicenseResult;
use crate::expiry;
use crate::keys::{SignatureAlgorithm, SignatureVerifier};
use crate::record::{LicenseRecord, SignedLicenseRecord};
use crate::signature;
use std::fmt;
use std::sync::Arc;

/// Verifies licenses against one public key.
///
/// Holds only immutable state and can be shared across threads.
#[derive(Clone)]
pub struct LicenseVerifier {
    public_key: Arc<dyn SignatureVerifier>,
    clock: Arc<dyn Clock>,
}

impl LicenseVerifier {
    /// Creates a verifier that reads the system clock.
    pub fn new(public_key: impl SignatureVerifier + 'static) -> Self {
        Self::with_clock(public_key, SystemClock)
    }

    /// Creates a verifier with an explicit clock.
    pub fn with_clock(
        public_key: impl SignatureVerifier + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        Self {
            public_key: Arc::new(public_key),
            clock: Arc::new(clock),
        }
    }

    /// Creates a verifier from an already boxed key, e.g. from
    /// [`crate::keys::load_verifier`].
    pub fn from_boxed(public_key: Box<dyn SignatureVerifier>, clock: Arc<dyn Clock>) -> Self {
        Self {
            public_key: Arc::from(public_key),
            clock,
        }
    }

    /// Returns the algorithm of the configured public key.
    #[must_use]
    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.public_key.algorithm()
    }

    /// Returns true if the signature is valid.
    #[must_use]
    pub fn is_signature_valid(&self, license: &SignedLicenseRecord) -> bool {
        signature::is_valid(license, &*self.public_key)
    }

    /// Fails unless the signature is valid.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LicenseError::InvalidSignature`].
    pub fn verify_signature(&self, license: &SignedLicenseRecord) -> LicenseResult<()> {
        signature::verify(license, &*self.public_key)
    }

    /// Returns true if the license has expired according to the clock.
    #[must_use]
    pub fn has_expired(&self, license: &impl AsRef<LicenseRecord>) -> bool {
        expiry::is_expired(license.as_ref(), self.clock.now())
    }

    /// Fails if the license has expired according to the clock.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LicenseError::Expired`].
    pub fn verify_expiry(&self, license: &impl AsRef<LicenseRecord>) -> LicenseResult<()> {
        expiry::verify_expiry(license.as_ref(), self.clock.now())
    }

    /// Checks the signature, then the expiry date.
    ///
    /// # Errors
    ///
    /// Returns the first failing check.
    pub fn verify(&self, license: &SignedLicenseRecord) -> LicenseResult<()> {
        self.verify_signature(license)?;
        self.verify_expiry(license)
    }

    /// Parses armored license text and fully verifies it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LicenseError::Malformed`] if the text does not parse,
    /// otherwise the first failing check.
    pub fn verify_text(&self, text: &str) -> LicenseResult<SignedLicenseRecord> {
        let license = armor::deserialize(text)?;
        self.verify(&license)?;
        Ok(license)
    }
}

impl fmt::Debug for LicenseVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LicenseVerifier")
            .field("algorithm", &self.algorithm())
            .finish_non_exhaustive()
    }
}
