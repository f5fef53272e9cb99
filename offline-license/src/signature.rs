//! Signature checks over the canonical detail bytes.
//!
//! The signed message is [`serialize_details`] of the record, so a
//! signature stays valid however the armored text is reformatted.

use crate::details::serialize_details;
use crate::error::{LicenseError, LicenseResult};
use crate::keys::SignatureVerifier;
use crate::record::SignedLicenseRecord;
use tracing::warn;

/// Returns true if the record's signature verifies under `public_key`.
#[must_use]
pub fn is_valid(license: &SignedLicenseRecord, public_key: &dyn SignatureVerifier) -> bool {
    let message = serialize_details(license.record());
    public_key.verify_bytes(&message, license.signature())
}

/// Fails with [`LicenseError::InvalidSignature`] unless the record's
/// signature verifies under `public_key`.
///
/// # Errors
///
/// Returns [`LicenseError::InvalidSignature`] on any verification failure.
pub fn verify(license: &SignedLicenseRecord, public_key: &dyn SignatureVerifier) -> LicenseResult<()> {
    if is_valid(license, public_key) {
        return Ok(());
    }

    warn!(
        "Rejected {} signature on license {}",
        public_key.algorithm(),
        license.identifier()
    );
    Err(LicenseError::InvalidSignature)
}
