//! License records, unsigned and signed.

use crate::details::DETAIL_OVERHEAD;
use crate::error::{LicenseError, LicenseResult};
use chrono::NaiveDate;
use serde::Serialize;

/// The signed fields of a license key.
///
/// Dates are calendar dates in the UTC reference timezone; no time of day
/// is carried. Constructed records always fit the wire format: neither
/// string contains a NUL byte and the canonical detail bytes fit in a
/// 16-bit length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LicenseRecord {
    identifier: String,
    licensed_name: String,
    issue_date: NaiveDate,
    expiry_date: NaiveDate,
}

impl LicenseRecord {
    /// Creates a record, rejecting fields the wire format cannot carry.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidRecord`] if either string contains a
    /// NUL byte or the encoded details would exceed 65535 bytes.
    pub fn new(
        identifier: impl Into<String>,
        licensed_name: impl Into<String>,
        issue_date: NaiveDate,
        expiry_date: NaiveDate,
    ) -> LicenseResult<Self> {
        let identifier = identifier.into();
        let licensed_name = licensed_name.into();

        if identifier.contains('\0') {
            return Err(LicenseError::InvalidRecord(
                "identifier contains a NUL byte".to_string(),
            ));
        }
        if licensed_name.contains('\0') {
            return Err(LicenseError::InvalidRecord(
                "licensed name contains a NUL byte".to_string(),
            ));
        }

        let detail_len = identifier.len() + licensed_name.len() + DETAIL_OVERHEAD;
        if detail_len > usize::from(u16::MAX) {
            return Err(LicenseError::InvalidRecord(format!(
                "encoded details are {detail_len} bytes, limit is {}",
                u16::MAX
            )));
        }

        Ok(Self::from_parts(identifier, licensed_name, issue_date, expiry_date))
    }

    /// Builds a record from fields already known to satisfy the invariants.
    pub(crate) fn from_parts(
        identifier: String,
        licensed_name: String,
        issue_date: NaiveDate,
        expiry_date: NaiveDate,
    ) -> Self {
        Self {
            identifier,
            licensed_name,
            issue_date,
            expiry_date,
        }
    }

    /// Returns the license identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the name of the licensee.
    #[must_use]
    pub fn licensed_name(&self) -> &str {
        &self.licensed_name
    }

    /// Returns the issue date.
    #[must_use]
    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    /// Returns the last day the license is valid.
    #[must_use]
    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    /// Attaches a signature, producing a signed record.
    #[must_use]
    pub fn with_signature(self, signature: Vec<u8>) -> SignedLicenseRecord {
        SignedLicenseRecord::new(self, signature)
    }
}

/// A license record together with its signature bytes.
///
/// The signature is opaque to the codecs; its format depends on the
/// signing algorithm. Equality compares every field, signature included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignedLicenseRecord {
    record: LicenseRecord,
    signature: Vec<u8>,
}

impl SignedLicenseRecord {
    /// Creates a signed record.
    #[must_use]
    pub fn new(record: LicenseRecord, signature: Vec<u8>) -> Self {
        Self { record, signature }
    }

    /// Returns the signed fields.
    #[must_use]
    pub fn record(&self) -> &LicenseRecord {
        &self.record
    }

    /// Returns the signature bytes.
    #[must_use]
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Returns the license identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        self.record.identifier()
    }

    /// Returns the name of the licensee.
    #[must_use]
    pub fn licensed_name(&self) -> &str {
        self.record.licensed_name()
    }

    /// Returns the issue date.
    #[must_use]
    pub fn issue_date(&self) -> NaiveDate {
        self.record.issue_date()
    }

    /// Returns the last day the license is valid.
    #[must_use]
    pub fn expiry_date(&self) -> NaiveDate {
        self.record.expiry_date()
    }

    /// Splits into the record and the signature bytes.
    #[must_use]
    pub fn into_parts(self) -> (LicenseRecord, Vec<u8>) {
        (self.record, self.signature)
    }
}

impl AsRef<LicenseRecord> for LicenseRecord {
    fn as_ref(&self) -> &LicenseRecord {
        self
    }
}

impl AsRef<LicenseRecord> for SignedLicenseRecord {
    fn as_ref(&self) -> &LicenseRecord {
        &self.record
    }
}
