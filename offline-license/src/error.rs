//! Error types for license key handling.

use thiserror::Error;

/// The single parse failure produced by the license codecs.
///
/// Carries no detail on purpose: a caller probing key validity learns only
/// that the text is not a license key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("malformed license key")]
pub struct MalformedLicense;

/// Result type for the codec entry points.
pub type ParseResult<T> = Result<T, MalformedLicense>;

/// Licensing errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// License text or bytes could not be decoded.
    #[error(transparent)]
    Malformed(#[from] MalformedLicense),

    /// Signature does not verify against the configured public key.
    #[error("Signature on license key is invalid")]
    InvalidSignature,

    /// License is past its expiry boundary.
    #[error("Commercial License key ({identifier}) expired on {expiry_date}")]
    Expired {
        /// License identifier.
        identifier: String,
        /// Expiry date formatted as `yyyy-MM-dd`.
        expiry_date: String,
    },

    /// Record fields violate the wire format constraints.
    #[error("invalid license record: {0}")]
    InvalidRecord(String),

    /// Key material or configuration could not be loaded.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Private key operation failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
