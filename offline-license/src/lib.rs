//! Offline commercial license keys.
//!
//! A license key is a small signed record (identifier, licensee name,
//! issue and expiry dates) that can be checked without network access.
//!
//! This crate handles:
//! - The binary wire format and its ASCII armor
//! - Signature verification over the canonical record bytes
//! - Expiry checks that hold in every timezone
//! - Issuing keys with an externally generated private key
//!
//! # License Key Format
//!
//! ```text
//! ----BEGIN COMMERCIAL LICENSE KEY {identifier}----
//! base64([0x00][detail_len: u16 BE][details][signature])
//! ----END COMMERCIAL LICENSE KEY {identifier}----
//! ```
//!
//! where `details` is `identifier 0x00 name 0x00 issue_date expiry_date`
//! and each date is packed into three bytes as `(year << 9) | day_of_year`.
//!
//! # Example
//!
//! ```no_run
//! use offline_license::{keys, LicenseVerifier, SignatureAlgorithm};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let der = std::fs::read("license-public.key")?;
//! let public_key = keys::RsaVerifier::from_public_key_der(&der, SignatureAlgorithm::RsaSha1)?;
//! let verifier = LicenseVerifier::new(public_key);
//!
//! let text = std::fs::read_to_string("customer.license")?;
//! let license = verifier.verify_text(&text)?;
//! println!("licensed to {}", license.licensed_name());
//! # Ok(())
//! # }
//! ```

pub mod armor;
pub mod clock;
pub mod config;
pub mod date;
pub mod details;
mod error;
pub mod expiry;
pub mod issuer;
pub mod keys;
mod record;
pub mod signature;
pub mod verifier;
mod wire;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::VerifierConfig;
pub use error::{LicenseError, LicenseResult, MalformedLicense, ParseResult};
pub use issuer::LicenseIssuer;
pub use keys::{SignatureAlgorithm, SignatureSigner, SignatureVerifier};
pub use record::{LicenseRecord, SignedLicenseRecord};
pub use verifier::LicenseVerifier;
