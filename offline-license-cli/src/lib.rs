//! Commands behind the `license-tool` binary.
//!
//! Each command takes already-read input and returns the text to print, so
//! the binary only deals with arguments, files and logging.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use offline_license::{
    armor, keys, LicenseIssuer, LicenseRecord, LicenseVerifier, SignatureAlgorithm,
    SignedLicenseRecord, VerifierConfig,
};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Date format accepted on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Printable view of a decoded license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseSummary {
    pub identifier: String,
    pub licensed_name: String,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub signature_len: usize,
}

impl From<&SignedLicenseRecord> for LicenseSummary {
    fn from(license: &SignedLicenseRecord) -> Self {
        Self {
            identifier: license.identifier().to_string(),
            licensed_name: license.licensed_name().to_string(),
            issue_date: license.issue_date(),
            expiry_date: license.expiry_date(),
            signature_len: license.signature().len(),
        }
    }
}

impl LicenseSummary {
    /// Renders the summary as aligned text or pretty JSON.
    pub fn render(&self, json: bool) -> Result<String> {
        if json {
            return serde_json::to_string_pretty(self).context("Failed to encode summary");
        }
        Ok(format!(
            "Identifier:    {}\n\
             Licensed to:   {}\n\
             Issued:        {}\n\
             Expires:       {}\n\
             Signature:     {} bytes",
            self.identifier,
            self.licensed_name,
            self.issue_date.format(DATE_FORMAT),
            self.expiry_date.format(DATE_FORMAT),
            self.signature_len,
        ))
    }
}

/// Reads license text from a file, or from stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read license from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read license file {}", path.display()))
}

/// Decodes armored text without checking the signature.
pub fn inspect(text: &str) -> Result<LicenseSummary> {
    let license = armor::deserialize(text).context("Not a valid license key")?;
    debug!("Decoded license {}", license.identifier());
    Ok(LicenseSummary::from(&license))
}

/// Builds the verifier configuration from an optional file plus overrides.
pub fn verifier_config(
    config_path: Option<&Path>,
    key_path: Option<PathBuf>,
    algorithm: Option<SignatureAlgorithm>,
) -> Result<VerifierConfig> {
    let mut config = match config_path {
        Some(path) => VerifierConfig::from_path(path)?,
        None => VerifierConfig::load()?,
    };
    if let Some(key_path) = key_path {
        config.public_key_path = key_path;
    }
    if let Some(algorithm) = algorithm {
        config.algorithm = algorithm;
    }
    Ok(config)
}

/// Checks signature and expiry.
pub fn verify(text: &str, verifier: &LicenseVerifier) -> Result<LicenseSummary> {
    let license = verifier.verify_text(text)?;
    info!("License {} is valid", license.identifier());
    Ok(LicenseSummary::from(&license))
}

/// Fields of a license to issue.
#[derive(Debug, Clone)]
pub struct IssueRequest {
    pub identifier: String,
    pub licensed_name: String,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
}

/// Signs a new license with the private key at `private_key` and returns
/// the armored text.
pub fn issue(
    private_key: &Path,
    algorithm: SignatureAlgorithm,
    request: IssueRequest,
) -> Result<String> {
    if request.expiry_date < request.issue_date {
        return Err(anyhow!(
            "expiry date {} is before issue date {}",
            request.expiry_date,
            request.issue_date
        ));
    }

    let record = LicenseRecord::new(
        request.identifier,
        request.licensed_name,
        request.issue_date,
        request.expiry_date,
    )?;
    let issuer = LicenseIssuer::from_boxed(keys::read_signer(algorithm, private_key)?);
    Ok(issuer.issue(record)?)
}

/// Parses a `YYYY-MM-DD` date argument.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .with_context(|| format!("Invalid date {value:?}, expected YYYY-MM-DD"))
}
