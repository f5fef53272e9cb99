//! ASCII-armored license key text.
//!
//! A license key is a binary blob
//!
//! ```text
//! [version: u8 = 0][detail_len: u16 BE][detail bytes][signature bytes]
//! ```
//!
//! encoded as base64 (76-column lines) between delimiter lines:
//!
//! ```text
//! ----BEGIN COMMERCIAL LICENSE KEY 01-23-4567----
//! AAAhMDEtMjMtNDU2NwBBIFRlc3QgTGljZW5zZWUAD7wBD77MAQIDBAUGBw==
//! ----END COMMERCIAL LICENSE KEY 01-23-4567----
//! ```
//!
//! Parsing is forgiving about the text (indentation, rewrapped lines,
//! CRLF, missing final newline) and strict about the decoded bytes.

use crate::details::{deserialize_details, serialize_details};
use crate::error::{MalformedLicense, ParseResult};
use crate::record::SignedLicenseRecord;
use crate::wire::Reader;
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use tracing::debug;

/// The only defined wire version.
pub const WIRE_VERSION: u8 = 0;

/// Maximum base64 characters per armored line.
pub const LINE_WIDTH: usize = 76;

const DELIMITER: &str = "----";
const HEADER_LABEL: &str = "BEGIN COMMERCIAL LICENSE KEY";
const FOOTER_LABEL: &str = "END COMMERCIAL LICENSE KEY";

/// Standard alphabet, padded on output, padding optional on input.
const ARMOR_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encodes a signed record as armored text.
#[must_use]
pub fn serialize(license: &SignedLicenseRecord) -> String {
    let body = ARMOR_BASE64.encode(to_wire(license));
    let identifier = license.identifier();

    let mut lines = String::with_capacity(body.len() + body.len() / LINE_WIDTH + 1);
    let mut rest = body.as_str();
    while !rest.is_empty() {
        let (line, tail) = rest.split_at(rest.len().min(LINE_WIDTH));
        lines.push_str(line);
        lines.push('\n');
        rest = tail;
    }

    format!(
        "{DELIMITER}{HEADER_LABEL} {identifier}{DELIMITER}\n\
         {lines}\
         {DELIMITER}{FOOTER_LABEL} {identifier}{DELIMITER}\n"
    )
}

/// Decodes armored text produced by [`serialize`].
///
/// # Errors
///
/// Returns [`MalformedLicense`] for any failure: bad base64, unknown
/// version, truncated blob, missing signature or malformed details.
pub fn deserialize(text: &str) -> ParseResult<SignedLicenseRecord> {
    let body = strip_armor(text);

    let blob = ARMOR_BASE64.decode(body.as_bytes()).map_err(|e| {
        debug!("license body is not valid base64: {e}");
        MalformedLicense
    })?;

    from_wire(&blob)
}

/// Builds the binary blob for a signed record.
fn to_wire(license: &SignedLicenseRecord) -> Vec<u8> {
    let details = serialize_details(license.record());
    let signature = license.signature();
    // Record construction caps the details at u16::MAX bytes.
    let detail_len = details.len() as u16;

    let mut blob = Vec::with_capacity(1 + 2 + details.len() + signature.len());
    blob.push(WIRE_VERSION);
    blob.extend_from_slice(&detail_len.to_be_bytes());
    blob.extend_from_slice(&details);
    blob.extend_from_slice(signature);
    blob
}

/// Parses the binary blob.
fn from_wire(blob: &[u8]) -> ParseResult<SignedLicenseRecord> {
    let mut reader = Reader::new(blob);

    let version = reader.u8()?;
    if version != WIRE_VERSION {
        debug!("unsupported license wire version {version}");
        return Err(MalformedLicense);
    }

    let detail_len = usize::from(reader.u16_be()?);
    if reader.remaining() <= detail_len {
        debug!("license blob has no room for a signature");
        return Err(MalformedLicense);
    }

    let details = reader.take(detail_len)?;
    let signature = reader.rest();

    let record = deserialize_details(details).inspect_err(|_| {
        debug!("license details are malformed");
    })?;
    Ok(SignedLicenseRecord::new(record, signature.to_vec()))
}

/// Removes delimiter lines and all whitespace, leaving the base64 body.
///
/// Both `\n` and `\r` end a line, so a delimiter never spans lines.
fn strip_armor(text: &str) -> String {
    text.split(['\n', '\r'])
        .map(strip_delimiter)
        .flat_map(|(head, tail)| head.chars().chain(tail.chars()))
        .filter(|c| !c.is_ascii_whitespace())
        .collect()
}

/// Cuts the `----...----` span out of a line, returning what surrounds it.
fn strip_delimiter(line: &str) -> (&str, &str) {
    let span = line.find(DELIMITER).and_then(|start| {
        let end = line.rfind(DELIMITER)?;
        (end >= start + DELIMITER.len()).then_some((start, end + DELIMITER.len()))
    });

    match span {
        Some((start, end)) => (&line[..start], &line[end..]),
        None => (line, ""),
    }
}
