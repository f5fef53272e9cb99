//! Canonical encoding of the signed license fields.
//!
//! Layout: `identifier 0x00 licensed_name 0x00 issue_date expiry_date`,
//! strings in UTF-8 and dates packed into three bytes each. These bytes
//! are the message that gets signed, so the layout is frozen: any change
//! invalidates every key already issued.

use crate::date::{decode_date, encode_date, PACKED_DATE_LEN};
use crate::error::{MalformedLicense, ParseResult};
use crate::record::LicenseRecord;
use crate::wire::Reader;

/// Bytes added to the two strings: two NUL terminators and two dates.
pub(crate) const DETAIL_OVERHEAD: usize = 2 + 2 * PACKED_DATE_LEN;

/// Encodes the signed fields of a record.
#[must_use]
pub fn serialize_details(record: &LicenseRecord) -> Vec<u8> {
    let identifier = record.identifier().as_bytes();
    let name = record.licensed_name().as_bytes();

    let mut bytes = Vec::with_capacity(identifier.len() + name.len() + DETAIL_OVERHEAD);
    bytes.extend_from_slice(identifier);
    bytes.push(0);
    bytes.extend_from_slice(name);
    bytes.push(0);
    bytes.extend_from_slice(&encode_date(record.issue_date()));
    bytes.extend_from_slice(&encode_date(record.expiry_date()));
    bytes
}

/// Decodes bytes produced by [`serialize_details`].
///
/// Bytes after the expiry date are ignored.
///
/// # Errors
///
/// Returns [`MalformedLicense`] if a string is unterminated or not UTF-8,
/// if fewer than six bytes remain for the dates, or if the strings are too
/// long to re-encode.
pub fn deserialize_details(bytes: &[u8]) -> ParseResult<LicenseRecord> {
    let mut reader = Reader::new(bytes);

    let identifier = utf8(reader.until_nul()?)?;
    let licensed_name = utf8(reader.until_nul()?)?;
    let issue_date = decode_date(reader.take_array()?)?;
    let expiry_date = decode_date(reader.take_array()?)?;

    if identifier.len() + licensed_name.len() + DETAIL_OVERHEAD > usize::from(u16::MAX) {
        return Err(MalformedLicense);
    }

    Ok(LicenseRecord::from_parts(
        identifier,
        licensed_name,
        issue_date,
        expiry_date,
    ))
}

fn utf8(bytes: &[u8]) -> ParseResult<String> {
    String::from_utf8(bytes.to_vec()).map_err(|_| MalformedLicense)
}
