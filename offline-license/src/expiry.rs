//! Expiry checks.
//!
//! A license valid through day D stays valid until D has ended in every
//! timezone on Earth. The last place to finish a calendar day is UTC-12,
//! so the boundary is midnight at the end of D in UTC-12, which is noon
//! UTC on the following day.
//!
//! Older verifiers placed the boundary at the start of D in UTC-12 (noon
//! UTC on D). Keys therefore stay valid here for one more day than they
//! did there.

use crate::error::{LicenseError, LicenseResult};
use crate::record::LicenseRecord;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use tracing::warn;

/// UTC offset, in seconds, of the timezone whose day ends last (UTC-12).
pub const LAST_TIMEZONE_OFFSET_SECS: i32 = -12 * 60 * 60;

/// Format of expiry dates in messages.
pub const EXPIRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns the first moment at which a license expiring on `expiry_date`
/// is expired, or `None` when the boundary lies outside the calendar range.
#[must_use]
pub fn expiry_boundary(expiry_date: NaiveDate) -> Option<DateTime<Utc>> {
    let last_timezone = FixedOffset::east_opt(LAST_TIMEZONE_OFFSET_SECS)?;
    let end_of_day = expiry_date.succ_opt()?.and_hms_opt(0, 0, 0)?;
    last_timezone
        .from_local_datetime(&end_of_day)
        .single()
        .map(|boundary| boundary.with_timezone(&Utc))
}

/// Returns true if the license has expired at `now`.
#[must_use]
pub fn is_expired(record: &LicenseRecord, now: DateTime<Utc>) -> bool {
    expiry_boundary(record.expiry_date()).is_some_and(|boundary| now > boundary)
}

/// Fails with [`LicenseError::Expired`] if the license has expired at `now`.
///
/// # Errors
///
/// Returns [`LicenseError::Expired`] naming the identifier and expiry date.
pub fn verify_expiry(record: &LicenseRecord, now: DateTime<Utc>) -> LicenseResult<()> {
    if !is_expired(record, now) {
        return Ok(());
    }

    let expiry_date = record.expiry_date().format(EXPIRY_DATE_FORMAT).to_string();
    warn!(
        "License {} expired on {} (checked at {})",
        record.identifier(),
        expiry_date,
        now
    );
    Err(LicenseError::Expired {
        identifier: record.identifier().to_string(),
        expiry_date,
    })
}
