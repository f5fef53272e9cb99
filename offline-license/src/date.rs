//! Packed calendar dates.
//!
//! A date occupies three bytes on the wire: a 24-bit big-endian integer
//! holding `(year << 9) | day_of_year`. Years are masked to 15 bits and
//! the day of year to 9 bits, so only years 0-32767 round-trip. Values
//! outside that range are truncated silently; changing that would change
//! the wire format.

use crate::error::{MalformedLicense, ParseResult};
use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};

/// Size of a packed date in bytes.
pub const PACKED_DATE_LEN: usize = 3;

const YEAR_MASK: u32 = 0x7FFF;
const DAY_OF_YEAR_MASK: u32 = 0x1FF;
const DAY_OF_YEAR_BITS: u32 = 9;

/// Returns the calendar date of `moment` in the UTC reference timezone.
#[must_use]
pub fn reference_date<Tz: TimeZone>(moment: &DateTime<Tz>) -> NaiveDate {
    moment.with_timezone(&Utc).date_naive()
}

/// Packs a date into three big-endian bytes.
#[must_use]
pub fn encode_date(date: NaiveDate) -> [u8; PACKED_DATE_LEN] {
    let year = (date.year() as u32) & YEAR_MASK;
    let day_of_year = date.ordinal() & DAY_OF_YEAR_MASK;
    let packed = (year << DAY_OF_YEAR_BITS) | day_of_year;

    let [_, high, mid, low] = packed.to_be_bytes();
    [high, mid, low]
}

/// Unpacks a date written by [`encode_date`].
///
/// Day of year is interpreted leniently: day 0 is the last day of the
/// previous year and days past the end of the year roll into the next.
///
/// # Errors
///
/// Returns [`MalformedLicense`] if the date falls outside the supported
/// calendar range.
pub fn decode_date(bytes: [u8; PACKED_DATE_LEN]) -> ParseResult<NaiveDate> {
    let packed = u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]);
    let year = ((packed >> DAY_OF_YEAR_BITS) & YEAR_MASK) as i32;
    let day_of_year = packed & DAY_OF_YEAR_MASK;

    let first_day = NaiveDate::from_yo_opt(year, 1).ok_or(MalformedLicense)?;
    let date = match day_of_year {
        0 => first_day.checked_sub_days(Days::new(1)),
        day => first_day.checked_add_days(Days::new(u64::from(day - 1))),
    };
    date.ok_or(MalformedLicense)
}
