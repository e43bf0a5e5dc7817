//! Orthodox Pascha (Easter) via the Meeus Julian algorithm.
//!
//! The Julian result is shifted onto the Gregorian calendar with a fixed,
//! era-dependent offset table. Every moveable period hangs off this date.

use crate::domain::DomainError;
use chrono::{Days, NaiveDate};
use std::ops::RangeInclusive;

/// Years covered by the offset table. Outside it the offsets fall through
/// (+11 below 1800, +14 from 2100) and are not trusted.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1800..=2099;

/// Days between the Julian and Gregorian calendars for the given year.
pub fn julian_to_gregorian_offset(year: i32) -> u64 {
    if year >= 2100 {
        14
    } else if year >= 1900 {
        13
    } else if year >= 1800 {
        12
    } else {
        11
    }
}

/// Gregorian date of Orthodox Pascha.
///
/// Returns `None` only when `chrono` cannot represent the year.
pub fn compute_pascha(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(4);
    let b = year.rem_euclid(7);
    let c = year.rem_euclid(19);
    let d = (19 * c + 15) % 30;
    let e = (2 * a + 4 * b - d + 34).rem_euclid(7);
    let month = (d + e + 114) / 31;
    let day = (d + e + 114) % 31 + 1;

    let julian = NaiveDate::from_ymd_opt(year, month as u32, day as u32)?;
    julian.checked_add_days(Days::new(julian_to_gregorian_offset(year)))
}

/// Rejects years the offset table does not cover. Used where dates come from users.
pub fn ensure_supported_year(year: i32) -> Result<(), DomainError> {
    if SUPPORTED_YEARS.contains(&year) {
        Ok(())
    } else {
        Err(DomainError::UnsupportedYear(year))
    }
}
