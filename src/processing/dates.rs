use chrono::NaiveDate;
use crate::models::{INVALID_DATE, INVALID_DATE_FORMAT};

/// Canonical display form for every date the service returns, e.g. `05 Mar 1990`.
pub const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";

/// Two-digit years above this value belong to the 1900s, the rest to the 2000s.
const CENTURY_PIVOT: i32 = 30;

/// Convert an MRZ date (`YYMMDD`) into the display form `DD Mon YYYY`.
///
/// Never fails: malformed input yields `"Invalid Date Format"` (wrong length)
/// or `"Invalid Date"` (non-numeric, out of range, or not on the calendar).
pub fn parse_mrz_date(mrz_date: &str) -> String {
    if mrz_date.chars().count() != 6 {
        log::debug!("MRZ date has wrong length: {:?}", mrz_date);
        return INVALID_DATE_FORMAT.to_string();
    }

    match mrz_date_to_naive(mrz_date) {
        Some(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        None => {
            log::debug!("MRZ date is not a valid calendar date: {:?}", mrz_date);
            INVALID_DATE.to_string()
        }
    }
}

fn mrz_date_to_naive(mrz_date: &str) -> Option<NaiveDate> {
    if !mrz_date.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let year = mrz_date[0..2].parse::<i32>().ok()?;
    let month = mrz_date[2..4].parse::<u32>().ok()?;
    let day = mrz_date[4..6].parse::<u32>().ok()?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    let full_year = if year > CENTURY_PIVOT { 1900 + year } else { 2000 + year };
    NaiveDate::from_ymd_opt(full_year, month, day)
}

/// Parse a date previously produced by [`parse_mrz_date`].
///
/// Sentinel strings do not parse and yield `None`.
pub fn parse_display_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, DISPLAY_DATE_FORMAT).ok()
}
