use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use crate::models::{ISSUE_DATE_ERROR, ISSUE_DATE_NOT_FOUND};
use crate::processing::dates::parse_display_date;
use crate::processing::{ImageProcessor, OcrEngine};
use crate::utils::PassportError;

/// A printed-date matcher paired with the format used to parse what it matches.
pub struct DatePattern {
    pub regex: Regex,
    pub format: &'static str,
}

impl DatePattern {
    fn new(pattern: &str, format: &'static str) -> Self {
        DatePattern {
            regex: Regex::new(pattern).unwrap(),
            format,
        }
    }

    /// The first match in `text`, if any. Later matches are never considered.
    pub fn first_match<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex.find(text).map(|m| m.as_str())
    }

    pub fn parse(&self, candidate: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(candidate, self.format).ok()
    }
}

lazy_static! {
    /// Issue date patterns in priority order.
    ///
    /// The year-first alternatives are matched but still parsed day-first, so
    /// a `YYYY/MM/DD` candidate never parses and the search moves on.
    /// Digits are ASCII only: chrono cannot parse other digit scripts.
    pub static ref ISSUE_DATE_PATTERNS: Vec<DatePattern> = vec![
        DatePattern::new(r"\b([0-9]{2}/[0-9]{2}/[0-9]{4}|[0-9]{4}/[0-9]{2}/[0-9]{2})\b", "%d/%m/%Y"),
        DatePattern::new(r"\b([0-9]{2} [A-Z]{3} [0-9]{4})\b", "%d %b %Y"),
        DatePattern::new(r"\b([0-9]{2}-[0-9]{2}-[0-9]{4}|[0-9]{4}-[0-9]{2}-[0-9]{2})\b", "%d-%m-%Y"),
        DatePattern::new(r"\b([0-9]{2}\.[0-9]{2}\.[0-9]{4}|[0-9]{4}\.[0-9]{2}\.[0-9]{2})\b", "%d.%m.%Y"),
    ];
}

/// Scan OCR text for an issue date strictly between birth and expiry.
///
/// Returns the matched text exactly as printed on the document.
pub fn find_issue_date(text: &str, date_of_birth: NaiveDate, date_of_expiry: NaiveDate) -> Option<String> {
    for pattern in ISSUE_DATE_PATTERNS.iter() {
        let Some(candidate) = pattern.first_match(text) else {
            continue;
        };

        match pattern.parse(candidate) {
            Some(date) if date_of_birth < date && date < date_of_expiry => {
                log::debug!("Accepted issue date candidate {:?}", candidate);
                return Some(candidate.to_string());
            }
            Some(date) => {
                log::debug!("Issue date candidate {} outside ({}, {})", date, date_of_birth, date_of_expiry);
            }
            None => {
                log::debug!("Issue date candidate {:?} does not parse as {}", candidate, pattern.format);
            }
        }
    }
    None
}

/// Recovers the date of issue, which the MRZ does not carry, from the
/// printed page.
pub struct IssueDateRecoverer;

impl IssueDateRecoverer {
    /// Always returns display text: the printed date, or one of the
    /// `"Date of Issue Not Found"` / `"Error Extracting Issue Date"` sentinels.
    pub fn extract_issue_date(
        ocr: &dyn OcrEngine,
        image_bytes: &[u8],
        date_of_birth: &str,
        date_of_expiry: &str,
    ) -> String {
        match Self::try_extract(ocr, image_bytes, date_of_birth, date_of_expiry) {
            Ok(Some(date)) => date,
            Ok(None) => ISSUE_DATE_NOT_FOUND.to_string(),
            Err(e) => {
                log::error!("OCR Error: {}", e);
                ISSUE_DATE_ERROR.to_string()
            }
        }
    }

    fn try_extract(
        ocr: &dyn OcrEngine,
        image_bytes: &[u8],
        date_of_birth: &str,
        date_of_expiry: &str,
    ) -> Result<Option<String>, PassportError> {
        let dob = parse_display_date(date_of_birth)
            .ok_or_else(|| PassportError::InvalidDate(format!("date of birth {:?}", date_of_birth)))?;
        let expiry = parse_display_date(date_of_expiry)
            .ok_or_else(|| PassportError::InvalidDate(format!("date of expiry {:?}", date_of_expiry)))?;

        let img = ImageProcessor::decode(image_bytes)?;
        let bitmap = ImageProcessor::preprocess_for_ocr(&img);
        let text = ocr.recognize(&bitmap)?;

        Ok(find_issue_date(&text, dob, expiry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageBuffer, Luma};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn find(text: &str) -> Option<String> {
        find_issue_date(text, ymd(1990, 1, 1), ymd(2025, 1, 1))
    }

    struct FixedOcr(Result<&'static str, &'static str>);

    impl OcrEngine for FixedOcr {
        fn recognize(&self, _bitmap: &GrayImage) -> Result<String, PassportError> {
            self.0
                .map(str::to_string)
                .map_err(|e| PassportError::OcrError(e.to_string()))
        }
    }

    fn page_png() -> Vec<u8> {
        let img: GrayImage = ImageBuffer::from_fn(16, 16, |x, _| Luma([if x < 8 { 0 } else { 255 }]));
        ImageProcessor::encode_png(&img).unwrap()
    }

    #[test]
    fn test_slash_date_in_range() {
        assert_eq!(find("Date of issue 15/06/2015").as_deref(), Some("15/06/2015"));
    }

    #[test]
    fn test_no_dates() {
        assert_eq!(find("REPUBLIC OF NOWHERE\nPASSPORT\nSMITH JOHN"), None);
        assert_eq!(find(""), None);
    }

    #[test]
    fn test_boundaries_rejected() {
        assert_eq!(find("01/01/1990"), None);
        assert_eq!(find("01/01/2025"), None);
        assert_eq!(find("02/01/1990").as_deref(), Some("02/01/1990"));
        assert_eq!(find("31/12/2024").as_deref(), Some("31/12/2024"));
    }

    #[test]
    fn test_month_name_pattern() {
        assert_eq!(find("ISSUED 15 JUN 2015").as_deref(), Some("15 JUN 2015"));
        // only upper case abbreviations are matched
        assert_eq!(find("issued 15 Jun 2015"), None);
    }

    #[test]
    fn test_dash_and_dot_patterns() {
        assert_eq!(find("issue: 15-06-2015").as_deref(), Some("15-06-2015"));
        assert_eq!(find("issue: 15.06.2015").as_deref(), Some("15.06.2015"));
    }

    #[test]
    fn test_priority_order() {
        let text = "10-05-2012 then 15 JUN 2015 then 20.07.2016";
        assert_eq!(find(text).as_deref(), Some("15 JUN 2015"));

        let text = "20.07.2016 10-05-2012";
        assert_eq!(find(text).as_deref(), Some("10-05-2012"));
    }

    #[test]
    fn test_only_first_match_per_pattern() {
        // birth date printed first shadows the issue date in the same format
        let text = "Birth 01/01/1980\nIssue 15/06/2015";
        assert_eq!(find(text), None);

        let text = "Birth 01/01/1980\nIssue 15.06.2015";
        assert_eq!(find(text).as_deref(), Some("15.06.2015"));
    }

    #[test]
    fn test_unparseable_candidate_falls_through() {
        assert_eq!(find("31/02/2015 and 15-06-2015").as_deref(), Some("15-06-2015"));
    }

    #[test]
    fn test_non_ascii_digits_do_not_shadow_printed_date() {
        let text = "\u{ff11}\u{ff15}/\u{ff10}\u{ff16}/\u{ff12}\u{ff10}\u{ff11}\u{ff15} issued 15/06/2015";
        assert_eq!(ISSUE_DATE_PATTERNS[0].first_match(text), Some("15/06/2015"));
        assert_eq!(find(text).as_deref(), Some("15/06/2015"));
    }

    #[test]
    fn test_year_first_is_parsed_day_first() {
        assert_eq!(find("2015/06/15"), None);
        assert_eq!(find("2015-06-15"), None);
        assert_eq!(find("2015.06.15"), None);
    }

    #[test]
    fn test_patterns_match_independently() {
        let samples = ["15/06/2015", "15 JUN 2015", "15-06-2015", "15.06.2015"];
        for (pattern, sample) in ISSUE_DATE_PATTERNS.iter().zip(samples) {
            assert_eq!(pattern.first_match(sample), Some(sample));
            assert_eq!(pattern.parse(sample), Some(ymd(2015, 6, 15)));
        }
        assert_eq!(ISSUE_DATE_PATTERNS[0].first_match("15.06.2015"), None);
        assert_eq!(ISSUE_DATE_PATTERNS[0].first_match("115/06/20155"), None);
    }

    #[test]
    fn test_extract_issue_date_with_engine() {
        let ocr = FixedOcr(Ok("PASSPORT\nDate of issue 15/06/2015\n"));
        let date = IssueDateRecoverer::extract_issue_date(&ocr, &page_png(), "01 Jan 1990", "01 Jan 2025");
        assert_eq!(date, "15/06/2015");

        let ocr = FixedOcr(Ok("PASSPORT\n"));
        let date = IssueDateRecoverer::extract_issue_date(&ocr, &page_png(), "01 Jan 1990", "01 Jan 2025");
        assert_eq!(date, ISSUE_DATE_NOT_FOUND);
    }

    #[test]
    fn test_extract_issue_date_errors() {
        let ocr = FixedOcr(Ok("15/06/2015"));
        assert_eq!(
            IssueDateRecoverer::extract_issue_date(&ocr, &page_png(), "Invalid Date", "01 Jan 2025"),
            ISSUE_DATE_ERROR
        );
        assert_eq!(
            IssueDateRecoverer::extract_issue_date(&ocr, b"garbage", "01 Jan 1990", "01 Jan 2025"),
            ISSUE_DATE_ERROR
        );

        let ocr = FixedOcr(Err("engine unavailable"));
        assert_eq!(
            IssueDateRecoverer::extract_issue_date(&ocr, &page_png(), "01 Jan 1990", "01 Jan 2025"),
            ISSUE_DATE_ERROR
        );
    }
}
