use serde::{Deserialize, Serialize};

/// Returned by the date normalizer when the encoded date is not six characters.
pub const INVALID_DATE_FORMAT: &str = "Invalid Date Format";
/// Returned by the date normalizer when the encoded date is not a real calendar date.
pub const INVALID_DATE: &str = "Invalid Date";
pub const ISSUE_DATE_NOT_FOUND: &str = "Date of Issue Not Found";
pub const ISSUE_DATE_ERROR: &str = "Error Extracting Issue Date";
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder used for an MRZ date the reader could not supply.
pub const MISSING_MRZ_DATE: &str = "000000";

/// Fields as read from the machine readable zone, before any normalization.
///
/// Every field is optional because a reader may recognise the zone but fail
/// to produce individual fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMrzFields {
    pub number: Option<String>,
    pub names: Option<String>,
    pub surname: Option<String>,
    pub date_of_birth: Option<String>,
    pub expiration_date: Option<String>,
    pub nationality: Option<String>,
    pub sex: Option<String>,
}

/// Extracted passport data as presented to clients.
///
/// All fields are display text. A field that could not be determined carries
/// one of the sentinel strings defined in this module instead of being omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassportRecord {
    pub passport_number: String,
    pub full_name: String,
    pub date_of_birth: String,
    pub date_of_issue: String,
    pub date_of_expiry: String,
    pub nationality: String,
    pub gender: String,
}

#[cfg(test)]
impl PassportRecord {
    /// True when any field holds a sentinel rather than extracted data.
    pub(crate) fn has_sentinel(&self) -> bool {
        const SENTINELS: [&str; 5] = [
            INVALID_DATE_FORMAT,
            INVALID_DATE,
            ISSUE_DATE_NOT_FOUND,
            ISSUE_DATE_ERROR,
            NOT_AVAILABLE,
        ];
        [
            &self.passport_number,
            &self.full_name,
            &self.date_of_birth,
            &self.date_of_issue,
            &self.date_of_expiry,
            &self.nationality,
            &self.gender,
        ]
        .iter()
        .any(|value| SENTINELS.contains(&value.as_str()))
    }
}
