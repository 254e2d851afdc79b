/// Strip the trailing MRZ filler from a document number.
///
/// Only a trailing run of characters outside `[A-Z0-9]` is removed; leading
/// and interior characters are kept as they are.
pub fn clean_passport_number(passport_number: &str) -> String {
    passport_number
        .trim_end_matches(|c: char| !(c.is_ascii_uppercase() || c.is_ascii_digit()))
        .to_string()
}
