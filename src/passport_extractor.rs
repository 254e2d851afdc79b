use crate::models::*;
use crate::processing::{
    clean_passport_number, parse_mrz_date, IssueDateRecoverer, MrzReader, OcrEngine, TesseractMrzReader,
    TesseractOcr,
};
use crate::utils::PassportError;

pub struct PassportExtractor {
    mrz_reader: Box<dyn MrzReader + Send + Sync>,
    ocr: Box<dyn OcrEngine + Send + Sync>,
}

impl PassportExtractor {
    pub fn new(
        mrz_reader: Box<dyn MrzReader + Send + Sync>,
        ocr: Box<dyn OcrEngine + Send + Sync>,
    ) -> Self {
        PassportExtractor { mrz_reader, ocr }
    }

    /// Extractor wired to the local Tesseract installation for both the
    /// MRZ and the free-text pass.
    pub fn with_tesseract(datapath: Option<String>, language: &str) -> Self {
        Self::new(
            Box::new(TesseractMrzReader::new(datapath.clone(), language)),
            Box::new(TesseractOcr::new(datapath, language)),
        )
    }

    // Main extraction function that orchestrates the entire process
    pub fn extract(&self, image_bytes: &[u8]) -> Result<PassportRecord, PassportError> {
        // Step 1: Read the MRZ
        let mrz = self
            .mrz_reader
            .read(image_bytes)?
            .ok_or(PassportError::MrzNotFound)?;

        // Step 2: Normalize the MRZ fields
        let passport_number = clean_passport_number(mrz.number.as_deref().unwrap_or(NOT_AVAILABLE));
        let full_name = format!(
            "{} {}",
            mrz.names.as_deref().unwrap_or(""),
            mrz.surname.as_deref().unwrap_or("")
        )
        .trim()
        .to_string();
        let date_of_birth = parse_mrz_date(mrz.date_of_birth.as_deref().unwrap_or(MISSING_MRZ_DATE));
        let date_of_expiry = parse_mrz_date(mrz.expiration_date.as_deref().unwrap_or(MISSING_MRZ_DATE));
        let nationality = mrz.nationality.unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let gender = mrz.sex.unwrap_or_else(|| NOT_AVAILABLE.to_string());

        // Step 3: Recover the issue date from the printed page
        let date_of_issue =
            IssueDateRecoverer::extract_issue_date(&*self.ocr, image_bytes, &date_of_birth, &date_of_expiry);

        log::info!(
            "Extracted passport {} (issue date: {})",
            passport_number,
            date_of_issue
        );

        Ok(PassportRecord {
            passport_number,
            full_name,
            date_of_birth,
            date_of_issue,
            date_of_expiry,
            nationality,
            gender,
        })
    }
}
