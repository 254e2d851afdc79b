use crate::models::RawMrzFields;
use crate::processing::{ImageProcessor, OcrEngine, TesseractOcr};
use crate::utils::PassportError;

/// Characters that may appear in a machine readable zone.
pub const MRZ_CHARSET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789<";

/// Line length of a TD3 (passport booklet) MRZ.
const TD3_LINE_LEN: usize = 44;

/// OCR'd lines shorter than this are never considered MRZ candidates.
const MIN_CANDIDATE_LEN: usize = 30;

/// Locates and reads the machine readable zone of a passport image.
pub trait MrzReader {
    /// `Ok(None)` means the image decoded but no MRZ was found.
    fn read(&self, image_bytes: &[u8]) -> Result<Option<RawMrzFields>, PassportError>;
}

/// MRZ reader that runs whitelisted OCR over the whole page and parses the
/// first TD3 line pair it can find.
pub struct TesseractMrzReader {
    ocr: Box<dyn OcrEngine + Send + Sync>,
}

impl TesseractMrzReader {
    pub fn new(datapath: Option<String>, language: &str) -> Self {
        let ocr = TesseractOcr::new(datapath, language).with_char_whitelist(MRZ_CHARSET);
        Self::with_engine(Box::new(ocr))
    }

    pub fn with_engine(ocr: Box<dyn OcrEngine + Send + Sync>) -> Self {
        TesseractMrzReader { ocr }
    }
}

impl MrzReader for TesseractMrzReader {
    fn read(&self, image_bytes: &[u8]) -> Result<Option<RawMrzFields>, PassportError> {
        let img = ImageProcessor::decode(image_bytes)?;
        let bitmap = ImageProcessor::preprocess_for_mrz(&img);
        let text = self.ocr.recognize(&bitmap)?;

        match find_td3_lines(&text) {
            Some((line1, line2)) => {
                log::debug!("MRZ lines:\n{}\n{}", line1, line2);
                Ok(Some(parse_td3(&line1, &line2)))
            }
            None => {
                log::warn!("No TD3 machine readable zone found in OCR text");
                Ok(None)
            }
        }
    }
}

/// Keep only MRZ characters, uppercased. OCR often inserts spaces.
fn clean_mrz_line(line: &str) -> String {
    line.chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| c.is_ascii_alphanumeric() || *c == '<')
        .collect()
}

/// Pad with filler or truncate to exactly one TD3 line.
fn fit_to_td3(line: &str) -> String {
    let mut fitted: String = line.chars().take(TD3_LINE_LEN).collect();
    while fitted.len() < TD3_LINE_LEN {
        fitted.push('<');
    }
    fitted
}

/// Find two consecutive MRZ-looking lines, the first starting with `P`.
pub fn find_td3_lines(text: &str) -> Option<(String, String)> {
    let candidates: Vec<String> = text
        .lines()
        .map(clean_mrz_line)
        .filter(|line| line.len() >= MIN_CANDIDATE_LEN && line.contains('<'))
        .collect();

    candidates
        .windows(2)
        .find(|pair| pair[0].starts_with('P'))
        .map(|pair| (fit_to_td3(&pair[0]), fit_to_td3(&pair[1])))
}

/// Split a TD3 line pair into raw fields.
///
/// Both lines must already be exactly [`TD3_LINE_LEN`] ASCII characters.
/// The document number keeps its filler; dates stay in `YYMMDD` form.
pub fn parse_td3(line1: &str, line2: &str) -> RawMrzFields {
    let name_field = &line1[5..TD3_LINE_LEN];
    let (surname, names) = match name_field.split_once("<<") {
        Some((surname, names)) => (surname, names),
        None => (name_field, ""),
    };

    let sex = match &line2[20..21] {
        "<" => "X",
        other => other,
    };

    RawMrzFields {
        number: Some(line2[0..9].to_string()),
        names: Some(clean_name(names)),
        surname: Some(clean_name(surname)),
        date_of_birth: Some(line2[13..19].to_string()),
        expiration_date: Some(line2[21..27].to_string()),
        nationality: Some(line2[10..13].trim_end_matches('<').to_string()),
        sex: Some(sex.to_string()),
    }
}

fn clean_name(name: &str) -> String {
    name.replace('<', " ")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}
