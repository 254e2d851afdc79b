pub mod dates;
pub mod identifier;
pub mod image;
pub mod issue_date;
pub mod mrz;
pub mod ocr;

pub use dates::parse_mrz_date;
pub use identifier::clean_passport_number;
pub use self::image::ImageProcessor;
pub use issue_date::IssueDateRecoverer;
pub use mrz::{MrzReader, TesseractMrzReader};
pub use ocr::{OcrEngine, TesseractOcr};
