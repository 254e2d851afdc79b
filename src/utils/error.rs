use thiserror::Error;

#[derive(Debug, Error)]
pub enum PassportError {
    #[error("Image processing error: {0}")]
    ImageProcessingError(String),
    #[error("OCR error: {0}")]
    OcrError(String),
    #[error("Extraction task failed: {0}")]
    ExtractionTaskFailed(String),
    #[error("Could not extract MRZ data from image")]
    MrzNotFound,
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("{0}")]
    InvalidUpload(String),
}
