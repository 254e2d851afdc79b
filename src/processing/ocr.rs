use std::io::Write;
use image::GrayImage;
use tesseract::Tesseract;
use crate::processing::ImageProcessor;
use crate::utils::PassportError;

/// Turns a bitmap into free-form text.
pub trait OcrEngine {
    fn recognize(&self, bitmap: &GrayImage) -> Result<String, PassportError>;
}

/// OCR backed by the system Tesseract installation.
///
/// A fresh Tesseract handle is created for every call, so one engine value
/// can be shared between requests without locking.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    datapath: Option<String>,
    language: String,
    char_whitelist: Option<String>,
}

impl TesseractOcr {
    pub fn new(datapath: Option<String>, language: impl Into<String>) -> Self {
        TesseractOcr {
            datapath,
            language: language.into(),
            char_whitelist: None,
        }
    }

    /// Restrict recognition to the given characters.
    pub fn with_char_whitelist(mut self, whitelist: &str) -> Self {
        self.char_whitelist = Some(whitelist.to_string());
        self
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, bitmap: &GrayImage) -> Result<String, PassportError> {
        let png = ImageProcessor::encode_png(bitmap)?;

        let mut temp_file = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .map_err(|e| PassportError::OcrError(format!("Failed to create temp file: {}", e)))?;
        temp_file
            .write_all(&png)
            .map_err(|e| PassportError::OcrError(format!("Failed to write temp file: {}", e)))?;

        let path_str = temp_file
            .path()
            .to_str()
            .ok_or_else(|| PassportError::OcrError("Failed to convert path to string".to_string()))?;

        let mut tess = Tesseract::new(self.datapath.as_deref(), Some(self.language.as_str()))
            .map_err(|e| PassportError::OcrError(format!("Tesseract init error: {}", e)))?;

        if let Some(whitelist) = &self.char_whitelist {
            tess = tess
                .set_variable("tessedit_char_whitelist", whitelist)
                .map_err(|e| PassportError::OcrError(format!("Tesseract set variable error: {}", e)))?;
        }

        let mut tess = tess
            .set_image(path_str)
            .map_err(|e| PassportError::OcrError(format!("Tesseract set image error: {}", e)))?;

        let text = tess
            .get_text()
            .map_err(|e| PassportError::OcrError(format!("Tesseract error: {}", e)))?;

        log::debug!("OCR result ({} chars):\n{}", text.len(), text);
        Ok(text)
    }
}
