use crate::utils::PassportError;
use image::{DynamicImage, GrayImage};
use imageproc::contrast::{otsu_level, threshold};
use imageproc::filter::gaussian_blur_f32;
use std::io::Cursor;

/// Sigma matching a 5x5 Gaussian kernel.
const BLUR_SIGMA: f32 = 1.1;

pub struct ImageProcessor;

impl ImageProcessor {
    /// Decode uploaded bytes in any format the `image` crate understands.
    pub fn decode(image_bytes: &[u8]) -> Result<DynamicImage, PassportError> {
        image::load_from_memory(image_bytes)
            .map_err(|e| PassportError::ImageProcessingError(format!("Failed to decode image: {}", e)))
    }

    /// Grayscale, Gaussian blur, then binarize at the Otsu level.
    ///
    /// This is the bitmap handed to OCR when searching free text.
    pub fn preprocess_for_ocr(img: &DynamicImage) -> GrayImage {
        let gray = img.to_luma8();
        let blurred = gaussian_blur_f32(&gray, BLUR_SIGMA);
        Self::otsu_binarize(&blurred)
    }

    /// Grayscale and Otsu binarization without blurring.
    ///
    /// Keeps the thin `<` filler strokes of the MRZ intact.
    pub fn preprocess_for_mrz(img: &DynamicImage) -> GrayImage {
        Self::otsu_binarize(&img.to_luma8())
    }

    fn otsu_binarize(gray: &GrayImage) -> GrayImage {
        let level = otsu_level(gray);
        log::debug!("Otsu threshold level: {}", level);
        threshold(gray, level)
    }

    /// Encode a bitmap as PNG so it can be handed to Tesseract via a file.
    pub fn encode_png(img: &GrayImage) -> Result<Vec<u8>, PassportError> {
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), image::ImageOutputFormat::Png)
            .map_err(|e| PassportError::ImageProcessingError(format!("Failed to encode image: {}", e)))?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma};

    // Light page with a dark horizontal band across the middle.
    fn banded_page() -> GrayImage {
        ImageBuffer::from_fn(60, 40, |_, y| {
            if (15..25).contains(&y) {
                Luma([30u8])
            } else {
                Luma([220u8])
            }
        })
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = ImageProcessor::decode(b"definitely not an image");
        assert!(matches!(result, Err(PassportError::ImageProcessingError(_))));
    }

    #[test]
    fn test_png_round_trip_through_decode() {
        let page = banded_page();
        let bytes = ImageProcessor::encode_png(&page).unwrap();
        let decoded = ImageProcessor::decode(&bytes).unwrap();
        assert_eq!(decoded.to_luma8(), page);
    }

    #[test]
    fn test_preprocess_produces_binary_bitmap() {
        let img = DynamicImage::ImageLuma8(banded_page());
        let processed = ImageProcessor::preprocess_for_ocr(&img);

        assert_eq!(processed.dimensions(), (60, 40));
        assert!(processed.pixels().all(|p| p[0] == 0 || p[0] == 255));
        // Away from the band edges the blur cannot flip a pixel.
        assert_eq!(processed.get_pixel(30, 20)[0], 0);
        assert_eq!(processed.get_pixel(30, 2)[0], 255);
    }

    #[test]
    fn test_preprocess_for_mrz_keeps_contrast() {
        let img = DynamicImage::ImageLuma8(banded_page());
        let processed = ImageProcessor::preprocess_for_mrz(&img);
        assert_eq!(processed.get_pixel(0, 15)[0], 0);
        assert_eq!(processed.get_pixel(0, 14)[0], 255);
    }
}
