use axum::http::HeaderValue;
use clap::Parser;

/// Service settings, read once at startup from flags or the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "passport-ocr", about = "Extract passport fields from uploaded images")]
pub struct Config {
    /// Interface to bind the HTTP server to
    #[arg(long, env = "PASSPORT_OCR_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(long, env = "PASSPORT_OCR_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Comma separated list of origins allowed to call the API
    #[arg(
        long,
        env = "PASSPORT_OCR_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173,https://passport-ocr-pied.vercel.app"
    )]
    pub allowed_origins: Vec<String>,

    /// Tesseract data directory
    #[arg(long, env = "TESSDATA_PREFIX")]
    pub tessdata: Option<String>,

    /// Tesseract language used for both OCR passes
    #[arg(long, env = "PASSPORT_OCR_LANG", default_value = "eng")]
    pub lang: String,

    /// Largest accepted upload, in megabytes
    #[arg(long, env = "PASSPORT_OCR_MAX_UPLOAD_MB", default_value_t = 10)]
    pub max_upload_mb: usize,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    /// Allowed origins as header values. Entries that are not valid header
    /// values are skipped with a warning.
    pub fn cors_origins(&self) -> Vec<HeaderValue> {
        self.allowed_origins
            .iter()
            .filter_map(|origin| {
                let trimmed = origin.trim();
                if trimmed.is_empty() {
                    return None;
                }
                match trimmed.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        log::warn!("Ignoring invalid allowed origin: {:?}", trimmed);
                        None
                    }
                }
            })
            .collect()
    }
}
