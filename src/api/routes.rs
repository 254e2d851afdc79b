use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::{json, Value};
use crate::api::AppState;
use crate::models::PassportRecord;
use crate::utils::PassportError;

/// Multipart field carrying the passport image.
const UPLOAD_FIELD: &str = "file";

pub async fn extract_passport(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PassportRecord>, PassportError> {
    let contents = read_image_upload(&mut multipart).await?;
    log::info!("Received passport image ({} bytes)", contents.len());

    // Decoding and OCR are CPU bound; keep them off the async workers.
    let extractor = state.extractor.clone();
    let record = tokio::task::spawn_blocking(move || extractor.extract(&contents))
        .await
        .map_err(|e| PassportError::ExtractionTaskFailed(e.to_string()))?
        .map_err(|e| {
            log::warn!("Passport extraction failed: {}", e);
            e
        })?;

    Ok(Json(record))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn read_image_upload(multipart: &mut Multipart) -> Result<Vec<u8>, PassportError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| PassportError::InvalidUpload(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let is_image = field
            .content_type()
            .map(|content_type| content_type.starts_with("image/"))
            .unwrap_or(false);
        if !is_image {
            return Err(PassportError::InvalidUpload("File must be an image".to_string()));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| PassportError::InvalidUpload(format!("Failed to read upload: {}", e)))?;
        return Ok(bytes.to_vec());
    }

    Err(PassportError::InvalidUpload("No file uploaded".to_string()))
}
