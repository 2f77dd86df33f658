use std::path::PathBuf;

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use tokio::fs;

use crate::{
    constants::{MAX_UPLOAD_BYTES, UPLOADS_URL_PATH},
    entities::image::{ImageUploadRequest, ImageUploadResponse},
    errors::AppError,
    utils::filename::{resolve_extension, sanitize_filename, unique_filename},
};

/// Standard alphabet, padding optional.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub struct UploadHandler {
    pub uploads_dir: PathBuf,
    pub max_bytes: usize,
}

impl UploadHandler {
    pub fn new(uploads_dir: impl Into<PathBuf>) -> Self {
        UploadHandler {
            uploads_dir: uploads_dir.into(),
            max_bytes: MAX_UPLOAD_BYTES,
        }
    }

    /// Validates, decodes and stores a base64 image under a generated name.
    pub async fn store_image(&self, request: ImageUploadRequest) -> Result<ImageUploadResponse, AppError> {
        let data = request.data
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AppError::BadRequest("Image data is required".into()))?;

        let mime_type = request.mime_type
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty());
        if let Some(mime) = mime_type {
            if !mime.to_lowercase().starts_with("image/") {
                return Err(AppError::BadRequest("Only image uploads are allowed".into()));
            }
        }

        let bytes = decode_payload(data)?;
        if bytes.len() > self.max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "Image exceeds the {} MB limit",
                self.max_bytes / (1024 * 1024)
            )));
        }

        let sanitized = request.filename.as_deref().map(sanitize_filename);
        let sniffed = if mime_type.is_none() {
            infer::get(&bytes).map(|kind| kind.extension())
        } else {
            None
        };
        let extension = resolve_extension(sanitized.as_deref(), mime_type, sniffed);
        let filename = unique_filename(&extension);

        fs::create_dir_all(&self.uploads_dir).await.map_err(|e| {
            tracing::error!(dir = %self.uploads_dir.display(), error = %e, "Failed to create uploads directory");
            AppError::InternalError("Failed to save image".into())
        })?;

        let path = self.uploads_dir.join(&filename);
        fs::write(&path, &bytes).await.map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to write upload");
            AppError::InternalError("Failed to save image".into())
        })?;

        tracing::info!(filename = %filename, bytes = bytes.len(), "Image stored");

        Ok(ImageUploadResponse {
            ok: true,
            url: format!("{}/{}", UPLOADS_URL_PATH, filename),
            filename,
        })
    }
}

/// Strips an optional data-URL header and whitespace, then decodes.
fn decode_payload(data: &str) -> Result<Vec<u8>, AppError> {
    let encoded = match data.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map(|(_, payload)| payload).unwrap_or(""),
        None => data,
    };
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    let bytes = LENIENT_BASE64
        .decode(compact.as_bytes())
        .map_err(|_| AppError::BadRequest("Image data is not valid base64".into()))?;

    if bytes.is_empty() {
        return Err(AppError::BadRequest("Image data is empty".into()));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_headers_are_stripped() {
        assert_eq!(decode_payload("data:image/png;base64,aGVsbG8=").unwrap(), b"hello");
        assert_eq!(decode_payload("aGVs\nbG8").unwrap(), b"hello");
    }

    #[test]
    fn garbage_and_empty_payloads_are_rejected() {
        assert!(matches!(decode_payload("!!!"), Err(AppError::BadRequest(_))));
        assert!(matches!(decode_payload("data:image/png;base64,"), Err(AppError::BadRequest(_))));
    }
}
