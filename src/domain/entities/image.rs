use serde::{Deserialize, Serialize};

// For upload requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageUploadRequest {
    /// Base64 payload, optionally with a `data:<mime>;base64,` prefix
    pub data: Option<String>,
    pub filename: Option<String>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageUploadResponse {
    pub ok: bool,
    pub url: String,
    pub filename: String,
}
