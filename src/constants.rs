use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Header carrying the shared admin secret.
pub const ADMIN_SECRET_HEADER: &str = "x-admin-secret";

/// Largest decoded image accepted by the upload endpoint (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// JSON body limit; base64 inflates by a third, so this must exceed `MAX_UPLOAD_BYTES * 4 / 3`.
pub const MAX_JSON_BODY_BYTES: usize = 10 * 1024 * 1024;

pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "webp", "gif", "svg"];

pub const DEFAULT_IMAGE_EXTENSION: &str = "png";

/// URL prefix under which stored uploads are served.
pub const UPLOADS_URL_PATH: &str = "/uploads";
