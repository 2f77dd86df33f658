use crate::errors::AppError;

/// Parses a catalog id from a path segment.
pub fn valid_id(raw: &str, kind: &str) -> Result<u64, AppError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid {} id", kind)))
}
