use std::path::Path;

use chrono::Utc;
use rand::Rng;

use crate::constants::{ALLOWED_IMAGE_EXTENSIONS, DEFAULT_IMAGE_EXTENSION};

/// Lowercases and replaces everything outside `[a-z0-9.-]` with `-`.
pub fn sanitize_filename(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-' { c } else { '-' })
        .collect()
}

/// Extension implied by a MIME type, e.g. `image/svg+xml` → `svg`.
pub fn extension_for_mime(mime: &str) -> Option<String> {
    let subtype = mime.trim().to_lowercase();
    let subtype = subtype.split(';').next()?.split('/').nth(1)?;
    let subtype = subtype.split('+').next()?.trim();

    (!subtype.is_empty()).then(|| subtype.to_string())
}

/// Picks the stored extension: filename, then MIME type, then sniffed content,
/// then the default. Anything outside the image whitelist becomes the default.
pub fn resolve_extension(
    sanitized_filename: Option<&str>,
    mime_type: Option<&str>,
    sniffed_extension: Option<&str>,
) -> String {
    let from_name = sanitized_filename
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(str::to_string);

    let candidate = from_name
        .or_else(|| mime_type.and_then(extension_for_mime))
        .or_else(|| sniffed_extension.map(str::to_lowercase))
        .unwrap_or_else(|| DEFAULT_IMAGE_EXTENSION.to_string());

    if ALLOWED_IMAGE_EXTENSIONS.contains(&candidate.as_str()) {
        candidate
    } else {
        DEFAULT_IMAGE_EXTENSION.to_string()
    }
}

/// `<epoch-ms>-<random>.<ext>`
pub fn unique_filename(extension: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{}-{}.{}", Utc::now().timestamp_millis(), suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_to_safe_characters() {
        assert_eq!(sanitize_filename("My Logo (Final).PNG"), "my-logo--final-.png");
        assert_eq!(sanitize_filename("../../etc/passwd"), "..-..-etc-passwd");
    }

    #[test]
    fn mime_subtypes_become_extensions() {
        assert_eq!(extension_for_mime("image/jpeg").as_deref(), Some("jpeg"));
        assert_eq!(extension_for_mime("image/svg+xml").as_deref(), Some("svg"));
        assert_eq!(extension_for_mime("image"), None);
    }

    #[test]
    fn extension_precedence_and_whitelist() {
        assert_eq!(resolve_extension(Some("photo.jpg"), Some("image/png"), None), "jpg");
        assert_eq!(resolve_extension(Some("photo"), Some("image/webp"), None), "webp");
        assert_eq!(resolve_extension(None, None, Some("gif")), "gif");
        assert_eq!(resolve_extension(None, None, None), "png");
        assert_eq!(resolve_extension(Some("script.exe"), None, None), "png");
        assert_eq!(resolve_extension(None, Some("image/tiff"), None), "png");
    }

    #[test]
    fn unique_names_carry_the_extension() {
        let name = unique_filename("webp");
        assert!(name.ends_with(".webp"));
        assert!(name.split('-').next().unwrap().parse::<i64>().is_ok());
    }
}
