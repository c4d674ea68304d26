use std::path::Path;

use crate::models::SelectedFile;

/// Lowercases a content type and strips parameters (`image/PNG; q=1` -> `image/png`)
pub fn normalize_mime(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase()
}

/// Only `image/*` types are accepted into the working set
pub fn is_image_mime(content_type: &str) -> bool {
    normalize_mime(content_type)
        .parse::<mime::Mime>()
        .map(|m| m.type_() == mime::IMAGE)
        .unwrap_or(false)
}

/// Detects a MIME type from magic bytes, falling back to the file extension
pub fn detect_mime_type(data: &[u8], filename: &str) -> String {
    if let Some(kind) = infer::get(data) {
        return kind.mime_type().to_string();
    }

    mime_from_extension(filename).to_string()
}

/// Extension lookup for payloads without a recognisable signature
pub fn mime_from_extension(filename: &str) -> &'static str {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" | "jfif" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "tif" | "tiff" => "image/tiff",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        "txt" | "md" => "text/plain",
        "pdf" => "application/pdf",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}

/// Splits a batch into accepted images and the names of rejected files
pub fn partition_images(files: Vec<SelectedFile>) -> (Vec<SelectedFile>, Vec<String>) {
    let mut accepted = Vec::with_capacity(files.len());
    let mut rejected = Vec::new();

    for file in files {
        if file.is_image() {
            accepted.push(file);
        } else {
            tracing::warn!(
                "Rejecting non-image file '{}' ({})",
                file.name,
                file.mime_type
            );
            rejected.push(file.name);
        }
    }

    (accepted, rejected)
}
