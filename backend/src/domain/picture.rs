//! Pet picture encoding.
//!
//! Pictures are kept inline in the profile as `data:` URLs so the profile
//! stays a single self-contained text entry.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Guess an image MIME type from the leading magic bytes
pub fn sniff_mime_type(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        "image/png"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else if bytes.starts_with(b"BM") {
        "image/bmp"
    } else if looks_like_svg(bytes) {
        "image/svg+xml"
    } else {
        FALLBACK_MIME_TYPE
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(256)];
    String::from_utf8_lossy(head).trim_start().starts_with("<svg")
}

/// Encode raw file bytes as a base64 `data:` URL
pub fn to_data_url(bytes: &[u8]) -> String {
    format!("data:{};base64,{}", sniff_mime_type(bytes), STANDARD.encode(bytes))
}
