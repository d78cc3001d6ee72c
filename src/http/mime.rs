//! MIME type handling
//!
//! Extension-based lookup plus content sniffing for the proxied asset.

/// Get MIME Content-Type based on file extension
pub fn from_extension(extension: Option<&str>) -> &'static str {
    match extension {
        // Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",

        // JavaScript
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",

        // Documents
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("gz" | "gzip") => "application/gzip",
        Some("tar") => "application/x-tar",

        // Default
        _ => "application/octet-stream",
    }
}

/// Sniff a MIME type from the leading bytes of a file.
///
/// Covers the formats a tester is likely to drop into the asset slot;
/// unrecognized content that decodes as UTF-8 is reported as plain text.
pub fn sniff(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        return Some("image/png");
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    if bytes.starts_with(b"%PDF-") {
        return Some("application/pdf");
    }
    if bytes.starts_with(b"PK\x03\x04") {
        return Some("application/zip");
    }
    if bytes.starts_with(&[0x1F, 0x8B]) {
        return Some("application/gzip");
    }

    if bytes.is_empty() {
        return None;
    }

    let Ok(text) = std::str::from_utf8(bytes) else {
        return None;
    };
    let head = text.trim_start();
    if starts_with_ignore_case(head, "<!doctype") || starts_with_ignore_case(head, "<html") {
        return Some("text/html");
    }
    Some("text/plain; charset=utf-8")
}

/// Resolve the content type for a proxied file: sniff the content first,
/// fall back to the extension table.
pub fn detect(bytes: &[u8], extension: Option<&str>) -> &'static str {
    sniff(bytes).unwrap_or_else(|| from_extension(extension))
}

fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
