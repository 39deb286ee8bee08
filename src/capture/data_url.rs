use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::SnapError;
use crate::model::CapturedImage;

const DEFAULT_MIME: &str = "image/jpeg";

/// Decodes a `data:` URL into a captured image.
///
/// Only base64 payloads are accepted. A header without a media type is
/// treated as `image/jpeg`, which is what camera snapshots produce.
pub fn decode(data_url: &str) -> Result<CapturedImage, SnapError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| SnapError::InvalidImage("not a data URL".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| SnapError::InvalidImage("data URL has no payload".to_string()))?;

    let mut params = header.split(';');
    let mime = match params.next().map(str::trim) {
        Some(m) if !m.is_empty() => m.to_ascii_lowercase(),
        _ => DEFAULT_MIME.to_string(),
    };
    if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        return Err(SnapError::InvalidImage(
            "data URL payload is not base64".to_string(),
        ));
    }
    if !mime.starts_with("image/") {
        return Err(SnapError::InvalidImage(format!("{} is not an image", mime)));
    }

    let bytes = STANDARD.decode(payload.trim())?;
    if bytes.is_empty() {
        return Err(SnapError::InvalidImage("empty image".to_string()));
    }

    Ok(CapturedImage {
        bytes,
        mime,
        display_ref: data_url.to_string(),
    })
}

/// Encodes image bytes as a `data:` URL for display
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
