//! Image acquisition.
//!
//! Camera frames and uploaded files both end up as a [`CapturedImage`];
//! the rest of the pipeline never knows where an image came from.

mod camera;
pub mod data_url;

pub use camera::{Camera, CommandCamera};

use image::ImageFormat;
use log::debug;
use std::path::{Path, PathBuf};

use crate::error::SnapError;
use crate::model::CapturedImage;

/// Represents where an image comes from
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// An uploaded image file
    Path(PathBuf),
    /// A `data:` URL, as produced by camera snapshots
    DataUrl(String),
}

/// Turns an image source into a captured image
pub async fn acquire(source: &ImageSource) -> Result<CapturedImage, SnapError> {
    match source {
        ImageSource::Path(path) => from_file(path).await,
        ImageSource::DataUrl(url) => data_url::decode(url),
    }
}

/// Takes a snapshot from `camera`
pub async fn from_camera(camera: &dyn Camera) -> Result<CapturedImage, SnapError> {
    camera.snapshot().await
}

/// Reads an uploaded image file.
///
/// The MIME type comes from the file extension; anything that is not an
/// image type is refused before the file is read.
pub async fn from_file(path: &Path) -> Result<CapturedImage, SnapError> {
    let mime = image_mime(path)?;
    let bytes = tokio::fs::read(path).await?;
    if bytes.is_empty() {
        return Err(SnapError::InvalidImage(format!(
            "{} is empty",
            path.display()
        )));
    }
    debug!("Read {} bytes of {} from {}", bytes.len(), mime, path.display());

    Ok(CapturedImage {
        bytes,
        mime: mime.to_string(),
        display_ref: path.display().to_string(),
    })
}

/// Single-file upload: exactly one path is accepted, a multi-file drop is
/// refused as a whole.
pub async fn from_files(paths: &[PathBuf]) -> Result<CapturedImage, SnapError> {
    match paths {
        [path] => from_file(path).await,
        [] => Err(SnapError::InvalidImage("no file selected".to_string())),
        _ => Err(SnapError::InvalidImage(format!(
            "only one image can be uploaded at a time, got {}",
            paths.len()
        ))),
    }
}

fn image_mime(path: &Path) -> Result<&'static str, SnapError> {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .map_err(|_| {
            SnapError::InvalidImage(format!("{} is not an image file", path.display()))
        })
}
