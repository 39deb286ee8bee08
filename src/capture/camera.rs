use async_trait::async_trait;
use log::{debug, warn};
use std::process::Stdio;
use tokio::process::Command;

use super::data_url;
use crate::config::CameraConfig;
use crate::error::SnapError;
use crate::model::CapturedImage;

/// A device that can take one encoded still frame
#[async_trait]
pub trait Camera: Send + Sync {
    /// Takes a snapshot. Devices that cannot be reached report
    /// `SnapError::AdapterUnavailable`.
    async fn snapshot(&self) -> Result<CapturedImage, SnapError>;
}

/// Camera backed by an external capture program that writes a single
/// encoded frame to stdout (`fswebcam -`, `libcamera-still -o -`, ...)
pub struct CommandCamera {
    program: String,
    args: Vec<String>,
}

impl CommandCamera {
    pub fn new(config: &CameraConfig) -> Result<Self, SnapError> {
        let (program, args) = config.command.split_first().ok_or_else(|| {
            SnapError::AdapterUnavailable("no camera command configured".to_string())
        })?;

        Ok(CommandCamera {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

#[async_trait]
impl Camera for CommandCamera {
    async fn snapshot(&self) -> Result<CapturedImage, SnapError> {
        debug!("Capturing frame with {} {:?}", self.program, self.args);

        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                warn!("Could not start camera command {}: {}", self.program, e);
                SnapError::AdapterUnavailable(format!("{}: {}", self.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("Camera command failed ({}): {}", output.status, stderr.trim());
            return Err(SnapError::AdapterUnavailable(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }
        if output.stdout.is_empty() {
            return Err(SnapError::AdapterUnavailable(
                "camera produced no frame".to_string(),
            ));
        }

        let mime = image::guess_format(&output.stdout)
            .map(|format| format.to_mime_type())
            .unwrap_or("image/jpeg")
            .to_string();
        debug!("Captured {} byte {} frame", output.stdout.len(), mime);

        let display_ref = data_url::encode(&mime, &output.stdout);
        Ok(CapturedImage {
            bytes: output.stdout,
            mime,
            display_ref,
        })
    }
}
