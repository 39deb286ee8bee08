use log::info;

use super::PipelineController;
use crate::capture::{self, Camera, ImageSource};
use crate::config::SnapConfig;
use crate::detection::{DetectionClient, Detector};
use crate::error::SnapError;
use crate::model::CapturedImage;
use crate::providers::{ProviderFactory, RecipeProvider};
use crate::recipes;

/// Drives a [`PipelineController`] against real collaborators.
///
/// Stage failures end up in the controller state as user-facing messages;
/// only requests refused before anything was sent are returned as errors.
pub struct Session {
    controller: PipelineController,
    detector: Box<dyn Detector>,
    provider: Box<dyn RecipeProvider>,
}

impl Session {
    pub fn new(detector: Box<dyn Detector>, provider: Box<dyn RecipeProvider>) -> Self {
        Session {
            controller: PipelineController::new(),
            detector,
            provider,
        }
    }

    /// Session talking to the backends named in `config`
    pub fn from_config(config: &SnapConfig) -> Result<Self, SnapError> {
        let detector = DetectionClient::new(config)?;
        let provider = ProviderFactory::create(config)?;
        info!("Using recipe provider {}", provider.provider_name());
        Ok(Session::new(Box::new(detector), provider))
    }

    pub fn controller(&self) -> &PipelineController {
        &self.controller
    }

    /// Makes `image` current and runs detection on it
    pub async fn submit(&mut self, image: CapturedImage) {
        let job = self.controller.capture(image);
        let result = self.detector.detect(&job.image).await;
        self.controller.complete_detection(job.ticket, result);
    }

    /// Acquires an uploaded file or data URL, then submits it.
    ///
    /// When the source cannot be read the current state is left untouched.
    pub async fn capture(&mut self, source: &ImageSource) -> Result<(), SnapError> {
        let image = capture::acquire(source).await?;
        self.submit(image).await;
        Ok(())
    }

    /// Takes a camera snapshot, then submits it. An unreachable camera is
    /// reported as `AdapterUnavailable` and changes nothing.
    pub async fn capture_from_camera(&mut self, camera: &dyn Camera) -> Result<(), SnapError> {
        let image = capture::from_camera(camera).await?;
        self.submit(image).await;
        Ok(())
    }

    /// User-triggered recipe generation for the current ingredients
    pub async fn generate(&mut self) -> Result<(), SnapError> {
        let job = self.controller.request_generation()?;
        let result =
            recipes::generate_recipes(self.provider.as_ref(), &job.ingredients, &job.caption)
                .await;
        self.controller.complete_generation(job.ticket, result);
        Ok(())
    }
}
