//! Snap a photo of your ingredients, find out what is in it and get recipe
//! ideas for it.
//!
//! The pipeline has three stages: an image is captured (camera or file),
//! sent to a detection backend that returns a caption and ingredients, and
//! on request the ingredients are turned into recipes by a text-generation
//! backend.

pub mod capture;
pub mod config;
pub mod detection;
pub mod error;
mod http;
pub mod model;
pub mod pipeline;
pub mod providers;
pub mod recipes;
pub mod view;

pub use capture::ImageSource;
pub use config::SnapConfig;
pub use detection::{DetectionClient, Detector};
pub use error::SnapError;
pub use model::{CapturedImage, Detection, HealthStatus, Ingredient, RecipeRecord};
pub use pipeline::{PipelineController, PipelineState, Session, Stage};
pub use providers::{ProviderFactory, RecipeProvider};
pub use recipes::{generate_recipes, parse_recipe_text};

/// Detects the ingredients in an image file using the configured backend
pub async fn detect_file(
    path: impl AsRef<std::path::Path>,
    config: &SnapConfig,
) -> Result<Detection, SnapError> {
    let image = capture::from_file(path.as_ref()).await?;
    DetectionClient::new(config)?.detect(&image).await
}

/// Asks the backend whether the detection models are ready
pub async fn check_health(config: &SnapConfig) -> Result<HealthStatus, SnapError> {
    Ok(DetectionClient::new(config)?.health().await)
}
