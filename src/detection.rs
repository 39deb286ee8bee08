//! Client for the detection backend.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::config::SnapConfig;
use crate::error::SnapError;
use crate::http;
use crate::model::{CapturedImage, Detection, HealthStatus, Ingredient};

/// Labels the detection models emit for food and kitchen items
const FOOD_CATEGORIES: &[&str] = &[
    "apple",
    "orange",
    "banana",
    "broccoli",
    "carrot",
    "hot dog",
    "pizza",
    "donut",
    "cake",
    "sandwich",
    "tomato",
    "vegetable",
    "fruit",
    "food",
    "bowl",
    "bottle",
    "wine glass",
    "cup",
    "fork",
    "knife",
    "spoon",
    "refrigerator",
    "oven",
    "microwave",
    "toaster",
    "sink",
    "blender",
];

/// Anything that can turn an image into a caption and ingredients
#[async_trait]
pub trait Detector: Send + Sync {
    async fn detect(&self, image: &CapturedImage) -> Result<Detection, SnapError>;
}

pub struct DetectionClient {
    client: Client,
    base_url: String,
    food_only: bool,
}

impl DetectionClient {
    /// Create a new detection client from configuration
    pub fn new(config: &SnapConfig) -> Result<Self, SnapError> {
        Ok(DetectionClient {
            client: http::build_client(config.timeout())?,
            base_url: config.detection_url.trim_end_matches('/').to_string(),
            food_only: config.food_only,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        DetectionClient {
            client: Client::new(),
            base_url,
            food_only: false,
        }
    }

    /// Also drop detections that are not food related
    pub fn food_only(mut self, food_only: bool) -> Self {
        self.food_only = food_only;
        self
    }

    /// Checks whether the backend is up and has its models loaded.
    ///
    /// Never fails: any problem is reported as an unhealthy status.
    pub async fn health(&self) -> HealthStatus {
        match self.fetch_health().await {
            Ok(status) => status,
            Err(e) => {
                warn!("Health check failed: {}", e);
                HealthStatus::unhealthy()
            }
        }
    }

    async fn fetch_health(&self) -> Result<HealthStatus, SnapError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        let response = http::check_status(response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl Detector for DetectionClient {
    async fn detect(&self, image: &CapturedImage) -> Result<Detection, SnapError> {
        let url = format!("{}/analyze", self.base_url);
        debug!("Sending {} byte image to {}", image.bytes.len(), url);

        let part = Part::bytes(image.bytes.clone())
            .file_name("image.jpg")
            .mime_str(&image.mime)?;
        let form = Form::new().part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        let response = http::check_status(response).await?;

        let mut detection: Detection = response.json().await?;
        if self.food_only {
            detection.ingredients = filter_food_items(detection.ingredients);
        }
        info!(
            "Detected {} ingredients, caption: {:?}",
            detection.ingredients.len(),
            detection.caption
        );

        Ok(detection)
    }
}

/// Whether a detection label names a food related item
pub fn is_food_label(label: &str) -> bool {
    let label = label.to_lowercase();
    FOOD_CATEGORIES
        .iter()
        .any(|category| label.contains(category))
}

/// Keeps only food related ingredients, preserving order
pub fn filter_food_items(ingredients: Vec<Ingredient>) -> Vec<Ingredient> {
    ingredients
        .into_iter()
        .filter(|ingredient| is_food_label(&ingredient.name))
        .collect()
}
