use crate::config::SnapConfig;
use crate::error::SnapError;
use crate::http;
use crate::model::Ingredient;
use crate::providers::RecipeProvider;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Recipe generation through the application backend
pub struct BackendProvider {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    ingredients: &'a [Ingredient],
    image_caption: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    generated_text: Option<String>,
}

impl BackendProvider {
    /// Create a new backend provider from configuration
    pub fn new(config: &SnapConfig) -> Result<Self, SnapError> {
        Ok(BackendProvider {
            client: http::build_client(config.timeout())?,
            base_url: config.recipe_url.trim_end_matches('/').to_string(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        BackendProvider {
            client: Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl RecipeProvider for BackendProvider {
    fn provider_name(&self) -> &str {
        "backend"
    }

    async fn generate(
        &self,
        ingredients: &[Ingredient],
        caption: &str,
    ) -> Result<String, SnapError> {
        let response = self
            .client
            .post(format!("{}/generate-recipes", self.base_url))
            .json(&GenerateRequest {
                ingredients,
                image_caption: caption,
            })
            .send()
            .await?;
        let response = http::check_status(response).await?;

        let body: GenerateResponse = response.json().await?;
        let text = body.generated_text.ok_or_else(|| {
            SnapError::InvalidResponse("no generated_text in response".to_string())
        })?;
        debug!("Backend generated {} characters", text.len());

        Ok(text)
    }
}
