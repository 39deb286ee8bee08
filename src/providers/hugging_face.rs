use crate::config::SnapConfig;
use crate::error::SnapError;
use crate::http;
use crate::model::Ingredient;
use crate::providers::{build_recipe_prompt, RecipeProvider};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

/// Direct text generation on the Hugging Face inference API
pub struct HuggingFaceProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_new_tokens: u32,
    temperature: f32,
    top_p: f32,
}

impl HuggingFaceProvider {
    /// Create a new provider from configuration. The credential must be
    /// present in the configuration object.
    pub fn new(config: &SnapConfig) -> Result<Self, SnapError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            SnapError::Config(config::ConfigError::NotFound("api_key".to_string()))
        })?;
        let inference = &config.inference;

        Ok(HuggingFaceProvider {
            client: http::build_client(config.timeout())?,
            api_key,
            base_url: inference.base_url.trim_end_matches('/').to_string(),
            model: inference.model.clone(),
            max_new_tokens: inference.max_new_tokens,
            temperature: inference.temperature,
            top_p: inference.top_p,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        HuggingFaceProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            max_new_tokens: 1024,
            temperature: 0.7,
            top_p: 0.95,
        }
    }
}

#[async_trait]
impl RecipeProvider for HuggingFaceProvider {
    fn provider_name(&self) -> &str {
        "hugging_face"
    }

    async fn generate(
        &self,
        ingredients: &[Ingredient],
        caption: &str,
    ) -> Result<String, SnapError> {
        let prompt = build_recipe_prompt(ingredients, caption);
        let response = self
            .client
            .post(format!("{}/models/{}", self.base_url, self.model))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "inputs": prompt,
                "parameters": {
                    "max_new_tokens": self.max_new_tokens,
                    "temperature": self.temperature,
                    "top_p": self.top_p,
                    "return_full_text": false
                }
            }))
            .send()
            .await?;
        let response = http::check_status(response).await?;

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);
        let text = response_body[0]["generated_text"]
            .as_str()
            .ok_or_else(|| {
                SnapError::InvalidResponse("Failed to extract generated_text".to_string())
            })?
            .to_string();

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn ingredients() -> Vec<Ingredient> {
        vec![Ingredient {
            name: "carrot".to_string(),
            confidence: 0.8,
        }]
    }

    #[tokio::test]
    async fn test_generate() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/test/model")
            .match_header("authorization", "Bearer hf_fake")
            .match_body(Matcher::Regex("I have the following ingredients: carrot".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"generated_text": "Recipe 1: Carrot Cake\nGrate carrots"}]"#)
            .create_async()
            .await;

        let provider = HuggingFaceProvider::with_base_url(
            "hf_fake".to_string(),
            server.url(),
            "test/model".to_string(),
        );
        let text = provider.generate(&ingredients(), "").await.unwrap();

        assert_eq!(text, "Recipe 1: Carrot Cake\nGrate carrots");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/test/model")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Invalid credentials"}"#)
            .create_async()
            .await;

        let provider = HuggingFaceProvider::with_base_url(
            "bad".to_string(),
            server.url(),
            "test/model".to_string(),
        );
        let result = provider.generate(&ingredients(), "").await;

        assert!(matches!(
            result,
            Err(SnapError::ServerError { status: 401, .. })
        ));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_provider_name() {
        let provider = HuggingFaceProvider::with_base_url(
            "hf_fake".to_string(),
            "http://localhost".to_string(),
            "m".to_string(),
        );
        assert_eq!(provider.provider_name(), "hugging_face");
    }
}
