mod backend;
mod hugging_face;
mod prompt;

pub use backend::BackendProvider;
pub use hugging_face::HuggingFaceProvider;
pub use prompt::{build_recipe_prompt, format_ingredients};

use async_trait::async_trait;

use crate::config::SnapConfig;
use crate::error::SnapError;
use crate::model::Ingredient;

/// Unified trait for everything that produces raw recipe text
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Get the provider name (e.g., "backend", "hugging_face")
    fn provider_name(&self) -> &str;

    /// Generate free text describing recipes for the given ingredients
    async fn generate(
        &self,
        ingredients: &[Ingredient],
        caption: &str,
    ) -> Result<String, SnapError>;
}

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the provider named by `config.recipe_provider`
    pub fn create(config: &SnapConfig) -> Result<Box<dyn RecipeProvider>, SnapError> {
        match config.recipe_provider.as_str() {
            "backend" => Ok(Box::new(BackendProvider::new(config)?)),
            "hugging_face" => Ok(Box::new(HuggingFaceProvider::new(config)?)),
            other => Err(SnapError::Config(config::ConfigError::Message(format!(
                "Unknown recipe provider: {}",
                other
            )))),
        }
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["backend", "hugging_face"]
    }
}
