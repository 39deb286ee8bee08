use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Main client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SnapConfig {
    /// Base URL of the detection backend (`/analyze` and `/health`)
    #[serde(default = "default_base_url")]
    pub detection_url: String,
    /// Base URL of the recipe generation backend (`/generate-recipes`)
    #[serde(default = "default_base_url")]
    pub recipe_url: String,
    /// Which recipe provider to use: "backend" or "hugging_face"
    #[serde(default = "default_recipe_provider")]
    pub recipe_provider: String,
    /// Credential for direct inference; only read by the hugging_face provider
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Drop detections whose label is not food related
    #[serde(default)]
    pub food_only: bool,
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub camera: CameraConfig,
}

/// Settings for direct text-generation inference
#[derive(Debug, Deserialize, Clone)]
pub struct InferenceConfig {
    #[serde(default = "default_inference_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_inference_url(),
            model: default_model(),
            max_new_tokens: default_max_new_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
        }
    }
}

/// Camera capture settings
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CameraConfig {
    /// Command (program followed by arguments) that writes one encoded
    /// still frame to stdout, e.g. `["fswebcam", "--no-banner", "-"]`
    #[serde(default)]
    pub command: Vec<String>,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            detection_url: default_base_url(),
            recipe_url: default_base_url(),
            recipe_provider: default_recipe_provider(),
            api_key: None,
            timeout: default_timeout(),
            food_only: false,
            inference: InferenceConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_recipe_provider() -> String {
    "backend".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_inference_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_model() -> String {
    "mistralai/Mistral-7B-Instruct-v0.2".to_string()
}

fn default_max_new_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.95
}

impl SnapConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPESNAP__ prefix
    /// 2. recipesnap.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPESNAP__INFERENCE__MODEL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
///
/// See [`SnapConfig::load`] for the source priority.
pub fn load_config() -> Result<SnapConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipesnap").required(false))
        // Use double underscore for nested: RECIPESNAP__CAMERA__COMMAND
        .add_source(
            Environment::with_prefix("RECIPESNAP")
                .separator("__")
                .try_parsing(true)
                .list_separator(" ")
                .with_list_parse_key("camera.command"),
        )
        .build()?;

    settings.try_deserialize()
}
