use serde::{Deserialize, Serialize};

/// An image the user captured or uploaded.
///
/// Replaced wholesale on every capture, never edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    /// Encoded image bytes
    pub bytes: Vec<u8>,
    /// MIME type, e.g. `image/jpeg`
    pub mime: String,
    /// Something a view can show: the data URL of a camera frame or the
    /// path of an uploaded file
    pub display_ref: String,
}

/// A detected food item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Detection score in [0, 1]
    pub confidence: f64,
}

impl Ingredient {
    /// Confidence as a whole percentage, always within [0, 100]
    pub fn confidence_percent(&self) -> u8 {
        if self.confidence.is_nan() {
            return 0;
        }
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

/// Result of one detection call
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Detection {
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

/// One recipe cut out of generated text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeRecord {
    pub name: String,
    pub content: String,
}

/// Detection backend readiness
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub models_loaded: bool,
}

impl HealthStatus {
    pub fn unhealthy() -> Self {
        HealthStatus {
            status: "unhealthy".to_string(),
            models_loaded: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(confidence: f64) -> Ingredient {
        Ingredient {
            name: "banana".to_string(),
            confidence,
        }
    }

    #[test]
    fn test_confidence_percent_rounds() {
        assert_eq!(ingredient(0.874).confidence_percent(), 87);
        assert_eq!(ingredient(0.875).confidence_percent(), 88);
        assert_eq!(ingredient(1.0).confidence_percent(), 100);
        assert_eq!(ingredient(0.0).confidence_percent(), 0);
    }

    #[test]
    fn test_confidence_percent_stays_in_range() {
        for value in [-3.0, -0.01, 1.2, 42.0, f64::INFINITY, f64::NAN] {
            let percent = ingredient(value).confidence_percent();
            assert!(percent <= 100, "{} gave {}", value, percent);
        }
        assert_eq!(ingredient(7.5).confidence_percent(), 100);
        assert_eq!(ingredient(-1.0).confidence_percent(), 0);
    }

    #[test]
    fn test_detection_tolerates_missing_fields() {
        let detection: Detection = serde_json::from_str(r#"{"caption": "a bowl"}"#).unwrap();
        assert_eq!(detection.caption, "a bowl");
        assert!(detection.ingredients.is_empty());
    }
}
