//! The capture → detect → generate state machine.
//!
//! [`PipelineController`] is the single owner of the view state. Work that
//! needs the network is handed out as jobs carrying a [`Ticket`]; results
//! come back through the `complete_*` entry points, and results for a
//! ticket older than the current capture are ignored.

mod session;

pub use session::Session;

use log::{debug, warn};
use std::fmt;
use std::sync::Arc;

use crate::error::SnapError;
use crate::model::{CapturedImage, Detection, Ingredient, RecipeRecord};

/// One of the three pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Capture,
    Detection,
    Generation,
}

impl Stage {
    /// Message shown when this stage fails for a reason without its own text
    pub fn failure_message(&self) -> &'static str {
        match self {
            Stage::Capture => "Failed to capture the image. Please try again.",
            Stage::Detection => "Failed to process the image. Please try again.",
            Stage::Generation => "Failed to generate recipes. Please try again.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Captured,
    Detecting,
    Detected,
    Generating,
    Generated,
    /// The stage that failed
    Error(Stage),
}

impl PipelineState {
    pub fn name(&self) -> &'static str {
        match self {
            PipelineState::Idle => "idle",
            PipelineState::Captured => "captured",
            PipelineState::Detecting => "detecting",
            PipelineState::Detected => "detected",
            PipelineState::Generating => "generating",
            PipelineState::Generated => "generated",
            PipelineState::Error(_) => "failed",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies the capture a job was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Detection work for the current image
#[derive(Debug, Clone)]
pub struct DetectionJob {
    pub ticket: Ticket,
    pub image: Arc<CapturedImage>,
}

/// Recipe generation work for the current detection result
#[derive(Debug, Clone)]
pub struct GenerationJob {
    pub ticket: Ticket,
    pub ingredients: Vec<Ingredient>,
    pub caption: String,
}

#[derive(Debug)]
pub struct PipelineController {
    state: PipelineState,
    image: Option<Arc<CapturedImage>>,
    caption: String,
    ingredients: Vec<Ingredient>,
    recipes: Vec<RecipeRecord>,
    error: Option<String>,
    generation: u64,
}

impl Default for PipelineController {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineController {
    pub fn new() -> Self {
        PipelineController {
            state: PipelineState::Idle,
            image: None,
            caption: String::new(),
            ingredients: Vec::new(),
            recipes: Vec::new(),
            error: None,
            generation: 0,
        }
    }

    /// Makes `image` the current image.
    ///
    /// Allowed from any state. Clears caption, ingredients, recipes and any
    /// error, then moves straight on to detection; the returned job must be
    /// run by the caller.
    pub fn capture(&mut self, image: CapturedImage) -> DetectionJob {
        self.generation += 1;
        let image = Arc::new(image);
        self.image = Some(Arc::clone(&image));
        self.caption.clear();
        self.ingredients.clear();
        self.recipes.clear();
        self.error = None;

        self.transition(PipelineState::Captured);
        self.transition(PipelineState::Detecting);

        DetectionJob {
            ticket: self.ticket(),
            image,
        }
    }

    /// Applies a detection result. Returns false when the result was
    /// dropped because it belongs to an older capture.
    pub fn complete_detection(
        &mut self,
        ticket: Ticket,
        result: Result<Detection, SnapError>,
    ) -> bool {
        if !self.accepts(ticket, PipelineState::Detecting) {
            return false;
        }

        match result {
            Ok(detection) => {
                self.caption = detection.caption;
                self.ingredients = detection.ingredients;
                self.transition(PipelineState::Detected);
            }
            Err(e) => self.fail(Stage::Detection, &e),
        }
        true
    }

    /// User asked for recipes.
    ///
    /// Only possible once detection found at least one ingredient; the state
    /// is left alone when the request is refused.
    pub fn request_generation(&mut self) -> Result<GenerationJob, SnapError> {
        if self.state != PipelineState::Detected {
            return Err(SnapError::InvalidTransition {
                action: "generate recipes",
                state: self.state.name(),
            });
        }
        if self.ingredients.is_empty() {
            return Err(SnapError::EmptyInput);
        }

        self.transition(PipelineState::Generating);
        Ok(GenerationJob {
            ticket: self.ticket(),
            ingredients: self.ingredients.clone(),
            caption: self.caption.clone(),
        })
    }

    /// Applies a generation result. Returns false when it was dropped.
    pub fn complete_generation(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<RecipeRecord>, SnapError>,
    ) -> bool {
        if !self.accepts(ticket, PipelineState::Generating) {
            return false;
        }

        match result {
            Ok(recipes) => {
                self.recipes = recipes;
                self.transition(PipelineState::Generated);
            }
            Err(e) => self.fail(Stage::Generation, &e),
        }
        true
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn image(&self) -> Option<&CapturedImage> {
        self.image.as_deref()
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn recipes(&self) -> &[RecipeRecord] {
        &self.recipes
    }

    /// User-facing message of the failed stage, kept until the next capture
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the generate trigger should be enabled
    pub fn can_generate(&self) -> bool {
        self.state == PipelineState::Detected && !self.ingredients.is_empty()
    }

    /// Whether a request is outstanding
    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            PipelineState::Detecting | PipelineState::Generating
        )
    }

    fn ticket(&self) -> Ticket {
        Ticket(self.generation)
    }

    fn accepts(&self, ticket: Ticket, expected: PipelineState) -> bool {
        if ticket != self.ticket() {
            debug!(
                "Dropping stale result for capture {} (current {})",
                ticket.0, self.generation
            );
            return false;
        }
        if self.state != expected {
            debug!(
                "Dropping result while {} (expected {})",
                self.state, expected
            );
            return false;
        }
        true
    }

    fn fail(&mut self, stage: Stage, err: &SnapError) {
        warn!("{:?} failed: {}", stage, err);
        self.error = Some(err.user_message(stage));
        self.transition(PipelineState::Error(stage));
    }

    fn transition(&mut self, to: PipelineState) {
        debug!("pipeline: {} -> {}", self.state, to);
        self.state = to;
    }
}
