//! Plain-text rendering of the pipeline state.

use std::fmt::Write;

use crate::pipeline::{PipelineController, PipelineState, Stage};

/// Renders the detection and recipe panels for the current state.
///
/// Panels follow the pipeline gating: nothing is shown before a capture, and
/// the recipe panel only appears once ingredients exist.
pub fn render(controller: &PipelineController) -> String {
    let mut out = String::new();
    let Some(image) = controller.image() else {
        out.push_str("Take a photo or upload an image of your ingredients.\n");
        return out;
    };

    let _ = writeln!(out, "Image: {}", summarize_ref(&image.display_ref));
    render_detection(controller, &mut out);

    if !controller.ingredients().is_empty() {
        out.push('\n');
        render_recipes(controller, &mut out);
    }
    out
}

fn render_detection(controller: &PipelineController, out: &mut String) {
    out.push_str("\n== Detected Ingredients ==\n");
    match controller.state() {
        PipelineState::Captured | PipelineState::Detecting => {
            out.push_str("Analyzing your ingredients...\n");
            return;
        }
        PipelineState::Error(Stage::Detection) => {
            let _ = writeln!(out, "Error: {}", controller.error().unwrap_or_default());
            return;
        }
        _ => {}
    }

    if !controller.caption().is_empty() {
        let _ = writeln!(out, "Image Description: {}", controller.caption());
    }
    if controller.ingredients().is_empty() {
        out.push_str("No ingredients detected. Try another image or angle.\n");
        return;
    }
    out.push_str("Detected Items:\n");
    for ingredient in controller.ingredients() {
        let _ = writeln!(
            out,
            "  - {} (Confidence: {}%)",
            ingredient.name,
            ingredient.confidence_percent()
        );
    }
}

fn render_recipes(controller: &PipelineController, out: &mut String) {
    out.push_str("== Recipe Recommendations ==\n");
    match controller.state() {
        PipelineState::Generating => out.push_str("Generating delicious recipes...\n"),
        PipelineState::Error(Stage::Generation) => {
            let _ = writeln!(out, "Error: {}", controller.error().unwrap_or_default());
        }
        PipelineState::Generated if controller.recipes().is_empty() => {
            out.push_str("The model did not return any recipes.\n");
        }
        PipelineState::Generated => {
            for recipe in controller.recipes() {
                let _ = writeln!(out, "\n# {}\n{}", recipe.name, recipe.content);
            }
        }
        _ => out.push_str("Ready to generate recipe recommendations for these ingredients.\n"),
    }
}

// Data URLs are long; only their header is worth printing
fn summarize_ref(display_ref: &str) -> &str {
    match display_ref.split_once(',') {
        Some((header, _)) if display_ref.starts_with("data:") => header,
        _ => display_ref,
    }
}
