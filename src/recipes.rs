//! Turning generated text into recipe records.

use log::{debug, info};

use crate::error::SnapError;
use crate::model::{Ingredient, RecipeRecord};
use crate::providers::RecipeProvider;

/// Token that starts a recipe block in generated text. Case-sensitive.
pub const RECIPE_MARKER: &str = "Recipe";

/// Asks `provider` for recipes and parses the answer.
///
/// Fails with `EmptyInput` before any request is made when there are no
/// ingredients.
pub async fn generate_recipes(
    provider: &dyn RecipeProvider,
    ingredients: &[Ingredient],
    caption: &str,
) -> Result<Vec<RecipeRecord>, SnapError> {
    if ingredients.is_empty() {
        return Err(SnapError::EmptyInput);
    }

    debug!(
        "Requesting recipes from {} for {} ingredients",
        provider.provider_name(),
        ingredients.len()
    );
    let text = provider.generate(ingredients, caption).await?;
    let recipes = parse_recipe_text(&text);
    info!("Parsed {} recipes", recipes.len());

    Ok(recipes)
}

/// Splits generated text into recipes.
///
/// Grammar: the text is cut at every occurrence of [`RECIPE_MARKER`]. Text
/// before the first marker is a preamble and is dropped; without any marker
/// the whole text is one block. Blank blocks are skipped. Within a block,
/// blank lines are ignored; the first line names the recipe when it has a
/// colon (the text after the first colon, trimmed), otherwise the recipe is
/// called `Recipe <n>` counting from 1 over the kept blocks. The remaining
/// lines are the content.
///
/// The marker also matches inside longer words, so a heading such as
/// `Recipes for you:` opens a block of its own and produces a record with an
/// empty name and content ahead of the real recipes.
pub fn parse_recipe_text(text: &str) -> Vec<RecipeRecord> {
    let mut blocks = text.split(RECIPE_MARKER);
    if text.contains(RECIPE_MARKER) {
        blocks.next();
    }

    blocks
        .filter(|block| !block.trim().is_empty())
        .enumerate()
        .map(|(index, block)| parse_block(index, block))
        .collect()
}

fn parse_block(index: usize, block: &str) -> RecipeRecord {
    let mut lines = block.lines().filter(|line| !line.trim().is_empty());

    let name = match lines.next().and_then(|first| first.split_once(':')) {
        Some((_, name)) => name.trim().to_string(),
        None => format!("Recipe {}", index + 1),
    };
    let content = lines.collect::<Vec<_>>().join("\n");

    RecipeRecord { name, content }
}
