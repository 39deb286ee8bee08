use crate::model::Ingredient;

/// Ingredient names joined for a prompt, e.g. "banana, apple"
pub fn format_ingredients(ingredients: &[Ingredient]) -> String {
    ingredients
        .iter()
        .map(|ingredient| ingredient.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the recipe request sent to a text-generation model.
pub fn build_recipe_prompt(ingredients: &[Ingredient], caption: &str) -> String {
    let mut prompt = format!(
        "I have the following ingredients: {}.\n",
        format_ingredients(ingredients)
    );
    let caption = caption.trim();
    if !caption.is_empty() {
        prompt.push_str(&format!("The image shows: {}.\n", caption));
    }
    prompt.push_str(
        "Please suggest 3 delicious recipes I can make with these ingredients.\n\
         For each recipe, provide:\n\
         1. Recipe name\n\
         2. Ingredients list (including quantities)\n\
         3. Step-by-step cooking instructions\n\
         4. Approximate cooking time\n\
         5. Difficulty level (Easy, Medium, Hard)\n",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredients() -> Vec<Ingredient> {
        vec![
            Ingredient {
                name: "banana".to_string(),
                confidence: 0.9,
            },
            Ingredient {
                name: "apple".to_string(),
                confidence: 0.6,
            },
        ]
    }

    #[test]
    fn test_format_ingredients() {
        assert_eq!(format_ingredients(&ingredients()), "banana, apple");
        assert_eq!(format_ingredients(&[]), "");
    }

    #[test]
    fn test_prompt_with_caption() {
        let prompt = build_recipe_prompt(&ingredients(), "a bowl of fruit");
        assert!(prompt.starts_with("I have the following ingredients: banana, apple.\n"));
        assert!(prompt.contains("The image shows: a bowl of fruit.\n"));
        assert!(prompt.contains("suggest 3 delicious recipes"));
        assert!(prompt.contains("5. Difficulty level (Easy, Medium, Hard)"));
    }

    #[test]
    fn test_prompt_without_caption() {
        let prompt = build_recipe_prompt(&ingredients(), "  ");
        assert!(!prompt.contains("The image shows"));
    }
}
