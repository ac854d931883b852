use serde::{Deserialize, Serialize};

use crate::scaling::adjusted_quantity;

/// Complete recipe as shown in the catalog and persisted in the saved-recipes document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub cook_time: String,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
    #[serde(flatten)]
    pub nutrition: Nutrition,
    #[serde(default)]
    pub is_favorite: bool,
}

/// A named food item with a free-text quantity such as "1 lb" or "to taste"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub step: u32,
    pub text: String,
}

/// Per-serving nutrition facts. Stored inline with the recipe fields.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
        }
    }
}

impl Recipe {
    /// Ingredients with quantities adjusted from the recipe's own servings to `servings`
    pub fn scaled_ingredients(&self, servings: u32) -> Vec<Ingredient> {
        self.ingredients
            .iter()
            .map(|ingredient| Ingredient {
                name: ingredient.name.clone(),
                quantity: adjusted_quantity(&ingredient.quantity, self.servings, servings),
            })
            .collect()
    }

    /// True if the lowercased `needle` occurs in the title or any ingredient name
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .ingredients
                .iter()
                .any(|ingredient| ingredient.name.to_lowercase().contains(needle))
    }
}
