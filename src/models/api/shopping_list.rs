use std::fmt;

use serde::{Deserialize, Serialize};

use super::Ingredient;

/// An ingredient on the shopping list, with the recipe(s) it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    #[serde(flatten)]
    pub ingredient: Ingredient,
    /// Comma-joined titles of every recipe that contributed this ingredient
    pub recipe_title: String,
    #[serde(default)]
    pub checked: bool,
}

/// Fields to overwrite on an existing shopping list item. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoppingListItemUpdate {
    pub name: Option<String>,
    pub quantity: Option<String>,
    pub recipe_title: Option<String>,
    pub checked: Option<bool>,
}

impl ShoppingListItem {
    pub fn new(ingredient: Ingredient, recipe_title: impl Into<String>) -> Self {
        Self {
            ingredient,
            recipe_title: recipe_title.into(),
            checked: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.ingredient.name
    }

    pub fn quantity(&self) -> &str {
        &self.ingredient.quantity
    }

    /// Shallow overwrite of every field present in `update`
    pub fn apply(&mut self, update: &ShoppingListItemUpdate) {
        if let Some(name) = &update.name {
            self.ingredient.name = name.clone();
        }
        if let Some(quantity) = &update.quantity {
            self.ingredient.quantity = quantity.clone();
        }
        if let Some(recipe_title) = &update.recipe_title {
            self.recipe_title = recipe_title.clone();
        }
        if let Some(checked) = update.checked {
            self.checked = checked;
        }
    }
}

impl fmt::Display for ShoppingListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            self.ingredient.name, self.ingredient.quantity, self.recipe_title
        )
    }
}

impl ShoppingListItemUpdate {
    pub fn checked(checked: bool) -> Self {
        Self {
            checked: Some(checked),
            ..Self::default()
        }
    }
}
