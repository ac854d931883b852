mod recipe;
mod shopping_list;

pub use recipe::{Ingredient, Instruction, Nutrition, Recipe};
pub use shopping_list::{ShoppingListItem, ShoppingListItemUpdate};
