mod saved_recipes_controller;
mod shopping_list_controller;

pub use saved_recipes_controller::{get_saved_recipes, is_recipe_saved, remove_recipe, save_recipe};
pub use shopping_list_controller::{
    add_to_shopping_list, clear_shopping_list, get_shopping_list, merge_ingredients,
    toggle_shopping_list_item, update_shopping_list_item,
};
