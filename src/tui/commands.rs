use sqlx::SqlitePool;

use super::app::{RecipeApp, StoreCommand};
use crate::controllers::{
    add_to_shopping_list, clear_shopping_list, get_saved_recipes, get_shopping_list,
    remove_recipe, save_recipe, toggle_shopping_list_item,
};
use crate::error::Result;

const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

/// Status line text for a command that succeeded, if any
async fn run(pool: &SqlitePool, command: &StoreCommand) -> Result<Option<String>> {
    let status = match command {
        StoreCommand::SaveRecipe(recipe) => {
            save_recipe(pool, recipe).await?;
            Some(format!("Saved {}", recipe.title))
        }
        StoreCommand::RemoveRecipe(recipe_id) => {
            remove_recipe(pool, recipe_id).await?;
            Some("Removed from saved recipes".to_string())
        }
        StoreCommand::AddToShoppingList {
            ingredients,
            recipe_title,
        } => {
            add_to_shopping_list(pool, ingredients, recipe_title).await?;
            Some(format!(
                "Added {} ingredients from {} to your shopping list",
                ingredients.len(),
                recipe_title
            ))
        }
        StoreCommand::ToggleShoppingItem(index) => {
            toggle_shopping_list_item(pool, *index).await?;
            None
        }
        StoreCommand::ClearShoppingList => {
            clear_shopping_list(pool).await?;
            Some("Shopping list cleared".to_string())
        }
    };

    Ok(status)
}

/// Run `command` against storage, then reload both collections into the app.
/// Failures are shown to the user as a generic message.
pub async fn execute(pool: &SqlitePool, app: &mut RecipeApp, command: StoreCommand) {
    match run(pool, &command).await {
        Ok(Some(status)) => app.set_status(status),
        Ok(None) => {}
        Err(e) => {
            log::error!("Store command {:?} failed: {}", command, e);
            app.set_status(GENERIC_ERROR);
        }
    }

    app.refresh(get_saved_recipes(pool).await, get_shopping_list(pool).await);
}
