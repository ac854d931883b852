use indexmap::IndexMap;
use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::api::Recipe;
use crate::storage::{SAVED_RECIPES_KEY, load_json, store_json};

/// Saved recipes keyed by id, in the order they were first saved
type SavedRecipes = IndexMap<String, Recipe>;

async fn load_saved(pool: &SqlitePool) -> Result<Option<SavedRecipes>> {
    let recipes: Option<Vec<Recipe>> = load_json(pool, SAVED_RECIPES_KEY).await?;

    Ok(recipes.map(|recipes| {
        recipes
            .into_iter()
            .map(|recipe| (recipe.id.clone(), recipe))
            .collect()
    }))
}

async fn store_saved(pool: &SqlitePool, saved: &SavedRecipes) -> Result<()> {
    let recipes: Vec<&Recipe> = saved.values().collect();
    store_json(pool, SAVED_RECIPES_KEY, &recipes).await
}

async fn upsert_saved(pool: &SqlitePool, recipe: &Recipe) -> Result<()> {
    let mut saved = load_saved(pool).await?.unwrap_or_default();
    saved.insert(
        recipe.id.clone(),
        Recipe {
            is_favorite: true,
            ..recipe.clone()
        },
    );
    store_saved(pool, &saved).await
}

/// Returns whether anything was removed
async fn delete_saved(pool: &SqlitePool, recipe_id: &str) -> Result<bool> {
    let Some(mut saved) = load_saved(pool).await? else {
        return Ok(false);
    };
    if saved.shift_remove(recipe_id).is_none() {
        return Ok(false);
    }
    store_saved(pool, &saved).await?;
    Ok(true)
}

/// Save a recipe to favorites
/// Replaces any saved recipe with the same id in place; the stored copy is always marked favorite
pub async fn save_recipe(pool: &SqlitePool, recipe: &Recipe) -> Result<()> {
    upsert_saved(pool, recipe)
        .await
        .inspect_err(|e| log::error!("Error saving recipe {}: {}", recipe.id, e))?;

    log::info!("Saved recipe {} ({})", recipe.id, recipe.title);
    Ok(())
}

/// Remove a recipe from favorites
/// Removing an id that was never saved leaves storage untouched
pub async fn remove_recipe(pool: &SqlitePool, recipe_id: &str) -> Result<()> {
    let removed = delete_saved(pool, recipe_id)
        .await
        .inspect_err(|e| log::error!("Error removing recipe {}: {}", recipe_id, e))?;

    if removed {
        log::info!("Removed saved recipe {}", recipe_id);
    } else {
        log::debug!("Recipe {} was not saved, nothing to remove", recipe_id);
    }
    Ok(())
}

/// Get all saved recipes
/// Storage failures are logged and read as an empty collection
pub async fn get_saved_recipes(pool: &SqlitePool) -> Vec<Recipe> {
    match load_saved(pool).await {
        Ok(saved) => saved.unwrap_or_default().into_values().collect(),
        Err(e) => {
            log::error!("Error getting saved recipes: {}", e);
            Vec::new()
        }
    }
}

pub async fn is_recipe_saved(pool: &SqlitePool, recipe_id: &str) -> bool {
    get_saved_recipes(pool)
        .await
        .iter()
        .any(|recipe| recipe.id == recipe_id)
}
