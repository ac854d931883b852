use sqlx::SqlitePool;

use crate::error::{Result, SousChefError};
use crate::models::api::{Ingredient, ShoppingListItem, ShoppingListItemUpdate};
use crate::storage::{SHOPPING_LIST_KEY, load_json, store_json};

/// Merge `new_items` into `existing`, combining entries whose names match ignoring case.
///
/// A match keeps its name and quantity and gains the new item's recipe title as
/// extra provenance ("Recipe A, Recipe B"). Items appended earlier in the same
/// batch are matched too.
pub fn merge_ingredients(
    existing: &mut Vec<ShoppingListItem>,
    new_items: impl IntoIterator<Item = ShoppingListItem>,
) {
    for new_item in new_items {
        let needle = new_item.name().to_lowercase();
        match existing
            .iter_mut()
            .find(|item| item.name().to_lowercase() == needle)
        {
            Some(item) => {
                item.recipe_title = format!("{}, {}", item.recipe_title, new_item.recipe_title);
            }
            None => existing.push(new_item),
        }
    }
}

async fn load_list(pool: &SqlitePool) -> Result<Vec<ShoppingListItem>> {
    let list: Option<Vec<ShoppingListItem>> = load_json(pool, SHOPPING_LIST_KEY).await?;
    Ok(list.unwrap_or_default())
}

async fn merge_into_list(
    pool: &SqlitePool,
    ingredients: &[Ingredient],
    recipe_title: &str,
) -> Result<()> {
    let mut list = load_list(pool).await?;
    merge_ingredients(
        &mut list,
        ingredients
            .iter()
            .map(|ingredient| ShoppingListItem::new(ingredient.clone(), recipe_title)),
    );
    store_json(pool, SHOPPING_LIST_KEY, &list).await
}

async fn update_in_list(
    pool: &SqlitePool,
    index: usize,
    update: impl FnOnce(&mut ShoppingListItem),
) -> Result<ShoppingListItem> {
    let mut list = load_list(pool).await?;
    let len = list.len();
    let item = list
        .get_mut(index)
        .ok_or(SousChefError::ShoppingItemOutOfRange { index, len })?;
    update(item);
    let updated = item.clone();

    store_json(pool, SHOPPING_LIST_KEY, &list).await?;
    Ok(updated)
}

/// Add a recipe's ingredients to the shopping list
pub async fn add_to_shopping_list(
    pool: &SqlitePool,
    ingredients: &[Ingredient],
    recipe_title: &str,
) -> Result<()> {
    merge_into_list(pool, ingredients, recipe_title)
        .await
        .inspect_err(|e| log::error!("Error adding to shopping list: {}", e))?;

    log::info!(
        "Added {} ingredients from {} to shopping list",
        ingredients.len(),
        recipe_title
    );
    Ok(())
}

/// Get the shopping list in insertion order
/// Storage failures are logged and read as an empty list
pub async fn get_shopping_list(pool: &SqlitePool) -> Vec<ShoppingListItem> {
    load_list(pool).await.unwrap_or_else(|e| {
        log::error!("Error getting shopping list: {}", e);
        Vec::new()
    })
}

/// Overwrite the fields present in `update` on the item at `index`
/// Returns the updated item
pub async fn update_shopping_list_item(
    pool: &SqlitePool,
    index: usize,
    update: &ShoppingListItemUpdate,
) -> Result<ShoppingListItem> {
    update_in_list(pool, index, |item| item.apply(update))
        .await
        .inspect_err(|e| log::error!("Error updating shopping list item: {}", e))
}

/// Flip the checked state of the item at `index` and persist it
pub async fn toggle_shopping_list_item(pool: &SqlitePool, index: usize) -> Result<ShoppingListItem> {
    let item = update_in_list(pool, index, |item| item.checked = !item.checked)
        .await
        .inspect_err(|e| log::error!("Error toggling shopping list item: {}", e))?;

    log::debug!("Shopping list item {} checked: {}", index, item.checked);
    Ok(item)
}

pub async fn clear_shopping_list(pool: &SqlitePool) -> Result<()> {
    store_json::<[ShoppingListItem]>(pool, SHOPPING_LIST_KEY, &[])
        .await
        .inspect_err(|e| log::error!("Error clearing shopping list: {}", e))?;

    log::info!("Cleared shopping list");
    Ok(())
}
