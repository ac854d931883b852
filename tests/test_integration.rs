use souschef::catalog::RecipeCatalog;
use souschef::controllers::{
    add_to_shopping_list, clear_shopping_list, get_saved_recipes, get_shopping_list,
    is_recipe_saved, remove_recipe, save_recipe, toggle_shopping_list_item,
};
use souschef::models::api::Ingredient;
use souschef::storage::{SAVED_RECIPES_KEY, SHOPPING_LIST_KEY, get_item};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

async fn test_pool() -> SqlitePool {
    // Create an in-memory database with migrations
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

#[tokio::test]
async fn test_search_save_and_remove_favorites() {
    let pool = test_pool().await;
    let catalog = RecipeCatalog::default();

    // Search by ingredient
    let results = catalog.search("mozzarella");
    assert_eq!(results.len(), 1);
    let pizza = &results[0];
    assert_eq!(pizza.title, "Homemade Margherita Pizza");
    assert!(!pizza.is_favorite);

    save_recipe(&pool, pizza)
        .await
        .expect("Failed to save pizza");
    save_recipe(&pool, pizza)
        .await
        .expect("Failed to save pizza again");

    let saved = get_saved_recipes(&pool).await;
    assert_eq!(saved.len(), 1);
    assert!(saved[0].is_favorite);
    assert!(is_recipe_saved(&pool, &pizza.id).await);

    // Persisted as a plain camelCase JSON array
    let raw = get_item(&pool, SAVED_RECIPES_KEY)
        .await
        .expect("Failed to read raw document")
        .expect("Saved recipes document should exist");
    let document: serde_json::Value =
        serde_json::from_str(&raw).expect("Saved recipes should be valid JSON");
    assert_eq!(document[0]["id"], "2");
    assert_eq!(document[0]["isFavorite"], true);
    assert_eq!(document[0]["servings"], 2);

    remove_recipe(&pool, &pizza.id)
        .await
        .expect("Failed to remove pizza");
    remove_recipe(&pool, &pizza.id)
        .await
        .expect("Removing twice should be a no-op");

    assert!(get_saved_recipes(&pool).await.is_empty());
    assert!(!is_recipe_saved(&pool, &pizza.id).await);
}

#[tokio::test]
async fn test_shopping_list_from_two_recipes() {
    let pool = test_pool().await;
    let catalog = RecipeCatalog::default();

    let pizza = catalog.get_by_id("2").expect("Pizza should exist");
    let salad = catalog.get_by_id("3").expect("Salad should exist");

    // Pizza for 4 instead of 2
    add_to_shopping_list(&pool, &pizza.scaled_ingredients(4), &pizza.title)
        .await
        .expect("Failed to add pizza ingredients");
    add_to_shopping_list(&pool, &salad.ingredients, &salad.title)
        .await
        .expect("Failed to add salad ingredients");

    let list = get_shopping_list(&pool).await;

    // 8 pizza ingredients + 11 salad ingredients, Garlic and Olive oil shared
    assert_eq!(list.len(), 17);

    let dough = &list[0];
    assert_eq!(dough.name(), "Pizza dough");
    assert_eq!(dough.quantity(), "2 lb");
    assert_eq!(dough.recipe_title, "Homemade Margherita Pizza");

    let garlic = list
        .iter()
        .find(|item| item.name() == "Garlic")
        .expect("Garlic should be on the list");
    assert_eq!(garlic.quantity(), "4 cloves");
    assert_eq!(
        garlic.recipe_title,
        "Homemade Margherita Pizza, Chicken Caesar Salad"
    );

    let chicken = list
        .iter()
        .position(|item| item.name() == "Chicken breast")
        .expect("Chicken should be on the list");
    let toggled = toggle_shopping_list_item(&pool, chicken)
        .await
        .expect("Failed to toggle chicken");
    assert!(toggled.checked);
    assert!(get_shopping_list(&pool).await[chicken].checked);

    clear_shopping_list(&pool)
        .await
        .expect("Failed to clear shopping list");
    assert!(get_shopping_list(&pool).await.is_empty());

    // Clearing writes an empty document rather than deleting it
    let raw = get_item(&pool, SHOPPING_LIST_KEY)
        .await
        .expect("Failed to read raw document");
    assert_eq!(raw.as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_provenance_merge_leaves_quantity() {
    let pool = test_pool().await;

    add_to_shopping_list(&pool, &[Ingredient::new("Salt", "1 tsp")], "Recipe A")
        .await
        .expect("Failed to add Recipe A");
    add_to_shopping_list(&pool, &[Ingredient::new("salt", "2 tsp")], "Recipe B")
        .await
        .expect("Failed to add Recipe B");

    let list = get_shopping_list(&pool).await;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name(), "Salt");
    assert_eq!(list[0].quantity(), "1 tsp");
    assert_eq!(list[0].recipe_title, "Recipe A, Recipe B");
    assert!(!list[0].checked);
}
