use crate::models::api::{Ingredient, Instruction, Nutrition, Recipe};

const POPULAR_COUNT: usize = 2;

/// In-memory recipe source used by the search tab
#[derive(Debug, Clone)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// Recipes whose title or any ingredient name contains `query`, ignoring case.
    /// Results keep catalog order. A blank query matches every recipe; callers
    /// decide whether a blank search should run at all.
    pub fn search(&self, query: &str) -> Vec<Recipe> {
        let needle = query.trim().to_lowercase();
        let results: Vec<Recipe> = self
            .recipes
            .iter()
            .filter(|recipe| recipe.matches(&needle))
            .cloned()
            .collect();

        log::debug!("Search for {:?} matched {} recipes", needle, results.len());
        results
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    /// Featured recipes shown before the user has searched
    pub fn popular(&self) -> &[Recipe] {
        &self.recipes[..self.recipes.len().min(POPULAR_COUNT)]
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl Default for RecipeCatalog {
    fn default() -> Self {
        Self::new(vec![cheeseburger(), margherita_pizza(), caesar_salad()])
    }
}

fn ingredients(items: &[(&str, &str)]) -> Vec<Ingredient> {
    items
        .iter()
        .map(|(name, quantity)| Ingredient::new(*name, *quantity))
        .collect()
}

fn steps(texts: &[&str]) -> Vec<Instruction> {
    (1..)
        .zip(texts)
        .map(|(step, text)| Instruction {
            step,
            text: text.to_string(),
        })
        .collect()
}

fn cheeseburger() -> Recipe {
    Recipe {
        id: "1".to_string(),
        title: "Classic Cheeseburger".to_string(),
        image_url: "https://images.pexels.com/photos/1639557/pexels-photo-1639557.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=2".to_string(),
        cook_time: "30 min".to_string(),
        servings: 4,
        ingredients: ingredients(&[
            ("Ground beef", "1 lb"),
            ("Burger buns", "4"),
            ("Cheddar cheese", "4 slices"),
            ("Lettuce", "4 leaves"),
            ("Tomato", "1 medium"),
            ("Red onion", "1/2"),
            ("Ketchup", "4 tbsp"),
            ("Mustard", "2 tbsp"),
            ("Mayonnaise", "2 tbsp"),
            ("Salt and pepper", "to taste"),
        ]),
        instructions: steps(&[
            "Divide ground beef into 4 equal portions and form into patties.",
            "Season patties with salt and pepper on both sides.",
            "Heat grill or skillet over medium-high heat.",
            "Cook patties for 3-4 minutes per side for medium doneness.",
            "Add cheese slices on top of patties in the last minute of cooking to melt.",
            "Toast burger buns lightly if desired.",
            "Spread mayo on bottom bun, add lettuce, tomato, and onion.",
            "Place cheeseburger patty on top of vegetables.",
            "Add ketchup and mustard to the top bun, and complete the burger.",
        ]),
        nutrition: Nutrition {
            calories: 520.0,
            protein: 30.0,
            carbs: 35.0,
            fat: 28.0,
        },
        is_favorite: false,
    }
}

fn margherita_pizza() -> Recipe {
    Recipe {
        id: "2".to_string(),
        title: "Homemade Margherita Pizza".to_string(),
        image_url: "https://images.pexels.com/photos/1146760/pexels-photo-1146760.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=2".to_string(),
        cook_time: "45 min".to_string(),
        servings: 2,
        ingredients: ingredients(&[
            ("Pizza dough", "1 lb"),
            ("San Marzano tomatoes", "1 can (14 oz)"),
            ("Fresh mozzarella", "8 oz"),
            ("Fresh basil leaves", "1/4 cup"),
            ("Olive oil", "2 tbsp"),
            ("Garlic", "2 cloves"),
            ("Salt", "1/2 tsp"),
            ("Red pepper flakes", "1/4 tsp (optional)"),
        ]),
        instructions: steps(&[
            "Preheat oven to 500°F (260°C) with a pizza stone if available.",
            "Crush tomatoes by hand and mix with minced garlic, 1 tbsp olive oil, and salt.",
            "Stretch or roll pizza dough to desired thickness (about 12 inches for 2 people).",
            "Transfer dough to a pizza peel or baking sheet dusted with cornmeal.",
            "Spread tomato sauce evenly over dough, leaving a small border for the crust.",
            "Tear mozzarella into pieces and distribute evenly over the sauce.",
            "Bake for 10-12 minutes or until crust is golden and cheese is bubbling.",
            "Remove from oven, sprinkle with fresh basil leaves and remaining olive oil.",
            "Add red pepper flakes if desired, slice and serve immediately.",
        ]),
        nutrition: Nutrition {
            calories: 420.0,
            protein: 18.0,
            carbs: 48.0,
            fat: 19.0,
        },
        is_favorite: false,
    }
}

fn caesar_salad() -> Recipe {
    Recipe {
        id: "3".to_string(),
        title: "Chicken Caesar Salad".to_string(),
        image_url: "https://images.pexels.com/photos/1211887/pexels-photo-1211887.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=2".to_string(),
        cook_time: "25 min".to_string(),
        servings: 2,
        ingredients: ingredients(&[
            ("Chicken breast", "1 lb"),
            ("Romaine lettuce", "1 head"),
            ("Parmesan cheese", "1/3 cup, grated"),
            ("Croutons", "1 cup"),
            ("Egg yolks", "2"),
            ("Garlic", "2 cloves"),
            ("Dijon mustard", "1 tsp"),
            ("Anchovy paste", "1 tsp"),
            ("Lemon juice", "2 tbsp"),
            ("Olive oil", "1/2 cup"),
            ("Salt and pepper", "to taste"),
        ]),
        instructions: steps(&[
            "Season chicken breasts with salt and pepper.",
            "Grill or pan-sear chicken until cooked through (165°F internal temp).",
            "Let chicken rest for 5 minutes, then slice into strips.",
            "Wash and dry romaine lettuce, tear into bite-sized pieces.",
            "For dressing: blend egg yolks, garlic, mustard, anchovy paste, and lemon juice.",
            "Slowly drizzle in olive oil while blending to emulsify dressing.",
            "Season dressing with salt and pepper to taste.",
            "Toss lettuce with enough dressing to coat leaves.",
            "Add chicken, croutons, and most of the Parmesan cheese.",
            "Serve with remaining Parmesan sprinkled on top.",
        ]),
        nutrition: Nutrition {
            calories: 380.0,
            protein: 35.0,
            carbs: 12.0,
            fat: 22.0,
        },
        is_favorite: false,
    }
}
