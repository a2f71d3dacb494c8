use anyhow::{Context, Result};
use serde_json::json;

use crate::client::RecipeClient;

struct SeedRecipe {
    name: &'static str,
    cuisine: &'static str,
    rating: f64,
    total_time: i32,
    servings: i32,
    description: &'static str,
}

const SAMPLE_RECIPES: &[SeedRecipe] = &[
    SeedRecipe {
        name: "Classic Spaghetti Carbonara",
        cuisine: "Italian",
        rating: 4.7,
        total_time: 25,
        servings: 4,
        description: "A rich and creamy pasta with eggs, Pecorino Romano, and guanciale.",
    },
    SeedRecipe {
        name: "Chicken Tikka Masala",
        cuisine: "Indian",
        rating: 4.8,
        total_time: 150,
        servings: 6,
        description: "Charred marinated chicken in a creamy, spiced tomato sauce.",
    },
    SeedRecipe {
        name: "Masala Dosa",
        cuisine: "South Indian",
        rating: 4.6,
        total_time: 60,
        servings: 4,
        description: "Crisp fermented rice crepes filled with spiced potato.",
    },
    SeedRecipe {
        name: "Street Tacos al Pastor",
        cuisine: "Mexican",
        rating: 4.5,
        total_time: 90,
        servings: 6,
        description: "Chile-marinated pork with pineapple on warm corn tortillas.",
    },
    SeedRecipe {
        name: "Mushroom Risotto",
        cuisine: "Italian",
        rating: 4.3,
        total_time: 45,
        servings: 4,
        description: "Slow-stirred arborio rice with porcini and parmesan.",
    },
    SeedRecipe {
        name: "Greek Salad",
        cuisine: "Greek",
        rating: 4.1,
        total_time: 15,
        servings: 2,
        description: "Tomatoes, cucumber, olives, and feta with oregano and olive oil.",
    },
    SeedRecipe {
        name: "Garlic Butter Shrimp",
        cuisine: "American",
        rating: 4.4,
        total_time: 20,
        servings: 3,
        description: "Shrimp seared in butter with garlic, lemon, and parsley.",
    },
    SeedRecipe {
        name: "Overnight Oats",
        cuisine: "American",
        rating: 3.9,
        total_time: 5,
        servings: 1,
        description: "Rolled oats soaked overnight in milk with chia and berries.",
    },
];

/// Insert the sample recipes through the API, returning how many were created.
pub async fn seed(client: &RecipeClient) -> Result<usize> {
    for recipe in SAMPLE_RECIPES {
        let body = json!({
            "name": recipe.name,
            "cuisine": recipe.cuisine,
            "rating": recipe.rating,
            "totalTime": recipe.total_time,
            "servings": recipe.servings,
            "description": recipe.description,
        });
        let response = client
            .create(&body)
            .await
            .with_context(|| format!("Failed to create recipe: {}", recipe.name))?;
        let id = response.get("id").and_then(|v| v.as_str()).unwrap_or("?");
        println!("Created {} ({id})", recipe.name);
    }

    Ok(SAMPLE_RECIPES.len())
}
