use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::schema::recipes;

/// A stored recipe document.
///
/// Field order matches the `recipes` table so boxed queries can load it
/// without an explicit select clause.
#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Serialize, ToSchema)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub cuisine: String,
    pub rating: f64,
    /// Total preparation time in minutes
    pub total_time: i32,
    pub servings: i32,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of a create request. Missing fields fall back to empty/zero values.
#[derive(Insertable, Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[diesel(table_name = recipes)]
#[serde(default, rename_all = "camelCase")]
pub struct NewRecipe {
    pub name: String,
    pub cuisine: String,
    pub rating: f64,
    pub total_time: i32,
    pub servings: i32,
    pub description: String,
}

/// Body of an update request. Only the fields present are changed.
#[derive(AsChangeset, Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[diesel(table_name = recipes)]
#[serde(rename_all = "camelCase")]
pub struct RecipeChanges {
    pub name: Option<String>,
    pub cuisine: Option<String>,
    pub rating: Option<f64>,
    pub total_time: Option<i32>,
    pub servings: Option<i32>,
    pub description: Option<String>,
}

impl Recipe {
    /// Materialize a new document with a freshly assigned id.
    pub fn from_new(id: Uuid, new: &NewRecipe, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name.clone(),
            cuisine: new.cuisine.clone(),
            rating: new.rating,
            total_time: new.total_time,
            servings: new.servings,
            description: new.description.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl RecipeChanges {
    /// Merge the present fields into `recipe`, bumping `updated_at`.
    pub fn apply(&self, recipe: &mut Recipe, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            recipe.name = name.clone();
        }
        if let Some(cuisine) = &self.cuisine {
            recipe.cuisine = cuisine.clone();
        }
        if let Some(rating) = self.rating {
            recipe.rating = rating;
        }
        if let Some(total_time) = self.total_time {
            recipe.total_time = total_time;
        }
        if let Some(servings) = self.servings {
            recipe.servings = servings;
        }
        if let Some(description) = &self.description {
            recipe.description = description.clone();
        }
        recipe.updated_at = now;
    }
}
