//! Persistence gateway for the recipe collection.
//!
//! [`RecipeStore`] is the seam between the HTTP layer and storage. Every
//! operation is synchronous and performs exactly one round trip to the
//! backing store; there is no caching and nothing is retried.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewRecipe, Recipe, RecipeChanges};

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Recipe store unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Query failed: {0}")]
    Query(#[from] diesel::result::Error),
}

/// Text fields that can be matched exactly or searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Cuisine,
    Description,
}

/// Fields a ranking query can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Rating,
    TotalTime,
    Servings,
    CreatedAt,
}

/// Operations over the recipe collection.
///
/// Implementations must be safe to share across request handlers.
pub trait RecipeStore: Send + Sync + fmt::Debug {
    /// All recipes, oldest first.
    fn find_all(&self) -> Result<Vec<Recipe>, StoreError>;

    /// Recipes whose `field` equals `value` exactly.
    fn find_by_field(&self, field: TextField, value: &str) -> Result<Vec<Recipe>, StoreError>;

    /// At most `n` recipes ordered by `sort`. Ties keep creation order.
    fn find_top_n(
        &self,
        n: u32,
        sort: SortField,
        descending: bool,
    ) -> Result<Vec<Recipe>, StoreError>;

    /// Recipes whose `field` contains `query`, ignoring case. An empty query
    /// matches everything.
    fn find_by_substring(&self, field: TextField, query: &str)
        -> Result<Vec<Recipe>, StoreError>;

    /// Look up one recipe. `Ok(None)` when no document has this id.
    fn find_by_id(&self, id: &str) -> Result<Option<Recipe>, StoreError>;

    /// Persist a new recipe and return the id assigned to it.
    fn insert(&self, recipe: &NewRecipe) -> Result<Uuid, StoreError>;

    /// Merge `changes` into the recipe with this id. Returns the number of
    /// recipes touched; an unknown id is a no-op.
    fn update_by_id(&self, id: &str, changes: &RecipeChanges) -> Result<usize, StoreError>;

    /// Remove the recipe with this id. Returns the number removed.
    fn delete_by_id(&self, id: &str) -> Result<usize, StoreError>;
}

/// Parse a path-supplied recipe id.
pub fn parse_id(id: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(id).map_err(|_| StoreError::InvalidArgument(format!("Invalid recipe id: {id}")))
}

impl TextField {
    pub fn value(self, recipe: &Recipe) -> &str {
        match self {
            TextField::Name => &recipe.name,
            TextField::Cuisine => &recipe.cuisine,
            TextField::Description => &recipe.description,
        }
    }
}

impl SortField {
    /// Ascending comparison on this field.
    pub fn compare(self, a: &Recipe, b: &Recipe) -> Ordering {
        match self {
            SortField::Rating => a.rating.total_cmp(&b.rating),
            SortField::TotalTime => a.total_time.cmp(&b.total_time),
            SortField::Servings => a.servings.cmp(&b.servings),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}
