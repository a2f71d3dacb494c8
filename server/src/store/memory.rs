//! In-process recipe store.
//!
//! Holds documents in insertion order behind a `RwLock`. Used for local runs
//! (`RECIPE_STORE=memory`) and as the store behind the HTTP tests.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use uuid::Uuid;

use super::{parse_id, RecipeStore, SortField, StoreError, TextField};
use crate::models::{NewRecipe, Recipe, RecipeChanges};

#[derive(Debug, Default)]
pub struct MemoryStore {
    recipes: RwLock<Vec<Recipe>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Recipe>>, StoreError> {
        self.recipes
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Recipe>>, StoreError> {
        self.recipes
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl RecipeStore for MemoryStore {
    fn find_all(&self) -> Result<Vec<Recipe>, StoreError> {
        Ok(self.read()?.clone())
    }

    fn find_by_field(&self, field: TextField, value: &str) -> Result<Vec<Recipe>, StoreError> {
        Ok(self
            .read()?
            .iter()
            .filter(|r| field.value(r) == value)
            .cloned()
            .collect())
    }

    fn find_top_n(
        &self,
        n: u32,
        sort: SortField,
        descending: bool,
    ) -> Result<Vec<Recipe>, StoreError> {
        let mut recipes = self.read()?.clone();
        // Stable sort, so ties stay in insertion order either way
        recipes.sort_by(|a, b| {
            let ord = sort.compare(a, b);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
        recipes.truncate(n as usize);
        Ok(recipes)
    }

    fn find_by_substring(
        &self,
        field: TextField,
        query: &str,
    ) -> Result<Vec<Recipe>, StoreError> {
        let needle = query.to_lowercase();
        Ok(self
            .read()?
            .iter()
            .filter(|r| field.value(r).to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        let id = parse_id(id)?;
        Ok(self.read()?.iter().find(|r| r.id == id).cloned())
    }

    fn insert(&self, recipe: &NewRecipe) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        self.write()?.push(Recipe::from_new(id, recipe, Utc::now()));
        Ok(id)
    }

    fn update_by_id(&self, id: &str, changes: &RecipeChanges) -> Result<usize, StoreError> {
        let id = parse_id(id)?;
        let mut recipes = self.write()?;
        match recipes.iter_mut().find(|r| r.id == id) {
            Some(recipe) => {
                changes.apply(recipe, Utc::now());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_by_id(&self, id: &str) -> Result<usize, StoreError> {
        let id = parse_id(id)?;
        let mut recipes = self.write()?;
        let before = recipes.len();
        recipes.retain(|r| r.id != id);
        Ok(before - recipes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(name: &str, cuisine: &str, rating: f64) -> NewRecipe {
        NewRecipe {
            name: name.to_string(),
            cuisine: cuisine.to_string(),
            rating,
            total_time: 30,
            servings: 4,
            description: format!("{name} description"),
        }
    }

    #[test]
    fn test_insert_then_find_by_id() {
        let store = MemoryStore::new();
        let new = recipe("Soup", "French", 4.5);
        let id = store.insert(&new).unwrap();

        let found = store.find_by_id(&id.to_string()).unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.name, new.name);
        assert_eq!(found.cuisine, new.cuisine);
        assert_eq!(found.rating, new.rating);
        assert_eq!(found.total_time, new.total_time);
        assert_eq!(found.servings, new.servings);
        assert_eq!(found.description, new.description);
    }

    #[test]
    fn test_insert_assigns_unique_ids() {
        let store = MemoryStore::new();
        let a = store.insert(&recipe("Soup", "French", 4.5)).unwrap();
        let b = store.insert(&recipe("Soup", "French", 4.5)).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.find_all().unwrap().len(), 2);
    }

    #[test]
    fn test_find_by_id_missing_is_none() {
        let store = MemoryStore::new();
        let found = store.find_by_id(&Uuid::new_v4().to_string()).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_find_by_id_malformed_is_invalid_argument() {
        let store = MemoryStore::new();
        let err = store.find_by_id("not-a-uuid").unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument(_)));
    }

    #[test]
    fn test_find_by_field_is_exact() {
        let store = MemoryStore::new();
        store.insert(&recipe("Soup", "French", 4.5)).unwrap();
        store.insert(&recipe("Curry", "Indian", 4.0)).unwrap();
        store.insert(&recipe("Crepe", "French", 3.5)).unwrap();

        let french = store.find_by_field(TextField::Cuisine, "French").unwrap();
        let names: Vec<_> = french.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Soup", "Crepe"]);

        assert!(store
            .find_by_field(TextField::Cuisine, "french")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_find_top_n_sorted_and_bounded() {
        let store = MemoryStore::new();
        for rating in [3.0, 1.0, 5.0, 2.0, 4.0] {
            store.insert(&recipe("R", "Any", rating)).unwrap();
        }

        let top = store.find_top_n(3, SortField::Rating, true).unwrap();
        let ratings: Vec<f64> = top.iter().map(|r| r.rating).collect();
        assert_eq!(ratings, vec![5.0, 4.0, 3.0]);

        let bottom = store.find_top_n(2, SortField::Rating, false).unwrap();
        let ratings: Vec<f64> = bottom.iter().map(|r| r.rating).collect();
        assert_eq!(ratings, vec![1.0, 2.0]);
    }

    #[test]
    fn test_find_top_n_zero_and_oversized() {
        let store = MemoryStore::new();
        store.insert(&recipe("A", "Any", 1.0)).unwrap();
        store.insert(&recipe("B", "Any", 2.0)).unwrap();

        assert!(store.find_top_n(0, SortField::Rating, true).unwrap().is_empty());
        assert_eq!(store.find_top_n(10, SortField::Rating, true).unwrap().len(), 2);
    }

    #[test]
    fn test_find_top_n_other_sort_fields() {
        let store = MemoryStore::new();
        let rows = [("Stew", 120, 6), ("Toast", 5, 1), ("Pasta", 25, 4)];
        for (name, total_time, servings) in rows {
            store
                .insert(&NewRecipe {
                    name: name.to_string(),
                    total_time,
                    servings,
                    ..Default::default()
                })
                .unwrap();
        }
        let names = |recipes: Vec<Recipe>| -> Vec<String> {
            recipes.into_iter().map(|r| r.name).collect()
        };

        let quickest = store.find_top_n(2, SortField::TotalTime, false).unwrap();
        assert_eq!(names(quickest), vec!["Toast", "Pasta"]);

        let largest = store.find_top_n(1, SortField::Servings, true).unwrap();
        assert_eq!(names(largest), vec!["Stew"]);

        let oldest = store.find_top_n(3, SortField::CreatedAt, false).unwrap();
        assert_eq!(names(oldest), vec!["Stew", "Toast", "Pasta"]);
    }

    #[test]
    fn test_description_field_queries() {
        let store = MemoryStore::new();
        store.insert(&recipe("Soup", "French", 4.5)).unwrap();
        store.insert(&recipe("Curry", "Indian", 4.0)).unwrap();

        let exact = store
            .find_by_field(TextField::Description, "Curry description")
            .unwrap();
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].name, "Curry");

        let hits = store
            .find_by_substring(TextField::Description, "SOUP DESC")
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Soup");
    }

    #[test]
    fn test_find_by_substring_ignores_case() {
        let store = MemoryStore::new();
        store.insert(&recipe("Onion Soup", "French", 4.5)).unwrap();
        store.insert(&recipe("Curry", "Indian", 4.0)).unwrap();

        let hits = store.find_by_substring(TextField::Name, "SOUP").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Onion Soup");

        assert_eq!(store.find_by_substring(TextField::Name, "").unwrap().len(), 2);
    }

    #[test]
    fn test_update_merges_fields() {
        let store = MemoryStore::new();
        let id = store.insert(&recipe("Soup", "French", 4.5)).unwrap();

        let changes = RecipeChanges {
            rating: Some(2.0),
            ..Default::default()
        };
        assert_eq!(store.update_by_id(&id.to_string(), &changes).unwrap(), 1);

        let found = store.find_by_id(&id.to_string()).unwrap().unwrap();
        assert_eq!(found.rating, 2.0);
        assert_eq!(found.name, "Soup");
        assert!(found.updated_at >= found.created_at);
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let store = MemoryStore::new();
        store.insert(&recipe("Soup", "French", 4.5)).unwrap();

        let changes = RecipeChanges {
            name: Some("Ghost".to_string()),
            ..Default::default()
        };
        let touched = store
            .update_by_id(&Uuid::new_v4().to_string(), &changes)
            .unwrap();

        assert_eq!(touched, 0);
        let all = store.find_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Soup");
    }

    #[test]
    fn test_delete_then_find_is_none() {
        let store = MemoryStore::new();
        let id = store.insert(&recipe("Soup", "French", 4.5)).unwrap().to_string();

        assert_eq!(store.delete_by_id(&id).unwrap(), 1);
        assert!(store.find_by_id(&id).unwrap().is_none());
        assert_eq!(store.delete_by_id(&id).unwrap(), 0);
    }
}
