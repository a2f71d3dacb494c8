//! Postgres-backed recipe store.

use std::fmt;

use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use uuid::Uuid;

use super::{parse_id, RecipeStore, SortField, StoreError, TextField};
use crate::db::{self, DbPool};
use crate::models::{NewRecipe, Recipe, RecipeChanges};
use crate::schema::recipes;

type Conn = PooledConnection<ConnectionManager<PgConnection>>;
type BoxedRecipes<'a> = recipes::BoxedQuery<'a, Pg>;

/// Recipe store over a diesel connection pool.
///
/// A store built with [`PgStore::disconnected`] fails every operation with
/// [`StoreError::Unavailable`]; this is what the server runs with when the
/// database could not be reached at startup.
#[derive(Clone)]
pub struct PgStore {
    pool: Option<DbPool>,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool: Some(pool) }
    }

    pub fn disconnected() -> Self {
        Self { pool: None }
    }

    /// Connect and migrate, falling back to a disconnected store on failure.
    pub fn connect(database_url: &str) -> Self {
        match db::create_pool(database_url) {
            Ok(pool) => {
                tracing::info!("Connected to recipe database");
                Self::new(pool)
            }
            Err(e) => {
                tracing::error!("{}; recipe requests will fail until restart", e);
                Self::disconnected()
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.pool.is_some()
    }

    fn conn(&self) -> Result<Conn, StoreError> {
        let pool = self
            .pool
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("no database connection".to_string()))?;
        pool.get()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

impl fmt::Debug for PgStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgStore")
            .field("connected", &self.is_connected())
            .finish()
    }
}

/// Escape `%`, `_` and `\` so user text matches literally inside a LIKE
/// pattern (Postgres uses backslash as the default escape character).
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn filter_eq<'a>(query: BoxedRecipes<'a>, field: TextField, value: &'a str) -> BoxedRecipes<'a> {
    match field {
        TextField::Name => query.filter(recipes::name.eq(value)),
        TextField::Cuisine => query.filter(recipes::cuisine.eq(value)),
        TextField::Description => query.filter(recipes::description.eq(value)),
    }
}

fn filter_contains(query: BoxedRecipes<'_>, field: TextField, pattern: String) -> BoxedRecipes<'_> {
    match field {
        TextField::Name => query.filter(recipes::name.ilike(pattern)),
        TextField::Cuisine => query.filter(recipes::cuisine.ilike(pattern)),
        TextField::Description => query.filter(recipes::description.ilike(pattern)),
    }
}

fn order_by(query: BoxedRecipes<'_>, sort: SortField, descending: bool) -> BoxedRecipes<'_> {
    match (sort, descending) {
        (SortField::Rating, true) => query.order(recipes::rating.desc()),
        (SortField::Rating, false) => query.order(recipes::rating.asc()),
        (SortField::TotalTime, true) => query.order(recipes::total_time.desc()),
        (SortField::TotalTime, false) => query.order(recipes::total_time.asc()),
        (SortField::Servings, true) => query.order(recipes::servings.desc()),
        (SortField::Servings, false) => query.order(recipes::servings.asc()),
        (SortField::CreatedAt, true) => query.order(recipes::created_at.desc()),
        (SortField::CreatedAt, false) => query.order(recipes::created_at.asc()),
    }
}

impl RecipeStore for PgStore {
    fn find_all(&self) -> Result<Vec<Recipe>, StoreError> {
        let mut conn = self.conn()?;
        let rows = recipes::table
            .select(Recipe::as_select())
            .order(recipes::created_at.asc())
            .load(&mut conn)?;
        Ok(rows)
    }

    fn find_by_field(&self, field: TextField, value: &str) -> Result<Vec<Recipe>, StoreError> {
        let mut conn = self.conn()?;
        let rows = filter_eq(recipes::table.into_boxed(), field, value)
            .then_order_by(recipes::created_at.asc())
            .load::<Recipe>(&mut conn)?;
        Ok(rows)
    }

    fn find_top_n(
        &self,
        n: u32,
        sort: SortField,
        descending: bool,
    ) -> Result<Vec<Recipe>, StoreError> {
        let mut conn = self.conn()?;
        let rows = order_by(recipes::table.into_boxed(), sort, descending)
            .then_order_by(recipes::created_at.asc())
            .limit(i64::from(n))
            .load::<Recipe>(&mut conn)?;
        Ok(rows)
    }

    fn find_by_substring(
        &self,
        field: TextField,
        query: &str,
    ) -> Result<Vec<Recipe>, StoreError> {
        let mut conn = self.conn()?;
        let pattern = format!("%{}%", escape_like(query));
        let rows = filter_contains(recipes::table.into_boxed(), field, pattern)
            .then_order_by(recipes::created_at.asc())
            .load::<Recipe>(&mut conn)?;
        Ok(rows)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        let id = parse_id(id)?;
        let mut conn = self.conn()?;
        let recipe = recipes::table
            .find(id)
            .select(Recipe::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(recipe)
    }

    fn insert(&self, recipe: &NewRecipe) -> Result<Uuid, StoreError> {
        let mut conn = self.conn()?;
        let id = diesel::insert_into(recipes::table)
            .values(recipe)
            .returning(recipes::id)
            .get_result(&mut conn)?;
        Ok(id)
    }

    fn update_by_id(&self, id: &str, changes: &RecipeChanges) -> Result<usize, StoreError> {
        let id = parse_id(id)?;
        let mut conn = self.conn()?;
        let updated = diesel::update(recipes::table.find(id))
            .set((changes, recipes::updated_at.eq(Utc::now())))
            .execute(&mut conn)?;
        Ok(updated)
    }

    fn delete_by_id(&self, id: &str) -> Result<usize, StoreError> {
        let id = parse_id(id)?;
        let mut conn = self.conn()?;
        let deleted = diesel::delete(recipes::table.find(id)).execute(&mut conn)?;
        Ok(deleted)
    }
}
