//! Recipe repository: every ownership and saved-set rule lives here.
//!
//! Handlers never touch the recipes table directly; they go through an
//! explicitly constructed [`RecipeRepo`] holding the connection pool.

use crate::db::DbPool;
use crate::models::{NewRecipe, Recipe};
use crate::schema::{recipes, users};
use crate::types::{RecipeDraft, RecipePatch};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::collections::BTreeSet;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum RepoError {
    #[error("Invalid recipe fields: {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    #[error("Recipe not found")]
    NotFound,

    #[error("Not authorized")]
    Forbidden,

    #[error("Recipe already saved")]
    AlreadySaved,

    #[error("Database query failed: {0}")]
    Store(#[from] diesel::result::Error),

    #[error("Database connection failed: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

/// A recipe's `saved_by` column viewed with set semantics. The column is a
/// plain uuid array; this wrapper guarantees the no-duplicate invariant.
#[derive(Debug, Default)]
pub struct SavedSet(BTreeSet<Uuid>);

impl SavedSet {
    pub fn from_column(raw: &[Option<Uuid>]) -> Self {
        Self(raw.iter().flatten().copied().collect())
    }

    /// Returns false if the user was already present.
    pub fn insert(&mut self, user_id: Uuid) -> bool {
        self.0.insert(user_id)
    }

    /// Returns false if the user was not present.
    pub fn remove(&mut self, user_id: Uuid) -> bool {
        self.0.remove(&user_id)
    }

    pub fn into_column(self) -> Vec<Option<Uuid>> {
        self.0.into_iter().map(Some).collect()
    }
}

/// Recipe row plus its owner's username, resolved for display.
#[derive(Debug, Clone)]
pub struct RecipeWithOwner {
    pub recipe: Recipe,
    pub owner_username: String,
}

/// Shallow-merge changeset: `None` fields keep the stored value.
#[derive(AsChangeset)]
#[diesel(table_name = recipes)]
struct RecipeChanges<'a> {
    title: Option<&'a str>,
    description: Option<&'a str>,
    ingredients: Option<serde_json::Value>,
    instructions: Option<Vec<Option<String>>>,
    image_url: Option<&'a str>,
    cooking_time_minutes: Option<i32>,
    difficulty: Option<crate::models::Difficulty>,
    servings: Option<i32>,
}

#[derive(Clone)]
pub struct RecipeRepo {
    pool: DbPool,
}

impl RecipeRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// All recipes, newest-created first. No pagination.
    pub fn list_all(&self) -> Result<Vec<RecipeWithOwner>, RepoError> {
        let mut conn = self.pool.get()?;
        let rows: Vec<(Recipe, String)> = recipes::table
            .inner_join(users::table)
            .select((Recipe::as_select(), users::username))
            .order(recipes::created_at.desc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(RecipeWithOwner::from).collect())
    }

    /// Recipes the given user has saved, newest-created first.
    pub fn list_saved_by(&self, user_id: Uuid) -> Result<Vec<RecipeWithOwner>, RepoError> {
        let mut conn = self.pool.get()?;
        let rows: Vec<(Recipe, String)> = recipes::table
            .inner_join(users::table)
            .filter(recipes::saved_by.contains(vec![Some(user_id)]))
            .select((Recipe::as_select(), users::username))
            .order(recipes::created_at.desc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(RecipeWithOwner::from).collect())
    }

    /// Recipes the given user created, newest-created first.
    pub fn list_created_by(&self, user_id: Uuid) -> Result<Vec<RecipeWithOwner>, RepoError> {
        let mut conn = self.pool.get()?;
        let rows: Vec<(Recipe, String)> = recipes::table
            .inner_join(users::table)
            .filter(recipes::created_by.eq(user_id))
            .select((Recipe::as_select(), users::username))
            .order(recipes::created_at.desc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(RecipeWithOwner::from).collect())
    }

    pub fn get_by_id(&self, id: Uuid) -> Result<RecipeWithOwner, RepoError> {
        let mut conn = self.pool.get()?;
        fetch_with_owner(&mut conn, id)
    }

    /// Creates a recipe owned by `owner`. The saved set starts empty and the
    /// id and creation timestamp are assigned by the store.
    pub fn create(&self, owner: Uuid, draft: &RecipeDraft) -> Result<Recipe, RepoError> {
        let bad = draft.invalid_fields();
        if !bad.is_empty() {
            return Err(RepoError::Validation(bad));
        }

        let ingredients = serde_json::to_value(&draft.ingredients)
            .map_err(|_| RepoError::Validation(vec!["ingredients"]))?;
        let instructions: Vec<Option<String>> =
            draft.instructions.iter().cloned().map(Some).collect();

        let new_recipe = NewRecipe {
            created_by: owner,
            title: &draft.title,
            description: &draft.description,
            ingredients,
            instructions: &instructions,
            image_url: &draft.image_url,
            cooking_time_minutes: draft.cooking_time_minutes,
            difficulty: draft.difficulty,
            servings: draft.servings,
        };

        let mut conn = self.pool.get()?;
        let recipe = diesel::insert_into(recipes::table)
            .values(&new_recipe)
            .returning(Recipe::as_returning())
            .get_result(&mut conn)?;
        Ok(recipe)
    }

    /// Owner-only shallow merge of the supplied fields onto the stored
    /// record. Fields the patch does not carry are preserved.
    pub fn update(
        &self,
        id: Uuid,
        acting_user: Uuid,
        patch: &RecipePatch,
    ) -> Result<RecipeWithOwner, RepoError> {
        let mut conn = self.pool.get()?;
        let current = fetch_with_owner(&mut conn, id)?;
        if current.recipe.created_by != acting_user {
            return Err(RepoError::Forbidden);
        }

        let bad = patch.invalid_fields();
        if !bad.is_empty() {
            return Err(RepoError::Validation(bad));
        }
        if patch.is_empty() {
            return Ok(current);
        }

        let ingredients = match &patch.ingredients {
            Some(list) => Some(
                serde_json::to_value(list)
                    .map_err(|_| RepoError::Validation(vec!["ingredients"]))?,
            ),
            None => None,
        };
        let instructions: Option<Vec<Option<String>>> = patch
            .instructions
            .as_ref()
            .map(|steps| steps.iter().cloned().map(Some).collect());

        let changes = RecipeChanges {
            title: patch.title.as_deref(),
            description: patch.description.as_deref(),
            ingredients,
            instructions,
            image_url: patch.image_url.as_deref(),
            cooking_time_minutes: patch.cooking_time_minutes,
            difficulty: patch.difficulty,
            servings: patch.servings,
        };

        let updated = diesel::update(recipes::table.find(id))
            .set(&changes)
            .returning(Recipe::as_returning())
            .get_result(&mut conn)?;
        Ok(RecipeWithOwner {
            recipe: updated,
            owner_username: current.owner_username,
        })
    }

    /// Owner-only permanent removal. No tombstone; entries in other users'
    /// saved lists are gone with the row.
    pub fn delete(&self, id: Uuid, acting_user: Uuid) -> Result<(), RepoError> {
        let mut conn = self.pool.get()?;
        let owner: Option<Uuid> = recipes::table
            .find(id)
            .select(recipes::created_by)
            .first(&mut conn)
            .optional()?;
        let owner = owner.ok_or(RepoError::NotFound)?;
        if owner != acting_user {
            return Err(RepoError::Forbidden);
        }
        diesel::delete(recipes::table.find(id)).execute(&mut conn)?;
        Ok(())
    }

    /// Adds the user to the recipe's saved set. Saving twice is an error.
    pub fn save(&self, id: Uuid, user_id: Uuid) -> Result<(), RepoError> {
        let mut conn = self.pool.get()?;
        let mut saved = load_saved_set(&mut conn, id)?;
        if !saved.insert(user_id) {
            return Err(RepoError::AlreadySaved);
        }
        diesel::update(recipes::table.find(id))
            .set(recipes::saved_by.eq(saved.into_column()))
            .execute(&mut conn)?;
        Ok(())
    }

    /// Removes the user from the recipe's saved set. Unlike `save`, removing
    /// an absent reference succeeds silently.
    pub fn unsave(&self, id: Uuid, user_id: Uuid) -> Result<(), RepoError> {
        let mut conn = self.pool.get()?;
        let mut saved = load_saved_set(&mut conn, id)?;
        saved.remove(user_id);
        diesel::update(recipes::table.find(id))
            .set(recipes::saved_by.eq(saved.into_column()))
            .execute(&mut conn)?;
        Ok(())
    }
}

impl From<(Recipe, String)> for RecipeWithOwner {
    fn from((recipe, owner_username): (Recipe, String)) -> Self {
        Self {
            recipe,
            owner_username,
        }
    }
}

fn fetch_with_owner(conn: &mut PgConnection, id: Uuid) -> Result<RecipeWithOwner, RepoError> {
    let row: Option<(Recipe, String)> = recipes::table
        .inner_join(users::table)
        .filter(recipes::id.eq(id))
        .select((Recipe::as_select(), users::username))
        .first(conn)
        .optional()?;
    row.map(RecipeWithOwner::from).ok_or(RepoError::NotFound)
}

fn load_saved_set(conn: &mut PgConnection, id: Uuid) -> Result<SavedSet, RepoError> {
    let raw: Option<Vec<Option<Uuid>>> = recipes::table
        .find(id)
        .select(recipes::saved_by)
        .first(conn)
        .optional()?;
    raw.map(|r| SavedSet::from_column(&r))
        .ok_or(RepoError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_set_deduplicates_on_load() {
        let user = Uuid::new_v4();
        let set = SavedSet::from_column(&[Some(user), None, Some(user)]);
        assert_eq!(set.into_column().len(), 1);
    }

    #[test]
    fn saved_set_insert_rejects_duplicates() {
        let user = Uuid::new_v4();
        let mut set = SavedSet::default();
        assert!(set.insert(user));
        assert!(!set.insert(user));
        assert_eq!(set.into_column(), vec![Some(user)]);
    }

    #[test]
    fn saved_set_remove_of_absent_user_is_a_no_op() {
        let mut set = SavedSet::default();
        assert!(!set.remove(Uuid::new_v4()));
        assert!(set.into_column().is_empty());
    }

    #[test]
    fn saved_set_round_trips_through_the_column_shape() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut set = SavedSet::from_column(&[Some(a)]);
        set.insert(b);
        let column = set.into_column();
        assert_eq!(column.len(), 2);
        assert!(column.iter().all(|e| e.is_some()));
    }

    #[test]
    fn validation_error_names_the_offending_fields() {
        let err = RepoError::Validation(vec!["title", "servings"]);
        assert_eq!(err.to_string(), "Invalid recipe fields: title, servings");
    }
}
