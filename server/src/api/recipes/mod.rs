pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod mine;
pub mod save;
pub mod saved;
pub mod unsave;
pub mod update;

use crate::models::{Difficulty, Ingredient};
use crate::repo::RecipeWithOwner;
use crate::types::{RecipeDraft, RecipePatch};
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route("/saved", get(saved::list_saved_recipes))
        .route("/mine", get(mine::list_my_recipes))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route(
            "/{id}/save",
            post(save::save_recipe).delete(unsave::unsave_recipe),
        )
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OwnerSummary {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub image_url: String,
    pub cooking_time_minutes: i32,
    pub difficulty: Difficulty,
    pub servings: i32,
    pub created_by: OwnerSummary,
    pub saved_by: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<RecipeWithOwner> for RecipeResponse {
    fn from(row: RecipeWithOwner) -> Self {
        let RecipeWithOwner {
            recipe,
            owner_username,
        } = row;
        Self {
            id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            ingredients: serde_json::from_value(recipe.ingredients).unwrap_or_default(),
            instructions: recipe.instructions.into_iter().flatten().collect(),
            image_url: recipe.image_url,
            cooking_time_minutes: recipe.cooking_time_minutes,
            difficulty: recipe.difficulty,
            servings: recipe.servings,
            created_by: OwnerSummary {
                id: recipe.created_by,
                username: owner_username,
            },
            saved_by: recipe.saved_by.into_iter().flatten().collect(),
            created_at: recipe.created_at,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        saved::list_saved_recipes,
        mine::list_my_recipes,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
        save::save_recipe,
        unsave::unsave_recipe,
    ),
    components(schemas(
        RecipeDraft,
        RecipePatch,
        RecipeResponse,
        OwnerSummary,
        list::ListRecipesResponse,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Recipe;

    #[test]
    fn response_flattens_storage_arrays_and_parses_ingredients() {
        let owner = Uuid::new_v4();
        let saved_user = Uuid::new_v4();
        let recipe = Recipe {
            id: Uuid::new_v4(),
            created_by: owner,
            title: "Soup".to_string(),
            description: "Hot soup".to_string(),
            ingredients: serde_json::json!([{"name": "Water", "amount": "1L"}]),
            instructions: vec![Some("Boil water".to_string())],
            image_url: "http://x/img.png".to_string(),
            cooking_time_minutes: 10,
            difficulty: Difficulty::Easy,
            servings: 2,
            saved_by: vec![Some(saved_user), None],
            created_at: Utc::now(),
        };

        let response = RecipeResponse::from(RecipeWithOwner {
            recipe,
            owner_username: "alice".to_string(),
        });

        assert_eq!(response.ingredients.len(), 1);
        assert_eq!(response.ingredients[0].name, "Water");
        assert_eq!(response.instructions, vec!["Boil water".to_string()]);
        assert_eq!(response.saved_by, vec![saved_user]);
        assert_eq!(response.created_by.id, owner);
        assert_eq!(response.created_by.username, "alice");
    }

    #[test]
    fn malformed_stored_ingredients_degrade_to_empty() {
        let recipe = Recipe {
            id: Uuid::new_v4(),
            created_by: Uuid::new_v4(),
            title: "Soup".to_string(),
            description: "Hot soup".to_string(),
            ingredients: serde_json::json!({"not": "a list"}),
            instructions: vec![],
            image_url: "http://x/img.png".to_string(),
            cooking_time_minutes: 10,
            difficulty: Difficulty::Easy,
            servings: 2,
            saved_by: vec![],
            created_at: Utc::now(),
        };

        let response = RecipeResponse::from(RecipeWithOwner {
            recipe,
            owner_username: "alice".to_string(),
        });
        assert!(response.ingredients.is_empty());
    }
}
