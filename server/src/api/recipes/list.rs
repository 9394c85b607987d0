use crate::api::recipes::RecipeResponse;
use crate::api::ErrorResponse;
use crate::repo::RepoError;
use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeResponse>,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "All recipes, newest first", body = ListRecipesResponse),
        (status = 500, description = "Storage unavailable", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    State(state): State<AppState>,
) -> Result<Json<ListRecipesResponse>, RepoError> {
    let recipes = state
        .repo
        .list_all()?
        .into_iter()
        .map(RecipeResponse::from)
        .collect();
    Ok(Json(ListRecipesResponse { recipes }))
}
