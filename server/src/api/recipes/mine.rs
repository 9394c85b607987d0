use crate::api::recipes::list::ListRecipesResponse;
use crate::api::recipes::RecipeResponse;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::repo::RepoError;
use crate::AppState;
use axum::{extract::State, Json};

#[utoipa::path(
    get,
    path = "/api/recipes/mine",
    tag = "recipes",
    responses(
        (status = 200, description = "Recipes the current user created", body = ListRecipesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_my_recipes(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ListRecipesResponse>, RepoError> {
    let recipes = state
        .repo
        .list_created_by(user.id)?
        .into_iter()
        .map(RecipeResponse::from)
        .collect();
    Ok(Json(ListRecipesResponse { recipes }))
}
