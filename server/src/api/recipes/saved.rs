use crate::api::recipes::list::ListRecipesResponse;
use crate::api::recipes::RecipeResponse;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::repo::RepoError;
use crate::AppState;
use axum::{extract::State, Json};

#[utoipa::path(
    get,
    path = "/api/recipes/saved",
    tag = "recipes",
    responses(
        (status = 200, description = "Recipes the current user has saved", body = ListRecipesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_saved_recipes(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ListRecipesResponse>, RepoError> {
    let recipes = state
        .repo
        .list_saved_by(user.id)?
        .into_iter()
        .map(RecipeResponse::from)
        .collect();
    Ok(Json(ListRecipesResponse { recipes }))
}
