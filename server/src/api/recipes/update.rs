use crate::api::recipes::RecipeResponse;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::repo::RepoError;
use crate::types::RecipePatch;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = RecipePatch,
    responses(
        (status = 200, description = "Recipe updated successfully", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the recipe owner", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<RecipePatch>,
) -> Result<Json<RecipeResponse>, RepoError> {
    let updated = state.repo.update(id, user.id, &patch)?;
    Ok(Json(RecipeResponse::from(updated)))
}
