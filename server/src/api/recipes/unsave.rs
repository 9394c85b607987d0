use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::repo::RepoError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/save",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe no longer saved"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn unsave_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, RepoError> {
    // Unsaving a recipe that was never saved is deliberately a no-op
    state.repo.unsave(id, user.id)?;
    Ok(StatusCode::NO_CONTENT)
}
