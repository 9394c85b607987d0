use crate::api::recipes::RecipeResponse;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::repo::{RecipeWithOwner, RepoError};
use crate::types::RecipeDraft;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = RecipeDraft,
    responses(
        (status = 201, description = "Recipe created successfully", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(draft): Json<RecipeDraft>,
) -> Result<(StatusCode, Json<RecipeResponse>), RepoError> {
    let recipe = state.repo.create(user.id, &draft)?;

    // The acting user is the owner, so no lookup is needed for display
    let response = RecipeResponse::from(RecipeWithOwner {
        recipe,
        owner_username: user.username,
    });
    Ok((StatusCode::CREATED, Json(response)))
}
