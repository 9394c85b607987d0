pub mod public;
pub mod recipes;

use crate::models::{Difficulty, Ingredient};
use crate::repo::RepoError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Translation of repository failures into the external error taxonomy.
/// Storage failures are logged and hidden behind a generic 500.
impl IntoResponse for RepoError {
    fn into_response(self) -> Response {
        let status = match &self {
            RepoError::Validation(_) | RepoError::AlreadySaved => StatusCode::BAD_REQUEST,
            RepoError::NotFound => StatusCode::NOT_FOUND,
            RepoError::Forbidden => StatusCode::FORBIDDEN,
            RepoError::Store(_) | RepoError::Pool(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("repository error: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components and security
    #[derive(OpenApi)]
    #[openapi(components(schemas(ErrorResponse, Ingredient, Difficulty)))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    // Add security scheme
    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    // Merge in each module's spec
    let modules: Vec<utoipa::openapi::OpenApi> =
        vec![public::ApiDoc::openapi(), recipes::ApiDoc::openapi()];

    for module_spec in modules {
        // Merge paths
        spec.paths.paths.extend(module_spec.paths.paths);

        // Merge components (schemas)
        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_errors_map_to_the_documented_status_codes() {
        let cases = [
            (RepoError::Validation(vec!["title"]), StatusCode::BAD_REQUEST),
            (RepoError::AlreadySaved, StatusCode::BAD_REQUEST),
            (RepoError::NotFound, StatusCode::NOT_FOUND),
            (RepoError::Forbidden, StatusCode::FORBIDDEN),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn openapi_spec_covers_every_endpoint() {
        let spec = openapi();
        for path in [
            "/api/health",
            "/api/auth/signup",
            "/api/auth/login",
            "/api/recipes",
            "/api/recipes/saved",
            "/api/recipes/mine",
            "/api/recipes/{id}",
            "/api/recipes/{id}/save",
        ] {
            assert!(
                spec.paths.paths.contains_key(path),
                "missing path {} in OpenAPI spec",
                path
            );
        }
    }
}
