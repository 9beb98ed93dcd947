//! Authentication HTTP Handlers
//!
//! REST endpoints for signup, signin, product-key minting, and the current
//! account.

use crate::error::AuthError;
use crate::extractors::AuthUser;
use crate::middleware;
use crate::models::*;
use crate::AppState;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware as axum_middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

/// Create the authentication router with the route-policy middleware applied.
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/auth/signup/:role", post(signup))
        .route("/auth/signin", post(signin))
        .route("/auth/key", post(generate_product_key))
        .route("/auth/me", get(current_account))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::enforce_route_policy,
        ))
        .with_state(state)
}

/// POST /auth/signup/:role
///
/// Register a new account. Realtor and Admin signups must carry a valid
/// product-key proof in the request body.
pub async fn signup(
    State(state): State<AppState>,
    Path(role): Path<Role>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, AuthError> {
    req.validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let response = state.auth.signup(req, role).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /auth/signin
///
/// Authenticate and return a session token.
pub async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> Result<impl IntoResponse, AuthError> {
    req.validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let response = state.auth.signin(req).await?;

    Ok(Json(response))
}

/// POST /auth/key
///
/// Mint a product-key proof for a trusted signup. Restricted to Admin
/// callers by the default route policy.
pub async fn generate_product_key(
    State(state): State<AppState>,
    Json(req): Json<ProductKeyRequest>,
) -> Result<impl IntoResponse, AuthError> {
    req.validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let product_key = state.auth.generate_product_key(&req.email, req.role).await?;

    Ok(Json(ProductKeyResponse { product_key }))
}

/// GET /auth/me
///
/// Current authenticated account.
pub async fn current_account(user: AuthUser) -> Result<impl IntoResponse, AuthError> {
    Ok(Json(serde_json::json!({
        "account": {
            "id": user.id,
            "email": user.email,
            "name": user.name,
            "role": user.role
        }
    })))
}
