//! Route Policy Middleware
//!
//! Looks up the matched route in the statically declared policy and defers
//! to the access guard. Routes without a policy entry pass through with no
//! authentication attempted. Every denial maps to the same generic
//! unauthorized response.

use crate::error::AuthError;
use crate::extractors::AuthUser;
use crate::AppState;

use axum::{
    extract::{MatchedPath, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Enforce the route-to-role policy on every request.
pub async fn enforce_route_policy(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|m| format!("{} {}", req.method(), m.as_str()))
        .unwrap_or_else(|| format!("{} {}", req.method(), req.uri().path()));

    let Some(allowed) = state.policy.allowed_roles(&route) else {
        // No declared roles: open route, no authentication attempted.
        return next.run(req).await;
    };

    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);

    match state.guard.permit(allowed, authorization.as_deref()).await {
        Some(account) => {
            req.extensions_mut().insert(AuthUser::from(&account));
            next.run(req).await
        }
        None => {
            tracing::debug!(route = %route, "Access denied by route policy");
            AuthError::Unauthorized.into_response()
        }
    }
}
