//! Estately — property-listing API core
//!
//! The hard kernel of the service: credential issuance, stateless session
//! verification, and product-key gated role elevation.
//!
//! - Account signup and signin with Argon2id password hashing
//! - Signed, time-bounded JWT session tokens (no server-side session store)
//! - Product-key proofs gating Realtor and Admin signups
//! - Route-to-role policy enforced by a request-time access guard
//!
//! Listing CRUD lives behind the listing store boundary and is not part of
//! this crate; apps mount their listing routes next to the auth router and
//! declare their role restrictions in the [`RoutePolicy`].
//!
//! # Configuration
//!
//! All configuration is loaded from environment variables:
//! - `JWT_SECRET` - token signing secret (required, min 32 chars)
//! - `PRODUCT_KEY_SECRET` - product-key derivation secret (required)
//! - `JWT_EXPIRATION` - session lifetime in seconds (default: 36000)
//! - `DATABASE_URL` - PostgreSQL connection string (required)
//! - `BIND_ADDR` - listen address (default: "0.0.0.0:3000")

pub mod config;
pub mod directory;
pub mod error;
pub mod extractors;
pub mod guard;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod product_key;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use config::AppConfig;
pub use directory::{AccountDirectory, MemoryAccountDirectory, PgAccountDirectory};
pub use error::AuthError;
pub use extractors::AuthUser;
pub use guard::{AccessGuard, RoutePolicy};
pub use handlers::create_routes;
pub use models::{Account, Role, SessionClaims};
pub use password::PasswordHasher;
pub use product_key::ProductKeyService;
pub use service::AuthService;
pub use token::TokenService;

use std::sync::Arc;

/// Shared application state handed to the router.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub guard: Arc<AccessGuard>,
    pub policy: Arc<RoutePolicy>,
}

impl AppState {
    /// Wire the services from configuration and a directory implementation.
    pub fn new(
        config: &AppConfig,
        directory: Arc<dyn AccountDirectory>,
        policy: RoutePolicy,
    ) -> Self {
        let passwords = PasswordHasher::new(config);
        let product_keys = ProductKeyService::new(config.product_key_secret.clone(), passwords.clone());
        let tokens = TokenService::new(&config.jwt_secret, config.token_expiration);

        let auth = Arc::new(AuthService::new(
            directory.clone(),
            passwords,
            product_keys,
            tokens.clone(),
        ));
        let guard = Arc::new(AccessGuard::new(tokens, directory));

        Self {
            auth,
            guard,
            policy: Arc::new(policy),
        }
    }
}

/// Default route policy for the auth endpoints.
///
/// Minting product keys is an operator action and requires the Admin role;
/// an open mint endpoint would let anyone issue realtor proofs for arbitrary
/// emails. Signup and signin carry no entry and stay open.
pub fn default_route_policy() -> RoutePolicy {
    RoutePolicy::new()
        .require("POST /auth/key", &[Role::Admin])
        .require("GET /auth/me", &[Role::Buyer, Role::Realtor, Role::Admin])
}
