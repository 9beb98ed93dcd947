//! Access Guard
//!
//! Request-time authorization: a statically declared route policy plus a
//! per-request decision function. The guard re-fetches the account from the
//! directory instead of trusting embedded claims alone, so a deleted account
//! loses access immediately even while its token is still structurally valid.

use crate::directory::AccountDirectory;
use crate::models::{Account, Role};
use crate::token::TokenService;

use std::collections::HashMap;
use std::sync::Arc;

/// Mapping from route identifier ("METHOD /path") to the set of roles
/// permitted to invoke it, declared at server-wiring time.
///
/// A route with no entry carries no role restriction: the guard passes it
/// through without attempting authentication.
#[derive(Debug, Default, Clone)]
pub struct RoutePolicy {
    routes: HashMap<String, Vec<Role>>,
}

impl RoutePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict a route to the given roles.
    pub fn require(mut self, route: impl Into<String>, roles: &[Role]) -> Self {
        self.routes.insert(route.into(), roles.to_vec());
        self
    }

    /// Roles allowed on a route, or `None` when the route is unrestricted.
    pub fn allowed_roles(&self, route: &str) -> Option<&[Role]> {
        self.routes.get(route).map(Vec::as_slice)
    }
}

/// Per-request authorization decision.
pub struct AccessGuard {
    tokens: TokenService,
    directory: Arc<dyn AccountDirectory>,
}

impl AccessGuard {
    pub fn new(tokens: TokenService, directory: Arc<dyn AccountDirectory>) -> Self {
        Self { tokens, directory }
    }

    /// Decide whether a request may proceed against a route's allowed roles.
    ///
    /// Returns the resolved account on success and `None` on any denial:
    /// missing or malformed bearer credential, token verification failure,
    /// unknown account, display-name mismatch, or role not in the set. All
    /// denials are uniform; no reason is surfaced.
    pub async fn permit(&self, allowed: &[Role], authorization: Option<&str>) -> Option<Account> {
        let header = authorization?;

        let mut parts = header.splitn(2, ' ');
        if parts.next() != Some("Bearer") {
            return None;
        }
        let token = parts.next().filter(|t| !t.is_empty())?;

        let claims = self.tokens.verify(token).ok()?;

        let account = self.directory.find_by_id(claims.sub).await.ok().flatten()?;
        if account.name != claims.name {
            return None;
        }

        if allowed.contains(&account.role) {
            Some(account)
        } else {
            None
        }
    }
}
