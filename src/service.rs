//! Authentication Service
//!
//! Orchestrates signup, signin, and product-key minting across the password
//! hasher, product-key service, account directory, and token service.
//!
//! Argon2 hashing is CPU-bound, so it runs under `spawn_blocking` and never
//! stalls the async runtime.

use crate::directory::AccountDirectory;
use crate::error::AuthError;
use crate::models::{AuthResponse, NewAccount, Role, SigninRequest, SignupRequest};
use crate::password::PasswordHasher;
use crate::product_key::ProductKeyService;
use crate::token::TokenService;

use std::sync::Arc;

/// Authentication orchestrator.
pub struct AuthService {
    directory: Arc<dyn AccountDirectory>,
    passwords: PasswordHasher,
    product_keys: ProductKeyService,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(
        directory: Arc<dyn AccountDirectory>,
        passwords: PasswordHasher,
        product_keys: ProductKeyService,
        tokens: TokenService,
    ) -> Self {
        Self {
            directory,
            passwords,
            product_keys,
            tokens,
        }
    }

    /// Register a new account under the given role.
    ///
    /// Non-Buyer roles must present a product-key proof minted for exactly
    /// this email and role; absence or mismatch is `Unauthorized` with no
    /// further detail.
    pub async fn signup(&self, req: SignupRequest, role: Role) -> Result<AuthResponse, AuthError> {
        if self.directory.find_by_email(&req.email).await?.is_some() {
            return Err(AuthError::Conflict);
        }

        if role.requires_product_key() {
            let proof = req
                .product_key
                .as_deref()
                .ok_or(AuthError::Unauthorized)?
                .to_string();

            let keys = self.product_keys.clone();
            let email = req.email.clone();
            let valid =
                tokio::task::spawn_blocking(move || keys.verify(&email, role, &proof)).await?;

            if !valid {
                tracing::debug!(role = %role, "Product key proof rejected at signup");
                return Err(AuthError::Unauthorized);
            }
        }

        let hasher = self.passwords.clone();
        let password = req.password.clone();
        let password_hash =
            tokio::task::spawn_blocking(move || hasher.hash(&password)).await??;

        let account = self
            .directory
            .create(NewAccount {
                email: req.email,
                password_hash,
                name: req.name,
                phone: req.phone,
                role,
            })
            .await?;

        tracing::info!(account_id = %account.id, role = %account.role, "Account created");

        let access_token = self.tokens.issue(account.id, &account.name)?;
        Ok(AuthResponse {
            account: account.into(),
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.tokens.lifetime_secs(),
        })
    }

    /// Authenticate with email and password.
    ///
    /// Unknown email and wrong password both surface as the same
    /// `InvalidCredentials` error to prevent account enumeration.
    pub async fn signin(&self, req: SigninRequest) -> Result<AuthResponse, AuthError> {
        let account = self
            .directory
            .find_by_email(&req.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let hasher = self.passwords.clone();
        let password = req.password.clone();
        let digest = account.password_hash.clone();
        let valid =
            tokio::task::spawn_blocking(move || hasher.verify(&password, &digest)).await?;

        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.tokens.issue(account.id, &account.name)?;
        Ok(AuthResponse {
            account: account.into(),
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.tokens.lifetime_secs(),
        })
    }

    /// Mint a product-key proof for the given email and role.
    pub async fn generate_product_key(
        &self,
        email: &str,
        role: Role,
    ) -> Result<String, AuthError> {
        let keys = self.product_keys.clone();
        let email = email.to_string();
        tokio::task::spawn_blocking(move || keys.derive(&email, role)).await?
    }
}
