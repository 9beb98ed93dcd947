//! Password Hashing
//!
//! Salted, deliberately slow one-way hashing with Argon2id. Cost parameters
//! are fixed at construction so hashing latency stays bounded.

use crate::config::AppConfig;
use crate::error::AuthError;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2, Params,
};

/// One-way password hashing and verification.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    memory_cost: u32,
    time_cost: u32,
    parallelism: u32,
}

impl PasswordHasher {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_params(
            config.argon2_memory_cost,
            config.argon2_time_cost,
            config.argon2_parallelism,
        )
    }

    pub fn with_params(memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            memory_cost,
            time_cost,
            parallelism,
        }
    }

    fn argon2(&self) -> Result<Argon2<'static>, AuthError> {
        let params = Params::new(self.memory_cost, self.time_cost, self.parallelism, None)
            .map_err(|_| AuthError::Internal)?;
        Ok(Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            params,
        ))
    }

    /// Hash a plaintext with a fresh random salt.
    pub fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = self
            .argon2()?
            .hash_password(plaintext.as_bytes(), &salt)?
            .to_string();
        Ok(digest)
    }

    /// Verify a plaintext against a stored digest.
    ///
    /// The comparison inside Argon2 is constant-time. A malformed digest
    /// (e.g. from a corrupted record) verifies as `false` rather than
    /// surfacing an error, so callers cannot tell which component failed.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };
        let Ok(argon2) = self.argon2() else {
            return false;
        };
        argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}
