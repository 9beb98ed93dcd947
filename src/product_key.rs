//! Product Key Service
//!
//! Derives and verifies the proof string that gates privileged signups.
//! A proof binds (email, role, server secret) through the same salted hash
//! primitive used for passwords, so holders submit the issued hash output,
//! never the secret triple itself. No table of valid keys is persisted;
//! verification re-derives the triple on demand.

use crate::error::AuthError;
use crate::models::Role;
use crate::password::PasswordHasher;

/// Product-key derivation and verification.
#[derive(Debug, Clone)]
pub struct ProductKeyService {
    secret: String,
    passwords: PasswordHasher,
}

impl ProductKeyService {
    pub fn new(secret: impl Into<String>, passwords: PasswordHasher) -> Self {
        Self {
            secret: secret.into(),
            passwords,
        }
    }

    fn triple(&self, email: &str, role: Role) -> String {
        format!("{}:{}:{}", email, role, self.secret)
    }

    /// Mint a proof for the given (email, role) pair.
    pub fn derive(&self, email: &str, role: Role) -> Result<String, AuthError> {
        self.passwords.hash(&self.triple(email, role))
    }

    /// Check a supplied proof against the re-derived triple.
    ///
    /// Uses the password hasher's constant-time verification, so a
    /// mismatch leaks nothing about where the inputs diverged.
    pub fn verify(&self, email: &str, role: Role, supplied_proof: &str) -> bool {
        self.passwords.verify(&self.triple(email, role), supplied_proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> ProductKeyService {
        ProductKeyService::new(secret, PasswordHasher::with_params(4096, 1, 1))
    }

    #[test]
    fn derived_proof_verifies() {
        let keys = service("super-secret-value");
        let proof = keys.derive("agent@example.com", Role::Realtor).unwrap();
        assert!(keys.verify("agent@example.com", Role::Realtor, &proof));
    }

    #[test]
    fn proof_is_bound_to_email() {
        let keys = service("super-secret-value");
        let proof = keys.derive("agent@example.com", Role::Realtor).unwrap();
        assert!(!keys.verify("other@example.com", Role::Realtor, &proof));
    }

    #[test]
    fn proof_is_bound_to_role() {
        let keys = service("super-secret-value");
        let proof = keys.derive("agent@example.com", Role::Realtor).unwrap();
        assert!(!keys.verify("agent@example.com", Role::Admin, &proof));
    }

    #[test]
    fn proof_is_bound_to_secret() {
        let minted = service("super-secret-value");
        let verifier = service("different-secret");
        let proof = minted.derive("agent@example.com", Role::Realtor).unwrap();
        assert!(!verifier.verify("agent@example.com", Role::Realtor, &proof));
    }
}
