//! Account Directory
//!
//! The directory is an external collaborator: the auth core consumes it
//! through the `AccountDirectory` trait and never touches storage directly.
//! `PgAccountDirectory` is the production implementation;
//! `MemoryAccountDirectory` backs tests.

use crate::error::AuthError;
use crate::models::{Account, NewAccount, Role};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Mutex;
use uuid::Uuid;

/// Lookup and creation of account records.
///
/// Implementations must enforce email uniqueness atomically; the service's
/// exists-then-create sequence is not a substitute for that guarantee.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AuthError>;

    async fn create(&self, account: NewAccount) -> Result<Account, AuthError>;
}

// ============================================
// Postgres
// ============================================

/// PostgreSQL-backed account directory.
pub struct PgAccountDirectory {
    pool: PgPool,
}

impl PgAccountDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the account schema if it does not exist.
    pub async fn migrate(pool: &PgPool) -> Result<(), AuthError> {
        tracing::info!("Running account directory migrations");

        sqlx::query(
            r#"
            DO $$ BEGIN
                CREATE TYPE account_role AS ENUM ('buyer', 'realtor', 'admin');
            EXCEPTION
                WHEN duplicate_object THEN null;
            END $$;
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS accounts (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                email VARCHAR(255) NOT NULL UNIQUE,
                password_hash VARCHAR(255) NOT NULL,
                name VARCHAR(100) NOT NULL,
                phone VARCHAR(30) NOT NULL,
                role account_role NOT NULL DEFAULT 'buyer',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_accounts_email ON accounts(email);")
            .execute(pool)
            .await?;

        tracing::info!("Account directory migrations completed");
        Ok(())
    }
}

#[async_trait]
impl AccountDirectory for PgAccountDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
        let account = sqlx::query_as("SELECT * FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AuthError> {
        let account = sqlx::query_as("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    async fn create(&self, account: NewAccount) -> Result<Account, AuthError> {
        // A unique violation maps to Conflict in From<sqlx::Error>.
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (email, password_hash, name, phone, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.name)
        .bind(&account.phone)
        .bind(account.role)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }
}

// ============================================
// In-memory (tests)
// ============================================

/// In-memory account directory for tests and local experiments.
#[derive(Default)]
pub struct MemoryAccountDirectory {
    accounts: Mutex<Vec<Account>>,
}

impl MemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account directly, bypassing signup.
    pub fn insert(&self, email: &str, password_hash: &str, name: &str, role: Role) -> Account {
        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            name: name.to_string(),
            phone: "555-000-0000".to_string(),
            role,
            created_at: now,
            updated_at: now,
        };
        self.accounts.lock().unwrap().push(account.clone());
        account
    }

    /// Remove an account, simulating deletion by an external admin flow.
    pub fn remove(&self, id: Uuid) {
        self.accounts.lock().unwrap().retain(|a| a.id != id);
    }
}

#[async_trait]
impl AccountDirectory for MemoryAccountDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AuthError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn create(&self, account: NewAccount) -> Result<Account, AuthError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(AuthError::Conflict);
        }

        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            email: account.email,
            password_hash: account.password_hash,
            name: account.name,
            phone: account.phone,
            role: account.role,
            created_at: now,
            updated_at: now,
        };
        accounts.push(account.clone());
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_directory_enforces_unique_email() {
        let directory = MemoryAccountDirectory::new();
        let new = NewAccount {
            email: "a@b.com".into(),
            password_hash: "digest".into(),
            name: "A".into(),
            phone: "555-000-0000".into(),
            role: Role::Buyer,
        };

        directory.create(new.clone()).await.unwrap();
        assert!(matches!(
            directory.create(new).await,
            Err(AuthError::Conflict)
        ));
    }

    #[tokio::test]
    async fn memory_directory_lookups() {
        let directory = MemoryAccountDirectory::new();
        let account = directory.insert("a@b.com", "digest", "A", Role::Realtor);

        assert!(directory.find_by_email("a@b.com").await.unwrap().is_some());
        assert!(directory.find_by_email("x@y.com").await.unwrap().is_none());
        assert!(directory.find_by_id(account.id).await.unwrap().is_some());

        directory.remove(account.id);
        assert!(directory.find_by_id(account.id).await.unwrap().is_none());
    }
}
