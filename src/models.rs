//! Domain Models
//!
//! Account entities, session claims, and request/response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// ============================================
// Database Entities
// ============================================

/// Account role enum matching database type.
///
/// The set is closed and every account holds exactly one role. Realtor and
/// Admin signups must present a product-key proof; Buyer signups do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Realtor,
    Admin,
}

impl Role {
    /// Whether signup under this role requires a product-key proof.
    pub fn requires_product_key(&self) -> bool {
        !matches!(self, Role::Buyer)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Realtor => "realtor",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyer" => Ok(Role::Buyer),
            "realtor" => Ok(Role::Realtor),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Account entity from the directory.
///
/// The role is immutable after creation; there is no promotion path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub phone: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a new account in the directory.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub phone: String,
    pub role: Role,
}

// ============================================
// JWT Claims
// ============================================

/// Session claims embedded in a signed token.
///
/// Never persisted; reconstructed on each request by verifying the token
/// signature and checking `exp` against the current time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (account ID)
    pub sub: Uuid,
    /// Display name, cross-checked against the directory by the guard
    pub name: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

// ============================================
// Request DTOs
// ============================================

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    let shape_ok = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | '(' | ')' | ' '));

    if shape_ok && (7..=15).contains(&digits) {
        Ok(())
    } else {
        Err(ValidationError::new("phone"))
    }
}

/// Signup request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = validate_phone, message = "Phone must be a valid phone number"))]
    pub phone: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    /// Required for Realtor and Admin signups
    pub product_key: Option<String>,
}

/// Signin request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Product key mint request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductKeyRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub role: Role,
}

// ============================================
// Response DTOs
// ============================================

/// Public account data without sensitive fields
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            name: account.name,
            phone: account.phone,
            role: account.role,
            created_at: account.created_at,
        }
    }
}

/// Authentication response with the session token
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub account: AccountResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Product key mint response
#[derive(Debug, Clone, Serialize)]
pub struct ProductKeyResponse {
    pub product_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_shapes() {
        assert!(validate_phone("555-123-4567").is_ok());
        assert!(validate_phone("+1 (555) 123 4567").is_ok());
        assert!(validate_phone("not a phone").is_err());
        assert!(validate_phone("123").is_err());
    }

    #[test]
    fn role_parsing() {
        assert_eq!("realtor".parse::<Role>(), Ok(Role::Realtor));
        assert!("landlord".parse::<Role>().is_err());
    }

    #[test]
    fn account_never_serializes_password_hash() {
        let account = Account {
            id: Uuid::new_v4(),
            email: "a@b.com".into(),
            password_hash: "secret-digest".into(),
            name: "A".into(),
            phone: "555-123-4567".into(),
            role: Role::Buyer,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("secret-digest"));
    }
}
