pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

pub use extractors::Identity;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password, MAX_BCRYPT_COST, MIN_BCRYPT_COST};
pub use token::{Claims, TokenKeys, TokenPair, TokenType};

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::models::{Role, UserSummary};

const REGISTER_REQUIRED: &str = "Email, username, and password are required";
const LOGIN_REQUIRED: &str = "Email and password are required";

/// Represents the payload for a new user registration request.
///
/// Missing fields default to empty strings and fail `check_required` with `400`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "Username must be at most 150 characters"))]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Requested role; `member` when omitted.
    #[serde(default)]
    pub role: Option<Role>,
}

impl RegisterRequest {
    /// Fails with one summary message when any required field is missing.
    /// Field-level rules are checked separately with `validate`.
    pub fn check_required(&self) -> Result<(), AppError> {
        if self.email.is_empty() || self.username.is_empty() || self.password.is_empty() {
            return Err(AppError::Validation(REGISTER_REQUIRED.into()));
        }
        Ok(())
    }
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn check(&self) -> Result<(), AppError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(AppError::Validation(LOGIN_REQUIRED.into()));
        }
        Ok(())
    }
}

/// Response returned after a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: UserSummary,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}
