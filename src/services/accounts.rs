use validator::Validate;

use crate::auth::{
    hash_password, verify_password, LoginRequest, LoginResponse, RegisterRequest, TokenKeys,
    TokenType,
};
use crate::config::Config;
use crate::error::AppError;
use crate::models::{NewUser, Role, User, UserSummary};
use crate::store::Store;

/// Registers users, checks credentials and issues tokens.
///
/// Tokens are stateless; nothing is recorded server-side at login.
#[derive(Clone)]
pub struct Authenticator {
    tokens: TokenKeys,
    bcrypt_cost: u32,
    allow_admin_registration: bool,
}

impl Authenticator {
    pub fn new(tokens: TokenKeys, bcrypt_cost: u32, allow_admin_registration: bool) -> Self {
        Self {
            tokens,
            bcrypt_cost,
            allow_admin_registration,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            TokenKeys::from_config(config),
            config.bcrypt_cost,
            config.allow_admin_registration,
        )
    }

    pub fn tokens(&self) -> &TokenKeys {
        &self.tokens
    }

    /// Creates an account. No token is issued; the caller logs in separately.
    pub async fn register(&self, store: &dyn Store, request: RegisterRequest) -> Result<User, AppError> {
        request.check_required()?;

        if store.find_user_by_email(&request.email).await?.is_some() {
            return Err(AppError::Conflict("User with this email already exists".into()));
        }
        request.validate()?;

        let role = request.role.unwrap_or_default();
        if role == Role::Admin {
            if !self.allow_admin_registration {
                log::warn!("Refused admin self-registration for {}", request.email);
                return Err(AppError::Forbidden(
                    "Self-registration as admin is disabled".into(),
                ));
            }
            log::warn!("Admin account self-registered: {}", request.email);
        }

        let password_hash = hash_password(&request.password, self.bcrypt_cost)?;
        let user = store
            .insert_user(NewUser {
                email: request.email,
                username: request.username,
                password_hash,
                role,
            })
            .await?;

        log::info!("Registered user {} with role {}", user.id, user.role.as_str());
        Ok(user)
    }

    /// Verifies email and password and returns an access/refresh pair.
    pub async fn login(&self, store: &dyn Store, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.check()?;

        let user = match store.find_user_by_email(&request.email).await? {
            Some(user) if verify_password(&request.password, &user.password_hash)? => user,
            _ => {
                log::warn!("Failed login attempt for {}", request.email);
                return Err(AppError::Unauthorized("Invalid credentials".into()));
            }
        };

        let pair = self.tokens.issue_pair(&user)?;
        log::info!("User {} logged in", user.id);

        Ok(LoginResponse {
            access: pair.access,
            refresh: pair.refresh,
            user: UserSummary::from(&user),
        })
    }

    /// Exchanges a refresh token for a new access token.
    pub async fn refresh(&self, store: &dyn Store, refresh_token: &str) -> Result<String, AppError> {
        if refresh_token.is_empty() {
            return Err(AppError::Validation("Refresh token is required".into()));
        }

        let claims = self.tokens.verify(refresh_token, TokenType::Refresh)?;
        let user = store
            .find_user_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;

        self.tokens.issue(user.id, user.role, TokenType::Access)
    }
}
