use std::sync::Arc;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::session::{Caller, Session};
use crate::auth::tokens::TokenSigner;
use crate::db::models::User;
use crate::directory::{AdminRegistry, NewUser, UserDirectory};
use crate::error::{AppError, AppResult};

/// Result of a successful login. `user.token` already holds `token`.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

/// Credentials, session tokens and the admin check.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserDirectory>,
    admins: Arc<dyn AdminRegistry>,
    tokens: TokenSigner,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        admins: Arc<dyn AdminRegistry>,
        tokens: TokenSigner,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            admins,
            tokens,
            bcrypt_cost,
        }
    }

    /// Register a new account. No token is issued; the caller logs in next.
    pub async fn signup(&self, username: &str, password: &str, wants_admin: bool) -> AppResult<User> {
        require("Username", username)?;
        require("Password", password)?;

        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::DuplicateUsername);
        }

        let password_hash = hash_password(password, self.bcrypt_cost).await?;
        let user = self
            .users
            .register(&NewUser {
                username: username.to_string(),
                password_hash,
                admin: wants_admin,
            })
            .await?;

        tracing::info!(user_id = %user.id, admin = wants_admin, "User signed up: {}", user.username);
        Ok(user)
    }

    /// Check credentials and mint a fresh session token, replacing the old one.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        require("Username", username)?;
        require("Password", password)?;

        let mut user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !verify_password(password, &user.password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.id)?;
        self.users.set_token(&user.id, &token).await?;
        user.token = Some(token.clone());

        tracing::info!(user_id = %user.id, "User logged in: {}", user.username);
        Ok(LoginOutcome { token, user })
    }

    /// The user currently holding exactly this token, if any.
    ///
    /// The stored token is authoritative; the signature is checked as well
    /// and must name the same user.
    pub async fn resolve_session(&self, token: &str) -> AppResult<Option<User>> {
        if token.is_empty() {
            return Ok(None);
        }

        let Some(user) = self.users.find_by_token(token).await? else {
            return Ok(None);
        };

        match self.tokens.verify(token) {
            Ok(claims) if claims.sub == user.id => Ok(Some(user)),
            Ok(_) => {
                tracing::warn!(user_id = %user.id, "Stored session token names a different user");
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(user_id = %user.id, "Stored session token failed verification: {}", e);
                Ok(None)
            }
        }
    }

    pub async fn is_admin(&self, user_id: &str) -> AppResult<bool> {
        self.admins.is_admin(user_id).await
    }

    pub async fn find_user(&self, user_id: &str) -> AppResult<Option<User>> {
        self.users.find_by_id(user_id).await
    }

    /// Build the per-request session from an optional bearer token.
    /// Unknown or invalid tokens yield an anonymous session.
    pub async fn session_for(&self, token: Option<&str>) -> AppResult<Session> {
        let Some(token) = token else {
            return Ok(Session::Anonymous);
        };
        let Some(user) = self.resolve_session(token).await? else {
            tracing::debug!("Request carried an unknown session token");
            return Ok(Session::Anonymous);
        };

        let is_admin = self.is_admin(&user.id).await?;
        Ok(Session::Authenticated(Caller {
            user_id: user.id,
            username: user.username,
            is_admin,
        }))
    }
}

fn require(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}
