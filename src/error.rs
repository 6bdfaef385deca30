use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Username already exists")]
    DuplicateUsername,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidCredentials,

    #[error("Post not found")]
    PostNotFound,

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code, exposed as `extensions.code` on GraphQL errors.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::DuplicateUsername => "DUPLICATE_USERNAME",
            AppError::UserNotFound => "USER_NOT_FOUND",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::PostNotFound => "POST_NOT_FOUND",
            AppError::Unauthenticated(_) => "UNAUTHENTICATED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Database(_)
            | AppError::Pool(_)
            | AppError::Token(_)
            | AppError::Hash(_)
            | AppError::Internal(_) => "INTERNAL",
        }
    }

    pub fn is_internal(&self) -> bool {
        self.code() == "INTERNAL"
    }

    /// Message safe to hand to the caller. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        if self.is_internal() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DuplicateUsername => StatusCode::CONFLICT,
            AppError::UserNotFound | AppError::PostNotFound => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials | AppError::Unauthenticated(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Log at a level matching who is at fault.
    pub fn log(&self, operation: &str) {
        if self.is_internal() {
            tracing::error!("{} failed: {}", operation, self);
        } else {
            tracing::warn!("{} rejected: {}", operation, self);
        }
    }
}

impl async_graphql::ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.public_message()).extend_with(|_, e| e.set("code", code))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_internal() {
            tracing::error!("{}", self);
        }
        (self.status(), self.public_message()).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::ErrorExtensions;

    fn response_status(err: AppError) -> StatusCode {
        let response = err.into_response();
        response.status()
    }

    #[test]
    fn not_found_errors_return_404() {
        assert_eq!(response_status(AppError::UserNotFound), StatusCode::NOT_FOUND);
        assert_eq!(response_status(AppError::PostNotFound), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicate_username_returns_409() {
        assert_eq!(
            response_status(AppError::DuplicateUsername),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn auth_errors_map_to_401_and_403() {
        assert_eq!(
            response_status(AppError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            response_status(AppError::Unauthenticated("log in".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            response_status(AppError::Forbidden("nope".into())),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn internal_returns_500() {
        assert_eq!(
            response_status(AppError::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn user_facing_messages() {
        assert_eq!(AppError::DuplicateUsername.to_string(), "Username already exists");
        assert_eq!(AppError::UserNotFound.to_string(), "User not found");
        assert_eq!(AppError::InvalidCredentials.to_string(), "Invalid password");
        assert_eq!(AppError::PostNotFound.to_string(), "Post not found");
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let err = AppError::Database(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err.code(), "INTERNAL");
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn graphql_error_carries_code_extension() {
        let err = AppError::PostNotFound.extend();
        assert_eq!(err.message, "Post not found");
        let ext = err.extensions.expect("extensions set");
        assert_eq!(
            ext.get("code"),
            Some(&async_graphql::Value::from("POST_NOT_FOUND"))
        );
    }
}
