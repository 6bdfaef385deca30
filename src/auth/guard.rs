use crate::auth::session::Session;
use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};

pub const LIKE_REQUIRES_LOGIN: &str = "You must be logged in to like a post";

/// A mutating post operation, carrying the owner it would touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction<'a> {
    Create { author_id: &'a str },
    Edit { author_id: &'a str },
    Delete { author_id: &'a str },
    Like,
}

impl PostAction<'_> {
    fn verb(&self) -> &'static str {
        match self {
            PostAction::Create { .. } => "create",
            PostAction::Edit { .. } => "edit",
            PostAction::Delete { .. } => "delete",
            PostAction::Like => "like",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    pub enforce_ownership: bool,
    pub require_login_to_like: bool,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            enforce_ownership: true,
            require_login_to_like: true,
        }
    }
}

impl From<&AuthConfig> for AccessPolicy {
    fn from(config: &AuthConfig) -> Self {
        Self {
            enforce_ownership: config.enforce_ownership,
            require_login_to_like: config.require_login_to_like,
        }
    }
}

impl AccessPolicy {
    /// Decide whether `session` may perform `action`.
    ///
    /// Ownership rules: the caller must be the (prospective) author or an admin.
    /// Likes only need a session.
    pub fn authorize(&self, session: &Session, action: PostAction<'_>) -> AppResult<()> {
        let author_id = match action {
            PostAction::Like => {
                if self.require_login_to_like && !session.is_authenticated() {
                    return Err(AppError::Unauthenticated(LIKE_REQUIRES_LOGIN.to_string()));
                }
                return Ok(());
            }
            PostAction::Create { author_id }
            | PostAction::Edit { author_id }
            | PostAction::Delete { author_id } => author_id,
        };

        if !self.enforce_ownership {
            return Ok(());
        }

        let caller = session.caller().ok_or_else(|| {
            AppError::Unauthenticated(format!("You must be logged in to {} a post", action.verb()))
        })?;

        if caller.is_admin || caller.user_id == author_id {
            return Ok(());
        }

        Err(match action {
            PostAction::Create { .. } => {
                AppError::Forbidden("You can only create posts as yourself".to_string())
            }
            _ => AppError::Forbidden(format!(
                "Only the author or an admin can {} this post",
                action.verb()
            )),
        })
    }
}
