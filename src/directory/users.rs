use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use crate::db::models::User;
use crate::directory::admins::insert_grant;
use crate::error::{AppError, AppResult};
use crate::state::DbPool;

/// Account to be registered. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub admin: bool,
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// The user currently holding exactly this session token.
    async fn find_by_token(&self, token: &str) -> AppResult<Option<User>>;

    /// Persist a user (and its admin grant, if requested) atomically.
    /// Fails with `DuplicateUsername` if the name is taken.
    async fn register(&self, new_user: &NewUser) -> AppResult<User>;

    /// Overwrite the user's active session token.
    async fn set_token(&self, user_id: &str, token: &str) -> AppResult<()>;
}

pub struct SqliteUserDirectory {
    pool: DbPool,
}

impl SqliteUserDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn find_one(&self, column: &str, value: &str) -> AppResult<Option<User>> {
        let conn = self.pool.get()?;
        let user = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE {} = ?1", User::COLUMNS, column),
                params![value],
                User::from_row,
            )
            .optional()?;
        Ok(user)
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

#[async_trait]
impl UserDirectory for SqliteUserDirectory {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.find_one("id", id)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.find_one("username", username)
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<User>> {
        self.find_one("token", token)
    }

    async fn register(&self, new_user: &NewUser) -> AppResult<User> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let user = User {
            id: uuid::Uuid::now_v7().to_string(),
            username: new_user.username.clone(),
            password_hash: new_user.password_hash.clone(),
            token: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        tx.execute(
            "INSERT INTO users (id, username, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![user.id, user.username, user.password_hash, user.created_at],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateUsername
            } else {
                AppError::Database(e)
            }
        })?;

        if new_user.admin {
            insert_grant(&tx, &user.id)?;
        }

        tx.commit()?;
        Ok(user)
    }

    async fn set_token(&self, user_id: &str, token: &str) -> AppResult<()> {
        let conn = self.pool.get()?;
        let rows = conn.execute(
            "UPDATE users SET token = ?1 WHERE id = ?2",
            params![token, user_id],
        )?;
        if rows == 0 {
            return Err(AppError::UserNotFound);
        }
        Ok(())
    }
}
