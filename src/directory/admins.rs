use async_trait::async_trait;
use rusqlite::{params, Connection};

use crate::db::models::AdminGrant;
use crate::error::AppResult;
use crate::state::DbPool;

#[async_trait]
pub trait AdminRegistry: Send + Sync {
    /// True iff at least one grant row references `user_id`.
    async fn is_admin(&self, user_id: &str) -> AppResult<bool>;
}

/// Insert a grant row on an existing connection so callers can make it part
/// of a larger transaction.
pub fn insert_grant(conn: &Connection, user_id: &str) -> rusqlite::Result<AdminGrant> {
    let grant = AdminGrant {
        id: uuid::Uuid::now_v7().to_string(),
        user_id: user_id.to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    conn.execute(
        "INSERT INTO admins (id, user_id, created_at) VALUES (?1, ?2, ?3)",
        params![grant.id, grant.user_id, grant.created_at],
    )?;
    Ok(grant)
}

pub struct SqliteAdminRegistry {
    pool: DbPool,
}

impl SqliteAdminRegistry {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRegistry for SqliteAdminRegistry {
    async fn is_admin(&self, user_id: &str) -> AppResult<bool> {
        let conn = self.pool.get()?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM admins WHERE user_id = ?1)",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}
