use rusqlite::Row;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Session token minted at the most recent login.
    pub token: Option<String>,
    pub created_at: String,
}

impl User {
    pub const COLUMNS: &'static str = "id, username, password_hash, token, created_at";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            username: row.get(1)?,
            password_hash: row.get(2)?,
            token: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminGrant {
    pub id: String,
    pub user_id: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub likes: i64,
    pub category: String,
    pub time: String,
    pub location: String,
    pub created_at: String,
}

impl Post {
    pub const COLUMNS: &'static str =
        "id, title, content, author_id, likes, category, time, location, created_at";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            author_id: row.get(3)?,
            likes: row.get(4)?,
            category: row.get(5)?,
            time: row.get(6)?,
            location: row.get(7)?,
            created_at: row.get(8)?,
        })
    }
}
