// Post persistence. Each write is a single statement, so there is no
// partially applied state to clean up.
use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use crate::db::models::Post;
use crate::error::AppResult;
use crate::posts::domain::{NewPost, PostFilter, PostPatch};
use crate::state::DbPool;

#[async_trait]
pub trait PostStore: Send + Sync {
    /// All posts matching the filter, in insertion order.
    async fn list(&self, filter: &PostFilter) -> AppResult<Vec<Post>>;

    /// Posts written by `author_id`. This is the user's owner-list.
    async fn list_by_author(&self, author_id: &str) -> AppResult<Vec<Post>>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Post>>;

    async fn insert(&self, post: &NewPost) -> AppResult<Post>;

    /// Apply the provided fields. `None` if no such post.
    async fn update(&self, id: &str, patch: &PostPatch) -> AppResult<Option<Post>>;

    /// Remove and return the post. `None` if no such post.
    async fn delete(&self, id: &str) -> AppResult<Option<Post>>;

    /// Atomically add one like. `None` if no such post.
    async fn increment_likes(&self, id: &str) -> AppResult<Option<Post>>;
}

pub struct SqlitePostStore {
    pool: DbPool,
}

impl SqlitePostStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for SqlitePostStore {
    async fn list(&self, filter: &PostFilter) -> AppResult<Vec<Post>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM posts WHERE (?1 IS NULL OR time = ?1) ORDER BY rowid",
            Post::COLUMNS
        ))?;
        let posts = stmt
            .query_map(params![filter.time], Post::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(posts)
    }

    async fn list_by_author(&self, author_id: &str) -> AppResult<Vec<Post>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM posts WHERE author_id = ?1 ORDER BY rowid",
            Post::COLUMNS
        ))?;
        let posts = stmt
            .query_map(params![author_id], Post::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(posts)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Post>> {
        let conn = self.pool.get()?;
        let post = conn
            .query_row(
                &format!("SELECT {} FROM posts WHERE id = ?1", Post::COLUMNS),
                params![id],
                Post::from_row,
            )
            .optional()?;
        Ok(post)
    }

    async fn insert(&self, post: &NewPost) -> AppResult<Post> {
        let conn = self.pool.get()?;
        let id = uuid::Uuid::now_v7().to_string();
        let created_at = chrono::Utc::now().to_rfc3339();

        let inserted = conn.query_row(
            &format!(
                "INSERT INTO posts (id, title, content, author_id, likes, category, time, location, created_at)
                 VALUES (?1, ?2, ?3, ?4, 0, ?5, ?6, ?7, ?8)
                 RETURNING {}",
                Post::COLUMNS
            ),
            params![
                id,
                post.title,
                post.content,
                post.author_id,
                post.category,
                post.time,
                post.location,
                created_at,
            ],
            Post::from_row,
        )?;
        Ok(inserted)
    }

    async fn update(&self, id: &str, patch: &PostPatch) -> AppResult<Option<Post>> {
        let conn = self.pool.get()?;
        let updated = conn
            .query_row(
                &format!(
                    "UPDATE posts SET
                       title = COALESCE(?2, title),
                       content = COALESCE(?3, content),
                       category = COALESCE(?4, category),
                       time = COALESCE(?5, time),
                       location = COALESCE(?6, location)
                     WHERE id = ?1
                     RETURNING {}",
                    Post::COLUMNS
                ),
                params![
                    id,
                    patch.title,
                    patch.content,
                    patch.category,
                    patch.time,
                    patch.location,
                ],
                Post::from_row,
            )
            .optional()?;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> AppResult<Option<Post>> {
        let conn = self.pool.get()?;
        let deleted = conn
            .query_row(
                &format!("DELETE FROM posts WHERE id = ?1 RETURNING {}", Post::COLUMNS),
                params![id],
                Post::from_row,
            )
            .optional()?;
        Ok(deleted)
    }

    async fn increment_likes(&self, id: &str) -> AppResult<Option<Post>> {
        let conn = self.pool.get()?;
        let liked = conn
            .query_row(
                &format!(
                    "UPDATE posts SET likes = likes + 1 WHERE id = ?1 RETURNING {}",
                    Post::COLUMNS
                ),
                params![id],
                Post::from_row,
            )
            .optional()?;
        Ok(liked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use tempfile::TempDir;

    fn create_test_store() -> (SqlitePostStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let pool = db::create_pool(&temp_dir.path().join("test.db")).unwrap();
        db::run_migrations(&pool).unwrap();

        let conn = pool.get().unwrap();
        conn.execute(
            "INSERT INTO users (id, username, password_hash, created_at)
             VALUES ('u1', 'alice', 'x', 'now'), ('u2', 'bob', 'y', 'now')",
            [],
        )
        .unwrap();

        (SqlitePostStore::new(pool), temp_dir)
    }

    fn new_post(author_id: &str, title: &str, time: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: "Details inside".to_string(),
            author_id: author_id.to_string(),
            category: "fair".to_string(),
            time: time.to_string(),
            location: "Kaunas".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_starts_with_zero_likes() {
        let (store, _temp) = create_test_store();
        let post = store.insert(&new_post("u1", "Expo", "2024-06-01")).await.unwrap();

        assert_eq!(post.likes, 0);
        assert_eq!(post.author_id, "u1");
        assert_eq!(store.find_by_id(&post.id).await.unwrap(), Some(post));
    }

    #[tokio::test]
    async fn insert_rejects_unknown_author() {
        let (store, _temp) = create_test_store();
        assert!(store
            .insert(&new_post("ghost", "Expo", "2024-06-01"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn list_filters_by_exact_time() {
        let (store, _temp) = create_test_store();
        let a = store.insert(&new_post("u1", "A", "2024-06-01")).await.unwrap();
        let b = store.insert(&new_post("u2", "B", "2024-06-02")).await.unwrap();
        let c = store.insert(&new_post("u1", "C", "2024-06-01")).await.unwrap();

        let all = store.list(&PostFilter::default()).await.unwrap();
        assert_eq!(all, vec![a.clone(), b.clone(), c.clone()]);

        let june_first = store.list(&PostFilter::by_time("2024-06-01")).await.unwrap();
        assert_eq!(june_first, vec![a, c]);

        let prefix = store.list(&PostFilter::by_time("2024-06")).await.unwrap();
        assert!(prefix.is_empty());
    }

    #[tokio::test]
    async fn list_by_author_is_the_owner_list() {
        let (store, _temp) = create_test_store();
        let a = store.insert(&new_post("u1", "A", "t")).await.unwrap();
        store.insert(&new_post("u2", "B", "t")).await.unwrap();

        let mine = store.list_by_author("u1").await.unwrap();
        assert_eq!(mine, vec![a.clone()]);

        store.delete(&a.id).await.unwrap();
        assert!(store.list_by_author("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_only_touches_provided_fields() {
        let (store, _temp) = create_test_store();
        let post = store.insert(&new_post("u1", "Expo", "2024-06-01")).await.unwrap();

        let patch = PostPatch {
            title: Some("Expo 2024".to_string()),
            location: Some(String::new()),
            ..Default::default()
        };
        let updated = store.update(&post.id, &patch).await.unwrap().unwrap();

        assert_eq!(updated.title, "Expo 2024");
        assert_eq!(updated.location, "");
        assert_eq!(updated.content, post.content);
        assert_eq!(updated.category, post.category);
        assert_eq!(updated.time, post.time);
        assert_eq!(updated.likes, post.likes);
    }

    #[tokio::test]
    async fn update_missing_post_returns_none() {
        let (store, _temp) = create_test_store();
        let patch = PostPatch {
            title: Some("x".to_string()),
            ..Default::default()
        };
        assert_eq!(store.update("nope", &patch).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_returns_removed_post() {
        let (store, _temp) = create_test_store();
        let post = store.insert(&new_post("u1", "Expo", "t")).await.unwrap();

        assert_eq!(store.delete(&post.id).await.unwrap(), Some(post.clone()));
        assert_eq!(store.find_by_id(&post.id).await.unwrap(), None);
        assert_eq!(store.delete(&post.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn increment_likes_adds_one_each_time() {
        let (store, _temp) = create_test_store();
        let post = store.insert(&new_post("u1", "Expo", "t")).await.unwrap();

        for expected in 1..=3 {
            let liked = store.increment_likes(&post.id).await.unwrap().unwrap();
            assert_eq!(liked.likes, expected);
        }
        assert_eq!(store.increment_likes("nope").await.unwrap(), None);
    }
}
