use std::sync::Arc;

use crate::auth::{AccessPolicy, PostAction, Session};
use crate::db::models::{Post, User};
use crate::directory::UserDirectory;
use crate::error::{AppError, AppResult};
use crate::posts::domain::{is_known_category, NewPost, PostFilter, PostPatch};
use crate::posts::store::PostStore;

/// Post operations. Every mutation passes the access guard first.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostStore>,
    users: Arc<dyn UserDirectory>,
    policy: AccessPolicy,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostStore>,
        users: Arc<dyn UserDirectory>,
        policy: AccessPolicy,
    ) -> Self {
        Self {
            posts,
            users,
            policy,
        }
    }

    pub async fn list_posts(&self, filter: &PostFilter) -> AppResult<Vec<Post>> {
        self.posts.list(filter).await
    }

    /// The author's owner-list, derived from the posts table.
    pub async fn posts_by_author(&self, author_id: &str) -> AppResult<Vec<Post>> {
        self.posts.list_by_author(author_id).await
    }

    pub async fn find_author(&self, author_id: &str) -> AppResult<Option<User>> {
        self.users.find_by_id(author_id).await
    }

    pub async fn create_post(&self, session: &Session, new_post: NewPost) -> AppResult<Post> {
        self.policy.authorize(
            session,
            PostAction::Create {
                author_id: &new_post.author_id,
            },
        )?;

        if self.users.find_by_id(&new_post.author_id).await?.is_none() {
            return Err(AppError::UserNotFound);
        }

        if !is_known_category(&new_post.category) {
            tracing::debug!("Accepting post with unlisted category {:?}", new_post.category);
        }

        let post = self.posts.insert(&new_post).await?;
        tracing::info!(post_id = %post.id, author_id = %post.author_id, "Post created");
        Ok(post)
    }

    pub async fn edit_post(
        &self,
        session: &Session,
        post_id: &str,
        patch: &PostPatch,
    ) -> AppResult<Post> {
        let existing = self.load(post_id).await?;
        self.policy.authorize(
            session,
            PostAction::Edit {
                author_id: &existing.author_id,
            },
        )?;

        if patch.is_empty() {
            return Ok(existing);
        }

        let post = self
            .posts
            .update(post_id, patch)
            .await?
            .ok_or(AppError::PostNotFound)?;
        tracing::info!(post_id = %post.id, "Post edited");
        Ok(post)
    }

    /// Remove the post. Its id drops out of the author's owner-list with it.
    pub async fn delete_post(&self, session: &Session, post_id: &str) -> AppResult<Post> {
        let existing = self.load(post_id).await?;
        self.policy.authorize(
            session,
            PostAction::Delete {
                author_id: &existing.author_id,
            },
        )?;

        let post = self
            .posts
            .delete(post_id)
            .await?
            .ok_or(AppError::PostNotFound)?;
        tracing::info!(post_id = %post.id, author_id = %post.author_id, "Post deleted");
        Ok(post)
    }

    pub async fn like_post(&self, session: &Session, post_id: &str) -> AppResult<Post> {
        self.policy.authorize(session, PostAction::Like)?;

        self.posts
            .increment_likes(post_id)
            .await?
            .ok_or(AppError::PostNotFound)
    }

    async fn load(&self, post_id: &str) -> AppResult<Post> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or(AppError::PostNotFound)
    }
}
