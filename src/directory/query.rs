use crate::auth::AuthService;
use crate::db::models::{Post, User};
use crate::error::AppResult;
use crate::posts::PostService;

/// A user together with the posts they authored.
#[derive(Debug, Clone, PartialEq)]
pub struct UserWithPosts {
    pub user: User,
    pub posts: Vec<Post>,
}

/// Read-side lookups for the "my posts" views.
#[derive(Clone)]
pub struct DirectoryQuery {
    auth: AuthService,
    posts: PostService,
}

impl DirectoryQuery {
    pub fn new(auth: AuthService, posts: PostService) -> Self {
        Self { auth, posts }
    }

    pub async fn user_by_token(&self, token: &str) -> AppResult<Option<UserWithPosts>> {
        match self.auth.resolve_session(token).await? {
            Some(user) => self.attach_posts(user).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn user_with_posts(&self, user_id: &str) -> AppResult<Option<UserWithPosts>> {
        match self.auth.find_user(user_id).await? {
            Some(user) => self.attach_posts(user).await.map(Some),
            None => Ok(None),
        }
    }

    async fn attach_posts(&self, user: User) -> AppResult<UserWithPosts> {
        let posts = self.posts.posts_by_author(&user.id).await?;
        Ok(UserWithPosts { user, posts })
    }
}
