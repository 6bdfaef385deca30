use async_graphql::*;

use crate::db::models;
use crate::directory::UserWithPosts;
use crate::error::AppError;
use crate::graphql::gql_error;
use crate::posts::PostService;

/// A tagged event post
#[derive(Clone, Debug, SimpleObject)]
#[graphql(complex)]
pub struct Post {
    #[graphql(name = "_id")]
    pub id: ID,

    pub title: String,

    pub content: String,

    /// convention, festival, exhibition or fair (not enforced)
    pub category: String,

    /// Free-form, matched exactly by `getPosts(time:)`
    pub time: String,

    pub location: String,

    pub likes: i32,

    /// RFC3339 creation timestamp
    pub created_at: String,

    #[graphql(skip)]
    pub author_id: String,
}

#[ComplexObject]
impl Post {
    async fn author(&self, ctx: &Context<'_>) -> Result<User> {
        let posts = ctx.data::<PostService>()?;
        posts
            .find_author(&self.author_id)
            .await
            .and_then(|user| user.ok_or(AppError::UserNotFound))
            .map(User::public)
            .map_err(gql_error("Post.author"))
    }
}

impl From<models::Post> for Post {
    fn from(post: models::Post) -> Self {
        Self {
            id: ID(post.id),
            title: post.title,
            content: post.content,
            category: post.category,
            time: post.time,
            location: post.location,
            likes: i32::try_from(post.likes).unwrap_or(i32::MAX),
            created_at: post.created_at,
            author_id: post.author_id,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(complex)]
pub struct User {
    #[graphql(name = "_id")]
    pub id: ID,

    pub username: String,

    /// Active session token. Only present when the caller presented it.
    pub token: Option<String>,

    #[graphql(skip)]
    pub preloaded_posts: Option<Vec<Post>>,
}

#[ComplexObject]
impl User {
    /// Posts this user authored
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        if let Some(posts) = &self.preloaded_posts {
            return Ok(posts.clone());
        }
        let service = ctx.data::<PostService>()?;
        let posts = service
            .posts_by_author(self.id.as_str())
            .await
            .map_err(gql_error("User.posts"))?;
        Ok(posts.into_iter().map(Post::from).collect())
    }
}

impl User {
    /// A user as seen by others: no token.
    pub fn public(user: models::User) -> Self {
        Self {
            id: ID(user.id),
            username: user.username,
            token: None,
            preloaded_posts: None,
        }
    }

    /// A user as seen by the holder of its session token.
    pub fn owner_view(user: models::User) -> Self {
        let token = user.token.clone();
        Self {
            token,
            ..Self::public(user)
        }
    }

    pub fn with_posts(found: UserWithPosts, expose_token: bool) -> Self {
        let posts = found.posts.into_iter().map(Post::from).collect();
        let mut user = if expose_token {
            Self::owner_view(found.user)
        } else {
            Self::public(found.user)
        };
        user.preloaded_posts = Some(posts);
        user
    }
}

/// Returned by `login`
#[derive(SimpleObject)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}
