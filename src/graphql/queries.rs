use async_graphql::*;

use crate::auth::AuthService;
use crate::directory::DirectoryQuery;
use crate::graphql::types::{Post, User};
use crate::graphql::{gql_error, session};
use crate::posts::{PostFilter, PostService};

/// GraphQL Query root
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Connectivity check
    async fn hello(&self) -> &'static str {
        "Hello world!"
    }

    /// The account behind the request's `Authorization` header, with its posts
    async fn current_user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let Some(caller) = session(ctx).caller().cloned() else {
            return Ok(None);
        };
        let directory = ctx.data::<DirectoryQuery>()?;
        let found = directory
            .user_with_posts(&caller.user_id)
            .await
            .map_err(gql_error("currentUser"))?;
        Ok(found.map(|found| User::with_posts(found, true)))
    }

    /// Look up a user by session token, with their posts
    async fn get_user(&self, ctx: &Context<'_>, token: String) -> Result<Option<User>> {
        let directory = ctx.data::<DirectoryQuery>()?;
        let found = directory
            .user_by_token(&token)
            .await
            .map_err(gql_error("getUser"))?;
        Ok(found.map(|found| User::with_posts(found, true)))
    }

    /// All posts, optionally only those whose time equals `time`
    async fn get_posts(&self, ctx: &Context<'_>, time: Option<String>) -> Result<Vec<Post>> {
        let posts = ctx.data::<PostService>()?;
        let filter = PostFilter { time };
        let found = posts
            .list_posts(&filter)
            .await
            .map_err(gql_error("getPosts"))?;
        Ok(found.into_iter().map(Post::from).collect())
    }

    /// Look up a user by id, with their posts
    #[graphql(name = "GetCurrentUserWithPosts")]
    async fn get_current_user_with_posts(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "user_id")] user_id: ID,
    ) -> Result<Option<User>> {
        let directory = ctx.data::<DirectoryQuery>()?;
        let found = directory
            .user_with_posts(user_id.as_str())
            .await
            .map_err(gql_error("GetCurrentUserWithPosts"))?;
        Ok(found.map(|found| User::with_posts(found, false)))
    }

    /// Whether `userId` holds an admin grant
    async fn check_admin(&self, ctx: &Context<'_>, user_id: ID) -> Result<bool> {
        let auth = ctx.data::<AuthService>()?;
        auth.is_admin(user_id.as_str())
            .await
            .map_err(gql_error("checkAdmin"))
    }
}
