use async_graphql::*;

use crate::auth::AuthService;
use crate::graphql::types::{AuthPayload, Post, User};
use crate::graphql::{gql_error, session};
use crate::posts::{NewPost, PostPatch, PostService};

pub const SIGNUP_CONFIRMATION: &str = "User signed up successfully";

/// GraphQL Mutation root
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Register an account. Log in afterwards to get a token.
    async fn signup(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
        admin: bool,
    ) -> Result<String> {
        let auth = ctx.data::<AuthService>()?;
        auth.signup(&username, &password, admin)
            .await
            .map_err(gql_error("signup"))?;
        Ok(SIGNUP_CONFIRMATION.to_string())
    }

    /// Check credentials and issue a new session token
    async fn login(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> Result<AuthPayload> {
        let auth = ctx.data::<AuthService>()?;
        let outcome = auth
            .login(&username, &password)
            .await
            .map_err(gql_error("login"))?;
        Ok(AuthPayload {
            token: outcome.token,
            user: User::owner_view(outcome.user),
        })
    }

    #[allow(clippy::too_many_arguments)]
    async fn create_post(
        &self,
        ctx: &Context<'_>,
        title: String,
        content: String,
        #[graphql(name = "user_id")] user_id: ID,
        category: String,
        time: String,
        location: String,
    ) -> Result<Post> {
        let posts = ctx.data::<PostService>()?;
        let new_post = NewPost {
            title,
            content,
            author_id: user_id.to_string(),
            category,
            time,
            location,
        };
        let post = posts
            .create_post(&session(ctx), new_post)
            .await
            .map_err(gql_error("createPost"))?;
        Ok(post.into())
    }

    /// Overwrite the provided fields. Omitted or null fields are kept.
    #[allow(clippy::too_many_arguments)]
    async fn edit_post(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "post_id")] post_id: ID,
        title: Option<String>,
        content: Option<String>,
        category: Option<String>,
        time: Option<String>,
        location: Option<String>,
    ) -> Result<Post> {
        let posts = ctx.data::<PostService>()?;
        let patch = PostPatch {
            title,
            content,
            category,
            time,
            location,
        };
        let post = posts
            .edit_post(&session(ctx), post_id.as_str(), &patch)
            .await
            .map_err(gql_error("editPost"))?;
        Ok(post.into())
    }

    /// Remove a post and return it as it was
    async fn delete_post(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "post_id")] post_id: ID,
    ) -> Result<Post> {
        let posts = ctx.data::<PostService>()?;
        let post = posts
            .delete_post(&session(ctx), post_id.as_str())
            .await
            .map_err(gql_error("deletePost"))?;
        Ok(post.into())
    }

    /// Add one like
    async fn like_post(&self, ctx: &Context<'_>, post_id: ID) -> Result<Post> {
        let posts = ctx.data::<PostService>()?;
        let post = posts
            .like_post(&session(ctx), post_id.as_str())
            .await
            .map_err(gql_error("likePost"))?;
        Ok(post.into())
    }
}
