use async_graphql::{EmptySubscription, Schema};

use super::mutations::MutationRoot;
use super::queries::QueryRoot;
use crate::auth::AuthService;
use crate::directory::DirectoryQuery;
use crate::posts::PostService;

/// GraphQL Schema type
pub type PostboardSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema. The per-request `Session` is attached at execution time.
pub fn build_schema(auth: AuthService, posts: PostService) -> PostboardSchema {
    let directory = DirectoryQuery::new(auth.clone(), posts.clone());
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(auth)
        .data(posts)
        .data(directory)
        .finish()
}
