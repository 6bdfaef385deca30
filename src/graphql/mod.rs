pub mod mutations;
pub mod queries;
pub mod schema;
pub mod types;

use async_graphql::{Context, ErrorExtensions};

use crate::auth::Session;
use crate::error::AppError;

pub use schema::{build_schema, PostboardSchema};

/// Log the failure, then turn it into a GraphQL error with a `code` extension.
pub(crate) fn gql_error(operation: &str) -> impl FnOnce(AppError) -> async_graphql::Error + '_ {
    move |err| {
        err.log(operation);
        err.extend()
    }
}

/// The request's session. Requests executed without one are anonymous.
pub(crate) fn session(ctx: &Context<'_>) -> Session {
    ctx.data_opt::<Session>().cloned().unwrap_or_default()
}
