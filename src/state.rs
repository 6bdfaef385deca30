use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::auth::{AccessPolicy, AuthService, SessionKey, TokenSigner};
use crate::config::Config;
use crate::directory::{SqliteAdminRegistry, SqliteUserDirectory};
use crate::graphql::{build_schema, PostboardSchema};
use crate::posts::{PostService, SqlitePostStore};

pub type DbPool = Pool<SqliteConnectionManager>;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    pub auth: AuthService,
    pub posts: PostService,
    pub graphql_schema: PostboardSchema,
}

impl AppState {
    /// Wire the stores, services and schema on top of a migrated pool.
    pub fn new(db: DbPool, config: Config, key: &SessionKey) -> Self {
        let users = Arc::new(SqliteUserDirectory::new(db.clone()));
        let admins = Arc::new(SqliteAdminRegistry::new(db.clone()));
        let store = Arc::new(SqlitePostStore::new(db.clone()));

        let auth = AuthService::new(
            users.clone(),
            admins,
            TokenSigner::new(key),
            config.auth.bcrypt_cost,
        );
        let posts = PostService::new(store, users, AccessPolicy::from(&config.auth));
        let graphql_schema = build_schema(auth.clone(), posts.clone());

        Self {
            db,
            config,
            auth,
            posts,
            graphql_schema,
        }
    }
}
