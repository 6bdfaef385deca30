//! Accounts, admin grants and the user-with-posts lookups.

pub mod admins;
pub mod query;
pub mod users;

pub use admins::{AdminRegistry, SqliteAdminRegistry};
pub use query::{DirectoryQuery, UserWithPosts};
pub use users::{NewUser, SqliteUserDirectory, UserDirectory};
