pub mod domain;
pub mod service;
pub mod store;

pub use domain::{NewPost, PostFilter, PostPatch};
pub use service::PostService;
pub use store::{PostStore, SqlitePostStore};
