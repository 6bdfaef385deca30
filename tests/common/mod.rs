#![allow(dead_code)]

use postboard::auth::SessionKey;
use postboard::config::Config;
use postboard::db;
use postboard::state::AppState;
use serde_json::{json, Value};
use tempfile::TempDir;

pub struct TestApp {
    pub state: AppState,
    _temp: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(mut config: Config) -> Self {
        let temp = TempDir::new().unwrap();
        config.database.path = Some(temp.path().join("test.db"));
        // Minimum cost keeps the suite fast
        config.auth.bcrypt_cost = 4;

        let pool = db::create_pool(&config.db_path()).expect("Failed to create test database");
        db::run_migrations(&pool).expect("Failed to run migrations");

        let state = AppState::new(pool, config, &SessionKey::from_secret("integration-secret"));
        Self { state, _temp: temp }
    }

    /// Execute a GraphQL document as the holder of `token` (or anonymously).
    pub async fn execute(&self, query: &str, variables: Value, token: Option<&str>) -> Value {
        let session = self.state.auth.session_for(token).await.unwrap();
        let request = async_graphql::Request::new(query)
            .variables(async_graphql::Variables::from_json(variables))
            .data(session);
        let response = self.state.graphql_schema.execute(request).await;
        serde_json::to_value(&response).unwrap()
    }

    /// Execute and assert success, returning `data`.
    pub async fn data(&self, query: &str, variables: Value, token: Option<&str>) -> Value {
        let response = self.execute(query, variables, token).await;
        let errors = &response["errors"];
        assert!(
            errors.is_null() || errors.as_array().is_some_and(|e| e.is_empty()),
            "Expected no errors, got: {}",
            errors
        );
        response["data"].clone()
    }

    /// Execute and assert failure, returning `(message, code)` of the first error.
    pub async fn error(&self, query: &str, variables: Value, token: Option<&str>) -> (String, String) {
        let response = self.execute(query, variables, token).await;
        let error = &response["errors"][0];
        assert!(!error.is_null(), "Expected an error, got: {}", response);
        (
            error["message"].as_str().unwrap().to_string(),
            error["extensions"]["code"].as_str().unwrap_or_default().to_string(),
        )
    }

    pub async fn signup(&self, username: &str, password: &str, admin: bool) {
        let data = self
            .data(
                "mutation($u: String!, $p: String!, $a: Boolean!) { signup(username: $u, password: $p, admin: $a) }",
                json!({ "u": username, "p": password, "a": admin }),
                None,
            )
            .await;
        assert_eq!(data["signup"], "User signed up successfully");
    }

    /// Returns `(user_id, token)`.
    pub async fn login(&self, username: &str, password: &str) -> (String, String) {
        let data = self
            .data(
                "mutation($u: String!, $p: String!) { login(username: $u, password: $p) { token user { _id username token } } }",
                json!({ "u": username, "p": password }),
                None,
            )
            .await;
        let login = &data["login"];
        assert_eq!(login["user"]["username"], username);
        assert_eq!(login["user"]["token"], login["token"]);
        (
            login["user"]["_id"].as_str().unwrap().to_string(),
            login["token"].as_str().unwrap().to_string(),
        )
    }

    pub async fn register(&self, username: &str, password: &str, admin: bool) -> (String, String) {
        self.signup(username, password, admin).await;
        self.login(username, password).await
    }

    /// Create a post as `token`'s holder and return its id.
    pub async fn create_post(&self, token: &str, user_id: &str, title: &str, time: &str) -> String {
        let data = self
            .data(
                CREATE_POST,
                json!({
                    "title": title,
                    "content": format!("{} details", title),
                    "userId": user_id,
                    "category": "exhibition",
                    "time": time,
                    "location": "Vilnius",
                }),
                Some(token),
            )
            .await;
        data["createPost"]["_id"].as_str().unwrap().to_string()
    }
}

pub const CREATE_POST: &str = r#"
    mutation($title: String!, $content: String!, $userId: ID!, $category: String!, $time: String!, $location: String!) {
        createPost(title: $title, content: $content, user_id: $userId, category: $category, time: $time, location: $location) {
            _id title content category time location likes
            author { _id username }
        }
    }
"#;

pub const GET_POSTS: &str = r#"
    query($time: String) {
        getPosts(time: $time) {
            _id title content category time location likes
            author { _id username token }
        }
    }
"#;

pub const LIKE_POST: &str = r#"
    mutation($postId: ID!) { likePost(postId: $postId) { _id likes } }
"#;

pub const DELETE_POST: &str = r#"
    mutation($id: ID!) { deletePost(post_id: $id) { _id title } }
"#;
