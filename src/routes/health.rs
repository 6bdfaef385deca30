use axum::extract::State;
use axum::routing::get;
use axum::Router;

use crate::error::AppResult;
use crate::state::AppState;

/// Liveness plus a round trip to the database.
async fn health(State(state): State<AppState>) -> AppResult<&'static str> {
    let conn = state.db.get()?;
    conn.query_row("SELECT 1", [], |_| Ok(()))?;
    Ok("ok")
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
