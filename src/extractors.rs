use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::auth::session::token_from_header;
use crate::auth::Session;
use crate::state::AppState;

/// Resolves the `Authorization` header into a `Session`.
/// Missing or unknown tokens give an anonymous session rather than a 401;
/// each operation decides for itself whether it needs a caller.
/// A lookup failure also degrades to anonymous so the request still gets
/// a GraphQL response.
impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(token_from_header);

        match state.auth.session_for(token).await {
            Ok(session) => Ok(session),
            Err(err) => {
                err.log("resolve session");
                Ok(Session::Anonymous)
            }
        }
    }
}
