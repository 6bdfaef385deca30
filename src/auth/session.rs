/// An authenticated caller, resolved from a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: String,
    pub username: String,
    pub is_admin: bool,
}

/// Per-request identity. Built once at the edge and handed to every
/// operation that needs to know who is asking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(Caller),
}

impl Session {
    pub fn caller(&self) -> Option<&Caller> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(caller) => Some(caller),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.caller().is_some()
    }
}

/// Pull the token out of an `Authorization` header value.
/// Accepts `Bearer <token>` (any case) as well as the bare token.
/// A scheme without a credential, or any other scheme, yields `None`.
pub fn token_from_header(value: &str) -> Option<&str> {
    let value = value.trim();
    let token = match value.split_once(char::is_whitespace) {
        Some((scheme, credential)) if scheme.eq_ignore_ascii_case("bearer") => credential.trim(),
        Some(_) => return None,
        None if value.eq_ignore_ascii_case("bearer") => return None,
        None => value,
    };
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
