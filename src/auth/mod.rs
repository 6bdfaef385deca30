pub mod guard;
pub mod password;
pub mod service;
pub mod session;
pub mod session_key;
pub mod tokens;

pub use guard::{AccessPolicy, PostAction};
pub use service::{AuthService, LoginOutcome};
pub use session::{Caller, Session};
pub use session_key::SessionKey;
pub use tokens::TokenSigner;
