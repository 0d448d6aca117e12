//! Admin authentication: password hashing and server-side sessions.

pub mod password;
pub mod session;

pub use password::{hash_password, verify_password, DUMMY_HASH};
pub use session::{SessionRecord, SessionStore, DEFAULT_SESSION_TTL, SESSION_COOKIE};
