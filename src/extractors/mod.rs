//! Request extractors: admin guard, validated JSON bodies, id path parameters.

pub mod admin;
pub mod json;
pub mod path;

pub use admin::AdminSession;
pub use json::ValidJson;
pub use path::{EntityId, ProductId};
