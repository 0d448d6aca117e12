//! Row records returned by the API and request records accepted by it.

pub mod admin;
pub mod banner;
pub mod product;
pub mod rating;
pub mod taxonomy;

pub use admin::*;
pub use banner::*;
pub use product::*;
pub use rating::*;
pub use taxonomy::*;
