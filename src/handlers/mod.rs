//! HTTP handlers: extract, call a service, wrap the result in the response envelope.

pub mod admin;
pub mod banner;
pub mod product;
pub mod rating;
pub mod system;
pub mod taxonomy;
