//! Request middleware.

pub mod rate_limit;

pub use rate_limit::{enforce, Decision, LimitRule, RateLimiter, RateLimits};
