//! Route tables. Each function applies the state and returns a `Router` for nesting under `/api`.

mod admin;
mod catalog;
mod common;

pub use admin::admin_routes;
pub use catalog::catalog_routes;
pub use common::common_routes;

use crate::middleware::{enforce, RateLimiter};
use axum::middleware::from_fn_with_state;
use axum::routing::MethodRouter;
use std::sync::Arc;

/// Put `route` behind `limiter`. Only the methods registered on `route` are counted.
pub(crate) fn limited<S>(route: MethodRouter<S>, limiter: &Arc<RateLimiter>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.layer(from_fn_with_state(limiter.clone(), enforce))
}
