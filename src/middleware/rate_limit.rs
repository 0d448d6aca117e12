//! Fixed-window request limits per client IP, one limiter per route class.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("ratelimit-limit");
const RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("ratelimit-remaining");
const RATELIMIT_RESET: HeaderName = HeaderName::from_static("ratelimit-reset");

#[derive(Clone, Debug)]
pub struct LimitRule {
    pub name: &'static str,
    pub max: u32,
    pub window: Duration,
    pub message: &'static str,
    /// Human-readable window echoed in 429 bodies ("15 minutes").
    pub retry_after: &'static str,
    /// Successful responses give their slot back (login attempts).
    pub skip_successful: bool,
}

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
}

/// Per-client windows plus the time of the last sweep of expired ones.
#[derive(Debug)]
struct Table {
    windows: HashMap<IpAddr, Window>,
    swept: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed { remaining: u32, reset: Duration },
    Limited { retry_after: Duration },
}

#[derive(Debug)]
pub struct RateLimiter {
    rule: LimitRule,
    table: Mutex<Table>,
}

impl RateLimiter {
    pub fn new(rule: LimitRule) -> Self {
        RateLimiter {
            rule,
            table: Mutex::new(Table {
                windows: HashMap::new(),
                swept: Instant::now(),
            }),
        }
    }

    pub fn rule(&self) -> &LimitRule {
        &self.rule
    }

    pub fn hit(&self, client: IpAddr) -> Decision {
        self.hit_at(client, Instant::now())
    }

    /// Count one request from `client` at `now`. Expired windows are dropped
    /// at most once per window length.
    pub fn hit_at(&self, client: IpAddr, now: Instant) -> Decision {
        let window = self.rule.window;
        let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        if now.saturating_duration_since(table.swept) >= window {
            table.windows.retain(|_, w| now.saturating_duration_since(w.started) < window);
            table.swept = now;
        }
        let entry = table.windows.entry(client).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.saturating_duration_since(entry.started) >= window {
            entry.started = now;
            entry.count = 0;
        }
        let reset = window.saturating_sub(now.saturating_duration_since(entry.started));
        if entry.count >= self.rule.max {
            return Decision::Limited { retry_after: reset };
        }
        entry.count += 1;
        Decision::Allowed {
            remaining: self.rule.max - entry.count,
            reset,
        }
    }

    /// Give back one slot for `client` (used for successful requests when `skip_successful`).
    pub fn release(&self, client: IpAddr) {
        let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(w) = table.windows.get_mut(&client) {
            w.count = w.count.saturating_sub(1);
        }
    }
}

/// The limiters the router applies, by route class.
#[derive(Clone, Debug)]
pub struct RateLimits {
    pub general: Arc<RateLimiter>,
    pub write: Arc<RateLimiter>,
    pub admin: Arc<RateLimiter>,
    pub login: Arc<RateLimiter>,
    pub rating: Arc<RateLimiter>,
    pub diagnostic: Arc<RateLimiter>,
}

const FIFTEEN_MINUTES: Duration = Duration::from_secs(15 * 60);

impl RateLimits {
    /// Ceilings used in production.
    pub fn standard() -> Self {
        RateLimits {
            general: limiter("general", 100, FIFTEEN_MINUTES, "Too many requests from this IP, please try again later.", "15 minutes", false),
            write: limiter("write", 50, FIFTEEN_MINUTES, "Too many write requests from this IP, please try again later.", "15 minutes", false),
            admin: limiter("admin", 1000, FIFTEEN_MINUTES, "Too many admin requests from this IP, please try again later.", "15 minutes", false),
            login: limiter("login", 5, FIFTEEN_MINUTES, "Too many login attempts from this IP, please try again later.", "15 minutes", true),
            rating: limiter("rating", 5, Duration::from_secs(60 * 60), "Too many rating submissions from this IP, please try again later.", "1 hour", false),
            diagnostic: limiter("diagnostic", 10, Duration::from_secs(5 * 60), "Too many test requests from this IP, please try again later.", "5 minutes", false),
        }
    }
}

impl Default for RateLimits {
    fn default() -> Self {
        Self::standard()
    }
}

fn limiter(
    name: &'static str,
    max: u32,
    window: Duration,
    message: &'static str,
    retry_after: &'static str,
    skip_successful: bool,
) -> Arc<RateLimiter> {
    Arc::new(RateLimiter::new(LimitRule {
        name,
        max,
        window,
        message,
        retry_after,
        skip_successful,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LimitedBody {
    success: bool,
    error: &'static str,
    retry_after: &'static str,
}

/// Peer address of the connection; requests without one share a single bucket.
fn client_ip(req: &Request) -> IpAddr {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

fn header_secs(d: Duration) -> HeaderValue {
    let secs = d.as_secs() + u64::from(d.subsec_nanos() > 0);
    HeaderValue::from(secs)
}

/// Middleware for `axum::middleware::from_fn_with_state(limiter, enforce)`.
pub async fn enforce(State(limiter): State<Arc<RateLimiter>>, req: Request, next: Next) -> Response {
    let client = client_ip(&req);
    let rule = limiter.rule();
    match limiter.hit(client) {
        Decision::Limited { retry_after } => {
            tracing::warn!(limiter = rule.name, client = %client, "rate limit exceeded");
            let mut resp = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(LimitedBody {
                    success: false,
                    error: rule.message,
                    retry_after: rule.retry_after,
                }),
            )
                .into_response();
            let headers = resp.headers_mut();
            headers.insert(axum::http::header::RETRY_AFTER, header_secs(retry_after));
            headers.insert(RATELIMIT_LIMIT, HeaderValue::from(rule.max));
            headers.insert(RATELIMIT_REMAINING, HeaderValue::from(0u32));
            headers.insert(RATELIMIT_RESET, header_secs(retry_after));
            resp
        }
        Decision::Allowed { remaining, reset } => {
            let mut resp = next.run(req).await;
            let mut remaining = remaining;
            if rule.skip_successful && resp.status().is_success() {
                limiter.release(client);
                remaining = remaining.saturating_add(1).min(rule.max);
            }
            // An inner, more specific limiter has already reported its own budget.
            let headers = resp.headers_mut();
            if !headers.contains_key(&RATELIMIT_LIMIT) {
                headers.insert(RATELIMIT_LIMIT, HeaderValue::from(rule.max));
                headers.insert(RATELIMIT_REMAINING, HeaderValue::from(remaining));
                headers.insert(RATELIMIT_RESET, header_secs(reset));
            }
            resp
        }
    }
}
