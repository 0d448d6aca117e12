//! End-to-end API tests against a real PostgreSQL database.
//!
//! Run with `DATABASE_URL=postgres://... cargo test --test api`. Without
//! `DATABASE_URL` every test returns early. The tables are truncated per test,
//! so point this at a scratch database.

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use catalog_api::service::AdminService;
use catalog_api::{build_router, ensure_schema, AppState, Config};
use http_body_util::BodyExt;
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::{Mutex, MutexGuard};
use tower::ServiceExt;

/// Tests share one database; run them one at a time.
static DB_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

struct Harness {
    app: Router,
    pool: PgPool,
    _guard: MutexGuard<'static, ()>,
}

async fn harness() -> Option<Harness> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) if !url.is_empty() => url,
        _ => {
            eprintln!("DATABASE_URL not set; skipping");
            return None;
        }
    };
    let guard = DB_LOCK.lock().await;
    let config = Config::from_lookup(|k| (k == "DATABASE_URL").then(|| url.clone())).unwrap();
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(config.connect_options().unwrap())
        .await
        .unwrap();
    ensure_schema(&pool).await.unwrap();
    sqlx::query(
        "TRUNCATE admins, brands, categories, products, product_variants, product_photos, \
         ratings, web_banners RESTART IDENTITY CASCADE",
    )
    .execute(&pool)
    .await
    .unwrap();
    let state = AppState::new(pool.clone(), &config);
    Some(Harness {
        app: build_router(state, &[]),
        pool,
        _guard: guard,
    })
}

impl Harness {
    async fn call(&self, method: Method, uri: &str, cookie: Option<&str>, body: Option<Value>) -> (StatusCode, HeaderMap, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let req = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = self.app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, headers, body)
    }

    /// Seed an admin and log in; returns the `name=value` session cookie.
    async fn login(&self) -> String {
        AdminService::create(&self.pool, "root", "correct-horse").await.unwrap();
        let (status, headers, _) = self
            .call(
                Method::POST,
                "/api/admin/login",
                None,
                Some(json!({ "username": "root", "password": "correct-horse" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let set_cookie = headers[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.contains("HttpOnly"));
        set_cookie.split(';').next().unwrap().to_string()
    }

    async fn create(&self, cookie: &str, uri: &str, body: Value) -> i64 {
        let (status, _, resp) = self.call(Method::POST, uri, Some(cookie), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "{} -> {}", uri, resp);
        resp["id"].as_i64().unwrap()
    }
}

#[tokio::test]
async fn brand_names_are_unique() {
    let Some(h) = harness().await else { return };
    let cookie = h.login().await;

    let (status, _, body) = h
        .call(Method::POST, "/api/brands", Some(&cookie), Some(json!({ "name": "Acme" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["id"], 1);

    let (status, _, body) = h
        .call(Method::POST, "/api/brands", Some(&cookie), Some(json!({ "name": "Acme" })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "success": false, "error": "Brand name already exists" }));

    let other = h.create(&cookie, "/api/brands", json!({ "name": "Globex" })).await;
    let (status, _, _) = h
        .call(Method::PUT, &format!("/api/brands/{}", other), Some(&cookie), Some(json!({ "name": "Acme" })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn referenced_category_cannot_be_deleted() {
    let Some(h) = harness().await else { return };
    let cookie = h.login().await;
    let category = h.create(&cookie, "/api/categories", json!({ "name": "Audio" })).await;
    let product = h
        .create(&cookie, "/api/products", json!({ "name": "Speaker", "category_id": category }))
        .await;

    let uri = format!("/api/categories/{}", category);
    let (status, _, body) = h.call(Method::DELETE, &uri, Some(&cookie), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Cannot delete category as it is being used by products");
    let (status, _, _) = h.call(Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);

    h.call(Method::DELETE, &format!("/api/products/{}", product), Some(&cookie), None)
        .await;
    let (status, _, _) = h.call(Method::DELETE, &uri, Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, _, list) = h.call(Method::GET, "/api/categories", None, None).await;
    assert_eq!(list["data"], json!([]));
    let (status, _, _) = h.call(Method::DELETE, &uri, Some(&cookie), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_detail_and_cascade() {
    let Some(h) = harness().await else { return };
    let cookie = h.login().await;
    let brand = h.create(&cookie, "/api/brands", json!({ "name": "Acme" })).await;
    let product = h
        .create(&cookie, "/api/products", json!({ "name": "Widget", "brand_id": brand }))
        .await;
    h.create(
        &cookie,
        &format!("/api/products/{}/variants", product),
        json!({ "variant_name": "Large", "price": 19.99 }),
    )
    .await;
    h.create(
        &cookie,
        &format!("/api/products/{}/photos", product),
        json!({ "photo_url": "https://cdn.example.com/widget.png" }),
    )
    .await;
    h.create(&cookie, &format!("/api/products/{}/ratings", product), json!({ "star": 4 }))
        .await;

    let (status, _, body) = h.call(Method::GET, &format!("/api/products/{}", product), None, None).await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["brand_name"], "Acme");
    assert_eq!(data["category_name"], Value::Null);
    assert_eq!(data["variants"][0]["price"], json!(19.99));
    assert_eq!(data["photos"].as_array().unwrap().len(), 1);

    let (status, _, _) = h
        .call(Method::DELETE, &format!("/api/products/{}", product), Some(&cookie), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    for child in ["variants", "photos", "ratings"] {
        let (status, _, body) = h
            .call(Method::GET, &format!("/api/products/{}/{}", product, child), None, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([]), "{} survived", child);
    }
    let (status, _, body) = h.call(Method::GET, &format!("/api/products/{}", product), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn ratings_recompute_average() {
    let Some(h) = harness().await else { return };
    let cookie = h.login().await;
    let product = h.create(&cookie, "/api/products", json!({ "name": "Widget" })).await;
    let uri = format!("/api/products/{}/ratings", product);

    for star in [5, 4, 2] {
        h.create(&cookie, &uri, json!({ "star": star, "review_text": "ok" })).await;
    }
    let (status, _, _) = h.call(Method::POST, &uri, None, Some(json!({ "star": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, _, body) = h.call(Method::GET, &format!("/api/products/{}", product), None, None).await;
    let avg = body["data"]["avg_rating"].as_f64().unwrap();
    assert!((avg - 11.0 / 3.0).abs() < 1e-9, "avg was {}", avg);
    assert_eq!(body["data"]["total_raters"], 3);

    let (_, _, list) = h.call(Method::GET, &uri, None, None).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 3);

    let (status, _, body) = h
        .call(Method::POST, "/api/products/999/ratings", None, Some(json!({ "star": 3 })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn missing_references_are_reported() {
    let Some(h) = harness().await else { return };
    let cookie = h.login().await;

    let (status, _, body) = h
        .call(Method::POST, "/api/products", Some(&cookie), Some(json!({ "name": "Orphan", "brand_id": 42 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Referenced brand or category does not exist");

    let (status, _, body) = h
        .call(
            Method::POST,
            "/api/products/42/variants",
            Some(&cookie),
            Some(json!({ "variant_name": "S", "price": 1 })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");

    let (status, _, _) = h
        .call(Method::PUT, "/api/variants/42", Some(&cookie), Some(json!({ "variant_name": "S", "price": 1 })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let Some(h) = harness().await else { return };
    AdminService::create(&h.pool, "root", "correct-horse").await.unwrap();

    let (s1, _, unknown) = h
        .call(
            Method::POST,
            "/api/admin/login",
            None,
            Some(json!({ "username": "nobody", "password": "whatever-123" })),
        )
        .await;
    let (s2, _, wrong) = h
        .call(
            Method::POST,
            "/api/admin/login",
            None,
            Some(json!({ "username": "root", "password": "wrong-horse" })),
        )
        .await;
    assert_eq!(s1, StatusCode::UNAUTHORIZED);
    assert_eq!(s2, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown, wrong);
    assert_eq!(unknown, json!({ "success": false, "error": "Invalid credentials" }));
}

#[tokio::test]
async fn session_lifecycle() {
    let Some(h) = harness().await else { return };
    let cookie = h.login().await;

    let (status, _, body) = h.call(Method::GET, "/api/admins", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["username"], "root");
    assert!(body["data"][0].get("password_hash").is_none());

    let id = h
        .create(&cookie, "/api/admins", json!({ "username": "editor", "password": "another-pass" }))
        .await;
    assert!(id > 0);
    let (status, _, body) = h
        .call(
            Method::POST,
            "/api/admins",
            Some(&cookie),
            Some(json!({ "username": "editor", "password": "another-pass" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Username already exists");

    let (status, _, _) = h.call(Method::POST, "/api/admin/logout", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, body) = h.call(Method::GET, "/api/admins", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "ADMIN_AUTH_REQUIRED");
}

#[tokio::test]
async fn banners_default_to_active() {
    let Some(h) = harness().await else { return };
    let cookie = h.login().await;
    let shown = h
        .create(&cookie, "/api/banners", json!({ "title": "Sale", "redirect_url": "https://shop.example.com/sale" }))
        .await;
    let hidden = h
        .create(&cookie, "/api/banners", json!({ "title": "Old", "active": false }))
        .await;

    let (_, _, body) = h.call(Method::GET, "/api/banners/active", None, None).await;
    let ids: Vec<i64> = body["data"].as_array().unwrap().iter().map(|b| b["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![shown]);

    let (_, _, body) = h.call(Method::GET, "/api/banners", None, None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, _, _) = h
        .call(Method::PUT, &format!("/api/banners/{}", hidden), Some(&cookie), Some(json!({ "title": "Back" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, _, body) = h.call(Method::GET, &format!("/api/banners/{}", hidden), None, None).await;
    assert_eq!(body["data"]["active"], true);
    assert_eq!(body["data"]["redirect_url"], Value::Null);
}

#[tokio::test]
async fn ids_past_the_column_range_are_not_found() {
    let Some(h) = harness().await else { return };
    let cookie = h.login().await;

    let (status, _, body) = h.call(Method::GET, "/api/brands/2147483648", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Brand not found");

    let (status, _, body) = h.call(Method::GET, "/api/products/99999999999/ratings", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, _, body) = h
        .call(Method::POST, "/api/products/99999999999/ratings", None, Some(json!({ "star": 4 })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");

    let (status, _, _) = h
        .call(Method::DELETE, "/api/products/99999999999", Some(&cookie), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
