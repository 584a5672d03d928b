use axum_test::TestServer;
use serde_json::{Map, Value, json};

use crate::app;
use crate::auth;
use crate::cfg;
use crate::core;
use crate::db;

pub const TEST_SECRET: &str = "test__secret__key__for__jwt__testing";
pub const TEST_PASSWORD: &str = "abcdefghijklmnopqrstuvwxyz";
pub const TEST_USER_ID: &str = "5";

pub struct TestApp {
    pub server: TestServer,
    pub context: core::ArcContext,
}

fn test_settings() -> cfg::AppSettings {
    // each in-memory SQLite connection is its own database, so keep one per pool
    cfg::AppSettings {
        database: cfg::DatabaseSettings {
            url: "sqlite::memory:".to_string(),
            accounts_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            run_migrations_on_startup: true,
        },
        auth: cfg::AuthSettings {
            secret: TEST_SECRET.to_string(),
            token_expiry: 3600,
            password_hash_cost: 4,
        },
        ..Default::default()
    }
}

pub async fn create_test_app() -> TestApp {
    let context = app::create_context(test_settings(), TEST_SECRET).await.unwrap();
    app::migrate_stores(&context).await.unwrap();

    let router = app::create_router(context.clone());
    TestApp {
        server: TestServer::new(router).unwrap(),
        context,
    }
}

pub fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

pub async fn seed_manufacturer(context: &core::Context, name: &str) -> i64 {
    let fields = object(json!({
        "name": name,
        "city": "Portland",
        "state": "OR",
        "zip": "97201",
        "phone": "555-0100",
    }));
    context.catalog.insert("manufacturers", &fields).await.unwrap()
}

pub async fn seed_beer(context: &core::Context, manufacturer_id: i64, name: &str) -> i64 {
    let fields = object(beer_body(manufacturer_id, name));
    context.catalog.insert("beers", &fields).await.unwrap()
}

/// Seeds one manufacturer and `count` beers with ids 1..=count.
pub async fn seed_beers(context: &core::Context, count: usize) -> i64 {
    let manufacturer_id = seed_manufacturer(context, "Cascade Brewing").await;
    for n in 1..=count {
        seed_beer(context, manufacturer_id, &format!("Beer {n}")).await;
    }
    manufacturer_id
}

pub async fn seed_review(context: &core::Context, beer_id: i64, user_id: i64) -> i64 {
    let fields = object(review_body(beer_id, user_id));
    context.catalog.insert("reviews", &fields).await.unwrap()
}

pub async fn seed_photo(context: &core::Context, beer_id: i64, user_id: i64) -> i64 {
    let fields = object(photo_body(beer_id, user_id));
    context.catalog.insert("photos", &fields).await.unwrap()
}

pub async fn seed_user(context: &core::Context, user_id: &str) {
    let new_account = db::NewAccount {
        user_id: user_id.to_string(),
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        password_hash: auth::hash_password(TEST_PASSWORD, 4).unwrap(),
    };
    context.accounts.insert_one(new_account).await.unwrap();
}

/// `Authorization` header value for a session of `user_id`.
pub fn bearer(context: &core::Context, user_id: &str) -> String {
    let token = auth::generate_session_token(&context.jwt, user_id).unwrap();
    format!("Bearer {token}")
}

pub fn beer_body(manufacturer_id: i64, name: &str) -> Value {
    json!({
        "manufacturerid": manufacturer_id,
        "name": name,
        "abv": 5.5,
        "ibu": 40,
        "calories": 180,
        "type": "IPA",
    })
}

pub fn review_body(beer_id: i64, user_id: i64) -> Value {
    json!({
        "beerid": beer_id,
        "userid": user_id,
        "dollars": 6,
        "stars": 4.5,
        "review": "Crisp and hoppy",
    })
}

pub fn photo_body(beer_id: i64, user_id: i64) -> Value {
    json!({
        "beerid": beer_id,
        "userid": user_id,
        "caption": "On tap",
        "filename": "tap.jpg",
    })
}
