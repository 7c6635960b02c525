//! Shared helpers for fyyur-web integration tests
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use chrono::NaiveDateTime;
use fyyur_common::db::{init_memory_database, NewArtist, NewShow, NewVenue};
use fyyur_common::Genres;
use fyyur_web::{build_router, db, AppState};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot` method

/// Fresh in-memory database with the full schema
pub async fn setup_test_db() -> SqlitePool {
    init_memory_database()
        .await
        .expect("Should create in-memory database")
}

pub fn setup_app(db: SqlitePool) -> Router {
    build_router(AppState::new(db))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// POST with an already urlencoded body
pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// POST with an explicit (or missing) Content-Type
pub fn post_body(uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// GET sending back a cookie taken from an earlier response
pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn extract_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// `Location` of a 303 response
pub fn redirect_target(response: &Response<Body>) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get(header::LOCATION)
        .expect("Redirect should carry a Location")
        .to_str()
        .unwrap()
        .to_string()
}

/// `name=value` part of the response's Set-Cookie header, if any
pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or_default().to_string())
}

pub fn ts(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").unwrap()
}

pub async fn seed_venue(pool: &SqlitePool, name: &str, city: &str, state: &str) -> i64 {
    db::insert_venue(
        pool,
        &NewVenue {
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            address: Some("1015 Folsom Street".to_string()),
            phone: Some("123-123-1234".to_string()),
            image_link: None,
            facebook_link: None,
            website: None,
            seeking_talent: false,
            seeking_description: None,
            genres: Genres::from_values(["Jazz"]),
        },
    )
    .await
    .expect("Should insert venue")
}

pub async fn seed_artist(pool: &SqlitePool, name: &str) -> i64 {
    db::insert_artist(
        pool,
        &NewArtist {
            name: name.to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: None,
            image_link: Some("https://images.example.com/artist.jpg".to_string()),
            facebook_link: None,
            website: None,
            seeking_venue: true,
            seeking_description: None,
            genres: Genres::from_values(["Rock n Roll"]),
        },
    )
    .await
    .expect("Should insert artist")
}

pub async fn seed_show(pool: &SqlitePool, venue_id: i64, artist_id: i64, start_time: &str) -> i64 {
    db::insert_show(
        pool,
        &NewShow {
            venue_id,
            artist_id,
            start_time: ts(start_time),
        },
    )
    .await
    .expect("Should insert show")
}

/// Make every `operation` (INSERT, UPDATE) on `table` fail inside SQLite
pub async fn reject_writes(pool: &SqlitePool, table: &str, operation: &str) {
    let sql = format!(
        "CREATE TRIGGER reject_{name}_{table} BEFORE {event} ON {table} \
         BEGIN SELECT RAISE(ABORT, 'writes rejected'); END",
        name = operation.to_lowercase(),
        event = operation,
        table = table,
    );
    sqlx::query(&sql)
        .execute(pool)
        .await
        .expect("Should create trigger");
}

pub async fn row_count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("Should count rows")
}
