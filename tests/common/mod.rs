#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use dotenv::dotenv;
use serde_json::{json, Value};
use sqlx::postgres::{PgPool, PgPoolOptions};
use task_api::auth::{AuthMiddleware, TokenResponse};
use task_api::config::JwtConfig;
use task_api::routes;
use uuid::Uuid;

pub const SECRET: &str = "integration-test-secret";

pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub token: String,
}

/// Pool for tests that need a real database. Migrations are applied first.
pub async fn test_pool() -> PgPool {
    dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");
    task_api::db::run_migrations(&pool)
        .await
        .expect("Failed to migrate test DB");
    pool
}

/// A pool that never connects unless a query runs. For requests that are
/// rejected before reaching the store.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://postgres@127.0.0.1:5432/taskdb")
        .expect("valid database url")
}

pub async fn init_app(
    pool: PgPool,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    test::init_service(
        App::new()
            .app_data(web::Data::new(pool))
            .app_data(web::Data::new(JwtConfig {
                secret: SECRET.to_string(),
                exp_hours: 1,
            }))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(|cfg| routes::config(cfg, AuthMiddleware::new(SECRET))),
    )
    .await
}

pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4().simple())
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Sends a request and returns the status with the body parsed as JSON
/// (`Value::Null` for an empty body).
pub async fn send(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    req: test::TestRequest,
) -> (StatusCode, Value) {
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| {
            panic!("non-JSON body: {:?}", String::from_utf8_lossy(&body))
        })
    };
    (status, json)
}

pub async fn register_and_login(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> TestUser {
    let email = unique_email(username);

    let (status, body) = send(
        app,
        test::TestRequest::post().uri("/register").set_json(json!({
            "username": username,
            "email": email,
            "password": password
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {}", body);
    let id = body["id"].as_i64().expect("registration returns an id");

    let (status, body) = send(
        app,
        test::TestRequest::post().uri("/login").set_json(json!({
            "email": email,
            "password": password
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    let login: TokenResponse = serde_json::from_value(body).expect("login returns a token");

    TestUser {
        id,
        email,
        token: login.token,
    }
}

pub async fn cleanup_user(pool: &PgPool, email: &str) {
    let _ = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email)
        .execute(pool)
        .await;
}
