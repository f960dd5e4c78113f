//! Shared helpers for the integration tests.
//!
//! The app is assembled exactly as in `main.rs`, but over `MemoryStore` so
//! the suite needs no database.
#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use chrono::Duration;
use serde_json::{json, Value};
use std::sync::Arc;

use projectdesk::auth::{AuthMiddleware, TokenKeys, MIN_BCRYPT_COST};
use projectdesk::routes::{self, health};
use projectdesk::services::Authenticator;
use projectdesk::store::{MemoryStore, Store};

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn authenticator() -> Authenticator {
    Authenticator::new(
        TokenKeys::new(TEST_SECRET, Duration::minutes(5), Duration::days(1)),
        MIN_BCRYPT_COST,
        true,
    )
}

pub async fn init_app(
    store: Arc<MemoryStore>,
    authenticator: Authenticator,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let store: Arc<dyn Store> = store;
    test::init_service(
        App::new()
            .app_data(web::Data::from(store))
            .app_data(web::Data::new(authenticator))
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            ),
    )
    .await
}

/// Sends `req` (with a bearer token when given) and returns status and JSON body.
/// Bodies that are not JSON come back as `Value::Null`.
pub async fn send(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    req: test::TestRequest,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let req = match token {
        Some(token) => req.insert_header((header::AUTHORIZATION, format!("Bearer {}", token))),
        None => req,
    };
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

pub async fn register(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    email: &str,
    username: &str,
    password: &str,
    role: Option<&str>,
) -> (StatusCode, Value) {
    let mut payload = json!({
        "email": email,
        "username": username,
        "password": password
    });
    if let Some(role) = role {
        payload["role"] = json!(role);
    }
    send(
        app,
        test::TestRequest::post()
            .uri("/api/register/")
            .set_json(&payload),
        None,
    )
    .await
}

pub async fn login(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    email: &str,
    password: &str,
) -> (StatusCode, Value) {
    send(
        app,
        test::TestRequest::post()
            .uri("/api/login/")
            .set_json(&json!({ "email": email, "password": password })),
        None,
    )
    .await
}

/// Registers a user and returns its access token.
pub async fn register_and_login(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    email: &str,
    username: &str,
    password: &str,
    role: &str,
) -> String {
    let (status, body) = register(app, email, username, password, Some(role)).await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

    let (status, body) = login(app, email, password).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["access"]
        .as_str()
        .expect("login response carries an access token")
        .to_string()
}

pub async fn create_project(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    token: &str,
    title: &str,
) -> (StatusCode, Value) {
    send(
        app,
        test::TestRequest::post()
            .uri("/api/projects/create/")
            .set_json(&json!({ "title": title, "description": format!("{} description", title) })),
        Some(token),
    )
    .await
}

pub async fn create_task(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    token: &str,
    title: &str,
    project_id: i64,
) -> (StatusCode, Value) {
    send(
        app,
        test::TestRequest::post()
            .uri("/api/tasks/create/")
            .set_json(&json!({
                "title": title,
                "description": format!("{} description", title),
                "project_id": project_id
            })),
        Some(token),
    )
    .await
}
