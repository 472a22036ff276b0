#![allow(dead_code)]

use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use chrono::Duration;
use sqlx::PgPool;
use std::sync::Arc;
use microblog::application::services::{RegisterInput, UserService};
use microblog::auth::SessionManager;
use microblog::domain::entities::User;
use microblog::infrastructure::persistence::PgUserRepository;
use microblog::state::AppState;
use microblog::web;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const TEST_PASSWORD: &str = "cat";

pub fn create_test_state(pool: PgPool) -> AppState {
    create_test_state_with_cookies(pool, false)
}

/// Test state whose cookies carry `Secure` when `secure` is set.
pub fn create_test_state_with_cookies(pool: PgPool, secure: bool) -> AppState {
    let user_repo = Arc::new(PgUserRepository::new(Arc::new(pool)));

    // Lowest bcrypt cost keeps the suite fast.
    let user_service = Arc::new(UserService::new(user_repo, 4));
    let sessions = Arc::new(SessionManager::new(
        TEST_SECRET.to_string(),
        Duration::hours(24),
        Duration::days(365),
        secure,
    ));

    AppState::new(user_service, sessions)
}

/// Page router with a cookie-keeping client, without rate limiting.
pub fn create_test_server(state: AppState) -> TestServer {
    let app = web::routes::router(state.clone()).with_state(state);

    TestServer::builder().save_cookies().build(app).unwrap()
}

pub async fn create_test_user(state: &AppState, username: &str) -> User {
    state
        .user_service
        .register(RegisterInput {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: TEST_PASSWORD.to_string(),
        })
        .await
        .unwrap()
}

/// Pulls the hidden CSRF field out of a rendered form.
pub fn extract_csrf(html: &str) -> String {
    let marker = r#"name="csrf_token" value=""#;
    let start = html.find(marker).expect("page has no csrf field") + marker.len();
    let end = html[start..].find('"').unwrap() + start;
    html[start..end].to_string()
}

/// Fetches a form page and returns its CSRF token.
pub async fn csrf_from(server: &TestServer, path: &str) -> String {
    let page = server.get(path).await;
    page.assert_status_ok();
    extract_csrf(&page.text())
}

pub async fn login(server: &TestServer, username: &str, password: &str) -> TestResponse {
    let csrf = csrf_from(server, "/login").await;

    server
        .post("/login")
        .form(&[
            ("username", username),
            ("password", password),
            ("csrf_token", csrf.as_str()),
        ])
        .await
}

pub async fn login_as(server: &TestServer, username: &str) {
    let response = login(server, username, TEST_PASSWORD).await;
    assert_redirect(&response, "/index");
}

pub fn assert_redirect(response: &TestResponse, location: &str) {
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), location);
}
