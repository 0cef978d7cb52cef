//! Common test utilities for integration tests
//!
//! Provides a `TestContext` with a database pool, a built router, and two
//! well-known users (one tech lead, one dev) for exercising the role
//! gates. Integration tests need a running Postgres; each test skips
//! itself when `DATABASE_URL` is unset.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use crewtrack_api::app::{build_router, AppState};
use crewtrack_api::config::Config;
use crewtrack_shared::db::migrations;
use crewtrack_shared::models::user::{CreateUser, Role, User};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub lead: User,
    pub dev: User,
}

impl TestContext {
    /// Creates a new test context against the configured database
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        migrations::run_migrations(&db).await?;

        // Unique emails so parallel test runs don't collide
        let lead = User::create(
            &db,
            CreateUser {
                name: "Test Lead".to_string(),
                email: format!("lead-{}@example.com", Uuid::new_v4()),
                role: Some(Role::TechLead),
            },
        )
        .await?;

        let dev = User::create(
            &db,
            CreateUser {
                name: "Test Dev".to_string(),
                email: format!("dev-{}@example.com", Uuid::new_v4()),
                role: None,
            },
        )
        .await?;

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            lead,
            dev,
        })
    }

    /// Cleans up test data
    ///
    /// Deleting the users cascades to any tasks they own; events are
    /// cleaned up by the tests that create them.
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        User::delete(&self.db, self.lead.id).await?;
        User::delete(&self.db, self.dev.id).await?;
        Ok(())
    }
}

/// Builds a test context, or None when no database is configured
pub async fn setup() -> Option<TestContext> {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set, skipping integration test");
        return None;
    }

    Some(TestContext::new().await.expect("failed to build test context"))
}

/// Builds a JSON request for the given method and path
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Builds a bodyless GET request
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Sends a request through the router and returns status + parsed body
pub async fn send(
    ctx: &TestContext,
    request: Request<Body>,
) -> (StatusCode, serde_json::Value) {
    let response = ctx.app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}
