//! Database seeder
//!
//! One-time population of sample data: a tech lead, a task they own, and
//! a team event. Not part of runtime request handling.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p crewtrack-api --bin seed
//! ```

use crewtrack_api::config::Config;
use crewtrack_shared::{
    db::{migrations, pool},
    models::{
        event::{CreateEvent, Event},
        task::{CreateTask, Task, TaskStatus},
        user::{CreateUser, Role, User},
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    migrations::ensure_database_exists(&config.database.url).await?;

    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    migrations::run_migrations(&db).await?;

    let user = User::create(
        &db,
        CreateUser {
            name: "Jasper".to_string(),
            email: "jasperdoe@example.com".to_string(),
            role: Some(Role::TechLead),
        },
    )
    .await?;
    tracing::info!(user_id = %user.id, "Seeded user");

    let task = Task::create(
        &db,
        CreateTask {
            title: "Build the backend".to_string(),
            description: "Set up API and database".to_string(),
            status: TaskStatus::InProgress,
            user_id: user.id,
        },
    )
    .await?;
    tracing::info!(task_id = %task.id, "Seeded task");

    let event = Event::create(
        &db,
        CreateEvent {
            title: "Weekly Planning Session".to_string(),
            description: Some("Zoom sync with team".to_string()),
            start_time: "2025-06-24T10:00:00Z".parse()?,
            end_time: "2025-06-24T11:00:00Z".parse()?,
        },
    )
    .await?;
    tracing::info!(event_id = %event.id, "Seeded event");

    Ok(())
}
