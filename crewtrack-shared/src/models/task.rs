//! Task model and database operations
//!
//! Tasks are work items owned by a user. The owning user is required at
//! creation; the collection listing joins the owner record so clients get
//! each task with its user embedded.
//!
//! # Schema
//!
//! ```sql
//! CREATE TYPE task_status AS ENUM ('TODO', 'IN_PROGRESS', 'DONE');
//!
//! CREATE TABLE tasks (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     title VARCHAR(255) NOT NULL,
//!     description TEXT,
//!     status task_status NOT NULL DEFAULT 'TODO',
//!     due_date TIMESTAMPTZ,
//!     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::user::{Role, User};

/// Task status
///
/// These are plain labels: any status may be set by any caller who passes
/// authorization, with no modeled transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started yet
    #[sqlx(rename = "TODO")]
    Todo,

    /// Being worked on
    #[sqlx(rename = "IN_PROGRESS")]
    InProgress,

    /// Finished
    #[sqlx(rename = "DONE")]
    Done,
}

/// Task model representing a work item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Short title
    pub title: String,

    /// Longer free-form description
    pub description: Option<String>,

    /// Current status
    pub status: TaskStatus,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Owning user (required at creation)
    pub user_id: Uuid,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// A task joined with its owning user, as returned by the collection GET
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskWithOwner {
    /// The task itself
    #[serde(flatten)]
    pub task: Task,

    /// The owning user record
    pub user: User,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Short title
    pub title: String,

    /// Description (required by the POST handler, nullable in the schema)
    pub description: String,

    /// Initial status
    pub status: TaskStatus,

    /// Owning user; must reference an existing user
    pub user_id: Uuid,
}

/// Input for updating a task
///
/// All fields are optional. Only `Some` fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New due date
    pub due_date: Option<DateTime<Utc>>,
}

/// Joined row shape for `list_with_owner`; user columns are aliased to
/// avoid colliding with the task columns.
#[derive(Debug, sqlx::FromRow)]
struct TaskOwnerRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    due_date: Option<DateTime<Utc>>,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    owner_name: String,
    owner_email: String,
    owner_role: Role,
    owner_created_at: DateTime<Utc>,
    owner_updated_at: DateTime<Utc>,
}

impl From<TaskOwnerRow> for TaskWithOwner {
    fn from(row: TaskOwnerRow) -> Self {
        TaskWithOwner {
            user: User {
                id: row.user_id,
                name: row.owner_name,
                email: row.owner_email,
                role: row.owner_role,
                created_at: row.owner_created_at,
                updated_at: row.owner_updated_at,
            },
            task: Task {
                id: row.id,
                title: row.title,
                description: row.description,
                status: row.status,
                due_date: row.due_date,
                user_id: row.user_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

impl Task {
    /// Creates a new task
    ///
    /// # Errors
    ///
    /// Returns an error if `user_id` does not reference an existing user
    /// (foreign-key violation) or the database operation fails.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, status, due_date, user_id,
                      created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, due_date, user_id,
                   created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks, each joined with its owning user
    pub async fn list_with_owner(pool: &PgPool) -> Result<Vec<TaskWithOwner>, sqlx::Error> {
        let rows = sqlx::query_as::<_, TaskOwnerRow>(
            r#"
            SELECT t.id, t.title, t.description, t.status, t.due_date, t.user_id,
                   t.created_at, t.updated_at,
                   u.name AS owner_name, u.email AS owner_email, u.role AS owner_role,
                   u.created_at AS owner_created_at, u.updated_at AS owner_updated_at
            FROM tasks t
            JOIN users u ON u.id = t.user_id
            ORDER BY t.created_at
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(TaskWithOwner::from).collect())
    }

    /// Updates an existing task
    ///
    /// Only `Some` fields in `data` are updated; the `updated_at`
    /// timestamp is bumped on every call.
    ///
    /// # Returns
    ///
    /// The updated task if found, None if the id doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }
        if data.due_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", due_date = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, title, description, status, due_date, user_id, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }
        if let Some(due_date) = data.due_date {
            q = q.bind(due_date);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task by ID
    ///
    /// # Returns
    ///
    /// True if the task was deleted, false if the id didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
