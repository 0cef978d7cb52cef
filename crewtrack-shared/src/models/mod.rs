//! Database models for CrewTrack
//!
//! This module contains all database models and their CRUD operations.
//! Every operation takes the connection pool explicitly; models hold no
//! global state.
//!
//! # Models
//!
//! - `user`: Team members and their role (`DEV` or `TECH_LEAD`)
//! - `task`: Work items owned by a user
//! - `event`: Calendar entries with a start and end time
//!
//! # Example
//!
//! ```no_run
//! use crewtrack_shared::models::user::{CreateUser, Role, User};
//! use crewtrack_shared::db::pool::{create_pool, DatabaseConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(DatabaseConfig::default()).await?;
//!
//! let user = User::create(
//!     &pool,
//!     CreateUser {
//!         name: "Ann".to_string(),
//!         email: "ann@example.com".to_string(),
//!         role: None, // defaults to DEV
//!     },
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod event;
pub mod task;
pub mod user;
