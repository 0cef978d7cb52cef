//! API route handlers
//!
//! This module contains all route handlers organized by resource:
//!
//! - `health`: Health check endpoint
//! - `users`: User CRUD endpoints
//! - `tasks`: Task CRUD endpoints
//! - `events`: Event CRUD endpoints

use serde::{Deserialize, Serialize};

pub mod events;
pub mod health;
pub mod tasks;
pub mod users;

/// Confirmation body returned by the DELETE handlers
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}
