//! # CrewTrack Shared Library
//!
//! This crate contains the data layer shared by the CrewTrack API server
//! and its auxiliary binaries (e.g. the seeder).
//!
//! ## Module Organization
//!
//! - `models`: Database models and CRUD operations
//! - `db`: Connection pool and migration runner
//! - `auth`: Role check used by the mutating route handlers

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the CrewTrack shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
