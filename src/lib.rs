//! Smart Edu Management API
//!
//! REST API for managing user accounts (students, teachers, admins),
//! course records, and the enrollments linking students to courses.
//! Built on Axum and SeaORM with a layered architecture.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core entities, service inputs and domain errors
//! - **services**: Course, enrollment and user use cases
//! - **infra**: Database connection, migrations and repositories
//! - **api**: HTTP handlers, extractors and routes
//! - **types**: Response envelope
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Print enrolled students
//! cargo run -- inspect enrollments
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Course, DomainError, Enrollment, Student, User};
pub use errors::{AppError, AppResult};
pub use infra::Database;
