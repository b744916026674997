//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `inspect` - Print students, courses or enrollments

pub mod args;

pub use args::{Cli, Commands};
