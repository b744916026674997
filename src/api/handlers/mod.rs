//! HTTP request handlers.

pub mod course_handler;
pub mod health_handler;
pub mod user_handler;

pub use course_handler::{course_routes, enrollment_routes};
pub use health_handler::health_routes;
pub use user_handler::user_routes;
