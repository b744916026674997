//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain rules and repositories through the
//! Unit of Work. Handlers only ever see the service traits.

pub mod container;
mod course_service;
mod user_service;

pub use container::{ServiceContainer, Services};
pub use course_service::{CourseManager, CourseService};
pub use user_service::{UserManager, UserService};
