//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod course;
pub mod enrollment;
pub mod student;
pub mod user;
