//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// Smart Edu Management API - users, students, courses and enrollments
#[derive(Parser, Debug)]
#[command(name = "smart-edu-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Print store contents for diagnostics
    Inspect(InspectArgs),
}

/// Arguments for the serve command; unset values come from the environment
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to [default: SERVER_HOST or 0.0.0.0]
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on [default: PORT or 3000]
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the inspect command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    #[command(subcommand)]
    pub target: InspectTarget,
}

/// Record sets the inspect command can print
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectTarget {
    /// Student profiles with their users
    Students,
    /// Courses, newest first
    Courses,
    /// Enrollments with student and course, newest first
    Enrollments,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_overrides_are_optional() {
        let cli = Cli::try_parse_from(["smart-edu-api", "serve"]).unwrap();

        match cli.command {
            Commands::Serve(args) => {
                assert!(args.host.is_none());
                assert!(args.port.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_inspect_target() {
        let cli = Cli::try_parse_from(["smart-edu-api", "-v", "inspect", "enrollments"]).unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Inspect(args) => assert_eq!(args.target, InspectTarget::Enrollments),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_migrate_action_is_rejected() {
        assert!(Cli::try_parse_from(["smart-edu-api", "migrate", "sideways"]).is_err());
    }
}
