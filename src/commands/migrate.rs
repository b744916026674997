//! Migrate command - Applies, reverts and reports schema migrations.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

/// Execute the migrate command; the store is closed even when the action fails
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = super::open_admin_store(&config).await?;

    let outcome = apply(&db, &args.action).await;
    db.close().await?;
    outcome
}

async fn apply(db: &Database, action: &MigrateAction) -> AppResult<()> {
    match action {
        MigrateAction::Up => db.run_migrations().await?,
        MigrateAction::Down => db.rollback_migration().await?,
        MigrateAction::Fresh => {
            tracing::warn!("Dropping users, students, courses and enrollments");
            db.fresh_migrations().await?
        }
        MigrateAction::Status => {
            for line in status_report(&db.migration_status().await?) {
                println!("{}", line);
            }
        }
    }

    tracing::info!(action = ?action, "Migration command finished");
    Ok(())
}

/// One line per migration, followed by a pending count
fn status_report(status: &[(String, bool)]) -> Vec<String> {
    let width = status.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let pending = status.iter().filter(|(_, applied)| !applied).count();

    let mut lines: Vec<String> = status
        .iter()
        .map(|(name, applied)| {
            let state = if *applied { "applied" } else { "pending" };
            format!("{:<width$}  {}", name, state, width = width)
        })
        .collect();

    lines.push(match pending {
        0 => "Schema is up to date".to_string(),
        n => format!("{} pending migration(s)", n),
    });
    lines
}
