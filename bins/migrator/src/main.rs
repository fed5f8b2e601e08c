//! Database migration runner for Stowage.
//!
//! Usage:
//!   migrator up      - Run all pending migrations
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations
//!
//! Every sea-orm migration subcommand is accepted (`refresh`, `reset`,
//! `down -n 2`, ...). Connection settings come from the same
//! `STOWAGE__DATABASE__*` variables as the uploader.

use std::process::ExitCode;

use clap::Parser;
use sea_orm_cli::MigrateSubcommands;
use sea_orm_migration::cli::run_migrate;
use sea_orm_migration::sea_orm::DbErr;
use stowage_db::migration::Migrator;
use stowage_shared::{AppError, AppResult, DatabaseConfig};
use tracing::warn;

#[derive(Debug, Parser)]
#[command(name = "migrator", version, about = "Database migration runner for Stowage")]
struct Cli {
    /// Show debug messages.
    #[arg(global = true, short = 'v', long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<MigrateSubcommands>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", e.error_code());
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = DatabaseConfig::load()?;
    let db = stowage_db::connect(&config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    // run_migrate sets up its own tracing
    let result = run_migrate(Migrator, &db, cli.command, cli.verbose)
        .await
        .map_err(|e| AppError::Migration(e.to_string()));

    settle(result, db.close().await)
}

/// The migration outcome wins; a close failure is only logged.
fn settle(result: AppResult<()>, closed: Result<(), DbErr>) -> AppResult<()> {
    if let Err(e) = closed {
        warn!(error = %e, "Failed to close database connection");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_up() {
        let cli = Cli::try_parse_from(["migrator"]).expect("parses");
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parses_sea_orm_subcommands() {
        let cli = Cli::try_parse_from(["migrator", "down", "-n", "2"]).expect("parses");
        assert_eq!(cli.command, Some(MigrateSubcommands::Down { num: 2 }));

        let cli = Cli::try_parse_from(["migrator", "refresh", "-v"]).expect("parses");
        assert_eq!(cli.command, Some(MigrateSubcommands::Refresh));
        assert!(cli.verbose);

        let cli = Cli::try_parse_from(["migrator", "reset"]).expect("parses");
        assert_eq!(cli.command, Some(MigrateSubcommands::Reset));
    }

    #[test]
    fn test_close_failure_does_not_mask_migration_result() {
        let closed = || Err(DbErr::Custom("pool closed twice".to_string()));

        let err = settle(Err(AppError::Migration("bad sql".to_string())), closed())
            .unwrap_err();
        assert!(matches!(err, AppError::Migration(msg) if msg == "bad sql"));

        assert!(settle(Ok(()), closed()).is_ok());
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["migrator", "sideways"]).is_err());
    }
}
