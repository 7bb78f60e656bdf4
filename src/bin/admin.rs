//! CLI administration tool for wordlink.
//!
//! Manages the dictionary, records and the administrator password directly
//! against the database, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Load (or reload) the dictionary
//! cargo run --bin admin -- dictionary load --path ./dictionary.txt
//!
//! # Rewrite a word list sanitized and sorted
//! cargo run --bin admin -- dictionary clean ./dictionary.txt
//!
//! # Delete a record by key, short URL or original URL
//! cargo run --bin admin -- records delete https://example.com
//!
//! # Set a new administrator password
//! cargo run --bin admin -- password set
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (default: `sqlite:./data.db`)
//! - `DICTIONARY_PATH` (default: `./dictionary.txt`)
//! - `PUBLIC_HOST` (optional): lets `records delete` accept short URLs

use wordlink::application::services::{AuthService, DictionaryService, RecordService};
use wordlink::domain::matching::InputMatcher;
use wordlink::infrastructure::persistence::{
    DatabaseOptions, RetryPolicy, SqliteCredentialRepository, SqliteDictionaryRepository,
    SqliteRecordRepository, connect,
};
use wordlink::utils::vocabulary;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Password};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing wordlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage the word dictionary
    Dictionary {
        #[command(subcommand)]
        action: DictionaryAction,
    },

    /// Manage shortened records
    Records {
        #[command(subcommand)]
        action: RecordsAction,
    },

    /// Manage the administrator password
    Password {
        #[command(subcommand)]
        action: PasswordAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DictionaryAction {
    /// Replace the dictionary with a word list, keeping live keys used
    Load {
        /// Word list, one word per line (default: DICTIONARY_PATH)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Rewrite a word list sanitized, deduplicated and sorted
    Clean {
        path: PathBuf,
    },

    /// Show how many words are used and unused
    Stats,
}

#[derive(Subcommand)]
enum RecordsAction {
    /// List every record
    List,

    /// Delete a record by key, short URL or original URL
    Delete {
        input: String,
    },

    /// Delete every record
    Purge {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum PasswordAction {
    /// Prompt for a new administrator password
    Set,

    /// Restore the default password
    Reset {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and schema
    Check,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Clean works on a file only.
    if let Commands::Dictionary {
        action: DictionaryAction::Clean { path },
    } = &cli.command
    {
        return clean_dictionary(path).await;
    }

    let options = DatabaseOptions {
        url: env_or("DATABASE_URL", "sqlite:./data.db"),
        max_connections: 1,
        busy_timeout: Duration::from_secs(5),
    };
    let pool = connect(&options).await?;

    let result = match cli.command {
        Commands::Dictionary { action } => handle_dictionary_action(action, &pool).await,
        Commands::Records { action } => handle_records_action(action, &pool).await,
        Commands::Password { action } => handle_password_action(action, &pool).await,
        Commands::Db { action } => handle_db_action(action, &pool).await,
    };

    pool.close().await;
    result
}

fn dictionary_service(pool: &SqlitePool) -> DictionaryService<SqliteDictionaryRepository> {
    DictionaryService::new(Arc::new(SqliteDictionaryRepository::new(
        Arc::new(pool.clone()),
        RetryPolicy::default(),
    )))
}

fn record_service(pool: &SqlitePool) -> RecordService<SqliteRecordRepository> {
    let public_host = std::env::var("PUBLIC_HOST").ok();

    RecordService::new(
        Arc::new(SqliteRecordRepository::new(
            Arc::new(pool.clone()),
            RetryPolicy::default(),
        )),
        InputMatcher::new(public_host.as_deref()),
    )
}

fn auth_service(pool: &SqlitePool) -> AuthService<SqliteCredentialRepository> {
    AuthService::new(
        Arc::new(SqliteCredentialRepository::new(Arc::new(pool.clone()))),
        None,
    )
}

/// Dispatches dictionary commands.
async fn handle_dictionary_action(action: DictionaryAction, pool: &SqlitePool) -> Result<()> {
    let service = dictionary_service(pool);

    match action {
        DictionaryAction::Load { path } => {
            let path = path
                .unwrap_or_else(|| PathBuf::from(env_or("DICTIONARY_PATH", "./dictionary.txt")));

            println!(
                "{} {}",
                "📖 Loading dictionary from".bright_blue().bold(),
                path.display().to_string().cyan()
            );

            let loaded = service.load_file(&path).await?;
            let stats = service.stats().await?;

            println!(
                "{} {} words ({} in use)",
                "✅ Loaded".green().bold(),
                loaded.to_string().bright_white().bold(),
                stats.used().to_string().yellow()
            );
        }
        DictionaryAction::Stats => {
            println!("{}", "📊 Dictionary".bright_blue().bold());
            println!();

            let stats = service.stats().await?;
            println!("  Total:  {}", stats.total.to_string().bright_white().bold());
            println!("  Used:   {}", stats.used().to_string().yellow().bold());
            println!("  Unused: {}", stats.unused.to_string().bright_green().bold());

            if stats.is_exhausted() {
                println!();
                println!(
                    "{}",
                    "⚠️  No unused words left, new URLs cannot be shortened"
                        .red()
                        .bold()
                );
            }
            println!();
        }
        DictionaryAction::Clean { path } => clean_dictionary(&path).await?,
    }

    Ok(())
}

/// Rewrites `path` with its words sanitized, deduplicated and sorted.
async fn clean_dictionary(path: &Path) -> Result<()> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let before = contents.lines().filter(|line| !line.trim().is_empty()).count();
    let words = vocabulary::parse_word_list(&contents);

    if words.is_empty() {
        anyhow::bail!("No usable words in {}", path.display());
    }

    let mut cleaned = words.join("\n");
    cleaned.push('\n');
    tokio::fs::write(path, cleaned)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "{} {} words kept, {} dropped",
        "✅ Cleaned".green().bold(),
        words.len().to_string().bright_white().bold(),
        before.saturating_sub(words.len()).to_string().yellow()
    );

    Ok(())
}

/// Dispatches record commands.
async fn handle_records_action(action: RecordsAction, pool: &SqlitePool) -> Result<()> {
    let service = record_service(pool);

    match action {
        RecordsAction::List => {
            println!("{}", "📋 Records".bright_blue().bold());
            println!();

            let records = service.list_all().await?;

            if records.is_empty() {
                println!("{}", "  No records found".yellow());
                return Ok(());
            }

            println!(
                "  {:<20} {}",
                "Key".bright_white().bold(),
                "Original URL".bright_white().bold()
            );
            println!("  {}", "─".repeat(75).bright_black());

            for (original, token) in &records {
                println!("  {:<20} {}", token.cyan(), original);
            }

            println!();
            println!("  Total: {}", records.len().to_string().bright_white().bold());
            println!();
        }
        RecordsAction::Delete { input } => {
            if service.delete_by_input(&input).await? {
                println!("{}", "✅ Record deleted".green().bold());
            } else {
                println!("{}", "❌ No matching record".red());
            }
        }
        RecordsAction::Purge { yes } => {
            let count = service.count().await?;

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete all {count} records?"))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let removed = service.purge_all().await?;
            println!(
                "{} {} records deleted",
                "✅".green(),
                removed.to_string().bright_white().bold()
            );
        }
    }

    Ok(())
}

/// Dispatches password commands.
async fn handle_password_action(action: PasswordAction, pool: &SqlitePool) -> Result<()> {
    let service = auth_service(pool);

    match action {
        PasswordAction::Set => {
            let password = Password::new()
                .with_prompt("New password")
                .with_confirmation("Confirm password", "Passwords do not match")
                .interact()?;

            service.change_password(&password).await?;
            println!("{}", "✅ Password changed".green().bold());
        }
        PasswordAction::Reset { yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Reset the administrator password to the default?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            service.reset_password().await?;
            println!("{}", "✅ Password reset to default".green().bold());
            println!(
                "{}",
                "⚠️  Change it before exposing the service".yellow()
            );
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;
            let integrity: String = sqlx::query_scalar("PRAGMA integrity_check")
                .fetch_one(pool)
                .await?;
            let orphaned: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM mappings WHERE token NOT IN (SELECT word FROM dictionary WHERE used = 1)",
            )
            .fetch_one(pool)
            .await?;
            let stray: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM dictionary WHERE used = 1 AND word NOT IN (SELECT token FROM mappings)",
            )
            .fetch_one(pool)
            .await?;

            println!("  SQLite:    {}", version.bright_white());
            println!("  Integrity: {}", integrity.bright_white());

            if orphaned == 0 && stray == 0 && integrity == "ok" {
                println!("{}", "✅ Database OK".green().bold());
            } else {
                println!(
                    "{} {} records without a used word, {} used words without a record",
                    "⚠️ ".yellow(),
                    orphaned.to_string().red().bold(),
                    stray.to_string().red().bold()
                );
            }
        }
    }

    Ok(())
}
