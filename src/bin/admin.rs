//! CLI administration tool for reclink.
//!
//! Works directly against the configured PostgreSQL table, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a short URL (prompts for the URL when omitted)
//! cargo run --bin reclink-admin -- shorten https://example.com/page
//!
//! # Resolve a short URL
//! cargo run --bin reclink-admin -- resolve http://reclink.com/1a2b3c4d
//!
//! # Create the mapping table
//! cargo run --bin reclink-admin -- db init
//!
//! # Check database connection / show row counts
//! cargo run --bin reclink-admin -- db check
//! cargo run --bin reclink-admin -- db info
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*` components), `DATABASE_NAME`,
//! `MAPPING_TABLE`, `BASE_URL`, `LINK_TTL_SECONDS`.

use reclink::application::services::MappingService;
use reclink::config::{self, Config, StorageBackend};
use reclink::error::AppError;
use reclink::infrastructure::persistence::PgMappingRepository;
use reclink::server::connect_pool;

use anyhow::{Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing reclink.
#[derive(Parser)]
#[command(name = "reclink-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a short URL
    Shorten {
        /// Long URL to shorten (prompted when omitted)
        url: Option<String>,
    },

    /// Resolve a short URL to its long URL
    Resolve {
        /// Full short URL, e.g. http://reclink.com/1a2b3c4d
        short_url: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Create the mapping table if missing
    Init,

    /// Show mapping counts
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if config.storage_backend != StorageBackend::Postgres {
        bail!("reclink-admin requires STORAGE_BACKEND=postgres");
    }

    let pool = connect_pool(&config).await?;
    let repo = Arc::new(PgMappingRepository::new(
        Arc::new(pool.clone()),
        &config.table_name,
    ));

    let outcome = match cli.command {
        Commands::Shorten { url } => shorten(&config, repo, url).await,
        Commands::Resolve { short_url } => resolve(&config, repo, &short_url).await,
        Commands::Db { action } => handle_db_action(action, &config, &pool, &repo).await,
    };

    pool.close().await;
    outcome
}

fn service(config: &Config, repo: Arc<PgMappingRepository>) -> MappingService {
    MappingService::new(repo, config.base_url.clone(), config.link_ttl())
}

/// Creates a mapping and prints the short URL.
async fn shorten(
    config: &Config,
    repo: Arc<PgMappingRepository>,
    url: Option<String>,
) -> Result<()> {
    println!("{}", "✂️  Shorten URL".bright_blue().bold());
    println!();

    let long_url = match url {
        Some(u) => u,
        None => Input::<String>::new().with_prompt("Long URL").interact_text()?,
    };

    let mapping = service(config, repo)
        .shorten(long_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create short URL: {}", e))?;

    println!("  Long URL:  {}", mapping.long_url.cyan());
    println!("  Short URL: {}", mapping.short_url.bright_yellow().bold());
    println!(
        "  Expires:   {}",
        mapping
            .expiration_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

/// Resolves a short URL and prints the outcome.
async fn resolve(config: &Config, repo: Arc<PgMappingRepository>, short_url: &str) -> Result<()> {
    println!("{}", "🔍 Resolve URL".bright_blue().bold());
    println!();

    match service(config, repo).resolve(short_url).await {
        Ok(long_url) => {
            println!("  {} {}", "✅".green(), long_url.cyan());
        }
        Err(AppError::NotFound { .. }) => {
            println!("  {}", "❌ Not found".red());
        }
        Err(AppError::Expired { .. }) => {
            println!("  {}", "⌛ Expired".yellow());
        }
        Err(e) => bail!("Failed to resolve: {}", e),
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(
    action: DbAction,
    config: &Config,
    pool: &PgPool,
    repo: &PgMappingRepository,
) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Init => {
            repo.ensure_schema()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create table: {}", e))?;

            println!(
                "{} {}",
                "✅ Table ready:".green().bold(),
                config.table_name.cyan()
            );
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let total = repo
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count mappings: {}", e))?;
            let expired = repo
                .count_expired_at(Utc::now())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count mappings: {}", e))?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Table:      {}", config.table_name.cyan());
            println!(
                "  Mappings:   {}",
                total.to_string().bright_green().bold()
            );
            println!(
                "  Expired:    {}",
                expired.to_string().yellow().bold()
            );
            println!();
        }
    }

    Ok(())
}
