//! CLI administration tool for exquizite-share.
//!
//! Provides commands for managing users, API tokens, and shares without
//! requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a user profile
//! cargo run --bin admin -- user create --name "Maria"
//!
//! # Create a new API token for a user
//! cargo run --bin admin -- token create --user-id 1
//!
//! # List all tokens
//! cargo run --bin admin -- token list
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke "Mobile App"
//!
//! # Deactivate a share (its code becomes permanently unresolvable)
//! cargo run --bin admin -- share deactivate Ab3dEf6hIj9k
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required for token commands): must match the
//!   server's secret, or minted tokens will not authenticate

use exquizite_share::domain::repositories::{ShareRepository, TokenRepository};
use exquizite_share::infrastructure::persistence::{PgShareRepository, PgTokenRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use hmac::{Hmac, Mac};
use rand::{Rng, distr::Alphanumeric};
use sha2::Sha256;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing exquizite-share.
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
    /// Manage user profiles
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Moderate shares
    Share {
        #[command(subcommand)]
        action: ShareAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a user profile
    Create {
        /// Public display name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List user profiles
    List,
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token
    Create {
        /// Owning user id
        #[arg(short, long)]
        user_id: i64,

        /// Token name (e.g., "Mobile App")
        #[arg(short, long)]
        name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token by name
    Revoke {
        /// Token name to revoke
        name: String,
    },
}

/// Share moderation subcommands.
#[derive(Subcommand)]
enum ShareAction {
    /// List shares with their counters
    List,

    /// Deactivate a share by code
    Deactivate {
        /// The 12-character share code
        share_code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Token { action } => handle_token_action(action, &pool).await?,
        Commands::Share { action } => handle_share_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    match action {
        UserAction::Create { name } => {
            let name = match name {
                Some(n) => n,
                None => Input::new().with_prompt("Display name").interact_text()?,
            };

            let id: i64 =
                sqlx::query_scalar("INSERT INTO profiles (name) VALUES ($1) RETURNING id")
                    .bind(&name)
                    .fetch_one(pool)
                    .await?;

            println!(
                "{} user {} created with id {}",
                "✅".green(),
                name.cyan(),
                id.to_string().bright_white().bold()
            );
        }
        UserAction::List => {
            let rows: Vec<(i64, String)> =
                sqlx::query_as("SELECT id, name FROM profiles ORDER BY id")
                    .fetch_all(pool)
                    .await?;

            println!("{}", "👤 Users".bright_blue().bold());
            println!();
            for (id, name) in &rows {
                println!("  {:<5} {}", id.to_string().bright_black(), name.cyan());
            }
            println!();
            println!("  Total: {}", rows.len().to_string().bright_white().bold());
        }
    }

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgTokenRepository::new(Arc::new(pool.clone())));

    match action {
        TokenAction::Create { user_id, name, yes } => {
            create_token(repo, user_id, name, yes).await?;
        }
        TokenAction::List => {
            list_tokens(repo).await?;
        }
        TokenAction::Revoke { name } => {
            revoke_token(repo, name).await?;
        }
    }

    Ok(())
}

/// Creates a new API token with interactive prompts.
///
/// # Security
///
/// - Only the HMAC-SHA256 hash (keyed by `TOKEN_SIGNING_SECRET`) is stored
/// - Raw token is displayed once and cannot be retrieved later
/// - Tokens are 48 characters (alphanumeric) for high entropy
async fn create_token(
    repo: Arc<PgTokenRepository>,
    user_id: i64,
    name: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("Mobile App")
            .interact_text()?,
    };

    let token_value = generate_token();

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  Name:  {}", token_name.cyan());
    println!("  User:  {}", user_id.to_string().cyan());
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let token_hash = hash_token(&token_value)?;

    repo.create_token(user_id, &token_name, &token_hash)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!();
    println!("{}", "Add this to your requests:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all API tokens with status indicators.
async fn list_tokens(repo: Arc<PgTokenRepository>) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin token create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<6} {:<30} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "User".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for token in &tokens {
        let status = if token.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<3} {:<6} {:<30} {:<20} {}",
            token.id.to_string().bright_black(),
            token.user_id.to_string().bright_black(),
            token.name.cyan(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a token by name with confirmation prompt.
async fn revoke_token(repo: Arc<PgTokenRepository>, name: String) -> Result<()> {
    let token = repo
        .find_by_name(&name)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to look up token: {}", e))?
        .with_context(|| format!("No token named '{}'", name))?;

    if token.revoked_at.is_some() {
        println!("{}", "Token is already revoked".yellow());
        return Ok(());
    }

    let confirmed = Confirm::new()
        .with_prompt(format!("Revoke token '{}'?", token.name))
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!("{}", "✅ Token revoked".green().bold());

    Ok(())
}

/// Dispatches share moderation commands.
async fn handle_share_action(action: ShareAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgShareRepository::new(Arc::new(pool.clone())));

    match action {
        ShareAction::List => {
            let rows: Vec<(i64, String, i64, bool, i64, i64)> = sqlx::query_as(
                "SELECT id, share_code, set_id, is_active, view_count, copy_count \
                 FROM shared_sets ORDER BY created_at DESC",
            )
            .fetch_all(pool)
            .await?;

            println!("{}", "🔗 Shares".bright_blue().bold());
            println!();
            println!(
                "  {:<3} {:<14} {:<6} {:<9} {:>6} {:>7}",
                "ID".bright_white().bold(),
                "Code".bright_white().bold(),
                "Set".bright_white().bold(),
                "Status".bright_white().bold(),
                "Views".bright_white().bold(),
                "Copies".bright_white().bold()
            );
            println!("  {}", "─".repeat(55).bright_black());

            for (id, code, set_id, is_active, views, copies) in &rows {
                let status = if *is_active {
                    "ACTIVE".green()
                } else {
                    "INACTIVE".red()
                };
                println!(
                    "  {:<3} {:<14} {:<6} {:<9} {:>6} {:>7}",
                    id.to_string().bright_black(),
                    code.cyan(),
                    set_id.to_string().bright_black(),
                    status,
                    views,
                    copies
                );
            }

            println!();
            println!("  Total: {}", rows.len().to_string().bright_white().bold());
        }
        ShareAction::Deactivate { share_code, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!(
                        "Deactivate share '{}'? Its code stops resolving permanently.",
                        share_code
                    ))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let deactivated = repo
                .deactivate(&share_code)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to deactivate share: {}", e))?;

            if deactivated {
                println!("{}", "✅ Share deactivated".green().bold());
            } else {
                println!("{}", "No active share with that code".yellow());
            }
        }
    }

    Ok(())
}

/// Shows aggregate statistics for sets, shares, and copies.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let sets_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM word_sets")
        .fetch_one(pool)
        .await?;

    let shares_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM shared_sets WHERE is_active")
            .fetch_one(pool)
            .await?;

    let copies_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM set_copies")
        .fetch_one(pool)
        .await?;

    let total_views: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(view_count), 0)::bigint FROM shared_sets")
            .fetch_one(pool)
            .await?;

    println!("  Word sets:     {}", sets_count.to_string().bright_white());
    println!(
        "  Active shares: {}",
        shares_count.to_string().bright_white()
    );
    println!(
        "  Copies made:   {}",
        copies_count.to_string().bright_white()
    );
    println!("  Total views:   {}", total_views.to_string().bright_white());
    println!();

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  {}", version.bright_black());
        }
    }

    Ok(())
}

/// Generates a 48-character alphanumeric token.
fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}

/// Hashes a token exactly as the server's auth service does.
fn hash_token(token: &str) -> Result<String> {
    let secret = std::env::var("TOKEN_SIGNING_SECRET")
        .context("TOKEN_SIGNING_SECRET must be set to mint tokens")?;

    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(token.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}
