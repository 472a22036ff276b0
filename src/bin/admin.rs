//! CLI administration tool for microblog.
//!
//! Provides commands for managing user accounts, viewing statistics,
//! and performing database operations without going through the web UI.
//!
//! # Usage
//!
//! ```bash
//! # Create a new user (password is prompted)
//! cargo run --bin admin -- user create
//!
//! # List all users
//! cargo run --bin admin -- user list
//!
//! # Show a single user
//! cargo run --bin admin -- user show susan
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
//! - `DATABASE_URL` (or `DB_HOST`/`DB_USER`/...): PostgreSQL connection
//! - `BCRYPT_COST` (optional): work factor for new password hashes

use microblog::application::services::{RegisterInput, UserService};
use microblog::config::Config;
use microblog::error::AppError;
use microblog::infrastructure::persistence::PgUserRepository;
use microblog::web::forms::{FormErrors, RegistrationForm};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

type Service = UserService<PgUserRepository>;

/// CLI tool for managing microblog.
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
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
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
    /// Create a new user
    Create {
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Email address (prompted when omitted)
        #[arg(short, long)]
        email: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users
    List,

    /// Show a user's profile
    Show {
        /// Username to look up
        username: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url().context("Failed to load database configuration")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let service = UserService::new(
        Arc::new(PgUserRepository::new(Arc::new(pool.clone()))),
        Config::bcrypt_cost_from_env(),
    );

    match cli.command {
        Commands::User { action } => handle_user_action(action, &service).await?,
        Commands::Stats => handle_stats(&service).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, service: &Service) -> Result<()> {
    match action {
        UserAction::Create {
            username,
            email,
            yes,
        } => create_user(service, username, email, yes).await?,
        UserAction::List => list_users(service).await?,
        UserAction::Show { username } => show_user(service, &username).await?,
    }

    Ok(())
}

/// Creates a user with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for username and email (or use provided)
/// 2. Prompt for the password twice
/// 3. Validate with the same rules as the registration form
/// 4. Confirm creation (unless `--yes` flag)
/// 5. Store the user with a bcrypt password hash
async fn create_user(
    service: &Service,
    username: Option<String>,
    email: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    let form = RegistrationForm {
        username,
        email,
        password: password.clone(),
        password2: password,
        csrf_token: String::new(),
    };

    if let Err(errors) = form.validate() {
        print_field_errors(&FormErrors::from(&errors));
        anyhow::bail!("Invalid user details");
    }

    println!();
    println!("{}", "User details:".bright_white().bold());
    println!("  Username: {}", form.username.cyan());
    println!("  Email:    {}", form.email.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let user = match service.register(RegisterInput::from(form)).await {
        Ok(user) => user,
        Err(e @ AppError::Conflict { .. }) => {
            println!("{}", format!("⚠️  {e}").yellow());
            anyhow::bail!("User was not created");
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to create user: {}", e)),
    };

    println!();
    println!(
        "{} {}",
        "✅ User created with id".green().bold(),
        user.id.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

fn print_field_errors(errors: &FormErrors) {
    for field in ["username", "email", "password", "password2"] {
        for message in errors.field(field) {
            println!("  {} {}", format!("{field}:").red(), message);
        }
    }
}

/// Lists all users.
///
/// # Output Format
///
/// ```text
/// 📋 Users
///
///   ID  Username             Email                          Last seen
///   ───────────────────────────────────────────────────────────────────────────
///   1   susan                susan@example.com              2024-01-15 10:30
/// ```
async fn list_users(service: &Service) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = service
        .list_users()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<20} {:<30} {:<16}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Email".bright_white().bold(),
        "Last seen".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for user in &users {
        println!(
            "  {:<3} {:<20} {:<30} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            user.email,
            user.last_seen
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Prints one user's profile.
async fn show_user(service: &Service, username: &str) -> Result<()> {
    let user = match service.get_by_username(username).await {
        Ok(user) => user,
        Err(AppError::NotFound { .. }) => {
            println!("{}", format!("⚠️  No user named {username}").yellow());
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Database error: {}", e)),
    };

    println!("{}", format!("👤 {}", user.username).bright_blue().bold());
    println!();
    println!("  ID:        {}", user.id.to_string().bright_black());
    println!("  Email:     {}", user.email.cyan());
    println!(
        "  About me:  {}",
        user.about_me.as_deref().unwrap_or("-")
    );
    println!(
        "  Last seen: {}",
        user.last_seen.format("%Y-%m-%d %H:%M UTC")
    );
    println!(
        "  Joined:    {}",
        user.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!("  Avatar:    {}", user.avatar(128).bright_black());
    println!();

    Ok(())
}

/// Displays user statistics.
async fn handle_stats(service: &Service) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users_count = service
        .count_users()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?;

    println!(
        "  Users: {}",
        users_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
