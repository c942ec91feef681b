//! Console utility for the PixStop client.
//!
//! Exercises the same library path the mobile shells use: sign in, show
//! the profile (live or cached), sign out. Handy for poking at a backend
//! without building the app.

use std::io::{self, Write};

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pixstop_client::{ApiClient, ApiConfig, AuthError, SessionRepository, SessionStore, User};

/// Initialize the tracing subscriber for logging.
/// Use RUST_LOG to control the log level (e.g., RUST_LOG=debug).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = ApiConfig::from_env();
    info!(base_url = %config.base_url, "PixStop client starting");

    let api = ApiClient::new(config)?;
    let store = SessionStore::open_default()?;
    let repo = SessionRepository::new(api, store);

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        None => login(&repo).await,
        Some("--status") => status(&repo),
        Some("--profile") => profile(&repo).await,
        Some("--logout") => logout(&repo).await,
        Some(other) => {
            eprintln!("Unknown option: {}", other);
            eprintln!("Usage: pixstop [--status | --profile | --logout]");
            Ok(())
        }
    }
}

async fn login(repo: &SessionRepository) -> Result<()> {
    println!("=== PixStop Login ===\n");

    print!("Email: ");
    io::stdout().flush()?;
    let mut email = String::new();
    io::stdin().read_line(&mut email)?;
    let email = email.trim().to_string();

    let password = rpassword::prompt_password("Password: ")?;

    println!("\nSigning in...");
    match repo.login(&email, &password).await {
        Ok(outcome) => {
            println!("Welcome, {}!\n", outcome.user.name);
            print_user(&outcome.user);
            Ok(())
        }
        Err(AuthError::OfflineFallback) => {
            println!("No connection - continuing with the cached session.\n");
            if let Some(user) = repo.cached_user() {
                print_user(&user);
            }
            Ok(())
        }
        Err(e) => anyhow::bail!("Login failed: {}", e),
    }
}

fn status(repo: &SessionRepository) -> Result<()> {
    if !repo.is_authenticated() {
        println!("Not signed in.");
        return Ok(());
    }
    match repo.cached_user() {
        Some(user) => {
            print!("Signed in as {} <{}>", user.name, user.email);
            if repo.store().is_fresh() {
                println!();
            } else {
                println!(" (cached profile is older than a day)");
            }
        }
        None => println!("Signed in, profile not cached yet."),
    }
    Ok(())
}

async fn profile(repo: &SessionRepository) -> Result<()> {
    match repo.fetch_profile().await {
        Ok(outcome) => {
            print_user(&outcome.user);
            if outcome.served_from_cache {
                println!("\n(offline - showing cached data)");
            }
            Ok(())
        }
        Err(e) => anyhow::bail!("Could not fetch profile: {}", e),
    }
}

async fn logout(repo: &SessionRepository) -> Result<()> {
    repo.logout().await;
    println!("Signed out.");
    Ok(())
}

fn print_user(user: &User) {
    println!("  id:    {}", user.id);
    println!("  name:  {}", user.name);
    let verified = if user.is_email_verified() {
        "(verified)"
    } else {
        "(unverified)"
    };
    println!("  email: {} {}", user.email, verified);
    if let Some(ref url) = user.avatar_url {
        println!("  avatar: {}", url);
    }
    if let Some(ref created) = user.created_at {
        println!("  member since: {}", created);
    }
}
