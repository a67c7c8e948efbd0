//! Seed an administrator account
//!
//! Run with:
//! ```bash
//! SEED_ADMIN_EMAIL=admin@example.com SEED_ADMIN_PASSWORD=changeme \
//!     cargo run -p store-api --bin seed-admin
//! ```
//!
//! Idempotent: if an account with the given email already exists the run
//! is a no-op.

use std::env;

use tracing::{error, info};

use store_common::{try_init_tracing, AppConfig, PasswordService};
use store_core::entities::User;
use store_core::traits::UserRepository;
use store_core::{Role, SnowflakeGenerator};
use store_db::{create_pool, PgUserRepository};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Admin seeding failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    let email = env::var("SEED_ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
    let password =
        env::var("SEED_ADMIN_PASSWORD").map_err(|_| "SEED_ADMIN_PASSWORD must be set")?;
    let name = env::var("SEED_ADMIN_NAME").ok();

    if password.len() < 8 {
        return Err("SEED_ADMIN_PASSWORD must be at least 8 characters".into());
    }

    let db_config = store_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    let pool = create_pool(&db_config).await?;
    let users = PgUserRepository::new(pool);

    if users.email_exists(&email).await? {
        info!(email = %email, "Admin account already exists, nothing to do");
        return Ok(());
    }

    let generator = SnowflakeGenerator::new(config.snowflake.worker_id);
    let mut user = User::new(generator.generate(), email, name);
    user.role = Role::Admin;

    let password_hash = PasswordService::new().hash(&password)?;
    users.create(&user, &password_hash).await?;

    info!(user_id = %user.id, email = %user.email, "Admin account created");
    Ok(())
}
