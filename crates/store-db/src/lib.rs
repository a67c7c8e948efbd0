//! # store-db
//!
//! Database layer implementing the credential-store repository traits with
//! PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, including the atomic conditional revoke
//!   that gives refresh tokens their single-use rotation semantics
//!
//! ## Usage
//!
//! ```rust,ignore
//! use store_db::pool::{create_pool, DatabaseConfig};
//! use store_db::repositories::PgUserRepository;
//! use store_core::traits::UserRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{PgRefreshTokenRepository, PgUserRepository};
