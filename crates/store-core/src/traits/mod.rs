//! Repository traits (ports)

mod repositories;

pub use repositories::{RefreshTokenRepository, RepoResult, UserRepository};
