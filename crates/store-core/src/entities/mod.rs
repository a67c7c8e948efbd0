//! Domain entities

mod refresh_token;
mod user;

pub use refresh_token::RefreshToken;
pub use user::User;
