//! Data transfer objects
//!
//! Request DTOs carry validation rules; response DTOs control exactly which
//! fields cross the API boundary (the password hash never does).

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{LoginRequest, LogoutRequest, RefreshRequest, SignupRequest};
pub use responses::{AckResponse, AuthResponse, TokenResponse, UserResponse};
