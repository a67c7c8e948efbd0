//! Application layer
//!
//! Business logic for account and session management. Services speak to the
//! storage layer exclusively through the repository ports defined in
//! `store-core`, so any conforming implementation can be plugged in.

pub mod dto;
pub mod services;

pub use services::{AuthService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult};
