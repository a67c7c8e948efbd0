//! Entity to model mappers
//!
//! Conversions between domain entities (store-core) and database models:
//! `From<Model> for Entity` turns rows into domain objects.

mod refresh_token;
mod user;
