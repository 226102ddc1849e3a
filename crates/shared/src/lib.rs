//! Shared configuration and error types for Blobrelay.
//!
//! This crate provides the pieces every other crate agrees on:
//! - Storage and server configuration loaded from the environment
//! - The application-wide error taxonomy

pub mod config;
pub mod error;

pub use config::{AppConfig, ServerConfig, StorageSettings};
pub use error::{AppError, AppResult};
