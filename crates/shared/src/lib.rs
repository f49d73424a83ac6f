//! Shared configuration and errors for salesjournal.
//!
//! This crate provides common pieces used across all other crates:
//! - Application-wide error types
//! - Configuration management (application settings and per-client files)

pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
