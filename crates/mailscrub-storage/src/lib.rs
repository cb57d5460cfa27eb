//! Storage layer for mailscrub
//!
//! This crate provides:
//! - SQLite database operations for raw and redacted records
//! - Schema migrations
//! - Row decoding with input validation

pub mod db;
pub mod error;
pub mod models;

pub use db::Storage;
pub use error::{Result, StorageError};
