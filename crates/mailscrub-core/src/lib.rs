//! Core domain models for mailscrub
//!
//! This crate contains:
//! - Domain models (Record, SanitizedRecord, Field)
//! - Report table rendering
//! - Core error types

pub mod error;
pub mod record;
pub mod render;

pub use error::{CoreError, Result};
pub use record::{Field, MessageFields, Record, SanitizedRecord};
pub use render::{Column, ReportRow, ReportSource, render_table};
