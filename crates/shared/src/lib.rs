//! Shared types, errors, and configuration for Tally.
//!
//! This crate provides common types used across all other crates:
//! - Signed-magnitude parsing for the service's accounting notation
//! - Typed IDs for type-safe entity references
//! - The two-variant denomination reference
//! - Wire timestamp encoding
//! - The library error taxonomy
//! - Client configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::ClientConfig;
pub use error::{TallyError, TallyResult, TransportFailure};
