//! Core decoding logic for Tally.
//!
//! This crate turns the service's JSON payloads into typed values with ZERO
//! transport or runtime dependencies. Every function here is pure and may run
//! on any number of threads at once.
//!
//! # Modules
//!
//! - `hierarchy` - Account nodes and the detail/placeholder discriminator
//! - `reports` - Tree, position and performance report assemblers
//! - `ledger` - Ledger rows and the page decoder

pub mod decode;
pub mod hierarchy;
pub mod ledger;
pub mod reports;

pub use decode::Decode;
