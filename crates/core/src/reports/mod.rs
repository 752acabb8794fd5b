//! Financial report assembly.
//!
//! Each report decodes its metadata, then hands every named forest to the
//! hierarchy discriminator:
//! - Tree (one forest: `tree`)
//! - Position (three forests: `assets`, `liabilities`, `equities`)
//! - Performance (two forests: `income`, `expenses`)

pub mod decode;
pub mod types;

#[cfg(test)]
mod tests;

pub use types::*;
