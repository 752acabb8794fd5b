//! Common types used across the library.

pub mod denomination;
pub mod id;
pub mod magnitude;
pub mod time;

pub use denomination::Denomination;
pub use id::*;
pub use magnitude::{Magnitude, parse_magnitude};
