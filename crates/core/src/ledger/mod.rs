//! Ledger pages.
//!
//! A ledger is the ordered list of postings to one account, served one page
//! at a time. This module decodes a single page; stitching pages together
//! is the job of the client's ledger sequence.

pub mod decode;
pub mod types;


pub use types::{LedgerOrder, LedgerPage, LedgerRow, LedgerWindow};
