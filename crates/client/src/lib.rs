//! Client-side access to the accounting service.
//!
//! The core decoders are pure; this crate wires them to a [`Transport`]:
//! - `transport` - The seam every request goes through
//! - `http` - A `reqwest` implementation of that seam
//! - `requests` - Argument builders for reports and ledgers
//! - `client` - One-call report fetching and ledger opening
//! - `sequence` - Incrementally loaded, order-aware ledgers

pub mod client;
pub mod http;
pub mod requests;
pub mod sequence;
pub mod transport;

pub use client::TallyClient;
pub use http::{HttpSetupError, HttpTransport};
pub use requests::{LedgerRequest, PerformanceRequest, PositionRequest, ReportRequest, TreeRequest};
pub use sequence::{
    Direct, LedgerScope, LedgerSequence, PagedLedger, Recursive, RecursiveLedgerSequence,
    SequencePhase,
};
pub use transport::{ApiRequest, Method, Transport};
