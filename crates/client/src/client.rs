//! High-level client.

use std::sync::Arc;

use tally_core::Decode;
use tally_core::ledger::LedgerOrder;
use tally_core::reports::{PerformanceReport, PositionReport, TreeReport};
use tally_shared::config::{ClientConfig, DefaultLedgerOrder};
use tally_shared::{TallyError, TallyResult};
use tracing::{debug, warn};

use crate::http::{HttpSetupError, HttpTransport};
use crate::requests::{
    LedgerRequest, PerformanceRequest, PositionRequest, ReportRequest, TreeRequest,
};
use crate::sequence::{LedgerSequence, RecursiveLedgerSequence};
use crate::transport::Transport;

/// Fetches reports and opens ledgers through one transport.
///
/// Cloning is cheap; clones share the transport.
#[derive(Debug)]
pub struct TallyClient<T> {
    transport: Arc<T>,
    default_order: LedgerOrder,
}

impl<T> Clone for TallyClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            default_order: self.default_order,
        }
    }
}

impl<T: Transport> TallyClient<T> {
    /// Creates a client owning `transport`.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self::from_shared(Arc::new(transport))
    }

    /// Creates a client over a transport shared with other callers.
    #[must_use]
    pub fn from_shared(transport: Arc<T>) -> Self {
        Self {
            transport,
            default_order: LedgerOrder::YoungestFirst,
        }
    }

    /// Sets the order used for ledger requests that do not choose one.
    #[must_use]
    pub fn with_default_order(mut self, order: LedgerOrder) -> Self {
        self.default_order = order;
        self
    }

    /// Order used for ledger requests that do not choose one.
    #[must_use]
    pub fn default_order(&self) -> LedgerOrder {
        self.default_order
    }

    /// Sends a report request and decodes the answer.
    ///
    /// # Errors
    ///
    /// Transport failures pass through unchanged; decode failures are
    /// `MalformedResponse` or `MalformedMagnitude`.
    pub async fn fetch<R: ReportRequest>(&self, request: &R) -> TallyResult<R::Report> {
        let api_request = request.to_api_request();
        let path = api_request.path;
        debug!(path, "Fetching report");

        let bytes = self.transport.send(api_request).await.map_err(|failure| {
            warn!(path, error = %failure, "Report fetch failed");
            TallyError::Transport(failure)
        })?;
        R::Report::from_slice(&bytes)
    }

    /// Fetches an account tree.
    ///
    /// # Errors
    ///
    /// See [`TallyClient::fetch`].
    pub async fn tree(&self, request: &TreeRequest) -> TallyResult<TreeReport> {
        self.fetch(request).await
    }

    /// Fetches a position (balance sheet).
    ///
    /// # Errors
    ///
    /// See [`TallyClient::fetch`].
    pub async fn position(&self, request: &PositionRequest) -> TallyResult<PositionReport> {
        self.fetch(request).await
    }

    /// Fetches a performance (income statement).
    ///
    /// # Errors
    ///
    /// See [`TallyClient::fetch`].
    pub async fn performance(
        &self,
        request: &PerformanceRequest,
    ) -> TallyResult<PerformanceReport> {
        self.fetch(request).await
    }

    /// Opens a ledger of the account's own postings.
    ///
    /// # Errors
    ///
    /// Any failure fetching page 1.
    pub async fn ledger(&self, request: LedgerRequest) -> TallyResult<LedgerSequence<T>> {
        LedgerSequence::open(Arc::clone(&self.transport), self.resolve(request)).await
    }

    /// Opens a ledger including postings to descendant accounts.
    ///
    /// # Errors
    ///
    /// Any failure fetching page 1.
    pub async fn recursive_ledger(
        &self,
        request: LedgerRequest,
    ) -> TallyResult<RecursiveLedgerSequence<T>> {
        RecursiveLedgerSequence::open(Arc::clone(&self.transport), self.resolve(request)).await
    }

    fn resolve(&self, request: LedgerRequest) -> LedgerRequest {
        match request.order {
            Some(_) => request,
            None => request.with_order(self.default_order),
        }
    }
}

impl TallyClient<HttpTransport> {
    /// Builds an HTTP client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be set up.
    pub fn from_config(config: &ClientConfig) -> Result<Self, HttpSetupError> {
        let order = match config.ledger.default_order {
            DefaultLedgerOrder::OldestFirst => LedgerOrder::OldestFirst,
            DefaultLedgerOrder::YoungestFirst => LedgerOrder::YoungestFirst,
        };
        Ok(Self::new(HttpTransport::from_config(&config.api)?).with_default_order(order))
    }
}
