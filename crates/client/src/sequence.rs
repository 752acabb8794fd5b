//! Paginated ledger sequences.
//!
//! A sequence is opened with page 1 and grows one page per `advance()`.
//! Loaded rows are append-only: they are never replaced, reordered or
//! dropped while the sequence lives.
//!
//! # State
//!
//! ```text
//!            advance()
//!   Idle ─────────────────▶ Fetching
//!    ▲                         │
//!    └──── page appended ──────┤
//!    └──── failure, unchanged ─┘
//! ```
//!
//! At most one `advance()` is in flight per sequence. A second call made
//! while one is outstanding fails with `OperationInProgress` instead of
//! racing the page counter. Reads never wait on a fetch.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tally_core::Decode;
use tally_core::ledger::{LedgerOrder, LedgerPage, LedgerRow, LedgerWindow};
use tally_shared::types::{AccountId, Denomination};
use tally_shared::{TallyError, TallyResult};
use tracing::{info, warn};

use crate::requests::LedgerRequest;
use crate::transport::Transport;

/// Order used when neither the request nor the client chooses one.
pub const FALLBACK_ORDER: LedgerOrder = LedgerOrder::YoungestFirst;

/// Selects which ledger endpoint a sequence reads.
pub trait LedgerScope: Send + Sync + 'static {
    /// Endpoint path.
    const PATH: &'static str;
    /// Whether descendant postings are rolled in.
    const RECURSIVE: bool;
}

/// Postings to the account itself.
#[derive(Debug, Clone, Copy)]
pub struct Direct;

/// Postings to the account and all its descendants.
#[derive(Debug, Clone, Copy)]
pub struct Recursive;

impl LedgerScope for Direct {
    const PATH: &'static str = "/accounts/ledger";
    const RECURSIVE: bool = false;
}

impl LedgerScope for Recursive {
    const PATH: &'static str = "/accounts/ledger/recursive";
    const RECURSIVE: bool = true;
}

/// A ledger of one account's own postings.
pub type LedgerSequence<T> = PagedLedger<T, Direct>;

/// A ledger including postings to descendant accounts.
pub type RecursiveLedgerSequence<T> = PagedLedger<T, Recursive>;

/// Whether a page request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencePhase {
    /// No fetch in flight.
    Idle,
    /// One page request outstanding.
    Fetching,
}

#[derive(Debug)]
struct Loaded {
    rows: Vec<LedgerRow>,
    highest_loaded_page: u32,
    total_pages: u32,
}

/// Clears the in-flight flag when the fetch ends, including on cancellation.
struct FetchGuard<'a>(&'a AtomicBool);

impl<'a> FetchGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> TallyResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| TallyError::OperationInProgress)?;
        Ok(Self(flag))
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// An incrementally loaded ledger.
///
/// `earliest()` and `latest()` are chronological, whatever order the rows
/// were requested in.
pub struct PagedLedger<T, S> {
    transport: Arc<T>,
    request: LedgerRequest,
    account_id: AccountId,
    window: LedgerWindow,
    denomination: Denomination,
    order: LedgerOrder,
    is_recursive: bool,
    loaded: RwLock<Loaded>,
    in_flight: AtomicBool,
    scope: PhantomData<fn() -> S>,
}

impl<T, S> std::fmt::Debug for PagedLedger<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedLedger")
            .field("account_id", &self.account_id)
            .field("order", &self.order)
            .field("is_recursive", &self.is_recursive)
            .field("loaded", &*self.read())
            .finish_non_exhaustive()
    }
}

impl<T, S> PagedLedger<T, S>
where
    T: Transport,
    S: LedgerScope,
{
    /// Fetches page 1 and builds the sequence from it.
    ///
    /// # Errors
    ///
    /// Any failure of the first fetch; no sequence is created.
    pub async fn open(transport: Arc<T>, request: LedgerRequest) -> TallyResult<Self> {
        let requested_order = request.order.unwrap_or(FALLBACK_ORDER);
        let first = fetch_page::<T, S>(&transport, &request, 1, requested_order).await?;

        if first.account_id != request.account_id {
            return Err(TallyError::malformed(format!(
                "ledger for account {} returned for account {}",
                first.account_id, request.account_id
            )));
        }
        if first.order != requested_order {
            warn!(
                account_id = %request.account_id,
                requested = ?requested_order,
                received = ?first.order,
                "Service chose a different ledger order"
            );
        }

        info!(
            account_id = %first.account_id,
            recursive = first.is_recursive,
            order = ?first.order,
            total_pages = first.total_pages,
            rows = first.rows.len(),
            "Opened ledger sequence"
        );

        Ok(Self {
            transport,
            request,
            account_id: first.account_id,
            window: first.window,
            denomination: first.denomination,
            order: first.order,
            is_recursive: first.is_recursive,
            loaded: RwLock::new(Loaded {
                rows: first.rows,
                highest_loaded_page: first.page_index,
                total_pages: first.total_pages,
            }),
            in_flight: AtomicBool::new(false),
            scope: PhantomData,
        })
    }

    /// Loads the next page and returns only its rows.
    ///
    /// On failure nothing changes and the call may be retried.
    ///
    /// # Errors
    ///
    /// `OperationInProgress` if another advance is outstanding; otherwise
    /// any transport or decode failure of the page.
    pub async fn advance(&self) -> TallyResult<Vec<LedgerRow>> {
        let _guard = FetchGuard::acquire(&self.in_flight)?;

        let next = self
            .read()
            .highest_loaded_page
            .checked_add(1)
            .ok_or_else(|| TallyError::malformed("ledger page index overflow"))?;

        let page = fetch_page::<T, S>(&self.transport, &self.request, next, self.order).await?;
        if page.account_id != self.account_id {
            return Err(TallyError::malformed(format!(
                "page {next} belongs to account {}, expected {}",
                page.account_id, self.account_id
            )));
        }
        if page.order != self.order {
            return Err(TallyError::malformed(format!(
                "page {next} arrived in {:?}, sequence is {:?}",
                page.order, self.order
            )));
        }

        let mut loaded = self.write();
        loaded.rows.extend(page.rows.iter().cloned());
        loaded.highest_loaded_page = next;
        loaded.total_pages = page.total_pages;
        Ok(page.rows)
    }

    /// Advances until every page is loaded.
    ///
    /// Returns the number of rows appended.
    ///
    /// # Errors
    ///
    /// The first failing `advance()`; pages loaded before it are kept.
    pub async fn load_all(&self) -> TallyResult<usize> {
        let mut appended = 0;
        while self.has_more_pages() {
            appended += self.advance().await?.len();
        }
        info!(
            account_id = %self.account_id,
            rows = self.len(),
            pages = self.highest_loaded_page(),
            "Ledger fully loaded"
        );
        Ok(appended)
    }
}

impl<T, S> PagedLedger<T, S> {
    fn read(&self) -> RwLockReadGuard<'_, Loaded> {
        self.loaded.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Loaded> {
        self.loaded.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Account the ledger lists.
    #[must_use]
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Span covered.
    #[must_use]
    pub fn window(&self) -> LedgerWindow {
        self.window
    }

    /// Unit amounts are expressed in.
    #[must_use]
    pub fn denomination(&self) -> Denomination {
        self.denomination
    }

    /// Order rows are loaded in.
    #[must_use]
    pub fn order(&self) -> LedgerOrder {
        self.order
    }

    /// Whether descendant postings are rolled in.
    #[must_use]
    pub fn is_recursive(&self) -> bool {
        self.is_recursive
    }

    /// Index of the last page loaded.
    #[must_use]
    pub fn highest_loaded_page(&self) -> u32 {
        self.read().highest_loaded_page
    }

    /// Number of pages, as last reported by the service.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.read().total_pages
    }

    /// Whether the service reported pages beyond those loaded.
    #[must_use]
    pub fn has_more_pages(&self) -> bool {
        let loaded = self.read();
        loaded.highest_loaded_page < loaded.total_pages
    }

    /// Current phase of the fetch state machine.
    #[must_use]
    pub fn phase(&self) -> SequencePhase {
        if self.in_flight.load(Ordering::Acquire) {
            SequencePhase::Fetching
        } else {
            SequencePhase::Idle
        }
    }

    /// Whether an `advance()` is outstanding.
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.phase() == SequencePhase::Fetching
    }

    /// Number of rows loaded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().rows.len()
    }

    /// Whether no rows are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().rows.is_empty()
    }

    /// Row at `index` in load order; `None` past the loaded rows.
    ///
    /// Never triggers a fetch.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<LedgerRow> {
        self.read().rows.get(index).cloned()
    }

    /// Snapshot of the loaded rows, in load order.
    #[must_use]
    pub fn rows(&self) -> Vec<LedgerRow> {
        self.read().rows.clone()
    }

    /// Iterates over a snapshot of the loaded rows.
    #[must_use]
    pub fn iter(&self) -> std::vec::IntoIter<LedgerRow> {
        self.rows().into_iter()
    }

    /// Chronologically earliest loaded row.
    #[must_use]
    pub fn earliest(&self) -> Option<LedgerRow> {
        self.order.earliest(&self.read().rows).cloned()
    }

    /// Chronologically latest loaded row.
    #[must_use]
    pub fn latest(&self) -> Option<LedgerRow> {
        self.order.latest(&self.read().rows).cloned()
    }
}

async fn fetch_page<T, S>(
    transport: &T,
    request: &LedgerRequest,
    page: u32,
    order: LedgerOrder,
) -> TallyResult<LedgerPage>
where
    T: Transport,
    S: LedgerScope,
{
    let bytes = transport
        .send(request.page_request(S::PATH, page, order))
        .await
        .map_err(|failure| {
            warn!(
                account_id = %request.account_id,
                page,
                error = %failure,
                "Ledger page fetch failed"
            );
            TallyError::Transport(failure)
        })?;

    let decoded = LedgerPage::from_slice(&bytes)?;
    if decoded.page_index != page {
        return Err(TallyError::malformed(format!(
            "requested ledger page {page}, received page {}",
            decoded.page_index
        )));
    }
    if decoded.is_recursive != S::RECURSIVE {
        warn!(
            account_id = %request.account_id,
            page,
            recursive = decoded.is_recursive,
            "Ledger page recursion flag does not match endpoint"
        );
    }
    Ok(decoded)
}

#[cfg(test)]
#[path = "sequence_tests.rs"]
mod tests;
