//! Ledger domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, Denomination, Magnitude, TransactionId};

/// Order in which the service returns ledger rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerOrder {
    /// Oldest transaction first.
    OldestFirst,
    /// Most recent transaction first.
    YoungestFirst,
}

impl LedgerOrder {
    /// Maps the wire flag `ordered_oldest_first`.
    #[must_use]
    pub const fn from_oldest_first(oldest_first: bool) -> Self {
        if oldest_first {
            Self::OldestFirst
        } else {
            Self::YoungestFirst
        }
    }

    /// Returns the wire flag for this order.
    #[must_use]
    pub const fn is_oldest_first(self) -> bool {
        matches!(self, Self::OldestFirst)
    }

    /// Chronologically earliest of `rows`, which are in this order.
    #[must_use]
    pub fn earliest<T>(self, rows: &[T]) -> Option<&T> {
        match self {
            Self::OldestFirst => rows.first(),
            Self::YoungestFirst => rows.last(),
        }
    }

    /// Chronologically latest of `rows`, which are in this order.
    #[must_use]
    pub fn latest<T>(self, rows: &[T]) -> Option<&T> {
        match self {
            Self::OldestFirst => rows.last(),
            Self::YoungestFirst => rows.first(),
        }
    }
}

/// Time span a ledger covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerWindow {
    /// Start of the span.
    pub start: DateTime<Utc>,
    /// End of the span.
    pub end: DateTime<Utc>,
}

/// One posting as seen from the ledger's account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerRow {
    /// Transaction the posting belongs to.
    pub transaction_id: TransactionId,
    /// When the transaction took effect.
    pub transaction_time: DateTime<Utc>,
    /// Transaction description.
    pub description: String,
    /// The opposing account, `None` when there are several.
    pub counterparty_account_id: Option<AccountId>,
    /// Name of the opposing account, as rendered by the service.
    pub counterparty_account_name: String,
    /// Debit side.
    pub debit: Magnitude,
    /// Credit side.
    pub credit: Magnitude,
    /// Account balance after this row, computed by the service.
    pub running_balance: Magnitude,
}

impl LedgerRow {
    /// Debit amount.
    #[must_use]
    pub fn debit(&self) -> Decimal {
        self.debit.value
    }

    /// Credit amount.
    #[must_use]
    pub fn credit(&self) -> Decimal {
        self.credit.value
    }

    /// Running balance after this row.
    #[must_use]
    pub fn running_balance(&self) -> Decimal {
        self.running_balance.value
    }
}

/// One page of a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerPage {
    /// Account the ledger belongs to.
    pub account_id: AccountId,
    /// Span covered.
    pub window: LedgerWindow,
    /// When the service computed the page.
    pub generated_time: DateTime<Utc>,
    /// Whether postings from descendant accounts are rolled in.
    pub is_recursive: bool,
    /// Unit amounts are expressed in.
    pub denomination: Denomination,
    /// Rows in service order.
    pub rows: Vec<LedgerRow>,
    /// 1-based index of this page.
    pub page_index: u32,
    /// Number of pages the ledger spans.
    pub total_pages: u32,
    /// Row order.
    pub order: LedgerOrder,
}
