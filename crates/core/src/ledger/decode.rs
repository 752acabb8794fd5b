//! Ledger page decoder.
//!
//! Rows are positional arrays, not objects:
//!
//! ```text
//! [transaction_id, transaction_time, description, counterparty_id | null,
//!  counterparty_name, debit, credit, running_balance]
//! ```
//!
//! A row of the wrong length fails the whole page.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tally_shared::types::time::{parse_wire_time, wire};
use tally_shared::types::{AccountId, Denomination, Magnitude, TransactionId};
use tally_shared::{TallyError, TallyResult};
use tracing::debug;

use super::types::{LedgerOrder, LedgerPage, LedgerRow, LedgerWindow};
use crate::decode::decode_via;

type RawRow = (
    TransactionId,
    String,
    String,
    Option<AccountId>,
    String,
    String,
    String,
    String,
);

#[derive(Debug, Deserialize)]
struct RawPage {
    account_id: AccountId,
    #[serde(with = "wire")]
    start_time: DateTime<Utc>,
    #[serde(with = "wire")]
    end_time: DateTime<Utc>,
    #[serde(with = "wire")]
    generated_time: DateTime<Utc>,
    recursive: bool,
    #[serde(default)]
    global_unit_denomination: Option<i64>,
    #[serde(default)]
    custom_unit_denomination: Option<i64>,
    ledger_rows: Vec<RawRow>,
    page: u32,
    number_of_pages: u32,
    ordered_oldest_first: bool,
}

fn assemble_row(raw: RawRow) -> TallyResult<LedgerRow> {
    let (
        transaction_id,
        transaction_time,
        description,
        counterparty_account_id,
        counterparty_account_name,
        debit,
        credit,
        running_balance,
    ) = raw;

    Ok(LedgerRow {
        transaction_id,
        transaction_time: parse_wire_time(&transaction_time)?,
        description,
        counterparty_account_id,
        counterparty_account_name,
        debit: Magnitude::parse(debit)?,
        credit: Magnitude::parse(credit)?,
        running_balance: Magnitude::parse(running_balance)?,
    })
}

impl LedgerPage {
    fn assemble(raw: RawPage) -> TallyResult<Self> {
        if raw.page == 0 {
            return Err(TallyError::malformed("ledger page index must start at 1"));
        }

        let rows = raw
            .ledger_rows
            .into_iter()
            .map(assemble_row)
            .collect::<TallyResult<Vec<_>>>()?;

        let page = Self {
            account_id: raw.account_id,
            window: LedgerWindow {
                start: raw.start_time,
                end: raw.end_time,
            },
            generated_time: raw.generated_time,
            is_recursive: raw.recursive,
            denomination: Denomination::from_wire(
                raw.global_unit_denomination,
                raw.custom_unit_denomination,
            )?,
            rows,
            page_index: raw.page,
            total_pages: raw.number_of_pages,
            order: LedgerOrder::from_oldest_first(raw.ordered_oldest_first),
        };

        debug!(
            account_id = %page.account_id,
            page = page.page_index,
            total_pages = page.total_pages,
            rows = page.rows.len(),
            "Decoded ledger page"
        );
        Ok(page)
    }
}

decode_via!(LedgerPage, RawPage);
