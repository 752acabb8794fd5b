//! Request argument builders.
//!
//! Every request carries the entity in the query string and its arguments as
//! a JSON object body.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tally_core::Decode;
use tally_core::ledger::LedgerOrder;
use tally_core::reports::{PerformanceReport, PositionReport, TreeReport};
use tally_shared::types::time::format_wire_time;
use tally_shared::types::{AccountId, Denomination, EntityId};

use crate::transport::{ApiRequest, Method};

/// A request that yields one decodable report.
pub trait ReportRequest {
    /// The report the service answers with.
    type Report: Decode;

    /// Renders the request.
    fn to_api_request(&self) -> ApiRequest;
}

fn build(path: &'static str, entity_id: &EntityId, arguments: Map<String, Value>) -> ApiRequest {
    ApiRequest {
        path,
        method: Method::Get,
        query: vec![("entity_id".to_string(), entity_id.to_string())],
        body: Some(Value::Object(arguments).to_string().into_bytes()),
    }
}

fn time(value: &DateTime<Utc>) -> Value {
    Value::String(format_wire_time(value))
}

fn arguments(denomination: &Denomination) -> Map<String, Value> {
    let mut arguments = Map::new();
    denomination.write_wire(&mut arguments);
    arguments
}

fn insert_depth(arguments: &mut Map<String, Value>, depth: Option<u32>) {
    if let Some(depth) = depth {
        arguments.insert("depth".to_string(), Value::from(depth));
    }
}

/// Arguments for a tree report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRequest {
    /// Entity to report on.
    pub entity_id: EntityId,
    /// Instant the balances are computed at.
    pub balance_time: DateTime<Utc>,
    /// Unit to express balances in.
    pub denomination: Denomination,
    /// Depth beyond which nodes become placeholders.
    pub depth: Option<u32>,
}

impl TreeRequest {
    /// Creates a tree request without a depth limit.
    #[must_use]
    pub fn new(
        entity_id: EntityId,
        balance_time: DateTime<Utc>,
        denomination: Denomination,
    ) -> Self {
        Self {
            entity_id,
            balance_time,
            denomination,
            depth: None,
        }
    }

    /// Limits the resolved depth.
    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }
}

impl ReportRequest for TreeRequest {
    type Report = TreeReport;

    fn to_api_request(&self) -> ApiRequest {
        let mut args = arguments(&self.denomination);
        args.insert("balance_time".to_string(), time(&self.balance_time));
        insert_depth(&mut args, self.depth);
        build("/trees", &self.entity_id, args)
    }
}

/// Arguments for a position (balance sheet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRequest {
    /// Entity to report on.
    pub entity_id: EntityId,
    /// Instant the balances are computed at.
    pub balance_time: DateTime<Utc>,
    /// Unit to express balances in.
    pub denomination: Denomination,
    /// Depth beyond which nodes become placeholders.
    pub depth: Option<u32>,
}

impl PositionRequest {
    /// Creates a position request without a depth limit.
    #[must_use]
    pub fn new(
        entity_id: EntityId,
        balance_time: DateTime<Utc>,
        denomination: Denomination,
    ) -> Self {
        Self {
            entity_id,
            balance_time,
            denomination,
            depth: None,
        }
    }

    /// Limits the resolved depth.
    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }
}

impl ReportRequest for PositionRequest {
    type Report = PositionReport;

    fn to_api_request(&self) -> ApiRequest {
        let mut args = arguments(&self.denomination);
        args.insert("balance_time".to_string(), time(&self.balance_time));
        insert_depth(&mut args, self.depth);
        build("/positions", &self.entity_id, args)
    }
}

/// Arguments for a performance (income statement).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformanceRequest {
    /// Entity to report on.
    pub entity_id: EntityId,
    /// Period start.
    pub start_time: DateTime<Utc>,
    /// Period end.
    pub end_time: DateTime<Utc>,
    /// Unit to express balances in.
    pub denomination: Denomination,
    /// Depth beyond which nodes become placeholders.
    pub depth: Option<u32>,
}

impl PerformanceRequest {
    /// Creates a performance request without a depth limit.
    #[must_use]
    pub fn new(
        entity_id: EntityId,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        denomination: Denomination,
    ) -> Self {
        Self {
            entity_id,
            start_time,
            end_time,
            denomination,
            depth: None,
        }
    }

    /// Limits the resolved depth.
    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }
}

impl ReportRequest for PerformanceRequest {
    type Report = PerformanceReport;

    fn to_api_request(&self) -> ApiRequest {
        let mut args = arguments(&self.denomination);
        args.insert("start_time".to_string(), time(&self.start_time));
        args.insert("end_time".to_string(), time(&self.end_time));
        insert_depth(&mut args, self.depth);
        build("/performances", &self.entity_id, args)
    }
}

/// Arguments for a ledger, plain or recursive.
///
/// The page is not part of the request: ledger sequences always open at
/// page 1 and choose later pages themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRequest {
    /// Entity owning the account.
    pub entity_id: EntityId,
    /// Account whose postings are listed.
    pub account_id: AccountId,
    /// Earliest transaction time included.
    pub start_time: DateTime<Utc>,
    /// Latest transaction time included.
    pub end_time: DateTime<Utc>,
    /// Unit to express amounts in.
    pub denomination: Denomination,
    /// Row order; `None` defers to the client default.
    pub order: Option<LedgerOrder>,
}

impl LedgerRequest {
    /// Creates a ledger request with the default order.
    #[must_use]
    pub fn new(
        entity_id: EntityId,
        account_id: AccountId,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        denomination: Denomination,
    ) -> Self {
        Self {
            entity_id,
            account_id,
            start_time,
            end_time,
            denomination,
            order: None,
        }
    }

    /// Chooses the row order.
    #[must_use]
    pub fn with_order(mut self, order: LedgerOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Renders the request for one page of the ledger at `path`.
    #[must_use]
    pub fn page_request(&self, path: &'static str, page: u32, order: LedgerOrder) -> ApiRequest {
        let mut args = arguments(&self.denomination);
        args.insert("account_id".to_string(), Value::from(self.account_id.into_inner()));
        args.insert("start_time".to_string(), time(&self.start_time));
        args.insert("end_time".to_string(), time(&self.end_time));
        args.insert("page".to_string(), Value::from(page));
        args.insert(
            "order_oldest_first".to_string(),
            Value::Bool(order.is_oldest_first()),
        );
        build(path, &self.entity_id, args)
    }
}
