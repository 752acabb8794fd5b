//! Report assemblers.
//!
//! Forest roots are expected at depth 0; the hierarchy decoder checks the
//! rest of each tree from there.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tally_shared::TallyResult;
use tally_shared::types::time::wire;
use tally_shared::types::{Denomination, EntityId};
use tracing::debug;

use super::types::{PerformanceReport, PositionReport, ReportMeta, ReportWindow, TreeReport};
use crate::decode::decode_via;
use crate::hierarchy::AccountNode;
use crate::hierarchy::decode::{RawNode, assemble_all};

/// Depth of every forest root.
pub const ROOT_DEPTH: u32 = 0;

/// Scalar fields shared by every report payload.
#[derive(Debug, Deserialize)]
struct RawMeta {
    entity_id: EntityId,
    #[serde(with = "wire")]
    generated_time: DateTime<Utc>,
    #[serde(default)]
    global_unit_denomination: Option<i64>,
    #[serde(default)]
    custom_unit_denomination: Option<i64>,
    #[serde(default)]
    depth: Option<u32>,
}

impl RawMeta {
    fn into_meta(self, window: ReportWindow) -> TallyResult<ReportMeta> {
        Ok(ReportMeta {
            entity_id: self.entity_id,
            generated_time: self.generated_time,
            window,
            denomination: Denomination::from_wire(
                self.global_unit_denomination,
                self.custom_unit_denomination,
            )?,
            requested_depth: self.depth,
        })
    }
}

fn forest(raw: Vec<RawNode>) -> TallyResult<Vec<AccountNode>> {
    assemble_all(raw, Some(ROOT_DEPTH))
}

#[derive(Debug, Deserialize)]
struct RawTree {
    #[serde(flatten)]
    meta: RawMeta,
    #[serde(with = "wire")]
    balance_time: DateTime<Utc>,
    tree: Vec<RawNode>,
}

#[derive(Debug, Deserialize)]
struct RawPosition {
    #[serde(flatten)]
    meta: RawMeta,
    #[serde(with = "wire")]
    balance_time: DateTime<Utc>,
    assets: Vec<RawNode>,
    liabilities: Vec<RawNode>,
    equities: Vec<RawNode>,
}

#[derive(Debug, Deserialize)]
struct RawPerformance {
    #[serde(flatten)]
    meta: RawMeta,
    #[serde(with = "wire")]
    start_time: DateTime<Utc>,
    #[serde(with = "wire")]
    end_time: DateTime<Utc>,
    income: Vec<RawNode>,
    expenses: Vec<RawNode>,
}

impl TreeReport {
    fn assemble(raw: RawTree) -> TallyResult<Self> {
        let meta = raw.meta.into_meta(ReportWindow::Instant {
            at: raw.balance_time,
        })?;
        let report = Self {
            tree: forest(raw.tree)?,
            meta,
        };
        debug!(entity_id = %report.meta.entity_id, roots = report.tree.len(), "Decoded tree");
        Ok(report)
    }
}

impl PositionReport {
    fn assemble(raw: RawPosition) -> TallyResult<Self> {
        let meta = raw.meta.into_meta(ReportWindow::Instant {
            at: raw.balance_time,
        })?;
        let report = Self {
            assets: forest(raw.assets)?,
            liabilities: forest(raw.liabilities)?,
            equities: forest(raw.equities)?,
            meta,
        };
        debug!(entity_id = %report.meta.entity_id, "Decoded position");
        Ok(report)
    }
}

impl PerformanceReport {
    fn assemble(raw: RawPerformance) -> TallyResult<Self> {
        let meta = raw.meta.into_meta(ReportWindow::Period {
            start: raw.start_time,
            end: raw.end_time,
        })?;
        let report = Self {
            income: forest(raw.income)?,
            expenses: forest(raw.expenses)?,
            meta,
        };
        debug!(entity_id = %report.meta.entity_id, "Decoded performance");
        Ok(report)
    }
}

decode_via!(TreeReport, RawTree);
decode_via!(PositionReport, RawPosition);
decode_via!(PerformanceReport, RawPerformance);
