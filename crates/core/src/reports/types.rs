//! Report data types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tally_shared::types::{AccountId, Denomination, EntityId};

use crate::hierarchy::{AccountNode, PreOrder};

/// Metadata common to every report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportMeta {
    /// Entity the report describes.
    pub entity_id: EntityId,
    /// When the service computed the report.
    pub generated_time: DateTime<Utc>,
    /// Instant or period the balances cover.
    pub window: ReportWindow,
    /// Unit the balances are expressed in.
    pub denomination: Denomination,
    /// Depth the caller asked for, if the service echoed one.
    pub requested_depth: Option<u32>,
}

/// The time coverage of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ReportWindow {
    /// Balances as at a single instant.
    Instant {
        /// The balance time.
        at: DateTime<Utc>,
    },
    /// Activity between two instants.
    Period {
        /// Period start.
        start: DateTime<Utc>,
        /// Period end.
        end: DateTime<Utc>,
    },
}

/// Names of the forests a report can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForestName {
    /// The single forest of a tree report.
    Tree,
    /// Asset accounts.
    Assets,
    /// Liability accounts.
    Liabilities,
    /// Equity accounts.
    Equities,
    /// Income accounts.
    Income,
    /// Expense accounts.
    Expenses,
}

impl ForestName {
    /// Returns the payload key holding this forest.
    #[must_use]
    pub const fn wire_key(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Assets => "assets",
            Self::Liabilities => "liabilities",
            Self::Equities => "equities",
            Self::Income => "income",
            Self::Expenses => "expenses",
        }
    }
}

impl std::fmt::Display for ForestName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_key())
    }
}

/// Behaviour shared by the three report forms.
pub trait Report {
    /// Report metadata.
    fn meta(&self) -> &ReportMeta;

    /// Forests in declaration order.
    fn forests(&self) -> Vec<(ForestName, &[AccountNode])>;

    /// Returns one forest by name.
    fn forest(&self, name: ForestName) -> Option<&[AccountNode]> {
        self.forests()
            .into_iter()
            .find_map(|(candidate, nodes)| (candidate == name).then_some(nodes))
    }

    /// Every node of every forest, pre-order, forests in declaration order.
    fn flatten(&self) -> PreOrder<'_> {
        PreOrder::over_forests(self.forests().into_iter().map(|(_, nodes)| nodes))
    }

    /// Finds an account anywhere in the report.
    fn find_account(&self, account_id: AccountId) -> Option<&AccountNode> {
        self.flatten().find(|node| node.account_id() == account_id)
    }
}

/// The account hierarchy of an entity at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeReport {
    /// Report metadata.
    pub meta: ReportMeta,
    /// All root accounts.
    pub tree: Vec<AccountNode>,
}

/// Balance sheet: assets, liabilities and equity at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionReport {
    /// Report metadata.
    pub meta: ReportMeta,
    /// Asset roots.
    pub assets: Vec<AccountNode>,
    /// Liability roots.
    pub liabilities: Vec<AccountNode>,
    /// Equity roots.
    pub equities: Vec<AccountNode>,
}

/// Income statement: income and expenses over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformanceReport {
    /// Report metadata.
    pub meta: ReportMeta,
    /// Income roots.
    pub income: Vec<AccountNode>,
    /// Expense roots.
    pub expenses: Vec<AccountNode>,
}

impl Report for TreeReport {
    fn meta(&self) -> &ReportMeta {
        &self.meta
    }

    fn forests(&self) -> Vec<(ForestName, &[AccountNode])> {
        vec![(ForestName::Tree, self.tree.as_slice())]
    }
}

impl Report for PositionReport {
    fn meta(&self) -> &ReportMeta {
        &self.meta
    }

    fn forests(&self) -> Vec<(ForestName, &[AccountNode])> {
        vec![
            (ForestName::Assets, self.assets.as_slice()),
            (ForestName::Liabilities, self.liabilities.as_slice()),
            (ForestName::Equities, self.equities.as_slice()),
        ]
    }
}

impl Report for PerformanceReport {
    fn meta(&self) -> &ReportMeta {
        &self.meta
    }

    fn forests(&self) -> Vec<(ForestName, &[AccountNode])> {
        vec![
            (ForestName::Income, self.income.as_slice()),
            (ForestName::Expenses, self.expenses.as_slice()),
        ]
    }
}
