//! Account node shapes.

use rust_decimal::Decimal;
use serde::Serialize;
use tally_shared::types::{AccountId, Magnitude};

use super::types::AccountType;
use super::walk::PreOrder;

/// A node in a decoded account tree.
///
/// Nodes own their children outright; there are no parent links and no
/// sharing between trees. For every direct child `c` of node `n`,
/// `c.depth() == n.depth() + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum AccountNode {
    /// A node with resolved balances.
    Detail(DetailNode),
    /// A node beyond the requested depth, without balances.
    Placeholder(PlaceholderNode),
}

/// An account with its own and rolled-up balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailNode {
    /// Account ID.
    pub account_id: AccountId,
    /// Account name.
    pub name: String,
    /// Account class.
    pub account_type: AccountType,
    /// Distance from the forest root.
    pub depth: u32,
    /// Balance of postings made directly to this account.
    pub own_balance: Magnitude,
    /// Balance including every descendant account.
    pub rollup_balance: Magnitude,
    /// Direct children.
    pub children: Vec<AccountNode>,
}

/// An account the service did not resolve because of the depth limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderNode {
    /// Account ID.
    pub account_id: AccountId,
    /// Account name.
    pub name: String,
    /// Account class.
    pub account_type: AccountType,
    /// Distance from the forest root.
    pub depth: u32,
    /// Direct children.
    pub children: Vec<AccountNode>,
}

impl AccountNode {
    /// Returns the account ID.
    #[must_use]
    pub fn account_id(&self) -> AccountId {
        match self {
            Self::Detail(node) => node.account_id,
            Self::Placeholder(node) => node.account_id,
        }
    }

    /// Returns the account name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Detail(node) => &node.name,
            Self::Placeholder(node) => &node.name,
        }
    }

    /// Returns the account class.
    #[must_use]
    pub fn account_type(&self) -> AccountType {
        match self {
            Self::Detail(node) => node.account_type,
            Self::Placeholder(node) => node.account_type,
        }
    }

    /// Returns the depth of this node.
    #[must_use]
    pub fn depth(&self) -> u32 {
        match self {
            Self::Detail(node) => node.depth,
            Self::Placeholder(node) => node.depth,
        }
    }

    /// Returns the direct children.
    #[must_use]
    pub fn children(&self) -> &[AccountNode] {
        match self {
            Self::Detail(node) => &node.children,
            Self::Placeholder(node) => &node.children,
        }
    }

    /// Returns true if the service pruned this node.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    /// Returns the detail shape, if resolved.
    #[must_use]
    pub fn as_detail(&self) -> Option<&DetailNode> {
        match self {
            Self::Detail(node) => Some(node),
            Self::Placeholder(_) => None,
        }
    }

    /// Own balance, `None` for placeholders.
    #[must_use]
    pub fn own_balance(&self) -> Option<Decimal> {
        self.as_detail().map(|node| node.own_balance.value)
    }

    /// Rolled-up balance, `None` for placeholders.
    #[must_use]
    pub fn rollup_balance(&self) -> Option<Decimal> {
        self.as_detail().map(|node| node.rollup_balance.value)
    }

    /// Walks this node and its descendants, parent before children.
    #[must_use]
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder::new(std::slice::from_ref(self))
    }

    /// Finds an account in the subtree rooted at this node.
    #[must_use]
    pub fn find(&self, account_id: AccountId) -> Option<&AccountNode> {
        self.iter().find(|node| node.account_id() == account_id)
    }
}

impl<'a> IntoIterator for &'a AccountNode {
    type Item = &'a AccountNode;
    type IntoIter = PreOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
