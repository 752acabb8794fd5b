//! The detail/placeholder discriminator.
//!
//! Decoding is two-step. Serde first reads each element into a `RawNode`
//! that records whether `account_balance` was absent, null or a string. The
//! assembler then inspects that discriminator and dispatches to the matching
//! variant, recursing into `children` with the same rule.
//!
//! | `account_balance`   | Result              |
//! |---------------------|---------------------|
//! | `"123.45"`          | `AccountNode::Detail` |
//! | `null`              | `AccountNode::Placeholder` |
//! | key absent          | `MalformedResponse` |

use serde::Deserialize;
use serde_json::Value;
use tally_shared::types::{AccountId, Magnitude};
use tally_shared::{TallyError, TallyResult};

use crate::decode::raw_from_value;

use super::node::{AccountNode, DetailNode, PlaceholderNode};
use super::types::AccountType;

/// A node exactly as it appears on the wire.
#[derive(Debug, Deserialize)]
pub(crate) struct RawNode {
    account_id: AccountId,
    name: String,
    #[serde(rename = "type")]
    account_type: AccountType,
    depth: u32,
    #[serde(default, with = "::serde_with::rust::double_option")]
    account_balance: Option<Option<String>>,
    #[serde(default)]
    recursive_balance: Option<String>,
    #[serde(default)]
    children: Option<Vec<RawNode>>,
}

impl RawNode {
    /// Assembles a typed node, enforcing the depth of its children.
    ///
    /// `expected_depth` is checked against this node when given.
    pub(crate) fn assemble(self, expected_depth: Option<u32>) -> TallyResult<AccountNode> {
        if let Some(expected) = expected_depth {
            if self.depth != expected {
                return Err(TallyError::malformed(format!(
                    "account {} has depth {}, expected {expected}",
                    self.account_id, self.depth
                )));
            }
        }

        let child_depth = self.depth.checked_add(1).ok_or_else(|| {
            TallyError::malformed(format!("account {} depth overflows", self.account_id))
        })?;
        let children = assemble_all(self.children.unwrap_or_default(), Some(child_depth))?;

        match self.account_balance {
            None => Err(TallyError::malformed(format!(
                "account {} has no `account_balance` key",
                self.account_id
            ))),
            Some(None) => Ok(AccountNode::Placeholder(PlaceholderNode {
                account_id: self.account_id,
                name: self.name,
                account_type: self.account_type,
                depth: self.depth,
                children,
            })),
            Some(Some(own)) => {
                let rollup = self.recursive_balance.ok_or_else(|| {
                    TallyError::malformed(format!(
                        "account {} has a balance but no `recursive_balance`",
                        self.account_id
                    ))
                })?;
                Ok(AccountNode::Detail(DetailNode {
                    account_id: self.account_id,
                    name: self.name,
                    account_type: self.account_type,
                    depth: self.depth,
                    own_balance: Magnitude::parse(own)?,
                    rollup_balance: Magnitude::parse(rollup)?,
                    children,
                }))
            }
        }
    }
}

/// Assembles a list of sibling nodes, failing on the first bad element.
pub(crate) fn assemble_all(
    raw: Vec<RawNode>,
    expected_depth: Option<u32>,
) -> TallyResult<Vec<AccountNode>> {
    raw.into_iter()
        .map(|node| node.assemble(expected_depth))
        .collect()
}

/// Decodes a single node and its descendants.
///
/// # Errors
///
/// `MalformedResponse` for structural problems, `MalformedMagnitude` for
/// unparseable balances. No partial tree is ever returned.
pub fn decode_node(value: &Value) -> TallyResult<AccountNode> {
    raw_from_value::<RawNode>(value)?.assemble(None)
}

/// Decodes an array of sibling nodes.
///
/// `null` is treated as an empty array. Siblings must share one depth.
///
/// # Errors
///
/// As for [`decode_node`]; also `MalformedResponse` if `value` is not an array.
pub fn decode_children(value: &Value) -> TallyResult<Vec<AccountNode>> {
    let raw = raw_from_value::<Option<Vec<RawNode>>>(value)?.unwrap_or_default();
    let depth = raw.first().map(|node| node.depth);
    assemble_all(raw, depth)
}
