//! Property-based tests for account hierarchies.

use std::collections::HashSet;

use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tally_shared::types::AccountId;

use super::decode::{decode_children, decode_node};
use super::node::AccountNode;
use super::walk::flatten_forests;

/// Shape of a generated tree: `Some(cents)` resolved, `None` pruned.
#[derive(Debug, Clone)]
struct Shape {
    balance: Option<i64>,
    children: Vec<Shape>,
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop::option::of(-1_000_000i64..1_000_000).prop_map(|balance| Shape {
        balance,
        children: vec![],
    });
    leaf.prop_recursive(5, 48, 4, |inner| {
        (
            prop::option::of(-1_000_000i64..1_000_000),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(balance, children)| Shape { balance, children })
    })
}

/// Renders a cent amount the way the service does: parentheses when negative.
fn render(cents: i64) -> String {
    let value = Decimal::new(cents.abs(), 2);
    if cents < 0 {
        format!("({value})")
    } else {
        value.to_string()
    }
}

/// Converts a shape to wire JSON, numbering accounts in pre-order.
fn to_json(shape: &Shape, depth: u32, next_id: &mut i64) -> Value {
    let id = *next_id;
    *next_id += 1;
    let balance = shape.balance.map_or(Value::Null, |cents| json!(render(cents)));
    let children: Vec<Value> = shape
        .children
        .iter()
        .map(|child| to_json(child, depth + 1, next_id))
        .collect();
    json!({
        "account_id": id,
        "name": format!("Account {id}"),
        "type": 5,
        "depth": depth,
        "account_balance": balance,
        "recursive_balance": balance,
        "children": children,
    })
}

fn count(shape: &Shape) -> usize {
    1 + shape.children.iter().map(count).sum::<usize>()
}

fn assert_depths(node: &AccountNode) -> Result<(), TestCaseError> {
    for child in node.children() {
        prop_assert_eq!(child.depth(), node.depth() + 1);
        assert_depths(child)?;
    }
    Ok(())
}

fn assert_matches_shape(node: &AccountNode, shape: &Shape) -> Result<(), TestCaseError> {
    match shape.balance {
        Some(cents) => {
            prop_assert_eq!(node.own_balance(), Some(Decimal::new(cents, 2)));
        }
        None => {
            prop_assert!(node.is_placeholder());
        }
    }
    prop_assert_eq!(node.children().len(), shape.children.len());
    for (child, child_shape) in node.children().iter().zip(&shape.children) {
        assert_matches_shape(child, child_shape)?;
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every child sits exactly one level below its parent.
    #[test]
    fn prop_child_depth_is_parent_plus_one(tree in shape()) {
        let node = decode_node(&to_json(&tree, 0, &mut 1)).unwrap();
        assert_depths(&node)?;
    }

    /// Null balances become placeholders, strings become details with that value.
    #[test]
    fn prop_discriminator_follows_balance(tree in shape()) {
        let node = decode_node(&to_json(&tree, 0, &mut 1)).unwrap();
        assert_matches_shape(&node, &tree)?;
    }

    /// Flattening visits every node once, parents before their children.
    #[test]
    fn prop_flatten_is_complete_pre_order(forest in prop::collection::vec(shape(), 0..4)) {
        let mut next_id = 1;
        let wire: Vec<Value> = forest.iter().map(|tree| to_json(tree, 0, &mut next_id)).collect();
        let nodes = decode_children(&Value::Array(wire)).unwrap();

        let visited: Vec<i64> = flatten_forests([nodes.as_slice()])
            .map(|node| node.account_id().into_inner())
            .collect();

        let expected: usize = forest.iter().map(count).sum();
        prop_assert_eq!(visited.len(), expected);

        // IDs were assigned in pre-order, so a pre-order walk yields 1..=n.
        let in_order: Vec<i64> = (1..=i64::try_from(expected).unwrap()).collect();
        prop_assert_eq!(&visited, &in_order);

        let unique: HashSet<i64> = visited.iter().copied().collect();
        prop_assert_eq!(unique.len(), visited.len());
    }

    /// Walking twice yields the same sequence.
    #[test]
    fn prop_flatten_is_restartable(tree in shape()) {
        let node = decode_node(&to_json(&tree, 0, &mut 1)).unwrap();
        let first: Vec<_> = node.iter().map(AccountNode::account_id).collect();
        let second: Vec<_> = node.iter().map(AccountNode::account_id).collect();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_find_locates_descendant() {
    let tree = Shape {
        balance: Some(100),
        children: vec![Shape {
            balance: None,
            children: vec![Shape {
                balance: None,
                children: vec![],
            }],
        }],
    };
    let node = decode_node(&to_json(&tree, 0, &mut 1)).unwrap();
    let found = node.find(AccountId::new(3)).unwrap();
    assert_eq!(found.depth(), 2);
    assert!(node.find(AccountId::new(4)).is_none());
}

#[test]
fn test_flatten_multiple_forests_in_order() {
    let a = decode_children(&json!([to_json(
        &Shape { balance: Some(1), children: vec![] },
        0,
        &mut 10
    )]))
    .unwrap();
    let b = decode_children(&json!([to_json(
        &Shape { balance: Some(1), children: vec![] },
        0,
        &mut 20
    )]))
    .unwrap();
    let ids: Vec<i64> = flatten_forests([a.as_slice(), b.as_slice()])
        .map(|node| node.account_id().into_inner())
        .collect();
    assert_eq!(ids, vec![10, 20]);
}
