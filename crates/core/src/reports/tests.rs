//! Report assembly tests.

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tally_shared::TallyError;
use tally_shared::types::{AccountId, CustomUnitId, Denomination, EntityId, GlobalUnitId};

use super::types::{
    ForestName, PerformanceReport, PositionReport, Report, ReportWindow, TreeReport,
};
use crate::decode::Decode;

fn node(id: i64, account_type: i64, depth: u32, balance: Value, children: Value) -> Value {
    json!({
        "account_id": id,
        "name": format!("Account {id}"),
        "type": account_type,
        "depth": depth,
        "account_balance": balance,
        "recursive_balance": balance,
        "children": children,
    })
}

fn tree_payload() -> Value {
    json!({
        "entity_id": "C3pWq",
        "balance_time": "2019-06-30_00:00:00.000000",
        "generated_time": "2019-07-01_09:15:02.417000",
        "global_unit_denomination": 5,
        "custom_unit_denomination": null,
        "depth": 2,
        "tree": [
            node(1, 1, 0, json!("1500.00"), json!([
                node(2, 1, 1, json!("1000.00"), json!([
                    node(3, 1, 2, Value::Null, json!([]))
                ])),
                node(4, 1, 1, json!("500.00"), json!([]))
            ])),
            node(5, 2, 0, json!("(250.00)"), json!([]))
        ]
    })
}

fn position_payload() -> Value {
    json!({
        "entity_id": "C3pWq",
        "balance_time": "2019-06-30_00:00:00.000000",
        "generated_time": "2019-07-01_09:15:02.417000",
        "global_unit_denomination": null,
        "custom_unit_denomination": 12,
        "assets": [node(1, 1, 0, json!("100.00"), json!([]))],
        "liabilities": [node(2, 2, 0, json!("(40.00)"), json!([]))],
        "equities": [node(3, 8, 0, json!("60.00"), json!([]))]
    })
}

fn performance_payload() -> Value {
    json!({
        "entity_id": "C3pWq",
        "start_time": "2019-01-01_00:00:00.000000",
        "end_time": "2019-06-30_23:59:59.000000",
        "generated_time": "2019-07-01_09:15:02.417000",
        "global_unit_denomination": 5,
        "custom_unit_denomination": null,
        "depth": 1,
        "income": [node(10, 4, 0, json!("900.00"), json!([
            node(11, 4, 1, json!("900.00"), json!([]))
        ]))],
        "expenses": [node(20, 5, 0, json!("300.00"), json!([]))]
    })
}

#[test]
fn test_tree_report_metadata() {
    let report = TreeReport::from_value(&tree_payload()).unwrap();
    let meta = report.meta();

    assert_eq!(meta.entity_id, EntityId::from("C3pWq"));
    assert_eq!(meta.denomination, Denomination::global(GlobalUnitId(5)));
    assert_eq!(meta.requested_depth, Some(2));
    assert_eq!(
        meta.window,
        ReportWindow::Instant {
            at: Utc.with_ymd_and_hms(2019, 6, 30, 0, 0, 0).unwrap()
        }
    );
    assert_eq!(report.tree.len(), 2);
    assert_eq!(report.tree[1].own_balance(), Some(dec!(-250.00)));
}

#[test]
fn test_tree_report_from_slice_matches_from_value() {
    let payload = tree_payload();
    let bytes = serde_json::to_vec(&payload).unwrap();
    assert_eq!(
        TreeReport::from_slice(&bytes).unwrap(),
        TreeReport::from_value(&payload).unwrap()
    );
}

#[test]
fn test_tree_flatten_is_pre_order() {
    let report = TreeReport::from_value(&tree_payload()).unwrap();
    let ids: Vec<i64> = report
        .flatten()
        .map(|node| node.account_id().into_inner())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_placeholder_marks_truncation() {
    let report = TreeReport::from_value(&tree_payload()).unwrap();
    let pruned = report.find_account(AccountId::new(3)).unwrap();
    assert!(pruned.is_placeholder());
    assert_eq!(pruned.depth(), 2);
}

#[test]
fn test_position_report_forests() {
    let report = PositionReport::from_value(&position_payload()).unwrap();

    assert_eq!(
        report.meta.denomination,
        Denomination::custom(CustomUnitId(12))
    );
    assert_eq!(report.meta.requested_depth, None);

    let names: Vec<ForestName> = report.forests().into_iter().map(|(name, _)| name).collect();
    assert_eq!(
        names,
        vec![ForestName::Assets, ForestName::Liabilities, ForestName::Equities]
    );

    let liabilities = report.forest(ForestName::Liabilities).unwrap();
    assert_eq!(liabilities[0].own_balance(), Some(dec!(-40.00)));
    assert!(report.forest(ForestName::Income).is_none());

    let ids: Vec<i64> = report
        .flatten()
        .map(|node| node.account_id().into_inner())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_performance_report_window() {
    let report = PerformanceReport::from_value(&performance_payload()).unwrap();
    assert_eq!(
        report.meta.window,
        ReportWindow::Period {
            start: Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2019, 6, 30, 23, 59, 59).unwrap(),
        }
    );
    assert_eq!(report.flatten().count(), 3);
    assert_eq!(
        report.find_account(AccountId::new(11)).unwrap().name(),
        "Account 11"
    );
}

#[test]
fn test_missing_forest_is_malformed() {
    let mut payload = position_payload();
    payload.as_object_mut().unwrap().remove("equities");
    assert!(matches!(
        PositionReport::from_value(&payload),
        Err(TallyError::MalformedResponse(_))
    ));
}

#[test]
fn test_both_denominations_is_malformed() {
    let mut payload = tree_payload();
    payload["custom_unit_denomination"] = json!(3);
    assert!(matches!(
        TreeReport::from_value(&payload),
        Err(TallyError::MalformedResponse(_))
    ));
}

#[test]
fn test_no_denomination_is_malformed() {
    let mut payload = tree_payload();
    payload["global_unit_denomination"] = Value::Null;
    assert!(matches!(
        TreeReport::from_value(&payload),
        Err(TallyError::MalformedResponse(_))
    ));
}

#[test]
fn test_root_depth_must_be_zero() {
    let mut payload = performance_payload();
    payload["expenses"] = json!([node(20, 5, 1, json!("1.00"), json!([]))]);
    assert!(matches!(
        PerformanceReport::from_value(&payload),
        Err(TallyError::MalformedResponse(_))
    ));
}

#[test]
fn test_bad_balance_deep_in_forest_fails_report() {
    let mut payload = tree_payload();
    payload["tree"][0]["children"][1]["account_balance"] = json!("five");
    assert_eq!(
        TreeReport::from_value(&payload).unwrap_err(),
        TallyError::magnitude("five")
    );
}

#[test]
fn test_bad_timestamp_is_malformed() {
    let mut payload = tree_payload();
    payload["balance_time"] = json!("not a time");
    assert!(matches!(
        TreeReport::from_value(&payload),
        Err(TallyError::MalformedResponse(_))
    ));
}

#[test]
fn test_invalid_json_is_malformed() {
    assert!(matches!(
        TreeReport::from_slice(b"{\"entity_id\":"),
        Err(TallyError::MalformedResponse(_))
    ));
}

#[test]
fn test_report_serializes_for_callers() {
    let report = PositionReport::from_value(&position_payload()).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["assets"][0]["shape"], "detail");
    assert_eq!(value["liabilities"][0]["own_balance"]["presentation"], "(40.00)");
    assert_eq!(value["meta"]["window"]["kind"], "instant");
}

fn chain_payload(levels: u32) -> Value {
    let mut nested = json!([]);
    for depth in (0..levels).rev() {
        nested = json!([node(i64::from(depth) + 1, 1, depth, json!("1.00"), nested)]);
    }
    let mut payload = tree_payload();
    payload["tree"] = nested;
    payload
}

#[test]
fn test_deep_tree_decodes_from_bytes_and_value() {
    let levels = 300;
    let payload = chain_payload(levels);
    let bytes = serde_json::to_vec(&payload).unwrap();

    let from_slice = TreeReport::from_slice(&bytes).unwrap();
    let from_value = TreeReport::from_value(&payload).unwrap();

    assert_eq!(from_slice, from_value);
    assert_eq!(from_slice.flatten().count(), 300);
    let deepest = from_slice.find_account(AccountId::new(300)).unwrap();
    assert_eq!(deepest.depth(), levels - 1);
}

#[test]
fn test_trailing_bytes_are_malformed() {
    let mut bytes = serde_json::to_vec(&tree_payload()).unwrap();
    bytes.extend_from_slice(b" {}");
    assert!(matches!(
        TreeReport::from_slice(&bytes),
        Err(TallyError::MalformedResponse(_))
    ));
}
