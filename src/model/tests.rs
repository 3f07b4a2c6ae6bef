// Tests for database construction, the text format and the profit table

use super::*;
use crate::error::MiningError;

fn item(name: &str) -> Item {
    Item::from(name)
}

#[test]
fn test_from_records_builds_transactions_in_order() {
    let db = Database::from_records(vec![
        vec![("A", 2), ("B", 3), ("C", 1)],
        vec![("A", 1), ("B", 1)],
    ])
    .unwrap();

    assert_eq!(db.len(), 2);
    assert_eq!(db.transactions()[0].len(), 3);
    assert_eq!(db.transactions()[1].quantity(&item("B")), Some(1));
}

#[test]
fn test_from_records_reports_failing_transaction_index() {
    let err = Database::from_records(vec![
        vec![("A", 1)],
        vec![("B", 1)],
        vec![("C", -1)],
    ])
    .unwrap_err();

    assert!(matches!(
        err,
        MiningError::InvalidQuantity { transaction: 2, .. }
    ));
}

#[test]
fn test_empty_database() {
    let db = Database::from_records(Vec::<Vec<(&str, i64)>>::new()).unwrap();
    assert!(db.is_empty());
    assert!(db.items().is_empty());
    assert_eq!(db.avg_transaction_len(), 0.0);
}

#[test]
fn test_items_are_distinct_and_sorted() {
    let db = Database::from_records(vec![
        vec![("C", 1), ("A", 1)],
        vec![("B", 1), ("A", 4)],
    ])
    .unwrap();

    assert_eq!(db.items(), vec![item("A"), item("B"), item("C")]);
    assert_eq!(db.avg_transaction_len(), 2.0);
}

#[test]
fn test_from_text_parses_lines() {
    let text = "\
# reference fixture
A:2 B:3 C:1
A:1 B:1

B:2   C:3
A:1 C:2 D:1
";
    let db = Database::from_text(text).unwrap();

    assert_eq!(db.len(), 4);
    assert_eq!(db.transactions()[2].quantity(&item("C")), Some(3));
    assert_eq!(db.transactions()[3].len(), 3);
}

#[test]
fn test_from_text_item_names_may_contain_colons() {
    let db = Database::from_text("sku:1001:4").unwrap();
    assert_eq!(db.transactions()[0].quantity(&item("sku:1001")), Some(4));
}

#[test]
fn test_from_text_rejects_token_without_separator() {
    let err = Database::from_text("A:1\nB 2").unwrap_err();
    assert!(matches!(err, MiningError::Parse { line: 2, .. }));
}

#[test]
fn test_from_text_rejects_non_integer_quantity() {
    let err = Database::from_text("A:1.5").unwrap_err();
    assert!(matches!(err, MiningError::Parse { line: 1, .. }));
}

#[test]
fn test_from_text_rejects_empty_item_name() {
    let err = Database::from_text(":3").unwrap_err();
    assert!(matches!(err, MiningError::Parse { line: 1, .. }));
}

#[test]
fn test_from_text_validates_quantities_and_duplicates() {
    let err = Database::from_text("A:1\nA:0").unwrap_err();
    assert!(matches!(
        err,
        MiningError::InvalidQuantity { transaction: 1, .. }
    ));

    let err = Database::from_text("A:1 A:2").unwrap_err();
    assert!(matches!(
        err,
        MiningError::DuplicateItem { transaction: 0, .. }
    ));
}

#[test]
fn test_from_transaction_records_json() {
    let records: Vec<TransactionRecord> =
        serde_json::from_str(r#"[{"A": 2, "B": 3}, {"B": 1}]"#).unwrap();
    let db = Database::from_transaction_records(records).unwrap();

    assert_eq!(db.len(), 2);
    assert_eq!(db.transactions()[0].quantity(&item("A")), Some(2));
}

#[test]
fn test_profit_table_defaults_to_zero() {
    let profits = ProfitTable::from_pairs([("A", 4.0), ("B", 2.5)]).unwrap();

    assert_eq!(profits.profit(&item("A")), 4.0);
    assert_eq!(profits.profit(&item("B")), 2.5);
    assert_eq!(profits.profit(&item("Z")), 0.0);
    assert_eq!(profits.len(), 2);
}

#[test]
fn test_profit_table_rejects_negative_and_non_finite() {
    let err = ProfitTable::from_pairs([("A", -1.0)]).unwrap_err();
    assert!(matches!(err, MiningError::InvalidProfit { .. }));

    assert!(ProfitTable::from_pairs([("A", f64::NAN)]).is_err());
    assert!(ProfitTable::from_pairs([("A", f64::INFINITY)]).is_err());
}

#[test]
fn test_profit_table_zero_profit_allowed() {
    let profits = ProfitTable::from_pairs([("A", 0.0)]).unwrap();
    assert_eq!(profits.profit(&item("A")), 0.0);
}

#[test]
fn test_profit_table_deserialize_validates() {
    let profits: ProfitTable = serde_json::from_str(r#"{"A": 4, "B": 2}"#).unwrap();
    assert_eq!(profits.profit(&item("A")), 4.0);

    let result: Result<ProfitTable, _> = serde_json::from_str(r#"{"A": -4}"#);
    assert!(result.is_err());
}

#[test]
fn test_profit_table_rejects_duplicate_items() {
    let err = ProfitTable::from_pairs([("A", 4.0), ("B", 2.0), ("A", 4.0)]).unwrap_err();
    assert_eq!(err, MiningError::DuplicateProfit { item: item("A") });
}

#[test]
fn test_profit_record_keeps_repeated_keys() {
    let record: ProfitRecord = serde_json::from_str(r#"{"A": 4, "A": 5}"#).unwrap();
    assert_eq!(record.0.len(), 2);

    let err = ProfitTable::try_from(record).unwrap_err();
    assert!(matches!(err, MiningError::DuplicateProfit { .. }));

    let result: Result<ProfitTable, _> = serde_json::from_str(r#"{"A": 4, "A": 5}"#);
    assert!(result.is_err());
}

#[test]
fn test_insert_replaces_existing_profit() {
    let mut profits = ProfitTable::from_pairs([("A", 4.0)]).unwrap();
    profits.insert("A", 6.0).unwrap();
    assert_eq!(profits.profit(&item("A")), 6.0);
}
