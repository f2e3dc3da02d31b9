//! Left-join behavior through the public API, including the
//! postal-code pairing scenario and the collision namespacing policy.

use tablekit::{left_join, DataRow, DataTable, FieldValue};

fn people() -> DataTable {
    let mut table = DataTable::new("PEOPLE");
    table.add_row(DataRow::from_pairs([
        ("NAME", FieldValue::from("Heinz")),
        ("PLZ", FieldValue::from("66132")),
    ]));
    table.add_row(DataRow::from_pairs([
        ("NAME", FieldValue::from("Karla")),
        ("PLZ", FieldValue::from("99999")),
    ]));
    table
}

fn places() -> DataTable {
    let mut table = DataTable::new("PLACES");
    table.add_row(DataRow::from_pairs([
        ("PLZ", FieldValue::from("66132")),
        ("Ort", FieldValue::from("Saarbruecken")),
    ]));
    table.add_row(DataRow::from_pairs([
        ("PLZ", FieldValue::from("10115")),
        ("Ort", FieldValue::from("Berlin")),
    ]));
    table
}

#[test]
fn matched_row_carries_right_columns() {
    let joined = left_join(&people(), &places(), &["PLZ"]);
    let heinz = joined.row(0).unwrap();
    assert_eq!(heinz.field("NAME").unwrap().as_str(), "Heinz");
    assert_eq!(heinz.field("PLZ").unwrap().as_str(), "66132");
    assert_eq!(heinz.field("Ort").unwrap().as_str(), "Saarbruecken");
}

#[test]
fn unmatched_left_row_appears_once_without_right_columns() {
    let joined = left_join(&people(), &places(), &["PLZ"]);
    assert_eq!(joined.row_count(), 2);
    let karla = joined.row(1).unwrap();
    assert_eq!(karla.field("NAME").unwrap().as_str(), "Karla");
    assert!(!karla.contains_field("Ort"));
}

#[test]
fn multiple_right_matches_cross_multiply_in_order() {
    let mut left = DataTable::new("ORDERS");
    left.add_row(DataRow::from_pairs([
        ("ORDERID", FieldValue::Int(100)),
        ("PLZ", FieldValue::from("66132")),
    ]));
    left.add_row(DataRow::from_pairs([
        ("ORDERID", FieldValue::Int(101)),
        ("PLZ", FieldValue::from("10115")),
    ]));

    let mut right = DataTable::new("COURIERS");
    right.add_row(DataRow::from_pairs([
        ("PLZ", FieldValue::from("66132")),
        ("COURIER", FieldValue::from("alpha")),
    ]));
    right.add_row(DataRow::from_pairs([
        ("PLZ", FieldValue::from("10115")),
        ("COURIER", FieldValue::from("beta")),
    ]));
    right.add_row(DataRow::from_pairs([
        ("PLZ", FieldValue::from("66132")),
        ("COURIER", FieldValue::from("gamma")),
    ]));

    let joined = left_join(&left, &right, &["PLZ"]);
    assert_eq!(joined.row_count(), 3);
    // Left order outer, right match order inner
    let couriers: Vec<String> = (0..joined.row_count())
        .map(|i| joined.row(i).unwrap().field("COURIER").unwrap().as_str())
        .collect();
    assert_eq!(couriers, ["alpha", "gamma", "beta"]);
    assert_eq!(joined.row(0).unwrap().field("ORDERID").unwrap().as_int(), Ok(100));
    assert_eq!(joined.row(2).unwrap().field("ORDERID").unwrap().as_int(), Ok(101));
}

#[test]
fn join_on_multiple_key_columns() {
    let mut left = DataTable::new("L");
    left.add_row(DataRow::from_pairs([
        ("A", FieldValue::from("x")),
        ("B", FieldValue::from("1")),
        ("NAME", FieldValue::from("both-match")),
    ]));
    left.add_row(DataRow::from_pairs([
        ("A", FieldValue::from("x")),
        ("B", FieldValue::from("2")),
        ("NAME", FieldValue::from("half-match")),
    ]));

    let mut right = DataTable::new("R");
    right.add_row(DataRow::from_pairs([
        ("A", FieldValue::from("x")),
        ("B", FieldValue::from("1")),
        ("TAG", FieldValue::from("hit")),
    ]));

    let joined = left_join(&left, &right, &["A", "B"]);
    assert_eq!(joined.row_count(), 2);
    assert_eq!(joined.row(0).unwrap().field("TAG").unwrap().as_str(), "hit");
    assert!(!joined.row(1).unwrap().contains_field("TAG"));
}

#[test]
fn colliding_non_key_column_is_namespaced_by_right_table_name() {
    let mut left = DataTable::new("EMPLOYEES");
    left.add_row(DataRow::from_pairs([
        ("ID", FieldValue::Int(1)),
        ("NAME", FieldValue::from("Heinz")),
    ]));
    let mut right = DataTable::new("DEPARTMENTS");
    right.add_row(DataRow::from_pairs([
        ("ID", FieldValue::Int(1)),
        ("NAME", FieldValue::from("Sales")),
    ]));

    let joined = left_join(&left, &right, &["ID"]);
    let row = joined.row(0).unwrap();
    assert_eq!(row.field("NAME").unwrap().as_str(), "Heinz");
    assert_eq!(row.field("DEPARTMENTS.NAME").unwrap().as_str(), "Sales");
    assert_eq!(joined.column_names(), ["ID", "NAME", "DEPARTMENTS.NAME"]);
}

#[test]
fn keys_compare_by_value_across_payload_kinds() {
    let mut left = DataTable::new("L");
    left.add_row(DataRow::from_pairs([("PLZ", FieldValue::Int(66132))]));
    let joined = left_join(&left, &places(), &["PLZ"]);
    assert_eq!(joined.row_count(), 1);
    assert_eq!(
        joined.row(0).unwrap().field("Ort").unwrap().as_str(),
        "Saarbruecken"
    );
}
