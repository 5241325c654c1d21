use mysql_session::prelude::*;

fn sample_result() -> ResultSet {
    let mut rs = ResultSet::new(vec!["id".to_string(), "name".to_string()]);
    rs.add_row_values(vec!["1".into(), "alice".into()]);
    rs.add_row_values(vec!["2".into(), "bob".into()]);
    rs.add_row_values(vec!["3".into(), SqlValue::Null]);
    rs
}

#[test]
fn fetch_all_on_missing_result_is_empty() {
    let rows = DbSession::fetch_all(None, None::<fn(Row) -> Row>);
    assert!(rows.is_empty());
}

#[test]
fn fetch_all_preserves_server_order() {
    let rows = DbSession::fetch_all(Some(sample_result()), None::<fn(Row) -> Row>);
    assert_eq!(rows.len(), 3);
    let ids: Vec<_> = rows
        .iter()
        .map(|row| row.get("id").and_then(SqlValue::as_text).unwrap().to_string())
        .collect();
    assert_eq!(ids, ["1", "2", "3"]);
}

#[test]
fn transform_applies_to_every_row_in_order() {
    let mut seen = Vec::new();
    let rows = DbSession::fetch_all(
        Some(sample_result()),
        Some(|mut row: Row| {
            seen.push(row.get("id").unwrap().to_string());
            let upper = row
                .get("name")
                .and_then(SqlValue::as_text)
                .map(str::to_uppercase);
            row.set("name", SqlValue::from(upper));
            row
        }),
    );

    assert_eq!(seen, ["1", "2", "3"]);
    assert_eq!(rows[0].get("name").and_then(SqlValue::as_text), Some("ALICE"));
    assert_eq!(rows[1].get("name").and_then(SqlValue::as_text), Some("BOB"));
    // NULL name stays NULL through the transform
    assert!(rows[2].get("name").is_some_and(SqlValue::is_null));
}

#[test]
fn transform_return_value_replaces_the_raw_row() {
    let rows = DbSession::fetch_all(
        Some(sample_result()),
        Some(|mut row: Row| {
            row.set("id", SqlValue::from("replaced"));
            row
        }),
    );
    assert!(rows
        .iter()
        .all(|row| row.get("id").and_then(SqlValue::as_text) == Some("replaced")));
}
