//! Table walk tests against an in-process agent.

mod common;

use common::fixtures::{cell, interface_table};
use common::{TestAgent, client, host_mib, printer_mib};
use snmp_device::client::INDEX_FIELD;
use snmp_device::{FieldDecoder, FieldSpec, FieldValue, Oid, RowIndex, Value, Version, oid};
use std::collections::BTreeMap;

fn if_column(column: u32) -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 2, 2, 1).child(column)
}

/// Three rows whose index values arrive out of order are keyed and sorted
/// by the index column, which itself is not stored in the rows.
#[tokio::test]
async fn index_column_keys_rows_in_any_arrival_order() {
    let entry = oid!(1, 3, 6, 1, 2, 1, 2, 2, 1);
    let mut data = BTreeMap::new();
    for (row, name, mtu) in [(1, "wlan0", 1500), (2, "eth0", 9000), (3, "br0", 1400)] {
        data.insert(cell(&entry, 2, &[row]), Value::from(name));
        data.insert(cell(&entry, 4, &[row]), Value::Integer(mtu));
    }
    let agent = TestAgent::with_data(data).await;
    let client = client(&agent, Version::V2c).await;

    let index = FieldSpec::text("descr", if_column(2));
    let fields = [FieldSpec::integer("mtu", if_column(4))];
    let rows = client.table_walk(&fields, Some(&index)).await.unwrap();

    let keys: Vec<_> = rows.keys().map(ToString::to_string).collect();
    assert_eq!(keys, ["br0", "eth0", "wlan0"]);
    assert_eq!(rows[&RowIndex::from("eth0")].field("mtu"), Some(&FieldValue::Integer(9000)));
    assert!(rows.values().all(|row| row.field("descr").is_none()));
    // three rows plus the request that runs off the end
    assert_eq!(agent.request_count(), 4);
}

#[tokio::test]
async fn last_arc_keys_rows_without_index() {
    let agent = TestAgent::with_data(host_mib()).await;
    let client = client(&agent, Version::V2c).await;
    let fields = [
        FieldSpec::text("descr", oid!(1, 3, 6, 1, 2, 1, 25, 2, 3, 1, 3)),
        FieldSpec::integer("size", oid!(1, 3, 6, 1, 2, 1, 25, 2, 3, 1, 5)),
    ];

    let rows = client.table_walk(&fields, None).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[&RowIndex::Number(31)].text("descr"), Some("/"));
    assert_eq!(rows[&RowIndex::Number(1)].field("size"), Some(&FieldValue::Integer(16_318_004)));
}

#[tokio::test]
async fn underscore_index_field_keys_rows() {
    let agent = TestAgent::with_data(interface_table()).await;
    let client = client(&agent, Version::V2c).await;
    let fields = [
        FieldSpec::text(INDEX_FIELD, if_column(2)),
        FieldSpec::new("phys_address", if_column(6), FieldDecoder::Mac),
    ];

    let rows = client.table_walk(&fields, None).await.unwrap();

    assert_eq!(
        rows[&RowIndex::from("eth0")].field("phys_address"),
        Some(&FieldValue::Mac("00:17:c8:2a:9b:01".into()))
    );
    assert_eq!(
        rows[&RowIndex::from("lo")].field("phys_address"),
        Some(&FieldValue::Mac(String::new()))
    );
}

/// v1 agents end a walk with noSuchName at the end of the MIB view.
#[tokio::test]
async fn v1_end_of_view_keeps_rows() {
    let entry = oid!(1, 3, 6, 1, 2, 1, 2, 2, 1);
    let mut data = BTreeMap::new();
    data.insert(cell(&entry, 3, &[1]), Value::Integer(6));
    data.insert(cell(&entry, 3, &[2]), Value::Integer(24));
    let agent = TestAgent::with_data(data).await;
    let client = client(&agent, Version::V1).await;

    let fields = [FieldSpec::integer("type", if_column(3))];
    let rows = client.table_walk(&fields, None).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(agent.request_count(), 3);
}

/// Columns end at different points: ifSpeed has no rows at all and ifMtu
/// skips row 2. Every row ifType has survives, and the missing cells are
/// simply absent.
#[tokio::test]
async fn columns_end_independently() {
    let entry = oid!(1, 3, 6, 1, 2, 1, 2, 2, 1);
    let mut data = BTreeMap::new();
    for row in [1, 2, 3] {
        data.insert(cell(&entry, 3, &[row]), Value::Integer(6));
    }
    data.insert(cell(&entry, 4, &[1]), Value::Integer(1500));
    data.insert(cell(&entry, 4, &[3]), Value::Integer(9000));
    // ifXTable follows ifTable
    data.insert(oid!(1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 1, 1), Value::from("eth0"));
    let agent = TestAgent::with_data(data).await;
    let client = client(&agent, Version::V2c).await;

    let fields = [
        FieldSpec::integer("type", if_column(3)),
        FieldSpec::integer("mtu", if_column(4)),
        FieldSpec::new("speed", if_column(5), FieldDecoder::Unsigned),
    ];
    let rows = client.table_walk(&fields, None).await.unwrap();

    let keys: Vec<_> = rows.keys().cloned().collect();
    assert_eq!(keys, [RowIndex::Number(1), RowIndex::Number(2), RowIndex::Number(3)]);
    assert_eq!(rows[&RowIndex::Number(1)].field("mtu"), Some(&FieldValue::Integer(1500)));
    assert!(rows[&RowIndex::Number(2)].field("mtu").is_none());
    assert_eq!(rows[&RowIndex::Number(3)].field("mtu"), Some(&FieldValue::Integer(9000)));
    assert!(rows.values().all(|row| row.field("speed").is_none()));
    assert!(rows.values().all(|row| row.field("type") == Some(&FieldValue::Integer(6))));
    assert_eq!(agent.request_count(), 4);
}

/// Under v1 the agent reports a finished column as noSuchName; the other
/// columns carry on.
#[tokio::test]
async fn v1_short_column_keeps_other_rows() {
    let entry = oid!(1, 3, 6, 1, 2, 1, 2, 2, 1);
    let mut data = BTreeMap::new();
    data.insert(cell(&entry, 3, &[1]), Value::Integer(6));
    data.insert(cell(&entry, 3, &[2]), Value::Integer(24));
    data.insert(cell(&entry, 4, &[1]), Value::Integer(1500));
    let agent = TestAgent::with_data(data).await;
    let client = client(&agent, Version::V1).await;

    let fields = [
        FieldSpec::integer("type", if_column(3)),
        FieldSpec::integer("mtu", if_column(4)),
    ];
    let rows = client.table_walk(&fields, None).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[&RowIndex::Number(1)].field("mtu"), Some(&FieldValue::Integer(1500)));
    let second = &rows[&RowIndex::Number(2)];
    assert_eq!(second.field("type"), Some(&FieldValue::Integer(24)));
    assert!(second.field("mtu").is_none());
}

#[tokio::test]
async fn empty_table() {
    let agent = TestAgent::with_data(printer_mib()).await;
    let client = client(&agent, Version::V2c).await;
    // prtInterpreterTable is not populated
    let fields = [FieldSpec::text("lang", oid!(1, 3, 6, 1, 2, 1, 43, 15, 1, 1, 2))];

    let rows = client.table_walk(&fields, None).await.unwrap();

    assert!(rows.is_empty());
    assert_eq!(agent.request_count(), 1);
}
