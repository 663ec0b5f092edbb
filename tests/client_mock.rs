//! Snapshot retrieval over the mock transport.
//!
//! Requires the `testing` feature.

use snmp_device::transport::{MockTransport, ResponseBuilder};
use snmp_device::{
    Client, ClientConfig, DeviceSchema, DeviceType, Error, FieldSpec, FieldValue, GroupSpec,
    RowIndex, Value, oid, retrieve,
};

fn schema() -> DeviceSchema {
    DeviceSchema {
        device_type: DeviceType::Computer,
        groups: vec![
            GroupSpec::scalar(
                "system",
                vec![FieldSpec::text("name", oid!(1, 3, 6, 1, 2, 1, 1, 5, 0))],
            ),
            GroupSpec::table(
                "interfaces",
                None,
                vec![FieldSpec::integer("mtu", oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 4))],
            ),
        ],
        vendor_step: None,
    }
}

fn mock() -> MockTransport {
    MockTransport::new("192.0.2.10:161".parse().unwrap())
}

#[tokio::test]
async fn groups_are_fetched_in_order() {
    let mut mock = mock();
    mock.queue_response(
        ResponseBuilder::new(1)
            .varbind(oid!(1, 3, 6, 1, 2, 1, 1, 5, 0), Value::from("nas01"))
            .build_v2c(b"public"),
    );
    mock.queue_response(
        ResponseBuilder::new(2)
            .varbind(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 4, 1), Value::Integer(1500))
            .build_v2c(b"public"),
    );
    mock.queue_response(
        ResponseBuilder::new(3)
            .varbind(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 4, 2), Value::Integer(65536))
            .build_v2c(b"public"),
    );
    // next column: the walk is over
    mock.queue_response(
        ResponseBuilder::new(4)
            .varbind(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 5, 1), Value::Gauge32(0))
            .build_v2c(b"public"),
    );
    let client = Client::new(mock.clone(), ClientConfig::default());

    let snapshot = retrieve(&client, &schema()).await.unwrap();

    assert_eq!(snapshot.scalar("system").unwrap().text("name"), Some("nas01"));
    let interfaces = snapshot.table("interfaces").unwrap();
    assert_eq!(interfaces.len(), 2);
    assert_eq!(
        interfaces[&RowIndex::Number(2)].field("mtu"),
        Some(&FieldValue::Integer(65536))
    );

    let requests = mock.requests();
    assert_eq!(requests.len(), 4);
    assert_eq!(requests[0].oids(), [oid!(1, 3, 6, 1, 2, 1, 1, 5, 0)]);
    assert_eq!(requests[1].oids(), [oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 4)]);
}

/// A timeout part way through fails the whole retrieval.
#[tokio::test]
async fn timeout_during_walk_aborts() {
    let mut mock = mock();
    mock.queue_response(
        ResponseBuilder::new(1)
            .varbind(oid!(1, 3, 6, 1, 2, 1, 1, 5, 0), Value::from("nas01"))
            .build_v2c(b"public"),
    );
    mock.queue_timeout();
    let client = Client::new(mock, ClientConfig::default());

    let err = retrieve(&client, &schema()).await.unwrap_err();
    assert!(matches!(*err, Error::Timeout { .. }), "got {err:?}");
}

#[tokio::test]
async fn garbage_response_is_malformed() {
    let mut mock = mock();
    mock.queue_raw_response(&b"\x30\x03\x02\x01"[..]);
    let client = Client::new(mock, ClientConfig::default());

    let err = retrieve(&client, &schema()).await.unwrap_err();
    assert!(matches!(*err, Error::MalformedResponse { .. }), "got {err:?}");
}
