//! MIB views of the devices used across tests.

use bytes::Bytes;
use snmp_device::{Oid, Value, oid};
use std::collections::BTreeMap;

pub const KYOCERA_DESCR: &str = "KYOCERA Document Solutions Printing System";
pub const KYOCERA_MODEL: &str = "ECOSYS P2135dn";
pub const KYOCERA_FIRMWARE: &str = "2S0_2F00.C03.012";
pub const LINUX_DESCR: &str = "Linux build01 6.1.0-18-amd64 #1 SMP PREEMPT_DYNAMIC Debian x86_64";

fn octets(bytes: &'static [u8]) -> Value {
    Value::OctetString(Bytes::from_static(bytes))
}

/// `base.column.tail..`
pub fn cell(base: &Oid, column: u32, tail: &[u32]) -> Oid {
    tail.iter()
        .fold(base.child(column), |oid, &arc| oid.child(arc))
}

/// Two-row ifTable: eth0 and lo.
pub fn interface_table() -> BTreeMap<Oid, Value> {
    let entry = oid!(1, 3, 6, 1, 2, 1, 2, 2, 1);
    let mut data = BTreeMap::new();
    data.insert(cell(&entry, 1, &[1]), Value::Integer(1));
    data.insert(cell(&entry, 1, &[2]), Value::Integer(2));
    data.insert(cell(&entry, 2, &[1]), Value::from("eth0"));
    data.insert(cell(&entry, 2, &[2]), Value::from("lo"));
    data.insert(cell(&entry, 3, &[1]), Value::Integer(6));
    data.insert(cell(&entry, 3, &[2]), Value::Integer(24));
    data.insert(cell(&entry, 4, &[1]), Value::Integer(1500));
    data.insert(cell(&entry, 4, &[2]), Value::Integer(65536));
    data.insert(cell(&entry, 5, &[1]), Value::Gauge32(1_000_000_000));
    data.insert(cell(&entry, 5, &[2]), Value::Gauge32(10_000_000));
    data.insert(
        cell(&entry, 6, &[1]),
        octets(&[0x00, 0x17, 0xC8, 0x2A, 0x9B, 0x01]),
    );
    data.insert(cell(&entry, 6, &[2]), octets(b""));
    data.insert(cell(&entry, 8, &[1]), Value::Integer(1));
    data.insert(cell(&entry, 8, &[2]), Value::Integer(1));
    data
}

/// A Kyocera mono laser printer with one toner, a waste toner box and one
/// paper tray.
pub fn printer_mib() -> BTreeMap<Oid, Value> {
    let mut data = interface_table();

    data.insert(oid!(1, 3, 6, 1, 2, 1, 1, 1, 0), Value::from(KYOCERA_DESCR));
    // hrDeviceDescr, hrDeviceStatus
    data.insert(
        oid!(1, 3, 6, 1, 2, 1, 25, 3, 2, 1, 3, 1),
        Value::from("ECOSYS P2135dn Printer"),
    );
    data.insert(oid!(1, 3, 6, 1, 2, 1, 25, 3, 2, 1, 5, 1), Value::Integer(2));
    // hrPrinterStatus idle, hrPrinterDetectedErrorState lowToner (bit 2)
    data.insert(oid!(1, 3, 6, 1, 2, 1, 25, 3, 5, 1, 1, 1), Value::Integer(3));
    data.insert(oid!(1, 3, 6, 1, 2, 1, 25, 3, 5, 1, 2, 1), octets(&[0x20]));
    // prtMarkerLifeCount
    data.insert(
        oid!(1, 3, 6, 1, 2, 1, 43, 10, 2, 1, 4, 1, 1),
        Value::Counter32(48213),
    );

    // prtInputTable
    let input = oid!(1, 3, 6, 1, 2, 1, 43, 8, 2, 1);
    data.insert(cell(&input, 2, &[1, 1]), Value::Integer(4));
    data.insert(cell(&input, 8, &[1, 1]), Value::Integer(8));
    data.insert(cell(&input, 9, &[1, 1]), Value::Integer(250));
    data.insert(cell(&input, 10, &[1, 1]), Value::Integer(-3));
    data.insert(cell(&input, 12, &[1, 1]), Value::from("A4"));
    data.insert(cell(&input, 17, &[1, 1]), octets(b""));
    data.insert(cell(&input, 18, &[1, 1]), Value::from("Cassette 1"));

    // prtMarkerSuppliesTable
    let supplies = oid!(1, 3, 6, 1, 2, 1, 43, 11, 1, 1);
    data.insert(cell(&supplies, 2, &[1, 1]), Value::Integer(1));
    data.insert(cell(&supplies, 2, &[1, 2]), Value::Integer(1));
    data.insert(cell(&supplies, 3, &[1, 1]), Value::Integer(1));
    data.insert(cell(&supplies, 3, &[1, 2]), Value::Integer(0));
    data.insert(cell(&supplies, 4, &[1, 1]), Value::Integer(3));
    data.insert(cell(&supplies, 4, &[1, 2]), Value::Integer(4));
    data.insert(cell(&supplies, 5, &[1, 1]), Value::Integer(3));
    data.insert(cell(&supplies, 5, &[1, 2]), Value::Integer(4));
    data.insert(cell(&supplies, 6, &[1, 1]), Value::from("TK-1150"));
    data.insert(cell(&supplies, 6, &[1, 2]), Value::from("Waste Toner Box"));
    data.insert(cell(&supplies, 8, &[1, 1]), Value::Integer(3000));
    data.insert(cell(&supplies, 8, &[1, 2]), Value::Integer(-2));
    data.insert(cell(&supplies, 9, &[1, 1]), Value::Integer(450));
    data.insert(cell(&supplies, 9, &[1, 2]), Value::Integer(-3));

    // prtMarkerColorantTable
    let colorants = oid!(1, 3, 6, 1, 2, 1, 43, 12, 1, 1);
    data.insert(cell(&colorants, 2, &[1, 1]), Value::Integer(1));
    data.insert(cell(&colorants, 4, &[1, 1]), Value::from("black"));
    data.insert(cell(&colorants, 5, &[1, 1]), Value::Integer(2));

    // Kyocera private MIB
    data.insert(
        oid!(1, 3, 6, 1, 4, 1, 1347, 43, 5, 1, 1, 1, 1),
        Value::from(KYOCERA_MODEL),
    );
    data.insert(
        oid!(1, 3, 6, 1, 4, 1, 1347, 43, 5, 4, 1, 5, 1, 1),
        Value::from(KYOCERA_FIRMWARE),
    );
    data
}

/// A Linux host with two interfaces and two storage areas.
pub fn host_mib() -> BTreeMap<Oid, Value> {
    let mut data = interface_table();

    let system = oid!(1, 3, 6, 1, 2, 1, 1);
    data.insert(cell(&system, 1, &[0]), Value::from(LINUX_DESCR));
    data.insert(cell(&system, 3, &[0]), Value::TimeTicks(8_640_000));
    data.insert(cell(&system, 4, &[0]), Value::from("ops@example.net"));
    data.insert(cell(&system, 5, &[0]), Value::from("build01"));
    data.insert(cell(&system, 6, &[0]), Value::from("Rack 4"));

    let storage = oid!(1, 3, 6, 1, 2, 1, 25, 2, 3, 1);
    for (row, descr, units, size, used) in [
        (1, "Physical memory", 1024, 16_318_004, 5_120_332),
        (31, "/", 4096, 61_255_848, 12_993_001),
    ] {
        data.insert(cell(&storage, 3, &[row]), Value::from(descr));
        data.insert(cell(&storage, 4, &[row]), Value::Integer(units));
        data.insert(cell(&storage, 5, &[row]), Value::Integer(size));
        data.insert(cell(&storage, 6, &[row]), Value::Integer(used));
    }
    data
}
