//! Printer schema: Host Resources and Printer-MIB groups.

use super::{
    DeviceSchema, DeviceType, FieldDecoder, FieldSpec, GroupSpec, VendorLookup, column,
};
use crate::oid;
use crate::registry::EnumKind;
use crate::snapshot::Snapshot;

pub(super) fn schema() -> DeviceSchema {
    DeviceSchema {
        device_type: DeviceType::Printer,
        groups: vec![info(), network_info(), supplies(), colorants(), paper_inputs()],
        vendor_step: Some(vendor_step),
    }
}

fn info() -> GroupSpec {
    GroupSpec::scalar(
        "info",
        vec![
            // hrDeviceDescr.1
            FieldSpec::text("model", oid!(1, 3, 6, 1, 2, 1, 25, 3, 2, 1, 3, 1)),
            // prtMarkerLifeCount.1.1
            FieldSpec::integer("mileage", oid!(1, 3, 6, 1, 2, 1, 43, 10, 2, 1, 4, 1, 1)),
            FieldSpec::enumeration(
                "printer_status",
                oid!(1, 3, 6, 1, 2, 1, 25, 3, 5, 1, 1, 1),
                EnumKind::PrinterActionStatus,
            ),
            FieldSpec::enumeration(
                "device_status",
                oid!(1, 3, 6, 1, 2, 1, 25, 3, 2, 1, 5, 1),
                EnumKind::PrinterDeviceStatus,
            ),
            FieldSpec::new(
                "error_state",
                oid!(1, 3, 6, 1, 2, 1, 25, 3, 5, 1, 2, 1),
                FieldDecoder::Bitfield(EnumKind::PrinterDetectedErrorState),
            ),
            FieldSpec::text("description", oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)),
        ],
    )
}

fn network_info() -> GroupSpec {
    let if_entry = oid!(1, 3, 6, 1, 2, 1, 2, 2, 1);
    GroupSpec::table(
        "network_info",
        Some(FieldSpec::text("descr", column(&if_entry, 2, &[]))),
        vec![
            FieldSpec::enumeration("type", column(&if_entry, 3, &[]), EnumKind::InterfaceType),
            FieldSpec::new("phys_address", column(&if_entry, 6, &[]), FieldDecoder::Mac),
        ],
    )
}

fn supplies() -> GroupSpec {
    let entry = oid!(1, 3, 6, 1, 2, 1, 43, 11, 1, 1);
    GroupSpec::table(
        "supplies",
        None,
        vec![
            FieldSpec::integer("marker_index", column(&entry, 2, &[1])),
            FieldSpec::integer("colorant_index", column(&entry, 3, &[1])),
            FieldSpec::enumeration("class", column(&entry, 4, &[1]), EnumKind::SuppliesClass),
            FieldSpec::enumeration("type", column(&entry, 5, &[1]), EnumKind::SuppliesType),
            FieldSpec::text("description", column(&entry, 6, &[1])),
            FieldSpec::new("capacity", column(&entry, 8, &[1]), FieldDecoder::Level),
            FieldSpec::new("level", column(&entry, 9, &[1]), FieldDecoder::Level),
        ],
    )
}

fn colorants() -> GroupSpec {
    let entry = oid!(1, 3, 6, 1, 2, 1, 43, 12, 1, 1);
    GroupSpec::table(
        "colorants",
        None,
        vec![
            FieldSpec::integer("marker_index", column(&entry, 2, &[1])),
            FieldSpec::text("color", column(&entry, 4, &[1])),
            FieldSpec::integer("tonality", column(&entry, 5, &[1])),
        ],
    )
}

fn paper_inputs() -> GroupSpec {
    let entry = oid!(1, 3, 6, 1, 2, 1, 43, 8, 2, 1);
    GroupSpec::table(
        "paper_inputs",
        None,
        vec![
            FieldSpec::enumeration("type", column(&entry, 2, &[1]), EnumKind::PaperInputType),
            FieldSpec::enumeration("unit", column(&entry, 8, &[1]), EnumKind::CapacityUnit),
            FieldSpec::new("capacity", column(&entry, 9, &[1]), FieldDecoder::Level),
            FieldSpec::new("level", column(&entry, 10, &[1]), FieldDecoder::Level),
            FieldSpec::text("media", column(&entry, 12, &[1])),
            FieldSpec::text("serial", column(&entry, 17, &[1])),
            FieldSpec::text("model", column(&entry, 18, &[1])),
        ],
    )
}

/// Vendor metadata keyed off sysDescr.
fn vendor_step(snapshot: &Snapshot) -> VendorLookup {
    let mut lookup = VendorLookup::default();
    let Some(description) = snapshot.scalar("info").and_then(|info| info.text("description"))
    else {
        return lookup;
    };
    let lower = description.to_lowercase();

    if lower.contains("panasonic") {
        lookup.base.insert("manufacturer", "Panasonic");
        if lower.contains("kx-mb") {
            // "Panasonic KX-MB2000" style: the model follows the vendor name.
            let model: String = description.chars().skip(10).collect();
            lookup.base.insert("model", model);
            lookup.fields.push(FieldSpec::new(
                "sw_version",
                oid!(1, 3, 6, 1, 4, 1, 258, 405, 1, 1, 1, 4, 0),
                FieldDecoder::TrimmedText,
            ));
        }
    } else if lower.contains("kyocera") {
        lookup.base.insert("manufacturer", "Kyocera");
        lookup.fields.push(FieldSpec::text(
            "sw_version",
            oid!(1, 3, 6, 1, 4, 1, 1347, 43, 5, 4, 1, 5, 1, 1),
        ));
        lookup.fields.push(FieldSpec::text(
            "model",
            oid!(1, 3, 6, 1, 4, 1, 1347, 43, 5, 1, 1, 1, 1),
        ));
    }
    lookup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{GroupResult, Record};

    fn with_description(description: &str) -> Snapshot {
        let mut info = Record::new();
        info.insert("description", description);
        let mut snapshot = Snapshot::new(DeviceType::Printer);
        snapshot
            .groups
            .insert("info".into(), GroupResult::Scalar(info));
        snapshot
    }

    #[test]
    fn groups_in_order() {
        let names: Vec<_> = schema().groups.iter().map(|g| g.name).collect();
        assert_eq!(
            names,
            ["info", "network_info", "supplies", "colorants", "paper_inputs"]
        );
    }

    #[test]
    fn supply_columns() {
        let schema = schema();
        let supplies = schema.group("supplies").unwrap();
        let level = supplies.fields.iter().find(|f| f.name == "level").unwrap();
        assert_eq!(level.oid.to_string(), "1.3.6.1.2.1.43.11.1.1.9.1");
        assert_eq!(level.decode, FieldDecoder::Level);
    }

    #[test]
    fn panasonic_mb_fetches_firmware() {
        let lookup = vendor_step(&with_description("Panasonic KX-MB2030"));
        assert_eq!(lookup.base.text("manufacturer"), Some("Panasonic"));
        assert_eq!(lookup.base.text("model"), Some("KX-MB2030"));
        assert_eq!(lookup.fields.len(), 1);
        assert_eq!(lookup.fields[0].name, "sw_version");
        assert_eq!(lookup.fields[0].decode, FieldDecoder::TrimmedText);
    }

    #[test]
    fn kyocera_fetches_model_and_firmware() {
        let lookup = vendor_step(&with_description("KYOCERA Document Solutions Printing System"));
        assert_eq!(lookup.base.text("manufacturer"), Some("Kyocera"));
        let names: Vec<_> = lookup.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, ["sw_version", "model"]);
    }

    #[test]
    fn other_vendors_have_no_lookup() {
        assert_eq!(
            vendor_step(&with_description("HP ETHERNET MULTI-ENVIRONMENT")),
            VendorLookup::default()
        );
        assert_eq!(
            vendor_step(&Snapshot::new(DeviceType::Printer)),
            VendorLookup::default()
        );
    }
}
