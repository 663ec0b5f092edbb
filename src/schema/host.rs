//! Computer schema: MIB-II system, IF-MIB and hrStorage.

use super::{DeviceSchema, DeviceType, FieldDecoder, FieldSpec, GroupSpec, VendorLookup, column};
use crate::oid;
use crate::registry::EnumKind;
use crate::snapshot::Snapshot;

pub(super) fn schema() -> DeviceSchema {
    DeviceSchema {
        device_type: DeviceType::Computer,
        groups: vec![system(), interfaces(), storage()],
        vendor_step: Some(vendor_step),
    }
}

fn system() -> GroupSpec {
    let system = oid!(1, 3, 6, 1, 2, 1, 1);
    GroupSpec::scalar(
        "system",
        vec![
            FieldSpec::text("description", column(&system, 1, &[0])),
            FieldSpec::new("uptime", column(&system, 3, &[0]), FieldDecoder::Ticks),
            FieldSpec::text("contact", column(&system, 4, &[0])),
            FieldSpec::text("name", column(&system, 5, &[0])),
            FieldSpec::text("location", column(&system, 6, &[0])),
        ],
    )
}

fn interfaces() -> GroupSpec {
    let if_entry = oid!(1, 3, 6, 1, 2, 1, 2, 2, 1);
    GroupSpec::table(
        "interfaces",
        None,
        vec![
            FieldSpec::text("descr", column(&if_entry, 2, &[])),
            FieldSpec::enumeration("type", column(&if_entry, 3, &[]), EnumKind::InterfaceType),
            FieldSpec::integer("mtu", column(&if_entry, 4, &[])),
            FieldSpec::new("speed", column(&if_entry, 5, &[]), FieldDecoder::Unsigned),
            FieldSpec::new("phys_address", column(&if_entry, 6, &[]), FieldDecoder::Mac),
            FieldSpec::enumeration(
                "oper_status",
                column(&if_entry, 8, &[]),
                EnumKind::InterfaceStatus,
            ),
        ],
    )
}

fn storage() -> GroupSpec {
    let hr_storage_entry = oid!(1, 3, 6, 1, 2, 1, 25, 2, 3, 1);
    GroupSpec::table(
        "storage",
        None,
        vec![
            FieldSpec::text("descr", column(&hr_storage_entry, 3, &[])),
            FieldSpec::integer("allocation_units", column(&hr_storage_entry, 4, &[])),
            FieldSpec::integer("size", column(&hr_storage_entry, 5, &[])),
            FieldSpec::integer("used", column(&hr_storage_entry, 6, &[])),
        ],
    )
}

/// OS name and version parsed out of sysDescr. Nothing extra is fetched.
fn vendor_step(snapshot: &Snapshot) -> VendorLookup {
    let mut lookup = VendorLookup::default();
    let Some(description) = snapshot
        .scalar("system")
        .and_then(|system| system.text("description"))
    else {
        return lookup;
    };
    let lower = description.to_lowercase();

    if lower.contains("linux") || lower.contains("unix") {
        // "Linux myhost 5.15.0-91-generic #101-Ubuntu SMP ..."
        let parts: Vec<&str> = description.split_whitespace().collect();
        if let Some(model) = parts.first() {
            lookup.base.insert("model", *model);
        }
        if let Some(version) = parts.get(2) {
            lookup.base.insert("sw_version", *version);
        }
    } else if lower.contains("windows") {
        // "Hardware: ...\r\nSoftware: Windows Version 6.3 (Build 9600 Multiprocessor Free)"
        lookup.base.insert("model", "Windows");
        if let Some(software) = description.lines().nth(2) {
            let version = software
                .trim()
                .strip_prefix("Software:")
                .unwrap_or(software)
                .trim();
            lookup.base.insert("sw_version", version);
        }
    }
    lookup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{GroupResult, Record};

    fn with_description(description: &str) -> Snapshot {
        let mut system = Record::new();
        system.insert("description", description);
        let mut snapshot = Snapshot::new(DeviceType::Computer);
        snapshot
            .groups
            .insert("system".into(), GroupResult::Scalar(system));
        snapshot
    }

    #[test]
    fn linux_description() {
        let lookup = vendor_step(&with_description(
            "Linux nas01 5.15.0-91-generic #101-Ubuntu SMP x86_64",
        ));
        assert!(lookup.fields.is_empty());
        assert_eq!(lookup.base.text("model"), Some("Linux"));
        assert_eq!(lookup.base.text("sw_version"), Some("5.15.0-91-generic"));
    }

    #[test]
    fn windows_description() {
        let description = "Hardware: Intel64 Family 6 Model 158\r\n\
                           AT/AT COMPATIBLE\r\n\
                           Software: Windows Version 6.3 (Build 19045 Multiprocessor Free)";
        let lookup = vendor_step(&with_description(description));
        assert!(lookup.fields.is_empty());
        assert_eq!(lookup.base.text("model"), Some("Windows"));
        assert_eq!(
            lookup.base.text("sw_version"),
            Some("Windows Version 6.3 (Build 19045 Multiprocessor Free)")
        );
    }

    #[test]
    fn short_descriptions_are_tolerated() {
        let lookup = vendor_step(&with_description("Linux"));
        assert_eq!(lookup.base.text("model"), Some("Linux"));
        assert!(lookup.base.field("sw_version").is_none());

        assert!(vendor_step(&with_description("Cisco IOS")).base.is_empty());
    }

    #[test]
    fn interface_columns() {
        let schema = schema();
        let interfaces = schema.group("interfaces").unwrap();
        let oids: Vec<String> = interfaces.fields.iter().map(|f| f.oid.to_string()).collect();
        assert_eq!(oids[0], "1.3.6.1.2.1.2.2.1.2");
        assert_eq!(oids[5], "1.3.6.1.2.1.2.2.1.8");
    }
}
