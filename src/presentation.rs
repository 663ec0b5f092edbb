//! Derived values for displaying a snapshot: printer status, supply
//! names and levels, and device identity.

use crate::registry::{
    CapacityLevel, Decoded, LevelCapacity, SuppliesType, icon_for, level_capacity,
};
use crate::snapshot::{FieldValue, Record, RowIndex, Snapshot, Table};

/// State reported when any error flag is set.
pub const STATE_PROBLEM: &str = "problem";

pub const ICON_PRINTER_ALERT: &str = "mdi:printer-alert";
pub const ICON_PRINTER_OK: &str = "mdi:printer-check";

fn has_errors(snapshot: &Snapshot) -> bool {
    snapshot
        .field("info", "error_state")
        .and_then(FieldValue::as_flags)
        .is_some_and(|flags| !flags.is_empty())
}

/// `"problem"` when the printer reports error flags, otherwise the
/// friendly name of hrPrinterStatus.
pub fn printer_status(snapshot: &Snapshot) -> Option<String> {
    if has_errors(snapshot) {
        return Some(STATE_PROBLEM.to_owned());
    }
    snapshot
        .field("info", "printer_status")
        .map(ToString::to_string)
}

pub fn status_icon(snapshot: &Snapshot) -> &'static str {
    if has_errors(snapshot) {
        ICON_PRINTER_ALERT
    } else {
        ICON_PRINTER_OK
    }
}

/// Friendly names of the error flags that are set.
pub fn error_flags(snapshot: &Snapshot) -> Vec<String> {
    snapshot
        .field("info", "error_state")
        .and_then(FieldValue::as_flags)
        .map(|flags| flags.iter().map(ToString::to_string).collect())
        .unwrap_or_default()
}

/// Supply description, prefixed with its colorant colour when the supply
/// refers to one (`colorant_index > 0`).
pub fn supply_name(supply: &Record, colorants: Option<&Table>) -> Option<String> {
    let description = supply.text("description")?;
    let color = supply
        .field("colorant_index")
        .and_then(FieldValue::as_i64)
        .filter(|&index| index > 0)
        .and_then(|index| colorants?.get(&RowIndex::Number(index)))
        .and_then(|colorant| colorant.text("color"));

    Some(match color {
        Some(color) => format!("{} {}", capitalise(color), description),
        None => description.to_owned(),
    })
}

/// Icon for a supply row, from its type.
pub fn supply_icon(supply: &Record) -> &'static str {
    let supply_type = supply
        .field("type")
        .and_then(FieldValue::as_enum)
        .and_then(|e| e.decoded::<SuppliesType>())
        .unwrap_or(Decoded::Raw(0));
    icon_for(supply_type)
}

/// Level and capacity of a supply or paper input row.
pub fn row_level(row: &Record) -> Option<LevelCapacity> {
    let level = row.field("level").and_then(FieldValue::as_level)?;
    let capacity = row
        .field("capacity")
        .and_then(FieldValue::as_level)
        .unwrap_or(Decoded::Member(CapacityLevel::Unknown));
    Some(level_capacity(level, capacity))
}

/// Manufacturer: vendor metadata first, then the first word of sysDescr.
pub fn manufacturer(snapshot: &Snapshot) -> Option<String> {
    if let Some(name) = non_empty(snapshot.additional_info.text("manufacturer")) {
        return Some(name.to_owned());
    }
    description(snapshot)
        .and_then(|d| d.split_whitespace().next())
        .map(str::to_owned)
}

/// Model: vendor metadata first, then hrDeviceDescr.
pub fn model(snapshot: &Snapshot) -> Option<String> {
    if let Some(model) = non_empty(snapshot.additional_info.text("model")) {
        return Some(model.to_owned());
    }
    non_empty(snapshot.field("info", "model").and_then(FieldValue::as_text)).map(str::to_owned)
}

pub fn sw_version(snapshot: &Snapshot) -> Option<&str> {
    non_empty(snapshot.additional_info.text("sw_version"))
}

/// Hardware addresses of the device's interfaces, in row order.
pub fn connections(snapshot: &Snapshot) -> Vec<String> {
    ["network_info", "interfaces"]
        .iter()
        .filter_map(|group| snapshot.table(group))
        .flat_map(|rows| rows.values())
        .filter_map(|row| non_empty(row.text("phys_address")))
        .map(str::to_owned)
        .collect()
}

fn description(snapshot: &Snapshot) -> Option<&str> {
    ["info", "system"]
        .iter()
        .find_map(|group| snapshot.field(group, "description"))
        .and_then(FieldValue::as_text)
        .map(str::trim)
        .filter(|d| !d.is_empty())
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn capitalise(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
