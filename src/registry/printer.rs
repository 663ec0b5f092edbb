//! Printer-MIB (RFC 3805) and Host Resources printer vocabularies.

use super::Decoded;

domain_enum! {
    /// prtMarkerSuppliesClass.
    pub enum SuppliesClass: SuppliesClass {
        Other = 1 => "other",
        /// Consumed by printing (toner, ink).
        Consumable = 3 => "consumable",
        /// Filled by printing (waste toner).
        Receptacle = 4 => "receptacle",
    }
}

domain_enum! {
    /// prtMarkerSuppliesType (PrtMarkerSuppliesTypeTC).
    pub enum SuppliesType: SuppliesType {
        Other = 1 => "other",
        Unknown = 2 => "unknown",
        Toner = 3 => "toner",
        WasteToner = 4 => "waste_toner",
        Ink = 5 => "ink",
        InkCartridge = 6 => "ink_cartridge",
        InkRibbon = 7 => "ink_ribbon",
        WasteInk = 8 => "waste_ink",
        Opc = 9 => "opc",
        Developer = 10 => "developer",
        FuserOil = 11 => "fuser_oil",
        SolidWax = 12 => "solid_wax",
        RibbonWax = 13 => "ribbon_wax",
        WasteWax = 14 => "waste_wax",
        Fuser = 15 => "fuser",
        CoronaWire = 16 => "corona_wire",
        FuserOilWick = 17 => "fuser_oil_wick",
        CleanerUnit = 18 => "cleaner_unit",
        FuserCleaningPad = 19 => "fuser_cleaning_pad",
        TransferUnit = 20 => "transfer_unit",
        TonerCartridge = 21 => "toner_cartridge",
        FuserOiler = 22 => "fuser_oiler",
        Water = 23 => "water",
        WasteWater = 24 => "waste_water",
        GlueWaterAdditive = 25 => "glue_water_additive",
        WastePaper = 26 => "waste_paper",
        BindingSupply = 27 => "binding_supply",
        BandingSupply = 28 => "banding_supply",
        StitchingWire = 29 => "stitching_wire",
        ShrinkWrap = 30 => "shrink_wrap",
        PaperWrap = 31 => "paper_wrap",
        Staples = 32 => "staples",
        Inserts = 33 => "inserts",
        Covers = 34 => "covers",
    }
}

domain_enum! {
    /// Sentinels of prtMarkerSuppliesLevel / MaxCapacity and the
    /// prtInput level columns. Non-negative values are plain amounts.
    pub enum CapacityLevel: CapacityLevel {
        Untracked = -1 => "untracked",
        Unknown = -2 => "unknown",
        /// Some remains, amount not reported.
        Available = -3 => "available",
    }
}

domain_enum! {
    /// prtInputCapacityUnit.
    pub enum CapacityUnit: CapacityUnit {
        Other = 1 => "other",
        Unknown = 2 => "unknown",
        TenThousandthsOfInches = 3 => "ten_thousandths_of_inches",
        Micrometers = 4 => "micrometers",
        Sheets = 8 => "sheets",
        Feet = 16 => "feet",
        Meters = 17 => "meters",
        Items = 18 => "items",
        Percent = 19 => "percent",
    }
}

domain_enum! {
    /// prtInputType.
    pub enum PaperInputType: PaperInputType {
        Other = 1 => "other",
        Unknown = 2 => "unknown",
        SheetFeedAutoRemovableTray = 3 => "sheet_feed_auto_removable_tray",
        SheetFeedAutoNonRemovableTray = 4 => "sheet_feed_auto_non_removable_tray",
        SheetFeedManual = 5 => "sheet_feed_manual",
        ContinuousRoll = 6 => "continuous_roll",
        ContinuousFanFold = 7 => "continuous_fan_fold",
    }
}

domain_enum! {
    /// hrPrinterStatus.
    pub enum PrinterActionStatus: PrinterActionStatus {
        Offline = 0 => "offline",
        Other = 1 => "other",
        Unknown = 2 => "unknown",
        Idle = 3 => "idle",
        Printing = 4 => "printing",
        Warmup = 5 => "warmup",
    }
}

domain_enum! {
    /// hrDeviceStatus.
    pub enum PrinterDeviceStatus: PrinterDeviceStatus {
        Unknown = 1 => "unknown",
        Running = 2 => "running",
        Warning = 3 => "warning",
        Testing = 4 => "testing",
        Down = 5 => "down",
    }
}

domain_enum! {
    /// hrPrinterDetectedErrorState flags. Each member's value is `1 << bit`,
    /// where bit 0 is the high bit of the first octet.
    pub enum PrinterDetectedErrorState: PrinterDetectedErrorState {
        LowPaper = 1 => "low_paper",
        NoPaper = 2 => "no_paper",
        LowToner = 4 => "low_toner",
        NoToner = 8 => "no_toner",
        DoorOpen = 16 => "door_open",
        Jammed = 32 => "jammed",
        Offline = 64 => "offline",
        ServiceRequested = 128 => "service_requested",
        InputTrayMissing = 256 => "input_tray_missing",
        OutputTrayMissing = 512 => "output_tray_missing",
        MarkerSupplyMissing = 1024 => "marker_supply_missing",
        OutputNearFull = 2048 => "output_near_full",
        OutputFull = 4096 => "output_full",
        InputTrayEmpty = 8192 => "input_tray_empty",
        OverduePreventMaintenance = 16384 => "overdue_prevent_maintenance",
    }
}

/// Icon used when a supply type has no specific one.
pub const DEFAULT_SUPPLY_ICON: &str = "mdi:puzzle";

/// Material Design icon for a supply type.
pub fn icon_for(supply: Decoded<SuppliesType>) -> &'static str {
    use SuppliesType::*;

    let Some(kind) = supply.member() else {
        return DEFAULT_SUPPLY_ICON;
    };
    match kind {
        WasteInk | WastePaper | WasteToner | WasteWater | WasteWax => "mdi:delete",
        Toner | TonerCartridge | Ink | InkCartridge | InkRibbon | FuserOil | Water => "mdi:water",
        Developer | FuserOiler | CleanerUnit | TransferUnit => "mdi:cogs",
        Staples | BandingSupply | BindingSupply => "mdi:clip",
        Covers => "mdi:notebook",
        Inserts => "mdi:book-open-variant",
        PaperWrap | ShrinkWrap => "mdi:gift",
        Fuser => "mdi:lightbulb",
        _ => DEFAULT_SUPPLY_ICON,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DomainEnum;

    #[test]
    fn icons() {
        assert_eq!(icon_for(SuppliesType::decode(4)), "mdi:delete");
        assert_eq!(icon_for(SuppliesType::decode(21)), "mdi:water");
        assert_eq!(icon_for(SuppliesType::decode(15)), "mdi:lightbulb");
        assert_eq!(icon_for(SuppliesType::decode(9)), DEFAULT_SUPPLY_ICON);
        assert_eq!(icon_for(SuppliesType::decode(77)), DEFAULT_SUPPLY_ICON);
    }

    #[test]
    fn supply_types_are_contiguous() {
        assert_eq!(SuppliesType::MEMBERS.len(), 34);
        for (i, member) in SuppliesType::MEMBERS.iter().enumerate() {
            assert_eq!(member.as_raw(), i as i64 + 1);
        }
    }
}
