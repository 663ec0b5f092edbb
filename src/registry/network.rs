//! IF-MIB vocabularies.

domain_enum! {
    /// ifType, the IANAifType values seen on printers and hosts.
    pub enum InterfaceType: InterfaceType {
        Other = 1 => "other",
        Regular1822 = 2 => "regular1822",
        EthernetCsmacd = 6 => "ethernet_csmacd",
        Iso88023Csmacd = 7 => "iso88023_csmacd",
        Iso88025TokenRing = 9 => "iso88025_token_ring",
        Ppp = 23 => "ppp",
        SoftwareLoopback = 24 => "software_loopback",
        Slip = 28 => "slip",
        Atm = 37 => "atm",
        PropPointToPointSerial = 22 => "prop_point_to_point_serial",
        Ieee80211 = 71 => "ieee80211",
        Tunnel = 131 => "tunnel",
        L2Vlan = 135 => "l2vlan",
        Ieee8023adLag = 161 => "ieee8023ad_lag",
        Bridge = 209 => "bridge",
        Usb = 160 => "usb",
        Wwanpp = 243 => "wwanpp",
    }
}

domain_enum! {
    /// ifOperStatus.
    pub enum InterfaceStatus: InterfaceStatus {
        Up = 1 => "up",
        Down = 2 => "down",
        Testing = 3 => "testing",
        Unknown = 4 => "unknown",
        Dormant = 5 => "dormant",
        NotPresent = 6 => "not_present",
        LowerLayerDown = 7 => "lower_layer_down",
    }
}
