//! ZCL identifier constants

/// Application profile IDs
pub mod profile {
    /// Zigbee Home Automation
    pub const ZHA: u16 = 0x0104;
    /// Zigbee Green Power
    pub const ZGP: u16 = 0xA1E0;
}

/// Device type IDs within the ZHA profile
pub mod device_type {
    pub const ON_OFF_SWITCH: u16 = 0x0000;
    pub const LEVEL_CONTROL_SWITCH: u16 = 0x0001;
    pub const ON_OFF_OUTPUT: u16 = 0x0002;
    pub const ON_OFF_LIGHT: u16 = 0x0100;
    pub const DIMMABLE_LIGHT: u16 = 0x0101;
    pub const COLOR_DIMMABLE_LIGHT: u16 = 0x0102;
    pub const OCCUPANCY_SENSOR: u16 = 0x0107;
}

/// Device type IDs within the ZGP profile
pub mod zgp_device_type {
    pub const PROXY_BASIC: u16 = 0x0061;
}

/// Common ZCL cluster IDs
pub mod cluster {
    // General Clusters
    pub const BASIC: u16 = 0x0000;
    pub const POWER_CONFIG: u16 = 0x0001;
    pub const DEVICE_TEMP: u16 = 0x0002;
    pub const IDENTIFY: u16 = 0x0003;
    pub const GROUPS: u16 = 0x0004;
    pub const SCENES: u16 = 0x0005;
    pub const ON_OFF: u16 = 0x0006;
    pub const ON_OFF_SWITCH_CONFIG: u16 = 0x0007;
    pub const LEVEL_CONTROL: u16 = 0x0008;
    pub const ALARMS: u16 = 0x0009;
    pub const TIME: u16 = 0x000A;
    pub const MULTISTATE_INPUT: u16 = 0x0012;
    pub const OTA: u16 = 0x0019;
    pub const GREEN_POWER: u16 = 0x0021;

    // Measurement Clusters
    pub const TEMPERATURE_MEASUREMENT: u16 = 0x0402;
    pub const HUMIDITY_MEASUREMENT: u16 = 0x0405;
    pub const OCCUPANCY_SENSING: u16 = 0x0406;

    // Smart Energy
    pub const METERING: u16 = 0x0702;
    pub const ELECTRICAL_MEASUREMENT: u16 = 0x0B04;
}

/// Basic cluster attributes
pub mod basic_attr {
    pub const ZCL_VERSION: u16 = 0x0000;
    pub const APPLICATION_VERSION: u16 = 0x0001;
    pub const HW_VERSION: u16 = 0x0003;
    pub const MANUFACTURER_NAME: u16 = 0x0004;
    pub const MODEL_IDENTIFIER: u16 = 0x0005;
    pub const POWER_SOURCE: u16 = 0x0007;
}

/// Multistate Input cluster attributes
pub mod multistate_attr {
    pub const NUMBER_OF_STATES: u16 = 0x004A;
    pub const PRESENT_VALUE: u16 = 0x0055;
    pub const STATUS_FLAGS: u16 = 0x006F;
}
