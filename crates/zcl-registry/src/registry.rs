//! Cluster contract resolution
//!
//! The registry maps a `(profile, cluster id)` pair to a [`ClusterContract`]
//! describing the cluster's attribute and command surface. Resolution
//! failure is never an error: an unknown cluster id is an opaque
//! passthrough, since many vendor clusters are intentionally undocumented.

use crate::id::{basic_attr, cluster, multistate_attr, profile};
use serde::Serialize;
use std::collections::HashMap;

/// Behavioral contract of one cluster: its attribute and command sets
#[derive(Debug, Clone, Serialize)]
pub struct ClusterContract {
    /// Cluster ID within its profile
    pub cluster_id: u16,
    /// Contract name (e.g., "Basic", "OppleSwitchCluster")
    pub name: String,
    /// Known attributes as (id, name) pairs
    pub attributes: Vec<(u16, &'static str)>,
    /// Known cluster-specific commands as (id, name) pairs
    pub commands: Vec<(u8, &'static str)>,
}

impl ClusterContract {
    /// Create a contract with no documented attributes or commands
    #[must_use]
    pub fn opaque(cluster_id: u16, name: &str) -> Self {
        Self {
            cluster_id,
            name: name.to_string(),
            attributes: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Check whether the contract documents a given attribute
    #[must_use]
    pub fn has_attribute(&self, attr_id: u16) -> bool {
        self.attributes.iter().any(|(id, _)| *id == attr_id)
    }
}

/// Static catalog of cluster contracts, keyed by (profile, cluster id)
#[derive(Debug, Default)]
pub struct ClusterRegistry {
    contracts: HashMap<(u16, u16), ClusterContract>,
}

impl ClusterRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with the standard ZCL contracts
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();

        registry.register(
            profile::ZHA,
            ClusterContract {
                cluster_id: cluster::BASIC,
                name: "Basic".to_string(),
                attributes: vec![
                    (basic_attr::ZCL_VERSION, "zcl_version"),
                    (basic_attr::APPLICATION_VERSION, "application_version"),
                    (basic_attr::HW_VERSION, "hw_version"),
                    (basic_attr::MANUFACTURER_NAME, "manufacturer_name"),
                    (basic_attr::MODEL_IDENTIFIER, "model_identifier"),
                    (basic_attr::POWER_SOURCE, "power_source"),
                ],
                commands: vec![(0x00, "reset_to_factory_defaults")],
            },
        );

        registry.register(
            profile::ZHA,
            ClusterContract {
                cluster_id: cluster::ON_OFF,
                name: "OnOff".to_string(),
                attributes: vec![(0x0000, "on_off")],
                commands: vec![(0x00, "off"), (0x01, "on"), (0x02, "toggle")],
            },
        );

        registry.register(
            profile::ZHA,
            ClusterContract {
                cluster_id: cluster::MULTISTATE_INPUT,
                name: "MultistateInput".to_string(),
                attributes: vec![
                    (multistate_attr::NUMBER_OF_STATES, "number_of_states"),
                    (multistate_attr::PRESENT_VALUE, "present_value"),
                    (multistate_attr::STATUS_FLAGS, "status_flags"),
                ],
                commands: vec![],
            },
        );

        registry.register(
            profile::ZHA,
            ClusterContract {
                cluster_id: cluster::IDENTIFY,
                name: "Identify".to_string(),
                attributes: vec![(0x0000, "identify_time")],
                commands: vec![(0x00, "identify"), (0x01, "identify_query")],
            },
        );

        for (cluster_id, name) in [
            (cluster::POWER_CONFIG, "PowerConfiguration"),
            (cluster::DEVICE_TEMP, "DeviceTemperature"),
            (cluster::GROUPS, "Groups"),
            (cluster::SCENES, "Scenes"),
            (cluster::ON_OFF_SWITCH_CONFIG, "OnOffSwitchConfiguration"),
            (cluster::LEVEL_CONTROL, "LevelControl"),
            (cluster::ALARMS, "Alarms"),
            (cluster::TIME, "Time"),
            (cluster::OTA, "Ota"),
            (cluster::METERING, "Metering"),
            (cluster::ELECTRICAL_MEASUREMENT, "ElectricalMeasurement"),
        ] {
            registry.register(profile::ZHA, ClusterContract::opaque(cluster_id, name));
        }

        registry.register(
            profile::ZGP,
            ClusterContract::opaque(cluster::GREEN_POWER, "GreenPowerProxy"),
        );

        registry
    }

    /// Register a contract, replacing any existing entry for the same id
    pub fn register(&mut self, profile_id: u16, contract: ClusterContract) {
        self.contracts
            .insert((profile_id, contract.cluster_id), contract);
    }

    /// Resolve a (profile, cluster id) pair to its contract
    ///
    /// Returns `None` for unknown clusters; callers treat that as an
    /// opaque passthrough, not a failure.
    #[must_use]
    pub fn resolve(&self, profile_id: u16, cluster_id: u16) -> Option<&ClusterContract> {
        self.contracts.get(&(profile_id, cluster_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_resolves_on_off() {
        let registry = ClusterRegistry::standard();
        let contract = registry.resolve(profile::ZHA, cluster::ON_OFF).unwrap();
        assert_eq!(contract.name, "OnOff");
        assert!(contract.has_attribute(0x0000));
    }

    #[test]
    fn test_unknown_cluster_is_none() {
        let registry = ClusterRegistry::standard();
        assert!(registry.resolve(profile::ZHA, 0xFC45).is_none());
    }

    #[test]
    fn test_register_vendor_contract() {
        let mut registry = ClusterRegistry::standard();
        registry.register(profile::ZHA, ClusterContract::opaque(0xFCC0, "OppleSwitchCluster"));
        assert!(registry.resolve(profile::ZHA, 0xFCC0).is_some());
    }

    #[test]
    fn test_green_power_under_zgp_profile_only() {
        let registry = ClusterRegistry::standard();
        assert!(registry.resolve(profile::ZGP, cluster::GREEN_POWER).is_some());
        assert!(registry.resolve(profile::ZHA, cluster::GREEN_POWER).is_none());
    }
}
