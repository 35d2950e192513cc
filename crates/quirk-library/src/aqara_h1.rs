//! Aqara H1 rocker switch quirks
//!
//! Capability overrides for the H1 wall switch family. The switches
//! advertise themselves as on/off lights and hide their button events in
//! vendor clusters; the replacements re-type them as switches and project
//! the multiplexed button channels onto logical endpoints 41/42/51.
//!
//! Declaration order matters: the no-neutral single rocker ships three
//! signature variants for the same model string, tried first to last.

use crate::xiaomi::{
    self, double_rocker_triggers, single_rocker_triggers, LUMI, OPPLE_CLUSTER,
};
use quirk_engine::{
    ClusterRef, DeviceSignature, EndpointDescriptor, ModelInfo, QuirkDefinition,
};
use std::collections::BTreeMap;
use zcl_registry::id::{cluster, device_type, profile, zgp_device_type};

fn numeric(ids: &[u16]) -> Vec<ClusterRef> {
    ids.iter().copied().map(ClusterRef::Numeric).collect()
}

fn zha_endpoint(
    device_type: u16,
    input_clusters: Vec<ClusterRef>,
    output_clusters: Vec<ClusterRef>,
) -> EndpointDescriptor {
    EndpointDescriptor {
        profile_id: profile::ZHA,
        device_type,
        input_clusters,
        output_clusters,
    }
}

/// The Green Power proxy endpoint every H1 advertises
fn green_power_endpoint() -> EndpointDescriptor {
    EndpointDescriptor {
        profile_id: profile::ZGP,
        device_type: zgp_device_type::PROXY_BASIC,
        input_clusters: vec![],
        output_clusters: numeric(&[cluster::GREEN_POWER]),
    }
}

/// Logical button endpoint carrying Multistate Input press reports
fn button_endpoint() -> EndpointDescriptor {
    zha_endpoint(
        device_type::ON_OFF_SWITCH,
        vec![xiaomi::multistate_input()],
        vec![],
    )
}

fn signature(model: &str, endpoints: Vec<(u8, EndpointDescriptor)>) -> DeviceSignature {
    DeviceSignature {
        models: vec![ModelInfo::new(LUMI, model)],
        endpoints: endpoints.into_iter().collect(),
    }
}

/// Replacement for the single rocker switches
///
/// `metered` adds the metering/electrical-measurement clusters present on
/// the with-neutral variant.
fn single_rocker_replacement(metered: bool) -> BTreeMap<u8, EndpointDescriptor> {
    let mut input = vec![
        xiaomi::xiaomi_basic(),
        ClusterRef::Numeric(cluster::DEVICE_TEMP),
        ClusterRef::Numeric(cluster::IDENTIFY),
        ClusterRef::Numeric(cluster::GROUPS),
        ClusterRef::Numeric(cluster::SCENES),
        xiaomi::xiaomi_on_off(),
        ClusterRef::Numeric(cluster::ALARMS),
        xiaomi::multistate_input(),
    ];
    if metered {
        input.push(ClusterRef::Numeric(cluster::METERING));
        input.push(xiaomi::opple_switch());
        input.push(ClusterRef::Numeric(cluster::ELECTRICAL_MEASUREMENT));
    } else {
        input.push(xiaomi::opple_switch());
    }

    [
        (
            1,
            zha_endpoint(
                device_type::ON_OFF_SWITCH,
                input,
                numeric(&[cluster::TIME, cluster::OTA]),
            ),
        ),
        (41, button_endpoint()),
        (242, green_power_endpoint()),
    ]
    .into_iter()
    .collect()
}

/// Replacement for the double rocker switches
fn double_rocker_replacement(metered: bool) -> BTreeMap<u8, EndpointDescriptor> {
    let mut replacement = single_rocker_replacement(metered);
    replacement.insert(
        2,
        zha_endpoint(
            device_type::ON_OFF_SWITCH,
            vec![
                ClusterRef::Numeric(cluster::BASIC),
                ClusterRef::Numeric(cluster::IDENTIFY),
                ClusterRef::Numeric(cluster::GROUPS),
                ClusterRef::Numeric(cluster::SCENES),
                ClusterRef::Numeric(cluster::ON_OFF),
                xiaomi::multistate_input(),
                xiaomi::opple_switch(),
            ],
            vec![],
        ),
    );
    replacement.insert(42, button_endpoint());
    replacement.insert(51, button_endpoint());
    replacement
}

/// H1 single rocker, with neutral (`lumi.switch.n1aeu1`)
fn single_rocker_with_neutral() -> QuirkDefinition {
    QuirkDefinition {
        name: "aqara_h1_single_rocker_with_neutral".to_string(),
        signature: signature(
            "lumi.switch.n1aeu1",
            vec![
                (
                    1,
                    zha_endpoint(
                        device_type::ON_OFF_LIGHT,
                        numeric(&[
                            cluster::BASIC,
                            cluster::DEVICE_TEMP,
                            cluster::IDENTIFY,
                            cluster::GROUPS,
                            cluster::SCENES,
                            cluster::ON_OFF,
                            cluster::ALARMS,
                            cluster::METERING,
                            cluster::ELECTRICAL_MEASUREMENT,
                        ]),
                        numeric(&[cluster::TIME, cluster::OTA]),
                    ),
                ),
                (242, green_power_endpoint()),
            ],
        ),
        replacement: single_rocker_replacement(true),
        triggers: single_rocker_triggers(),
    }
}

/// H1 single rocker, no neutral (`lumi.switch.l1aeu1`)
fn single_rocker_no_neutral() -> QuirkDefinition {
    QuirkDefinition {
        name: "aqara_h1_single_rocker_no_neutral".to_string(),
        signature: signature(
            "lumi.switch.l1aeu1",
            vec![
                (
                    1,
                    zha_endpoint(
                        device_type::ON_OFF_LIGHT,
                        numeric(&[
                            cluster::BASIC,
                            cluster::DEVICE_TEMP,
                            cluster::IDENTIFY,
                            cluster::GROUPS,
                            cluster::SCENES,
                            cluster::ON_OFF,
                            cluster::ALARMS,
                        ]),
                        numeric(&[cluster::TIME, cluster::OTA]),
                    ),
                ),
                (242, green_power_endpoint()),
            ],
        ),
        replacement: single_rocker_replacement(false),
        triggers: single_rocker_triggers(),
    }
}

/// Signature endpoint shared by the two no-neutral firmware variants
fn no_neutral_variant_endpoint1() -> EndpointDescriptor {
    zha_endpoint(
        device_type::ON_OFF_LIGHT,
        numeric(&[
            cluster::BASIC,
            cluster::DEVICE_TEMP,
            cluster::IDENTIFY,
            cluster::GROUPS,
            cluster::SCENES,
            cluster::ON_OFF,
            cluster::MULTISTATE_INPUT,
            OPPLE_CLUSTER,
        ]),
        numeric(&[cluster::TIME, cluster::OTA]),
    )
}

/// `lumi.switch.l1aeu1` firmware variant 1: advertises the vendor clusters
fn single_rocker_no_neutral_alt1() -> QuirkDefinition {
    QuirkDefinition {
        name: "aqara_h1_single_rocker_no_neutral_alt1".to_string(),
        signature: signature(
            "lumi.switch.l1aeu1",
            vec![
                (1, no_neutral_variant_endpoint1()),
                (242, green_power_endpoint()),
            ],
        ),
        replacement: single_rocker_replacement(false),
        triggers: single_rocker_triggers(),
    }
}

/// `lumi.switch.l1aeu1` firmware variant 2: additionally reports endpoint 41
fn single_rocker_no_neutral_alt2() -> QuirkDefinition {
    QuirkDefinition {
        name: "aqara_h1_single_rocker_no_neutral_alt2".to_string(),
        signature: signature(
            "lumi.switch.l1aeu1",
            vec![
                (1, no_neutral_variant_endpoint1()),
                (
                    41,
                    zha_endpoint(
                        device_type::ON_OFF_LIGHT,
                        numeric(&[cluster::MULTISTATE_INPUT]),
                        vec![],
                    ),
                ),
                (242, green_power_endpoint()),
            ],
        ),
        replacement: single_rocker_replacement(false),
        triggers: single_rocker_triggers(),
    }
}

/// Signature endpoint 2 shared by the double rocker switches
fn double_rocker_endpoint2() -> EndpointDescriptor {
    zha_endpoint(
        device_type::ON_OFF_LIGHT,
        numeric(&[
            cluster::BASIC,
            cluster::IDENTIFY,
            cluster::GROUPS,
            cluster::SCENES,
            cluster::ON_OFF,
        ]),
        vec![],
    )
}

/// H1 double rocker, no neutral (`lumi.switch.l2aeu1`)
fn double_rocker_no_neutral() -> QuirkDefinition {
    QuirkDefinition {
        name: "aqara_h1_double_rocker_no_neutral".to_string(),
        signature: signature(
            "lumi.switch.l2aeu1",
            vec![
                (
                    1,
                    zha_endpoint(
                        device_type::ON_OFF_LIGHT,
                        numeric(&[
                            cluster::BASIC,
                            cluster::DEVICE_TEMP,
                            cluster::IDENTIFY,
                            cluster::GROUPS,
                            cluster::SCENES,
                            cluster::ON_OFF,
                            cluster::ALARMS,
                        ]),
                        numeric(&[cluster::TIME, cluster::OTA]),
                    ),
                ),
                (2, double_rocker_endpoint2()),
                (242, green_power_endpoint()),
            ],
        ),
        replacement: double_rocker_replacement(false),
        triggers: double_rocker_triggers(),
    }
}

/// H1 double rocker, with neutral (`lumi.switch.n2aeu1`)
fn double_rocker_with_neutral() -> QuirkDefinition {
    QuirkDefinition {
        name: "aqara_h1_double_rocker_with_neutral".to_string(),
        signature: signature(
            "lumi.switch.n2aeu1",
            vec![
                (
                    1,
                    zha_endpoint(
                        device_type::ON_OFF_LIGHT,
                        numeric(&[
                            cluster::BASIC,
                            cluster::DEVICE_TEMP,
                            cluster::IDENTIFY,
                            cluster::GROUPS,
                            cluster::SCENES,
                            cluster::ON_OFF,
                            cluster::ALARMS,
                            cluster::METERING,
                            cluster::ELECTRICAL_MEASUREMENT,
                        ]),
                        numeric(&[cluster::TIME, cluster::OTA]),
                    ),
                ),
                (2, double_rocker_endpoint2()),
                (242, green_power_endpoint()),
            ],
        ),
        replacement: double_rocker_replacement(true),
        triggers: double_rocker_triggers(),
    }
}

/// All H1 quirks, in declaration order (load-bearing for Alt variants)
#[must_use]
pub fn quirks() -> Vec<QuirkDefinition> {
    vec![
        single_rocker_with_neutral(),
        single_rocker_no_neutral(),
        single_rocker_no_neutral_alt1(),
        single_rocker_no_neutral_alt2(),
        double_rocker_no_neutral(),
        double_rocker_with_neutral(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_quirks_validate() {
        for quirk in quirks() {
            quirk.validate().unwrap();
        }
    }

    #[test]
    fn test_double_rocker_synthesizes_button_endpoints() {
        let quirk = double_rocker_no_neutral();
        for endpoint in [41, 42, 51] {
            let desc = &quirk.replacement[&endpoint];
            assert_eq!(desc.device_type, device_type::ON_OFF_SWITCH);
            assert!(desc.has_cluster(cluster::MULTISTATE_INPUT));
        }
        // Synthesized endpoints are absent from the signature.
        assert!(!quirk.signature.endpoints.contains_key(&42));
        assert!(!quirk.signature.endpoints.contains_key(&51));
    }

    #[test]
    fn test_replacement_retypes_light_as_switch() {
        let quirk = single_rocker_with_neutral();
        assert_eq!(
            quirk.signature.endpoints[&1].device_type,
            device_type::ON_OFF_LIGHT
        );
        assert_eq!(quirk.replacement[&1].device_type, device_type::ON_OFF_SWITCH);
        // Replacement keeps a profile on every endpoint it touches.
        for desc in quirk.replacement.values() {
            assert_ne!(desc.profile_id, 0);
        }
    }

    #[test]
    fn test_metered_variants_keep_measurement_clusters() {
        let quirk = double_rocker_with_neutral();
        let ep1 = &quirk.replacement[&1];
        assert!(ep1.has_cluster(cluster::METERING));
        assert!(ep1.has_cluster(cluster::ELECTRICAL_MEASUREMENT));

        let unmetered = double_rocker_no_neutral();
        assert!(!unmetered.replacement[&1].has_cluster(cluster::METERING));
    }
}
