//! Static quirk library
//!
//! The versioned collection of quirk definitions the runtime loads once at
//! process start, plus the cluster registry carrying the vendor contracts
//! they reference. Definitions are plain data built by constructor
//! functions; shared trigger tables live in the vendor modules and are
//! merged by value into each device's table.

pub mod aqara_h1;
pub mod xiaomi;

use quirk_engine::QuirkDefinition;
use zcl_registry::ClusterRegistry;

/// All quirk definitions, in declaration order
#[must_use]
pub fn quirks() -> Vec<QuirkDefinition> {
    aqara_h1::quirks()
}

/// Cluster registry with every vendor contract the library references
#[must_use]
pub fn cluster_registry() -> ClusterRegistry {
    xiaomi::cluster_registry()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quirk_engine::{
        DeviceRuntime, FrameDisposition, Gesture, MatchPolicy, RawEndpoint, Target,
    };
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn runtime() -> DeviceRuntime {
        DeviceRuntime::new(quirks(), Arc::new(cluster_registry()), MatchPolicy::Exact).unwrap()
    }

    fn green_power_raw() -> RawEndpoint {
        RawEndpoint {
            profile_id: 0xA1E0,
            device_type: 0x0061,
            input_clusters: vec![],
            output_clusters: vec![0x0021],
        }
    }

    /// Raw layout of a `lumi.switch.l1aeu1` as first shipped
    fn single_rocker_raw() -> BTreeMap<u8, RawEndpoint> {
        let mut endpoints = BTreeMap::new();
        endpoints.insert(
            1,
            RawEndpoint {
                profile_id: 0x0104,
                device_type: 0x0100,
                input_clusters: vec![0, 2, 3, 4, 5, 6, 9],
                output_clusters: vec![10, 25],
            },
        );
        endpoints.insert(242, green_power_raw());
        endpoints
    }

    /// Raw layout of a `lumi.switch.l2aeu1`
    fn double_rocker_raw() -> BTreeMap<u8, RawEndpoint> {
        let mut endpoints = single_rocker_raw();
        endpoints.insert(
            2,
            RawEndpoint {
                profile_id: 0x0104,
                device_type: 0x0100,
                input_clusters: vec![0, 3, 4, 5, 6],
                output_clusters: vec![],
            },
        );
        endpoints
    }

    fn join_double_rocker(runtime: &DeviceRuntime, ieee: [u8; 8]) {
        let model = runtime.device_joined(
            ieee,
            Some("LUMI".to_string()),
            Some("lumi.switch.l2aeu1".to_string()),
            &double_rocker_raw(),
        );
        assert_eq!(model.quirk.as_deref(), Some("aqara_h1_double_rocker_no_neutral"));
    }

    #[test]
    fn test_single_rocker_short_press() {
        let runtime = runtime();
        let model = runtime.device_joined(
            [1u8; 8],
            Some("LUMI".to_string()),
            Some("lumi.switch.l1aeu1".to_string()),
            &single_rocker_raw(),
        );
        assert_eq!(
            model.quirk.as_deref(),
            Some("aqara_h1_single_rocker_no_neutral")
        );
        // Logical button endpoint 41 synthesized from endpoint 1's data.
        assert!(model.endpoints.contains_key(&41));

        assert_eq!(
            runtime.handle_frame([1u8; 8], 41, 18, 0x0055, 1).unwrap(),
            FrameDisposition::Trigger {
                gesture: Gesture::ShortPress,
                target: Target::Button
            }
        );
    }

    #[test]
    fn test_double_rocker_right_and_both() {
        let runtime = runtime();
        join_double_rocker(&runtime, [2u8; 8]);

        assert_eq!(
            runtime.handle_frame([2u8; 8], 42, 18, 85, 2).unwrap(),
            FrameDisposition::Trigger {
                gesture: Gesture::DoublePress,
                target: Target::Right
            }
        );
        assert_eq!(
            runtime.handle_frame([2u8; 8], 51, 18, 85, 1).unwrap(),
            FrameDisposition::Trigger {
                gesture: Gesture::ShortPress,
                target: Target::BothButtons
            }
        );
    }

    #[test]
    fn test_double_rocker_hold_any_button() {
        let runtime = runtime();
        join_double_rocker(&runtime, [3u8; 8]);

        assert_eq!(
            runtime.handle_frame([3u8; 8], 1, 64704, 252, 0).unwrap(),
            FrameDisposition::Trigger {
                gesture: Gesture::LongPress,
                target: Target::AnyButton
            }
        );
    }

    #[test]
    fn test_telemetry_passes_through() {
        let runtime = runtime();
        join_double_rocker(&runtime, [4u8; 8]);

        // Device temperature report on the physical endpoint.
        assert_eq!(
            runtime.handle_frame([4u8; 8], 1, 2, 0x0000, 23).unwrap(),
            FrameDisposition::PassThrough
        );
    }

    #[test]
    fn test_unknown_device_exposed_raw() {
        let runtime = runtime();
        let mut raw = BTreeMap::new();
        raw.insert(
            1,
            RawEndpoint {
                profile_id: 0x0104,
                device_type: 0x0107,
                input_clusters: vec![0, 3, 0x0406],
                output_clusters: vec![],
            },
        );
        let model = runtime.device_joined(
            [5u8; 8],
            Some("SomeVendor".to_string()),
            Some("occupancy.sensor".to_string()),
            &raw,
        );

        assert!(model.quirk.is_none());
        assert_eq!(model.endpoints[&1], raw[&1].to_descriptor());
        assert_eq!(
            runtime.handle_frame([5u8; 8], 1, 0x0406, 0x0000, 1).unwrap(),
            FrameDisposition::PassThrough
        );
    }

    #[test]
    fn test_alt_variants_match_in_declared_order() {
        // Firmware variant layout: vendor clusters advertised on endpoint 1.
        let mut raw = BTreeMap::new();
        raw.insert(
            1,
            RawEndpoint {
                profile_id: 0x0104,
                device_type: 0x0100,
                input_clusters: vec![0, 2, 3, 4, 5, 6, 18, 0xFCC0],
                output_clusters: vec![10, 25],
            },
        );
        raw.insert(242, green_power_raw());

        let runtime = runtime();
        let model = runtime.device_joined(
            [6u8; 8],
            Some("LUMI".to_string()),
            Some("lumi.switch.l1aeu1".to_string()),
            &raw,
        );
        assert_eq!(
            model.quirk.as_deref(),
            Some("aqara_h1_single_rocker_no_neutral_alt1")
        );
    }

    #[test]
    fn test_reapplying_quirk_is_idempotent() {
        use quirk_engine::{apply_quirk, LiveDeviceModel};

        let registry = cluster_registry();
        for quirk in quirks() {
            let mut model =
                LiveDeviceModel::from_raw([7u8; 8], None, None, &double_rocker_raw());
            let faults = apply_quirk(&mut model, &quirk, &registry);
            assert!(faults.is_empty(), "quirk '{}' has faults", quirk.name);
            let mut again = model.clone();
            apply_quirk(&mut again, &quirk, &registry);
            assert_eq!(model, again, "quirk '{}' not idempotent", quirk.name);
        }
    }
}
