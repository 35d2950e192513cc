//! Xiaomi/Aqara vendor definitions
//!
//! Vendor cluster contracts, command names and the shared rocker-switch
//! trigger tables. The trigger tables are named builders merged by value
//! into each device's quirk, not inherited behavior.

use quirk_engine::{ClusterRef, Gesture, PressType, Target, TriggerKey, TriggerSpec};
use zcl_registry::id::{cluster, multistate_attr, profile};
use zcl_registry::{ClusterContract, ClusterRegistry};

/// Manufacturer name reported in the Basic cluster
pub const LUMI: &str = "LUMI";

/// Aqara "Opple" vendor cluster (0xFCC0)
pub const OPPLE_CLUSTER: u16 = 0xFCC0;

/// Attribute carrying the hold press on the Opple cluster
pub const OPPLE_HOLD_ATTR: u16 = 0x00FC;

// Vendor command names as they appear in automation trigger payloads.
pub const COMMAND_41_SINGLE: &str = "41_single";
pub const COMMAND_41_DOUBLE: &str = "41_double";
pub const COMMAND_42_SINGLE: &str = "42_single";
pub const COMMAND_42_DOUBLE: &str = "42_double";
pub const COMMAND_51_SINGLE: &str = "51_single";
pub const COMMAND_51_DOUBLE: &str = "51_double";
pub const COMMAND_1_HOLD: &str = "1_hold";

/// Xiaomi variant of the Basic cluster (vendor attribute reports)
#[must_use]
pub fn xiaomi_basic() -> ClusterRef {
    ClusterRef::implementation("XiaomiBasic", cluster::BASIC)
}

/// Xiaomi variant of the OnOff cluster
#[must_use]
pub fn xiaomi_on_off() -> ClusterRef {
    ClusterRef::implementation("XiaomiOnOff", cluster::ON_OFF)
}

/// Multistate Input cluster carrying per-button press counts
#[must_use]
pub fn multistate_input() -> ClusterRef {
    ClusterRef::implementation("MultistateInput", cluster::MULTISTATE_INPUT)
}

/// Aqara Opple switch configuration cluster
#[must_use]
pub fn opple_switch() -> ClusterRef {
    ClusterRef::implementation("OppleSwitch", OPPLE_CLUSTER)
}

/// Cluster registry with the Xiaomi vendor contracts registered
#[must_use]
pub fn cluster_registry() -> ClusterRegistry {
    let mut registry = ClusterRegistry::standard();
    registry.register(
        profile::ZHA,
        ClusterContract {
            cluster_id: OPPLE_CLUSTER,
            name: "OppleSwitch".to_string(),
            attributes: vec![
                (0x0009, "mode"),
                (0x000A, "switch_type"),
                (OPPLE_HOLD_ATTR, "hold"),
            ],
            commands: vec![],
        },
    );
    registry
}

fn trigger(
    gesture: Gesture,
    target: Target,
    endpoint_id: u8,
    cluster_id: u16,
    command: &str,
    attr_id: u16,
    press_type: PressType,
    value: u32,
) -> (TriggerKey, TriggerSpec) {
    (
        TriggerKey::new(gesture, target),
        TriggerSpec {
            endpoint_id,
            cluster_id,
            command: command.to_string(),
            attr_id,
            press_type,
            value,
        },
    )
}

/// Trigger table shared by the H1 single rocker switches
///
/// Presses arrive as Multistate Input present-value reports on logical
/// endpoint 41; holds arrive once per hold on the Opple cluster of the
/// physical endpoint 1.
#[must_use]
pub fn single_rocker_triggers() -> Vec<(TriggerKey, TriggerSpec)> {
    vec![
        trigger(
            Gesture::ShortPress,
            Target::Button,
            41,
            cluster::MULTISTATE_INPUT,
            COMMAND_41_SINGLE,
            multistate_attr::PRESENT_VALUE,
            PressType::Single,
            1,
        ),
        trigger(
            Gesture::DoublePress,
            Target::Button,
            41,
            cluster::MULTISTATE_INPUT,
            COMMAND_41_DOUBLE,
            multistate_attr::PRESENT_VALUE,
            PressType::Double,
            2,
        ),
        trigger(
            Gesture::LongPress,
            Target::Button,
            1,
            OPPLE_CLUSTER,
            COMMAND_1_HOLD,
            OPPLE_HOLD_ATTR,
            PressType::Hold,
            0,
        ),
    ]
}

/// Trigger table shared by the H1 double rocker switches
///
/// Left, right and both-button presses are multiplexed onto logical
/// endpoints 41, 42 and 51.
#[must_use]
pub fn double_rocker_triggers() -> Vec<(TriggerKey, TriggerSpec)> {
    vec![
        trigger(
            Gesture::ShortPress,
            Target::Left,
            41,
            cluster::MULTISTATE_INPUT,
            COMMAND_41_SINGLE,
            multistate_attr::PRESENT_VALUE,
            PressType::Single,
            1,
        ),
        trigger(
            Gesture::DoublePress,
            Target::Left,
            41,
            cluster::MULTISTATE_INPUT,
            COMMAND_41_DOUBLE,
            multistate_attr::PRESENT_VALUE,
            PressType::Double,
            2,
        ),
        trigger(
            Gesture::ShortPress,
            Target::Right,
            42,
            cluster::MULTISTATE_INPUT,
            COMMAND_42_SINGLE,
            multistate_attr::PRESENT_VALUE,
            PressType::Single,
            1,
        ),
        trigger(
            Gesture::DoublePress,
            Target::Right,
            42,
            cluster::MULTISTATE_INPUT,
            COMMAND_42_DOUBLE,
            multistate_attr::PRESENT_VALUE,
            PressType::Double,
            2,
        ),
        trigger(
            Gesture::ShortPress,
            Target::BothButtons,
            51,
            cluster::MULTISTATE_INPUT,
            COMMAND_51_SINGLE,
            multistate_attr::PRESENT_VALUE,
            PressType::Single,
            1,
        ),
        trigger(
            Gesture::DoublePress,
            Target::BothButtons,
            51,
            cluster::MULTISTATE_INPUT,
            COMMAND_51_DOUBLE,
            multistate_attr::PRESENT_VALUE,
            PressType::Double,
            2,
        ),
        trigger(
            Gesture::LongPress,
            Target::AnyButton,
            1,
            OPPLE_CLUSTER,
            COMMAND_1_HOLD,
            OPPLE_HOLD_ATTR,
            PressType::Hold,
            0,
        ),
    ]
}
