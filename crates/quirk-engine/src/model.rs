//! Data model for quirk definitions and live devices

use crate::error::QuirkError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A reference to one cluster within an endpoint descriptor
///
/// Quirk tables mix plain numeric ids (opaque passthrough) with references
/// to concrete cluster implementations in the same list, so this is a
/// tagged variant rather than dynamic inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClusterRef {
    /// Bare cluster id with no attached implementation
    Numeric(u16),
    /// Reference to a registered cluster implementation
    Implementation(ContractHandle),
}

impl ClusterRef {
    /// Reference a registered cluster implementation by name and id
    #[must_use]
    pub fn implementation(contract: &str, cluster_id: u16) -> Self {
        Self::Implementation(ContractHandle {
            cluster_id,
            contract: contract.to_string(),
        })
    }

    /// The cluster id this reference resolves to on the wire
    #[must_use]
    pub fn cluster_id(&self) -> u16 {
        match self {
            Self::Numeric(id) => *id,
            Self::Implementation(handle) => handle.cluster_id,
        }
    }
}

/// Identity of a concrete cluster implementation
///
/// The engine only needs the identity; attribute/command schemas live in
/// the cluster registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractHandle {
    /// Cluster ID the implementation binds to
    pub cluster_id: u16,
    /// Registered contract name (e.g., "OppleSwitchCluster")
    pub contract: String,
}

/// One endpoint's advertised (or corrected) capability layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    /// Profile ID (e.g., 0x0104 for Home Automation)
    pub profile_id: u16,
    /// Device type ID within the profile
    pub device_type: u16,
    /// Input (server) clusters, in declared order
    pub input_clusters: Vec<ClusterRef>,
    /// Output (client) clusters, in declared order
    pub output_clusters: Vec<ClusterRef>,
}

impl EndpointDescriptor {
    /// Check if the descriptor lists a specific cluster id
    #[must_use]
    pub fn has_cluster(&self, cluster_id: u16) -> bool {
        self.input_clusters.iter().any(|c| c.cluster_id() == cluster_id)
            || self.output_clusters.iter().any(|c| c.cluster_id() == cluster_id)
    }

    /// Input cluster ids as a set (order-insensitive)
    #[must_use]
    pub fn input_cluster_ids(&self) -> HashSet<u16> {
        self.input_clusters.iter().map(ClusterRef::cluster_id).collect()
    }

    /// Output cluster ids as a set (order-insensitive)
    #[must_use]
    pub fn output_cluster_ids(&self) -> HashSet<u16> {
        self.output_clusters.iter().map(ClusterRef::cluster_id).collect()
    }
}

/// Manufacturer/model identity pair from the Basic cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub manufacturer: String,
    pub model: String,
}

impl ModelInfo {
    #[must_use]
    pub fn new(manufacturer: &str, model: &str) -> Self {
        Self {
            manufacturer: manufacturer.to_string(),
            model: model.to_string(),
        }
    }
}

/// The capability layout a quirk expects a device to advertise on join
///
/// Signatures are allowed to be partial: endpoints the raw device reports
/// beyond those listed here do not disqualify a match. An empty model list
/// matches any identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSignature {
    /// Accepted (manufacturer, model) pairs
    pub models: Vec<ModelInfo>,
    /// Expected endpoint layout, keyed by endpoint id
    pub endpoints: BTreeMap<u8, EndpointDescriptor>,
}

/// A raw endpoint as reported by the device itself (simple descriptor)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEndpoint {
    /// Profile ID
    pub profile_id: u16,
    /// Device type ID within the profile
    pub device_type: u16,
    /// Input (server) cluster ids
    pub input_clusters: Vec<u16>,
    /// Output (client) cluster ids
    pub output_clusters: Vec<u16>,
}

impl RawEndpoint {
    /// Convert to a descriptor of opaque numeric cluster refs
    #[must_use]
    pub fn to_descriptor(&self) -> EndpointDescriptor {
        EndpointDescriptor {
            profile_id: self.profile_id,
            device_type: self.device_type,
            input_clusters: self.input_clusters.iter().copied().map(ClusterRef::Numeric).collect(),
            output_clusters: self
                .output_clusters
                .iter()
                .copied()
                .map(ClusterRef::Numeric)
                .collect(),
        }
    }
}

/// Canonical button gesture kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    ShortPress,
    DoublePress,
    LongPress,
}

/// Which physical button (or combination) a gesture targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// The single button of a one-button device
    Button,
    Left,
    Right,
    BothButtons,
    /// Any button (devices that report holds without saying which side)
    AnyButton,
}

/// Press type tag carried in the vendor frame's argument template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressType {
    Single,
    Double,
    Hold,
}

/// Key of one trigger entry: unique within a quirk's trigger table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerKey {
    pub gesture: Gesture,
    pub target: Target,
}

impl TriggerKey {
    #[must_use]
    pub fn new(gesture: Gesture, target: Target) -> Self {
        Self { gesture, target }
    }
}

impl std::fmt::Display for TriggerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.gesture, self.target)
    }
}

/// How one gesture shows up on the wire, and how to match it
///
/// The same template serves both directions: matching incoming frames by
/// exact tuple equality, and synthesizing the outward event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSpec {
    /// Effective (post-replacement) endpoint the frame arrives on
    pub endpoint_id: u8,
    /// Effective cluster id the frame arrives on
    pub cluster_id: u16,
    /// Vendor command name (e.g., "41_single")
    pub command: String,
    /// Attribute id carried in the report
    pub attr_id: u16,
    /// Press type tag in the argument template
    pub press_type: PressType,
    /// Expected attribute value, matched by exact equality (1=single,
    /// 2=double, 0=hold), never by range
    pub value: u32,
}

/// One declarative capability override for a family of devices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuirkDefinition {
    /// Quirk name, unique within the library
    pub name: String,
    /// Layout the raw device must advertise for this quirk to apply
    pub signature: DeviceSignature,
    /// Corrected layout, keyed by endpoint id; endpoints absent from the
    /// signature may be introduced here (synthesized logical endpoints)
    pub replacement: BTreeMap<u8, EndpointDescriptor>,
    /// Trigger table in declared order; keys unique within this quirk
    pub triggers: Vec<(TriggerKey, TriggerSpec)>,
}

impl QuirkDefinition {
    /// Validate structural invariants (trigger key uniqueness)
    pub fn validate(&self) -> Result<(), QuirkError> {
        let mut seen = HashSet::new();
        for (key, _) in &self.triggers {
            if !seen.insert(*key) {
                return Err(QuirkError::DuplicateTriggerKey {
                    quirk: self.name.clone(),
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Runtime model of one joined physical device
///
/// Created on join, rewritten in place once by the replacement engine, and
/// destroyed on removal. Frame handling never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveDeviceModel {
    /// IEEE address (EUI-64)
    pub ieee_address: [u8; 8],
    /// Manufacturer name (from Basic cluster)
    pub manufacturer: Option<String>,
    /// Model identifier (from Basic cluster)
    pub model: Option<String>,
    /// Effective endpoint map (post-replacement)
    pub endpoints: BTreeMap<u8, EndpointDescriptor>,
    /// Name of the applied quirk, if any
    pub quirk: Option<String>,
}

impl LiveDeviceModel {
    /// Create a model exposing the raw, unmodified layout
    #[must_use]
    pub fn from_raw(
        ieee_address: [u8; 8],
        manufacturer: Option<String>,
        model: Option<String>,
        raw_endpoints: &BTreeMap<u8, RawEndpoint>,
    ) -> Self {
        Self {
            ieee_address,
            manufacturer,
            model,
            endpoints: raw_endpoints
                .iter()
                .map(|(id, ep)| (*id, ep.to_descriptor()))
                .collect(),
            quirk: None,
        }
    }

    /// Get IEEE address as hex string
    #[must_use]
    pub fn ieee_address_string(&self) -> String {
        self.ieee_address
            .iter()
            .rev() // IEEE addresses are typically displayed in reverse byte order
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(":")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(endpoint: u8, value: u32) -> TriggerSpec {
        TriggerSpec {
            endpoint_id: endpoint,
            cluster_id: 18,
            command: format!("{endpoint}_single"),
            attr_id: 0x0055,
            press_type: PressType::Single,
            value,
        }
    }

    #[test]
    fn test_duplicate_trigger_key_rejected() {
        let quirk = QuirkDefinition {
            name: "dup".to_string(),
            signature: DeviceSignature {
                models: vec![],
                endpoints: BTreeMap::new(),
            },
            replacement: BTreeMap::new(),
            triggers: vec![
                (TriggerKey::new(Gesture::ShortPress, Target::Button), spec(41, 1)),
                (TriggerKey::new(Gesture::ShortPress, Target::Button), spec(42, 1)),
            ],
        };
        assert!(matches!(
            quirk.validate(),
            Err(QuirkError::DuplicateTriggerKey { .. })
        ));
    }

    #[test]
    fn test_cluster_ref_id() {
        assert_eq!(ClusterRef::Numeric(6).cluster_id(), 6);
        assert_eq!(
            ClusterRef::implementation("OppleSwitchCluster", 0xFCC0).cluster_id(),
            0xFCC0
        );
    }

    #[test]
    fn test_ieee_address_string() {
        let model = LiveDeviceModel::from_raw(
            [0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11, 0x00],
            None,
            None,
            &BTreeMap::new(),
        );
        assert_eq!(model.ieee_address_string(), "00:11:22:33:44:55:66:77");
    }

    #[test]
    fn test_model_serializes() {
        let raw = RawEndpoint {
            profile_id: 0x0104,
            device_type: 0x0100,
            input_clusters: vec![0, 6],
            output_clusters: vec![0x0019],
        };
        let mut endpoints = BTreeMap::new();
        endpoints.insert(1, raw);
        let model = LiveDeviceModel::from_raw([0u8; 8], None, Some("x".to_string()), &endpoints);
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["endpoints"]["1"]["profile_id"], 0x0104);
    }
}
