//! Endpoint replacement
//!
//! Installs a matched quirk's replacement table into the live device model.
//! Each listed endpoint is fully overwritten (never merged), which makes
//! re-application idempotent; endpoints the table does not mention keep
//! their raw descriptors. Endpoints that did not exist on the raw device
//! may be created here, projecting multiplexed sub-channels (a dual
//! rocker's two buttons) onto separate logical endpoints.

use crate::error::QuirkError;
use crate::model::{ClusterRef, EndpointDescriptor, LiveDeviceModel, QuirkDefinition};
use zcl_registry::ClusterRegistry;

/// Apply a quirk's replacement table to the model, in place
///
/// Returns the per-endpoint configuration errors, if any. An endpoint whose
/// descriptor references an unresolvable cluster implementation is left at
/// its raw value; the rest of the table still applies (failure isolation at
/// endpoint granularity).
pub fn apply_quirk(
    model: &mut LiveDeviceModel,
    quirk: &QuirkDefinition,
    registry: &ClusterRegistry,
) -> Vec<QuirkError> {
    let mut faults = Vec::new();

    for (endpoint_id, descriptor) in &quirk.replacement {
        match check_resolvable(*endpoint_id, descriptor, registry) {
            Ok(()) => {
                model.endpoints.insert(*endpoint_id, descriptor.clone());
            }
            Err(fault) => {
                tracing::warn!(
                    "Quirk '{}' endpoint {} falls back to raw layout: {}",
                    quirk.name,
                    endpoint_id,
                    fault
                );
                faults.push(fault);
            }
        }
    }

    model.quirk = Some(quirk.name.clone());
    tracing::info!(
        "Applied quirk '{}' to {}: {} endpoint(s) replaced, {} fault(s)",
        quirk.name,
        model.ieee_address_string(),
        quirk.replacement.len() - faults.len(),
        faults.len()
    );

    faults
}

/// Verify every implementation reference in a descriptor resolves
fn check_resolvable(
    endpoint_id: u8,
    descriptor: &EndpointDescriptor,
    registry: &ClusterRegistry,
) -> Result<(), QuirkError> {
    let refs = descriptor
        .input_clusters
        .iter()
        .chain(descriptor.output_clusters.iter());

    for cluster_ref in refs {
        // Numeric ids are opaque passthrough and always fine.
        if let ClusterRef::Implementation(handle) = cluster_ref {
            if registry
                .resolve(descriptor.profile_id, handle.cluster_id)
                .is_none()
            {
                return Err(QuirkError::UnresolvedContract {
                    endpoint: endpoint_id,
                    cluster_id: handle.cluster_id,
                    contract: handle.contract.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeviceSignature, RawEndpoint};
    use std::collections::BTreeMap;

    fn raw_model() -> LiveDeviceModel {
        let mut endpoints = BTreeMap::new();
        endpoints.insert(
            1,
            RawEndpoint {
                profile_id: 0x0104,
                device_type: 0x0100,
                input_clusters: vec![0, 6],
                output_clusters: vec![10, 25],
            },
        );
        endpoints.insert(
            242,
            RawEndpoint {
                profile_id: 0xA1E0,
                device_type: 0x0061,
                input_clusters: vec![],
                output_clusters: vec![0x0021],
            },
        );
        LiveDeviceModel::from_raw([1u8; 8], None, None, &endpoints)
    }

    fn replacement_quirk(contract: &str) -> QuirkDefinition {
        let mut replacement = BTreeMap::new();
        replacement.insert(
            1,
            EndpointDescriptor {
                profile_id: 0x0104,
                device_type: 0x0000,
                input_clusters: vec![
                    ClusterRef::implementation(contract, 0x0006),
                    ClusterRef::Numeric(18),
                ],
                output_clusters: vec![ClusterRef::Numeric(25)],
            },
        );
        replacement.insert(
            41,
            EndpointDescriptor {
                profile_id: 0x0104,
                device_type: 0x0000,
                input_clusters: vec![ClusterRef::Numeric(18)],
                output_clusters: vec![],
            },
        );
        QuirkDefinition {
            name: "test_quirk".to_string(),
            signature: DeviceSignature {
                models: vec![],
                endpoints: BTreeMap::new(),
            },
            replacement,
            triggers: vec![],
        }
    }

    #[test]
    fn test_apply_overwrites_and_synthesizes() {
        let registry = ClusterRegistry::standard();
        let mut model = raw_model();
        let faults = apply_quirk(&mut model, &replacement_quirk("OnOff"), &registry);

        assert!(faults.is_empty());
        // Endpoint 1 fully overwritten, endpoint 41 synthesized.
        assert_eq!(model.endpoints[&1].device_type, 0x0000);
        assert!(model.endpoints.contains_key(&41));
        assert_eq!(model.quirk.as_deref(), Some("test_quirk"));
    }

    #[test]
    fn test_untouched_endpoints_are_identical() {
        let registry = ClusterRegistry::standard();
        let mut model = raw_model();
        let before_242 = model.endpoints[&242].clone();
        apply_quirk(&mut model, &replacement_quirk("OnOff"), &registry);
        assert_eq!(model.endpoints[&242], before_242);
    }

    #[test]
    fn test_reapplication_is_idempotent() {
        let registry = ClusterRegistry::standard();
        let quirk = replacement_quirk("OnOff");
        let mut once = raw_model();
        apply_quirk(&mut once, &quirk, &registry);
        let mut twice = once.clone();
        apply_quirk(&mut twice, &quirk, &registry);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unresolved_contract_isolated_to_endpoint() {
        let registry = ClusterRegistry::standard();
        let mut model = raw_model();
        let raw_ep1 = model.endpoints[&1].clone();

        // Contract registered under no profile: endpoint 1 must fall back,
        // endpoint 41 (numeric refs only) must still be installed.
        let mut quirk = replacement_quirk("OnOff");
        if let Some(desc) = quirk.replacement.get_mut(&1) {
            desc.input_clusters[0] = ClusterRef::implementation("MissingCluster", 0xFC45);
        }

        let faults = apply_quirk(&mut model, &quirk, &registry);
        assert_eq!(faults.len(), 1);
        assert!(matches!(
            faults[0],
            QuirkError::UnresolvedContract { endpoint: 1, .. }
        ));
        assert_eq!(model.endpoints[&1], raw_ep1);
        assert!(model.endpoints.contains_key(&41));
    }
}
