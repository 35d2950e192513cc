//! Device runtime
//!
//! Host-facing surface wiring the matcher, replacement engine and gesture
//! decoder together. The host's transport notifies joins, frames and
//! removals; the runtime answers with the effective device model, frame
//! dispositions and broadcast engine events. Per-device state is owned
//! exclusively by that device's processing context, so devices can be
//! handled fully in parallel; within one device, frames are processed in
//! arrival order.

use crate::decoder::{Decoded, GestureDecoder};
use crate::error::QuirkError;
use crate::matcher::{match_quirk, MatchPolicy};
use crate::model::{Gesture, LiveDeviceModel, QuirkDefinition, RawEndpoint, Target};
use crate::replacement::apply_quirk;
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use zcl_registry::ClusterRegistry;

/// Events emitted by the device runtime
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// A device joined and its effective model was installed
    DeviceJoined {
        ieee_address: [u8; 8],
        quirk: Option<String>,
    },
    /// A canonical gesture trigger was decoded
    TriggerEmitted {
        ieee_address: [u8; 8],
        gesture: Gesture,
        target: Target,
    },
    /// A replacement endpoint fell back to its raw layout
    ConfigurationError {
        ieee_address: [u8; 8],
        endpoint: u8,
        reason: String,
    },
    /// A device was removed and its state torn down
    DeviceRemoved { ieee_address: [u8; 8] },
}

/// What became of one incoming frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDisposition {
    /// Frame was consumed as a gesture trigger
    Trigger { gesture: Gesture, target: Target },
    /// Frame belongs to generic attribute-report handling
    PassThrough,
}

/// Per-device runtime state: effective model plus decoder
struct DeviceState {
    model: LiveDeviceModel,
    decoder: Option<GestureDecoder>,
}

/// The capability override runtime for one Zigbee network
pub struct DeviceRuntime {
    /// Quirk library in declared order (ordering is load-bearing)
    library: Vec<QuirkDefinition>,
    /// Cluster contract registry for replacement validation
    registry: Arc<ClusterRegistry>,
    /// Signature matching strictness
    policy: MatchPolicy,
    /// Per-device state (keyed by IEEE address)
    devices: DashMap<[u8; 8], DeviceState>,
    /// Event broadcaster
    event_tx: broadcast::Sender<EngineEvent>,
}

impl DeviceRuntime {
    /// Create a runtime over a quirk library
    ///
    /// Every definition is validated up front; the library is read-only
    /// for the life of the runtime.
    pub fn new(
        library: Vec<QuirkDefinition>,
        registry: Arc<ClusterRegistry>,
        policy: MatchPolicy,
    ) -> Result<Self, QuirkError> {
        for quirk in &library {
            quirk.validate()?;
        }

        let (event_tx, _) = broadcast::channel(64);

        Ok(Self {
            library,
            registry,
            policy,
            devices: DashMap::new(),
            event_tx,
        })
    }

    /// Subscribe to engine events
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Handle a device join: match, apply, install the decoder
    ///
    /// Runs synchronously before any frame handling for the device; a
    /// device matching no quirk is exposed with its raw layout unchanged.
    /// Returns the effective model.
    pub fn device_joined(
        &self,
        ieee_address: [u8; 8],
        manufacturer: Option<String>,
        model_id: Option<String>,
        raw_endpoints: &BTreeMap<u8, RawEndpoint>,
    ) -> LiveDeviceModel {
        let mut model = LiveDeviceModel::from_raw(
            ieee_address,
            manufacturer.clone(),
            model_id.clone(),
            raw_endpoints,
        );

        let matched = match_quirk(
            manufacturer.as_deref(),
            model_id.as_deref(),
            raw_endpoints,
            &self.library,
            self.policy,
        );

        let decoder = match matched {
            Some(quirk) => {
                let faults = apply_quirk(&mut model, quirk, &self.registry);
                for fault in faults {
                    if let QuirkError::UnresolvedContract { endpoint, .. } = &fault {
                        let _ = self.event_tx.send(EngineEvent::ConfigurationError {
                            ieee_address,
                            endpoint: *endpoint,
                            reason: fault.to_string(),
                        });
                    }
                }
                Some(GestureDecoder::new(quirk))
            }
            None => {
                tracing::info!(
                    "No quirk matches {} ({:?}/{:?}), exposing raw layout",
                    model.ieee_address_string(),
                    manufacturer,
                    model_id
                );
                None
            }
        };

        let _ = self.event_tx.send(EngineEvent::DeviceJoined {
            ieee_address,
            quirk: model.quirk.clone(),
        });

        self.devices
            .insert(ieee_address, DeviceState { model: model.clone(), decoder });

        model
    }

    /// Route one incoming frame through the device's gesture decoder
    ///
    /// Triggers are also broadcast as [`EngineEvent::TriggerEmitted`];
    /// everything else is the caller's to handle as a plain report.
    pub fn handle_frame(
        &self,
        ieee_address: [u8; 8],
        endpoint_id: u8,
        cluster_id: u16,
        attr_id: u16,
        value: u32,
    ) -> Result<FrameDisposition, QuirkError> {
        let mut state = self
            .devices
            .get_mut(&ieee_address)
            .ok_or_else(|| QuirkError::DeviceNotFound(format!("{ieee_address:02x?}")))?;

        let Some(decoder) = state.decoder.as_mut() else {
            // Raw device: everything is a plain report.
            return Ok(FrameDisposition::PassThrough);
        };

        match decoder.decode(endpoint_id, cluster_id, attr_id, value) {
            Decoded::Trigger { gesture, target } => {
                let _ = self.event_tx.send(EngineEvent::TriggerEmitted {
                    ieee_address,
                    gesture,
                    target,
                });
                Ok(FrameDisposition::Trigger { gesture, target })
            }
            Decoded::PassThrough => Ok(FrameDisposition::PassThrough),
        }
    }

    /// Tear down a device's model and decoder state
    ///
    /// Removal is atomic with respect to in-flight frames for the device:
    /// the map entry goes away in one step, so no decoder can outlive its
    /// model.
    pub fn device_removed(&self, ieee_address: [u8; 8]) -> Option<LiveDeviceModel> {
        let removed = self.devices.remove(&ieee_address).map(|(_, s)| s.model);
        if removed.is_some() {
            let _ = self.event_tx.send(EngineEvent::DeviceRemoved { ieee_address });
            tracing::info!("Removed device state for {ieee_address:02x?}");
        }
        removed
    }

    /// Get a device's effective model
    #[must_use]
    pub fn device(&self, ieee_address: &[u8; 8]) -> Option<LiveDeviceModel> {
        self.devices.get(ieee_address).map(|s| s.model.clone())
    }

    /// Get all known devices' effective models
    #[must_use]
    pub fn devices(&self) -> Vec<LiveDeviceModel> {
        self.devices.iter().map(|s| s.model.clone()).collect()
    }
}
