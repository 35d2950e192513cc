//! Error types for the quirk engine

use thiserror::Error;

/// Errors that can occur in the quirk engine
///
/// None of these are fatal to the host process; callers degrade to the raw
/// device layout rather than aborting device handling.
#[derive(Error, Debug)]
pub enum QuirkError {
    /// Two trigger entries in one quirk share a (gesture, target) key
    #[error("Duplicate trigger key in quirk '{quirk}': {key}")]
    DuplicateTriggerKey { quirk: String, key: String },

    /// A replacement table references a cluster implementation the
    /// registry cannot resolve; isolated to the affected endpoint
    #[error("Unresolved cluster contract '{contract}' ({cluster_id:#06x}) on endpoint {endpoint}")]
    UnresolvedContract {
        endpoint: u8,
        cluster_id: u16,
        contract: String,
    },

    /// Frame received for a device that never joined (or was removed)
    #[error("Device not found: {0}")]
    DeviceNotFound(String),
}
