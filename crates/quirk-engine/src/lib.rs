//! Device capability override engine
//!
//! This crate corrects the advertised capability model of non-compliant
//! Zigbee end devices. A "quirk" pairs a device signature (the endpoint and
//! cluster layout a device advertises on join) with a replacement layout and
//! a table of vendor-specific button triggers. At join time the engine picks
//! the first matching quirk, rewrites the live device model, and from then on
//! decodes raw vendor frames into canonical `(gesture, target)` events.
//!
//! Nothing here is fatal to the host: an unmatched device keeps its raw
//! layout, an unresolvable replacement cluster degrades only the affected
//! endpoint, and unrecognized frames are passed through to generic
//! attribute-report handling.

pub mod decoder;
pub mod error;
pub mod matcher;
pub mod model;
pub mod replacement;
pub mod runtime;

pub use decoder::{Decoded, GestureDecoder};
pub use error::QuirkError;
pub use matcher::{match_quirk, MatchPolicy};
pub use model::{
    ClusterRef, ContractHandle, DeviceSignature, EndpointDescriptor, Gesture, LiveDeviceModel,
    ModelInfo, PressType, RawEndpoint, QuirkDefinition, Target, TriggerKey, TriggerSpec,
};
pub use replacement::apply_quirk;
pub use runtime::{DeviceRuntime, EngineEvent, FrameDisposition};
