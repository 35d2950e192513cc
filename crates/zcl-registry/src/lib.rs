//! ZCL (Zigbee Cluster Library) identifier catalog and cluster registry
//!
//! This crate is the leaf of the workspace: a static catalog of profile,
//! device-type and cluster identifiers, plus the [`ClusterRegistry`] that
//! resolves a `(profile, cluster id)` pair to its behavioral contract.

pub mod id;
pub mod registry;

pub use registry::{ClusterContract, ClusterRegistry};
