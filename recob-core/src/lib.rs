//! recob-core: Reconstruction data records.
//!
//! This crate provides the optical flash ([`OpFlash`]) and 2D cluster
//! ([`Cluster`]) records produced by reconstruction and read by analysis.
//! Records are built once through their builders and are read-only
//! afterwards.
//!

pub mod cluster;
pub mod error;
pub mod opflash;

pub use cluster::{ChargeMode, Cluster, ClusterEdge, ClusterId};
pub use error::{Error, Result};
pub use opflash::OpFlash;

// Re-export geometry identifiers for convenience
pub use recob_geo::{PlaneId, View};
