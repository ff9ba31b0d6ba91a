//! recob-geo: Readout view and plane identifiers.
//!
//! Reconstruction records refer to the detector geometry only through these
//! small copyable identifiers; no geometry description is needed to use them.
//!

pub mod error;
pub mod id;
pub mod view;

pub use error::{Error, Result};
pub use id::{CryostatId, PlaneId, TpcId, INVALID_INDEX};
pub use view::View;
