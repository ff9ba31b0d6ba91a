//! Readout view codes.

use std::fmt;

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Orientation class of a readout plane.
///
/// The discriminants are the integer codes used by the reconstruction
/// framework when a view is stored as a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(i32)]
pub enum View {
    /// First induction view.
    U = 0,
    /// Second induction view.
    V = 1,
    /// Collection view along the beam (also known as `Y` in some detectors).
    Z = 2,
    /// Drift-coordinate view.
    X = 3,
    /// Three-dimensional information, not a plane projection.
    ThreeD = 4,
    /// View not known or not applicable.
    #[default]
    Unknown = 5,
}

impl View {
    /// Alias of [`View::Z`] used by detectors with vertical collection wires.
    pub const Y: View = View::Z;

    /// All views, in code order.
    pub const ALL: [View; 6] = [
        View::U,
        View::V,
        View::Z,
        View::X,
        View::ThreeD,
        View::Unknown,
    ];

    /// Returns the framework integer code of this view.
    #[inline]
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Returns true for views that are projections on a readout plane.
    #[must_use]
    pub fn is_planar(self) -> bool {
        !matches!(self, View::ThreeD | View::Unknown)
    }

    /// Short name as printed in event dumps.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            View::U => "U",
            View::V => "V",
            View::Z => "Z",
            View::X => "X",
            View::ThreeD => "3D",
            View::Unknown => "?",
        }
    }
}

impl TryFrom<i32> for View {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        View::ALL
            .into_iter()
            .find(|view| view.code() == code)
            .ok_or(Error::InvalidView(code))
    }
}

impl From<View> for i32 {
    fn from(view: View) -> Self {
        view.code()
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
