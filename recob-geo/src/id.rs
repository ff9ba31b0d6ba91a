//! Hierarchical readout element identifiers.
//!
//! A plane lives in a TPC, which lives in a cryostat. Each level carries the
//! index at that level plus a validity flag; a default-constructed identifier
//! is invalid and its indices are [`INVALID_INDEX`].

use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Index value held by an invalid identifier.
pub const INVALID_INDEX: u32 = u32::MAX;

/// Identifier of a cryostat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CryostatId {
    /// Whether this identifier points to an existing element.
    pub is_valid: bool,
    /// Cryostat index.
    pub cryostat: u32,
}

impl CryostatId {
    /// Creates a valid cryostat identifier.
    #[inline]
    #[must_use]
    pub fn new(cryostat: u32) -> Self {
        Self {
            is_valid: true,
            cryostat,
        }
    }

    /// Returns whether the identifier is valid.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Marks the identifier as invalid, keeping its index.
    pub fn mark_invalid(&mut self) {
        self.is_valid = false;
    }
}

impl Default for CryostatId {
    fn default() -> Self {
        Self {
            is_valid: false,
            cryostat: INVALID_INDEX,
        }
    }
}

/// Identifier of a TPC inside a cryostat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TpcId {
    /// Parent cryostat.
    pub cryostat: CryostatId,
    /// TPC index within the cryostat.
    pub tpc: u32,
}

impl TpcId {
    /// Creates a valid TPC identifier.
    #[inline]
    #[must_use]
    pub fn new(cryostat: u32, tpc: u32) -> Self {
        Self {
            cryostat: CryostatId::new(cryostat),
            tpc,
        }
    }

    /// Returns whether the identifier is valid.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.cryostat.is_valid
    }

    /// Returns the cryostat index.
    #[inline]
    #[must_use]
    pub fn cryostat_index(&self) -> u32 {
        self.cryostat.cryostat
    }
}

impl Default for TpcId {
    fn default() -> Self {
        Self {
            cryostat: CryostatId::default(),
            tpc: INVALID_INDEX,
        }
    }
}

/// Identifier of a readout plane inside a TPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaneId {
    /// Parent TPC.
    pub tpc: TpcId,
    /// Plane index within the TPC.
    pub plane: u32,
}

impl PlaneId {
    /// Creates a valid plane identifier.
    #[inline]
    #[must_use]
    pub fn new(cryostat: u32, tpc: u32, plane: u32) -> Self {
        Self {
            tpc: TpcId::new(cryostat, tpc),
            plane,
        }
    }

    /// Returns whether the identifier is valid.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.tpc.is_valid()
    }

    /// Returns the cryostat index.
    #[inline]
    #[must_use]
    pub fn cryostat_index(&self) -> u32 {
        self.tpc.cryostat_index()
    }

    /// Returns the TPC index.
    #[inline]
    #[must_use]
    pub fn tpc_index(&self) -> u32 {
        self.tpc.tpc
    }

    /// Returns the plane index.
    #[inline]
    #[must_use]
    pub fn plane_index(&self) -> u32 {
        self.plane
    }

    fn indices(&self) -> (u32, u32, u32) {
        (self.cryostat_index(), self.tpc_index(), self.plane)
    }
}

impl Default for PlaneId {
    fn default() -> Self {
        Self {
            tpc: TpcId::default(),
            plane: INVALID_INDEX,
        }
    }
}

// Identifiers sort by index, outermost level first; validity only breaks ties.
impl PartialOrd for PlaneId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PlaneId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.indices()
            .cmp(&other.indices())
            .then(self.is_valid().cmp(&other.is_valid()))
    }
}

impl fmt::Display for CryostatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C:{}", self.cryostat)
    }
}

impl fmt::Display for TpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} T:{}", self.cryostat, self.tpc)
    }
}

impl fmt::Display for PlaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} P:{}", self.tpc, self.plane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plane_is_invalid() {
        let plane = PlaneId::default();
        assert!(!plane.is_valid());
        assert_eq!(plane.plane_index(), INVALID_INDEX);
        assert_eq!(plane.tpc_index(), INVALID_INDEX);
        assert_eq!(plane.cryostat_index(), INVALID_INDEX);
    }

    #[test]
    fn test_plane_indices() {
        let plane = PlaneId::new(0, 1, 2);
        assert!(plane.is_valid());
        assert_eq!(plane.cryostat_index(), 0);
        assert_eq!(plane.tpc_index(), 1);
        assert_eq!(plane.plane_index(), 2);
        assert_eq!(plane.to_string(), "C:0 T:1 P:2");
    }

    #[test]
    fn test_mark_invalid() {
        let mut plane = PlaneId::new(0, 1, 2);
        plane.tpc.cryostat.mark_invalid();
        assert!(!plane.is_valid());
        assert_eq!(plane.plane_index(), 2);
        assert_ne!(plane, PlaneId::new(0, 1, 2));
    }

    #[test]
    fn test_plane_ordering() {
        let mut planes = vec![
            PlaneId::new(1, 0, 0),
            PlaneId::new(0, 1, 2),
            PlaneId::new(0, 1, 0),
            PlaneId::new(0, 0, 2),
        ];
        planes.sort();
        assert_eq!(
            planes,
            vec![
                PlaneId::new(0, 0, 2),
                PlaneId::new(0, 1, 0),
                PlaneId::new(0, 1, 2),
                PlaneId::new(1, 0, 0),
            ]
        );
        assert!(PlaneId::new(5, 5, 5) < PlaneId::default());
    }

    #[test]
    fn test_validity_breaks_index_ties() {
        let valid = PlaneId::new(0, 1, 2);
        let mut invalid = valid;
        invalid.tpc.cryostat.mark_invalid();
        assert!(invalid < valid);
        assert!(PlaneId::new(0, 1, 1) > invalid);
        let mut planes = vec![valid, invalid];
        planes.sort();
        assert_eq!(planes, vec![invalid, valid]);
    }
}
