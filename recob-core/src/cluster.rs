//! 2D cluster record.
//!
//! A [`Cluster`] summarizes a group of hits on a single readout plane: where
//! the cluster starts and ends (wire and tick coordinates with their
//! uncertainties), how it looks at each end, and how much charge it collected
//! according to two independent measurements.

use std::fmt;

use bon::bon;
use recob_geo::{PlaneId, View};

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cluster identifier.
pub type ClusterId = i32;

/// One of the two ends of a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u32)]
pub enum ClusterEdge {
    /// Where the cluster begins.
    Start = 0,
    /// Where the cluster ends.
    End = 1,
}

impl ClusterEdge {
    /// Both edges, in index order.
    pub const ALL: [ClusterEdge; 2] = [ClusterEdge::Start, ClusterEdge::End];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u32> for ClusterEdge {
    type Error = Error;

    fn try_from(index: u32) -> Result<Self> {
        match index {
            0 => Ok(ClusterEdge::Start),
            1 => Ok(ClusterEdge::End),
            other => Err(Error::InvalidEdge(other)),
        }
    }
}

impl From<ClusterEdge> for u32 {
    fn from(edge: ClusterEdge) -> Self {
        edge as u32
    }
}

/// Charge measurement method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u32)]
pub enum ChargeMode {
    /// Sum of the fitted hit integrals.
    Fit = 0,
    /// Sum of the raw ADC counts under the hits.
    Adc = 1,
}

impl ChargeMode {
    /// Both methods, in index order.
    pub const ALL: [ChargeMode; 2] = [ChargeMode::Fit, ChargeMode::Adc];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u32> for ChargeMode {
    type Error = Error;

    fn try_from(index: u32) -> Result<Self> {
        match index {
            0 => Ok(ChargeMode::Fit),
            1 => Ok(ChargeMode::Adc),
            other => Err(Error::InvalidChargeMode(other)),
        }
    }
}

impl From<ChargeMode> for u32 {
    fn from(mode: ChargeMode) -> Self {
        mode as u32
    }
}

/// A cluster of hits on one readout plane.
///
/// Clusters are built once through [`Cluster::builder`] and then only read.
/// Every builder field is optional; omitted fields take the value of a
/// default cluster (zero, [`Cluster::INVALID_ID`], [`View::Unknown`], an
/// invalid [`PlaneId`]).
///
/// Cloning copies everything. [`Cluster::take`] moves the content out and
/// leaves the source readable, but without a valid identity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "ClusterRecord", into = "ClusterRecord")
)]
pub struct Cluster {
    /// Wire coordinate of each edge, in wire units.
    wires: [f32; 2],
    /// Uncertainty on the wire coordinate of each edge.
    sigma_wires: [f32; 2],
    /// Tick coordinate of each edge, in TDC ticks.
    ticks: [f32; 2],
    /// Uncertainty on the tick coordinate of each edge.
    sigma_ticks: [f32; 2],
    /// Charge at each edge.
    edge_charges: [f32; 2],
    /// Angle of the cluster direction at each edge, in the wire-tick plane.
    angles: [f32; 2],
    /// Opening angle at each edge.
    opening_angles: [f32; 2],
    /// Total charge per measurement method.
    charge_sums: [f32; 2],
    /// Standard deviation of the hit charge per measurement method.
    charge_std_devs: [f32; 2],
    /// Average hit charge per measurement method.
    charge_averages: [f32; 2],
    n_hits: u32,
    /// Wires covered divided by hits.
    multiple_hit_density: f32,
    width: f32,
    id: ClusterId,
    view: View,
    plane: PlaneId,
}

#[bon]
impl Cluster {
    /// Creates a cluster from named values.
    ///
    /// The average charges are computed here from the charge sums and the
    /// number of hits; they are zero when there are no hits.
    #[builder]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        #[builder(default)] start_wire: f32,
        #[builder(default)] sigma_start_wire: f32,
        #[builder(default)] start_tick: f32,
        #[builder(default)] sigma_start_tick: f32,
        #[builder(default)] start_charge: f32,
        #[builder(default)] start_angle: f32,
        #[builder(default)] start_opening_angle: f32,
        #[builder(default)] end_wire: f32,
        #[builder(default)] sigma_end_wire: f32,
        #[builder(default)] end_tick: f32,
        #[builder(default)] sigma_end_tick: f32,
        #[builder(default)] end_charge: f32,
        #[builder(default)] end_angle: f32,
        #[builder(default)] end_opening_angle: f32,
        #[builder(default)] integral: f32,
        #[builder(default)] integral_std_dev: f32,
        #[builder(default)] summed_adc: f32,
        #[builder(default)] summed_adc_std_dev: f32,
        #[builder(default)] n_hits: u32,
        #[builder(default)] multiple_hit_density: f32,
        #[builder(default)] width: f32,
        #[builder(default = Cluster::INVALID_ID)] id: ClusterId,
        #[builder(default)] view: View,
        #[builder(default)] plane: PlaneId,
    ) -> Self {
        Self {
            wires: [start_wire, end_wire],
            sigma_wires: [sigma_start_wire, sigma_end_wire],
            ticks: [start_tick, end_tick],
            sigma_ticks: [sigma_start_tick, sigma_end_tick],
            edge_charges: [start_charge, end_charge],
            angles: [start_angle, end_angle],
            opening_angles: [start_opening_angle, end_opening_angle],
            charge_sums: [integral, summed_adc],
            charge_std_devs: [integral_std_dev, summed_adc_std_dev],
            charge_averages: [
                average_charge(integral, n_hits),
                average_charge(summed_adc, n_hits),
            ],
            n_hits,
            multiple_hit_density,
            width,
            id,
            view,
            plane,
        }
    }
}

impl Default for Cluster {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[allow(clippy::cast_precision_loss)]
fn average_charge(sum: f32, n_hits: u32) -> f32 {
    if n_hits == 0 {
        0.0
    } else {
        sum / n_hits as f32
    }
}

impl Cluster {
    /// Identifier of a cluster that has no identity.
    pub const INVALID_ID: ClusterId = -1;

    /// Moves the content of this cluster into a new one.
    ///
    /// The returned cluster is identical to `self` before the call. Afterwards
    /// `self` keeps all of its data but its identifier is [`Cluster::INVALID_ID`].
    #[must_use = "the moved-out cluster is the only one keeping the identifier"]
    pub fn take(&mut self) -> Self {
        let moved = self.clone();
        if self.is_valid() {
            log::debug!("identity of cluster {} moved out", self.id);
        }
        self.id = Self::INVALID_ID;
        moved
    }

    /// Replaces this cluster with the content of `source`, as [`Cluster::take`] does.
    pub fn assign_from(&mut self, source: &mut Cluster) {
        *self = source.take();
    }

    /// Returns whether the cluster has a valid identifier.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.id != Self::INVALID_ID
    }

    // Edge quantities

    /// Wire coordinate of the given edge.
    #[inline]
    #[must_use]
    pub fn wire_coord(&self, edge: ClusterEdge) -> f32 {
        self.wires[edge.index()]
    }

    /// Uncertainty on the wire coordinate of the given edge.
    #[inline]
    #[must_use]
    pub fn sigma_wire_coord(&self, edge: ClusterEdge) -> f32 {
        self.sigma_wires[edge.index()]
    }

    /// Tick coordinate of the given edge.
    #[inline]
    #[must_use]
    pub fn tick_coord(&self, edge: ClusterEdge) -> f32 {
        self.ticks[edge.index()]
    }

    /// Uncertainty on the tick coordinate of the given edge.
    #[inline]
    #[must_use]
    pub fn sigma_tick_coord(&self, edge: ClusterEdge) -> f32 {
        self.sigma_ticks[edge.index()]
    }

    /// Charge at the given edge.
    #[inline]
    #[must_use]
    pub fn edge_charge(&self, edge: ClusterEdge) -> f32 {
        self.edge_charges[edge.index()]
    }

    /// Angle of the cluster at the given edge.
    #[inline]
    #[must_use]
    pub fn angle(&self, edge: ClusterEdge) -> f32 {
        self.angles[edge.index()]
    }

    /// Opening angle of the cluster at the given edge.
    #[inline]
    #[must_use]
    pub fn opening_angle(&self, edge: ClusterEdge) -> f32 {
        self.opening_angles[edge.index()]
    }

    #[must_use]
    pub fn start_wire(&self) -> f32 {
        self.wire_coord(ClusterEdge::Start)
    }

    #[must_use]
    pub fn sigma_start_wire(&self) -> f32 {
        self.sigma_wire_coord(ClusterEdge::Start)
    }

    #[must_use]
    pub fn start_tick(&self) -> f32 {
        self.tick_coord(ClusterEdge::Start)
    }

    #[must_use]
    pub fn sigma_start_tick(&self) -> f32 {
        self.sigma_tick_coord(ClusterEdge::Start)
    }

    #[must_use]
    pub fn start_charge(&self) -> f32 {
        self.edge_charge(ClusterEdge::Start)
    }

    #[must_use]
    pub fn start_angle(&self) -> f32 {
        self.angle(ClusterEdge::Start)
    }

    #[must_use]
    pub fn start_opening_angle(&self) -> f32 {
        self.opening_angle(ClusterEdge::Start)
    }

    #[must_use]
    pub fn end_wire(&self) -> f32 {
        self.wire_coord(ClusterEdge::End)
    }

    #[must_use]
    pub fn sigma_end_wire(&self) -> f32 {
        self.sigma_wire_coord(ClusterEdge::End)
    }

    #[must_use]
    pub fn end_tick(&self) -> f32 {
        self.tick_coord(ClusterEdge::End)
    }

    #[must_use]
    pub fn sigma_end_tick(&self) -> f32 {
        self.sigma_tick_coord(ClusterEdge::End)
    }

    #[must_use]
    pub fn end_charge(&self) -> f32 {
        self.edge_charge(ClusterEdge::End)
    }

    #[must_use]
    pub fn end_angle(&self) -> f32 {
        self.angle(ClusterEdge::End)
    }

    #[must_use]
    pub fn end_opening_angle(&self) -> f32 {
        self.opening_angle(ClusterEdge::End)
    }

    // Charge quantities

    /// Total charge according to the given method.
    #[inline]
    #[must_use]
    pub fn charge(&self, mode: ChargeMode) -> f32 {
        self.charge_sums[mode.index()]
    }

    /// Standard deviation of the hit charge according to the given method.
    #[inline]
    #[must_use]
    pub fn charge_std_dev(&self, mode: ChargeMode) -> f32 {
        self.charge_std_devs[mode.index()]
    }

    /// Average hit charge according to the given method (zero without hits).
    #[inline]
    #[must_use]
    pub fn charge_average(&self, mode: ChargeMode) -> f32 {
        self.charge_averages[mode.index()]
    }

    /// Total charge from the hit fits.
    #[must_use]
    pub fn integral(&self) -> f32 {
        self.charge(ChargeMode::Fit)
    }

    #[must_use]
    pub fn integral_std_dev(&self) -> f32 {
        self.charge_std_dev(ChargeMode::Fit)
    }

    #[must_use]
    pub fn integral_average(&self) -> f32 {
        self.charge_average(ChargeMode::Fit)
    }

    /// Total charge from the ADC counts.
    #[must_use]
    pub fn summed_adc(&self) -> f32 {
        self.charge(ChargeMode::Adc)
    }

    #[must_use]
    pub fn summed_adc_std_dev(&self) -> f32 {
        self.charge_std_dev(ChargeMode::Adc)
    }

    #[must_use]
    pub fn summed_adc_average(&self) -> f32 {
        self.charge_average(ChargeMode::Adc)
    }

    // Summary quantities

    /// Number of hits in the cluster.
    #[inline]
    #[must_use]
    pub fn n_hits(&self) -> u32 {
        self.n_hits
    }

    /// Density of wires with more than one hit.
    #[inline]
    #[must_use]
    pub fn multiple_hit_density(&self) -> f32 {
        self.multiple_hit_density
    }

    /// Width of the cluster transverse to its direction.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> ClusterId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    #[inline]
    #[must_use]
    pub fn plane(&self) -> PlaneId {
        self.plane
    }

    /// Returns whether the cluster is associated with a valid plane.
    #[inline]
    #[must_use]
    pub fn has_plane(&self) -> bool {
        self.plane.is_valid()
    }
}

/// Serialized form of [`Cluster`]. The average charges are not stored; they
/// are recomputed by the builder when a cluster is read back.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
#[serde(default)]
struct ClusterRecord {
    start_wire: f32,
    sigma_start_wire: f32,
    start_tick: f32,
    sigma_start_tick: f32,
    start_charge: f32,
    start_angle: f32,
    start_opening_angle: f32,
    end_wire: f32,
    sigma_end_wire: f32,
    end_tick: f32,
    sigma_end_tick: f32,
    end_charge: f32,
    end_angle: f32,
    end_opening_angle: f32,
    integral: f32,
    integral_std_dev: f32,
    summed_adc: f32,
    summed_adc_std_dev: f32,
    n_hits: u32,
    multiple_hit_density: f32,
    width: f32,
    id: ClusterId,
    view: View,
    plane: PlaneId,
}

#[cfg(feature = "serde")]
impl Default for ClusterRecord {
    fn default() -> Self {
        Cluster::default().into()
    }
}

#[cfg(feature = "serde")]
impl From<ClusterRecord> for Cluster {
    fn from(record: ClusterRecord) -> Self {
        Cluster::builder()
            .start_wire(record.start_wire)
            .sigma_start_wire(record.sigma_start_wire)
            .start_tick(record.start_tick)
            .sigma_start_tick(record.sigma_start_tick)
            .start_charge(record.start_charge)
            .start_angle(record.start_angle)
            .start_opening_angle(record.start_opening_angle)
            .end_wire(record.end_wire)
            .sigma_end_wire(record.sigma_end_wire)
            .end_tick(record.end_tick)
            .sigma_end_tick(record.sigma_end_tick)
            .end_charge(record.end_charge)
            .end_angle(record.end_angle)
            .end_opening_angle(record.end_opening_angle)
            .integral(record.integral)
            .integral_std_dev(record.integral_std_dev)
            .summed_adc(record.summed_adc)
            .summed_adc_std_dev(record.summed_adc_std_dev)
            .n_hits(record.n_hits)
            .multiple_hit_density(record.multiple_hit_density)
            .width(record.width)
            .id(record.id)
            .view(record.view)
            .plane(record.plane)
            .build()
    }
}

#[cfg(feature = "serde")]
impl From<Cluster> for ClusterRecord {
    fn from(cluster: Cluster) -> Self {
        let [start_wire, end_wire] = cluster.wires;
        let [sigma_start_wire, sigma_end_wire] = cluster.sigma_wires;
        let [start_tick, end_tick] = cluster.ticks;
        let [sigma_start_tick, sigma_end_tick] = cluster.sigma_ticks;
        let [start_charge, end_charge] = cluster.edge_charges;
        let [start_angle, end_angle] = cluster.angles;
        let [start_opening_angle, end_opening_angle] = cluster.opening_angles;
        let [integral, summed_adc] = cluster.charge_sums;
        let [integral_std_dev, summed_adc_std_dev] = cluster.charge_std_devs;
        Self {
            start_wire,
            sigma_start_wire,
            start_tick,
            sigma_start_tick,
            start_charge,
            start_angle,
            start_opening_angle,
            end_wire,
            sigma_end_wire,
            end_tick,
            sigma_end_tick,
            end_charge,
            end_angle,
            end_opening_angle,
            integral,
            integral_std_dev,
            summed_adc,
            summed_adc_std_dev,
            n_hits: cluster.n_hits,
            multiple_hit_density: cluster.multiple_hit_density,
            width: cluster.width,
            id: cluster.id,
            view: cluster.view,
            plane: cluster.plane,
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cluster ID {} ({} hits) view {}", self.id, self.n_hits, self.view)?;
        if self.has_plane() {
            write!(f, " on {}", self.plane)?;
        } else {
            f.write_str(" on no plane")?;
        }
        for edge in ClusterEdge::ALL {
            write!(
                f,
                "\n  {:?}: wire {} +/- {}, tick {} +/- {}, charge {}, angle {}, opening {}",
                edge,
                self.wire_coord(edge),
                self.sigma_wire_coord(edge),
                self.tick_coord(edge),
                self.sigma_tick_coord(edge),
                self.edge_charge(edge),
                self.angle(edge),
                self.opening_angle(edge),
            )?;
        }
        write!(
            f,
            "\n  integral {} +/- {} (avg {}), summed ADC {} +/- {} (avg {}), \
             multiple hit density {}, width {}",
            self.integral(),
            self.integral_std_dev(),
            self.integral_average(),
            self.summed_adc(),
            self.summed_adc_std_dev(),
            self.summed_adc_average(),
            self.multiple_hit_density,
            self.width,
        )
    }
}
