//! Optical flash record.

use std::cmp::Ordering;
use std::fmt;

use bon::bon;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scintillation light collected by the optical detectors in one time window.
///
/// Times are in microseconds: [`OpFlash::time`] is on the trigger time scale,
/// [`OpFlash::abs_time`] on the optical readout clock. Centers and widths are
/// in centimeters, except the per-view wire centers and widths which are in
/// wire units.
///
/// The x estimate depends on drift information that not every flash finder
/// has, so it is optional; the y and z estimates are always present.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "OpFlashRecord", into = "OpFlashRecord")
)]
pub struct OpFlash {
    time: f64,
    time_width: f64,
    abs_time: f64,
    frame: u32,
    /// Photoelectrons seen by each optical channel, indexed by channel.
    pe_per_channel: Vec<f64>,
    /// Geometric center of the flash projected on each view.
    wire_centers: Vec<f64>,
    /// Geometric width of the flash projected on each view.
    wire_widths: Vec<f64>,
    x_center: Option<f64>,
    x_width: Option<f64>,
    y_center: f64,
    y_width: f64,
    z_center: f64,
    z_width: f64,
    fast_to_total: f64,
    in_beam_frame: bool,
    on_beam_time: i32,
}

#[bon]
impl OpFlash {
    /// Creates a flash.
    ///
    /// Timing and the photoelectron counts are required. Leaving out
    /// `x_center` builds a flash without an x estimate; a value equal to
    /// [`OpFlash::NO_CENTER`] is treated the same way. Without an x center
    /// the x width is dropped too.
    #[builder]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        time: f64,
        time_width: f64,
        abs_time: f64,
        frame: u32,
        pe_per_channel: Vec<f64>,
        #[builder(default)] in_beam_frame: bool,
        #[builder(default)] on_beam_time: i32,
        #[builder(default = 1.0)] fast_to_total: f64,
        x_center: Option<f64>,
        x_width: Option<f64>,
        #[builder(default)] y_center: f64,
        #[builder(default)] y_width: f64,
        #[builder(default)] z_center: f64,
        #[builder(default)] z_width: f64,
        #[builder(default)] wire_centers: Vec<f64>,
        #[builder(default)] wire_widths: Vec<f64>,
    ) -> Self {
        let x_center = center_from_legacy(x_center);
        let x_width = x_center.and(center_from_legacy(x_width));
        Self {
            time,
            time_width,
            abs_time,
            frame,
            pe_per_channel,
            wire_centers,
            wire_widths,
            x_center,
            x_width,
            y_center,
            y_width,
            z_center,
            z_width,
            fast_to_total,
            in_beam_frame,
            on_beam_time,
        }
    }
}

/// Maps the legacy "no center" sentinel to an absent value.
#[allow(clippy::float_cmp)]
fn center_from_legacy(value: Option<f64>) -> Option<f64> {
    match value {
        Some(v) if v == OpFlash::NO_CENTER => {
            log::debug!("flash x estimate given as the no-center sentinel; storing it as absent");
            None
        }
        other => other,
    }
}

impl OpFlash {
    /// Value reported for a missing x estimate by the `*_or_sentinel` accessors.
    pub const NO_CENTER: f64 = f64::MAX;

    #[inline]
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    #[must_use]
    pub fn time_width(&self) -> f64 {
        self.time_width
    }

    #[inline]
    #[must_use]
    pub fn abs_time(&self) -> f64 {
        self.abs_time
    }

    #[inline]
    #[must_use]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Photoelectrons on the given channel, `None` past the last channel.
    #[inline]
    #[must_use]
    pub fn pe(&self, channel: usize) -> Option<f64> {
        self.pe_per_channel.get(channel).copied()
    }

    /// Photoelectrons per channel.
    #[inline]
    #[must_use]
    pub fn pes(&self) -> &[f64] {
        &self.pe_per_channel
    }

    /// Total number of photoelectrons over all channels.
    #[must_use]
    pub fn total_pe(&self) -> f64 {
        self.pe_per_channel.iter().fold(0.0, |sum, pe| sum + pe)
    }

    /// Returns whether the flash has an x estimate.
    #[inline]
    #[must_use]
    pub fn has_x_center(&self) -> bool {
        self.x_center.is_some()
    }

    #[inline]
    #[must_use]
    pub fn x_center(&self) -> Option<f64> {
        self.x_center
    }

    #[inline]
    #[must_use]
    pub fn x_width(&self) -> Option<f64> {
        self.x_width
    }

    /// The x center, or [`OpFlash::NO_CENTER`] when there is none.
    #[must_use]
    pub fn x_center_or_sentinel(&self) -> f64 {
        self.x_center.unwrap_or(Self::NO_CENTER)
    }

    /// The x width, or [`OpFlash::NO_CENTER`] when there is none.
    #[must_use]
    pub fn x_width_or_sentinel(&self) -> f64 {
        self.x_width.unwrap_or(Self::NO_CENTER)
    }

    #[inline]
    #[must_use]
    pub fn y_center(&self) -> f64 {
        self.y_center
    }

    #[inline]
    #[must_use]
    pub fn y_width(&self) -> f64 {
        self.y_width
    }

    #[inline]
    #[must_use]
    pub fn z_center(&self) -> f64 {
        self.z_center
    }

    #[inline]
    #[must_use]
    pub fn z_width(&self) -> f64 {
        self.z_width
    }

    /// Ratio of fast to total scintillation light.
    #[inline]
    #[must_use]
    pub fn fast_to_total(&self) -> f64 {
        self.fast_to_total
    }

    #[inline]
    #[must_use]
    pub fn in_beam_frame(&self) -> bool {
        self.in_beam_frame
    }

    /// Beam timing code: nonzero when the flash is in time with the beam.
    #[inline]
    #[must_use]
    pub fn on_beam_time(&self) -> i32 {
        self.on_beam_time
    }

    #[inline]
    #[must_use]
    pub fn wire_centers(&self) -> &[f64] {
        &self.wire_centers
    }

    #[inline]
    #[must_use]
    pub fn wire_widths(&self) -> &[f64] {
        &self.wire_widths
    }

    /// Returns whether this flash comes strictly before `other`.
    ///
    /// Only the flash time takes part in the comparison.
    #[inline]
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.time < other.time
    }

    /// Orders two flashes by time, for use with `sort_by`.
    ///
    /// Agrees with [`OpFlash::is_before`]: `-0.0` and `+0.0` are equal. A NaN
    /// time compares equal to another NaN and after every other time.
    #[must_use]
    pub fn cmp_by_time(&self, other: &Self) -> Ordering {
        self.time
            .partial_cmp(&other.time)
            .unwrap_or_else(|| self.time.is_nan().cmp(&other.time.is_nan()))
    }

    /// Sorts flashes by time. Flashes with the same time keep their order.
    pub fn sort_by_time(flashes: &mut [OpFlash]) {
        flashes.sort_by(Self::cmp_by_time);
    }
}

/// Serialized form of [`OpFlash`]; deserialization goes through the builder.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct OpFlashRecord {
    time: f64,
    time_width: f64,
    abs_time: f64,
    frame: u32,
    pe_per_channel: Vec<f64>,
    #[serde(default)]
    wire_centers: Vec<f64>,
    #[serde(default)]
    wire_widths: Vec<f64>,
    x_center: Option<f64>,
    x_width: Option<f64>,
    y_center: f64,
    y_width: f64,
    z_center: f64,
    z_width: f64,
    fast_to_total: f64,
    in_beam_frame: bool,
    on_beam_time: i32,
}

#[cfg(feature = "serde")]
impl From<OpFlashRecord> for OpFlash {
    fn from(record: OpFlashRecord) -> Self {
        OpFlash::builder()
            .time(record.time)
            .time_width(record.time_width)
            .abs_time(record.abs_time)
            .frame(record.frame)
            .pe_per_channel(record.pe_per_channel)
            .in_beam_frame(record.in_beam_frame)
            .on_beam_time(record.on_beam_time)
            .fast_to_total(record.fast_to_total)
            .maybe_x_center(record.x_center)
            .maybe_x_width(record.x_width)
            .y_center(record.y_center)
            .y_width(record.y_width)
            .z_center(record.z_center)
            .z_width(record.z_width)
            .wire_centers(record.wire_centers)
            .wire_widths(record.wire_widths)
            .build()
    }
}

#[cfg(feature = "serde")]
impl From<OpFlash> for OpFlashRecord {
    fn from(flash: OpFlash) -> Self {
        Self {
            time: flash.time,
            time_width: flash.time_width,
            abs_time: flash.abs_time,
            frame: flash.frame,
            pe_per_channel: flash.pe_per_channel,
            wire_centers: flash.wire_centers,
            wire_widths: flash.wire_widths,
            x_center: flash.x_center,
            x_width: flash.x_width,
            y_center: flash.y_center,
            y_width: flash.y_width,
            z_center: flash.z_center,
            z_width: flash.z_width,
            fast_to_total: flash.fast_to_total,
            in_beam_frame: flash.in_beam_frame,
            on_beam_time: flash.on_beam_time,
        }
    }
}

impl fmt::Display for OpFlash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OpFlash at {} us (width {} us, abs {} us, frame {}): {} PE on {} channels",
            self.time,
            self.time_width,
            self.abs_time,
            self.frame,
            self.total_pe(),
            self.pe_per_channel.len()
        )?;
        match (self.x_center, self.x_width) {
            (Some(x), Some(dx)) => write!(f, ", x {x} +/- {dx}")?,
            (Some(x), None) => write!(f, ", x {x}")?,
            _ => {}
        }
        write!(
            f,
            ", y {} +/- {}, z {} +/- {}",
            self.y_center, self.y_width, self.z_center, self.z_width
        )?;
        if self.in_beam_frame {
            write!(f, ", in beam frame (on beam time: {})", self.on_beam_time)?;
        }
        Ok(())
    }
}
