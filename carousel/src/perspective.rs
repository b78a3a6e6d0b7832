//! Per-slot Y rotation derived from the track position.
//!
//! Each slot has a three-point map from position to angle: the slot faces the
//! viewer when it is the active item and turns edge-on one stride either side.
//! Maps are built once, when the carousel is created, into a fixed table
//! indexed by slot.

/// Capacity of the rotation table, ghost slot included
pub const MAX_SLOTS: usize = 10;

/// Rotation at the three breakpoints, in degrees
const ANGLES: [f64; 3] = [90.0, 0.0, -90.0];

/// Piecewise-linear interpolation over three ascending breakpoints
///
/// Inputs outside the breakpoints extrapolate along the nearest segment.
/// A zero-width segment yields the middle output.
#[must_use]
pub fn interpolate(input: f64, breakpoints: [f64; 3], outputs: [f64; 3]) -> f64 {
    let (lo, hi) = if input < breakpoints[1] { (0, 1) } else { (1, 2) };
    let span = breakpoints[hi] - breakpoints[lo];
    if span == 0.0 || !span.is_finite() {
        return outputs[1];
    }
    let t = (input - breakpoints[lo]) / span;
    outputs[lo] + t * (outputs[hi] - outputs[lo])
}

/// Position-to-angle map for one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationMap {
    slot: usize,
}

impl RotationMap {
    /// Map for `slot`
    #[must_use]
    pub const fn new(slot: usize) -> Self {
        Self { slot }
    }

    /// Slot this map belongs to
    #[must_use]
    pub const fn slot(&self) -> usize {
        self.slot
    }

    /// Breakpoints `[-(i+1)s, -is, -(i-1)s]` for stride `s`
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn breakpoints(&self, stride: f64) -> [f64; 3] {
        let i = self.slot as f64;
        [-(i + 1.0) * stride, -i * stride, -(i - 1.0) * stride]
    }

    /// Rotation in degrees at track `position`
    #[must_use]
    pub fn rotate_y(&self, position: f64, stride: f64) -> f64 {
        if stride <= 0.0 {
            return 0.0;
        }
        interpolate(position, self.breakpoints(stride), ANGLES)
    }
}

/// Rotation maps for every slot up to [`MAX_SLOTS`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerspectiveTable {
    maps: [RotationMap; MAX_SLOTS],
}

impl PerspectiveTable {
    /// Build the table
    #[must_use]
    pub fn new() -> Self {
        Self {
            maps: std::array::from_fn(RotationMap::new),
        }
    }

    /// Map for `slot`, if the table has one
    #[must_use]
    pub fn map(&self, slot: usize) -> Option<&RotationMap> {
        self.maps.get(slot)
    }

    /// Rotation for `slot`; slots beyond the table do not rotate
    #[must_use]
    pub fn rotate_y(&self, slot: usize, position: f64, stride: f64) -> f64 {
        self.map(slot)
            .map_or(0.0, |map| map.rotate_y(position, stride))
    }
}

impl Default for PerspectiveTable {
    fn default() -> Self {
        Self::new()
    }
}
