//! Drag-end classification.

/// Net drag distance that must be exceeded to change item, in pixels
pub const DRAG_BUFFER: f64 = 0.0;

/// Release speed that changes item regardless of distance, in pixels/second
pub const VELOCITY_THRESHOLD: f64 = 500.0;

/// What a finished drag asks the index to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Move to the next item
    Advance,
    /// Move to the previous item
    Retreat,
    /// Stay on the current item
    Stay,
}

impl Swipe {
    /// Classify a drag from its net `offset` (px) and release `velocity` (px/s)
    ///
    /// Leftward movement (negative values) advances. The advance rule is
    /// checked first, so a leftward drag released with a rightward flick
    /// still advances.
    #[must_use]
    pub fn classify(offset: f64, velocity: f64) -> Self {
        if offset < -DRAG_BUFFER || velocity < -VELOCITY_THRESHOLD {
            Self::Advance
        } else if offset > DRAG_BUFFER || velocity > VELOCITY_THRESHOLD {
            Self::Retreat
        } else {
            Self::Stay
        }
    }
}
