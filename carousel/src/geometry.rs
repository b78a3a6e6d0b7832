//! Viewport sizing.
//!
//! Item width and stride follow the measured container width. Nothing here
//! animates: a resize only changes how the current position is interpreted.

/// Horizontal space the container keeps around an item, both sides together, in pixels
pub const CONTAINER_PADDING: f64 = 34.0;

/// Space between adjacent items, in pixels
pub const GAP: f64 = 16.0;

/// Derived layout for one measured container width
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    item_width: f64,
    stride: f64,
}

impl Geometry {
    /// Geometry for a container `container_width` pixels wide
    ///
    /// A width that leaves no room for an item (including an unmeasured
    /// container of width 0) yields zero item width and zero stride.
    #[must_use]
    pub fn measure(container_width: f64) -> Self {
        let container_width = if container_width.is_finite() {
            container_width.max(0.0)
        } else {
            0.0
        };
        let item_width = (container_width - CONTAINER_PADDING).max(0.0);
        let stride = if item_width > 0.0 { item_width + GAP } else { 0.0 };

        Self { item_width, stride }
    }

    /// Width of one item
    #[must_use]
    pub const fn item_width(&self) -> f64 {
        self.item_width
    }

    /// Distance between the anchors of adjacent items
    #[must_use]
    pub const fn stride(&self) -> f64 {
        self.stride
    }

    /// Whether a usable width has been measured
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.stride > 0.0
    }

    /// Track position at which `index` is the active item
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // slot counts are tiny
    pub fn position_for(&self, index: usize) -> f64 {
        if self.stride > 0.0 {
            -(index as f64) * self.stride
        } else {
            0.0
        }
    }
}
