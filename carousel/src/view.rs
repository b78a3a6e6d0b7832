//! What the renderer draws for each slot.

use crate::catalog::Item;

/// Image shown when an item's own image fails to load
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder-event.jpg";

/// Render data for one working slot
#[derive(Debug, Clone, PartialEq)]
pub struct SlideView<'a> {
    /// Slot index, ghost included
    pub slot: usize,
    /// Item shown in this slot
    pub item: &'a Item,
    /// Whether this is the loop-mode copy of the first item
    pub is_ghost: bool,
    /// Whether this slot is the current index
    pub is_active: bool,
    /// Horizontal offset from the container's content edge, in pixels
    pub x: f64,
    /// Slot width, in pixels
    pub width: f64,
    /// Y rotation, in degrees
    pub rotate_y: f64,
    /// Image to display (the placeholder once the item's image has failed)
    pub image: &'a str,
    /// Rounded card style
    pub round: bool,
}
