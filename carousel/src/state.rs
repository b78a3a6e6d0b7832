//! Carousel state and the queries the renderer uses.

use crate::catalog::{Item, fallback_items};
use crate::config::CarouselConfig;
use crate::geometry::Geometry;
use crate::index::IndexMachine;
use crate::motion::{Animation, Transition};
use crate::pagination::Pagination;
use crate::perspective::{MAX_SLOTS, PerspectiveTable};
use crate::view::{PLACEHOLDER_IMAGE, SlideView};
use std::collections::BTreeSet;
use std::time::Duration;

/// Everything one mounted carousel knows
///
/// Mutated only by [`CarouselReducer`](crate::reducer::CarouselReducer).
#[derive(Debug, Clone)]
pub struct CarouselState {
    pub(crate) items: Vec<Item>,
    pub(crate) config: CarouselConfig,
    pub(crate) index: IndexMachine,
    pub(crate) geometry: Geometry,
    pub(crate) perspective: PerspectiveTable,
    /// Track offset in pixels; converges toward `target_position()`
    pub(crate) position: f64,
    pub(crate) animation: Option<Animation>,
    /// Bumped whenever the in-flight animation is replaced or dropped
    pub(crate) generation: u64,
    /// Position at which the current drag began
    pub(crate) drag_origin: Option<f64>,
    pub(crate) is_hovered: bool,
    pub(crate) is_resetting: bool,
    pub(crate) failed_images: BTreeSet<usize>,
    pub(crate) mounted: bool,
}

impl CarouselState {
    /// Fresh state over `items` at index 0
    ///
    /// An empty sequence is replaced by the fallback items.
    #[must_use]
    pub fn new(items: Vec<Item>, config: CarouselConfig) -> Self {
        let items = fit(items);
        let index = IndexMachine::new(items.len(), config.loop_items);

        Self {
            items,
            config,
            index,
            geometry: Geometry::default(),
            perspective: PerspectiveTable::new(),
            position: 0.0,
            animation: None,
            generation: 0,
            drag_origin: None,
            is_hovered: false,
            is_resetting: false,
            failed_images: BTreeSet::new(),
            mounted: true,
        }
    }

    /// Swap in a new item sequence and start over at index 0
    pub(crate) fn replace_items(&mut self, items: Vec<Item>) {
        self.items = fit(items);
        self.index = IndexMachine::new(self.items.len(), self.config.loop_items);
        self.position = self.target_position();
        self.animation = None;
        self.generation += 1;
        self.drag_origin = None;
        self.is_resetting = false;
        self.failed_images.clear();
    }

    /// Logical items, in display order
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Index state
    #[must_use]
    pub const fn index(&self) -> &IndexMachine {
        &self.index
    }

    /// Current index, ghost slot included
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.index.current()
    }

    /// Measured layout
    #[must_use]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Current track position, in pixels
    #[must_use]
    pub const fn position(&self) -> f64 {
        self.position
    }

    /// Where the track is heading
    #[must_use]
    pub fn target_position(&self) -> f64 {
        self.geometry.position_for(self.index.current())
    }

    /// The in-flight animation, if any
    #[must_use]
    pub const fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    /// Whether the pointer is over the carousel
    #[must_use]
    pub const fn is_hovered(&self) -> bool {
        self.is_hovered
    }

    /// Whether a drag is in progress
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    /// Whether the loop correction window is open
    #[must_use]
    pub const fn is_resetting(&self) -> bool {
        self.is_resetting
    }

    /// Whether the carousel is still mounted
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Number of working slots: `N`, plus the ghost in loop mode
    #[must_use]
    pub const fn working_len(&self) -> usize {
        self.index.item_count() + self.index.is_looping() as usize
    }

    /// Item shown in `slot`; the ghost shows the first item
    #[must_use]
    pub fn item_at(&self, slot: usize) -> Option<&Item> {
        if slot >= self.working_len() {
            return None;
        }
        self.items.get(slot % self.items.len().max(1))
    }

    /// Dot indicator
    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        Pagination::of(&self.index)
    }

    /// How the next position change is applied
    #[must_use]
    pub fn transition(&self) -> Transition {
        if self.is_resetting {
            Transition::Instant
        } else {
            Transition::default()
        }
    }

    /// Y rotation of `slot` at the current position
    #[must_use]
    pub fn rotate_y(&self, slot: usize) -> f64 {
        self.perspective
            .rotate_y(slot, self.position, self.geometry.stride())
    }

    /// Whether `slot`'s image has failed to load
    #[must_use]
    pub fn image_failed(&self, slot: usize) -> bool {
        self.failed_images.contains(&slot)
    }

    /// Render data for every working slot
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn slides(&self) -> Vec<SlideView<'_>> {
        let stride = self.geometry.stride();
        (0..self.working_len())
            .filter_map(|slot| {
                let item = self.item_at(slot)?;
                Some(SlideView {
                    slot,
                    item,
                    is_ghost: self.index.is_looping() && slot == self.index.item_count(),
                    is_active: slot == self.index.current(),
                    x: slot as f64 * stride + self.position,
                    width: self.geometry.item_width(),
                    rotate_y: self.rotate_y(slot),
                    image: if self.image_failed(slot) {
                        PLACEHOLDER_IMAGE
                    } else {
                        item.image_ref.as_str()
                    },
                    round: self.config.round,
                })
            })
            .collect()
    }

    /// Delay of the autoplay timer that should be running, if any
    #[must_use]
    pub fn autoplay_schedule(&self) -> Option<Duration> {
        let suppressed = self.config.pause_on_hover && self.is_hovered;
        let delay = self.config.autoplay_delay();
        (self.mounted && self.config.autoplay && !suppressed && !delay.is_zero()).then_some(delay)
    }
}

impl Default for CarouselState {
    fn default() -> Self {
        Self::new(Vec::new(), CarouselConfig::default())
    }
}

/// Non-empty, and short enough that every working slot has a rotation map
fn fit(mut items: Vec<Item>) -> Vec<Item> {
    if items.is_empty() {
        items = fallback_items();
    }
    items.truncate(MAX_SLOTS - 1);
    items
}
