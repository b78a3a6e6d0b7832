//! The carousel reducer.
//!
//! Every input the carousel reacts to (gestures, timer ticks, layout, loaded
//! items) is a [`CarouselAction`]. Timers are cancellable effects with fixed
//! ids, so re-arming one replaces the previous timer and unmounting can tear
//! all of them down.

use crate::catalog::{self, Item, ItemId, ItemSource};
use crate::config::CarouselConfig;
use crate::geometry::Geometry;
use crate::gesture::Swipe;
use crate::motion::{Animation, Transition};
use crate::state::CarouselState;
use marquee_core::{
    SmallVec,
    effect::{Effect, EffectId},
    environment::Clock,
    reducer::Reducer,
    smallvec,
};
use std::sync::Arc;
use std::time::Duration;

/// Autoplay timer
pub const AUTOPLAY: EffectId = EffectId::new("carousel.autoplay");
/// Settle timer of the in-flight animation
pub const ANIMATION: EffectId = EffectId::new("carousel.animation");
/// End of the loop correction window
pub const LOOP_RESET: EffectId = EffectId::new("carousel.loop_reset");
/// Item fetch
pub const FETCH: EffectId = EffectId::new("carousel.fetch");

/// How long transitions stay instant after the loop correction
pub const RESET_DELAY: Duration = Duration::from_millis(50);

type Effects = SmallVec<[Effect<CarouselAction>; 4]>;

// ============================================================================
// Actions
// ============================================================================

/// Inputs to the carousel
#[derive(Clone, Debug, PartialEq)]
pub enum CarouselAction {
    /// The carousel was attached to the page
    Mount,
    /// The item source answered (already normalised)
    ItemsLoaded {
        /// Sequence to display
        items: Vec<Item>,
    },
    /// The carousel was detached; nothing happens after this
    Unmount,
    /// The container was measured
    Resized {
        /// Container width in pixels
        container_width: f64,
    },
    /// Replace the options
    Configure(CarouselConfig),
    /// Pointer entered or left the carousel
    HoverChanged {
        /// Whether the pointer is now over it
        hovered: bool,
    },
    /// Pointer went down on the track
    DragStarted,
    /// Pointer moved during a drag
    DragMoved {
        /// Net horizontal offset since the drag began, in pixels
        offset: f64,
    },
    /// Pointer released
    DragEnded {
        /// Net horizontal offset of the whole drag, in pixels
        offset: f64,
        /// Release velocity, in pixels/second
        velocity: f64,
    },
    /// Autoplay timer fired
    AutoplayTick,
    /// A pagination dot was clicked
    DotSelected {
        /// Dot (logical item) index
        index: usize,
    },
    /// The renderer is about to draw a frame
    Frame,
    /// The animation started under `generation` has reached its target
    AnimationSettled {
        /// Generation of the animation that settled
        generation: u64,
    },
    /// The loop correction window has closed
    ResetFinished,
    /// An item was clicked
    ItemClicked {
        /// Working slot that was clicked
        slot: usize,
    },
    /// A slot's image failed to load
    ImageFailed {
        /// Working slot whose image failed
        slot: usize,
    },
}

// ============================================================================
// Environment
// ============================================================================

/// Opens an item's detail view
pub trait ItemNavigator: Send + Sync {
    /// Navigate to the item with `id`
    fn open(&self, id: &ItemId);
}

/// Environment dependencies for the carousel
#[derive(Clone)]
pub struct CarouselEnvironment {
    /// Clock used to sample animations
    pub clock: Arc<dyn Clock>,
    /// Where items come from
    pub source: Arc<dyn ItemSource>,
    /// Where item clicks go
    pub navigator: Arc<dyn ItemNavigator>,
}

impl CarouselEnvironment {
    /// Creates a new `CarouselEnvironment`
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        source: Arc<dyn ItemSource>,
        navigator: Arc<dyn ItemNavigator>,
    ) -> Self {
        Self {
            clock,
            source,
            navigator,
        }
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Reducer for one carousel
#[derive(Clone, Debug, Default)]
pub struct CarouselReducer;

impl CarouselReducer {
    /// Creates a new `CarouselReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn arm_autoplay(state: &CarouselState) -> Effect<CarouselAction> {
        state.autoplay_schedule().map_or(Effect::None, |delay| {
            Effect::delay(delay, CarouselAction::AutoplayTick).cancellable(AUTOPLAY)
        })
    }

    /// Re-create or tear down the autoplay timer if its schedule changed
    fn sync_autoplay(state: &CarouselState, before: Option<Duration>) -> Effect<CarouselAction> {
        let after = state.autoplay_schedule();
        if after == before {
            Effect::None
        } else if after.is_some() {
            Self::arm_autoplay(state)
        } else {
            tracing::debug!("Autoplay suspended");
            Effect::Cancel(AUTOPLAY)
        }
    }

    /// Sample the in-flight animation into `position` and drop it
    ///
    /// Returns the velocity the track was moving at.
    fn freeze(state: &mut CarouselState, env: &CarouselEnvironment) -> f64 {
        let Some(animation) = state.animation.take() else {
            return 0.0;
        };
        let now = env.clock.now();
        state.position = animation.sample(now);
        state.generation += 1;
        animation.velocity(now)
    }

    /// Animate from wherever the track is toward the current index
    ///
    /// `release` overrides the carried-over velocity (a drag release).
    fn retarget(
        state: &mut CarouselState,
        env: &CarouselEnvironment,
        release: Option<f64>,
    ) -> Effects {
        let carried = Self::freeze(state, env);
        let velocity = release.unwrap_or(carried);
        let target = state.target_position();
        state.generation += 1;

        match state.transition() {
            Transition::Instant => {
                state.position = target;
                let mut effects: Effects = smallvec![Effect::Cancel(ANIMATION)];
                effects.extend(Self::arrive(state));
                effects
            },
            Transition::Spring(spring) => {
                let animation = Animation::spring(
                    spring,
                    state.position,
                    target,
                    velocity,
                    env.clock.now(),
                    state.generation,
                );
                let settle = animation.settle_duration();
                state.animation = Some(animation);
                smallvec![
                    Effect::delay(
                        settle,
                        CarouselAction::AnimationSettled {
                            generation: state.generation,
                        }
                    )
                    .cancellable(ANIMATION)
                ]
            },
        }
    }

    /// The track is at rest on the current index
    ///
    /// Arriving on the ghost slot snaps back to index 0 in the same step and
    /// opens the window in which transitions are instant.
    fn arrive(state: &mut CarouselState) -> Option<Effect<CarouselAction>> {
        if !state.index.is_ghost() {
            return None;
        }

        state.is_resetting = true;
        state.index.correct_to_zero();
        state.position = state.target_position();
        state.generation += 1;
        tracing::debug!("Loop wrapped, corrected to index 0");

        Some(Effect::delay(RESET_DELAY, CarouselAction::ResetFinished).cancellable(LOOP_RESET))
    }

    fn begin_drag(state: &mut CarouselState, env: &CarouselEnvironment) -> Effect<CarouselAction> {
        Self::freeze(state, env);
        state.drag_origin = Some(state.position);
        Effect::Cancel(ANIMATION)
    }

    fn log_index(state: &CarouselState, cause: &'static str) {
        tracing::debug!(
            cause,
            index = state.index.current(),
            logical = state.index.logical(),
            "Index changed"
        );
    }
}

impl Reducer for CarouselReducer {
    type State = CarouselState;
    type Action = CarouselAction;
    type Environment = CarouselEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per input
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if !state.mounted {
            tracing::trace!(?action, "Ignoring action after unmount");
            return SmallVec::new();
        }

        match action {
            // ========== Lifecycle ==========
            CarouselAction::Mount => {
                let source = Arc::clone(&env.source);
                let fetch = Effect::Future(Box::pin(async move {
                    let items = catalog::load(source.as_ref()).await;
                    Some(CarouselAction::ItemsLoaded { items })
                }));
                smallvec![fetch.cancellable(FETCH), Self::arm_autoplay(state)]
            },

            CarouselAction::ItemsLoaded { items } => {
                state.replace_items(items);
                tracing::debug!(count = state.items.len(), "Items loaded");
                smallvec![
                    Effect::Cancel(ANIMATION),
                    Effect::Cancel(LOOP_RESET),
                    Self::arm_autoplay(state)
                ]
            },

            CarouselAction::Unmount => {
                state.mounted = false;
                state.animation = None;
                state.drag_origin = None;
                tracing::debug!("Carousel unmounted");
                smallvec![
                    Effect::Cancel(AUTOPLAY),
                    Effect::Cancel(ANIMATION),
                    Effect::Cancel(LOOP_RESET),
                    Effect::Cancel(FETCH)
                ]
            },

            // ========== Layout & options ==========
            CarouselAction::Resized { container_width } => {
                state.geometry = Geometry::measure(container_width);
                tracing::trace!(
                    container_width,
                    stride = state.geometry.stride(),
                    "Container measured"
                );
                SmallVec::new()
            },

            CarouselAction::Configure(config) => {
                if let Err(error) = config.validate() {
                    tracing::warn!(%error, "Ignoring carousel configuration");
                    return SmallVec::new();
                }

                let before = state.autoplay_schedule();
                let previous = state.index.current();
                let looping = config.loop_items;
                state.config = config;
                state.index.reshape(state.items.len(), looping);

                let mut effects: Effects = smallvec![Self::sync_autoplay(state, before)];
                if state.index.current() != previous {
                    Self::log_index(state, "configure");
                    effects.extend(Self::retarget(state, env, None));
                }
                effects
            },

            CarouselAction::HoverChanged { hovered } => {
                let before = state.autoplay_schedule();
                state.is_hovered = hovered;
                smallvec![Self::sync_autoplay(state, before)]
            },

            // ========== Gestures ==========
            CarouselAction::DragStarted => smallvec![Self::begin_drag(state, env)],

            CarouselAction::DragMoved { offset } => {
                let mut effects = Effects::new();
                let origin = match state.drag_origin {
                    Some(origin) => origin,
                    None => {
                        effects.push(Self::begin_drag(state, env));
                        state.position
                    },
                };
                if offset.is_finite() {
                    state.position = origin + offset;
                    if !state.index.is_looping() {
                        let end = state.geometry.position_for(state.index.last_index());
                        state.position = state.position.clamp(end, 0.0);
                    }
                }
                effects
            },

            CarouselAction::DragEnded { offset, velocity } => {
                state.drag_origin = None;
                let swipe = Swipe::classify(offset, velocity);
                if state.index.apply(swipe) {
                    Self::log_index(state, "swipe");
                }
                let release = if velocity.is_finite() { velocity } else { 0.0 };
                Self::retarget(state, env, Some(release))
            },

            // ========== Autoplay ==========
            CarouselAction::AutoplayTick => {
                if state.autoplay_schedule().is_none() {
                    return SmallVec::new();
                }

                let mut effects = Effects::new();
                if !state.is_dragging() && state.index.advance() {
                    Self::log_index(state, "autoplay");
                    effects.extend(Self::retarget(state, env, None));
                }
                effects.push(Self::arm_autoplay(state));
                effects
            },

            // ========== Pagination ==========
            CarouselAction::DotSelected { index } => {
                let dot = index.min(state.index.item_count() - 1);
                if state.index.set_index(dot) {
                    Self::log_index(state, "pagination");
                    Self::retarget(state, env, None)
                } else {
                    SmallVec::new()
                }
            },

            // ========== Position tracking ==========
            CarouselAction::Frame => {
                if let Some(animation) = &state.animation {
                    state.position = animation.sample(env.clock.now());
                }
                SmallVec::new()
            },

            CarouselAction::AnimationSettled { generation } => {
                let current = state
                    .animation
                    .as_ref()
                    .is_some_and(|animation| animation.generation() == generation);
                if !current {
                    tracing::trace!(generation, "Ignoring stale settle");
                    return SmallVec::new();
                }

                state.animation = None;
                state.position = state.target_position();
                Self::arrive(state).into_iter().collect()
            },

            CarouselAction::ResetFinished => {
                state.is_resetting = false;
                SmallVec::new()
            },

            // ========== Items ==========
            CarouselAction::ItemClicked { slot } => {
                let Some(item) = state.item_at(slot) else {
                    return SmallVec::new();
                };
                let id = item.id.clone();
                let navigator = Arc::clone(&env.navigator);
                tracing::debug!(item = %id, slot, "Item clicked");
                smallvec![Effect::Future(Box::pin(async move {
                    navigator.open(&id);
                    None
                }))]
            },

            CarouselAction::ImageFailed { slot } => {
                if slot < state.working_len() && state.failed_images.insert(slot) {
                    tracing::debug!(slot, "Image failed, showing placeholder");
                }
                SmallVec::new()
            },
        }
    }
}
