//! # Marquee Carousel
//!
//! The interactive engine behind the storefront's featured-events carousel.
//!
//! A carousel shows a short sequence of items one at a time on a horizontal
//! track. It can be dragged, flicked, driven by pagination dots or advanced
//! on a timer, and in loop mode it wraps from the last item back to the first
//! without visibly rewinding. Each item leans into a 3D turn based on how far
//! the track has moved.
//!
//! ## Architecture
//!
//! All behaviour lives in [`CarouselReducer`]: gestures, timer ticks, layout
//! changes and loaded items are [`CarouselAction`]s, and timers are
//! cancellable effects run by a `marquee_runtime::Store`. The pieces the
//! reducer composes are plain values:
//!
//! - [`geometry`]: item width and stride from the container width
//! - [`gesture`]: drag-end classification
//! - [`index`]: the only place the current index changes
//! - [`motion`]: spring animation of the track position
//! - [`perspective`]: per-slot rotation
//! - [`pagination`]: the dot indicator
//! - [`catalog`]: where items come from
//!
//! ## Example
//!
//! ```no_run
//! use marquee_carousel::{
//!     CarouselAction, CarouselConfig, CarouselEnvironment, CarouselReducer, CarouselState,
//!     ItemId, ItemNavigator, UnavailableSource,
//! };
//! use marquee_core::environment::SystemClock;
//! use marquee_runtime::Store;
//! use std::sync::Arc;
//!
//! struct Ignore;
//! impl ItemNavigator for Ignore {
//!     fn open(&self, _id: &ItemId) {}
//! }
//!
//! # async fn example() {
//! let env = CarouselEnvironment::new(
//!     Arc::new(SystemClock),
//!     Arc::new(UnavailableSource),
//!     Arc::new(Ignore),
//! );
//! let config = CarouselConfig::default().with_loop(true);
//! let store = Store::new(
//!     CarouselState::new(Vec::new(), config),
//!     CarouselReducer::new(),
//!     env,
//! );
//!
//! let _ = store.send(CarouselAction::Resized { container_width: 400.0 }).await;
//! let _ = store.send(CarouselAction::Mount).await;
//! let index = store.state(|s| s.current_index()).await;
//! assert_eq!(index, 0);
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod index;
pub mod motion;
pub mod pagination;
pub mod perspective;
pub mod reducer;
pub mod state;
pub mod view;

pub use catalog::{Item, ItemId, ItemRecord, ItemSource, StaticSource, UnavailableSource};
pub use config::CarouselConfig;
pub use error::{CarouselError, Result};
pub use reducer::{CarouselAction, CarouselEnvironment, CarouselReducer, ItemNavigator};
pub use state::CarouselState;
pub use view::SlideView;
