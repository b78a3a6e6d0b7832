//! Carousel items and where they come from.
//!
//! The storefront's event catalog is an external collaborator reached through
//! [`ItemSource`]. Whatever it returns is normalised before the engine sees
//! it: at most [`MAX_ITEMS`] entries, and the built-in fallback sequence when
//! the source fails or comes back empty.

use crate::error::{CarouselError, Result};
use crate::view::PLACEHOLDER_IMAGE;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of items taken from the source
pub const MAX_ITEMS: usize = 5;

/// Identifier used to route to an item's detail view
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    /// Create an item id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One card in the carousel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Routing identifier
    pub id: ItemId,
    /// Image URL or asset path
    pub image_ref: String,
    /// Headline
    pub title: String,
    /// Secondary line
    pub subtitle: String,
}

impl Item {
    /// Create an item
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        image_ref: impl Into<String>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
    ) -> Self {
        Self {
            id: ItemId::new(id),
            image_ref: image_ref.into(),
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }
}

/// Record shape returned by the catalog service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Event identifier
    pub id: String,
    /// Poster image, if the event has one
    #[serde(default)]
    pub image: Option<String>,
    /// Event title
    pub title: String,
    /// Venue, date or tagline
    #[serde(default)]
    pub subtitle: Option<String>,
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        Self {
            id: ItemId(record.id),
            image_ref: record
                .image
                .filter(|image| !image.trim().is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            title: record.title,
            subtitle: record.subtitle.unwrap_or_default(),
        }
    }
}

/// Asynchronous supplier of item records
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Fetch the current records, in display order
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::Source`] when the catalog is unavailable.
    async fn fetch(&self) -> Result<Vec<ItemRecord>>;
}

/// Item source backed by a fixed list of records
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<ItemRecord>,
}

impl StaticSource {
    /// Create a source that always returns `records`
    #[must_use]
    pub const fn new(records: Vec<ItemRecord>) -> Self {
        Self { records }
    }

    /// Create a source from a JSON array of records
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::Decode`] if the JSON is not an array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

#[async_trait]
impl ItemSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<ItemRecord>> {
        Ok(self.records.clone())
    }
}

/// The built-in sequence shown when the catalog has nothing to offer
#[must_use]
pub fn fallback_items() -> Vec<Item> {
    vec![
        Item::new(
            "featured-concerts",
            "/images/featured/concerts.jpg",
            "Live Concerts",
            "Feel the music up close",
        ),
        Item::new(
            "featured-theatre",
            "/images/featured/theatre.jpg",
            "Theatre & Shows",
            "Tonight's best seats",
        ),
        Item::new(
            "featured-sports",
            "/images/featured/sports.jpg",
            "Sports Events",
            "Never miss a match",
        ),
    ]
}

/// Turn a fetch result into the sequence handed to the engine
///
/// Records with a blank id are dropped, at most [`MAX_ITEMS`] are kept, and
/// an error or empty result yields [`fallback_items`].
#[must_use]
pub fn normalize(result: Result<Vec<ItemRecord>>) -> Vec<Item> {
    match result {
        Ok(records) => {
            let items: Vec<Item> = records
                .into_iter()
                .filter(|record| !record.id.trim().is_empty())
                .take(MAX_ITEMS)
                .map(Item::from)
                .collect();
            if items.is_empty() {
                tracing::warn!("Item source returned no items, using fallback sequence");
                fallback_items()
            } else {
                items
            }
        },
        Err(error) => {
            tracing::warn!(%error, "Item source failed, using fallback sequence");
            fallback_items()
        },
    }
}

/// Fetch from `source` and normalise
pub async fn load(source: &dyn ItemSource) -> Vec<Item> {
    normalize(source.fetch().await)
}

/// Source that always fails; useful when no catalog is wired up
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSource;

#[async_trait]
impl ItemSource for UnavailableSource {
    async fn fetch(&self) -> Result<Vec<ItemRecord>> {
        Err(CarouselError::Source("no item source configured".to_string()))
    }
}
