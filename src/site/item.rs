//! One published content unit, already rendered by the host.

use serde::Deserialize;

use super::AuthorField;
use crate::utils::date::DateTimeUtc;

/// A rendered item from a host collection.
///
/// The host owns parsing, Markdown rendering and URL resolution; items
/// arrive here read-only with absolute URLs and rendered HTML bodies.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContentItem {
    /// Item title (may contain markup).
    pub title: Option<String>,
    /// Absolute URL of the item.
    pub url: String,
    /// Publish timestamp.
    pub date: DateTimeUtc,
    /// Last-modified timestamp, falls back to `date`.
    pub updated: Option<DateTimeUtc>,
    /// Rendered HTML body.
    pub body: String,
    /// Short summary, used for excerpt-only feeds.
    pub excerpt: Option<String>,
    /// Category tags.
    pub categories: Vec<String>,
    /// Free-form tags, treated like categories at output time.
    pub tags: Vec<String>,
    /// Item author, inline or by reference.
    pub author: Option<AuthorField>,
    /// Content-level language override.
    pub lang: Option<String>,
    /// Thumbnail image URL.
    pub image: Option<String>,
    /// Per-item excerpt-only override.
    pub excerpt_only: Option<bool>,
}

impl ContentItem {
    /// Every category and tag, in item order. Both become category
    /// elements on the output entry.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .chain(self.tags.iter())
            .map(String::as_str)
    }

    /// Timestamp for "updated" fields, the publish date when the item
    /// was never modified.
    pub fn last_updated(&self) -> DateTimeUtc {
        self.updated.unwrap_or(self.date)
    }
}
