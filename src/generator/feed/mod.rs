//! Feed rendering (RSS, Atom).
//!
//! Turns an assembled document into serialized XML:
//!
//! - **RSS 2.0**: the default format
//! - **Atom 1.0**: selected via `feed.format = "atom"`

use anyhow::Result;

use crate::config::FeedFormat;

mod atom;
mod common;
mod rss;

pub use common::{FeedDoc, FeedEntry, assemble};

/// Media RSS namespace, declared only when an entry has an image.
pub(crate) const MEDIA_NAMESPACE: &str = "http://search.yahoo.com/mrss/";

/// Render an assembled document in the configured format.
pub fn render(doc: &FeedDoc, format: FeedFormat) -> Result<String> {
    match format {
        FeedFormat::Rss => rss::render_rss(doc),
        FeedFormat::Atom => atom::render_atom(doc),
    }
}
