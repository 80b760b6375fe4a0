//! RSS 2.0 rendering.
//!
//! Serializes a [`FeedDoc`] into an `<rss version="2.0">` channel with
//! an `atom:link rel="self"` element and, when any entry carries an
//! image, Media RSS thumbnail elements.

use std::collections::BTreeMap;

use anyhow::{Result, anyhow};
use atom_syndication::LinkBuilder;
use rss::extension::atom::AtomExtensionBuilder;
use rss::extension::{ExtensionBuilder, ExtensionMap};
use rss::validation::Validate;
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, ItemBuilder};

use super::MEDIA_NAMESPACE;
use super::common::{FeedDoc, FeedEntry, author_line};

/// Render a feed document as an RSS 2.0 channel.
pub fn render_rss(doc: &FeedDoc) -> Result<String> {
    let items: Vec<_> = doc.entries.iter().map(entry_to_rss_item).collect();

    let self_link = LinkBuilder::default()
        .rel("self".to_string())
        .href(doc.feed_url.clone())
        .mime_type(Some("application/rss+xml".to_string()))
        .build();

    let mut namespaces = BTreeMap::new();
    if doc.entries.iter().any(|entry| entry.image.is_some()) {
        namespaces.insert("media".to_string(), MEDIA_NAMESPACE.to_string());
    }

    let categories: Vec<_> = doc
        .category
        .iter()
        .map(|name| CategoryBuilder::default().name(name.clone()).build())
        .collect();

    let channel = ChannelBuilder::default()
        .title(doc.title.clone())
        .link(doc.site_url.clone())
        .description(doc.description.clone())
        .language(doc.lang.clone())
        .generator(doc.generator.as_line())
        .managing_editor(author_line(doc.author.as_ref()))
        .last_build_date(doc.time.to_rfc2822())
        .categories(categories)
        .atom_ext(AtomExtensionBuilder::default().links(vec![self_link]).build())
        .namespaces(namespaces)
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("RSS validation failed: {e}"))?;
    Ok(channel.to_string())
}

fn entry_to_rss_item(entry: &FeedEntry) -> rss::Item {
    let categories: Vec<_> = entry
        .labels
        .iter()
        .map(|label| CategoryBuilder::default().name(label.clone()).build())
        .collect();

    // Excerpt-only entries publish the excerpt; otherwise the body is
    // the description and a blank body stays absent.
    let description = if entry.excerpt_only {
        entry.summary.clone()
    } else {
        entry.content.clone()
    };

    ItemBuilder::default()
        .title((!entry.title.is_empty()).then(|| entry.title.clone()))
        .link(Some(entry.url.clone()))
        .guid(
            GuidBuilder::default()
                .permalink(true)
                .value(entry.url.clone())
                .build(),
        )
        .pub_date(entry.date.to_rfc2822())
        .author(author_line(entry.author.as_ref()))
        .description(description)
        .categories(categories)
        .extensions(
            entry
                .image
                .as_deref()
                .map(media_extensions)
                .unwrap_or_default(),
        )
        .build()
}

/// Media RSS elements for an entry image: a `media:thumbnail` and a
/// `media:content` with `medium="image"`.
fn media_extensions(url: &str) -> ExtensionMap {
    let mut thumbnail_attrs = BTreeMap::new();
    thumbnail_attrs.insert("url".to_string(), url.to_string());

    let mut content_attrs = BTreeMap::new();
    content_attrs.insert("url".to_string(), url.to_string());
    content_attrs.insert("medium".to_string(), "image".to_string());

    let thumbnail = ExtensionBuilder::default()
        .name("media:thumbnail".to_string())
        .attrs(thumbnail_attrs)
        .build();
    let content = ExtensionBuilder::default()
        .name("media:content".to_string())
        .attrs(content_attrs)
        .build();

    let mut media = BTreeMap::new();
    media.insert("thumbnail".to_string(), vec![thumbnail]);
    media.insert("content".to_string(), vec![content]);

    let mut extensions = ExtensionMap::default();
    extensions.insert("media".to_string(), media);
    extensions
}
