//! Atom 1.0 rendering.
//!
//! Serializes a [`FeedDoc`] into an Atom `<feed>` with self and
//! alternate links and, when any entry carries an image, Media RSS
//! thumbnail elements.

use std::collections::BTreeMap;

use anyhow::Result;
use atom_syndication::extension::{ExtensionBuilder, ExtensionMap};
use atom_syndication::{
    Category, CategoryBuilder, ContentBuilder, Entry, EntryBuilder, Feed, FeedBuilder,
    FixedDateTime, GeneratorBuilder, Link, LinkBuilder, Person, PersonBuilder, Text,
};

use super::MEDIA_NAMESPACE;
use super::common::{FeedDoc, FeedEntry};
use crate::site::AuthorInfo;
use crate::utils::date::DateTimeUtc;

/// Render a feed document as an Atom 1.0 feed.
pub fn render_atom(doc: &FeedDoc) -> Result<String> {
    let entries: Vec<Entry> = doc.entries.iter().map(entry_to_atom_entry).collect();

    let self_link: Link = LinkBuilder::default()
        .href(doc.feed_url.clone())
        .rel("self".to_string())
        .mime_type(Some("application/atom+xml".to_string()))
        .build();

    let alternate_link: Link = LinkBuilder::default()
        .href(format!("{}/", doc.site_url.trim_end_matches('/')))
        .rel("alternate".to_string())
        .mime_type(Some("text/html".to_string()))
        .hreflang(doc.lang.clone())
        .build();

    let mut namespaces = BTreeMap::new();
    if doc.entries.iter().any(|entry| entry.image.is_some()) {
        namespaces.insert("media".to_string(), MEDIA_NAMESPACE.to_string());
    }

    let authors: Vec<Person> = doc.author.as_ref().and_then(person).into_iter().collect();

    let categories: Vec<Category> = doc
        .category
        .iter()
        .map(|name| CategoryBuilder::default().term(name.clone()).build())
        .collect();

    let feed: Feed = FeedBuilder::default()
        .title(Text::plain(doc.title.clone()))
        .id(doc.feed_url.clone())
        .updated(fixed_datetime(doc.time))
        .authors(authors)
        .links(vec![self_link, alternate_link])
        .subtitle(Some(Text::plain(doc.description.clone())))
        .generator(Some(
            GeneratorBuilder::default()
                .value(doc.generator.product.clone())
                .version(Some(doc.generator.version.clone()))
                .build(),
        ))
        .lang(doc.lang.clone())
        .categories(categories)
        .namespaces(namespaces)
        .entries(entries)
        .build();

    Ok(feed.to_string())
}

fn entry_to_atom_entry(entry: &FeedEntry) -> Entry {
    let alternate: Link = LinkBuilder::default()
        .href(entry.url.clone())
        .rel("alternate".to_string())
        .mime_type(Some("text/html".to_string()))
        .build();

    let authors: Vec<Person> = entry.author.as_ref().and_then(person).into_iter().collect();

    let categories: Vec<Category> = entry
        .labels
        .iter()
        .map(|label| CategoryBuilder::default().term(label.clone()).build())
        .collect();

    let mut title = Text::plain(entry.title.clone());
    title.lang = entry.lang.clone();

    let summary = entry.summary.clone().map(|value| {
        let mut text = Text::html(value);
        text.lang = entry.lang.clone();
        text
    });

    // Suppressed under excerpt-only upstream, so the body simply maps.
    let content = entry.content.clone().map(|value| {
        ContentBuilder::default()
            .value(Some(value))
            .content_type(Some("html".to_string()))
            .lang(entry.lang.clone())
            .build()
    });

    EntryBuilder::default()
        .title(title)
        .id(entry.url.clone())
        .published(Some(fixed_datetime(entry.date)))
        .updated(fixed_datetime(entry.updated))
        .links(vec![alternate])
        .summary(summary)
        .content(content)
        .authors(authors)
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

/// Atom person construct. A person without a name has no Atom
/// representation and is omitted.
fn person(author: &AuthorInfo) -> Option<Person> {
    let name = author.name.as_deref()?;
    Some(
        PersonBuilder::default()
            .name(name.to_string())
            .email(author.email.clone())
            .uri(author.uri.clone())
            .build(),
    )
}

fn fixed_datetime(dt: DateTimeUtc) -> FixedDateTime {
    dt.to_rfc3339()
        .parse()
        .unwrap_or_else(|_| FixedDateTime::default())
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
