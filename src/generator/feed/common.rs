//! Feed assembly: selects the items for one target and shapes them
//! into a format-independent document.

use crate::generator::target::FeedTarget;
use crate::site::{AuthorField, AuthorInfo, ContentItem, GeneratorInfo, Site};
use crate::utils::date::DateTimeUtc;
use crate::utils::text::{capitalize_words, normalize_whitespace, smartify, strip_html};

/// Channel-level document, ready for serialization.
#[derive(Debug, Clone)]
pub struct FeedDoc {
    /// Composed channel title.
    pub title: String,
    /// Channel description.
    pub description: String,
    /// Site root URL.
    pub site_url: String,
    /// Absolute URL of this feed document.
    pub feed_url: String,
    /// Active category filter, echoed as a channel category.
    pub category: Option<String>,
    /// Site language.
    pub lang: Option<String>,
    /// Channel author, already paired with the site email.
    pub author: Option<AuthorInfo>,
    /// Generator product and version.
    pub generator: GeneratorInfo,
    /// Build timestamp.
    pub time: DateTimeUtc,
    /// Entries, newest first.
    pub entries: Vec<FeedEntry>,
}

/// One rendered entry.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    /// Plain-text title, typographically cleaned.
    pub title: String,
    /// Absolute item URL.
    pub url: String,
    /// Publish timestamp.
    pub date: DateTimeUtc,
    /// Last-modified timestamp.
    pub updated: DateTimeUtc,
    /// Effective excerpt-only flag for this item.
    pub excerpt_only: bool,
    /// Rendered HTML body, absent under excerpt-only or when blank.
    pub content: Option<String>,
    /// Excerpt, absent when blank.
    pub summary: Option<String>,
    /// Resolved author.
    pub author: Option<AuthorInfo>,
    /// Categories and tags, in item order.
    pub labels: Vec<String>,
    /// Content-level language override.
    pub lang: Option<String>,
    /// Thumbnail URL, item image else the site-wide default.
    pub image: Option<String>,
}

/// Assemble the document for one target.
pub fn assemble(site: &Site, target: &FeedTarget) -> FeedDoc {
    let entries: Vec<FeedEntry> = site
        .collection(&target.collection)
        .iter()
        .filter(|item| match &target.category {
            Some(category) => item.categories.iter().any(|c| c == category),
            None => true,
        })
        .take(target.limit)
        .map(|item| build_entry(site, item))
        .collect();

    FeedDoc {
        title: compose_title(site, target),
        description: site.description().to_string(),
        site_url: site.url.clone(),
        feed_url: site.absolute_url(&target.route),
        category: target.category.clone(),
        lang: site.metadata.lang.clone(),
        author: channel_author(site),
        generator: site.generator.clone(),
        time: site.time,
        entries,
    }
}

/// Channel title: configured or site title, then the collection part
/// (unless "posts"), then the category part, typographically cleaned.
fn compose_title(site: &Site, target: &FeedTarget) -> String {
    let mut title = target
        .title
        .clone()
        .or_else(|| site.title().map(str::to_string))
        .unwrap_or_default();

    if target.collection != "posts" {
        title = format!("{title} | {}", capitalize_words(&target.collection));
    }
    if let Some(category) = &target.category {
        title = format!("{title} | {}", capitalize_words(category));
    }

    smartify(&title).into_owned()
}

fn build_entry(site: &Site, item: &ContentItem) -> FeedEntry {
    let excerpt_only = item.excerpt_only.or(site.feed.excerpt_only).unwrap_or(false);

    let title = item
        .title
        .as_deref()
        .map(|t| normalize_whitespace(&strip_html(&smartify(t))))
        .unwrap_or_default();

    FeedEntry {
        title,
        url: item.url.clone(),
        date: item.date,
        updated: item.last_updated(),
        excerpt_only,
        content: if excerpt_only {
            None
        } else {
            presence(&item.body)
        },
        summary: item.excerpt.as_deref().and_then(presence),
        author: site.resolve_author(item.author.as_ref()),
        labels: item.labels().map(str::to_string).collect(),
        lang: item.lang.clone(),
        image: item.image.clone().or_else(|| site.feed.image.clone()),
    }
}

/// Channel author. An author string or a structured author without an
/// email is paired with the site-level email; a bare site email stands
/// alone.
fn channel_author(site: &Site) -> Option<AuthorInfo> {
    match &site.metadata.author {
        Some(AuthorField::Inline(info)) => Some(AuthorInfo {
            name: info.name.clone(),
            email: info.email.clone().or_else(|| site.metadata.email.clone()),
            uri: info.uri.clone(),
        }),
        Some(AuthorField::Reference(name)) => Some(AuthorInfo {
            name: Some(name.clone()),
            email: site.metadata.email.clone(),
            uri: None,
        }),
        None => site.metadata.email.clone().map(|email| AuthorInfo {
            name: None,
            email: Some(email),
            uri: None,
        }),
    }
}

/// RSS author line: `email (name)` or a bare email. An author without
/// an email has no RSS representation and is omitted.
pub fn author_line(author: Option<&AuthorInfo>) -> Option<String> {
    let author = author?;
    let email = author.email.as_deref()?;
    Some(match author.name.as_deref() {
        Some(name) => format!("{email} ({name})"),
        None => email.to_string(),
    })
}

fn presence(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
