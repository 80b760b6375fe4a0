//! Feed meta-link rendering for page heads.
//!
//! Produces the `<link rel="alternate">` element advertising the
//! primary feed, both as a callable helper and as a template tag the
//! host engine can register.

use crate::site::Site;
use crate::utils::xml::escape_xml;

/// Trait for tags invocable from host page templates.
pub trait TemplateTag {
    /// Name the tag is registered under.
    fn name(&self) -> &'static str;

    /// Render the tag's output for the current site.
    fn render(&self, site: &Site) -> String;
}

/// The `feed_meta` template tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedMetaTag;

impl TemplateTag for FeedMetaTag {
    fn name(&self) -> &'static str {
        "feed_meta"
    }

    fn render(&self, site: &Site) -> String {
        feed_meta_link(site)
    }
}

/// Render the meta-link element for the site's primary feed.
///
/// Attribute order is fixed; an empty value drops its attribute.
pub fn feed_meta_link(site: &Site) -> String {
    let mut attrs: Vec<(&str, String)> = vec![
        ("type", site.feed.format.mime_type().to_string()),
        ("rel", "alternate".to_string()),
        ("href", site.absolute_url(&site.feed.primary_path())),
    ];
    if let Some(title) = site.title() {
        attrs.push(("title", title.to_string()));
    }

    let attrs = attrs
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| format!("{name}=\"{}\"", escape_xml(value)))
        .collect::<Vec<_>>()
        .join(" ");

    format!("<link {attrs} />")
}
