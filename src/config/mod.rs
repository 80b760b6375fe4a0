//! Feed configuration, read from the host site's `[feed]` table.
//!
//! ```toml
//! [feed]
//! format = "rss"              # rss | atom
//! path = "feed.xml"           # primary feed output path
//! post_limit = 10
//! categories = ["news"]
//! excerpt_only = false
//! image = "/images/card.png"  # default entry thumbnail
//!
//! # collections: list of names, or map of name -> overrides
//! [feed.collections.docs]
//! path = "/documentation/feed.xml"
//! categories = ["release"]
//! post_limit = 5
//! ```
//!
//! A collection override without an explicit `collection` field draws
//! items from the collection named by its own key.

mod error;

pub use error::ConfigError;

use serde::Deserialize;

use crate::debug;

// ============================================================================
// FeedFormat
// ============================================================================

/// Feed output format.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    /// RSS 2.0 format (default).
    #[default]
    Rss,
    /// Atom 1.0 format.
    Atom,
}

impl FeedFormat {
    /// MIME type used for self links and the meta-link tag.
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Rss => "application/rss+xml",
            Self::Atom => "application/atom+xml",
        }
    }
}

// ============================================================================
// FeedConfig
// ============================================================================

/// The `[feed]` table of the host site configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Output format for every generated feed.
    pub format: FeedFormat,
    /// Primary feed output path (defaults to `feed.xml`).
    pub path: Option<String>,
    /// Site-wide entry limit (defaults to 10).
    #[serde(deserialize_with = "deserialize_limit")]
    pub post_limit: Option<usize>,
    /// Site-wide category filters, applied to the `posts` collection.
    pub categories: Vec<String>,
    /// Collections to generate feeds for.
    pub collections: CollectionsField,
    /// Emit excerpts instead of full content.
    pub excerpt_only: Option<bool>,
    /// Default entry thumbnail URL.
    pub image: Option<String>,
}

impl FeedConfig {
    /// Parse from a TOML string, logging unknown keys at debug level.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let (config, ignored) = Self::parse_with_ignored(content)?;
        for field in &ignored {
            debug!("config"; "ignoring unknown feed key: {}", field);
        }
        Ok(config)
    }

    /// Parse from an already-deserialized TOML value (the `feed` table
    /// as the host hands it over).
    pub fn from_value(value: toml::Value) -> Result<Self, ConfigError> {
        Ok(value.try_into()?)
    }

    /// Parse TOML content, collecting any unknown fields.
    pub fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// The normalized, ordered list of collections to process.
    ///
    /// List and map config shapes come out identical here. The `posts`
    /// entry is always present (appended last when not declared) and
    /// inherits the legacy top-level `path`/`categories` keys for any
    /// field it does not set itself.
    pub fn collections(&self) -> Vec<(String, CollectionOverride)> {
        let mut entries: Vec<(String, CollectionOverride)> = match &self.collections {
            CollectionsField::Names(names) => names
                .iter()
                .map(|name| (name.clone(), CollectionOverride::default()))
                .collect(),
            CollectionsField::Overrides(map) => map
                .iter()
                .map(|(name, value)| {
                    (name.clone(), value.clone().try_into().unwrap_or_default())
                })
                .collect(),
            CollectionsField::Invalid(_) => Vec::new(),
        };

        if !entries.iter().any(|(name, _)| name == "posts") {
            entries.push(("posts".into(), CollectionOverride::default()));
        }

        for (name, entry) in &mut entries {
            if name != "posts" {
                continue;
            }
            if entry.path.is_none() {
                entry.path = self.path.clone();
            }
            if entry.categories.is_none() {
                entry.categories = Some(self.categories.clone());
            }
        }

        entries
    }

    /// Path of the primary feed, advertised by the meta-link tag.
    pub fn primary_path(&self) -> String {
        self.path
            .clone()
            .or_else(|| {
                self.collections()
                    .into_iter()
                    .find_map(|(name, entry)| if name == "posts" { entry.path } else { None })
            })
            .unwrap_or_else(|| "feed.xml".into())
    }

    /// Effective entry limit for one collection.
    pub fn post_limit(&self, entry: &CollectionOverride) -> usize {
        entry.post_limit.or(self.post_limit).unwrap_or(10)
    }
}

// ============================================================================
// Collections Field
// ============================================================================

/// The `feed.collections` key accepts two shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CollectionsField {
    /// Plain list of collection names.
    Names(Vec<String>),
    /// Map of collection name to overrides.
    Overrides(toml::map::Map<String, toml::Value>),
    /// Anything else degrades to an empty set.
    /// Must be placed last due to #[serde(untagged)].
    Invalid(toml::Value),
}

impl Default for CollectionsField {
    fn default() -> Self {
        Self::Names(Vec::new())
    }
}

/// Per-collection settings under `feed.collections.<name>`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CollectionOverride {
    /// Output path for the collection's primary feed.
    pub path: Option<String>,
    /// Category filters for this collection.
    pub categories: Option<Vec<String>>,
    /// Entry limit for this collection's feeds.
    #[serde(deserialize_with = "deserialize_limit")]
    pub post_limit: Option<usize>,
    /// Feed title override.
    pub title: Option<String>,
    /// Draw items from a differently-named collection.
    pub collection: Option<String>,
}

impl CollectionOverride {
    /// The collection whose items this feed draws from.
    pub fn resolved_collection<'a>(&'a self, key: &'a str) -> &'a str {
        self.collection.as_deref().unwrap_or(key)
    }
}

/// Deserialize a post limit, coercing integer strings. Other shapes
/// degrade to unset.
fn deserialize_limit<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<toml::Value> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        toml::Value::Integer(n) => usize::try_from(n).ok(),
        toml::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FeedConfig::from_str("").unwrap();
        assert_eq!(config.format, FeedFormat::Rss);
        assert!(config.path.is_none());
        assert!(config.post_limit.is_none());
        assert!(config.categories.is_empty());
        assert!(config.excerpt_only.is_none());
        assert!(config.image.is_none());

        let collections = config.collections();
        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].0, "posts");
    }

    #[test]
    fn test_format() {
        let config = FeedConfig::from_str("format = \"atom\"").unwrap();
        assert_eq!(config.format, FeedFormat::Atom);
        assert_eq!(config.format.mime_type(), "application/atom+xml");
        assert_eq!(FeedFormat::Rss.mime_type(), "application/rss+xml");
    }

    #[test]
    fn test_post_limit_integer() {
        let config = FeedConfig::from_str("post_limit = 5").unwrap();
        assert_eq!(config.post_limit, Some(5));
    }

    #[test]
    fn test_post_limit_string() {
        let config = FeedConfig::from_str("post_limit = \"7\"").unwrap();
        assert_eq!(config.post_limit, Some(7));
    }

    #[test]
    fn test_post_limit_invalid_shapes() {
        let config = FeedConfig::from_str("post_limit = -3").unwrap();
        assert_eq!(config.post_limit, None);

        let config = FeedConfig::from_str("post_limit = true").unwrap();
        assert_eq!(config.post_limit, None);

        let config = FeedConfig::from_str("post_limit = \"many\"").unwrap();
        assert_eq!(config.post_limit, None);
    }

    #[test]
    fn test_effective_post_limit() {
        let config = FeedConfig::from_str("post_limit = 25").unwrap();
        let plain = CollectionOverride::default();
        let limited = CollectionOverride {
            post_limit: Some(2),
            ..Default::default()
        };

        assert_eq!(config.post_limit(&plain), 25);
        assert_eq!(config.post_limit(&limited), 2);
        assert_eq!(FeedConfig::default().post_limit(&plain), 10);
    }

    #[test]
    fn test_collections_list() {
        let config = FeedConfig::from_str("collections = [\"posts\", \"docs\"]").unwrap();
        let collections = config.collections();

        assert_eq!(collections.len(), 2);
        assert_eq!(collections[0].0, "posts");
        assert_eq!(collections[1].0, "docs");
        assert_eq!(collections[1].1, CollectionOverride::default());
    }

    #[test]
    fn test_collections_map() {
        let config = FeedConfig::from_str(
            r#"
[collections.docs]
path = "/documentation/feed.xml"
categories = ["release"]
post_limit = 5

[collections.posts]
title = "Main Feed"
"#,
        )
        .unwrap();
        let collections = config.collections();

        assert_eq!(collections.len(), 2);
        assert_eq!(collections[0].0, "docs");
        assert_eq!(
            collections[0].1.path.as_deref(),
            Some("/documentation/feed.xml")
        );
        assert_eq!(
            collections[0].1.categories,
            Some(vec!["release".to_string()])
        );
        assert_eq!(collections[0].1.post_limit, Some(5));
        assert_eq!(collections[1].0, "posts");
        assert_eq!(collections[1].1.title.as_deref(), Some("Main Feed"));
    }

    #[test]
    fn test_collections_malformed() {
        let config = FeedConfig::from_str("collections = 17").unwrap();
        let collections = config.collections();

        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].0, "posts");
    }

    #[test]
    fn test_malformed_override_degrades() {
        let config = FeedConfig::from_str("[collections.docs]\ncategories = \"news\"").unwrap();
        let collections = config.collections();

        assert_eq!(collections[0].0, "docs");
        assert_eq!(collections[0].1, CollectionOverride::default());
    }

    #[test]
    fn test_posts_appended_last_when_absent() {
        let config = FeedConfig::from_str("collections = [\"docs\"]").unwrap();
        let names: Vec<String> = config.collections().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["docs", "posts"]);
    }

    #[test]
    fn test_posts_inherits_top_level_keys() {
        let config =
            FeedConfig::from_str("path = \"/custom.xml\"\ncategories = [\"updates\"]").unwrap();
        let collections = config.collections();
        let posts = &collections[0].1;

        assert_eq!(posts.path.as_deref(), Some("/custom.xml"));
        assert_eq!(posts.categories, Some(vec!["updates".to_string()]));
    }

    #[test]
    fn test_posts_own_keys_win() {
        let config = FeedConfig::from_str(
            "path = \"/top.xml\"\n[collections.posts]\npath = \"/own.xml\"\ncategories = []",
        )
        .unwrap();
        let collections = config.collections();
        let posts = &collections[0].1;

        assert_eq!(posts.path.as_deref(), Some("/own.xml"));
        assert_eq!(posts.categories, Some(Vec::new()));
    }

    #[test]
    fn test_primary_path() {
        assert_eq!(FeedConfig::default().primary_path(), "feed.xml");

        let config = FeedConfig::from_str("path = \"atom.xml\"").unwrap();
        assert_eq!(config.primary_path(), "atom.xml");

        let config = FeedConfig::from_str("[collections.posts]\npath = \"/blog/feed.xml\"").unwrap();
        assert_eq!(config.primary_path(), "/blog/feed.xml");
    }

    #[test]
    fn test_resolved_collection() {
        let entry = CollectionOverride::default();
        assert_eq!(entry.resolved_collection("docs"), "docs");

        let entry = CollectionOverride {
            collection: Some("articles".into()),
            ..Default::default()
        };
        assert_eq!(entry.resolved_collection("docs"), "articles");
    }

    #[test]
    fn test_parse_with_ignored() {
        let (config, ignored) =
            FeedConfig::parse_with_ignored("post_limit = 3\nbogus = true").unwrap();
        assert_eq!(config.post_limit, Some(3));
        assert_eq!(ignored, ["bogus"]);
    }

    #[test]
    fn test_from_value() {
        let value: toml::Value = toml::from_str("format = \"atom\"\npost_limit = 4").unwrap();
        let config = FeedConfig::from_value(value).unwrap();
        assert_eq!(config.format, FeedFormat::Atom);
        assert_eq!(config.post_limit, Some(4));
    }
}
