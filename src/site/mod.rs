//! The host site as handed to the generator: configuration, metadata
//! and the per-collection content items.

mod item;
mod metadata;

pub use item::ContentItem;
pub use metadata::{AuthorField, AuthorInfo, SiteMetadata};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::PathBuf;

use crate::config::{ConfigError, FeedConfig};
use crate::utils::date::DateTimeUtc;

/// Everything the host supplies for one build.
///
/// Built once per build invocation and passed explicitly; nothing here
/// is cached across builds, so dev-server config reloads always take
/// effect.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Site {
    /// Site source tree, checked for hand-authored feed files.
    pub source_dir: PathBuf,
    /// Output tree the generated feeds are written under.
    pub output_dir: PathBuf,
    /// Absolute site URL (e.g., "https://example.com").
    pub url: String,
    /// Build timestamp. Injectable so tests can pin it.
    pub time: DateTimeUtc,
    /// Site-wide metadata.
    pub metadata: SiteMetadata,
    /// Product name and version for the generator element.
    pub generator: GeneratorInfo,
    /// Authors table, looked up by reference authors.
    pub authors: FxHashMap<String, AuthorInfo>,
    /// Content items per collection, in the host's display order
    /// (newest first).
    pub collections: FxHashMap<String, Vec<ContentItem>>,
    /// The `[feed]` configuration table.
    pub feed: FeedConfig,
}

impl Default for Site {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::new(),
            output_dir: PathBuf::new(),
            url: String::new(),
            time: DateTimeUtc::now(),
            metadata: SiteMetadata::default(),
            generator: GeneratorInfo::default(),
            authors: FxHashMap::default(),
            collections: FxHashMap::default(),
            feed: FeedConfig::default(),
        }
    }
}

impl Site {
    /// Validate the fields feed generation cannot work without.
    ///
    /// # Checks
    /// - `url` must be set
    /// - `url` must parse as http(s) with a host
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site url is required for feed generation, e.g. \"https://example.com\"".into(),
            ));
        }

        match url::Url::parse(&self.url) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(ConfigError::Validation(format!(
                        "url scheme '{}' not supported, must be http or https",
                        parsed.scheme()
                    )));
                }
                if parsed.host_str().is_none() {
                    return Err(ConfigError::Validation(
                        "site url must have a valid host".into(),
                    ));
                }
            }
            Err(e) => {
                return Err(ConfigError::Validation(format!("invalid site url: {e}")));
            }
        }

        Ok(())
    }

    /// Join a site-relative path onto the site URL.
    pub fn absolute_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Site title, falling back to the site name.
    pub fn title(&self) -> Option<&str> {
        self.metadata
            .title
            .as_deref()
            .or(self.metadata.name.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Channel description, with the conventional fallback.
    pub fn description(&self) -> &str {
        self.metadata
            .description
            .as_deref()
            .or(self.metadata.tagline.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or("RSS Feed")
    }

    /// Items of a collection, empty when the host supplied none.
    pub fn collection(&self, name: &str) -> &[ContentItem] {
        self.collections.get(name).map_or(&[], Vec::as_slice)
    }

    /// Resolve an author field against the authors table.
    ///
    /// A reference that misses the table resolves to nothing; the feed
    /// entry simply omits its author.
    pub fn resolve_author(&self, field: Option<&AuthorField>) -> Option<AuthorInfo> {
        match field {
            Some(AuthorField::Inline(info)) => Some(info.clone()),
            Some(AuthorField::Reference(name)) => self.authors.get(name).cloned(),
            None => None,
        }
    }

    /// Absolute URL of `feed.xslt.xml` when the source tree carries one.
    pub fn stylesheet_href(&self) -> Option<String> {
        self.source_dir
            .join("feed.xslt.xml")
            .exists()
            .then(|| self.absolute_url("feed.xslt.xml"))
    }
}

/// Product name and version advertised in the generator element.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorInfo {
    pub product: String,
    pub version: String,
}

impl Default for GeneratorInfo {
    fn default() -> Self {
        Self {
            product: "Sitefeed".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

impl GeneratorInfo {
    /// One-line generator string (RSS `generator` element).
    pub fn as_line(&self) -> String {
        format!("{} v{}", self.product, self.version)
    }
}
