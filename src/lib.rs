//! RSS and Atom feed generation for static site builds.
//!
//! The host hands over its site state (configuration, metadata and the
//! rendered collections); [`generate`] resolves the configured feed
//! targets and writes one XML document per (collection, category)
//! pair. [`feed_meta_link`] renders the matching `<link>` element for
//! page heads.
//!
//! # Example
//!
//! ```ignore
//! let site: sitefeed::Site = toml::from_str(&config)?;
//! let written = sitefeed::generate(&site)?;
//! ```

pub mod config;
pub mod generator;
pub mod logger;
pub mod meta;
pub mod site;
pub mod utils;

pub use config::{CollectionOverride, ConfigError, FeedConfig, FeedFormat};
pub use generator::generate;
pub use generator::target::{FeedTarget, resolve_targets};
pub use logger::set_verbose;
pub use meta::{FeedMetaTag, TemplateTag, feed_meta_link};
pub use site::{AuthorField, AuthorInfo, ContentItem, GeneratorInfo, Site, SiteMetadata};
