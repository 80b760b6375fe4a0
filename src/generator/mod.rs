//! Feed generation from site state.
//!
//! Resolves the configured feed targets, assembles and renders each
//! one, and writes the results under the output directory:
//!
//! - **Targets**: one per (collection, category) pair
//! - **Rendering**: RSS 2.0 or Atom 1.0 per the configured format
//!
//! A target whose route matches a file in the site's source tree is a
//! hand-authored feed and is skipped, never overwritten.

pub mod feed;
pub mod target;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::FeedFormat;
use crate::site::Site;
use crate::utils::xml::finalize_document;
use crate::{debug, log};
use target::resolve_targets;

/// Generate every configured feed for the site.
///
/// Returns the written paths, in target order.
pub fn generate(site: &Site) -> Result<Vec<PathBuf>> {
    site.validate()?;

    let stylesheet = site.stylesheet_href();
    let mut written = Vec::new();

    for target in resolve_targets(site) {
        let relative = target.route.trim_start_matches('/');
        if site.source_dir.join(relative).exists() {
            debug!("feed"; "skipping {}, found in source tree", target.route);
            continue;
        }

        let doc = feed::assemble(site, &target);
        let xml = feed::render(&doc, site.feed.format)?;
        let xml = finalize_document(&xml, stylesheet.as_deref());

        let path = site.output_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, &xml)
            .with_context(|| format!("Failed to write feed to {}", path.display()))?;

        match site.feed.format {
            FeedFormat::Rss => log!("rss"; "{}", target.route),
            FeedFormat::Atom => log!("atom"; "{}", target.route),
        }
        written.push(path);
    }

    Ok(written)
}
