//! Resolves the feed configuration into concrete feed targets.
//!
//! One target per configured (collection, category) pair, each with its
//! own output route:
//!
//! | collection | category | route                            |
//! |------------|----------|----------------------------------|
//! | posts      | none     | override path or `/feed.xml`     |
//! | posts      | `news`   | `/feed/news.xml`                 |
//! | docs       | none     | override path or `/feed/docs.xml`|
//! | docs       | `news`   | `/feed/docs/news.xml`            |

use crate::site::Site;

/// One feed to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedTarget {
    /// Collection the items are drawn from.
    pub collection: String,
    /// Active category filter.
    pub category: Option<String>,
    /// Site-relative output route.
    pub route: String,
    /// Feed title override from config.
    pub title: Option<String>,
    /// Effective entry limit.
    pub limit: usize,
}

/// Build the target list in stable order: collection declaration order,
/// categories in declared order, the unfiltered target last.
pub fn resolve_targets(site: &Site) -> Vec<FeedTarget> {
    let mut targets = Vec::new();

    for (key, entry) in site.feed.collections() {
        let limit = site.feed.post_limit(&entry);
        let collection = entry.resolved_collection(&key).to_string();

        let mut categories: Vec<Option<String>> = Vec::new();
        for category in entry.categories.clone().unwrap_or_default() {
            if !categories
                .iter()
                .any(|c| c.as_deref() == Some(category.as_str()))
            {
                categories.push(Some(category));
            }
        }
        categories.push(None);

        for category in categories {
            targets.push(FeedTarget {
                collection: collection.clone(),
                category: category.clone(),
                route: feed_route(&key, category.as_deref(), entry.path.as_deref()),
                title: entry.title.clone(),
                limit,
            });
        }
    }

    targets
}

/// Output route for one (collection key, category) pair. Explicit
/// override paths only apply to the unfiltered target.
fn feed_route(key: &str, category: Option<&str>, path: Option<&str>) -> String {
    match (key == "posts", category) {
        (true, None) => path.map_or_else(|| "/feed.xml".to_string(), str::to_string),
        (true, Some(category)) => format!("/feed/{category}.xml"),
        (false, None) => path.map_or_else(|| format!("/feed/{key}.xml"), str::to_string),
        (false, Some(category)) => format!("/feed/{key}/{category}.xml"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfig;

    fn make_site(feed_toml: &str) -> Site {
        Site {
            url: "https://example.com".into(),
            feed: FeedConfig::from_str(feed_toml).unwrap(),
            ..Default::default()
        }
    }

    fn routes(site: &Site) -> Vec<String> {
        resolve_targets(site).into_iter().map(|t| t.route).collect()
    }

    #[test]
    fn test_default_single_target() {
        let site = make_site("");
        let targets = resolve_targets(&site);

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].collection, "posts");
        assert_eq!(targets[0].category, None);
        assert_eq!(targets[0].route, "/feed.xml");
        assert_eq!(targets[0].limit, 10);
    }

    #[test]
    fn test_route_matrix() {
        let site = make_site(
            r#"
categories = ["news"]

[collections.docs]
categories = ["release"]

[collections.posts]
"#,
        );

        assert_eq!(
            routes(&site),
            [
                "/feed/docs/release.xml",
                "/feed/docs.xml",
                "/feed/news.xml",
                "/feed.xml",
            ]
        );
    }

    #[test]
    fn test_explicit_path_applies_to_unfiltered_target_only() {
        let site = make_site(
            r#"
path = "/main.xml"
categories = ["news"]

[collections.docs]
path = "/documentation/feed.xml"
categories = ["release"]
"#,
        );

        assert_eq!(
            routes(&site),
            [
                "/feed/docs/release.xml",
                "/documentation/feed.xml",
                "/feed/news.xml",
                "/main.xml",
            ]
        );
    }

    #[test]
    fn test_unfiltered_target_comes_last() {
        let site = make_site("categories = [\"a\", \"b\"]");
        let targets = resolve_targets(&site);

        assert_eq!(targets.len(), 3);
        assert_eq!(targets[0].category.as_deref(), Some("a"));
        assert_eq!(targets[1].category.as_deref(), Some("b"));
        assert_eq!(targets[2].category, None);
    }

    #[test]
    fn test_categories_deduplicated_in_order() {
        let site = make_site("categories = [\"b\", \"a\", \"b\"]");
        let targets = resolve_targets(&site);

        assert_eq!(targets.len(), 3);
        assert_eq!(targets[0].category.as_deref(), Some("b"));
        assert_eq!(targets[1].category.as_deref(), Some("a"));
        assert_eq!(targets[2].category, None);
    }

    #[test]
    fn test_collection_remap() {
        let site = make_site("[collections.docs]\ncollection = \"articles\"");
        let targets = resolve_targets(&site);

        // Items come from "articles", the route keeps the "docs" key
        assert_eq!(targets[0].collection, "articles");
        assert_eq!(targets[0].route, "/feed/docs.xml");
    }

    #[test]
    fn test_per_collection_limit() {
        let site = make_site("post_limit = 20\n[collections.docs]\npost_limit = 3");
        let targets = resolve_targets(&site);

        assert_eq!(targets[0].limit, 3); // docs
        assert_eq!(targets[1].limit, 20); // posts
    }

    #[test]
    fn test_malformed_collections_degrade_to_posts_only() {
        let site = make_site("collections = \"oops\"");
        assert_eq!(routes(&site), ["/feed.xml"]);
    }
}
