//! Site metadata supplied by the host.

use serde::Deserialize;

/// Site-wide metadata used for channel-level feed fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteMetadata {
    /// Site title.
    pub title: Option<String>,
    /// Site name, the title fallback.
    pub name: Option<String>,
    /// Site description.
    pub description: Option<String>,
    /// Shorter description, used when `description` is unset.
    pub tagline: Option<String>,
    /// Site author, inline or by reference.
    pub author: Option<AuthorField>,
    /// Contact email, pairs with a referenced author name.
    pub email: Option<String>,
    /// Language code (e.g., "en", "zh-Hans").
    pub lang: Option<String>,
}

/// An author value is either a structured table or a plain name string.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AuthorField {
    /// Structured author with contact details.
    Inline(AuthorInfo),
    /// Author referenced by name, resolved against the authors table.
    Reference(String),
}

/// Structured author details.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AuthorInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub uri: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        author: AuthorField,
    }

    #[test]
    fn test_author_field_string() {
        let holder: Holder = toml::from_str("author = \"sam\"").unwrap();
        assert_eq!(holder.author, AuthorField::Reference("sam".into()));
    }

    #[test]
    fn test_author_field_table() {
        let holder: Holder =
            toml::from_str("author = { name = \"Sam\", email = \"sam@example.com\" }").unwrap();
        assert_eq!(
            holder.author,
            AuthorField::Inline(AuthorInfo {
                name: Some("Sam".into()),
                email: Some("sam@example.com".into()),
                uri: None,
            })
        );
    }

    #[test]
    fn test_metadata_defaults() {
        let metadata: SiteMetadata = toml::from_str("").unwrap();
        assert!(metadata.title.is_none());
        assert!(metadata.author.is_none());
        assert!(metadata.lang.is_none());
    }
}
