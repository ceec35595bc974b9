//! Site-wide identity constants and page metadata.
//!
//! The brand values are compiled in; only the public URL comes from
//! configuration. Page metadata starts from the site-wide OpenGraph
//! defaults and individual pages override what they know better, keeping
//! the default image unless the page brings its own.

use serde::Serialize;

pub const SITE_NAME: &str = "Afrique en Lumière";
pub const SITE_TAGLINE: &str = "Creative Media and Journalism Website";
pub const SITE_DESCRIPTION: &str =
    "Creative Media and Journalism Website showcasing African stories and voices.";

/// Default OpenGraph image, served relative to the public site URL.
pub const DEFAULT_OG_IMAGE_PATH: &str = "/website-template-OG.webp";

/// Metadata rendered into a page's `<head>`.
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub og_type: &'static str,
    pub og_image: String,
    pub url: String,
    pub site_name: &'static str,
}

impl PageMeta {
    /// Site-wide defaults for a page at `path` (e.g. "/fr/posts").
    pub fn defaults(site_url: &str, path: &str) -> Self {
        let site_url = site_url.trim_end_matches('/');
        Self {
            title: SITE_NAME.to_string(),
            description: SITE_DESCRIPTION.to_string(),
            og_type: "website",
            og_image: format!("{site_url}{DEFAULT_OG_IMAGE_PATH}"),
            url: format!("{site_url}{path}"),
            site_name: SITE_NAME,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_type(mut self, og_type: &'static str) -> Self {
        self.og_type = og_type;
        self
    }

    /// Override the OpenGraph image only when the page has one.
    pub fn with_image(mut self, image: Option<String>) -> Self {
        if let Some(image) = image {
            self.og_image = image;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let meta = PageMeta::defaults("https://afriqueenlumiere.com", "/fr");

        assert_eq!(meta.title, SITE_NAME);
        assert_eq!(meta.url, "https://afriqueenlumiere.com/fr");
        assert_eq!(
            meta.og_image,
            "https://afriqueenlumiere.com/website-template-OG.webp"
        );
        assert_eq!(meta.og_type, "website");
    }

    #[test]
    fn test_defaults_trims_trailing_slash() {
        let meta = PageMeta::defaults("http://localhost:8080/", "/en/posts");
        assert_eq!(meta.url, "http://localhost:8080/en/posts");
    }

    #[test]
    fn test_overrides_merge_over_defaults() {
        let meta = PageMeta::defaults("https://afriqueenlumiere.com", "/fr/posts/lumiere")
            .with_title("Une histoire")
            .with_description("Résumé")
            .with_type("article")
            .with_image(Some("https://media.example.com/hero.webp".to_string()));

        assert_eq!(meta.title, "Une histoire");
        assert_eq!(meta.description, "Résumé");
        assert_eq!(meta.og_type, "article");
        assert_eq!(meta.og_image, "https://media.example.com/hero.webp");
        assert_eq!(meta.site_name, SITE_NAME);
    }

    #[test]
    fn test_missing_image_keeps_default() {
        let meta = PageMeta::defaults("https://afriqueenlumiere.com", "/fr").with_image(None);
        assert_eq!(
            meta.og_image,
            "https://afriqueenlumiere.com/website-template-OG.webp"
        );
    }
}
