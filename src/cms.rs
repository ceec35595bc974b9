//! Client for the headless CMS REST API.
//!
//! All editorial content (posts, the header navigation global) lives in an
//! external CMS and is fetched over HTTP. Queries are localized, paginated,
//! and retried with short backoff so a flaky CMS does not immediately take
//! the site down; a 4xx is treated as permanent and fails fast.

use crate::config::Config;
use crate::i18n::Locale;
use crate::retry::{with_retry_if, RetryConfig};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

const USER_AGENT: &str = concat!("lumiere-news/", env!("CARGO_PKG_VERSION"));

/// Errors returned by CMS queries.
#[derive(Debug, Error)]
pub enum CmsError {
    #[error("CMS request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("CMS returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

impl CmsError {
    /// Whether retrying can plausibly help: server errors and transport
    /// failures yes, client errors and undecodable payloads no.
    pub fn is_retryable(&self) -> bool {
        match self {
            CmsError::Status { status, .. } => status.is_server_error(),
            CmsError::Transport(error) => !error.is_decode(),
        }
    }
}

/// One page of posts, in the CMS pagination envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub docs: Vec<Post>,
    #[serde(default)]
    pub total_docs: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_prev_page: bool,
}

fn default_page() -> u32 {
    1
}

/// A post document. Relations come back either populated (objects) or as
/// bare ids depending on query depth, so they are modeled as untagged
/// unions and read through the accessor methods.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: serde_json::Value,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub meta: Option<PostMeta>,
    #[serde(default)]
    pub hero_image: Option<MediaRef>,
    #[serde(default)]
    pub populated_authors: Option<Vec<AuthorRef>>,
    #[serde(default)]
    pub categories: Option<Vec<CategoryRef>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<MediaRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MediaRef {
    Populated(Media),
    Id(serde_json::Value),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AuthorRef {
    Populated(Author),
    Id(serde_json::Value),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Populated(Category),
    Id(serde_json::Value),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub title: Option<String>,
}

impl Post {
    /// URL of the hero image, falling back to the meta image.
    pub fn hero_image_url(&self) -> Option<&str> {
        fn from_ref(media: &MediaRef) -> Option<&str> {
            match media {
                MediaRef::Populated(media) => media.url.as_deref(),
                MediaRef::Id(_) => None,
            }
        }

        self.hero_image
            .as_ref()
            .and_then(from_ref)
            .or_else(|| {
                self.meta
                    .as_ref()
                    .and_then(|meta| meta.image.as_ref())
                    .and_then(from_ref)
            })
    }

    /// Meta description, if the editors wrote one.
    pub fn description(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|meta| meta.description.as_deref())
    }

    /// Name of the first populated author.
    pub fn author_name(&self) -> Option<&str> {
        self.populated_authors.as_ref()?.iter().find_map(|author| {
            match author {
                AuthorRef::Populated(author) => author.name.as_deref(),
                AuthorRef::Id(_) => None,
            }
        })
    }

    /// Title of the first populated category.
    pub fn category_title(&self) -> Option<&str> {
        self.categories.as_ref()?.iter().find_map(|category| {
            match category {
                CategoryRef::Populated(category) => category.title.as_deref(),
                CategoryRef::Id(_) => None,
            }
        })
    }
}

/// The `header` global: the CMS-managed navigation links.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HeaderGlobal {
    #[serde(default)]
    nav_items: Vec<NavItemEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct NavItemEntry {
    link: NavLink,
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct NavLink {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// HTTP client for the CMS.
#[derive(Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl CmsClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build CMS HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.cms_base_url, config.cms_api_key.clone())
    }

    /// Fetch one page of posts for a locale, newest first.
    pub async fn find_posts(
        &self,
        locale: Locale,
        page: u32,
        limit: u32,
    ) -> Result<PostPage, CmsError> {
        let query = [
            ("depth", "2".to_string()),
            ("sort", "-publishedAt".to_string()),
            ("limit", limit.to_string()),
            ("page", page.to_string()),
            ("locale", locale.code().to_string()),
        ];
        self.get_json("/api/posts", &query, &format!("CMS posts page {page}"))
            .await
    }

    /// Fetch a single post by slug, or `None` when the slug is unknown.
    pub async fn find_post_by_slug(
        &self,
        locale: Locale,
        slug: &str,
    ) -> Result<Option<Post>, CmsError> {
        let query = [
            ("depth", "2".to_string()),
            ("limit", "1".to_string()),
            ("locale", locale.code().to_string()),
            ("where[slug][equals]", slug.to_string()),
        ];
        let page: PostPage = self
            .get_json("/api/posts", &query, &format!("CMS post '{slug}'"))
            .await?;
        Ok(page.docs.into_iter().next())
    }

    /// Fetch the header navigation links for a locale. Failures degrade to
    /// an empty navigation at the call site, never to a failed page.
    pub async fn header_nav(&self, locale: Locale) -> Result<Vec<NavLink>, CmsError> {
        let query = [("locale", locale.code().to_string())];
        let header: HeaderGlobal = self
            .get_json("/api/globals/header", &query, "CMS header global")
            .await?;
        Ok(header.nav_items.into_iter().map(|item| item.link).collect())
    }

    /// Check that the CMS answers with a well-formed posts envelope.
    pub async fn health_check(&self) -> bool {
        let query = [("limit", "1".to_string())];
        self.get_json::<PostPage>("/api/posts", &query, "CMS health check")
            .await
            .is_ok()
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        operation_name: &str,
    ) -> Result<T, CmsError> {
        let url = format!("{}{}", self.base_url, path);

        with_retry_if(
            &RetryConfig::cms_query(),
            operation_name,
            || async {
                let mut request = self.http.get(&url).query(query);
                if let Some(key) = &self.api_key {
                    request = request.header("Authorization", format!("Bearer {key}"));
                }

                let response = request.send().await?;
                let status = response.status();
                if !status.is_success() {
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|e| format!("<failed to read body: {e}>"));
                    return Err(CmsError::Status { status, body });
                }

                Ok(response.json::<T>().await?)
            },
            CmsError::is_retryable,
        )
        .await
    }
}
