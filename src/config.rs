use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Runtime
    pub environment: String,
    pub port: u16,

    // Headless CMS
    pub cms_base_url: String,
    pub cms_api_key: Option<String>,

    // Public site identity
    pub site_url: String,

    // Content freshness
    pub revalidate_secs: u64,
    pub revalidate_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            // CMS - base URL of the headless CMS REST API
            cms_base_url: std::env::var("CMS_BASE_URL").context("CMS_BASE_URL not set")?,
            cms_api_key: std::env::var("CMS_API_KEY").ok(),

            // Public URL used in metadata and feed links
            site_url: std::env::var("SITE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),

            // Content freshness (mirrors the 600s revalidation window of
            // the previous deployment)
            revalidate_secs: std::env::var("REVALIDATE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(600),
            revalidate_key: std::env::var("REVALIDATE_KEY").ok(),
        })
    }
}
