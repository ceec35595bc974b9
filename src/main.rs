use anyhow::Result;
use lumiere_news::cms::CmsClient;
use lumiere_news::config::Config;
use lumiere_news::retry::{with_retry, RetryConfig};
use lumiere_news::server::{self, AppState};
use lumiere_news::{i18n, site};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lumiere_news=info".parse()?),
        )
        .init();

    info!("Starting {} web server", site::SITE_NAME);

    // Load configuration from environment
    let config = Config::from_env()?;

    // Parse the embedded locale documents up front so a broken catalog
    // fails at startup instead of on the first request
    let locales = i18n::catalog().codes();
    info!("Translation catalog loaded for locales: {}", locales.join(", "));

    let cms = CmsClient::from_config(&config)?;

    // Verify the CMS is reachable (with retries); the site can still start
    // without it and recover once the CMS comes back
    info!("Checking CMS at {}", config.cms_base_url);
    let cms_ready = with_retry(&RetryConfig::health_check(), "CMS health check", || async {
        if cms.health_check().await {
            Ok(())
        } else {
            Err("CMS not answering with a valid posts envelope")
        }
    })
    .await
    .is_ok();

    if cms_ready {
        info!("✓ CMS is reachable");
    } else {
        warn!(
            "CMS at {} is not reachable; pages will error until it comes up",
            config.cms_base_url
        );
    }

    server::run(AppState::new(config, cms)).await
}
