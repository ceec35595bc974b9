//! RSS 2.0 feed of the latest posts.
//!
//! One feed per locale at `/{locale}/feed.xml`, with channel metadata from
//! the translation catalog and items linking back to the localized article
//! pages.

use crate::cms::Post;
use crate::i18n::{self, Locale};
use crate::pages::{cached_posts, PageError, POSTS_PER_PAGE};
use crate::render::excerpt;
use crate::server::SharedState;
use crate::site::SITE_NAME;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Extension;
use chrono::DateTime;

/// Maximum item description length.
const FEED_EXCERPT_CHARS: usize = 300;

pub async fn feed(
    State(state): State<SharedState>,
    Extension(locale): Extension<Locale>,
) -> Result<Response, PageError> {
    let posts = cached_posts(&state, locale, 1, POSTS_PER_PAGE).await?;
    let channel = build_channel(&state.config.site_url, locale, &posts.docs);

    Ok((
        [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
        channel.to_string(),
    )
        .into_response())
}

/// Assemble the channel for a locale.
pub fn build_channel(site_url: &str, locale: Locale, posts: &[Post]) -> rss::Channel {
    let site_url = site_url.trim_end_matches('/');

    let items: Vec<rss::Item> = posts
        .iter()
        .map(|post| {
            rss::ItemBuilder::default()
                .title(Some(post.title.clone()))
                .link(Some(format!(
                    "{site_url}/{}/posts/{}",
                    locale.code(),
                    post.slug
                )))
                .description(
                    post.description()
                        .map(|text| excerpt(text, FEED_EXCERPT_CHARS)),
                )
                .author(post.author_name().map(str::to_string))
                .pub_date(post.published_at.as_deref().and_then(to_rfc2822))
                .build()
        })
        .collect();

    rss::ChannelBuilder::default()
        .title(format!(
            "{SITE_NAME} - {}",
            i18n::translate(locale, "posts.title")
        ))
        .link(format!("{site_url}/{}", locale.code()))
        .description(i18n::translate(locale, "meta.description"))
        .language(Some(locale.bcp47().to_lowercase()))
        .items(items)
        .build()
}

/// RSS wants RFC 2822 dates; the CMS speaks RFC 3339.
fn to_rfc2822(timestamp: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|date| date.to_rfc2822())
}
