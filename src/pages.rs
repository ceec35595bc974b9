//! Page handlers.
//!
//! Every handler receives the locale resolved by the redirect middleware
//! as a request extension and threads it explicitly into content queries,
//! translations, and date formatting. Content comes through the TTL cache;
//! a CMS failure on the posts query is a 500, while a failed navigation
//! query degrades to an empty menu.

use crate::cache::PostsKey;
use crate::cms::{CmsError, NavLink, PostPage};
use crate::i18n::{self, Locale};
use crate::render::{self, article_card};
use crate::server::SharedState;
use crate::site::{self, PageMeta};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Extension;
use serde::Serialize;
use tracing::warn;

/// Homepage fetch size: one featured story plus five compact cards.
const HOME_POSTS: u32 = 6;

/// Listing page size.
pub const POSTS_PER_PAGE: u32 = 10;

/// Error wrapper that renders as a 500 and logs the cause.
pub struct PageError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for PageError {
    fn from(error: E) -> Self {
        Self(error.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!("Page request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

/// Read a posts page through the cache.
pub(crate) async fn cached_posts(
    state: &SharedState,
    locale: Locale,
    page: u32,
    limit: u32,
) -> Result<PostPage, CmsError> {
    let key = PostsKey { locale, page, limit };
    if let Some(cached) = state.cache.posts(key).await {
        return Ok(cached);
    }

    let fresh = state.cms.find_posts(locale, page, limit).await?;
    state.cache.store_posts(key, fresh.clone()).await;
    Ok(fresh)
}

/// Read the header navigation through the cache. Navigation is chrome, not
/// content: failures degrade to an empty menu instead of failing the page.
pub(crate) async fn cached_nav(state: &SharedState, locale: Locale) -> Vec<NavLink> {
    if let Some(cached) = state.cache.nav(locale).await {
        return cached;
    }

    match state.cms.header_nav(locale).await {
        Ok(nav) => {
            state.cache.store_nav(locale, nav.clone()).await;
            nav
        }
        Err(error) => {
            warn!("Header navigation unavailable: {}", error);
            Vec::new()
        }
    }
}

// ==================== Homepage ====================

pub async fn home(
    State(state): State<SharedState>,
    Extension(locale): Extension<Locale>,
) -> Result<Html<String>, PageError> {
    let (posts, nav) = futures::join!(
        cached_posts(&state, locale, 1, HOME_POSTS),
        cached_nav(&state, locale)
    );
    let posts = posts?;

    let featured = posts.docs.first().map(|post| article_card(post, locale));
    let recent: Vec<_> = posts
        .docs
        .iter()
        .skip(1)
        .map(|post| article_card(post, locale))
        .collect();

    let meta = PageMeta::defaults(&state.config.site_url, &format!("/{locale}"))
        .with_title(i18n::translate(locale, "meta.title"))
        .with_description(i18n::translate(locale, "meta.description"));

    let mut context = render::base_context(locale, &nav, &meta);
    context.insert("featured", &featured);
    context.insert("read_more", &i18n::translate(locale, "homepage.readFullStory"));
    context.insert("recent", &recent);
    context.insert("has_more", &posts.has_next_page);

    Ok(Html(render::render("home.html", &context)?))
}

// ==================== Post Listings ====================

pub async fn posts_index(
    state: State<SharedState>,
    locale: Extension<Locale>,
) -> Result<Response, PageError> {
    listing(state, locale, 1).await
}

pub async fn posts_paged(
    state: State<SharedState>,
    locale: Extension<Locale>,
    Path((_, page_number)): Path<(String, String)>,
) -> Result<Response, PageError> {
    // The original treated a non-integer page number as a missing page.
    match page_number.parse::<u32>() {
        Ok(page) if page >= 1 => listing(state, locale, page).await,
        _ => not_found_page(&state, *locale).await,
    }
}

async fn listing(
    State(state): State<SharedState>,
    Extension(locale): Extension<Locale>,
    page: u32,
) -> Result<Response, PageError> {
    let (posts, nav) = futures::join!(
        cached_posts(&state, locale, page, POSTS_PER_PAGE),
        cached_nav(&state, locale)
    );
    let posts = posts?;

    let cards: Vec<_> = posts
        .docs
        .iter()
        .map(|post| article_card(post, locale))
        .collect();
    let next_page = posts.has_next_page.then(|| posts.page + 1);

    let title = if page == 1 {
        i18n::translate(locale, "posts.mainTitle")
    } else {
        i18n::translate(locale, "posts.pageTitle").replace("{pageNumber}", &page.to_string())
    };
    let path = if page == 1 {
        format!("/{locale}/posts")
    } else {
        format!("/{locale}/posts/page/{page}")
    };
    let meta = PageMeta::defaults(&state.config.site_url, &path)
        .with_title(title)
        .with_description(i18n::translate(locale, "posts.description"));

    let mut context = render::base_context(locale, &nav, &meta);
    context.insert("posts", &cards);
    context.insert("next_page", &next_page);

    Ok(Html(render::render("posts.html", &context)?).into_response())
}

// ==================== Single Article ====================

pub async fn article(
    State(state): State<SharedState>,
    Extension(locale): Extension<Locale>,
    Path((_, slug)): Path<(String, String)>,
) -> Result<Response, PageError> {
    let Some(post) = state.cms.find_post_by_slug(locale, &slug).await? else {
        return not_found_page(&state, locale).await;
    };

    let nav = cached_nav(&state, locale).await;
    let card = article_card(&post, locale);

    let title = post
        .meta
        .as_ref()
        .and_then(|meta| meta.title.clone())
        .unwrap_or_else(|| format!("{} - {}", post.title, site::SITE_NAME));
    let meta = PageMeta::defaults(
        &state.config.site_url,
        &format!("/{locale}/posts/{}", post.slug),
    )
    .with_title(title)
    .with_description(card.description.clone())
    .with_type("article")
    .with_image(card.image_url.clone());

    let mut context = render::base_context(locale, &nav, &meta);
    context.insert("article", &card);

    Ok(Html(render::render("article.html", &context)?).into_response())
}

// ==================== Legal Pages ====================

#[derive(Debug, Serialize)]
struct LegalSection {
    heading: String,
    body: String,
    items: Option<Vec<String>>,
}

const PRIVACY_SECTIONS: [(&str, bool); 5] = [
    ("collection", false),
    ("usage", false),
    ("cookies", false),
    ("rights", false),
    ("contact", false),
];

const TERMS_SECTIONS: [(&str, bool); 8] = [
    ("acceptance", false),
    ("use", true),
    ("content", false),
    ("intellectual", false),
    ("disclaimer", false),
    ("limitation", false),
    ("changes", false),
    ("contact", false),
];

pub async fn privacy(
    state: State<SharedState>,
    locale: Extension<Locale>,
) -> Result<Html<String>, PageError> {
    legal_page(state, locale, "privacy", &PRIVACY_SECTIONS).await
}

pub async fn terms(
    state: State<SharedState>,
    locale: Extension<Locale>,
) -> Result<Html<String>, PageError> {
    legal_page(state, locale, "terms", &TERMS_SECTIONS).await
}

async fn legal_page(
    State(state): State<SharedState>,
    Extension(locale): Extension<Locale>,
    page: &str,
    section_keys: &[(&str, bool)],
) -> Result<Html<String>, PageError> {
    let nav = cached_nav(&state, locale).await;

    let sections: Vec<LegalSection> = section_keys
        .iter()
        .map(|(section, has_list)| LegalSection {
            heading: i18n::translate(locale, &format!("{page}.{section}.title")),
            body: i18n::translate(locale, &format!("{page}.{section}.content")),
            items: has_list.then(|| {
                (1..=4)
                    .map(|n| i18n::translate(locale, &format!("{page}.{section}.list{n}")))
                    .collect()
            }),
        })
        .collect();

    let meta = PageMeta::defaults(&state.config.site_url, &format!("/{locale}/{page}"))
        .with_title(i18n::translate(locale, &format!("{page}.metaTitle")))
        .with_description(i18n::translate(locale, &format!("{page}.metaDescription")));

    let mut context = render::base_context(locale, &nav, &meta);
    context.insert("title", &i18n::translate(locale, &format!("{page}.title")));
    context.insert("sections", &sections);

    Ok(Html(render::render("legal.html", &context)?))
}

// ==================== Not Found ====================

/// Fallback for unmatched routes. Page paths (which carry a locale
/// extension) get the localized 404; exempt paths get a plain one.
pub async fn fallback(
    State(state): State<SharedState>,
    locale: Option<Extension<Locale>>,
) -> Result<Response, PageError> {
    match locale {
        Some(Extension(locale)) => not_found_page(&state, locale).await,
        None => Ok((StatusCode::NOT_FOUND, "Not Found").into_response()),
    }
}

/// Render the localized 404 page with a 404 status.
pub(crate) async fn not_found_page(
    state: &SharedState,
    locale: Locale,
) -> Result<Response, PageError> {
    let nav = cached_nav(state, locale).await;
    let meta = PageMeta::defaults(&state.config.site_url, &format!("/{locale}"))
        .with_title(format!("404 - {}", site::SITE_NAME));

    let context = render::base_context(locale, &nav, &meta);
    let html = render::render("not_found.html", &context)?;

    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}
