//! HTML rendering.
//!
//! Templates are compiled into the binary and parsed once into a shared
//! tera engine. A `t(locale=..., key=...)` template function exposes the
//! translation catalog, so templates stay free of hardcoded copy. The
//! view models here pre-compute everything display-specific (localized
//! fallbacks, formatted dates, card links) before the template sees it.

use crate::cms::{NavLink, Post};
use crate::i18n::{self, Locale};
use crate::site::PageMeta;
use anyhow::{Context as _, Result};
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use tera::Tera;

static ENGINE: OnceLock<Tera> = OnceLock::new();

/// The shared template engine.
///
/// # Panics
/// Panics if an embedded template fails to parse, which is a build defect.
pub fn engine() -> &'static Tera {
    ENGINE.get_or_init(|| {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../templates/base.html")),
            ("macros.html", include_str!("../templates/macros.html")),
            ("home.html", include_str!("../templates/home.html")),
            ("posts.html", include_str!("../templates/posts.html")),
            ("article.html", include_str!("../templates/article.html")),
            ("legal.html", include_str!("../templates/legal.html")),
            ("not_found.html", include_str!("../templates/not_found.html")),
        ])
        .expect("embedded templates are valid");
        tera.register_function("t", translate_function);
        tera
    })
}

/// Tera function bridging templates to the translation catalog:
/// `{{ t(locale=locale, key="footer.copyright") }}`.
fn translate_function(args: &HashMap<String, tera::Value>) -> tera::Result<tera::Value> {
    let key = args
        .get("key")
        .and_then(|value| value.as_str())
        .ok_or_else(|| tera::Error::msg("t() requires a string 'key' argument"))?;

    let locale = args
        .get("locale")
        .and_then(|value| value.as_str())
        .and_then(|code| Locale::from_code(code).ok())
        .unwrap_or_default();

    Ok(tera::Value::String(i18n::translate(locale, key)))
}

/// Context shared by every page: locale, navigation, and head metadata.
pub fn base_context(locale: Locale, nav: &[NavLink], meta: &PageMeta) -> tera::Context {
    let mut context = tera::Context::new();
    context.insert("locale", locale.code());
    context.insert("bcp47", locale.bcp47());
    context.insert("nav", nav);
    context.insert("meta", meta);
    context
}

/// Render a template to an HTML string.
pub fn render(template: &str, context: &tera::Context) -> Result<String> {
    engine()
        .render(template, context)
        .with_context(|| format!("Failed to render template '{template}'"))
}

/// Display model for an article card or article header.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleCard {
    pub title: String,
    pub href: String,
    pub category: String,
    pub author: String,
    pub date: Option<String>,
    pub description: String,
    pub image_url: Option<String>,
    pub image_alt: String,
}

/// Maximum excerpt length shown on cards.
const CARD_EXCERPT_CHARS: usize = 160;

/// Build the card model for a post, with localized fallbacks for missing
/// category, author, and description.
pub fn article_card(post: &Post, locale: Locale) -> ArticleCard {
    let category = post
        .category_title()
        .map(str::to_string)
        .unwrap_or_else(|| i18n::translate(locale, "common.story"));

    let author = post
        .author_name()
        .map(str::to_string)
        .unwrap_or_else(|| i18n::translate(locale, "homepage.anonymous"));

    let date = post
        .published_at
        .as_deref()
        .and_then(|timestamp| i18n::format_timestamp(timestamp, locale));

    let description = match post.description() {
        Some(text) => excerpt(text, CARD_EXCERPT_CHARS),
        None => i18n::translate(locale, "homepage.defaultDescription"),
    };

    ArticleCard {
        title: post.title.clone(),
        href: format!("/{}/posts/{}", locale.code(), post.slug),
        category,
        author,
        date,
        description,
        image_url: post.hero_image_url().map(str::to_string),
        image_alt: post.title.clone(),
    }
}

static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();

/// Reduce CMS rich text to a plain-text excerpt: tags stripped, whitespace
/// collapsed, truncated at a word boundary.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let tag_regex = TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid regex"));
    let whitespace_regex =
        WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("valid regex"));

    let stripped = tag_regex.replace_all(text, " ");
    let collapsed = whitespace_regex.replace_all(&stripped, " ");
    let plain = collapsed.trim();

    if plain.chars().count() <= max_chars {
        return plain.to_string();
    }

    let truncated: String = plain.chars().take(max_chars).collect();
    let cut = truncated.rfind(' ').unwrap_or(truncated.len());
    format!("{}…", truncated[..cut].trim_end())
}
