//! Locale redirect middleware.
//!
//! Runs ahead of routing for every page request. A path that already
//! carries a supported locale prefix passes through with the resolved
//! [`Locale`] stored as a request extension; anything else is redirected
//! to the same path prefixed with the locale negotiated from the
//! `Accept-Language` header. API, asset, and health endpoints are exempt.
//!
//! This is the only place a request is mapped to a locale; handlers read
//! the extension instead of re-parsing headers.

use crate::i18n::{self, Locale};
use axum::extract::Request;
use axum::http::header::ACCEPT_LANGUAGE;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

/// Prefixes that are not pages and never get a locale prefix.
const EXEMPT_PREFIXES: [&str; 4] = ["/api", "/assets", "/healthz", "/admin"];

/// Exact paths that are not pages.
const EXEMPT_PATHS: [&str; 2] = ["/favicon.ico", "/robots.txt"];

pub async fn locale_redirect(mut request: Request, next: Next) -> Response {
    let path = request.uri().path();

    if is_exempt(path) {
        return next.run(request).await;
    }

    if let Some(locale) = i18n::path_locale(path) {
        request.extensions_mut().insert(locale);
        return next.run(request).await;
    }

    let header = request
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());
    let locale = i18n::resolve_locale(header);
    let target = redirect_target(locale, path, request.uri().query());

    tracing::debug!("Redirecting {} to {}", path, target);
    Redirect::temporary(&target).into_response()
}

/// Whether a path needs a locale-prefix redirect.
pub fn needs_redirect(path: &str) -> bool {
    !is_exempt(path) && i18n::path_locale(path).is_none()
}

fn is_exempt(path: &str) -> bool {
    EXEMPT_PATHS.contains(&path)
        || EXEMPT_PREFIXES.iter().any(|prefix| {
            path.strip_prefix(prefix)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
}

fn redirect_target(locale: Locale, path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) => format!("/{}{}?{}", locale.code(), path, query),
        None => format!("/{}{}", locale.code(), path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use axum::{middleware, Extension, Router};
    use tower::ServiceExt;

    // ==================== needs_redirect Tests ====================

    #[test]
    fn test_needs_redirect_with_locale_prefix() {
        assert!(!needs_redirect("/fr/posts"));
        assert!(!needs_redirect("/en"));
        assert!(!needs_redirect("/fr/"));
    }

    #[test]
    fn test_needs_redirect_without_locale_prefix() {
        assert!(needs_redirect("/posts"));
        assert!(needs_redirect("/"));
        assert!(needs_redirect("/french/posts"));
    }

    #[test]
    fn test_needs_redirect_exempt_paths() {
        assert!(!needs_redirect("/api/revalidate"));
        assert!(!needs_redirect("/healthz"));
        assert!(!needs_redirect("/assets/logo.svg"));
        assert!(!needs_redirect("/admin"));
        assert!(!needs_redirect("/favicon.ico"));
        assert!(!needs_redirect("/robots.txt"));
    }

    #[test]
    fn test_exempt_requires_full_segment() {
        // "/apiary" shares a prefix with "/api" but is a page path.
        assert!(needs_redirect("/apiary"));
        assert!(needs_redirect("/administration"));
    }

    // ==================== redirect_target Tests ====================

    #[test]
    fn test_redirect_target_plain_path() {
        assert_eq!(redirect_target(Locale::FRENCH, "/posts", None), "/fr/posts");
        assert_eq!(redirect_target(Locale::ENGLISH, "/", None), "/en/");
    }

    #[test]
    fn test_redirect_target_preserves_query() {
        assert_eq!(
            redirect_target(Locale::FRENCH, "/posts", Some("page=2")),
            "/fr/posts?page=2"
        );
    }

    // ==================== Middleware Tests ====================

    fn test_router() -> Router {
        async fn probe(Extension(locale): Extension<Locale>) -> String {
            locale.code().to_string()
        }

        async fn health() -> &'static str {
            "ok"
        }

        Router::new()
            .route("/:locale/probe", get(probe))
            .route("/healthz", get(health))
            .layer(middleware::from_fn(locale_redirect))
    }

    async fn location_of(response: axum::response::Response) -> String {
        response
            .headers()
            .get(header::LOCATION)
            .expect("redirect should carry a Location header")
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_missing_locale_redirects_using_header() {
        let response = test_router()
            .oneshot(
                HttpRequest::builder()
                    .uri("/probe")
                    .header(header::ACCEPT_LANGUAGE, "en-US,fr;q=0.9")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location_of(response).await, "/en/probe");
    }

    #[tokio::test]
    async fn test_missing_locale_and_header_defaults_to_french() {
        let response = test_router()
            .oneshot(HttpRequest::builder().uri("/probe").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location_of(response).await, "/fr/probe");
    }

    #[tokio::test]
    async fn test_root_redirects_to_locale_root() {
        let response = test_router()
            .oneshot(HttpRequest::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location_of(response).await, "/fr/");
    }

    #[tokio::test]
    async fn test_locale_prefixed_path_passes_through_with_extension() {
        let response = test_router()
            .oneshot(
                HttpRequest::builder()
                    .uri("/en/probe")
                    // The header must not override the path prefix.
                    .header(header::ACCEPT_LANGUAGE, "fr")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"en");
    }

    #[tokio::test]
    async fn test_exempt_path_is_untouched() {
        let response = test_router()
            .oneshot(HttpRequest::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_redirect_preserves_query_string() {
        let response = test_router()
            .oneshot(
                HttpRequest::builder()
                    .uri("/probe?utm_source=feed")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(location_of(response).await, "/fr/probe?utm_source=feed");
    }
}
