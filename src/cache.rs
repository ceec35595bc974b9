//! In-memory content cache.
//!
//! The previous deployment revalidated rendered pages every 600 seconds;
//! here the same freshness window applies to the CMS queries themselves.
//! Entries expire after the configured TTL and the whole cache can be
//! purged through the revalidation webhook when editors publish.

use crate::cms::{NavLink, PostPage};
use crate::i18n::Locale;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Key for a cached posts query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostsKey {
    pub locale: Locale,
    pub page: u32,
    pub limit: u32,
}

struct Entry<T> {
    stored_at: Instant,
    value: T,
}

/// TTL cache over CMS query results.
pub struct ContentCache {
    ttl: Duration,
    posts: RwLock<HashMap<PostsKey, Entry<PostPage>>>,
    nav: RwLock<HashMap<Locale, Entry<Vec<NavLink>>>>,
}

impl ContentCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            posts: RwLock::new(HashMap::new()),
            nav: RwLock::new(HashMap::new()),
        }
    }

    /// Get a cached posts page if it is still fresh.
    pub async fn posts(&self, key: PostsKey) -> Option<PostPage> {
        let entries = self.posts.read().await;
        entries
            .get(&key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    pub async fn store_posts(&self, key: PostsKey, page: PostPage) {
        let mut entries = self.posts.write().await;
        entries.insert(
            key,
            Entry {
                stored_at: Instant::now(),
                value: page,
            },
        );
    }

    /// Get cached header navigation if it is still fresh.
    pub async fn nav(&self, locale: Locale) -> Option<Vec<NavLink>> {
        let entries = self.nav.read().await;
        entries
            .get(&locale)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    pub async fn store_nav(&self, locale: Locale, nav: Vec<NavLink>) {
        let mut entries = self.nav.write().await;
        entries.insert(
            locale,
            Entry {
                stored_at: Instant::now(),
                value: nav,
            },
        );
    }

    /// Drop every cached entry. Returns how many entries were evicted.
    pub async fn purge(&self) -> usize {
        let mut posts = self.posts.write().await;
        let mut nav = self.nav.write().await;
        let evicted = posts.len() + nav.len();
        posts.clear();
        nav.clear();
        evicted
    }
}
