//! Read-through response cache.
//!
//! Successful GET responses are cached whole, keyed by method + path +
//! query, with the TTL taken from configuration. The ledger-head endpoint
//! (`/v1`) and the cache admin routes are never cached so head data stays
//! live. Disabled entirely when the config says so.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::{header, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use moka::sync::Cache;
use serde::Serialize;
use tracing::debug;

use crate::server::AppState;

/// One cached response body.
#[derive(Debug, Clone)]
struct CachedEntry {
    status: u16,
    body: Bytes,
}

/// Counters surfaced by the cache stats route.
#[derive(Debug, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: u64,
    pub ttl_ms: u64,
}

/// TTL-bounded in-memory store for full JSON responses.
pub struct ResponseCache {
    entries: Cache<String, CachedEntry>,
    hits: AtomicU64,
    misses: AtomicU64,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Cache::builder().time_to_live(ttl).build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            ttl,
        }
    }

    fn get(&self, key: &str) -> Option<CachedEntry> {
        match self.entries.get(key) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    fn insert(&self, key: String, status: u16, body: Bytes) {
        self.entries.insert(key, CachedEntry { status, body });
    }

    /// Snapshot of hit/miss counters and entry count.
    pub fn stats(&self) -> CacheStats {
        self.entries.run_pending_tasks();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.entry_count(),
            ttl_ms: self.ttl.as_millis() as u64,
        }
    }

    /// Every currently cached key.
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(key, _)| (*key).clone()).collect()
    }

    /// Drop all entries; returns how many were dropped.
    pub fn clear(&self) -> u64 {
        self.entries.run_pending_tasks();
        let count = self.entries.entry_count();
        self.entries.invalidate_all();
        self.entries.run_pending_tasks();
        count
    }

    /// Drop entries whose key contains the given substring.
    pub fn clear_target(&self, target: &str) -> u64 {
        let matching: Vec<String> = self
            .entries
            .iter()
            .filter(|(key, _)| key.contains(target))
            .map(|(key, _)| (*key).clone())
            .collect();

        for key in &matching {
            self.entries.invalidate(key);
        }
        self.entries.run_pending_tasks();
        matching.len() as u64
    }
}

/// Paths the cache must never serve: the live ledger head and the cache's
/// own admin surface.
fn is_cacheable(path: &str) -> bool {
    path != "/v1" && !path.starts_with("/cache")
}

/// Axum middleware wrapping the whole router.
pub async fn response_cache_layer(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(cache) = &state.cache else {
        return next.run(request).await;
    };

    if request.method() != Method::GET || !is_cacheable(request.uri().path()) {
        return next.run(request).await;
    }

    let key = match request.uri().query() {
        Some(query) => format!("GET {}?{}", request.uri().path(), query),
        None => format!("GET {}", request.uri().path()),
    };

    if let Some(entry) = cache.get(&key) {
        debug!("Cache hit: {}", key);
        return cached_response(&entry);
    }

    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let (parts, body) = response.into_parts();
    match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            cache.insert(key, parts.status.as_u16(), bytes.clone());
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(err) => ApiFault(err.to_string()).into_response(),
    }
}

fn cached_response(entry: &CachedEntry) -> Response {
    (
        StatusCode::from_u16(entry.status).unwrap_or(StatusCode::OK),
        [(header::CONTENT_TYPE, "application/json")],
        entry.body.clone(),
    )
        .into_response()
}

/// Body buffering failed after the inner handler already ran; all that is
/// left is reporting it.
struct ApiFault(String);

impl IntoResponse for ApiFault {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(serde_json::json!({
                "message": "Failed to buffer response body",
                "error_code": "internal_error",
                "vm_error_code": self.0,
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_and_miss_counters() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        assert!(cache.get("GET /v1/blocks/by_height/1").is_none());
        cache.insert(
            "GET /v1/blocks/by_height/1".to_string(),
            200,
            Bytes::from_static(b"{}"),
        );
        assert!(cache.get("GET /v1/blocks/by_height/1").is_some());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_clear_all_and_by_target() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert("GET /v1/blocks/by_height/1".to_string(), 200, Bytes::new());
        cache.insert("GET /v1/blocks/by_height/2".to_string(), 200, Bytes::new());
        cache.insert(
            "GET /v1/accounts/0x1/modules".to_string(),
            200,
            Bytes::new(),
        );

        assert_eq!(cache.clear_target("/blocks/"), 2);
        assert_eq!(cache.keys().len(), 1);
        assert_eq!(cache.clear(), 1);
        assert!(cache.keys().is_empty());
    }

    #[test]
    fn test_head_and_admin_paths_are_not_cacheable() {
        assert!(!is_cacheable("/v1"));
        assert!(!is_cacheable("/cache/stats"));
        assert!(is_cacheable("/v1/blocks/by_height/1"));
        assert!(is_cacheable("/"));
    }
}
