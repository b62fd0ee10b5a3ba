//! Orchestrates font loading for the comparison previews.
//!
//! [`FontLoadService::ensure_loaded`] is the single entry point: it decides
//! which concrete resource to fetch for a requested (family, weight, style),
//! dedupes concurrent requests through the load cache, and walks a fallback
//! chain when the exact request cannot be satisfied.

use crate::catalog::{variant_key, FontDescriptor, FontStyle};
use crate::config::REGISTRATION_TIMEOUT;
use crate::error::{AppError, Result};
use crate::load_cache::{AcquireOutcome, FontLoadCache, TripleKey};
use crate::registry::FontRegistry;
use crate::resolver;
use futures::future::join_all;
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;

/// Loads font variants through the host registry, with caching and
/// multi-level fallback.
pub struct FontLoadService<R: FontRegistry> {
    cache: Arc<FontLoadCache>,
    registry: Arc<R>,
    registration_timeout: Duration,
}

impl<R: FontRegistry> Clone for FontLoadService<R> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            registry: self.registry.clone(),
            registration_timeout: self.registration_timeout,
        }
    }
}

impl<R: FontRegistry> FontLoadService<R> {
    /// Creates a load service over the given cache and host registry.
    pub fn new(cache: Arc<FontLoadCache>, registry: Arc<R>) -> Self {
        Self {
            cache,
            registry,
            registration_timeout: REGISTRATION_TIMEOUT,
        }
    }

    /// Overrides the per-attempt registration timeout.
    pub fn with_registration_timeout(mut self, timeout: Duration) -> Self {
        self.registration_timeout = timeout;
        self
    }

    /// True iff the requested triple has already loaded.
    pub fn is_loaded(&self, family: &str, weight: u16, style: FontStyle) -> bool {
        self.cache.has(&TripleKey::new(family, weight, style))
    }

    /// Makes the requested variant available, degrading through fallbacks.
    ///
    /// Attempt order: the requested (weight, style); for a failed italic
    /// request, the same weight upright, since many families omit italic
    /// faces; finally 400 upright. Each attempt has its own cache triple.
    /// Returns true if any attempt succeeded. Never raises: failures are
    /// logged and reported as `false`, and the preview falls back to a
    /// generic family.
    pub async fn ensure_loaded(
        &self,
        descriptor: &FontDescriptor,
        weight: u16,
        style: FontStyle,
    ) -> bool {
        let mut attempts = vec![(weight, style)];
        if style == FontStyle::Italic {
            attempts.push((weight, FontStyle::Normal));
        }
        attempts.push((400, FontStyle::Normal));
        attempts.dedup();

        for (i, &(attempt_weight, attempt_style)) in attempts.iter().enumerate() {
            if i > 0 {
                debug!(
                    "Falling back to {} {} {}",
                    descriptor.family, attempt_weight, attempt_style
                );
            }
            if self.load_variant(descriptor, attempt_weight, attempt_style).await {
                return true;
            }
        }

        warn!(
            "Giving up on {} {} {}; preview will use a generic family",
            descriptor.family, weight, style
        );
        false
    }

    /// Loads every declared variant of a descriptor concurrently.
    ///
    /// Used after upload ingestion so a freshly added family previews
    /// without a visible swap. Results come back in declaration order.
    pub async fn preload(&self, descriptor: &FontDescriptor) -> Vec<bool> {
        join_all(
            descriptor
                .variants
                .iter()
                .map(|v| self.load_variant(descriptor, v.weight, v.style)),
        )
        .await
    }

    /// One attempt for one triple: resource resolution, cache acquisition,
    /// registration.
    ///
    /// The cache entry is keyed by the requested triple even when the
    /// resource came from a fallback key: the cache answers "was this
    /// request satisfied", not "which file arrived".
    async fn load_variant(
        &self,
        descriptor: &FontDescriptor,
        weight: u16,
        style: FontStyle,
    ) -> bool {
        let best = resolver::resolve(descriptor, weight, style);
        debug!(
            "Best declared variant for {} {} {}: {} {}",
            descriptor.family, weight, style, best.weight, best.style
        );

        // Declared capability and resource presence are independent layers;
        // the fetch target comes from `files` directly.
        let locator = match resolve_locator(descriptor, weight, style) {
            Ok(locator) => locator,
            Err(e) => {
                warn!("{}", e);
                return false;
            }
        };

        let key = TripleKey::new(descriptor.family.clone(), weight, style);
        match self.cache.acquire(&key) {
            AcquireOutcome::Loaded => true,
            AcquireOutcome::InFlight(handle) => handle.await,
            AcquireOutcome::Begin => {
                let success = self
                    .register_with_timeout(&descriptor.family, &locator, weight, style)
                    .await;
                self.cache.complete(&key, success);
                success
            }
        }
    }

    async fn register_with_timeout(
        &self,
        family: &str,
        locator: &str,
        weight: u16,
        style: FontStyle,
    ) -> bool {
        let registration = self.registry.register(family, locator, weight, style);
        match async_std::future::timeout(self.registration_timeout, registration).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                warn!("Failed to load {} {} {}: {}", family, weight, style, e);
                false
            }
            Err(_) => {
                warn!(
                    "Registration of {} {} {} timed out; releasing its in-flight marker",
                    family, weight, style
                );
                false
            }
        }
    }
}

/// Resource chain: the exact key, then the default weight in the requested
/// style, then the universal 400 upright fallback.
fn resolve_locator(descriptor: &FontDescriptor, weight: u16, style: FontStyle) -> Result<String> {
    [
        variant_key(weight, style),
        variant_key(400, style),
        variant_key(400, FontStyle::Normal),
    ]
    .iter()
    .find_map(|key| descriptor.files.get(key).cloned())
    .ok_or_else(|| {
        AppError::NoResource(format!(
            "{} has no file for {} {} or its fallbacks",
            descriptor.id, weight, style
        ))
    })
}
