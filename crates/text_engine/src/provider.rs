//! Font metrics capability and per-export cache

use crate::{FontKey, FontMetrics, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::Arc;

/// Source of font metrics and embeddable programs.
///
/// Implementations must fail with [`crate::TextError::FontResolution`]
/// rather than substitute a different font.
pub trait FontMetricsProvider {
    fn resolve(&self, key: &FontKey) -> Result<Arc<FontMetrics>>;
}

impl<T: FontMetricsProvider + ?Sized> FontMetricsProvider for &T {
    fn resolve(&self, key: &FontKey) -> Result<Arc<FontMetrics>> {
        (**self).resolve(key)
    }
}

/// Memoising wrapper that resolves each [`FontKey`] at most once.
///
/// One cache lives for one export and is shared by both layout passes and
/// the serializer, so a document embeds exactly the metrics it measured with.
pub struct FontCache<'a> {
    provider: &'a dyn FontMetricsProvider,
    entries: RefCell<HashMap<FontKey, Arc<FontMetrics>>>,
    order: RefCell<Vec<FontKey>>,
    misses: Cell<usize>,
}

impl<'a> FontCache<'a> {
    pub fn new(provider: &'a dyn FontMetricsProvider) -> Self {
        Self {
            provider,
            entries: RefCell::new(HashMap::new()),
            order: RefCell::new(Vec::new()),
            misses: Cell::new(0),
        }
    }

    /// Number of lookups that reached the underlying provider
    pub fn resolutions(&self) -> usize {
        self.misses.get()
    }

    /// Keys resolved so far, in first-use order
    pub fn keys(&self) -> Vec<FontKey> {
        self.order.borrow().clone()
    }
}

impl FontMetricsProvider for FontCache<'_> {
    fn resolve(&self, key: &FontKey) -> Result<Arc<FontMetrics>> {
        if let Some(found) = self.entries.borrow().get(key) {
            return Ok(Arc::clone(found));
        }

        let metrics = self.provider.resolve(key)?;
        self.misses.set(self.misses.get() + 1);
        tracing::debug!(font = %key, em = metrics.em_square, "resolved font metrics");

        self.entries
            .borrow_mut()
            .insert(key.clone(), Arc::clone(&metrics));
        self.order.borrow_mut().push(key.clone());
        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedMetricsProvider, FontStyle};

    #[test]
    fn test_cache_resolves_once_per_key() {
        let provider = FixedMetricsProvider::new();
        let cache = FontCache::new(&provider);

        let regular = FontKey::regular("Arial");
        let bold = FontKey::bold("Arial");
        for _ in 0..3 {
            cache.resolve(&regular).unwrap();
        }
        cache.resolve(&bold).unwrap();
        cache.resolve(&regular).unwrap();

        assert_eq!(cache.resolutions(), 2);
        assert_eq!(provider.calls(), 2);
        assert_eq!(cache.keys(), vec![regular, bold]);
    }

    #[test]
    fn test_cache_propagates_failure_without_caching() {
        let provider = FixedMetricsProvider::new().with_unavailable("Nope");
        let cache = FontCache::new(&provider);
        let key = FontKey::new("Nope", FontStyle::Italic);

        assert!(cache.resolve(&key).is_err());
        assert!(cache.resolve(&key).is_err());
        assert_eq!(cache.resolutions(), 0);
        assert!(cache.keys().is_empty());
    }
}
