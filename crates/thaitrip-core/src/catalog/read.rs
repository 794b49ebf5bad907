//! Public read views.
//!
//! Visitors always get something to look at: a failed or empty fetch falls
//! back to the bundled defaults with a notice instead of an error.

use tracing::{info, warn};

use super::{Catalog, CatalogEntity, EntityKind};
use crate::cache::CacheManager;
use crate::models::{Package, TripFilter};

/// Where the items of a view came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Remote,
    LocalCache,
    Defaults,
}

impl CatalogSource {
    pub fn label(&self) -> &'static str {
        match self {
            CatalogSource::Remote => "שרת",
            CatalogSource::LocalCache => "מטמון מקומי",
            CatalogSource::Defaults => "ברירת מחדל",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView<E> {
    pub items: Vec<E>,
    pub source: CatalogSource,
    /// Shown above the list when the view fell back
    pub notice: Option<String>,
}

impl<E: CatalogEntity> CatalogView<E> {
    fn defaults(notice: Option<String>) -> Self {
        Self {
            items: E::defaults(),
            source: CatalogSource::Defaults,
            notice,
        }
    }
}

fn fallback_notice(kind: EntityKind) -> String {
    match kind {
        EntityKind::Package => "לא הצלחנו לטעון את החבילות כרגע, מציג ברירת מחדל.".to_string(),
        EntityKind::Hotel => "לא הצלחנו לטעון מלונות, מציג ברירת מחדל.".to_string(),
        EntityKind::Destination => "לא הצלחנו לטעון יעדים, מציג ברירת מחדל.".to_string(),
    }
}

/// Fetch from the remote store, substituting the bundled defaults when
/// the fetch fails or returns nothing. Never returns an error.
pub async fn load_or_defaults<E: CatalogEntity>(catalog: &Catalog) -> CatalogView<E> {
    let table = E::KIND.table();
    match catalog.fetch::<E>().await {
        Ok(items) if !items.is_empty() => CatalogView {
            items,
            source: CatalogSource::Remote,
            notice: None,
        },
        Ok(_) => {
            info!(table, "Remote catalog empty, showing defaults");
            CatalogView::defaults(None)
        }
        Err(e) => {
            warn!(table, error = %e, "Read view falling back to defaults");
            CatalogView::defaults(Some(fallback_notice(E::KIND)))
        }
    }
}

/// Read a view from the on-device cache (seeded with defaults on first use).
pub fn load_from_cache<E: CatalogEntity>(cache: &CacheManager) -> CatalogView<E> {
    CatalogView {
        items: cache.load_collection::<E>(),
        source: CatalogSource::LocalCache,
        notice: None,
    }
}

/// Packages matching a filter, in their existing order
pub fn filter_packages<'a>(packages: &'a [Package], filter: TripFilter) -> Vec<&'a Package> {
    packages.iter().filter(|p| filter.matches(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::api::{MemoryStore, StoreOp};
    use crate::models::{Destination, Hotel, TripType};

    fn catalog() -> (Arc<MemoryStore>, Catalog) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), Catalog::new(store))
    }

    #[tokio::test]
    async fn test_failed_fetch_returns_defaults_with_notice() {
        let (store, catalog) = catalog();
        store.fail(StoreOp::Select);

        let view = load_or_defaults::<Package>(&catalog).await;
        assert_eq!(view.items, Package::defaults());
        assert_eq!(view.source, CatalogSource::Defaults);
        assert!(view.notice.unwrap().contains("ברירת מחדל"));
    }

    #[tokio::test]
    async fn test_empty_remote_returns_defaults_quietly() {
        let (_, catalog) = catalog();
        let view = load_or_defaults::<Hotel>(&catalog).await;
        assert_eq!(view.items, Hotel::defaults());
        assert_eq!(view.notice, None);
    }

    #[tokio::test]
    async fn test_remote_rows_win_when_present() {
        let (_, catalog) = catalog();
        let inserted = catalog.reset_packages().await.unwrap();
        catalog.delete_package(&inserted[0].id).await.unwrap();

        let view = load_or_defaults::<Package>(&catalog).await;
        assert_eq!(view.source, CatalogSource::Remote);
        assert_eq!(view.items.len(), 2);
    }

    #[test]
    fn test_load_from_cache_seeds_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(dir.path().to_path_buf()).unwrap();

        let view = load_from_cache::<Destination>(&cache);
        assert_eq!(view.items, Destination::defaults());
        assert_eq!(view.source, CatalogSource::LocalCache);
    }

    #[test]
    fn test_filter_packages() {
        let packages = Package::defaults();
        assert_eq!(filter_packages(&packages, TripFilter::All).len(), 3);

        let families = filter_packages(&packages, TripFilter::Only(TripType::Families));
        assert_eq!(families.len(), 1);
        assert_eq!(families[0].trip_type, TripType::Families);
    }
}
