use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{CatalogEntity, EntityKind};
use crate::models::{Destination, Hotel, Package};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "עכשיו".to_string()
        } else if minutes < 60 {
            format!("לפני {} דק׳", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            // 1h 30m+ rounds up
            let hours = if minutes % 60 >= 30 { hours + 1 } else { hours };
            format!("לפני {} שע׳", hours)
        } else {
            let days = minutes / 1440;
            let days = if (minutes % 1440) / 60 >= 12 { days + 1 } else { days };
            format!("לפני {} ימים", days)
        }
    }
}

pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache dir: {}", cache_dir.display()))?;
        Ok(Self { cache_dir })
    }

    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    fn cache_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", name))
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<CachedData<T>>> {
        let path = self.cache_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", name))?;

        let cached: CachedData<T> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", name))?;

        Ok(Some(cached))
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let cached = CachedData::new(data);
        let path = self.cache_path(name);
        let contents = serde_json::to_string_pretty(&cached)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write cache file: {}", name))?;
        Ok(())
    }

    // ===== Generic collections =====

    /// Stored list of a kind, verbatim. When the entry is missing or does
    /// not parse, the bundled defaults are written and returned instead.
    pub fn load_collection<E: CatalogEntity>(&self) -> Vec<E> {
        let key = E::KIND.cache_key();
        match self.load::<Vec<E>>(key) {
            Ok(Some(cached)) => {
                debug!(key, count = cached.data.len(), "Cache hit");
                return cached.data;
            }
            Ok(None) => debug!(key, "Cache empty, seeding defaults"),
            Err(e) => warn!(key, error = %e, "Unreadable cache entry, seeding defaults"),
        }

        let defaults = E::defaults();
        self.save_collection(&defaults);
        defaults
    }

    /// Overwrite the stored list. Failures are logged, never surfaced.
    pub fn save_collection<E: CatalogEntity>(&self, items: &[E]) {
        let key = E::KIND.cache_key();
        if let Err(e) = self.save(key, &items) {
            warn!(key, error = %e, "Failed to save cache");
        }
    }

    pub fn reset_collection<E: CatalogEntity>(&self) -> Vec<E> {
        let defaults = E::defaults();
        self.save_collection(&defaults);
        defaults
    }

    /// Age of a kind's snapshot for the status bar, if one exists
    pub fn collection_age(&self, kind: EntityKind) -> Option<String> {
        // Only the envelope matters here
        match self.load::<serde_json::Value>(kind.cache_key()) {
            Ok(Some(cached)) => Some(cached.age_display()),
            Ok(None) => None,
            Err(e) => {
                debug!(key = kind.cache_key(), error = %e, "Failed to load cache for age display");
                None
            }
        }
    }

    // ===== Packages =====

    pub fn load_packages(&self) -> Vec<Package> {
        self.load_collection()
    }

    pub fn save_packages(&self, packages: &[Package]) {
        self.save_collection(packages)
    }

    pub fn reset_packages(&self) -> Vec<Package> {
        self.reset_collection()
    }

    // ===== Hotels =====

    pub fn load_hotels(&self) -> Vec<Hotel> {
        self.load_collection()
    }

    pub fn save_hotels(&self, hotels: &[Hotel]) {
        self.save_collection(hotels)
    }

    pub fn reset_hotels(&self) -> Vec<Hotel> {
        self.reset_collection()
    }

    // ===== Destinations =====

    pub fn load_destinations(&self) -> Vec<Destination> {
        self.load_collection()
    }

    pub fn save_destinations(&self, destinations: &[Destination]) {
        self.save_collection(destinations)
    }

    pub fn reset_destinations(&self) -> Vec<Destination> {
        self.reset_collection()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn manager() -> (tempfile::TempDir, CacheManager) {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(dir.path().join("cache")).unwrap();
        (dir, cache)
    }

    #[test]
    fn test_age_display_just_now() {
        let cached = CachedData::new(vec![1, 2, 3]);
        assert_eq!(cached.age_display(), "עכשיו");
    }

    #[test]
    fn test_age_display_rounds_hours() {
        let mut cached = CachedData::new(());
        cached.cached_at = Utc::now() - Duration::minutes(95);
        assert_eq!(cached.age_display(), "לפני 2 שע׳");

        cached.cached_at = Utc::now() - Duration::minutes(20);
        assert_eq!(cached.age_display(), "לפני 20 דק׳");
    }

    #[test]
    fn test_load_absent_seeds_defaults_on_disk() {
        let (_dir, cache) = manager();
        assert_eq!(cache.load_hotels(), Hotel::defaults());
        assert!(cache.cache_path("afim-rahok-hotels").exists());
        assert!(cache.collection_age(EntityKind::Hotel).is_some());
    }

    #[test]
    fn test_saved_list_returned_verbatim() {
        let (_dir, cache) = manager();
        let mut destinations = Destination::defaults();
        destinations.truncate(1);
        destinations[0].sort_order = None;

        cache.save_destinations(&destinations);
        assert_eq!(cache.load_destinations(), destinations);
    }

    #[test]
    fn test_unparseable_entry_replaced_with_defaults() {
        let (_dir, cache) = manager();
        std::fs::write(cache.cache_path("afim-rahok-packages"), "{not json").unwrap();

        assert_eq!(cache.load_packages(), Package::defaults());
        // Rewritten, so a second load parses
        assert!(cache.load::<Vec<Package>>("afim-rahok-packages").unwrap().is_some());
    }

    #[test]
    fn test_reset_overwrites_saved_list() {
        let (_dir, cache) = manager();
        cache.save_packages(&[]);
        assert!(cache.load_packages().is_empty());

        cache.reset_packages();
        assert_eq!(cache.load_packages(), Package::defaults());
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let (dir, cache) = manager();
        std::fs::remove_dir_all(dir.path().join("cache")).unwrap();
        // Directory gone: write fails, nothing panics
        cache.save_hotels(&Hotel::defaults());
        assert_eq!(cache.collection_age(EntityKind::Hotel), None);
    }
}
