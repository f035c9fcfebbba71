use crate::models::College;
use crate::services::{AppwriteClient, AppwriteError, CacheKey, CacheManager, CacheStats};
use std::sync::Arc;

/// Cached view of the college catalog
///
/// Reads go through the cache; listings follow the catalog source contract
/// and come back empty when the store cannot be reached.
#[derive(Clone)]
pub struct CatalogService {
    appwrite: Arc<AppwriteClient>,
    cache: Arc<CacheManager>,
}

impl CatalogService {
    pub fn new(appwrite: Arc<AppwriteClient>, cache: Arc<CacheManager>) -> Self {
        Self { appwrite, cache }
    }

    /// All colleges, or only those in `location`
    pub async fn colleges(&self, location: Option<&str>) -> Vec<College> {
        let key = CacheKey::colleges(location);

        if let Ok(colleges) = self.cache.get::<Vec<College>>(&key).await {
            return colleges;
        }

        match self.appwrite.list_colleges(location).await {
            Ok(colleges) => {
                if let Err(e) = self.cache.set(&key, &colleges).await {
                    tracing::warn!("Failed to cache catalog listing {}: {}", key, e);
                }
                colleges
            }
            Err(e) => {
                // Failures are not cached so the next request retries the store
                tracing::error!("Failed to load colleges (location: {:?}): {}", location, e);
                Vec::new()
            }
        }
    }

    pub async fn college(&self, college_id: &str) -> Result<College, AppwriteError> {
        let key = CacheKey::college(college_id);

        if let Ok(college) = self.cache.get::<College>(&key).await {
            return Ok(college);
        }

        let college = self.appwrite.get_college(college_id).await?;
        if let Err(e) = self.cache.set(&key, &college).await {
            tracing::warn!("Failed to cache college {}: {}", college_id, e);
        }
        Ok(college)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop cached listings and, when given, one cached college
    pub async fn invalidate(&self, college_id: Option<&str>) {
        if let Err(e) = self.cache.invalidate_pattern(CacheKey::COLLEGES_PATTERN).await {
            tracing::warn!("Failed to invalidate catalog cache: {}", e);
        }
        if let Some(id) = college_id {
            if let Err(e) = self.cache.delete(&CacheKey::college(id)).await {
                tracing::warn!("Failed to invalidate college {}: {}", id, e);
            }
        }
    }
}
