//! Fingerprint-cached profile store.
//!
//! The store holds exactly one built generation, keyed by the modification
//! fingerprints of the three source files. Readers clone an `Arc` under a
//! read lock; rebuilds happen off-lock and swap the generation under a short
//! write lock.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::UNIX_EPOCH;

use crate::config::{
    self, ROLE_POOL_FILE, ROLE_POOL_OVERRIDES_FILE, TIER_LIST_FILE,
};
use crate::error::ConfigError;
use crate::profile::{build_profiles, ProfileData};

/// Modification fingerprints of (role pool, overrides, tier list).
/// A missing file fingerprints as -1.
type CacheKey = (i128, i128, i128);

struct Generation {
    key: CacheKey,
    data: Arc<ProfileData>,
    warnings: Vec<String>,
}

/// Process-wide, read-mostly cache over the built knowledge base.
pub struct ProfileStore {
    data_dir: PathBuf,
    cache: RwLock<Option<Generation>>,
}

fn fingerprint(path: &Path) -> i128 {
    std::fs::metadata(path)
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map_or(-1, |d| d.as_nanos() as i128)
}

impl ProfileStore {
    /// Create a store reading its documents from `data_dir`. Nothing is
    /// loaded until the first [`load`](Self::load).
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache: RwLock::new(None),
        }
    }

    /// Directory the source documents are read from.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn cache_key(&self) -> CacheKey {
        (
            fingerprint(&self.data_dir.join(ROLE_POOL_FILE)),
            fingerprint(&self.data_dir.join(ROLE_POOL_OVERRIDES_FILE)),
            fingerprint(&self.data_dir.join(TIER_LIST_FILE)),
        )
    }

    /// Return the current knowledge base and its build warnings.
    ///
    /// Re-reads are short-circuited while the source fingerprints match the
    /// cached generation; `refresh` forces a rebuild.
    pub fn load(&self, refresh: bool) -> Result<(Arc<ProfileData>, Vec<String>), ConfigError> {
        let key = self.cache_key();

        if !refresh {
            let cache = self.cache.read().unwrap_or_else(std::sync::PoisonError::into_inner);
            if let Some(generation) = cache.as_ref() {
                if generation.key == key {
                    return Ok((Arc::clone(&generation.data), generation.warnings.clone()));
                }
            }
        }

        // Rebuild off-lock; concurrent rebuilds are harmless, last swap wins.
        let (pool, mut warnings) = config::load_role_pool(&self.data_dir)?;
        let tier = config::load_tier_list(&self.data_dir)?;
        let data = Arc::new(build_profiles(&pool, &tier, &mut warnings));
        tracing::info!(
            heroes = data.profiles.len(),
            roles = data.roles.len(),
            warnings = warnings.len(),
            "rebuilt hero profile store"
        );

        let mut cache = self.cache.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        *cache = Some(Generation {
            key,
            data: Arc::clone(&data),
            warnings: warnings.clone(),
        });
        Ok((data, warnings))
    }
}
