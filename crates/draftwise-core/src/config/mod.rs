//! Knowledge-base configuration documents.
//!
//! Three JSON files in the data directory feed the advisor:
//! 1. `hero_role_pool.json` — role catalogue plus per-hero role eligibility.
//! 2. `hero_role_pool_overrides.json` (optional) — per-hero patches.
//! 3. `hero_tier_list.json` — per-role tier placements, stats, and counters.
//!
//! The role pool is validated off a loose `serde_json::Value` so that bad
//! entries accumulate into one flat error list instead of failing on the
//! first type mismatch. The tier list is read through typed documents; its
//! nested stats are forward-compatible (unknown fields ignored).

pub mod raw;
mod validate;

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use crate::error::ConfigError;

pub use validate::{merge_role_pool_overrides, validate_role_pool};

/// Role-pool document file name.
pub const ROLE_POOL_FILE: &str = "hero_role_pool.json";
/// Optional role-pool override document file name.
pub const ROLE_POOL_OVERRIDES_FILE: &str = "hero_role_pool_overrides.json";
/// Tier-list document file name.
pub const TIER_LIST_FILE: &str = "hero_tier_list.json";

/// Default power applied when a hero has no explicit value for a role.
pub const DEFAULT_ROLE_POWER: f64 = 0.70;

/// Validated role-pool document: the role catalogue and hero eligibility map.
#[derive(Debug, Clone)]
pub struct RolePool {
    /// Document version string (required, non-empty).
    pub version: String,
    /// Provenance label; `"unknown"` when absent, suffixed with `+overrides`
    /// when an override document patched any hero.
    pub source: String,
    /// Canonical role order. Exactly five roles in a well-formed document;
    /// the validator only requires non-empty and unique.
    pub roles: Vec<String>,
    /// Hero entries keyed by normalised hero name.
    pub heroes: BTreeMap<String, HeroPoolEntry>,
}

/// One hero's entry in the role pool.
#[derive(Debug, Clone)]
pub struct HeroPoolEntry {
    /// Eligible roles, a non-empty subset of the catalogue in canonical order.
    pub possible_roles: Vec<String>,
    /// Per-role power in [0, 1], rounded to 4 decimals, defaulted to
    /// [`DEFAULT_ROLE_POWER`] where missing. Keys follow `possible_roles`.
    pub role_power: BTreeMap<String, f64>,
    /// Deduplicated lowercase tags.
    pub tags: Vec<String>,
}

/// Normalise a hero (or role-pool key) name: trim and lowercase.
pub fn normalize_hero_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Read and parse a JSON file into a loose `Value`.
fn load_json_value(path: &Path, name: &str) -> Result<Value, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&text).map_err(|e| ConfigError::Read {
        name: name.to_string(),
        message: e.to_string(),
    })
}

/// Load and validate the role pool, applying the override document when
/// present. Returns the validated pool plus accumulated warnings.
pub fn load_role_pool(data_dir: &Path) -> Result<(RolePool, Vec<String>), ConfigError> {
    let pool_path = data_dir.join(ROLE_POOL_FILE);
    if !pool_path.exists() {
        return Err(ConfigError::MissingFile {
            name: ROLE_POOL_FILE.to_string(),
        });
    }

    let raw = load_json_value(&pool_path, ROLE_POOL_FILE)?;
    let (mut pool, mut warnings) = validate_role_pool(&raw)?;

    let override_path = data_dir.join(ROLE_POOL_OVERRIDES_FILE);
    if override_path.exists() {
        let override_raw = load_json_value(&override_path, ROLE_POOL_OVERRIDES_FILE)?;
        let override_warnings = merge_role_pool_overrides(&mut pool, &override_raw);
        warnings.extend(override_warnings);
    }

    Ok((pool, warnings))
}

/// Load the tier-list document.
pub fn load_tier_list(data_dir: &Path) -> Result<raw::TierListDoc, ConfigError> {
    let path = data_dir.join(TIER_LIST_FILE);
    if !path.exists() {
        return Err(ConfigError::MissingFile {
            name: TIER_LIST_FILE.to_string(),
        });
    }
    let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::Read {
        name: TIER_LIST_FILE.to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&text).map_err(|e| ConfigError::Read {
        name: TIER_LIST_FILE.to_string(),
        message: e.to_string(),
    })
}
