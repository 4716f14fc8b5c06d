//! Role-pool validation and override merging.
//!
//! The validator walks a loose `serde_json::Value` so that every bad entry is
//! reported: hard failures accumulate into one flat error list, recoverable
//! oddities become warnings. Override patches never fail the build; a patch
//! that does not validate leaves its hero untouched and warns.

use std::collections::BTreeSet;

use serde_json::Value;

use super::{normalize_hero_name, HeroPoolEntry, RolePool, DEFAULT_ROLE_POWER, ROLE_POOL_FILE};
use crate::error::ConfigError;

/// Coerce a loose JSON scalar to a string, treating falsy values as empty.
fn loose_str(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => {
            if n.as_f64() == Some(0.0) {
                String::new()
            } else {
                n.to_string()
            }
        }
        Some(Value::Bool(true)) => "true".to_string(),
        _ => String::new(),
    }
}

/// Coerce a loose JSON value to a float; booleans are rejected.
fn as_float(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    }
}

fn clamp_power(value: f64) -> f64 {
    let clamped = value.clamp(0.0, 1.0);
    (clamped * 10_000.0).round() / 10_000.0
}

/// Parse a tags array: trimmed, lowercased, deduplicated, order-preserving.
fn parse_tags(raw: &Value) -> Vec<String> {
    let mut tags = Vec::new();
    let mut seen = BTreeSet::new();
    if let Value::Array(items) = raw {
        for item in items {
            let tag = loose_str(Some(item)).trim().to_lowercase();
            if tag.is_empty() || seen.contains(&tag) {
                continue;
            }
            seen.insert(tag.clone());
            tags.push(tag);
        }
    }
    tags
}

/// Validate a raw role-pool document.
///
/// Returns the validated pool and accumulated warnings; any hard validation
/// failure aborts with a [`ConfigError::Validation`] carrying the first 20
/// messages.
pub fn validate_role_pool(raw: &Value) -> Result<(RolePool, Vec<String>), ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let Value::Object(doc) = raw else {
        return Err(ConfigError::validation(
            ROLE_POOL_FILE,
            vec!["document must be an object".to_string()],
        ));
    };

    let version = loose_str(doc.get("version")).trim().to_string();
    if version.is_empty() {
        errors.push("Field 'version' is required".to_string());
    }

    let mut source = loose_str(doc.get("source")).trim().to_string();
    if source.is_empty() {
        source = "unknown".to_string();
    }

    let mut roles: Vec<String> = Vec::new();
    match doc.get("roles") {
        Some(Value::Array(items)) if !items.is_empty() => {
            let mut seen = BTreeSet::new();
            for (idx, item) in items.iter().enumerate() {
                let role = loose_str(Some(item)).trim().to_string();
                if role.is_empty() {
                    errors.push(format!("roles[{idx}] is empty"));
                    continue;
                }
                if seen.contains(&role) {
                    warnings.push(format!("Duplicate role '{role}' was ignored"));
                    continue;
                }
                seen.insert(role.clone());
                roles.push(role);
            }
        }
        _ => errors.push("Field 'roles' must be a non-empty array".to_string()),
    }
    let role_set: BTreeSet<&str> = roles.iter().map(String::as_str).collect();

    let empty_map = serde_json::Map::new();
    let heroes_raw = match doc.get("heroes") {
        Some(Value::Object(map)) if !map.is_empty() => map,
        _ => {
            errors.push("Field 'heroes' must be a non-empty object".to_string());
            &empty_map
        }
    };

    let mut heroes = std::collections::BTreeMap::new();
    for (hero_name, hero_cfg) in heroes_raw {
        let hero_key = normalize_hero_name(hero_name);
        if hero_key.is_empty() {
            warnings.push("Found empty hero key and skipped".to_string());
            continue;
        }
        if heroes.contains_key(&hero_key) {
            warnings.push(format!("Duplicate hero key after normalization: '{hero_key}'"));
            continue;
        }
        let Value::Object(cfg) = hero_cfg else {
            errors.push(format!("Hero '{hero_key}' value must be an object"));
            continue;
        };

        let possible_raw = match cfg.get("possibleRoles") {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => {
                errors.push(format!("Hero '{hero_key}' must have non-empty possibleRoles"));
                continue;
            }
        };

        let mut requested: BTreeSet<String> = BTreeSet::new();
        let mut invalid: Vec<String> = Vec::new();
        let mut seen = BTreeSet::new();
        for item in possible_raw {
            let role = loose_str(Some(item)).trim().to_string();
            if role.is_empty() || seen.contains(&role) {
                continue;
            }
            seen.insert(role.clone());
            if role_set.contains(role.as_str()) {
                requested.insert(role);
            } else {
                invalid.push(role);
            }
        }
        if !invalid.is_empty() {
            errors.push(format!(
                "Hero '{hero_key}' has invalid possibleRoles: {}",
                invalid.join(", ")
            ));
            continue;
        }
        if requested.is_empty() {
            errors.push(format!("Hero '{hero_key}' has no valid possibleRoles"));
            continue;
        }
        // Canonical catalogue order, for both the role list and its power keys.
        let possible_roles: Vec<String> =
            roles.iter().filter(|r| requested.contains(*r)).cloned().collect();

        let empty_power = serde_json::Map::new();
        let role_power_raw = match cfg.get("rolePower") {
            None | Some(Value::Null) => &empty_power,
            Some(Value::Object(map)) => map,
            Some(_) => {
                warnings.push(format!(
                    "Hero '{hero_key}' has invalid rolePower type; defaults were applied"
                ));
                &empty_power
            }
        };

        let mut role_power = std::collections::BTreeMap::new();
        for role in &possible_roles {
            let value = match as_float(role_power_raw.get(role)) {
                Some(v) => v,
                None => {
                    warnings.push(format!(
                        "Hero '{hero_key}' missing rolePower for '{role}'; default={DEFAULT_ROLE_POWER}"
                    ));
                    DEFAULT_ROLE_POWER
                }
            };
            role_power.insert(role.clone(), clamp_power(value));
        }

        let extra: Vec<&str> = role_power_raw
            .keys()
            .filter(|k| !possible_roles.iter().any(|r| r == *k))
            .map(String::as_str)
            .collect();
        if !extra.is_empty() {
            warnings.push(format!(
                "Hero '{hero_key}' has rolePower keys outside possibleRoles: {}",
                extra.join(", ")
            ));
        }

        let tags = match cfg.get("tags") {
            None | Some(Value::Null) => Vec::new(),
            Some(raw_tags @ Value::Array(_)) => parse_tags(raw_tags),
            Some(_) => {
                warnings.push(format!("Hero '{hero_key}' tags is not an array and was ignored"));
                Vec::new()
            }
        };

        heroes.insert(
            hero_key,
            HeroPoolEntry {
                possible_roles,
                role_power,
                tags,
            },
        );
    }

    if !errors.is_empty() {
        return Err(ConfigError::validation(ROLE_POOL_FILE, errors));
    }

    Ok((
        RolePool {
            version,
            source,
            roles,
            heroes,
        },
        warnings,
    ))
}

/// Merge an override document into a validated pool.
///
/// Patches apply per hero; a patch that fails validation warns and leaves the
/// hero untouched. Any hero present in the override flags the pool source
/// with a `+overrides` suffix.
pub fn merge_role_pool_overrides(pool: &mut RolePool, raw: &Value) -> Vec<String> {
    let mut warnings: Vec<String> = Vec::new();

    let Value::Object(doc) = raw else {
        return vec!["hero_role_pool_overrides.json must be an object; file ignored".to_string()];
    };

    let empty_map = serde_json::Map::new();
    let heroes_overrides = match doc.get("heroes") {
        None | Some(Value::Null) => &empty_map,
        Some(Value::Object(map)) => map,
        Some(_) => {
            return vec![
                "hero_role_pool_overrides.json field 'heroes' must be an object; file ignored"
                    .to_string(),
            ]
        }
    };

    let role_set: BTreeSet<&str> = pool.roles.iter().map(String::as_str).collect();

    for (hero_name, patch) in heroes_overrides {
        let hero = normalize_hero_name(hero_name);
        if hero.is_empty() {
            warnings.push("Override contains empty hero key and was skipped".to_string());
            continue;
        }
        let Value::Object(patch) = patch else {
            warnings.push(format!("Override for '{hero}' must be an object"));
            continue;
        };

        let current = pool.heroes.get(&hero);
        let mut current_roles: Vec<String> =
            current.map(|c| c.possible_roles.clone()).unwrap_or_default();
        let mut current_power = current.map(|c| c.role_power.clone()).unwrap_or_default();
        let mut current_tags: Vec<String> = current.map(|c| c.tags.clone()).unwrap_or_default();

        if patch.contains_key("possibleRoles") {
            let Some(Value::Array(items)) = patch.get("possibleRoles") else {
                warnings.push(format!("Override '{hero}': possibleRoles must be non-empty array"));
                continue;
            };
            if items.is_empty() {
                warnings.push(format!("Override '{hero}': possibleRoles must be non-empty array"));
                continue;
            }
            let mut parsed: Vec<String> = Vec::new();
            let mut seen = BTreeSet::new();
            let mut bad: Vec<String> = Vec::new();
            for item in items {
                let role = loose_str(Some(item)).trim().to_string();
                if role.is_empty() || seen.contains(&role) {
                    continue;
                }
                seen.insert(role.clone());
                if role_set.contains(role.as_str()) {
                    parsed.push(role);
                } else {
                    bad.push(role);
                }
            }
            if !bad.is_empty() {
                warnings.push(format!("Override '{hero}': invalid roles {}", bad.join(", ")));
                continue;
            }
            if parsed.is_empty() {
                warnings.push(format!("Override '{hero}': no valid roles after filtering"));
                continue;
            }
            // A replaced role list wipes power entries that no longer apply.
            current_power.retain(|role, _| parsed.contains(role));
            current_roles = parsed;
        }

        if patch.contains_key("rolePower") {
            let Some(Value::Object(power_patch)) = patch.get("rolePower") else {
                warnings.push(format!("Override '{hero}': rolePower must be an object"));
                continue;
            };
            for role in &current_roles {
                if let Some(value) = power_patch.get(role) {
                    match as_float(Some(value)) {
                        Some(v) => {
                            current_power.insert(role.clone(), clamp_power(v));
                        }
                        None => warnings.push(format!(
                            "Override '{hero}': rolePower.{role} invalid, keep previous/default"
                        )),
                    }
                }
            }
        }

        if patch.contains_key("tags") {
            match patch.get("tags") {
                Some(raw_tags @ Value::Array(_)) => current_tags = parse_tags(raw_tags),
                _ => warnings.push(format!("Override '{hero}': tags must be an array")),
            }
        }

        if current_roles.is_empty() {
            warnings.push(format!("Override '{hero}': resulting possibleRoles empty, skipped"));
            continue;
        }

        for role in &current_roles {
            current_power.entry(role.clone()).or_insert(DEFAULT_ROLE_POWER);
        }

        let keep: BTreeSet<&str> = current_roles.iter().map(String::as_str).collect();
        let possible_roles: Vec<String> =
            pool.roles.iter().filter(|r| keep.contains(r.as_str())).cloned().collect();
        let role_power = possible_roles
            .iter()
            .filter_map(|r| current_power.get(r).map(|v| (r.clone(), *v)))
            .collect();

        pool.heroes.insert(
            hero,
            HeroPoolEntry {
                possible_roles,
                role_power,
                tags: current_tags,
            },
        );
    }

    if !heroes_overrides.is_empty() {
        pool.source = format!("{}+overrides", pool.source);
    }

    warnings
}
