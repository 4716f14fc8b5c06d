//! Hero profile catalogue.
//!
//! Profiles blend the role pool (eligibility, per-role power, tags) with the
//! tier list (tier grades, pick/ban stats, pairwise counters) into the
//! immutable in-memory knowledge base the solver and evaluator read.

mod store;

pub use store::ProfileStore;

use std::collections::{BTreeMap, BTreeSet};

use crate::config::raw::{TierHeroDoc, TierListDoc};
use crate::config::{RolePool, DEFAULT_ROLE_POWER};
use crate::numeric::{clamp01, clamp100, round4};

/// Numeric anchor for a tier letter grade. Absent or unknown grades score
/// as C.
pub fn tier_score(tier: Option<&str>) -> f64 {
    match tier.unwrap_or("C").to_uppercase().as_str() {
        "SS" => 100.0,
        "S" => 88.0,
        "A" => 74.0,
        "B" => 60.0,
        "D" => 30.0,
        _ => 45.0,
    }
}

/// A hero's configured role power, treating 0 as unset.
fn power_or_default(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v != 0.0 => v,
        _ => DEFAULT_ROLE_POWER,
    }
}

/// Immutable per-hero knowledge-base entry.
#[derive(Debug, Clone)]
pub struct HeroProfile {
    /// Normalised hero name.
    pub name: String,
    /// Eligible roles in canonical catalogue order, non-empty.
    pub possible_roles: Vec<String>,
    /// Role -> power in [0, 1] for every eligible role.
    pub role_power: BTreeMap<String, f64>,
    /// Role -> meta strength in [0, 100] for every eligible role.
    pub role_meta: BTreeMap<String, f64>,
    /// Mean of `role_meta` over the eligible roles.
    pub base_meta: f64,
    /// Best tier anchor across the eligible roles.
    pub best_tier_score: f64,
    /// Opponent -> normalised advantage in [0, 1].
    pub strong_against: BTreeMap<String, f64>,
    /// Opponent -> normalised disadvantage in [0, 1].
    pub countered_by: BTreeMap<String, f64>,
    /// Deduplicated lowercase tags.
    pub tags: Vec<String>,
    /// Number of tier-list rows that fed this profile.
    pub source_entries: usize,
}

/// The built knowledge base: role catalogue plus all hero profiles.
#[derive(Debug, Clone)]
pub struct ProfileData {
    /// Canonical role order.
    pub roles: Vec<String>,
    /// Profiles keyed by normalised hero name; iteration is lexicographic,
    /// which fixes candidate enumeration order.
    pub profiles: BTreeMap<String, HeroProfile>,
    /// Role-pool document version.
    pub pool_version: String,
    /// Role-pool provenance label.
    pub pool_source: String,
    /// Hero keys present in the role pool (excludes fallback profiles).
    pub pool_heroes: BTreeSet<String>,
    /// Hero keys present anywhere in the tier list.
    pub tier_heroes: BTreeSet<String>,
}

/// Normalise one pairwise counter value: win rate damped by sample size.
fn counter_value(rate: f64, encounters: f64) -> f64 {
    clamp01(rate * (encounters / 5.0).min(1.0))
}

/// Build the knowledge base from a validated role pool and the tier list.
///
/// Heroes present in the tier list but absent from the pool get a fallback
/// profile (flat power, tier-score-only meta, `unmapped` tag) and a warning.
pub fn build_profiles(
    pool: &RolePool,
    tier: &TierListDoc,
    warnings: &mut Vec<String>,
) -> ProfileData {
    // Index tier entries by hero then role, gathering maxima for
    // normalisation across the whole document.
    let mut by_hero_role: BTreeMap<String, BTreeMap<String, &TierHeroDoc>> = BTreeMap::new();
    let mut max_pick_win = 0.0_f64;
    let mut max_pick = 0.0_f64;
    let mut max_ban = 0.0_f64;
    for (role, role_doc) in &tier.roles {
        for entry in &role_doc.hero_details {
            let hero = crate::config::normalize_hero_name(&entry.hero);
            if hero.is_empty() {
                continue;
            }
            by_hero_role.entry(hero).or_default().insert(role.clone(), entry);
            max_pick_win = max_pick_win.max(entry.stats.pick_win_count);
            max_pick = max_pick.max(entry.stats.pick_count);
            max_ban = max_ban.max(entry.stats.ban_count);
        }
    }

    let norm = |value: f64, max: f64| if max > 0.0 { value / max * 100.0 } else { 0.0 };

    let mut profiles: BTreeMap<String, HeroProfile> = BTreeMap::new();
    for (hero, entry) in &pool.heroes {
        let mut role_meta = BTreeMap::new();
        let mut strong_against: BTreeMap<String, f64> = BTreeMap::new();
        let mut countered_by: BTreeMap<String, f64> = BTreeMap::new();
        let mut best_tier = 0.0_f64;
        let mut source_entries = 0;

        for role in &entry.possible_roles {
            let tier_entry = by_hero_role.get(hero).and_then(|roles| roles.get(role));
            let ts = tier_score(tier_entry.and_then(|e| e.tier.as_deref()));
            best_tier = best_tier.max(ts);

            let (pick_win_norm, pick_norm, ban_norm) = match tier_entry {
                Some(e) => (
                    norm(e.stats.pick_win_count, max_pick_win),
                    norm(e.stats.pick_count, max_pick),
                    norm(e.stats.ban_count, max_ban),
                ),
                None => (0.0, 0.0, 0.0),
            };

            let rp = power_or_default(entry.role_power.get(role).copied());
            role_meta.insert(
                role.clone(),
                round4(clamp100(
                    0.42 * ts
                        + 0.28 * pick_win_norm
                        + 0.12 * pick_norm
                        + 0.08 * ban_norm
                        + 0.10 * (rp * 100.0),
                )),
            );
            source_entries += 1;

            if let Some(e) = tier_entry {
                for x in &e.counters.strong_against {
                    let opp = crate::config::normalize_hero_name(&x.hero);
                    if opp.is_empty() {
                        continue;
                    }
                    let val = counter_value(x.win_rate, x.encounters);
                    let slot = strong_against.entry(opp).or_insert(0.0);
                    *slot = slot.max(val);
                }
                for x in &e.counters.countered_by {
                    let opp = crate::config::normalize_hero_name(&x.hero);
                    if opp.is_empty() {
                        continue;
                    }
                    let val = counter_value(x.opponent_win_rate, x.encounters);
                    let slot = countered_by.entry(opp).or_insert(0.0);
                    *slot = slot.max(val);
                }
            }
        }

        let base_meta =
            round4(role_meta.values().sum::<f64>() / role_meta.len().max(1) as f64);
        let role_power = entry
            .possible_roles
            .iter()
            .map(|r| (r.clone(), power_or_default(entry.role_power.get(r).copied())))
            .collect();

        profiles.insert(
            hero.clone(),
            HeroProfile {
                name: hero.clone(),
                possible_roles: entry.possible_roles.clone(),
                role_power,
                role_meta,
                base_meta,
                best_tier_score: if best_tier > 0.0 { best_tier } else { 45.0 },
                strong_against,
                countered_by,
                tags: entry.tags.clone(),
                source_entries,
            },
        );
    }

    // Fallback profiles for heroes the tier list knows but the pool does not.
    for (hero, role_entries) in &by_hero_role {
        if profiles.contains_key(hero) {
            continue;
        }
        let mut possible_roles: Vec<String> = pool
            .roles
            .iter()
            .filter(|r| role_entries.contains_key(*r))
            .cloned()
            .collect();
        if possible_roles.is_empty() {
            possible_roles = pool.roles.clone();
        }
        let role_meta: BTreeMap<String, f64> = possible_roles
            .iter()
            .map(|role| {
                let ts =
                    tier_score(role_entries.get(role).and_then(|e| e.tier.as_deref()));
                (role.clone(), ts)
            })
            .collect();
        let base_meta =
            round4(role_meta.values().sum::<f64>() / role_meta.len().max(1) as f64);
        let best_tier_score =
            role_meta.values().fold(0.0_f64, |acc, v| acc.max(*v)).max(45.0);

        profiles.insert(
            hero.clone(),
            HeroProfile {
                name: hero.clone(),
                possible_roles: possible_roles.clone(),
                role_power: possible_roles
                    .iter()
                    .map(|r| (r.clone(), DEFAULT_ROLE_POWER))
                    .collect(),
                role_meta,
                base_meta,
                best_tier_score,
                strong_against: BTreeMap::new(),
                countered_by: BTreeMap::new(),
                tags: vec!["unmapped".to_string()],
                source_entries: role_entries.len(),
            },
        );
        warnings.push(format!("Hero '{hero}' missing in role pool; fallback profile applied"));
    }

    ProfileData {
        roles: pool.roles.clone(),
        profiles,
        pool_version: pool.version.clone(),
        pool_source: pool.source.clone(),
        pool_heroes: pool.heroes.keys().cloned().collect(),
        tier_heroes: by_hero_role.keys().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeroPoolEntry;
    use serde_json::json;

    pub(crate) const ROLES: [&str; 5] = ["exp_lane", "jungle", "mid_lane", "gold_lane", "roam"];

    fn pool_with(heroes: Vec<(&str, Vec<&str>, Vec<(&str, f64)>)>) -> RolePool {
        RolePool {
            version: "1.0".to_string(),
            source: "test".to_string(),
            roles: ROLES.iter().map(ToString::to_string).collect(),
            heroes: heroes
                .into_iter()
                .map(|(name, roles, powers)| {
                    let possible_roles: Vec<String> =
                        roles.iter().map(ToString::to_string).collect();
                    let mut role_power: BTreeMap<String, f64> = possible_roles
                        .iter()
                        .map(|r| (r.clone(), DEFAULT_ROLE_POWER))
                        .collect();
                    for (role, power) in powers {
                        role_power.insert(role.to_string(), power);
                    }
                    (
                        name.to_string(),
                        HeroPoolEntry {
                            possible_roles,
                            role_power,
                            tags: Vec::new(),
                        },
                    )
                })
                .collect(),
        }
    }

    fn tier_doc(value: serde_json::Value) -> TierListDoc {
        serde_json::from_value(value).expect("tier doc")
    }

    #[test]
    fn role_meta_blends_tier_and_stats() {
        let pool = pool_with(vec![("ling", vec!["jungle"], vec![("jungle", 0.9)])]);
        let tier = tier_doc(json!({"roles": {"jungle": {"heroDetails": [
            {"hero": "ling", "tier": "SS",
             "stats": {"pickWinCount": 10, "pickCount": 20, "banCount": 5, "winRate": 0.6}}
        ]}}}));
        let mut warnings = Vec::new();
        let data = build_profiles(&pool, &tier, &mut warnings);
        let ling = &data.profiles["ling"];
        // Single entry, so every normalised stat is 100:
        // 0.42*100 + 0.28*100 + 0.12*100 + 0.08*100 + 0.10*90 = 99.0
        assert_eq!(ling.role_meta["jungle"], 99.0);
        assert_eq!(ling.base_meta, 99.0);
        assert_eq!(ling.best_tier_score, 100.0);
        assert!(warnings.is_empty());
    }

    #[test]
    fn missing_tier_entry_scores_as_c() {
        let pool = pool_with(vec![("novaria", vec!["mid_lane"], vec![("mid_lane", 0.8)])]);
        let tier = tier_doc(json!({"roles": {}}));
        let mut warnings = Vec::new();
        let data = build_profiles(&pool, &tier, &mut warnings);
        let hero = &data.profiles["novaria"];
        // 0.42*45 + 0.10*80 = 18.9 + 8.0
        assert_eq!(hero.role_meta["mid_lane"], 26.9);
        assert_eq!(hero.best_tier_score, 45.0);
    }

    #[test]
    fn counter_values_damped_by_encounters() {
        let pool = pool_with(vec![("chou", vec!["exp_lane"], vec![])]);
        let tier = tier_doc(json!({"roles": {"exp_lane": {"heroDetails": [
            {"hero": "chou", "tier": "A", "counters": {
                "strongAgainst": [
                    {"hero": "ling", "winRate": 0.8, "encounters": 3},
                    {"hero": "fanny", "winRate": 0.9, "encounters": 12}
                ],
                "counteredBy": [{"hero": "khufra", "opponentWinRate": 0.7, "encounters": 5}]
            }}
        ]}}}));
        let mut warnings = Vec::new();
        let data = build_profiles(&pool, &tier, &mut warnings);
        let chou = &data.profiles["chou"];
        assert!((chou.strong_against["ling"] - 0.48).abs() < 1e-9);
        assert_eq!(chou.strong_against["fanny"], 0.9);
        assert_eq!(chou.countered_by["khufra"], 0.7);
    }

    #[test]
    fn counter_collisions_take_max_across_roles() {
        let pool = pool_with(vec![("hero", vec!["jungle", "roam"], vec![])]);
        let tier = tier_doc(json!({"roles": {
            "jungle": {"heroDetails": [{"hero": "hero", "tier": "B", "counters": {
                "strongAgainst": [{"hero": "foe", "winRate": 0.5, "encounters": 10}]}}]},
            "roam": {"heroDetails": [{"hero": "hero", "tier": "B", "counters": {
                "strongAgainst": [{"hero": "foe", "winRate": 0.8, "encounters": 10}]}}]}
        }}));
        let mut warnings = Vec::new();
        let data = build_profiles(&pool, &tier, &mut warnings);
        assert_eq!(data.profiles["hero"].strong_against["foe"], 0.8);
    }

    #[test]
    fn tier_only_hero_gets_fallback_profile() {
        let pool = pool_with(vec![("franco", vec!["roam"], vec![])]);
        let tier = tier_doc(json!({"roles": {"jungle": {"heroDetails": [
            {"hero": "karrie", "tier": "S"}
        ]}}}));
        let mut warnings = Vec::new();
        let data = build_profiles(&pool, &tier, &mut warnings);
        let karrie = &data.profiles["karrie"];
        assert_eq!(karrie.tags, vec!["unmapped"]);
        assert_eq!(karrie.possible_roles, vec!["jungle"]);
        assert_eq!(karrie.role_meta["jungle"], 88.0);
        assert_eq!(karrie.role_power["jungle"], DEFAULT_ROLE_POWER);
        assert!(warnings.iter().any(|w| w.contains("karrie") && w.contains("fallback")));
    }

    #[test]
    fn zero_role_power_falls_back_to_default() {
        let pool = pool_with(vec![("hero", vec!["jungle"], vec![("jungle", 0.0)])]);
        let tier = tier_doc(json!({"roles": {}}));
        let mut warnings = Vec::new();
        let data = build_profiles(&pool, &tier, &mut warnings);
        assert_eq!(data.profiles["hero"].role_power["jungle"], DEFAULT_ROLE_POWER);
    }

    #[test]
    fn universal_ranges_hold() {
        let pool = pool_with(vec![
            ("a", vec!["jungle", "mid_lane"], vec![("jungle", 1.0)]),
            ("b", vec!["roam"], vec![]),
        ]);
        let tier = tier_doc(json!({"roles": {"jungle": {"heroDetails": [
            {"hero": "a", "tier": "SS",
             "stats": {"pickWinCount": 50, "pickCount": 80, "banCount": 40, "winRate": 0.7},
             "counters": {"strongAgainst": [{"hero": "b", "winRate": 1.0, "encounters": 30}]}}
        ]}}}));
        let mut warnings = Vec::new();
        let data = build_profiles(&pool, &tier, &mut warnings);
        for profile in data.profiles.values() {
            for meta in profile.role_meta.values() {
                assert!((0.0..=100.0).contains(meta));
            }
            assert!((0.0..=100.0).contains(&profile.base_meta));
            for v in profile.strong_against.values().chain(profile.countered_by.values()) {
                assert!((0.0..=1.0).contains(v));
            }
        }
    }
}
