//! Shared in-code fixtures for unit tests.

use std::collections::{BTreeMap, BTreeSet};

use crate::profile::{HeroProfile, ProfileData};

pub(crate) const ROLES: [&str; 5] = ["exp_lane", "jungle", "mid_lane", "gold_lane", "roam"];

/// Fluent builder for one test hero profile.
pub(crate) struct HeroBuilder {
    profile: HeroProfile,
}

pub(crate) fn hero(name: &str, roles: &[&str]) -> HeroBuilder {
    let possible_roles: Vec<String> = ROLES
        .iter()
        .filter(|r| roles.contains(r))
        .map(ToString::to_string)
        .collect();
    let role_power: BTreeMap<String, f64> =
        possible_roles.iter().map(|r| (r.clone(), 0.70)).collect();
    let role_meta: BTreeMap<String, f64> =
        possible_roles.iter().map(|r| (r.clone(), 60.0)).collect();
    HeroBuilder {
        profile: HeroProfile {
            name: name.to_string(),
            possible_roles,
            role_power,
            role_meta,
            base_meta: 60.0,
            best_tier_score: 74.0,
            strong_against: BTreeMap::new(),
            countered_by: BTreeMap::new(),
            tags: Vec::new(),
            source_entries: 1,
        },
    }
}

impl HeroBuilder {
    pub(crate) fn power(mut self, value: f64) -> Self {
        for v in self.profile.role_power.values_mut() {
            *v = value;
        }
        self
    }

    pub(crate) fn meta(mut self, value: f64) -> Self {
        for v in self.profile.role_meta.values_mut() {
            *v = value;
        }
        self.profile.base_meta = value;
        self
    }

    pub(crate) fn tier(mut self, value: f64) -> Self {
        self.profile.best_tier_score = value;
        self
    }

    pub(crate) fn strong(mut self, opponent: &str, value: f64) -> Self {
        self.profile.strong_against.insert(opponent.to_string(), value);
        self
    }

    pub(crate) fn weak(mut self, opponent: &str, value: f64) -> Self {
        self.profile.countered_by.insert(opponent.to_string(), value);
        self
    }

    pub(crate) fn build(self) -> HeroProfile {
        self.profile
    }
}

pub(crate) fn data(heroes: Vec<HeroProfile>) -> ProfileData {
    let pool_heroes: BTreeSet<String> = heroes.iter().map(|h| h.name.clone()).collect();
    ProfileData {
        roles: ROLES.iter().map(ToString::to_string).collect(),
        profiles: heroes.into_iter().map(|h| (h.name.clone(), h)).collect(),
        pool_version: "1.0".to_string(),
        pool_source: "test".to_string(),
        pool_heroes,
        tier_heroes: BTreeSet::new(),
    }
}

/// A fully flex five-role roster large enough for recommender tests.
pub(crate) fn flex_roster(count: usize) -> ProfileData {
    let heroes = (0..count)
        .map(|i| {
            hero(&format!("hero{i:02}"), &ROLES)
                .meta(50.0 + i as f64)
                .tier(if i % 2 == 0 { 74.0 } else { 88.0 })
                .build()
        })
        .collect();
    data(heroes)
}
