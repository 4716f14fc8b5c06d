//! Role-feasibility solver.
//!
//! Treats a side's heroes and the five roles as a bipartite graph and
//! enumerates every complete matching by depth-first search. Heroes are
//! visited most-constrained-first to bound branching; each hero's roles are
//! tried in its canonical-order eligibility list, so enumeration order (and
//! therefore which maximum-power assignment is recorded first) is
//! deterministic. Recursion depth is bounded by the role count.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::normalize_hero_name;
use crate::numeric::{clamp01, permutations, round4, round6};
use crate::profile::ProfileData;

/// Role power assumed for heroes missing from the knowledge base.
const UNKNOWN_HERO_POWER: f64 = 0.65;

/// Result of solving one side's role assignment.
#[derive(Debug, Clone)]
pub struct Assignment {
    /// Whether at least one complete matching exists.
    pub is_feasible: bool,
    /// Power sum of the best matching, rounded to 6 decimals.
    pub best_score: f64,
    /// Role -> hero for the maximum-power matching; empty when infeasible.
    pub best_assignment: BTreeMap<String, String>,
    /// Hero -> role inverse of `best_assignment`.
    pub hero_to_role: BTreeMap<String, String>,
    /// Roles not covered by `best_assignment`, in canonical order.
    pub open_roles: Vec<String>,
    /// Number of complete matchings found.
    pub valid_assignments: u64,
    /// Upper bound P(|roles|, n) on the matching count.
    pub max_assignments: u64,
    /// Blend of matching density and best power, in [0, 1], 4 decimals.
    pub feasibility_score: f64,
    /// Hero -> sorted roles it occupies in at least one valid matching.
    pub hero_role_options: BTreeMap<String, Vec<String>>,
}

struct Search<'a> {
    order: &'a [usize],
    candidates: &'a [Vec<(usize, f64)>],
    used: u64,
    chosen: Vec<usize>,
    best_score: f64,
    best: Option<Vec<usize>>,
    valid: u64,
    options: Vec<BTreeSet<usize>>,
}

impl Search<'_> {
    fn dfs(&mut self, level: usize, score: f64) {
        if level >= self.order.len() {
            self.valid += 1;
            if score > self.best_score {
                self.best_score = score;
                self.best = Some(self.chosen.clone());
            }
            for (lvl, hero_idx) in self.order.iter().enumerate() {
                self.options[*hero_idx].insert(self.chosen[lvl]);
            }
            return;
        }

        let hero_idx = self.order[level];
        for i in 0..self.candidates[hero_idx].len() {
            let (role_idx, power) = self.candidates[hero_idx][i];
            let bit = 1u64 << role_idx;
            if self.used & bit != 0 {
                continue;
            }
            self.used |= bit;
            self.chosen[level] = role_idx;
            self.dfs(level + 1, score + power);
            self.used &= !bit;
        }
    }
}

/// Solve the role assignment for a list of up to five heroes.
///
/// Names are normalised and deduplicated first. Heroes missing from the
/// knowledge base are treated as eligible for every role at power
/// [`UNKNOWN_HERO_POWER`].
pub fn assign_roles(heroes: &[String], data: &ProfileData) -> Assignment {
    let roles = &data.roles;
    let mut picks: Vec<String> = Vec::new();
    for hero in heroes {
        let key = normalize_hero_name(hero);
        if !key.is_empty() && !picks.contains(&key) {
            picks.push(key);
        }
    }
    let n = picks.len();
    if n == 0 {
        return Assignment {
            is_feasible: true,
            best_score: 0.0,
            best_assignment: BTreeMap::new(),
            hero_to_role: BTreeMap::new(),
            open_roles: roles.clone(),
            valid_assignments: 1,
            max_assignments: 1,
            feasibility_score: 1.0,
            hero_role_options: BTreeMap::new(),
        };
    }

    let candidates: Vec<Vec<(usize, f64)>> = picks
        .iter()
        .map(|hero| match data.profiles.get(hero) {
            Some(profile) => profile
                .possible_roles
                .iter()
                .filter_map(|role| {
                    let idx = roles.iter().position(|r| r == role)?;
                    Some((idx, profile.role_power.get(role).copied().unwrap_or(0.70)))
                })
                .collect(),
            None => (0..roles.len()).map(|idx| (idx, UNKNOWN_HERO_POWER)).collect(),
        })
        .collect();

    // Most-constrained hero first; stable on ties.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| candidates[i].len());

    let mut search = Search {
        order: &order,
        candidates: &candidates,
        used: 0,
        chosen: vec![0; n],
        best_score: -1.0,
        best: None,
        valid: 0,
        options: vec![BTreeSet::new(); n],
    };
    search.dfs(0, 0.0);

    let max_assignments = permutations(roles.len() as u64, n as u64);
    if search.valid == 0 {
        return Assignment {
            is_feasible: false,
            best_score: 0.0,
            best_assignment: BTreeMap::new(),
            hero_to_role: BTreeMap::new(),
            open_roles: roles.clone(),
            valid_assignments: 0,
            max_assignments,
            feasibility_score: 0.0,
            hero_role_options: picks.into_iter().map(|h| (h, Vec::new())).collect(),
        };
    }

    let best = search.best.take().unwrap_or_default();
    let mut best_assignment = BTreeMap::new();
    let mut hero_to_role = BTreeMap::new();
    for (lvl, hero_idx) in order.iter().enumerate() {
        let role = roles[best[lvl]].clone();
        best_assignment.insert(role.clone(), picks[*hero_idx].clone());
        hero_to_role.insert(picks[*hero_idx].clone(), role);
    }
    let open_roles: Vec<String> = roles
        .iter()
        .filter(|r| !best_assignment.contains_key(*r))
        .cloned()
        .collect();

    let ratio = search.valid as f64 / max_assignments.max(1) as f64;
    let avg_power = search.best_score / n as f64;
    let feasibility_score = round4(clamp01(0.45 * ratio + 0.55 * avg_power));

    let hero_role_options = picks
        .iter()
        .enumerate()
        .map(|(i, hero)| {
            let role_names: Vec<String> = {
                let mut names: Vec<String> =
                    search.options[i].iter().map(|&idx| roles[idx].clone()).collect();
                names.sort();
                names
            };
            (hero.clone(), role_names)
        })
        .collect();

    Assignment {
        is_feasible: true,
        best_score: round6(search.best_score),
        best_assignment,
        hero_to_role,
        open_roles,
        valid_assignments: search.valid,
        max_assignments,
        feasibility_score,
        hero_role_options,
    }
}
