//! Candidate enumeration and ranking.
//!
//! Ban turns score each candidate as if the enemy picked it (threat) plus a
//! role-fit bonus against the enemy's open roles. Pick turns optionally run a
//! one-ply beam search: the top candidates are simulated forward and
//! penalised by the enemy's mean best response. Ranking orders by tier score
//! first so suggestions stay meta-anchored, then by score; sorts are stable
//! and candidate enumeration is lexicographic, so ties are deterministic.

use serde::Serialize;

use crate::evaluator::{evaluate_pick, Evaluation};
use crate::numeric::{clamp100, round6};
use crate::profile::ProfileData;
use crate::sequence::{apply_action, current_action, StepKind};
use crate::solver::assign_roles;
use crate::state::{DraftState, Side};

/// Maximum pick recommendations returned.
pub const PICK_SHORTLIST: usize = 6;
/// Maximum ban recommendations returned.
pub const BAN_SHORTLIST: usize = 12;

/// One-ply lookahead settings; every field can be overridden per request.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookaheadConfig {
    /// Whether pick turns simulate the enemy response at all.
    pub enabled: bool,
    /// Number of top candidates simulated forward.
    pub beam_width: usize,
    /// Number of enemy responses averaged into the penalty.
    pub enemy_top_n: usize,
    /// Fraction of the response mean subtracted from the base score.
    pub penalty_factor: f64,
}

impl Default for LookaheadConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            beam_width: 6,
            enemy_top_n: 4,
            penalty_factor: 0.25,
        }
    }
}

/// Heroes not yet picked or banned, in lexicographic order.
pub fn candidate_pool<'a>(state: &DraftState, data: &'a ProfileData) -> Vec<&'a str> {
    data.profiles
        .keys()
        .filter(|hero| !state.occupies(hero))
        .map(String::as_str)
        .collect()
}

fn sort_by_tier_then(evals: &mut [Evaluation], key: fn(&Evaluation) -> f64) {
    evals.sort_by(|a, b| {
        b.tier_score
            .total_cmp(&a.tier_score)
            .then(key(b).total_cmp(&key(a)))
    });
}

/// Mean base score of the enemy's best responses under `state`.
fn enemy_best_response(
    state: &DraftState,
    acting_side: Side,
    data: &ProfileData,
    top_n: usize,
) -> f64 {
    let enemy = acting_side.opponent();
    let mut scores: Vec<f64> = candidate_pool(state, data)
        .into_iter()
        .filter_map(|hero| evaluate_pick(state, enemy, hero, data))
        .filter(|ev| ev.components.feasibility > 0.0)
        .map(|ev| ev.base_score)
        .collect();
    if scores.is_empty() {
        return 0.0;
    }
    scores.sort_by(|a, b| b.total_cmp(a));
    let take = top_n.max(1);
    let denom = top_n.min(scores.len()).max(1);
    scores.iter().take(take).sum::<f64>() / denom as f64
}

/// Rank pick candidates for `side`, optionally penalised by lookahead.
pub fn recommend_pick(
    state: &DraftState,
    side: Side,
    data: &ProfileData,
    lookahead: &LookaheadConfig,
) -> Vec<Evaluation> {
    let mut evals: Vec<Evaluation> = candidate_pool(state, data)
        .into_iter()
        .filter_map(|hero| evaluate_pick(state, side, hero, data))
        // Avoid dead-end role compositions.
        .filter(|ev| ev.components.feasibility > 0.0)
        .collect();

    sort_by_tier_then(&mut evals, |ev| ev.base_score);
    if evals.is_empty() {
        return evals;
    }

    if lookahead.enabled {
        let beam = lookahead.beam_width.max(1).min(evals.len());
        for ev in &mut evals[..beam] {
            let simulated = apply_action(state, &ev.hero);
            let (_, _, next_action) = current_action(&simulated);
            let enemy_picks_next = next_action
                .is_some_and(|a| a.kind == StepKind::Pick && a.side != side);
            if enemy_picks_next {
                let response =
                    enemy_best_response(&simulated, side, data, lookahead.enemy_top_n);
                let penalty = lookahead.penalty_factor * response;
                ev.score = round6(ev.base_score - penalty);
                ev.lookahead_penalty = Some(round6(penalty));
            } else {
                ev.score = ev.base_score;
            }
        }
    }

    sort_by_tier_then(&mut evals, |ev| ev.score);
    evals.truncate(PICK_SHORTLIST);
    evals
}

/// Rank ban candidates for `side` by how dangerous each hero would be in the
/// enemy's hands, with a bonus for fitting the enemy's open roles.
pub fn recommend_ban(state: &DraftState, side: Side, data: &ProfileData) -> Vec<Evaluation> {
    let enemy = side.opponent();
    let enemy_assign = assign_roles(state.picks.side(enemy), data);
    let enemy_open: Vec<&str> = if enemy_assign.open_roles.is_empty() {
        data.roles.iter().map(String::as_str).collect()
    } else {
        enemy_assign.open_roles.iter().map(String::as_str).collect()
    };

    let mut recs: Vec<Evaluation> = Vec::new();
    for hero in candidate_pool(state, data) {
        let Some(profile) = data.profiles.get(hero) else {
            continue;
        };
        let mut role_fit: Vec<String> = profile
            .possible_roles
            .iter()
            .filter(|r| enemy_open.contains(&r.as_str()))
            .cloned()
            .collect();
        role_fit.sort();
        if role_fit.is_empty() {
            role_fit = profile.possible_roles.clone();
        }

        let Some(mut ev) = evaluate_pick(state, enemy, hero, data) else {
            continue;
        };
        if ev.components.feasibility <= 0.0 {
            continue;
        }
        let fit_bonus = clamp100(role_fit.len() as f64 / data.roles.len().max(1) as f64 * 15.0);
        let score = round6(ev.base_score + fit_bonus);
        ev.score = score;
        ev.base_score = score;
        ev.predicted_roles = role_fit;
        ev.reasons = vec![
            "Denies the enemy a power pick in the current meta",
            "Role profile matches the enemy's open roles",
        ];
        recs.push(ev);
    }

    sort_by_tier_then(&mut recs, |ev| ev.score);
    recs.truncate(BAN_SHORTLIST);
    recs
}
