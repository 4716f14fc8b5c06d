//! Candidate scoring.
//!
//! Each legal candidate gets six components in [0, 100] — meta, counter,
//! synergy, deny, flex, feasibility — blended by phase-dependent weights into
//! a base score. Intermediate math is unrounded; components round to 4
//! decimals and the blended score to 6 only at the boundary.

use serde::Serialize;

use crate::numeric::{clamp100, round4, round6};
use crate::profile::ProfileData;
use crate::solver::assign_roles;
use crate::state::{DraftState, Side};

/// Draft phase, derived from how many picks the side would have after the
/// hypothetical action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Early,
    Mid,
    Late,
}

/// Component weights for one phase. Each row sums to 1.0.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PhaseWeights {
    pub meta: f64,
    pub counter: f64,
    pub synergy: f64,
    pub deny: f64,
    pub flex: f64,
    pub feasibility: f64,
}

pub const EARLY_WEIGHTS: PhaseWeights = PhaseWeights {
    meta: 0.40,
    counter: 0.11,
    synergy: 0.06,
    deny: 0.14,
    flex: 0.15,
    feasibility: 0.14,
};

pub const MID_WEIGHTS: PhaseWeights = PhaseWeights {
    meta: 0.29,
    counter: 0.27,
    synergy: 0.18,
    deny: 0.12,
    flex: 0.09,
    feasibility: 0.05,
};

pub const LATE_WEIGHTS: PhaseWeights = PhaseWeights {
    meta: 0.18,
    counter: 0.32,
    synergy: 0.23,
    deny: 0.09,
    flex: 0.01,
    feasibility: 0.17,
};

impl Phase {
    /// Phase for a side that would hold `pick_count` picks after the action.
    pub fn from_pick_count(pick_count: usize) -> Self {
        if pick_count <= 2 {
            Self::Early
        } else if pick_count <= 4 {
            Self::Mid
        } else {
            Self::Late
        }
    }

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Early => "early",
            Self::Mid => "mid",
            Self::Late => "late",
        }
    }

    /// The weight row for this phase.
    pub fn weights(self) -> PhaseWeights {
        match self {
            Self::Early => EARLY_WEIGHTS,
            Self::Mid => MID_WEIGHTS,
            Self::Late => LATE_WEIGHTS,
        }
    }
}

/// The six component scores, rounded to 4 decimals.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Components {
    pub meta: f64,
    pub counter: f64,
    pub synergy: f64,
    pub deny: f64,
    pub flex: f64,
    pub feasibility: f64,
}

/// One scored candidate.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Normalised candidate name.
    pub hero: String,
    /// Best tier anchor, used as the primary ranking key.
    pub tier_score: f64,
    /// Roles the hero could occupy under some valid assignment of the side
    /// after the hypothetical pick.
    pub predicted_roles: Vec<String>,
    /// Rounded component breakdown.
    pub components: Components,
    /// Phase the blend used.
    pub phase: Phase,
    /// Phase-blended score before lookahead, rounded to 6 decimals.
    pub base_score: f64,
    /// Final score; equals `base_score` until lookahead adjusts it.
    pub score: f64,
    /// Penalty subtracted by lookahead, when it ran.
    pub lookahead_penalty: Option<f64>,
    /// Up to three short explanations.
    pub reasons: Vec<&'static str>,
}

/// Score `hero` as a hypothetical pick for `side`.
///
/// Returns `None` for heroes missing from the knowledge base; they are
/// excluded from scoring rather than rejected.
pub fn evaluate_pick(
    state: &DraftState,
    side: Side,
    hero: &str,
    data: &ProfileData,
) -> Option<Evaluation> {
    let profile = data.profiles.get(hero)?;
    let enemy = side.opponent();
    let roles = &data.roles;

    let current = assign_roles(state.picks.side(side), data);
    let mut next_picks: Vec<String> = state.picks.side(side).to_vec();
    next_picks.push(hero.to_string());
    let next = assign_roles(&next_picks, data);

    let predicted_roles: Vec<String> = next
        .hero_role_options
        .get(hero)
        .filter(|options| !options.is_empty())
        .cloned()
        .unwrap_or_else(|| profile.possible_roles.clone());

    let meta_fallback = if profile.base_meta != 0.0 { profile.base_meta } else { 50.0 };
    let meta = predicted_roles
        .iter()
        .map(|r| match profile.role_meta.get(r) {
            Some(&v) if v != 0.0 => v,
            _ => meta_fallback,
        })
        .fold(f64::NEG_INFINITY, f64::max);
    let meta = if meta.is_finite() { meta } else { meta_fallback };

    let enemy_picks = state.picks.side(enemy);
    let counter = if enemy_picks.is_empty() {
        50.0
    } else {
        let diff_sum: f64 = enemy_picks
            .iter()
            .map(|e| {
                let strong = profile.strong_against.get(e).copied().unwrap_or(0.0);
                let weak = profile.countered_by.get(e).copied().unwrap_or(0.0);
                (strong - weak) * 100.0
            })
            .sum();
        clamp100(50.0 + (diff_sum / enemy_picks.len() as f64) * 0.60)
    };

    let synergy = if next.is_feasible {
        let coverage_gain =
            (current.open_roles.len() as i64 - next.open_roles.len() as i64).max(0) as f64;
        let flex_gain = next.feasibility_score - current.feasibility_score;
        clamp100(45.0 + coverage_gain * 16.0 + flex_gain * 65.0)
    } else {
        0.0
    };

    let my_picks = state.picks.side(side);
    let deny = if my_picks.is_empty() {
        clamp100(0.65 * meta)
    } else {
        let threat_sum: f64 = my_picks
            .iter()
            .map(|p| profile.strong_against.get(p).copied().unwrap_or(0.0) * 100.0)
            .sum();
        clamp100(threat_sum / my_picks.len() as f64)
    };

    let flex = clamp100(
        (profile.possible_roles.len() as f64 - 1.0) / (roles.len() as f64 - 1.0).max(1.0) * 100.0,
    );
    let feasibility = next.feasibility_score * 100.0;

    let phase = Phase::from_pick_count(next_picks.len());
    let w = phase.weights();
    let base = w.meta * meta
        + w.counter * counter
        + w.synergy * synergy
        + w.deny * deny
        + w.flex * flex
        + w.feasibility * feasibility;

    let mut reasons: Vec<&'static str> = Vec::new();
    if counter >= 62.0 {
        reasons.push("Strong counter against the current enemy draft");
    }
    if synergy >= 62.0 {
        reasons.push("Keeps the role composition flexible and feasible");
    }
    if flex >= 45.0 {
        reasons.push("Flex hero able to fill several roles");
    }
    if reasons.is_empty() {
        reasons.push("Stable safe pick in the current meta");
    }
    reasons.truncate(3);

    let base_score = round6(base);
    Some(Evaluation {
        hero: hero.to_string(),
        tier_score: profile.best_tier_score,
        predicted_roles,
        components: Components {
            meta: round4(meta),
            counter: round4(counter),
            synergy: round4(synergy),
            deny: round4(deny),
            flex: round4(flex),
            feasibility: round4(feasibility),
        },
        phase,
        base_score,
        score: base_score,
        lookahead_penalty: None,
        reasons,
    })
}
