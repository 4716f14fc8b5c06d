//! Request and response types for the advisor operations.
//!
//! Field names follow the JSON contract (camelCase). Requests keep a loose
//! boundary: side lists arrive as raw JSON values and are flattened by the
//! state normaliser, and the legacy role->hero object form is accepted
//! wherever a hero list is expected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::evaluator::{Components, Phase, PhaseWeights, EARLY_WEIGHTS, LATE_WEIGHTS, MID_WEIGHTS};
use crate::recommender::LookaheadConfig;
use crate::sequence::{LiveAction, Step};
use crate::solver::Assignment;
use crate::state::DraftState;

/// Body of `POST /draft/assign`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    /// Hero list (array or legacy role->hero object). Preferred form.
    #[serde(default)]
    pub heroes: Option<Value>,
    /// Fallback: a picks object to take one side from.
    #[serde(default)]
    pub picks: Option<Value>,
    /// Side to read from `picks`; defaults to ally.
    #[serde(default)]
    pub side: Option<String>,
    /// Force a knowledge-base rebuild.
    #[serde(default)]
    pub refresh: bool,
    /// Request debug payloads in the response body.
    #[serde(default)]
    pub debug: bool,
}

/// Body of `POST /draft/recommend`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    /// Picks per side (arrays or legacy objects).
    #[serde(default)]
    pub picks: Option<Value>,
    /// Bans per side.
    #[serde(default)]
    pub bans: Option<Value>,
    /// Sequence cursor: step index. Absent or null means 0.
    #[serde(default)]
    pub turn_index: Option<i64>,
    /// Sequence cursor: heroes taken within the current step.
    #[serde(default)]
    pub action_progress: Option<i64>,
    /// Per-request lookahead overrides.
    #[serde(default)]
    pub lookahead: Option<LookaheadOverrides>,
    /// Force a knowledge-base rebuild.
    #[serde(default)]
    pub refresh: bool,
    /// Request debug payloads in the response body.
    #[serde(default)]
    pub debug: bool,
}

/// Per-field lookahead overrides; unset fields keep the defaults.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookaheadOverrides {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub beam_width: Option<usize>,
    #[serde(default)]
    pub enemy_top_n: Option<usize>,
    #[serde(default)]
    pub penalty_factor: Option<f64>,
}

impl LookaheadOverrides {
    /// Merge over the default configuration.
    pub fn resolve(self) -> LookaheadConfig {
        let defaults = LookaheadConfig::default();
        LookaheadConfig {
            enabled: self.enabled.unwrap_or(defaults.enabled),
            beam_width: self.beam_width.unwrap_or(defaults.beam_width),
            enemy_top_n: self.enemy_top_n.unwrap_or(defaults.enemy_top_n),
            penalty_factor: self.penalty_factor.unwrap_or(defaults.penalty_factor),
        }
    }
}

/// Full solver result block, as returned by assign mode.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentBlock {
    pub is_feasible: bool,
    pub best_assignment: BTreeMap<String, String>,
    pub hero_to_role: BTreeMap<String, String>,
    pub open_roles: Vec<String>,
    pub feasibility_score: f64,
    pub valid_assignments: u64,
    pub max_assignments: u64,
    pub hero_role_options: BTreeMap<String, Vec<String>>,
}

impl From<&Assignment> for AssignmentBlock {
    fn from(assign: &Assignment) -> Self {
        Self {
            is_feasible: assign.is_feasible,
            best_assignment: assign.best_assignment.clone(),
            hero_to_role: assign.hero_to_role.clone(),
            open_roles: assign.open_roles.clone(),
            feasibility_score: assign.feasibility_score,
            valid_assignments: assign.valid_assignments,
            max_assignments: assign.max_assignments,
            hero_role_options: assign.hero_role_options.clone(),
        }
    }
}

/// Summary solver result for one side in a recommend response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionBlock {
    pub is_feasible: bool,
    pub best_assignment: BTreeMap<String, String>,
    pub open_roles: Vec<String>,
    pub feasibility_score: f64,
    pub valid_assignments: u64,
    pub max_assignments: u64,
}

impl From<&Assignment> for CompositionBlock {
    fn from(assign: &Assignment) -> Self {
        Self {
            is_feasible: assign.is_feasible,
            best_assignment: assign.best_assignment.clone(),
            open_roles: assign.open_roles.clone(),
            feasibility_score: assign.feasibility_score,
            valid_assignments: assign.valid_assignments,
            max_assignments: assign.max_assignments,
        }
    }
}

/// Ally and enemy composition summaries.
#[derive(Debug, Clone, Serialize)]
pub struct CompositionPair {
    pub ally: CompositionBlock,
    pub enemy: CompositionBlock,
}

/// Per-hero profile echo in assign debug output.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroProfileEcho {
    pub possible_roles: Vec<String>,
    pub role_power: BTreeMap<String, f64>,
    pub tags: Vec<String>,
}

/// Debug block for assign responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignDebug {
    pub unknown_heroes: Vec<String>,
    pub hero_profiles: BTreeMap<String, HeroProfileEcho>,
}

/// Response of `POST /draft/assign`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignResponse {
    pub heroes: Vec<String>,
    pub roles: Vec<String>,
    pub assignment: AssignmentBlock,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<AssignDebug>,
}

/// The current turn descriptor in a recommend response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnBlock {
    pub index: usize,
    pub text: &'static str,
    pub limit: u32,
    pub progress: u32,
    pub remaining: u32,
}

/// One ranked recommendation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    pub hero: String,
    /// Final score, rounded to 4 decimals.
    pub score: f64,
    pub tier_score: f64,
    pub predicted_roles: Vec<String>,
    pub components: Components,
    pub reasons: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<RecommendationDebug>,
}

/// Per-recommendation debug fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDebug {
    pub base_score: f64,
    pub phase: Phase,
    pub lookahead_penalty: f64,
}

/// Raw ranking echo for debug responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCandidateRaw {
    pub hero: String,
    pub tier_score: f64,
    pub base_score: f64,
    pub final_score: f64,
}

/// Debug block for recommend responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendDebug {
    pub normalized_state: DraftState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_action: Option<LiveAction>,
    pub candidate_pool_size: usize,
    pub unknown_heroes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookahead: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_candidates_raw: Option<Vec<TopCandidateRaw>>,
}

/// Response of `POST /draft/recommend`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub mode: Option<&'static str>,
    pub side: Option<&'static str>,
    pub turn: Option<TurnBlock>,
    pub composition: CompositionPair,
    pub recommendations: Vec<RecommendationItem>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<RecommendDebug>,
}

/// Sequence section of the meta report.
#[derive(Debug, Clone, Serialize)]
pub struct SequenceMeta {
    pub key: &'static str,
    pub steps: Vec<Step>,
}

/// Tier-list coverage of the role pool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageMeta {
    pub tier_list_heroes: usize,
    pub covered_heroes: usize,
    pub coverage_rate: f64,
    pub uncovered_heroes_sample: Vec<String>,
}

/// Role-pool section of the meta report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePoolMeta {
    pub version: String,
    pub source: String,
    pub roles: Vec<String>,
    pub heroes_count: usize,
    pub flex_heroes_count: usize,
    pub coverage: CoverageMeta,
}

/// Scoring section of the meta report: component names and phase weights.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringMeta {
    pub components: [&'static str; 6],
    pub phase_weights: PhaseWeightsTable,
}

/// The full phase-weight table.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseWeightsTable {
    pub early: PhaseWeights,
    pub mid: PhaseWeights,
    pub late: PhaseWeights,
}

impl ScoringMeta {
    /// The advertised scoring contract.
    pub fn current() -> Self {
        Self {
            components: [
                "meta_score",
                "counter_score",
                "synergy_score",
                "deny_score",
                "flex_score",
                "feasibility_score",
            ],
            phase_weights: PhaseWeightsTable {
                early: EARLY_WEIGHTS,
                mid: MID_WEIGHTS,
                late: LATE_WEIGHTS,
            },
        }
    }
}

/// Response of `GET /draft/meta`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaReport {
    pub engine: &'static str,
    pub status: &'static str,
    pub generated_at: String,
    pub sequence: SequenceMeta,
    pub role_pool: RolePoolMeta,
    pub scoring: ScoringMeta,
    pub warnings: Vec<String>,
}
