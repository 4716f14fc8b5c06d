//! Typed advisor operations.
//!
//! The advisor owns the profile store and exposes the three operations the
//! HTTP layer serves: `assign` (solve one side's composition), `recommend`
//! (score and rank the next action), and `meta` (knowledge-base report).
//! Errors are typed: [`RequestError`] for bad payloads, [`ConfigError`] for
//! knowledge-base failures. Unknown heroes never fail a request; they are
//! excluded from scoring and surfaced as warnings.

mod wire;

pub use wire::*;

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::Utc;

use crate::error::{AdvisorError, ConfigError, RequestError};
use crate::numeric::{round4, round6};
use crate::profile::{ProfileData, ProfileStore};
use crate::recommender::{candidate_pool, recommend_ban, recommend_pick};
use crate::sequence::{current_action, StepKind, SEQUENCE, SEQUENCE_KEY};
use crate::solver::assign_roles;
use crate::state::{normalize_draft_state, parse_side_heroes, DraftState, Side, ROLE_COUNT};

/// Maximum warnings carried on any response.
const WARNING_CAP: usize = 30;

/// Draft advisor over a fingerprint-cached knowledge base.
pub struct Advisor {
    store: ProfileStore,
}

impl Advisor {
    /// Advisor reading its documents from `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: ProfileStore::new(data_dir),
        }
    }

    /// Advisor over an existing store.
    pub fn with_store(store: ProfileStore) -> Self {
        Self { store }
    }

    /// The underlying profile store.
    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Knowledge-base report: sequence script, role-pool summary with
    /// tier-list coverage, and the scoring contract.
    pub fn meta(&self, refresh: bool) -> Result<MetaReport, ConfigError> {
        let (data, mut warnings) = self.store.load(refresh)?;
        warnings.truncate(WARNING_CAP);

        let flex_heroes_count = data
            .pool_heroes
            .iter()
            .filter(|h| {
                data.profiles
                    .get(*h)
                    .is_some_and(|p| p.possible_roles.len() > 1)
            })
            .count();
        let tier_total = data.tier_heroes.len();
        let covered = data.pool_heroes.intersection(&data.tier_heroes).count();
        let coverage_rate = if tier_total > 0 {
            round4(covered as f64 / tier_total as f64)
        } else {
            0.0
        };
        let uncovered_heroes_sample: Vec<String> = data
            .tier_heroes
            .difference(&data.pool_heroes)
            .take(15)
            .cloned()
            .collect();

        Ok(MetaReport {
            engine: "draftwise",
            status: "ready",
            generated_at: Utc::now().to_rfc3339(),
            sequence: SequenceMeta {
                key: SEQUENCE_KEY,
                steps: SEQUENCE.to_vec(),
            },
            role_pool: RolePoolMeta {
                version: data.pool_version.clone(),
                source: data.pool_source.clone(),
                roles: data.roles.clone(),
                heroes_count: data.pool_heroes.len(),
                flex_heroes_count,
                coverage: CoverageMeta {
                    tier_list_heroes: tier_total,
                    covered_heroes: covered,
                    coverage_rate,
                    uncovered_heroes_sample,
                },
            },
            scoring: ScoringMeta::current(),
            warnings,
        })
    }

    /// Solve the role assignment for the requested heroes.
    pub fn assign(
        &self,
        request: &AssignRequest,
        debug: bool,
    ) -> Result<AssignResponse, AdvisorError> {
        let (data, mut warnings) = self.store.load(request.refresh)?;
        warnings.truncate(WARNING_CAP);
        let debug_enabled = debug || request.debug;

        let side = match request.side.as_deref().map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("enemy") => "enemy",
            _ => "ally",
        };
        let heroes_raw = match &request.heroes {
            Some(value) => Some(value),
            None => request
                .picks
                .as_ref()
                .and_then(|p| p.as_object())
                .and_then(|m| m.get(side)),
        };
        let heroes = parse_side_heroes(heroes_raw)?;
        if heroes.len() > ROLE_COUNT {
            return Err(RequestError::TooManyHeroes.into());
        }

        let assignment = assign_roles(&heroes, &data);

        let mut unknown: Vec<String> = heroes
            .iter()
            .filter(|h| !data.profiles.contains_key(*h))
            .cloned()
            .collect();
        unknown.sort();
        if !unknown.is_empty() {
            tracing::warn!(heroes = ?unknown, "unknown heroes in assign request");
            warnings.push(format!(
                "Unknown heroes in assign request: {}",
                unknown.join(", ")
            ));
        }

        let debug_block = debug_enabled.then(|| AssignDebug {
            unknown_heroes: unknown,
            hero_profiles: heroes
                .iter()
                .map(|h| {
                    let echo = data.profiles.get(h).map_or_else(HeroProfileEcho::default, |p| {
                        HeroProfileEcho {
                            possible_roles: p.possible_roles.clone(),
                            role_power: p.role_power.clone(),
                            tags: p.tags.clone(),
                        }
                    });
                    (h.clone(), echo)
                })
                .collect(),
        });

        Ok(AssignResponse {
            heroes,
            roles: data.roles.clone(),
            assignment: AssignmentBlock::from(&assignment),
            warnings,
            debug: debug_block,
        })
    }

    /// Score and rank candidates for the current action of the draft state.
    pub fn recommend(
        &self,
        request: &RecommendRequest,
        debug: bool,
    ) -> Result<RecommendResponse, AdvisorError> {
        let (data, mut warnings) = self.store.load(request.refresh)?;
        warnings.truncate(WARNING_CAP);
        let debug_enabled = debug || request.debug;

        let mut state = normalize_draft_state(
            request.picks.as_ref(),
            request.bans.as_ref(),
            request.turn_index.unwrap_or(0),
            request.action_progress.unwrap_or(0),
        )?;

        let (idx, progress, action) = current_action(&state);
        state.turn_index = idx;
        state.action_progress = progress;

        let composition = CompositionPair {
            ally: CompositionBlock::from(&assign_roles(state.picks.side(Side::Ally), &data)),
            enemy: CompositionBlock::from(&assign_roles(state.picks.side(Side::Enemy), &data)),
        };

        let unknown = collect_unknown_heroes(&state, &data);
        if !unknown.is_empty() {
            tracing::warn!(heroes = ?unknown, "unknown heroes in draft state");
            let sample: Vec<String> = unknown.iter().take(12).cloned().collect();
            warnings.push(format!(
                "Unknown heroes in draft state (ignored in scoring): {}",
                sample.join(", ")
            ));
        }

        let Some(action) = action else {
            let debug_block = debug_enabled.then(|| RecommendDebug {
                normalized_state: state.clone(),
                sequence_length: Some(SEQUENCE.len()),
                current_action: None,
                candidate_pool_size: candidate_pool(&state, &data).len(),
                unknown_heroes: unknown,
                lookahead: None,
                top_candidates_raw: None,
            });
            return Ok(RecommendResponse {
                mode: None,
                side: None,
                turn: None,
                composition,
                recommendations: Vec::new(),
                warnings,
                message: Some("Draft sequence complete"),
                debug: debug_block,
            });
        };

        let lookahead = request.lookahead.unwrap_or_default().resolve();
        let (mode, recs) = match action.kind {
            StepKind::Pick => (
                "pick",
                recommend_pick(&state, action.side, &data, &lookahead),
            ),
            StepKind::Ban => ("ban", recommend_ban(&state, action.side, &data)),
        };

        let recommendations: Vec<RecommendationItem> = recs
            .iter()
            .map(|ev| RecommendationItem {
                hero: ev.hero.clone(),
                score: round4(ev.score),
                tier_score: round4(ev.tier_score),
                predicted_roles: ev.predicted_roles.clone(),
                components: ev.components,
                reasons: ev.reasons.clone(),
                debug: debug_enabled.then(|| RecommendationDebug {
                    base_score: round6(ev.base_score),
                    phase: ev.phase,
                    lookahead_penalty: round6(ev.lookahead_penalty.unwrap_or(0.0)),
                }),
            })
            .collect();

        let debug_block = debug_enabled.then(|| RecommendDebug {
            normalized_state: state.clone(),
            sequence_length: None,
            current_action: Some(action.clone()),
            candidate_pool_size: candidate_pool(&state, &data).len(),
            unknown_heroes: unknown,
            lookahead: Some(match action.kind {
                StepKind::Pick => serde_json::to_value(lookahead).unwrap_or_default(),
                StepKind::Ban => serde_json::json!({ "enabled": false }),
            }),
            top_candidates_raw: Some(
                recs.iter()
                    .take(12)
                    .map(|ev| TopCandidateRaw {
                        hero: ev.hero.clone(),
                        tier_score: round4(ev.tier_score),
                        base_score: round6(ev.base_score),
                        final_score: round6(ev.score),
                    })
                    .collect(),
            ),
        });

        Ok(RecommendResponse {
            mode: Some(mode),
            side: Some(action.side.as_str()),
            turn: Some(TurnBlock {
                index: idx,
                text: action.text,
                limit: action.limit,
                progress,
                remaining: action.limit.saturating_sub(progress),
            }),
            composition,
            recommendations,
            warnings,
            message: None,
            debug: debug_block,
        })
    }
}

/// Heroes referenced by the state but absent from the knowledge base, sorted.
fn collect_unknown_heroes(state: &DraftState, data: &ProfileData) -> Vec<String> {
    let unknown: BTreeSet<String> = state
        .picks
        .iter_all()
        .chain(state.bans.iter_all())
        .filter(|h| !data.profiles.contains_key(*h))
        .cloned()
        .collect();
    unknown.into_iter().collect()
}
