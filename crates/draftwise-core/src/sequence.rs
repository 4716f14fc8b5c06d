//! The fixed ban/pick sequence and its cursor.
//!
//! The script is a constant 15-step table totalling five picks and five bans
//! per side; no variant scripts are configurable. The cursor walk caps each
//! pick step's count by what the side can still absorb, so states seeded with
//! external picks skip steps they can no longer satisfy.

use serde::Serialize;

use crate::state::{DraftState, Side, ROLE_COUNT};

/// Identifier of the one supported sequence script.
pub const SEQUENCE_KEY: &str = "standard_bo5";

/// Whether a step consumes a pick or a ban.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Pick,
    Ban,
}

impl StepKind {
    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pick => "pick",
            Self::Ban => "ban",
        }
    }
}

/// One scripted step.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Step {
    /// Pick or ban.
    #[serde(rename = "type")]
    pub kind: StepKind,
    /// Side on clock.
    pub side: Side,
    /// Scripted number of heroes for this step.
    pub count: u32,
    /// Human-readable step label.
    pub text: &'static str,
}

const fn step(kind: StepKind, side: Side, count: u32, text: &'static str) -> Step {
    Step {
        kind,
        side,
        count,
        text,
    }
}

/// The fixed 15-step ban/pick script.
pub const SEQUENCE: [Step; 15] = [
    step(StepKind::Ban, Side::Ally, 2, "Ally ban 2 heroes"),
    step(StepKind::Ban, Side::Enemy, 2, "Enemy ban 2 heroes"),
    step(StepKind::Ban, Side::Ally, 1, "Ally ban 1 hero"),
    step(StepKind::Ban, Side::Enemy, 1, "Enemy ban 1 hero"),
    step(StepKind::Pick, Side::Ally, 1, "Ally pick 1 hero"),
    step(StepKind::Pick, Side::Enemy, 2, "Enemy pick 2 heroes"),
    step(StepKind::Pick, Side::Ally, 2, "Ally pick 2 heroes"),
    step(StepKind::Pick, Side::Enemy, 1, "Enemy pick 1 hero"),
    step(StepKind::Ban, Side::Enemy, 1, "Enemy ban 1 hero"),
    step(StepKind::Ban, Side::Ally, 1, "Ally ban 1 hero"),
    step(StepKind::Ban, Side::Enemy, 1, "Enemy ban 1 hero"),
    step(StepKind::Ban, Side::Ally, 1, "Ally ban 1 hero"),
    step(StepKind::Pick, Side::Enemy, 1, "Enemy pick 1 hero"),
    step(StepKind::Pick, Side::Ally, 2, "Ally pick 2 last heroes"),
    step(StepKind::Pick, Side::Enemy, 1, "Enemy pick 1 last hero"),
];

/// The live action derived from a state's cursor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveAction {
    /// Index of the step in [`SEQUENCE`].
    pub index: usize,
    /// Pick or ban.
    #[serde(rename = "type")]
    pub kind: StepKind,
    /// Side on clock.
    pub side: Side,
    /// Scripted count.
    pub count: u32,
    /// Effective count after capping by what the side can still absorb.
    pub limit: u32,
    /// Heroes already taken within this step.
    pub progress: u32,
    /// Human-readable step label.
    pub text: &'static str,
}

/// Walk the script from the state's cursor to the first live step.
///
/// Returns the promoted `(turn_index, action_progress)` pair and the live
/// action, or `None` when the script is exhausted.
pub fn current_action(state: &DraftState) -> (usize, u32, Option<LiveAction>) {
    let mut idx = state.turn_index;
    let mut progress = state.action_progress;

    while idx < SEQUENCE.len() {
        let step = &SEQUENCE[idx];
        let mut limit = step.count;
        if step.kind == StepKind::Pick {
            let remaining = ROLE_COUNT as i64 - state.picks.side(step.side).len() as i64;
            // Keep the per-turn limit stable within the current action.
            limit = limit.min((remaining + i64::from(progress)).max(0) as u32);
        }
        if limit == 0 || progress >= limit {
            idx += 1;
            progress = 0;
            continue;
        }
        let action = LiveAction {
            index: idx,
            kind: step.kind,
            side: step.side,
            count: step.count,
            limit,
            progress,
            text: step.text,
        };
        return (idx, progress, Some(action));
    }
    (idx, progress, None)
}

/// Apply a hero to the current action, returning the advanced state.
///
/// A hero already present anywhere in the state, or an exhausted script,
/// yields an unchanged clone. The cursor is promoted to the next live step.
pub fn apply_action(state: &DraftState, hero: &str) -> DraftState {
    let mut out = state.clone();
    let (idx, progress, Some(action)) = current_action(&out) else {
        return out;
    };

    if out.occupies(hero) {
        return out;
    }

    match action.kind {
        StepKind::Pick => out.picks.side_mut(action.side).push(hero.to_string()),
        StepKind::Ban => out.bans.side_mut(action.side).push(hero.to_string()),
    }
    out.turn_index = idx;
    out.action_progress = progress + 1;

    let (next_idx, next_progress, _) = current_action(&out);
    out.turn_index = next_idx;
    out.action_progress = next_progress;
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SidePair;

    fn empty_state() -> DraftState {
        DraftState {
            picks: SidePair::default(),
            bans: SidePair::default(),
            turn_index: 0,
            action_progress: 0,
        }
    }

    #[test]
    fn script_totals_five_picks_and_bans_per_side() {
        let mut totals = std::collections::BTreeMap::new();
        for step in &SEQUENCE {
            *totals.entry((step.kind.as_str(), step.side.as_str())).or_insert(0) += step.count;
        }
        assert_eq!(totals[&("pick", "ally")], 5);
        assert_eq!(totals[&("pick", "enemy")], 5);
        assert_eq!(totals[&("ban", "ally")], 5);
        assert_eq!(totals[&("ban", "enemy")], 5);
    }

    #[test]
    fn empty_state_starts_at_ally_double_ban() {
        let (idx, progress, action) = current_action(&empty_state());
        let action = action.expect("live action");
        assert_eq!(idx, 0);
        assert_eq!(progress, 0);
        assert_eq!(action.kind, StepKind::Ban);
        assert_eq!(action.side, Side::Ally);
        assert_eq!(action.limit, 2);
        assert_eq!(action.text, "Ally ban 2 heroes");
    }

    #[test]
    fn apply_advances_within_a_multi_count_step() {
        let state = empty_state();
        let after = apply_action(&state, "ling");
        assert_eq!(after.bans.ally, vec!["ling"]);
        assert_eq!(after.turn_index, 0);
        assert_eq!(after.action_progress, 1);
    }

    #[test]
    fn apply_promotes_to_the_next_step() {
        let mut state = empty_state();
        state = apply_action(&state, "ling");
        state = apply_action(&state, "fanny");
        assert_eq!(state.bans.ally.len(), 2);
        assert_eq!(state.turn_index, 1);
        assert_eq!(state.action_progress, 0);
        let (_, _, action) = current_action(&state);
        assert_eq!(action.expect("live").side, Side::Enemy);
    }

    #[test]
    fn apply_is_a_noop_for_a_hero_already_in_state() {
        let mut state = empty_state();
        state = apply_action(&state, "ling");
        let again = apply_action(&state, "ling");
        assert_eq!(again.bans.ally, vec!["ling"]);
        assert_eq!(again.action_progress, state.action_progress);
    }

    #[test]
    fn cursor_monotonicity_over_a_full_draft() {
        let heroes: Vec<String> = (0..20).map(|i| format!("hero{i}")).collect();
        let mut state = empty_state();
        for hero in &heroes {
            let before = (state.turn_index, state.action_progress);
            let (_, _, live) = current_action(&state);
            if live.is_none() {
                break;
            }
            state = apply_action(&state, hero);
            let after = (state.turn_index, state.action_progress);
            assert!(
                after.0 > before.0 || (after.0 == before.0 && after.1 > before.1),
                "cursor went backwards: {before:?} -> {after:?}"
            );
        }
        assert_eq!(state.picks.ally.len(), 5);
        assert_eq!(state.picks.enemy.len(), 5);
        assert_eq!(state.bans.ally.len(), 5);
        assert_eq!(state.bans.enemy.len(), 5);
        let (idx, _, live) = current_action(&state);
        assert_eq!(idx, SEQUENCE.len());
        assert!(live.is_none());
    }

    #[test]
    fn full_pick_side_skips_its_pick_steps() {
        let mut state = empty_state();
        state.picks.ally = (0..5).map(|i| format!("ally{i}")).collect();
        state.turn_index = 4; // scripted: ally pick 1
        let (idx, _, action) = current_action(&state);
        let action = action.expect("live");
        // Ally can absorb nothing, so the cursor lands on the enemy pick step.
        assert_eq!(idx, 5);
        assert_eq!(action.side, Side::Enemy);
        assert_eq!(action.kind, StepKind::Pick);
    }

    #[test]
    fn pick_limit_caps_by_remaining_capacity() {
        let mut state = empty_state();
        state.picks.enemy = (0..4).map(|i| format!("enemy{i}")).collect();
        state.turn_index = 5; // scripted: enemy pick 2
        let (_, _, action) = current_action(&state);
        let action = action.expect("live");
        assert_eq!(action.count, 2);
        assert_eq!(action.limit, 1);
    }

    #[test]
    fn exhausted_script_returns_none() {
        let mut state = empty_state();
        state.turn_index = SEQUENCE.len();
        let (idx, progress, action) = current_action(&state);
        assert_eq!(idx, SEQUENCE.len());
        assert_eq!(progress, 0);
        assert!(action.is_none());
        // Applying into a complete sequence changes nothing.
        let after = apply_action(&state, "ling");
        assert!(after.picks.ally.is_empty() && after.bans.ally.is_empty());
    }
}
