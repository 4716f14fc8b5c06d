//! Draft state and payload normalisation.
//!
//! Request payloads are loose JSON: each side's hero list may arrive as an
//! array of names or as a legacy object mapping role -> name. The normaliser
//! flattens both to the list form, enforces the draft-state invariants, and
//! hands the core a clean [`DraftState`]. States are values; every transition
//! produces a fresh state.

use serde::Serialize;
use serde_json::Value;

use crate::config::normalize_hero_name;
use crate::error::RequestError;

/// Maximum picks (and roles) per side.
pub const ROLE_COUNT: usize = 5;

/// One of the two drafting sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Ally,
    Enemy,
}

impl Side {
    /// The opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Self::Ally => Self::Enemy,
            Self::Enemy => Self::Ally,
        }
    }

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ally => "ally",
            Self::Enemy => "enemy",
        }
    }
}

/// A per-side pair of ordered hero lists.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SidePair {
    pub ally: Vec<String>,
    pub enemy: Vec<String>,
}

impl SidePair {
    /// The list for `side`.
    pub fn side(&self, side: Side) -> &[String] {
        match side {
            Side::Ally => &self.ally,
            Side::Enemy => &self.enemy,
        }
    }

    pub(crate) fn side_mut(&mut self, side: Side) -> &mut Vec<String> {
        match side {
            Side::Ally => &mut self.ally,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Whether the hero appears on either side.
    pub fn contains(&self, hero: &str) -> bool {
        self.ally.iter().any(|h| h == hero) || self.enemy.iter().any(|h| h == hero)
    }

    /// All heroes on both sides, ally first.
    pub fn iter_all(&self) -> impl Iterator<Item = &String> {
        self.ally.iter().chain(self.enemy.iter())
    }
}

/// Normalised draft state: picks, bans, and the sequence cursor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftState {
    pub picks: SidePair,
    pub bans: SidePair,
    pub turn_index: usize,
    pub action_progress: u32,
}

/// Parse one side's hero list from a loose JSON value.
///
/// Accepts an array of names or a legacy object mapping role -> name; names
/// are normalised, empties dropped, duplicates removed preserving order.
pub fn parse_side_heroes(raw: Option<&Value>) -> Result<Vec<String>, RequestError> {
    let mut out: Vec<String> = Vec::new();
    let mut push = |value: &Value| {
        if let Value::String(s) = value {
            let hero = normalize_hero_name(s);
            if !hero.is_empty() && !out.contains(&hero) {
                out.push(hero);
            }
        }
    };
    match raw {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => items.iter().for_each(&mut push),
        Some(Value::Object(map)) => map.values().for_each(&mut push),
        Some(_) => return Err(RequestError::SideShape),
    }
    Ok(out)
}

fn parse_side_pair(raw: Option<&Value>, field: &'static str) -> Result<SidePair, RequestError> {
    let map = match raw {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map),
        Some(_) => return Err(RequestError::FieldShape { field }),
    };
    Ok(SidePair {
        ally: parse_side_heroes(map.and_then(|m| m.get("ally")))?,
        enemy: parse_side_heroes(map.and_then(|m| m.get("enemy")))?,
    })
}

/// Normalise a recommend payload into a [`DraftState`], enforcing the state
/// invariants: per-side caps, no cross-side pick or ban sharing, no hero both
/// picked and banned. Negative cursor values clamp to zero.
pub fn normalize_draft_state(
    picks: Option<&Value>,
    bans: Option<&Value>,
    turn_index: i64,
    action_progress: i64,
) -> Result<DraftState, RequestError> {
    let picks = parse_side_pair(picks, "picks")?;
    let bans = parse_side_pair(bans, "bans")?;

    if picks.ally.len() > ROLE_COUNT || picks.enemy.len() > ROLE_COUNT {
        return Err(RequestError::TooManyPicks);
    }
    if bans.ally.len() > ROLE_COUNT || bans.enemy.len() > ROLE_COUNT {
        return Err(RequestError::TooManyBans);
    }
    if picks.ally.iter().any(|h| picks.enemy.contains(h)) {
        return Err(RequestError::PickOverlap);
    }
    if bans.ally.iter().any(|h| bans.enemy.contains(h)) {
        return Err(RequestError::BanOverlap);
    }
    if picks.iter_all().any(|h| bans.contains(h)) {
        return Err(RequestError::PickBanOverlap);
    }

    Ok(DraftState {
        picks,
        bans,
        turn_index: turn_index.max(0) as usize,
        action_progress: action_progress.max(0) as u32,
    })
}

impl DraftState {
    /// Whether the hero already appears in any of the four lists.
    pub fn occupies(&self, hero: &str) -> bool {
        self.picks.contains(hero) || self.bans.contains(hero)
    }
}
