//! Typed tier-list documents.
//!
//! Every field defaults so a sparse document still loads; unknown fields in
//! the nested stats blocks are tolerated for forward compatibility.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level tier-list document: one block per role.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TierListDoc {
    /// Per-role tier data, keyed by role name.
    #[serde(default)]
    pub roles: BTreeMap<String, TierRoleDoc>,
}

/// Tier data for a single role.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierRoleDoc {
    /// Per-hero tier placements within this role.
    #[serde(default)]
    pub hero_details: Vec<TierHeroDoc>,
}

/// One hero's placement in a role's tier list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierHeroDoc {
    /// Hero name as written by the tier-list builder.
    #[serde(default)]
    pub hero: String,
    /// Letter grade, SS..D. Absent or unknown grades score as C.
    #[serde(default)]
    pub tier: Option<String>,
    /// Aggregate tournament stats for the hero in this role.
    #[serde(default)]
    pub stats: TierStatsDoc,
    /// Pairwise counter statistics.
    #[serde(default)]
    pub counters: TierCountersDoc,
}

/// Pick/ban counting stats for a hero-role pair.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierStatsDoc {
    /// Games won when picked.
    #[serde(default)]
    pub pick_win_count: f64,
    /// Times picked.
    #[serde(default)]
    pub pick_count: f64,
    /// Times banned.
    #[serde(default)]
    pub ban_count: f64,
    /// Overall win rate in [0, 1].
    #[serde(default)]
    pub win_rate: f64,
}

/// Counter lists for a hero-role pair.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierCountersDoc {
    /// Opponents this hero beats.
    #[serde(default)]
    pub strong_against: Vec<CounterDoc>,
    /// Opponents that beat this hero.
    #[serde(default)]
    pub countered_by: Vec<CounterDoc>,
}

/// One pairwise counter observation.
///
/// `strongAgainst` rows carry `winRate`; `counteredBy` rows carry
/// `opponentWinRate`. Both fields default to 0 so one type covers both lists.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterDoc {
    /// Opponent hero name.
    #[serde(default)]
    pub hero: String,
    /// This hero's win rate in the matchup, in [0, 1].
    #[serde(default)]
    pub win_rate: f64,
    /// Opponent's win rate in the matchup, in [0, 1].
    #[serde(default)]
    pub opponent_win_rate: f64,
    /// Number of recorded encounters.
    #[serde(default)]
    pub encounters: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_document_loads_with_defaults() {
        let doc: TierListDoc = serde_json::from_str(
            r#"{"roles": {"jungle": {"heroDetails": [{"hero": "Ling", "tier": "SS"}]}}}"#,
        )
        .expect("parse");
        let entry = &doc.roles["jungle"].hero_details[0];
        assert_eq!(entry.hero, "Ling");
        assert_eq!(entry.tier.as_deref(), Some("SS"));
        assert_eq!(entry.stats.pick_count, 0.0);
        assert!(entry.counters.strong_against.is_empty());
    }

    #[test]
    fn unknown_stat_fields_are_tolerated() {
        let doc: TierListDoc = serde_json::from_str(
            r#"{"roles": {"gold_lane": {"heroDetails": [
                {"hero": "Claude", "tier": "A",
                 "stats": {"pickWinCount": 4, "pickCount": 9, "banCount": 1, "winRate": 0.44,
                           "futureField": {"x": 1}}}
            ]}}}"#,
        )
        .expect("parse");
        let entry = &doc.roles["gold_lane"].hero_details[0];
        assert_eq!(entry.stats.pick_win_count, 4.0);
        assert_eq!(entry.stats.win_rate, 0.44);
    }
}
