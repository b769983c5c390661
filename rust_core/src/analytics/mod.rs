//! Live game analytics.
//!
//! Takes a game snapshot (score, events, player stats) and derives a
//! two-sided `{home, away}` analytics record. The pipeline is pure: every
//! call recomputes from scratch and nothing is cached between calls.
//!
//! Unusable snapshots never produce an error for the caller. They are
//! logged and answered with the fully-populated empty record for both sides.

use crate::error::SnapshotError;
use crate::models::{EntityId, GameEvent, GameSnapshot, PlayerStatRecord, Side, Sport};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

pub mod baseball;
pub mod basketball;
pub mod empty;
pub mod football;
pub mod format;
pub mod generic;
pub mod keys;
pub mod normalizer;

pub use baseball::{BaseballAggregator, BaseballAnalytics};
pub use basketball::{BasketballAggregator, BasketballAnalytics};
pub use empty::EmptyAnalytics;
pub use football::{FootballAggregator, FootballAnalytics};
pub use generic::{GenericAggregator, GenericAnalytics};
pub use normalizer::{normalize, CountMap, StatItem, StatKey, StatTally};

// ============================================================================
// Output types
// ============================================================================

/// One side's analytics, shaped by sport. Serializes as a flat object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TeamAnalytics {
    Football(FootballAnalytics),
    Basketball(BasketballAnalytics),
    Baseball(BaseballAnalytics),
    Generic(GenericAnalytics),
    Empty(EmptyAnalytics),
}

impl TeamAnalytics {
    pub fn empty() -> Self {
        TeamAnalytics::Empty(EmptyAnalytics::default())
    }

    pub fn is_empty_record(&self) -> bool {
        matches!(self, TeamAnalytics::Empty(_))
    }

    /// Numeric metrics in display order, for charts and comparisons.
    pub fn metrics(&self) -> Vec<Metric> {
        match self {
            TeamAnalytics::Football(r) => r.metrics(),
            TeamAnalytics::Basketball(r) => r.metrics(),
            TeamAnalytics::Baseball(r) => r.metrics(),
            TeamAnalytics::Generic(r) => r.metrics(),
            TeamAnalytics::Empty(r) => r.metrics(),
        }
    }
}

/// Analytics for both sides of one game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameAnalytics {
    pub home: TeamAnalytics,
    pub away: TeamAnalytics,
}

impl GameAnalytics {
    pub fn empty() -> Self {
        Self {
            home: TeamAnalytics::empty(),
            away: TeamAnalytics::empty(),
        }
    }

    pub fn side(&self, side: Side) -> &TeamAnalytics {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }
}

/// Whether a metric is a raw total or an already-derived rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Count,
    Rate,
}

/// A single numeric value pulled from a record for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub key: &'static str,
    pub label: &'static str,
    pub value: f64,
    pub kind: MetricKind,
}

impl Metric {
    pub fn count(key: &'static str, label: &'static str, value: u32) -> Self {
        Self {
            key,
            label,
            value: f64::from(value),
            kind: MetricKind::Count,
        }
    }

    pub fn signed(key: &'static str, label: &'static str, value: i64) -> Self {
        Self {
            key,
            label,
            value: value as f64,
            kind: MetricKind::Count,
        }
    }

    /// Rate fields are stored formatted; unparseable strings read as zero.
    pub fn rate(key: &'static str, label: &'static str, formatted: &str) -> Self {
        Self {
            key,
            label,
            value: format::parse_rate(formatted).unwrap_or(0.0),
            kind: MetricKind::Rate,
        }
    }
}

// ============================================================================
// Aggregator seam
// ============================================================================

/// Everything one side contributes to its aggregation.
#[derive(Debug, Clone)]
pub struct AggregationInput<'a> {
    pub player_stats: Vec<&'a PlayerStatRecord>,
    pub events: Vec<&'a GameEvent>,
    /// Authoritative scoreboard value; wins over event-derived counts.
    pub team_score: Option<f64>,
    pub side: Side,
}

impl<'a> AggregationInput<'a> {
    /// Player stats and events normalized into one tally.
    pub fn tally(&self) -> StatTally {
        normalize(
            self.player_stats
                .iter()
                .map(|r| StatItem::PlayerStat(*r))
                .chain(self.events.iter().map(|e| StatItem::Event(*e))),
        )
    }
}

/// Sport-specific aggregation of one side's stats.
pub trait SportAggregator: Send + Sync {
    fn aggregate(&self, input: &AggregationInput<'_>) -> TeamAnalytics;

    /// Aggregator name for logging
    fn name(&self) -> &'static str;
}

/// Aggregator for a sport. Sports without their own aggregator get the
/// generic fallback.
pub fn aggregator_for(sport: &Sport) -> &'static dyn SportAggregator {
    match sport {
        Sport::Football => &FootballAggregator,
        Sport::Basketball => &BasketballAggregator,
        Sport::Baseball => &BaseballAggregator,
        Sport::Other(_) => &GenericAggregator,
    }
}

// ============================================================================
// Snapshot validation
// ============================================================================

/// A snapshot that has passed validation, with both team ids resolved.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedSnapshot<'a> {
    pub snapshot: &'a GameSnapshot,
    pub home_id: &'a EntityId,
    pub away_id: &'a EntityId,
}

impl<'a> ValidatedSnapshot<'a> {
    pub fn team_id(&self, side: Side) -> &'a EntityId {
        match side {
            Side::Home => self.home_id,
            Side::Away => self.away_id,
        }
    }

    /// One side's records and events, filtered by team id.
    pub fn side_input(&self, side: Side) -> AggregationInput<'a> {
        let team_id = self.team_id(side);
        AggregationInput {
            player_stats: self
                .snapshot
                .player_stats()
                .iter()
                .filter(|r| r.team_id.as_ref() == Some(team_id))
                .collect(),
            events: self
                .snapshot
                .events()
                .iter()
                .filter(|e| e.team_id.as_ref() == Some(team_id))
                .collect(),
            team_score: self.snapshot.score_for(side),
            side,
        }
    }
}

/// Check that a snapshot carries enough to aggregate.
pub fn validate(snapshot: Option<&GameSnapshot>) -> Result<ValidatedSnapshot<'_>, SnapshotError> {
    let snapshot = snapshot.ok_or(SnapshotError::Missing)?;
    let sport_doc = snapshot
        .sport
        .as_ref()
        .ok_or(SnapshotError::MissingSportDocument)?;
    if sport_doc.player_stats.is_none() && sport_doc.events.is_none() {
        return Err(SnapshotError::NoStatData);
    }
    if snapshot.base.is_none() {
        return Err(SnapshotError::MissingBase);
    }
    let home_id = snapshot
        .team_id(Side::Home)
        .ok_or(SnapshotError::MissingTeamId(Side::Home))?;
    let away_id = snapshot
        .team_id(Side::Away)
        .ok_or(SnapshotError::MissingTeamId(Side::Away))?;

    Ok(ValidatedSnapshot {
        snapshot,
        home_id,
        away_id,
    })
}

/// Parse a raw JSON snapshot. `null` counts as a missing snapshot.
pub fn parse_snapshot(value: &Value) -> Result<Option<GameSnapshot>, SnapshotError> {
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(GameSnapshot::deserialize(value)?))
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Compute `{home, away}` analytics for a snapshot.
///
/// Never fails: a missing or invalid snapshot yields the empty record for
/// both sides.
pub fn calculate_analytics(snapshot: Option<&GameSnapshot>) -> GameAnalytics {
    match validate(snapshot) {
        Ok(valid) => aggregate_validated(&valid),
        Err(e) => {
            warn!("Falling back to empty analytics: {}", e);
            GameAnalytics::empty()
        }
    }
}

/// Same as [`calculate_analytics`] for a raw JSON snapshot.
pub fn calculate_analytics_json(value: &Value) -> GameAnalytics {
    match parse_snapshot(value) {
        Ok(snapshot) => calculate_analytics(snapshot.as_ref()),
        Err(e) => {
            warn!("Falling back to empty analytics: {}", e);
            GameAnalytics::empty()
        }
    }
}

/// Batch calculate analytics for multiple snapshots.
///
/// Uses parallel processing; results keep the input order.
pub fn batch_calculate_analytics(snapshots: &[GameSnapshot]) -> Vec<GameAnalytics> {
    snapshots
        .par_iter()
        .map(|snapshot| calculate_analytics(Some(snapshot)))
        .collect()
}

fn aggregate_validated(valid: &ValidatedSnapshot<'_>) -> GameAnalytics {
    let sport = valid.snapshot.sport_kind();
    let aggregator = aggregator_for(&sport);
    debug!(
        sport = %sport,
        aggregator = aggregator.name(),
        home = %valid.home_id,
        away = %valid.away_id,
        "Aggregating game analytics"
    );

    GameAnalytics {
        home: aggregator.aggregate(&valid.side_input(Side::Home)),
        away: aggregator.aggregate(&valid.side_input(Side::Away)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn football_snapshot() -> GameSnapshot {
        serde_json::from_value(json!({
            "base": {
                "sport": "Football",
                "teamId": "T1",
                "opponentTeamId": "T2",
                "status": "live"
            },
            "sport": {
                "score": { "home": 2, "away": 1 },
                "events": [
                    { "teamId": "T1", "eventType": "goal" },
                    { "teamId": "T1", "eventType": "shot_on_target" },
                    { "teamId": "T1", "eventType": "shot_on_target" },
                    { "teamId": "T1", "eventType": "pass" },
                    { "teamId": "T2", "eventType": "shot" }
                ],
                "playerStats": []
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_football_end_to_end() {
        let analytics = calculate_analytics(Some(&football_snapshot()));

        let TeamAnalytics::Football(home) = &analytics.home else {
            panic!("expected football home record");
        };
        assert_eq!(home.total_goals, 2);
        assert_eq!(home.total_shots, 2);
        assert_eq!(home.total_shots_on_target, 2);
        assert_eq!(home.shot_accuracy, "100%");
        assert_eq!(home.total_passes, 1);

        let TeamAnalytics::Football(away) = &analytics.away else {
            panic!("expected football away record");
        };
        assert_eq!(away.total_goals, 1);
        assert_eq!(away.total_shots, 1);
        assert_eq!(away.total_shots_on_target, 0);
        assert_eq!(away.shot_accuracy, "0%");
    }

    #[test]
    fn test_idempotent() {
        let snapshot = football_snapshot();
        assert_eq!(
            calculate_analytics(Some(&snapshot)),
            calculate_analytics(Some(&snapshot))
        );
    }

    #[test]
    fn test_order_independent() {
        let snapshot = football_snapshot();
        let mut shuffled = snapshot.clone();
        if let Some(events) = shuffled.sport.as_mut().and_then(|s| s.events.as_mut()) {
            events.reverse();
            events.swap(0, 2);
        }
        assert_eq!(
            calculate_analytics(Some(&snapshot)),
            calculate_analytics(Some(&shuffled))
        );
    }

    #[test]
    fn test_order_independent_events_and_player_stats() {
        let snapshot: GameSnapshot = serde_json::from_value(json!({
            "base": { "sport": "Basketball", "teamId": "H", "opponentTeamId": "A" },
            "sport": {
                "events": [
                    { "teamId": "H", "eventType": "point_2" },
                    { "teamId": "H", "type": "missed_shot" },
                    { "teamId": "A", "eventType": "three_point" },
                    { "teamId": "H", "statType": "steal" },
                    { "teamId": "A", "name": "turnover" }
                ],
                "playerStats": [
                    {
                        "teamId": "H",
                        "playerId": "p1",
                        "stats": { "rebounds": 6, "assists": 2 },
                        "events": [{ "eventType": "free_throw" }, { "type": "two_point" }]
                    },
                    {
                        "teamId": "A",
                        "playerId": "p7",
                        "eventType": "block",
                        "stats": { "rebounds": 3 }
                    },
                    {
                        "teamId": "H",
                        "playerId": "p2",
                        "events": [{ "eventType": "missed_free_throw" }],
                        "stats": { "turnovers": 1 }
                    }
                ]
            }
        }))
        .unwrap();

        let mut shuffled = snapshot.clone();
        if let Some(sport) = shuffled.sport.as_mut() {
            if let Some(events) = sport.events.as_mut() {
                events.rotate_left(2);
                events.swap(0, 3);
            }
            if let Some(stats) = sport.player_stats.as_mut() {
                stats.reverse();
                stats.swap(1, 2);
            }
        }
        assert_ne!(snapshot, shuffled);

        let expected = calculate_analytics(Some(&snapshot));
        assert_eq!(expected, calculate_analytics(Some(&shuffled)));
        let TeamAnalytics::Basketball(home) = &expected.home else {
            panic!("expected basketball record");
        };
        assert_eq!(home.total_points, 5);
        assert_eq!(home.total_rebounds, 6);
        assert_eq!(home.field_goals_attempted, 3);
    }

    #[test]
    fn test_safe_empty_on_missing_input() {
        assert_eq!(calculate_analytics(None), GameAnalytics::empty());
        assert_eq!(
            calculate_analytics_json(&Value::Null),
            GameAnalytics::empty()
        );
        assert_eq!(calculate_analytics_json(&json!({})), GameAnalytics::empty());
        assert_eq!(calculate_analytics_json(&json!([1, 2, 3])), GameAnalytics::empty());
    }

    #[test]
    fn test_drifted_display_field_keeps_score_and_other_events() {
        for drift in [
            json!({ "minute": "45+2" }),
            json!({ "quarter": "Q2" }),
            json!({ "outs": 2.0 }),
            json!({ "eventType": 5 }),
            json!({ "period": [1] }),
        ] {
            let mut odd = json!({ "teamId": "T1", "type": "goal" });
            for (key, value) in drift.as_object().unwrap() {
                odd[key] = value.clone();
            }
            let analytics = calculate_analytics_json(&json!({
                "base": { "sport": "Football", "teamId": "T1", "opponentTeamId": "T2" },
                "sport": {
                    "score": { "home": 2, "away": 0 },
                    "currentPeriod": "2nd half",
                    "events": [odd, { "teamId": "T1", "type": "pass" }]
                }
            }));
            let TeamAnalytics::Football(home) = &analytics.home else {
                panic!("expected football record for {}", drift);
            };
            assert_eq!(home.total_goals, 2, "drift {}", drift);
            assert_eq!(home.total_passes, 1, "drift {}", drift);
        }
    }

    #[test]
    fn test_safe_empty_on_missing_team_id() {
        let snapshot: GameSnapshot = serde_json::from_value(json!({
            "base": { "sport": "Football", "teamId": "T1" },
            "sport": { "events": [] }
        }))
        .unwrap();
        assert!(matches!(
            validate(Some(&snapshot)),
            Err(SnapshotError::MissingTeamId(Side::Away))
        ));
        assert_eq!(calculate_analytics(Some(&snapshot)), GameAnalytics::empty());
    }

    #[test]
    fn test_safe_empty_without_stat_data() {
        let snapshot: GameSnapshot = serde_json::from_value(json!({
            "base": { "sport": "Basketball", "teamId": "T1", "opponentTeamId": "T2" },
            "sport": { "score": { "home": 10, "away": 12 } }
        }))
        .unwrap();
        assert!(matches!(
            validate(Some(&snapshot)),
            Err(SnapshotError::NoStatData)
        ));
        assert!(calculate_analytics(Some(&snapshot)).home.is_empty_record());
    }

    #[test]
    fn test_output_has_exactly_home_and_away() {
        let json = serde_json::to_value(calculate_analytics(None)).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert!(object.contains_key("home"));
        assert!(object.contains_key("away"));
        assert_eq!(object["home"]["battingAverage"], ".000");
    }

    #[test]
    fn test_unknown_sport_uses_generic() {
        let snapshot: GameSnapshot = serde_json::from_value(json!({
            "base": { "sport": "Hockey", "teamId": 1, "opponentTeamId": 2 },
            "sport": {
                "score": { "home": 3, "away": 0 },
                "events": [{ "teamId": 1, "type": "assist" }]
            }
        }))
        .unwrap();
        let analytics = calculate_analytics(Some(&snapshot));
        let TeamAnalytics::Generic(home) = &analytics.home else {
            panic!("expected generic record");
        };
        assert_eq!(home.total_points, 3);
        assert_eq!(home.total_assists, 1);
        assert_eq!(home.efficiency, 35);
        assert!(matches!(analytics.away, TeamAnalytics::Generic(_)));
    }

    #[test]
    fn test_lower_case_sport_is_not_matched() {
        let snapshot: GameSnapshot = serde_json::from_value(json!({
            "base": { "sport": "basketball", "teamId": "A", "opponentTeamId": "B" },
            "sport": { "events": [] }
        }))
        .unwrap();
        assert!(matches!(
            calculate_analytics(Some(&snapshot)).home,
            TeamAnalytics::Generic(_)
        ));
    }

    #[test]
    fn test_basketball_zero_guard_end_to_end() {
        let snapshot: GameSnapshot = serde_json::from_value(json!({
            "base": { "sport": "Basketball", "teamId": "H", "opponentTeamId": "A" },
            "sport": {
                "score": { "home": 0, "away": 0 },
                "events": [{ "teamId": "H", "eventType": "rebound" }],
                "playerStats": [{ "teamId": "A", "playerId": "p1", "stats": { "assists": 2 } }]
            }
        }))
        .unwrap();
        let analytics = calculate_analytics(Some(&snapshot));
        for side in [Side::Home, Side::Away] {
            let TeamAnalytics::Basketball(record) = analytics.side(side) else {
                panic!("expected basketball record");
            };
            assert_eq!(record.fg_percentage, "0%");
            assert_eq!(record.three_pt_percentage, "0%");
            assert_eq!(record.ft_percentage, "0%");
        }
    }

    #[test]
    fn test_player_stats_filtered_by_team() {
        let snapshot: GameSnapshot = serde_json::from_value(json!({
            "base": { "sport": "Baseball", "teamId": "H", "opponentTeamId": "A" },
            "sport": {
                "playerStats": [
                    { "teamId": "H", "playerId": "p1", "stats": { "hits": 3, "strikeouts": 7 } },
                    { "teamId": "A", "playerId": "p2", "stats": { "hits": 1 } }
                ]
            }
        }))
        .unwrap();
        let analytics = calculate_analytics(Some(&snapshot));
        let TeamAnalytics::Baseball(home) = &analytics.home else {
            panic!("expected baseball record");
        };
        assert_eq!(home.total_hits, 3);
        assert_eq!(home.batting_average, ".300");
        let TeamAnalytics::Baseball(away) = &analytics.away else {
            panic!("expected baseball record");
        };
        assert_eq!(away.total_hits, 1);
        assert_eq!(away.total_runs, 0);
    }

    #[test]
    fn test_batch_keeps_order() {
        let football = football_snapshot();
        let snapshots = vec![football.clone(), GameSnapshot::default(), football];
        let results = batch_calculate_analytics(&snapshots);
        assert_eq!(results.len(), 3);
        assert!(matches!(results[0].home, TeamAnalytics::Football(_)));
        assert_eq!(results[1], GameAnalytics::empty());
        assert_eq!(results[0], results[2]);
    }
}
