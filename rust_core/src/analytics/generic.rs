//! Minimal analytics for sports without a dedicated aggregator.

use super::format::to_total;
use super::keys;
use super::{AggregationInput, Metric, SportAggregator, TeamAnalytics};
use serde::Serialize;

/// Fixed placeholder for rates the generic aggregator cannot derive.
pub const GENERIC_PLACEHOLDER_PCT: &str = "50%";

pub const GENERIC_SCORE_WEIGHT: i64 = 10;
pub const GENERIC_ASSIST_WEIGHT: i64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericAnalytics {
    pub total_points: u32,
    pub total_goals: u32,
    pub total_assists: u32,
    pub total_shots: u32,
    pub total_fouls: u32,
    pub total_passes: u32,
    pub total_tackles: u32,
    pub shot_accuracy: String,
    pub possession: String,
    pub efficiency: i64,
}

impl GenericAnalytics {
    pub fn metrics(&self) -> Vec<Metric> {
        vec![
            Metric::count("totalPoints", "Points", self.total_points),
            Metric::count("totalAssists", "Assists", self.total_assists),
            Metric::count("totalShots", "Shots", self.total_shots),
            Metric::count("totalFouls", "Fouls", self.total_fouls),
            Metric::count("totalPasses", "Passes", self.total_passes),
            Metric::count("totalTackles", "Tackles", self.total_tackles),
            Metric::signed("efficiency", "Efficiency", self.efficiency),
        ]
    }
}

pub struct GenericAggregator;

impl SportAggregator for GenericAggregator {
    fn aggregate(&self, input: &AggregationInput<'_>) -> TeamAnalytics {
        let tally = input.tally();
        let score = to_total(input.team_score.unwrap_or(0.0));
        let assists = to_total(tally.resolve(&keys::ASSIST));

        TeamAnalytics::Generic(GenericAnalytics {
            total_points: score,
            total_goals: score,
            total_assists: assists,
            total_shots: to_total(tally.resolve(&keys::GENERIC_SHOT)),
            total_fouls: to_total(tally.resolve(&keys::FOUL)),
            total_passes: to_total(tally.resolve(&keys::PASS)),
            total_tackles: to_total(tally.resolve(&keys::TACKLE)),
            shot_accuracy: GENERIC_PLACEHOLDER_PCT.to_string(),
            possession: GENERIC_PLACEHOLDER_PCT.to_string(),
            efficiency: i64::from(score) * GENERIC_SCORE_WEIGHT
                + i64::from(assists) * GENERIC_ASSIST_WEIGHT,
        })
    }

    fn name(&self) -> &'static str {
        "generic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GameEvent, Side};

    #[test]
    fn test_generic_record() {
        let events = vec![
            GameEvent::new("assist", "T1"),
            GameEvent::new("assist", "T1"),
            GameEvent::new("shot", "T1"),
            GameEvent::new("foul", "T1"),
        ];
        let input = AggregationInput {
            player_stats: Vec::new(),
            events: events.iter().collect(),
            team_score: Some(4.0),
            side: Side::Home,
        };
        let TeamAnalytics::Generic(record) = GenericAggregator.aggregate(&input) else {
            panic!("expected generic record");
        };
        assert_eq!(record.total_points, 4);
        assert_eq!(record.total_goals, 4);
        assert_eq!(record.total_assists, 2);
        assert_eq!(record.total_shots, 1);
        assert_eq!(record.total_fouls, 1);
        assert_eq!(record.shot_accuracy, "50%");
        assert_eq!(record.possession, "50%");
        assert_eq!(record.efficiency, 50);
    }

    #[test]
    fn test_missing_score_counts_as_zero() {
        let input = AggregationInput {
            player_stats: Vec::new(),
            events: Vec::new(),
            team_score: None,
            side: Side::Away,
        };
        let TeamAnalytics::Generic(record) = GenericAggregator.aggregate(&input) else {
            panic!("expected generic record");
        };
        assert_eq!(record.total_points, 0);
        assert_eq!(record.efficiency, 0);
    }
}
