//! Basketball team analytics.
//!
//! Shot attempts are makes plus whatever "missed" events were logged, so
//! with no misses recorded, attempts equal makes.

use super::format::{shooting_percentage, to_total};
use super::keys;
use super::normalizer::StatTally;
use super::{AggregationInput, Metric, SportAggregator, TeamAnalytics};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketballAnalytics {
    pub total_points: u32,
    pub total_rebounds: u32,
    pub total_assists: u32,
    pub total_steals: u32,
    pub total_blocks: u32,
    pub total_turnovers: u32,
    pub field_goals_made: u32,
    pub field_goals_attempted: u32,
    pub fg_percentage: String,
    pub three_pointers_made: u32,
    pub three_pointers_attempted: u32,
    pub three_pt_percentage: String,
    pub free_throws_made: u32,
    pub free_throws_attempted: u32,
    pub ft_percentage: String,
    pub efficiency: i64,
}

impl BasketballAnalytics {
    pub fn metrics(&self) -> Vec<Metric> {
        vec![
            Metric::count("totalPoints", "Points", self.total_points),
            Metric::count("totalRebounds", "Rebounds", self.total_rebounds),
            Metric::count("totalAssists", "Assists", self.total_assists),
            Metric::count("totalSteals", "Steals", self.total_steals),
            Metric::count("totalBlocks", "Blocks", self.total_blocks),
            Metric::count("totalTurnovers", "Turnovers", self.total_turnovers),
            Metric::rate("fgPercentage", "FG%", &self.fg_percentage),
            Metric::rate("threePtPercentage", "3PT%", &self.three_pt_percentage),
            Metric::rate("ftPercentage", "FT%", &self.ft_percentage),
            Metric::signed("efficiency", "Efficiency", self.efficiency),
        ]
    }
}

/// Made baskets by type, after alias resolution.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShotCounts {
    pub point2: f64,
    pub point3: f64,
    pub free_throws: f64,
}

impl ShotCounts {
    pub fn from_tally(tally: &StatTally) -> Self {
        Self {
            point2: tally.resolve(&keys::POINT_2),
            point3: tally.resolve(&keys::POINT_3),
            free_throws: tally.resolve(&keys::FREE_THROW),
        }
    }

    /// Points implied by the made baskets alone.
    pub fn points(&self) -> f64 {
        self.point2 * 2.0 + self.point3 * 3.0 + self.free_throws
    }
}

/// Attempts can never be fewer than makes.
fn attempts(made: f64, missed: f64) -> f64 {
    made.max(made + missed)
}

pub struct BasketballAggregator;

impl SportAggregator for BasketballAggregator {
    fn aggregate(&self, input: &AggregationInput<'_>) -> TeamAnalytics {
        let tally = input.tally();
        let shots = ShotCounts::from_tally(&tally);

        let total_points = input.team_score.unwrap_or_else(|| shots.points());
        let rebounds = tally.resolve(&keys::REBOUND);
        let assists = tally.resolve(&keys::ASSIST);
        let steals = tally.resolve(&keys::STEAL);
        let blocks = tally.resolve(&keys::BLOCK);
        let turnovers = tally.resolve(&keys::TURNOVER);

        let fg_made = shots.point2 + shots.point3;
        let fg_attempted = attempts(fg_made, tally.resolve(&keys::MISSED_SHOT));
        let three_attempted = attempts(shots.point3, tally.resolve(&keys::MISSED_THREE));
        let ft_attempted = attempts(shots.free_throws, tally.resolve(&keys::MISSED_FREE_THROW));

        let total_points = to_total(total_points);
        let total_rebounds = to_total(rebounds);
        let total_assists = to_total(assists);
        let total_steals = to_total(steals);
        let total_blocks = to_total(blocks);
        let total_turnovers = to_total(turnovers);
        let efficiency = i64::from(total_points)
            + i64::from(total_rebounds)
            + i64::from(total_assists)
            + i64::from(total_steals)
            + i64::from(total_blocks)
            - i64::from(total_turnovers);

        TeamAnalytics::Basketball(BasketballAnalytics {
            total_points,
            total_rebounds,
            total_assists,
            total_steals,
            total_blocks,
            total_turnovers,
            field_goals_made: to_total(fg_made),
            field_goals_attempted: to_total(fg_attempted),
            fg_percentage: shooting_percentage(fg_made, fg_attempted),
            three_pointers_made: to_total(shots.point3),
            three_pointers_attempted: to_total(three_attempted),
            three_pt_percentage: shooting_percentage(shots.point3, three_attempted),
            free_throws_made: to_total(shots.free_throws),
            free_throws_attempted: to_total(ft_attempted),
            ft_percentage: shooting_percentage(shots.free_throws, ft_attempted),
            efficiency,
        })
    }

    fn name(&self) -> &'static str {
        "basketball"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::normalizer::{normalize, StatItem};
    use crate::models::{GameEvent, PlayerStatRecord, Side};

    fn events(types: &[&str]) -> Vec<GameEvent> {
        types.iter().map(|t| GameEvent::new(t, "T1")).collect()
    }

    fn aggregate(
        stats: &[PlayerStatRecord],
        events: &[GameEvent],
        score: Option<f64>,
    ) -> BasketballAnalytics {
        let input = AggregationInput {
            player_stats: stats.iter().collect(),
            events: events.iter().collect(),
            team_score: score,
            side: Side::Home,
        };
        match BasketballAggregator.aggregate(&input) {
            TeamAnalytics::Basketball(record) => record,
            other => panic!("expected basketball record, got {:?}", other),
        }
    }

    #[test]
    fn test_two_point_aliases_count_identically() {
        let evs = events(&[
            "two_point",
            "two_point",
            "two_point",
            "point_2",
            "point_2",
        ]);
        let tally = normalize(evs.iter().map(StatItem::Event));
        assert_eq!(ShotCounts::from_tally(&tally).point2, 5.0);

        let evs = events(&["2_point", "point_2", "two_point"]);
        let tally = normalize(evs.iter().map(StatItem::Event));
        assert_eq!(ShotCounts::from_tally(&tally).point2, 3.0);
    }

    #[test]
    fn test_points_from_events_without_score() {
        let evs = events(&["point_2", "three_point", "free_throw"]);
        let record = aggregate(&[], &evs, None);
        assert_eq!(record.total_points, 6);
    }

    #[test]
    fn test_score_wins_over_events() {
        let record = aggregate(&[], &events(&["point_2"]), Some(88.0));
        assert_eq!(record.total_points, 88);
    }

    #[test]
    fn test_zero_attempts_are_zero_percent() {
        let record = aggregate(&[], &events(&["rebound", "assist"]), None);
        assert_eq!(record.fg_percentage, "0%");
        assert_eq!(record.three_pt_percentage, "0%");
        assert_eq!(record.ft_percentage, "0%");
        assert_eq!(record.field_goals_attempted, 0);
    }

    #[test]
    fn test_attempts_without_misses_equal_makes() {
        let record = aggregate(&[], &events(&["point_2", "point_3"]), None);
        assert_eq!(record.field_goals_made, 2);
        assert_eq!(record.field_goals_attempted, 2);
        assert_eq!(record.fg_percentage, "100.0%");
    }

    #[test]
    fn test_missed_events_extend_attempts() {
        let evs = events(&[
            "point_2", "point_2", "point_3", "missed_shot", "missed_shot", "missed_three",
            "free_throw", "missed_free_throw",
        ]);
        let record = aggregate(&[], &evs, None);
        assert_eq!(record.field_goals_made, 3);
        assert_eq!(record.field_goals_attempted, 5);
        assert_eq!(record.fg_percentage, "60.0%");
        assert_eq!(record.three_pointers_attempted, 2);
        assert_eq!(record.three_pt_percentage, "50.0%");
        assert_eq!(record.free_throws_attempted, 2);
        assert_eq!(record.ft_percentage, "50.0%");
    }

    #[test]
    fn test_efficiency_composite() {
        let stats = vec![PlayerStatRecord::new("T1", "p1")
            .with_stat("rebounds", 7.0)
            .with_stat("turnovers", 3.0)];
        let evs = events(&["assist", "assist", "steal", "block"]);
        let record = aggregate(&stats, &evs, Some(20.0));
        assert_eq!(record.total_rebounds, 7);
        assert_eq!(record.total_turnovers, 3);
        // 20 + 7 + 2 + 1 + 1 - 3
        assert_eq!(record.efficiency, 28);
    }

    #[test]
    fn test_efficiency_can_go_negative() {
        let record = aggregate(&[], &events(&["turnover", "turnovers"]), Some(0.0));
        assert_eq!(record.efficiency, -2);
    }
}
