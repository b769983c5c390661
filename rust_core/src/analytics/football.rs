//! Football (soccer) team analytics.

use super::format::{percent_label, to_total, whole_percentage};
use super::keys;
use super::{AggregationInput, Metric, SportAggregator, TeamAnalytics};
use serde::Serialize;

/// Share of shots assumed on target when no `shot_on_target` events exist.
/// An estimate, not a measured value.
pub const SHOT_ON_TARGET_FALLBACK_RATIO: f64 = 0.6;

/// Possession is inferred from passing density and clamped to this range.
pub const POSSESSION_MIN_PCT: f64 = 30.0;
pub const POSSESSION_MAX_PCT: f64 = 70.0;

/// Possession reported when nothing has been counted yet.
pub const POSSESSION_DEFAULT_PCT: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FootballAnalytics {
    pub total_goals: u32,
    pub total_assists: u32,
    pub total_shots: u32,
    pub total_shots_on_target: u32,
    pub total_passes: u32,
    pub total_tackles: u32,
    pub total_fouls: u32,
    pub total_yellow_cards: u32,
    pub total_red_cards: u32,
    pub shot_accuracy: String,
    pub possession: String,
    pub corners: u32,
    pub offsides: u32,
}

impl FootballAnalytics {
    pub fn metrics(&self) -> Vec<Metric> {
        vec![
            Metric::count("totalGoals", "Goals", self.total_goals),
            Metric::count("totalAssists", "Assists", self.total_assists),
            Metric::count("totalShots", "Shots", self.total_shots),
            Metric::count(
                "totalShotsOnTarget",
                "Shots on Target",
                self.total_shots_on_target,
            ),
            Metric::rate("shotAccuracy", "Shot Accuracy", &self.shot_accuracy),
            Metric::rate("possession", "Possession", &self.possession),
            Metric::count("totalPasses", "Passes", self.total_passes),
            Metric::count("totalTackles", "Tackles", self.total_tackles),
            Metric::count("totalFouls", "Fouls", self.total_fouls),
            Metric::count("totalYellowCards", "Yellow Cards", self.total_yellow_cards),
            Metric::count("totalRedCards", "Red Cards", self.total_red_cards),
            Metric::count("corners", "Corners", self.corners),
            Metric::count("offsides", "Offsides", self.offsides),
        ]
    }
}

pub struct FootballAggregator;

impl SportAggregator for FootballAggregator {
    fn aggregate(&self, input: &AggregationInput<'_>) -> TeamAnalytics {
        let tally = input.tally();

        let total_goals = input.team_score.unwrap_or_else(|| tally.resolve(&keys::GOAL));
        let total_shots = tally.resolve(&keys::SHOT);
        let on_target = tally.resolve(&keys::SHOT_ON_TARGET);
        let total_shots_on_target = if on_target > 0.0 {
            on_target
        } else {
            (total_shots * SHOT_ON_TARGET_FALLBACK_RATIO).floor()
        };
        let total_passes = tally.resolve(&keys::PASS);

        TeamAnalytics::Football(FootballAnalytics {
            total_goals: to_total(total_goals),
            total_assists: to_total(tally.resolve(&keys::ASSIST)),
            total_shots: to_total(total_shots),
            total_shots_on_target: to_total(total_shots_on_target),
            total_passes: to_total(total_passes),
            total_tackles: to_total(tally.resolve(&keys::TACKLE)),
            total_fouls: to_total(tally.resolve(&keys::FOUL)),
            total_yellow_cards: to_total(tally.resolve(&keys::YELLOW_CARD)),
            total_red_cards: to_total(tally.resolve(&keys::RED_CARD)),
            shot_accuracy: whole_percentage(total_shots_on_target, total_shots),
            possession: percent_label(possession_pct(total_passes, tally.total())),
            corners: to_total(tally.resolve(&keys::CORNER)),
            offsides: to_total(tally.resolve(&keys::OFFSIDE)),
        })
    }

    fn name(&self) -> &'static str {
        "football"
    }
}

/// Possession estimated from how much of the counted activity is passing.
fn possession_pct(passes: f64, total_events: f64) -> f64 {
    if total_events <= 0.0 {
        return POSSESSION_DEFAULT_PCT;
    }
    (passes / total_events * 100.0).clamp(POSSESSION_MIN_PCT, POSSESSION_MAX_PCT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GameEvent, PlayerStatRecord, Side};

    fn aggregate(events: &[GameEvent], score: Option<f64>) -> FootballAnalytics {
        let input = AggregationInput {
            player_stats: Vec::new(),
            events: events.iter().collect(),
            team_score: score,
            side: Side::Home,
        };
        match FootballAggregator.aggregate(&input) {
            TeamAnalytics::Football(record) => record,
            other => panic!("expected football record, got {:?}", other),
        }
    }

    fn events(types: &[&str]) -> Vec<GameEvent> {
        types.iter().map(|t| GameEvent::new(t, "T1")).collect()
    }

    #[test]
    fn test_score_wins_over_goal_events() {
        let record = aggregate(&events(&["pass", "pass"]), Some(3.0));
        assert_eq!(record.total_goals, 3);

        let record = aggregate(&events(&["goal", "goal", "goal", "goal"]), Some(1.0));
        assert_eq!(record.total_goals, 1);
    }

    #[test]
    fn test_goal_events_without_score() {
        let record = aggregate(&events(&["goal", "goal"]), None);
        assert_eq!(record.total_goals, 2);
    }

    #[test]
    fn test_shots_on_target_fallback_ratio() {
        let record = aggregate(&events(&["shot", "shot", "shot", "shot", "shot"]), None);
        assert_eq!(record.total_shots, 5);
        assert_eq!(record.total_shots_on_target, 3);
        assert_eq!(record.shot_accuracy, "60%");
    }

    #[test]
    fn test_shot_precedence_chain() {
        let evs = events(&["shot_on_target", "shot_on_target", "shot_off_target"]);
        let record = aggregate(&evs, None);
        assert_eq!(record.total_shots, 2);
        assert_eq!(record.total_shots_on_target, 2);
        assert_eq!(record.shot_accuracy, "100%");
    }

    #[test]
    fn test_plural_shot_stats_from_player_records() {
        let stats = vec![
            PlayerStatRecord::new("T1", "p1")
                .with_stat("shots", 4.0)
                .with_stat("shots_on_target", 2.0),
            PlayerStatRecord::new("T1", "p2").with_stat("shots_off_target", 3.0),
        ];
        let input = AggregationInput {
            player_stats: stats.iter().collect(),
            events: Vec::new(),
            team_score: None,
            side: Side::Home,
        };
        let TeamAnalytics::Football(record) = FootballAggregator.aggregate(&input) else {
            panic!("expected football record");
        };
        assert_eq!(record.total_shots, 4);
        assert_eq!(record.total_shots_on_target, 2);
        assert_eq!(record.shot_accuracy, "50%");

        let off_only = vec![
            PlayerStatRecord::new("T1", "p2").with_stat("shots_off_target", 3.0),
        ];
        let input = AggregationInput {
            player_stats: off_only.iter().collect(),
            events: Vec::new(),
            team_score: None,
            side: Side::Home,
        };
        let TeamAnalytics::Football(record) = FootballAggregator.aggregate(&input) else {
            panic!("expected football record");
        };
        assert_eq!(record.total_shots, 3);
    }

    #[test]
    fn test_no_shots_zero_accuracy() {
        let record = aggregate(&[], None);
        assert_eq!(record.total_shots, 0);
        assert_eq!(record.shot_accuracy, "0%");
        assert_eq!(record.possession, "50%");
    }

    #[test]
    fn test_possession_clamped() {
        let record = aggregate(&events(&["pass", "pass", "pass", "pass"]), None);
        assert_eq!(record.possession, "70%");

        let record = aggregate(&events(&["pass", "tackle", "foul", "foul", "corner"]), None);
        assert_eq!(record.possession, "30%");

        let record = aggregate(&events(&["pass", "pass", "tackle"]), None);
        assert_eq!(record.possession, "67%");
    }

    #[test]
    fn test_direct_counts_and_stats_merge() {
        let stats = vec![PlayerStatRecord::new("T1", "p1")
            .with_stat("yellow_cards", 2.0)
            .with_stat("tackles", 3.0)];
        let evs = events(&[
            "yellow_card",
            "red_card",
            "corner",
            "offside",
            "assist",
            "foul",
        ]);
        let input = AggregationInput {
            player_stats: stats.iter().collect(),
            events: evs.iter().collect(),
            team_score: Some(0.0),
            side: Side::Away,
        };
        let TeamAnalytics::Football(record) = FootballAggregator.aggregate(&input) else {
            panic!("expected football record");
        };
        assert_eq!(record.total_goals, 0);
        assert_eq!(record.total_yellow_cards, 3);
        assert_eq!(record.total_red_cards, 1);
        assert_eq!(record.total_tackles, 3);
        assert_eq!(record.corners, 1);
        assert_eq!(record.offsides, 1);
        assert_eq!(record.total_assists, 1);
        assert_eq!(record.total_fouls, 1);
    }
}
