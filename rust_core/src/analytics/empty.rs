//! The fully-populated zero record returned when a snapshot is unusable.

use super::format::{ZERO_AVERAGE, ZERO_PCT};
use super::Metric;
use serde::Serialize;

pub const ZERO_ERA: &str = "0.00";

/// Union of every sport's fields, all zeroed, so renderers never see a hole.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyAnalytics {
    // Football
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

    // Basketball
    pub total_points: u32,
    pub total_rebounds: u32,
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

    // Baseball
    pub total_runs: u32,
    pub total_hits: u32,
    pub total_home_runs: u32,
    pub total_strikeouts: u32,
    pub total_walks: u32,
    pub total_errors: u32,
    #[serde(rename = "totalRBI")]
    pub total_rbi: u32,
    pub at_bats: u32,
    pub batting_average: String,
    pub earned_runs: u32,
    pub innings_pitched: u32,
    pub era: String,
}

impl Default for EmptyAnalytics {
    fn default() -> Self {
        Self {
            total_goals: 0,
            total_assists: 0,
            total_shots: 0,
            total_shots_on_target: 0,
            total_passes: 0,
            total_tackles: 0,
            total_fouls: 0,
            total_yellow_cards: 0,
            total_red_cards: 0,
            shot_accuracy: ZERO_PCT.to_string(),
            possession: ZERO_PCT.to_string(),
            corners: 0,
            offsides: 0,
            total_points: 0,
            total_rebounds: 0,
            total_steals: 0,
            total_blocks: 0,
            total_turnovers: 0,
            field_goals_made: 0,
            field_goals_attempted: 0,
            fg_percentage: ZERO_PCT.to_string(),
            three_pointers_made: 0,
            three_pointers_attempted: 0,
            three_pt_percentage: ZERO_PCT.to_string(),
            free_throws_made: 0,
            free_throws_attempted: 0,
            ft_percentage: ZERO_PCT.to_string(),
            efficiency: 0,
            total_runs: 0,
            total_hits: 0,
            total_home_runs: 0,
            total_strikeouts: 0,
            total_walks: 0,
            total_errors: 0,
            total_rbi: 0,
            at_bats: 0,
            batting_average: ZERO_AVERAGE.to_string(),
            earned_runs: 0,
            innings_pitched: 0,
            era: ZERO_ERA.to_string(),
        }
    }
}

impl EmptyAnalytics {
    pub fn metrics(&self) -> Vec<Metric> {
        vec![
            Metric::count("totalPoints", "Points", self.total_points),
            Metric::count("totalGoals", "Goals", self.total_goals),
            Metric::count("totalRuns", "Runs", self.total_runs),
            Metric::count("totalAssists", "Assists", self.total_assists),
        ]
    }
}
