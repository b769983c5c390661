//! Baseball team analytics.

use super::format::{batting_average, to_total};
use super::keys;
use super::{AggregationInput, Metric, SportAggregator, TeamAnalytics};
use serde::Serialize;

/// RBIs are estimated from runs scored; no RBI event is counted.
pub const RBI_ESTIMATE_RATIO: f64 = 0.8;

/// At-bats are estimated as at least this many per hit.
pub const AT_BAT_HIT_MULTIPLIER: f64 = 3.0;

// TODO: replace with values derived from pitching events once the live feed
// tracks outs per pitcher and earned-run attribution.
pub const PLACEHOLDER_ERA: &str = "3.50";
pub const PLACEHOLDER_INNINGS_PITCHED: u32 = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseballAnalytics {
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

impl BaseballAnalytics {
    pub fn metrics(&self) -> Vec<Metric> {
        vec![
            Metric::count("totalRuns", "Runs", self.total_runs),
            Metric::count("totalHits", "Hits", self.total_hits),
            Metric::count("totalHomeRuns", "Home Runs", self.total_home_runs),
            Metric::count("totalRBI", "RBI", self.total_rbi),
            Metric::count("totalStrikeouts", "Strikeouts", self.total_strikeouts),
            Metric::count("totalWalks", "Walks", self.total_walks),
            Metric::count("totalErrors", "Errors", self.total_errors),
            Metric::rate("battingAverage", "AVG", &self.batting_average),
        ]
    }
}

/// Estimated at-bats: hits plus strikeouts, but never under three per hit.
fn estimated_at_bats(hits: f64, strikeouts: f64) -> f64 {
    (hits + strikeouts).max(hits * AT_BAT_HIT_MULTIPLIER)
}

pub struct BaseballAggregator;

impl SportAggregator for BaseballAggregator {
    fn aggregate(&self, input: &AggregationInput<'_>) -> TeamAnalytics {
        let tally = input.tally();

        let total_runs = input.team_score.unwrap_or_else(|| tally.resolve(&keys::RUN));
        let hits = tally.resolve(&keys::HIT);
        let strikeouts = tally.resolve(&keys::STRIKEOUT);
        let at_bats = estimated_at_bats(hits, strikeouts);

        TeamAnalytics::Baseball(BaseballAnalytics {
            total_runs: to_total(total_runs),
            total_hits: to_total(hits),
            total_home_runs: to_total(tally.resolve(&keys::HOME_RUN)),
            total_strikeouts: to_total(strikeouts),
            total_walks: to_total(tally.resolve(&keys::WALK)),
            total_errors: to_total(tally.resolve(&keys::ERROR)),
            total_rbi: to_total((total_runs * RBI_ESTIMATE_RATIO).floor()),
            at_bats: to_total(at_bats),
            batting_average: batting_average(hits, at_bats),
            earned_runs: to_total(tally.resolve(&keys::EARNED_RUN)),
            innings_pitched: PLACEHOLDER_INNINGS_PITCHED,
            era: PLACEHOLDER_ERA.to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "baseball"
    }
}
