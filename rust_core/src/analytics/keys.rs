//! Alias tables: every spelling each sport's stats may arrive under.
//!
//! Aliases of one key add together. Keys built with `or_else` fall back to
//! related stats, in listed order, when their own aliases count zero.

use super::normalizer::StatKey;

// Shared
pub const ASSIST: StatKey = StatKey::synonyms("assist", &["assist", "assists"]);
pub const FOUL: StatKey = StatKey::synonyms("foul", &["foul", "fouls"]);

// Football
pub const GOAL: StatKey = StatKey::synonyms("goal", &["goal", "goals"]);
pub const SHOT: StatKey =
    StatKey::synonyms("shot", &["shot", "shots"]).or_else(&[SHOT_ON_TARGET, SHOT_OFF_TARGET]);
pub const SHOT_ON_TARGET: StatKey =
    StatKey::synonyms("shot_on_target", &["shot_on_target", "shots_on_target"]);
pub const SHOT_OFF_TARGET: StatKey =
    StatKey::synonyms("shot_off_target", &["shot_off_target", "shots_off_target"]);
pub const PASS: StatKey = StatKey::synonyms("pass", &["pass", "passes"]);
pub const TACKLE: StatKey = StatKey::synonyms("tackle", &["tackle", "tackles"]);
pub const YELLOW_CARD: StatKey =
    StatKey::synonyms("yellow_card", &["yellow_card", "yellow_cards"]);
pub const RED_CARD: StatKey = StatKey::synonyms("red_card", &["red_card", "red_cards"]);
pub const CORNER: StatKey = StatKey::synonyms("corner", &["corner", "corners"]);
pub const OFFSIDE: StatKey = StatKey::synonyms("offside", &["offside", "offsides"]);

// Basketball
pub const POINT_2: StatKey = StatKey::synonyms("point_2", &["point_2", "two_point", "2_point"]);
pub const POINT_3: StatKey =
    StatKey::synonyms("point_3", &["point_3", "three_point", "3_point"]);
pub const FREE_THROW: StatKey = StatKey::synonyms(
    "free_throw",
    &["free_throw", "freethrow", "free_throw_made"],
);
pub const MISSED_SHOT: StatKey =
    StatKey::synonyms("missed_shot", &["missed_shot", "missed_field_goal"]);
pub const MISSED_THREE: StatKey = StatKey::synonyms(
    "missed_three",
    &["missed_three", "missed_3", "missed_three_point"],
);
pub const MISSED_FREE_THROW: StatKey =
    StatKey::synonyms("missed_free_throw", &["missed_free_throw", "missed_ft"]);
pub const REBOUND: StatKey = StatKey::synonyms("rebound", &["rebound", "rebounds"]);
pub const STEAL: StatKey = StatKey::synonyms("steal", &["steal", "steals"]);
pub const BLOCK: StatKey = StatKey::synonyms("block", &["block", "blocks"]);
pub const TURNOVER: StatKey = StatKey::synonyms("turnover", &["turnover", "turnovers"]);

// Baseball
pub const RUN: StatKey = StatKey::synonyms("run", &["run", "runs"]);
pub const HIT: StatKey = StatKey::synonyms("hit", &["hit", "hits"]);
pub const HOME_RUN: StatKey = StatKey::synonyms("home_run", &["home_run", "homerun"]);
pub const STRIKEOUT: StatKey = StatKey::synonyms("strikeout", &["strikeout", "strikeouts"]);
pub const WALK: StatKey = StatKey::synonyms("walk", &["walk", "walks"]);
pub const ERROR: StatKey = StatKey::synonyms("error", &["error", "errors"]);
pub const EARNED_RUN: StatKey = StatKey::synonyms("earned_run", &["earned_run", "earned_runs"]);

// Generic fallback
pub const GENERIC_SHOT: StatKey = StatKey::synonyms("shot", &["shot", "shots"]);
