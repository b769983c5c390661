//! Player-level breakdowns for one side of a game.

use crate::analytics::{normalize, validate, CountMap, StatItem, StatKey};
use crate::models::{EntityId, GameSnapshot, Side};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Normalized stats for a single player.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLine {
    pub player_id: EntityId,
    pub counts: CountMap,
    /// Already-computed rates (batting average, WHIP, ...), last write wins.
    pub rates: BTreeMap<String, f64>,
    pub total_events: f64,
}

impl PlayerLine {
    pub fn resolve(&self, key: &StatKey) -> f64 {
        key.resolve(&self.counts)
    }
}

/// Per-player lines for one side, busiest players first.
///
/// Records and events without a player id are left out. An unusable
/// snapshot yields no lines.
pub fn player_breakdown(snapshot: Option<&GameSnapshot>, side: Side) -> Vec<PlayerLine> {
    let valid = match validate(snapshot) {
        Ok(v) => v,
        Err(e) => {
            warn!("No player breakdown for {} side: {}", side, e);
            return Vec::new();
        }
    };
    let input = valid.side_input(side);

    // Player stats first, then events, so rate overrides keep input order.
    let mut groups: FxHashMap<&EntityId, Vec<StatItem<'_>>> = FxHashMap::default();
    for record in input.player_stats.iter().copied() {
        if let Some(player_id) = record.player_id.as_ref().filter(|id| !id.is_blank()) {
            groups
                .entry(player_id)
                .or_default()
                .push(StatItem::PlayerStat(record));
        }
    }
    for event in input.events.iter().copied() {
        if let Some(player_id) = event.player_id.as_ref().filter(|id| !id.is_blank()) {
            groups
                .entry(player_id)
                .or_default()
                .push(StatItem::Event(event));
        }
    }

    let mut lines: Vec<PlayerLine> = groups
        .into_iter()
        .map(|(player_id, items)| {
            let tally = normalize(items);
            let total_events = tally.total();
            PlayerLine {
                player_id: player_id.clone(),
                counts: tally.counts,
                rates: tally.rates,
                total_events,
            }
        })
        .collect();

    lines.sort_by(|a, b| {
        b.total_events
            .total_cmp(&a.total_events)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    lines
}

/// Top `n` players on one stat, highest first. Players with none of the
/// stat are left out.
pub fn top_performers<'a>(
    lines: &'a [PlayerLine],
    key: &StatKey,
    n: usize,
) -> Vec<(&'a EntityId, f64)> {
    let mut ranked: Vec<(&EntityId, f64)> = lines
        .iter()
        .map(|line| (&line.player_id, line.resolve(key)))
        .filter(|(_, value)| *value > 0.0)
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(n);
    ranked
}
