//! Event normalizer.
//!
//! Reduces a mixed list of game events and player-stat records into a single
//! count-by-key tally. Counts are plain sums, so the order of the input never
//! changes the result.

use crate::models::{value_as_f64, GameEvent, PlayerStatRecord, RateGroup};
use std::collections::BTreeMap;

/// Event key -> accumulated count.
pub type CountMap = BTreeMap<String, f64>;

/// One stat-bearing input item.
#[derive(Debug, Clone, Copy)]
pub enum StatItem<'a> {
    Event(&'a GameEvent),
    PlayerStat(&'a PlayerStatRecord),
}

impl<'a> StatItem<'a> {
    /// Canonical key, tried in order: `eventType`, `type`, `statType`, `name`.
    pub fn key(&self) -> Option<&'a str> {
        let candidates = match *self {
            StatItem::Event(e) => [&e.event_type, &e.kind, &e.stat_type, &e.name],
            StatItem::PlayerStat(r) => [&r.event_type, &r.kind, &r.stat_type, &r.name],
        };
        first_key(&candidates)
    }

    fn nested_events(&self) -> &'a [GameEvent] {
        match *self {
            StatItem::Event(_) => &[],
            StatItem::PlayerStat(r) => &r.events,
        }
    }

    fn rate_groups(&self) -> [Option<&'a RateGroup>; 3] {
        match *self {
            StatItem::Event(_) => [None, None, None],
            StatItem::PlayerStat(r) => [
                r.batting.as_ref(),
                r.pitching.as_ref(),
                r.fielding.as_ref(),
            ],
        }
    }
}

/// Nested events only carry `eventType` or `type`.
fn nested_key(event: &GameEvent) -> Option<&str> {
    first_key(&[&event.event_type, &event.kind])
}

fn first_key<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|c| (*c).as_deref())
        .map(str::trim)
        .find(|k| !k.is_empty())
}

/// A concept (e.g. "two-pointer") and every key it may appear under.
///
/// Aliases are spellings of the same stat, so their counts add up. When they
/// all count zero, `fallbacks` are tried in order and the first non-zero one
/// wins.
#[derive(Debug, Clone, Copy)]
pub struct StatKey {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub fallbacks: &'static [StatKey],
}

impl StatKey {
    pub const fn synonyms(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self {
            name,
            aliases,
            fallbacks: &[],
        }
    }

    pub const fn or_else(self, fallbacks: &'static [StatKey]) -> Self {
        Self {
            name: self.name,
            aliases: self.aliases,
            fallbacks,
        }
    }

    pub fn resolve(&self, counts: &CountMap) -> f64 {
        let own: f64 = self
            .aliases
            .iter()
            .map(|alias| counts.get(*alias).copied().unwrap_or(0.0))
            .sum();
        if own > 0.0 {
            return own;
        }
        self.fallbacks
            .iter()
            .map(|key| key.resolve(counts))
            .find(|v| *v > 0.0)
            .unwrap_or(0.0)
    }
}

/// Output of [`normalize`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatTally {
    /// Discrete events and positive pre-aggregated stats, summed.
    pub counts: CountMap,
    /// Already-computed rates from batting/pitching/fielding groups.
    /// Last record in input order wins; never summed.
    pub rates: BTreeMap<String, f64>,
}

impl StatTally {
    pub fn count(&self, key: &str) -> f64 {
        self.counts.get(key).copied().unwrap_or(0.0)
    }

    pub fn resolve(&self, key: &StatKey) -> f64 {
        key.resolve(&self.counts)
    }

    /// Sum of every counted key.
    pub fn total(&self) -> f64 {
        self.counts.values().sum()
    }

    pub fn rate(&self, key: &str) -> Option<f64> {
        self.rates.get(key).copied()
    }

    fn add(&mut self, key: &str, amount: f64) {
        *self.counts.entry(key.to_string()).or_insert(0.0) += amount;
    }
}

/// Flatten stat items into one tally. Items with no usable key add nothing.
pub fn normalize<'a, I>(items: I) -> StatTally
where
    I: IntoIterator<Item = StatItem<'a>>,
{
    let mut tally = StatTally::default();

    for item in items {
        if let Some(key) = item.key() {
            tally.add(key, 1.0);
        }

        for event in item.nested_events() {
            if let Some(key) = nested_key(event) {
                tally.add(key, 1.0);
            }
        }

        if let StatItem::PlayerStat(record) = item {
            for (key, value) in &record.stats {
                match value_as_f64(value) {
                    Some(amount) if amount > 0.0 => tally.add(key, amount),
                    _ => {}
                }
            }
        }

        for group in item.rate_groups().into_iter().flatten() {
            for (key, value) in group {
                if let Some(rate) = value_as_f64(value) {
                    tally.rates.insert(key.clone(), rate);
                }
            }
        }
    }

    tally
}
