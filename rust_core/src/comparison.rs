//! Side-by-side comparison of home and away analytics.
//!
//! Comparative views draw both teams against one scale, so along with the
//! per-metric rows this computes a shared maximum across all count metrics.

use crate::analytics::{GameAnalytics, MetricKind};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub metric: &'static str,
    pub label: &'static str,
    pub kind: MetricKind,
    pub home: f64,
    pub away: f64,
    /// Home share of the combined value, 50 when both are zero.
    pub share_home_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub rows: Vec<ComparisonRow>,
    /// Largest count on either side; at least 1 so bars never divide by zero.
    pub shared_max: f64,
}

impl Comparison {
    pub fn row(&self, metric: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.metric == metric)
    }

    /// Bar length for a value on the shared scale, in `0.0..=1.0`.
    pub fn scaled(&self, value: f64) -> f64 {
        (value / self.shared_max).clamp(0.0, 1.0)
    }
}

/// Build comparison rows for every metric both sides expose, in the home
/// record's display order.
pub fn compare(analytics: &GameAnalytics) -> Comparison {
    let away_metrics = analytics.away.metrics();

    let rows: Vec<ComparisonRow> = analytics
        .home
        .metrics()
        .into_iter()
        .filter_map(|home| {
            let away = away_metrics.iter().find(|m| m.key == home.key)?;
            Some(ComparisonRow {
                metric: home.key,
                label: home.label,
                kind: home.kind,
                home: home.value,
                away: away.value,
                share_home_pct: home_share(home.value, away.value),
            })
        })
        .collect();

    let shared_max = rows
        .iter()
        .filter(|r| r.kind == MetricKind::Count)
        .flat_map(|r| [r.home, r.away])
        .fold(0.0_f64, f64::max)
        .max(1.0);

    Comparison { rows, shared_max }
}

fn home_share(home: f64, away: f64) -> f64 {
    let home = home.max(0.0);
    let away = away.max(0.0);
    let total = home + away;
    if total <= 0.0 {
        return 50.0;
    }
    home / total * 100.0
}
