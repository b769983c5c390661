//! Display formatting for rates. Zero denominators always produce the
//! documented zero string, never NaN or Infinity.

/// Zero percentage for any empty denominator.
pub const ZERO_PCT: &str = "0%";

/// Batting average with no at-bats.
pub const ZERO_AVERAGE: &str = ".000";

/// Whole-number percentage of `part / whole`, e.g. `"67%"`.
pub fn whole_percentage(part: f64, whole: f64) -> String {
    if whole <= 0.0 || !whole.is_finite() {
        return ZERO_PCT.to_string();
    }
    percent_label(part / whole * 100.0)
}

/// Renders an already-computed percentage value, rounded to a whole number.
pub fn percent_label(value: f64) -> String {
    if !value.is_finite() {
        return ZERO_PCT.to_string();
    }
    format!("{}%", value.round() as i64)
}

/// One-decimal shooting percentage, e.g. `"45.5%"`; `"0%"` with no attempts.
pub fn shooting_percentage(made: f64, attempted: f64) -> String {
    if attempted <= 0.0 || !attempted.is_finite() {
        return ZERO_PCT.to_string();
    }
    format!("{:.1}%", made / attempted * 100.0)
}

/// Three-decimal average with the leading zero stripped: `".300"`.
pub fn batting_average(hits: f64, at_bats: f64) -> String {
    if at_bats <= 0.0 || !at_bats.is_finite() {
        return ZERO_AVERAGE.to_string();
    }
    let formatted = format!("{:.3}", hits / at_bats);
    match formatted.strip_prefix('0') {
        Some(rest) => rest.to_string(),
        None => formatted,
    }
}

/// Numeric value of a formatted percentage or average (`"45.5%"`, `".300"`).
pub fn parse_rate(formatted: &str) -> Option<f64> {
    formatted
        .trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Saturating conversion of an accumulated count to a display total.
pub fn to_total(count: f64) -> u32 {
    if !count.is_finite() || count <= 0.0 {
        return 0;
    }
    count.floor() as u32
}
