// Shared models for Sideline live games
use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

// ============================================================================
// Sport & Status Enums
// ============================================================================

/// Sport of a game, matched case-sensitively against the wire string.
///
/// Anything that isn't one of the three tracked sports lands in `Other`
/// and is aggregated by the generic fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sport {
    Football,
    Basketball,
    Baseball,
    Other(String),
}

impl Sport {
    pub fn as_str(&self) -> &str {
        match self {
            Sport::Football => "Football",
            Sport::Basketball => "Basketball",
            Sport::Baseball => "Baseball",
            Sport::Other(name) => name,
        }
    }
}

impl From<&str> for Sport {
    fn from(raw: &str) -> Self {
        match raw {
            "Football" => Sport::Football,
            "Basketball" => Sport::Basketball,
            "Baseball" => Sport::Baseball,
            other => Sport::Other(other.to_string()),
        }
    }
}

impl From<String> for Sport {
    fn from(raw: String) -> Self {
        Sport::from(raw.as_str())
    }
}

impl From<Sport> for String {
    fn from(sport: Sport) -> Self {
        sport.as_str().to_string()
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Scheduled,
    Live,
    Finished,
    #[serde(other)]
    Unknown,
}

/// Which side of the scoreboard a team sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Identifiers
// ============================================================================

/// Team or player identifier. Backends send these as strings or numbers;
/// both are kept as their string form so comparisons line up.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Unsigned(u64),
            Signed(i64),
            Float(f64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => EntityId(s),
            RawId::Unsigned(n) => EntityId(n.to_string()),
            RawId::Signed(n) => EntityId(n.to_string()),
            RawId::Float(n) => EntityId(n.to_string()),
        })
    }
}

// ============================================================================
// Game Snapshot
// ============================================================================

/// Full game snapshot as handed over by the game-data store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSnapshot {
    pub base: Option<GameBase>,
    pub sport: Option<SportDocument>,
}

impl GameSnapshot {
    /// Sport of the game; a missing value routes to the generic fallback.
    pub fn sport_kind(&self) -> Sport {
        self.base
            .as_ref()
            .and_then(|b| b.sport.clone())
            .unwrap_or_else(|| Sport::Other(String::new()))
    }

    pub fn team_id(&self, side: Side) -> Option<&EntityId> {
        let base = self.base.as_ref()?;
        let id = match side {
            Side::Home => base.team_id.as_ref(),
            Side::Away => base.opponent_team_id.as_ref(),
        }?;
        (!id.is_blank()).then_some(id)
    }

    /// Authoritative score for one side, if the scoreboard has it.
    pub fn score_for(&self, side: Side) -> Option<f64> {
        let score = self.sport.as_ref()?.score.as_ref()?;
        match side {
            Side::Home => score.home,
            Side::Away => score.away,
        }
    }

    pub fn events(&self) -> &[GameEvent] {
        self.sport
            .as_ref()
            .and_then(|s| s.events.as_deref())
            .unwrap_or(&[])
    }

    pub fn player_stats(&self) -> &[PlayerStatRecord] {
        self.sport
            .as_ref()
            .and_then(|s| s.player_stats.as_deref())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameBase {
    #[serde(deserialize_with = "lenient_sport")]
    pub sport: Option<Sport>,
    #[serde(deserialize_with = "lenient")]
    pub team_id: Option<EntityId>,
    #[serde(deserialize_with = "lenient")]
    pub opponent_team_id: Option<EntityId>,
    #[serde(deserialize_with = "lenient")]
    pub status: Option<GameStatus>,
}

/// Sport-specific sub-document: score, events and player stats.
///
/// Items in `events` and `playerStats` that fail to parse are dropped one by
/// one; the rest of the list still counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SportDocument {
    #[serde(deserialize_with = "lenient")]
    pub score: Option<Score>,
    #[serde(deserialize_with = "lenient_list")]
    pub events: Option<Vec<GameEvent>>,
    #[serde(deserialize_with = "lenient_list")]
    pub player_stats: Option<Vec<PlayerStatRecord>>,
    #[serde(deserialize_with = "lenient_count")]
    pub current_period: Option<u32>,
    #[serde(deserialize_with = "lenient_count")]
    pub current_quarter: Option<u32>,
    #[serde(deserialize_with = "lenient_count")]
    pub current_inning: Option<u32>,
    pub match_config: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Score {
    #[serde(deserialize_with = "lenient_number")]
    pub home: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub away: Option<f64>,
}

// ============================================================================
// Events & Player Stats
// ============================================================================

/// A single game event. Only the key fields matter for aggregation; the
/// sport-specific fields ride along for display.
///
/// Every field reads leniently: a value of the wrong type reads as absent
/// instead of failing the whole snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameEvent {
    #[serde(deserialize_with = "lenient_key")]
    pub event_type: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient_key")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient_key")]
    pub stat_type: Option<String>,
    #[serde(deserialize_with = "lenient_key")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub team_id: Option<EntityId>,
    #[serde(deserialize_with = "lenient")]
    pub player_id: Option<EntityId>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,

    // Sport-specific
    #[serde(deserialize_with = "lenient_number")]
    pub minute: Option<f64>,
    #[serde(deserialize_with = "lenient_count")]
    pub quarter: Option<u32>,
    #[serde(deserialize_with = "lenient_count")]
    pub period: Option<u32>,
    #[serde(deserialize_with = "lenient_count")]
    pub inning: Option<u32>,
    #[serde(deserialize_with = "lenient_number")]
    pub points: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub runs: Option<f64>,
    #[serde(deserialize_with = "lenient_count")]
    pub outs: Option<u32>,
    pub bases_before: Option<Value>,
    pub bases_after: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GameEvent {
    /// Convenience constructor used by live ingestion and tests.
    pub fn new(event_type: &str, team_id: &str) -> Self {
        Self {
            event_type: Some(event_type.to_string()),
            team_id: Some(EntityId::from(team_id)),
            ..Default::default()
        }
    }

    pub fn with_player(mut self, player_id: &str) -> Self {
        self.player_id = Some(EntityId::from(player_id));
        self
    }
}

/// Named, already-computed rates (`battingAverage`, `whip`, ...).
pub type RateGroup = Map<String, Value>;

/// Player-level stat record. May carry a single key like an event, a list
/// of embedded raw events, pre-aggregated `stats`, or baseball rate groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerStatRecord {
    #[serde(deserialize_with = "lenient_key")]
    pub event_type: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient_key")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient_key")]
    pub stat_type: Option<String>,
    #[serde(deserialize_with = "lenient_key")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub team_id: Option<EntityId>,
    #[serde(deserialize_with = "lenient")]
    pub player_id: Option<EntityId>,
    #[serde(deserialize_with = "lenient_vec")]
    pub events: Vec<GameEvent>,
    #[serde(deserialize_with = "lenient_map")]
    pub stats: Map<String, Value>,
    #[serde(deserialize_with = "lenient")]
    pub batting: Option<RateGroup>,
    #[serde(deserialize_with = "lenient")]
    pub pitching: Option<RateGroup>,
    #[serde(deserialize_with = "lenient")]
    pub fielding: Option<RateGroup>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlayerStatRecord {
    pub fn new(team_id: &str, player_id: &str) -> Self {
        Self {
            team_id: Some(EntityId::from(team_id)),
            player_id: Some(EntityId::from(player_id)),
            ..Default::default()
        }
    }

    pub fn with_stat(mut self, key: &str, value: f64) -> Self {
        self.stats.insert(key.to_string(), Value::from(value));
        self
    }

    pub fn with_event(mut self, event_type: &str) -> Self {
        self.events.push(GameEvent {
            event_type: Some(event_type.to_string()),
            ..Default::default()
        });
        self
    }
}

// ============================================================================
// Lenient deserializers
// ============================================================================

/// Any value that doesn't fit `T` reads as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Event keys arrive as strings, occasionally as numeric codes.
fn lenient_key<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_sport<'de, D>(deserializer: D) -> Result<Option<Sport>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_key(deserializer)?.map(Sport::from))
}

/// Whole, non-negative numbers (`2`, `2.0`, `"2"`); `"Q2"` reads as absent.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let n = value.as_ref().and_then(value_as_f64);
    Ok(n.filter(|n| is_count(*n)).map(|n| n as u32))
}

fn is_count(n: f64) -> bool {
    n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&n)
}

/// Array of items, dropping the ones that fail to parse. Anything other
/// than an array reads as absent.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(Value::Array(items)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let total = items.len();
    let parsed: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if parsed.len() < total {
        debug!("Dropped {} malformed item(s)", total - parsed.len());
    }
    Ok(Some(parsed))
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(lenient_list(deserializer)?.unwrap_or_default())
}

fn lenient_map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    })
}

/// Accepts a JSON number or a numeric string; anything else reads as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_f64))
}

/// RFC 3339 strings or epoch milliseconds; malformed values read as absent.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    })
}

/// Numeric view of a JSON value, finite numbers only.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}
