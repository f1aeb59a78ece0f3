//! Battle-log records as reported by the upstream game API.
//!
//! Every field is optional. Defaults are applied in the accessor methods so
//! the aggregation code never has to reach into nested options itself.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::lenient::{lenient, lenient_items};
use super::PlayerTag;

/// Label used when a battle has no mode or map.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Outcome of a single battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleResult {
    Victory,
    Defeat,
    Draw,
    /// Any value the upstream API sends that we don't recognise
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for BattleResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattleResult::Victory => write!(f, "victory"),
            BattleResult::Defeat => write!(f, "defeat"),
            BattleResult::Draw => write!(f, "draw"),
            BattleResult::Unknown => write!(f, "unknown"),
        }
    }
}

/// Brawler played by a participant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticipantBrawler {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub power: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub trophies: Option<i64>,
}

/// One player in a battle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default, deserialize_with = "lenient")]
    pub tag: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub brawler: Option<ParticipantBrawler>,
}

impl Participant {
    pub fn brawler_id(&self) -> Option<i64> {
        self.brawler.as_ref().and_then(|b| b.id)
    }
}

/// Event (mode + map rotation slot) a battle was played in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleEvent {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub mode: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub map: Option<String>,
}

/// Battle details.
///
/// Each field falls back to `None` on its own when its value is malformed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleDetail {
    #[serde(default, deserialize_with = "lenient")]
    pub mode: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub result: Option<BattleResult>,
    #[serde(default, deserialize_with = "lenient")]
    pub duration: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub trophy_change: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub star_player: Option<Participant>,
    #[serde(default, deserialize_with = "lenient_participant_teams")]
    pub teams: Option<Vec<Vec<Participant>>>,
    #[serde(default, deserialize_with = "lenient_participants")]
    pub players: Option<Vec<Participant>>,
}

/// One played match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRecord {
    /// Compact timestamp, `YYYYMMDDTHHMMSS.sssZ`
    #[serde(default, deserialize_with = "lenient")]
    pub battle_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub event: Option<BattleEvent>,
    #[serde(default, deserialize_with = "lenient")]
    pub battle: Option<BattleDetail>,
}

/// Flat participant list; a malformed entry is kept as an empty participant.
fn lenient_participants<'de, D>(deserializer: D) -> Result<Option<Vec<Participant>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Option<Vec<Value>> = lenient(deserializer)?;
    Ok(values.map(|values| {
        values
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap_or_default())
            .collect()
    }))
}

fn lenient_participant_teams<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<Vec<Participant>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let teams: Option<Vec<Value>> = lenient(deserializer)?;
    Ok(teams.map(|teams| {
        teams
            .into_iter()
            .map(|team| match team {
                Value::Array(members) => members
                    .into_iter()
                    .map(|v| serde_json::from_value(v).unwrap_or_default())
                    .collect(),
                _ => Vec::new(),
            })
            .collect()
    }))
}

fn non_empty(s: Option<&String>) -> Option<&str> {
    s.map(|s| s.as_str()).filter(|s| !s.trim().is_empty())
}

fn hour_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"T(\d{2})").expect("hour pattern is valid"))
}

impl BattleRecord {
    /// Mode label: `battle.mode`, then `event.mode`, then `"unknown"`.
    pub fn mode(&self) -> &str {
        non_empty(self.battle.as_ref().and_then(|b| b.mode.as_ref()))
            .or_else(|| non_empty(self.event.as_ref().and_then(|e| e.mode.as_ref())))
            .unwrap_or(UNKNOWN_LABEL)
    }

    /// Map label from `event.map`, defaulting to `"unknown"`.
    pub fn map_name(&self) -> &str {
        non_empty(self.event.as_ref().and_then(|e| e.map.as_ref())).unwrap_or(UNKNOWN_LABEL)
    }

    /// Decided outcome. Missing or unrecognised results are `None`.
    pub fn result(&self) -> Option<BattleResult> {
        self.battle
            .as_ref()
            .and_then(|b| b.result)
            .filter(|r| *r != BattleResult::Unknown)
    }

    pub fn is_victory(&self) -> bool {
        self.result() == Some(BattleResult::Victory)
    }

    /// Signed trophy delta, 0 when absent.
    pub fn trophy_change(&self) -> i64 {
        self.battle
            .as_ref()
            .and_then(|b| b.trophy_change)
            .unwrap_or(0)
    }

    pub fn duration(&self) -> Option<u32> {
        self.battle.as_ref().and_then(|b| b.duration)
    }

    /// Participants: flattened teams if any, otherwise the flat player list.
    pub fn participants(&self) -> Vec<&Participant> {
        let Some(battle) = self.battle.as_ref() else {
            return Vec::new();
        };

        let teams: Vec<&Participant> = battle
            .teams
            .iter()
            .flatten()
            .flatten()
            .collect();
        if !teams.is_empty() {
            return teams;
        }

        battle.players.iter().flatten().collect()
    }

    /// First participant whose tag matches `tag`.
    pub fn find_participant(&self, tag: &PlayerTag) -> Option<&Participant> {
        self.participants()
            .into_iter()
            .find(|p| p.tag.as_deref().is_some_and(|t| tag.matches(t)))
    }

    /// Parsed battle time, `None` when absent or malformed.
    pub fn played_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.battle_time.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }

        NaiveDateTime::parse_from_str(raw, "%Y%m%dT%H%M%S%.fZ")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y%m%dT%H%M%SZ"))
            .map(|naive| naive.and_utc())
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            })
    }

    /// Epoch milliseconds used for ordering; unparsable times sort as 0.
    pub fn sort_key(&self) -> i64 {
        self.played_at().map(|t| t.timestamp_millis()).unwrap_or(0)
    }

    /// Hour of day taken from the two digits after `T` in the raw timestamp.
    pub fn hour(&self) -> Option<u32> {
        let raw = self.battle_time.as_deref()?;
        let caps = hour_regex().captures(raw)?;
        let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
        (hour < 24).then_some(hour)
    }
}

/// Battle-log payload (`{ "items": [...] }`).
///
/// Malformed fields are reset individually; an item that is not an object at
/// all is kept as an empty record so it still counts toward totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleLog {
    #[serde(deserialize_with = "lenient_items")]
    pub items: Vec<BattleRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use serde_json::json;

    fn record(value: serde_json::Value) -> BattleRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_mode_prefers_battle_mode() {
        let r = record(json!({
            "battle": { "mode": "gemGrab" },
            "event": { "mode": "brawlBall" }
        }));
        assert_eq!(r.mode(), "gemGrab");
    }

    #[test]
    fn test_mode_falls_back_to_event_then_unknown() {
        let r = record(json!({ "battle": { "mode": "" }, "event": { "mode": "heist" } }));
        assert_eq!(r.mode(), "heist");

        let r = record(json!({}));
        assert_eq!(r.mode(), UNKNOWN_LABEL);
        assert_eq!(r.map_name(), UNKNOWN_LABEL);
    }

    #[test]
    fn test_unknown_result_is_indeterminate() {
        let r = record(json!({ "battle": { "result": "abandoned" } }));
        assert_eq!(r.result(), None);

        let r = record(json!({ "battle": { "result": "victory" } }));
        assert!(r.is_victory());
    }

    #[test]
    fn test_trophy_change_defaults_to_zero() {
        assert_eq!(record(json!({ "battle": {} })).trophy_change(), 0);
        assert_eq!(
            record(json!({ "battle": { "trophyChange": -7 } })).trophy_change(),
            -7
        );
    }

    #[test]
    fn test_participants_prefers_teams() {
        let r = record(json!({
            "battle": {
                "teams": [[{ "tag": "#A" }, { "tag": "#B" }], [{ "tag": "#C" }]],
                "players": [{ "tag": "#Z" }]
            }
        }));
        let tags: Vec<_> = r
            .participants()
            .iter()
            .map(|p| p.tag.clone().unwrap())
            .collect();
        assert_eq!(tags, vec!["#A", "#B", "#C"]);
    }

    #[test]
    fn test_participants_falls_back_to_players() {
        let r = record(json!({
            "battle": { "teams": [], "players": [{ "tag": "#Z" }] }
        }));
        assert_eq!(r.participants().len(), 1);
    }

    #[test]
    fn test_played_at_compact_format() {
        let r = record(json!({ "battleTime": "20240101T134500.000Z" }));
        let t = r.played_at().unwrap();
        assert_eq!(t.hour(), 13);
        assert_eq!(t.minute(), 45);
    }

    #[test]
    fn test_played_at_malformed() {
        let r = record(json!({ "battleTime": "yesterday" }));
        assert!(r.played_at().is_none());
        assert_eq!(r.sort_key(), 0);
    }

    #[test]
    fn test_hour_from_raw_string() {
        let r = record(json!({ "battleTime": "20240101T070000.000Z" }));
        assert_eq!(r.hour(), Some(7));

        let r = record(json!({ "battleTime": "garbage" }));
        assert_eq!(r.hour(), None);

        let r = record(json!({}));
        assert_eq!(r.hour(), None);
    }

    #[test]
    fn test_malformed_fields_keep_the_rest_of_the_battle() {
        let log: BattleLog = serde_json::from_value(json!({
            "items": [
                {
                    "battleTime": "20240101T100000.000Z",
                    "event": { "mode": "gemGrab", "map": "Hard Rock Mine" },
                    "battle": { "result": "victory", "trophyChange": 8, "duration": -1 }
                },
                {
                    "battleTime": "20240101T110000.000Z",
                    "event": { "mode": "gemGrab", "map": 12 },
                    "battle": { "result": "victory", "trophyChange": 7, "duration": 95.5 }
                },
                {
                    "battleTime": "20240101T120000.000Z",
                    "battle": {
                        "result": 3, "trophyChange": "lots", "duration": "long",
                        "teams": [[{ "tag": "#ME", "brawler": { "id": "x" } }], "bad"]
                    }
                },
                "not a battle"
            ]
        }))
        .unwrap();

        assert_eq!(log.items.len(), 4);

        let first = &log.items[0];
        assert!(first.is_victory());
        assert_eq!(first.trophy_change(), 8);
        assert_eq!(first.duration(), None);
        assert_eq!(first.mode(), "gemGrab");
        assert_eq!(first.hour(), Some(10));

        let second = &log.items[1];
        assert!(second.is_victory());
        assert_eq!(second.trophy_change(), 7);
        assert_eq!(second.map_name(), UNKNOWN_LABEL);

        let third = &log.items[2];
        assert_eq!(third.result(), None);
        assert_eq!(third.trophy_change(), 0);
        assert_eq!(third.participants().len(), 1);
        assert_eq!(third.participants()[0].brawler_id(), None);
        assert_eq!(third.hour(), Some(12));

        assert!(log.items[3].played_at().is_none());
    }

    #[test]
    fn test_battle_log_requires_items() {
        assert!(serde_json::from_value::<BattleLog>(json!({})).is_err());
    }
}
