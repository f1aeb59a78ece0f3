//! Player profiles and the brawler catalog.

use serde::{Deserialize, Serialize};

use super::lenient::{lenient, lenient_items, lenient_or_default};
use super::PlayerTag;

/// A star power, gadget or gear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub name: String,
}

/// One playable character definition from the upstream catalog.
///
/// Kept loose on purpose: the catalog carries placeholder and test entries,
/// which the completion calculator filters out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogBrawler {
    /// Usually a number, occasionally a numeric string
    pub id: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub released: Option<bool>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub star_powers: Vec<Item>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub gadgets: Vec<Item>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub gears: Vec<Item>,
}

impl CatalogBrawler {
    /// Numeric ID, if the raw value is an integer or an integer string.
    pub fn numeric_id(&self) -> Option<i64> {
        match self.id.as_ref()? {
            serde_json::Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// Catalog payload (`{ "items": [...] }`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrawlerCatalog {
    #[serde(default, deserialize_with = "lenient_items")]
    pub items: Vec<CatalogBrawler>,
}

/// A player's ownership record for one brawler.
///
/// A null or mistyped field resets to its default without touching the
/// others.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerBrawler {
    #[serde(deserialize_with = "lenient_or_default")]
    pub id: i64,
    #[serde(deserialize_with = "lenient_or_default")]
    pub name: String,
    /// Progression level, 1..=11
    #[serde(deserialize_with = "lenient_or_default")]
    pub power: u32,
    #[serde(deserialize_with = "lenient_or_default")]
    pub rank: u32,
    #[serde(deserialize_with = "lenient_or_default")]
    pub trophies: i64,
    #[serde(deserialize_with = "lenient_or_default")]
    pub highest_trophies: i64,
    #[serde(deserialize_with = "lenient_items")]
    pub star_powers: Vec<Item>,
    #[serde(deserialize_with = "lenient_items")]
    pub gadgets: Vec<Item>,
    #[serde(deserialize_with = "lenient_items")]
    pub gears: Vec<Item>,
}

/// Club membership summary. Clubless players come back as `"club": {}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClubRef {
    #[serde(deserialize_with = "lenient_or_default")]
    pub tag: String,
    #[serde(deserialize_with = "lenient_or_default")]
    pub name: String,
}

impl ClubRef {
    pub fn is_empty(&self) -> bool {
        self.tag.trim().is_empty() && self.name.trim().is_empty()
    }
}

/// A player profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Player {
    #[serde(deserialize_with = "lenient_or_default")]
    pub tag: String,
    #[serde(deserialize_with = "lenient_or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient_or_default")]
    pub trophies: i64,
    #[serde(deserialize_with = "lenient_or_default")]
    pub highest_trophies: i64,
    #[serde(deserialize_with = "lenient_or_default")]
    pub exp_level: u32,
    #[serde(deserialize_with = "lenient_or_default")]
    pub exp_points: u64,
    #[serde(rename = "3vs3Victories", deserialize_with = "lenient_or_default")]
    pub three_vs_three_victories: u64,
    #[serde(deserialize_with = "lenient_or_default")]
    pub solo_victories: u64,
    #[serde(deserialize_with = "lenient_or_default")]
    pub duo_victories: u64,
    #[serde(deserialize_with = "lenient")]
    pub club: Option<ClubRef>,
    #[serde(deserialize_with = "lenient_items")]
    pub brawlers: Vec<PlayerBrawler>,
}

impl Player {
    pub fn player_tag(&self) -> PlayerTag {
        PlayerTag::new(&self.tag)
    }

    pub fn brawler(&self, id: i64) -> Option<&PlayerBrawler> {
        self.brawlers.iter().find(|b| b.id == id)
    }

    /// Club name, `None` for clubless players.
    pub fn club_name(&self) -> Option<&str> {
        self.club
            .as_ref()
            .filter(|c| !c.is_empty())
            .map(|c| c.name.as_str())
    }
}
