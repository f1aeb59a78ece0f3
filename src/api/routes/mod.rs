pub mod compare;
pub mod health;
pub mod players;

use crate::api::state::AppState;
use crate::fetch::catalog_or_empty;
use crate::models::CatalogBrawler;

pub(crate) async fn load_catalog(state: &AppState) -> Vec<CatalogBrawler> {
    catalog_or_empty(state.api.brawlers().await)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use crate::api::state::AppState;
    use crate::config::AppConfig;
    use crate::fetch::mock::MockGameApi;
    use crate::models::{BattleLog, BrawlerCatalog, Player};

    pub async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    pub fn state_with(api: MockGameApi) -> AppState {
        AppState {
            api: Arc::new(api),
            config: Arc::new(AppConfig::default()),
        }
    }

    pub fn catalog() -> BrawlerCatalog {
        serde_json::from_value(json!({
            "items": [
                {
                    "id": 16000000, "name": "SHELLY",
                    "starPowers": [{ "id": 23000076, "name": "Shell Shock" }, { "id": 23000135, "name": "Band-Aid" }],
                    "gadgets": [{ "id": 23000255, "name": "Fast Forward" }]
                },
                {
                    "id": 16000001, "name": "COLT",
                    "starPowers": [{ "id": 23000077, "name": "Slick Boots" }, { "id": 23000138, "name": "Magnum Special" }],
                    "gadgets": [{ "id": 23000273, "name": "Speedloader" }]
                },
                {
                    "id": 16000002, "name": "BULL",
                    "starPowers": [{ "id": 23000078, "name": "Berserker" }, { "id": 23000137, "name": "Tough Guy" }],
                    "gadgets": [{ "id": 23000272, "name": "T-Bone Injector" }]
                },
                { "id": 16000099, "name": "TRAINING BOSS", "starPowers": [{ "id": 1, "name": "x" }] }
            ]
        }))
        .unwrap()
    }

    pub fn player(tag: &str, trophies: i64) -> Player {
        serde_json::from_value(json!({
            "tag": format!("#{}", tag),
            "name": format!("Player {}", tag),
            "trophies": trophies,
            "highestTrophies": trophies + 1000,
            "expLevel": 120,
            "3vs3Victories": trophies / 10,
            "club": { "tag": "#CLUB", "name": "Night Owls" },
            "brawlers": [
                {
                    "id": 16000000, "name": "SHELLY", "power": 11, "rank": 25,
                    "trophies": trophies / 20, "highestTrophies": 800,
                    "starPowers": [{ "id": 23000076, "name": "Shell Shock" }],
                    "gadgets": [{ "id": 23000255, "name": "Fast Forward" }],
                    "gears": [{ "id": 62000000, "name": "Speed" }]
                },
                {
                    "id": 16000001, "name": "COLT", "power": 9, "rank": 20,
                    "trophies": trophies / 40, "highestTrophies": 500,
                    "starPowers": [{ "id": 23000077, "name": "Slick Boots" }, { "id": 23000138, "name": "Magnum Special" }],
                    "gadgets": [], "gears": []
                }
            ]
        }))
        .unwrap()
    }

    /// Three battles: two gemGrab (W, L) and one brawlBall (W), all played
    /// by `tag` on SHELLY, supplied newest first.
    pub fn battle_log(tag: &str) -> BattleLog {
        let me = |id: i64| json!({ "tag": format!("#{}", tag), "name": "me", "brawler": { "id": id, "name": "B" } });
        let foe = json!({ "tag": "#FOE", "name": "foe", "brawler": { "id": 16000002, "name": "BULL" } });
        serde_json::from_value(json!({
            "items": [
                {
                    "battleTime": "20240101T120000.000Z",
                    "event": { "id": 1, "mode": "brawlBall", "map": "Super Beach" },
                    "battle": { "mode": "brawlBall", "result": "victory", "duration": 95, "trophyChange": 8,
                                "teams": [[me(16000000)], [foe.clone()]] }
                },
                {
                    "battleTime": "20240101T110000.000Z",
                    "event": { "id": 2, "mode": "gemGrab", "map": "Hard Rock Mine" },
                    "battle": { "mode": "gemGrab", "result": "defeat", "duration": 130, "trophyChange": -7,
                                "teams": [[me(16000000)], [foe.clone()]] }
                },
                {
                    "battleTime": "20240101T100000.000Z",
                    "event": { "id": 2, "mode": "gemGrab", "map": "Hard Rock Mine" },
                    "battle": { "mode": "gemGrab", "result": "victory", "duration": 60, "trophyChange": 8,
                                "teams": [[me(16000000)], [foe]] }
                },
                {
                    "battleTime": "20240101T090000.000Z",
                    "event": { "id": 3, "mode": "soloShowdown", "map": "Skull Creek" },
                    "battle": { "mode": "soloShowdown", "rank": 2, "trophyChange": 6,
                                "players": [me(16000001)] }
                }
            ]
        }))
        .unwrap()
    }
}
