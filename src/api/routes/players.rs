use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::api::{parse_tag, ApiError};
use crate::calculate::{
    brawler_item_completion, compute_stats, filter_by_player_and_brawler, recent_window,
    sanitize_catalog, summarize,
};
use crate::fetch::catalog_or_empty;
use crate::models::{BrawlerItemCompletion, DerivedStats, PlayerSummary, PlayerTag};

use super::load_catalog;

pub async fn player_summary(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<PlayerSummary>, ApiError> {
    let tag = parse_tag(&tag)?;

    let (player, catalog) = tokio::join!(state.api.player(&tag), load_catalog(&state));
    let player = player?;

    Ok(Json(summarize(&player, &catalog)))
}

#[derive(Debug, Serialize)]
pub struct BattleLogStatsResponse {
    pub tag: PlayerTag,
    pub stats: DerivedStats,
}

pub async fn battle_log_stats(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<BattleLogStatsResponse>, ApiError> {
    let tag = parse_tag(&tag)?;

    let log = state.api.battle_log(&tag).await?;
    let stats = compute_stats(&log.items);
    debug!(
        "Battle log for {}: {} battles, {}% winrate",
        tag, stats.total, stats.winrate
    );

    Ok(Json(BattleLogStatsResponse { tag, stats }))
}

#[derive(Debug, Serialize)]
pub struct BrawlerStatsResponse {
    pub tag: PlayerTag,
    pub brawler_id: i64,
    pub brawler_name: Option<String>,
    pub owned: bool,
    /// Battles on this brawler found in the log, before windowing
    pub matched_battles: usize,
    pub window: usize,
    pub stats: DerivedStats,
    /// `None` when the brawler is not in the catalog
    pub items: Option<BrawlerItemCompletion>,
}

pub async fn brawler_stats(
    State(state): State<AppState>,
    Path((tag, brawler_id)): Path<(String, String)>,
) -> Result<Json<BrawlerStatsResponse>, ApiError> {
    let tag = parse_tag(&tag)?;
    let brawler_id: i64 = brawler_id
        .trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid brawler id: {}", brawler_id)))?;

    let (player, log, catalog) = tokio::join!(
        state.api.player(&tag),
        state.api.battle_log(&tag),
        state.api.brawlers()
    );
    let player = player?;
    let log = log?;
    let catalog = catalog_or_empty(catalog);

    let limit = state.config.stats.recent_window;
    let matched = filter_by_player_and_brawler(&log.items, &tag, brawler_id);
    let window = recent_window(&matched, limit);
    let stats = compute_stats(window.iter().copied());

    let owned = player.brawler(brawler_id);
    let catalog_entry = sanitize_catalog(&catalog)
        .into_iter()
        .find(|b| b.numeric_id() == Some(brawler_id));

    let brawler_name = owned
        .map(|b| b.name.clone())
        .filter(|n| !n.is_empty())
        .or_else(|| catalog_entry.map(|b| b.name().to_string()));

    info!(
        "Brawler {} for {}: {} matched, {} in window",
        brawler_id,
        tag,
        matched.len(),
        window.len()
    );

    Ok(Json(BrawlerStatsResponse {
        tag,
        brawler_id,
        brawler_name,
        owned: owned.is_some(),
        matched_battles: matched.len(),
        window: limit,
        stats,
        items: catalog_entry.map(|entry| brawler_item_completion(owned, entry)),
    }))
}
