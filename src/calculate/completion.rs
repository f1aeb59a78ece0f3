//! Account completion against the brawler catalog.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info};

use crate::models::{
    BrawlerItemCompletion, CatalogBrawler, Completion, Item, ItemSplit, Player, PlayerBrawler,
};

use super::percentage;

/// Lowest ID of a real playable brawler; anything below is a placeholder.
pub const MIN_BRAWLER_ID: i64 = 16_000_000;

/// Gear slots assumed per brawler when estimating the gear total.
pub const GEAR_SLOTS_PER_BRAWLER: u32 = 2;

fn excluded_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)npc|boss|test").expect("name pattern is valid"))
}

/// Why a catalog entry was left out of the completion denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    InvalidId,
    OutOfRange,
    EmptyName,
    Unreleased,
    NonPlayable,
    NoItems,
    Duplicate,
}

fn check_entry(entry: &CatalogBrawler, seen: &HashSet<i64>) -> Result<i64, Rejection> {
    let id = entry.numeric_id().ok_or(Rejection::InvalidId)?;
    if id < MIN_BRAWLER_ID {
        return Err(Rejection::OutOfRange);
    }
    let name = entry.name();
    if name.trim().is_empty() {
        return Err(Rejection::EmptyName);
    }
    if entry.released == Some(false) {
        return Err(Rejection::Unreleased);
    }
    if excluded_name_regex().is_match(name) {
        return Err(Rejection::NonPlayable);
    }
    if entry.star_powers.is_empty() && entry.gadgets.is_empty() {
        return Err(Rejection::NoItems);
    }
    if seen.contains(&id) {
        return Err(Rejection::Duplicate);
    }
    Ok(id)
}

/// Keep only real, released, playable catalog entries, deduplicated by ID
/// (first occurrence wins).
pub fn sanitize_catalog(catalog: &[CatalogBrawler]) -> Vec<&CatalogBrawler> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for entry in catalog {
        match check_entry(entry, &seen) {
            Ok(id) => {
                seen.insert(id);
                out.push(entry);
            }
            Err(reason) => {
                debug!(
                    "Skipping catalog entry {:?} ({}): {:?}",
                    entry.id,
                    entry.name(),
                    reason
                );
            }
        }
    }

    info!(
        "Sanitized brawler catalog: {} of {} entries kept",
        out.len(),
        catalog.len()
    );
    out
}

/// Owned vs. total brawlers, star powers, gadgets and gears.
///
/// The player's roster is trusted as-is; brawlers missing from the catalog
/// are counted as owned but add nothing to the totals.
pub fn compute_completion(player: &Player, catalog: &[CatalogBrawler]) -> Completion {
    let catalog = sanitize_catalog(catalog);

    let total_brawlers = catalog.len() as u32;
    let owned_brawlers = player.brawlers.len() as u32;

    let star_powers_total = catalog.iter().map(|b| b.star_powers.len() as u32).sum();
    let gadgets_total = catalog.iter().map(|b| b.gadgets.len() as u32).sum();
    let catalog_gears: u32 = catalog.iter().map(|b| b.gears.len() as u32).sum();

    let star_powers_owned = player.brawlers.iter().map(|b| b.star_powers.len() as u32).sum();
    let gadgets_owned = player.brawlers.iter().map(|b| b.gadgets.len() as u32).sum();
    let gears_owned = player.brawlers.iter().map(|b| b.gears.len() as u32).sum();

    Completion {
        total_brawlers,
        owned_brawlers,
        brawlers_completion: percentage(owned_brawlers, total_brawlers),
        star_powers_owned,
        star_powers_total,
        gadgets_owned,
        gadgets_total,
        gears_owned,
        gears_total: catalog_gears.max(total_brawlers * GEAR_SLOTS_PER_BRAWLER),
    }
}

/// Split catalog items into owned and missing by ID.
fn split_items(owned: &[Item], all: &[Item]) -> ItemSplit {
    let owned_ids: HashSet<i64> = owned.iter().map(|i| i.id).collect();
    let (owned, missing): (Vec<Item>, Vec<Item>) =
        all.iter().cloned().partition(|i| owned_ids.contains(&i.id));
    ItemSplit { owned, missing }
}

/// Item-level completion for one brawler. `owned` is `None` when the player
/// doesn't have the brawler.
pub fn brawler_item_completion(
    owned: Option<&PlayerBrawler>,
    catalog_entry: &CatalogBrawler,
) -> BrawlerItemCompletion {
    let empty = PlayerBrawler::default();
    let owned = owned.unwrap_or(&empty);
    let gears_owned = owned.gears.len() as u32;

    BrawlerItemCompletion {
        star_powers: split_items(&owned.star_powers, &catalog_entry.star_powers),
        gadgets: split_items(&owned.gadgets, &catalog_entry.gadgets),
        gears_owned,
        gears_total: gears_owned.max(GEAR_SLOTS_PER_BRAWLER),
    }
}
