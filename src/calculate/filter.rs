//! Battle selection for the per-brawler view.

use std::cmp::Reverse;

use crate::models::{BattleRecord, PlayerTag};

/// Battles where `player` took part playing `brawler_id`, in input order.
///
/// The player's participant is the first one whose normalized tag matches;
/// battles where that participant played a different brawler are dropped.
pub fn filter_by_player_and_brawler<'a>(
    records: &'a [BattleRecord],
    player: &PlayerTag,
    brawler_id: i64,
) -> Vec<&'a BattleRecord> {
    records
        .iter()
        .filter(|record| {
            record
                .find_participant(player)
                .is_some_and(|p| p.brawler_id() == Some(brawler_id))
        })
        .collect()
}

/// Most recent `limit` battles, newest first. Unparsable times count as
/// epoch 0 and therefore sort last.
pub fn recent_window<'a>(records: &[&'a BattleRecord], limit: usize) -> Vec<&'a BattleRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| Reverse(r.sort_key()));
    sorted.truncate(limit);
    sorted
}
