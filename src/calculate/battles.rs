//! Battle-log aggregation.
//!
//! Order-sensitive series (rolling winrate, trophy curve, streak, recent
//! results) are computed over the battles sorted ascending by parsed
//! `battleTime`. The sort is stable and battles with an unparsable time sort
//! as epoch 0, i.e. first.

use std::collections::BTreeMap;

use crate::models::{
    BattleRecord, BattleResult, DerivedStats, DurationBucket, DurationCount, GroupStat, HourStat,
    RecentResult, RollingPoint, Streak, TrophyPoint,
};

use super::{percentage, round_half_up};

const HOURS_PER_DAY: usize = 24;
const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Spans shorter than this are labelled in hours, longer ones in days.
const HOURLY_LABEL_LIMIT: f64 = 36.0;

/// Win/total counters keyed by label.
#[derive(Default)]
struct GroupTally(BTreeMap<String, (u32, u32)>);

impl GroupTally {
    fn record(&mut self, label: &str, won: bool) {
        let entry = self.0.entry(label.to_string()).or_default();
        entry.1 += 1;
        if won {
            entry.0 += 1;
        }
    }

    /// Rows sorted by games played, most first; ties keep label order.
    fn into_rows(self) -> Vec<GroupStat> {
        let mut rows: Vec<GroupStat> = self
            .0
            .into_iter()
            .map(|(label, (wins, total))| GroupStat {
                label,
                wins,
                total,
                winrate: percentage(wins, total.max(1)),
            })
            .collect();
        rows.sort_by(|a, b| b.total.cmp(&a.total));
        rows
    }
}

/// Next value of the signed streak counter.
fn step_streak(current: i64, result: Option<BattleResult>) -> i64 {
    match result {
        Some(BattleResult::Victory) => {
            if current >= 0 {
                current + 1
            } else {
                1
            }
        }
        Some(BattleResult::Defeat) => {
            if current <= 0 {
                current - 1
            } else {
                -1
            }
        }
        _ => 0,
    }
}

/// Longest run of identical outcomes over results in chronological order.
///
/// Draws and unknown results break any run. When a win run and a loss run
/// have the same length, the one reached first is kept.
pub fn longest_streak<I>(results: I) -> Streak
where
    I: IntoIterator<Item = Option<BattleResult>>,
{
    let mut current = 0i64;
    let mut longest = 0i64;
    for result in results {
        current = step_streak(current, result);
        if current.abs() > longest.abs() {
            longest = current;
        }
    }
    Streak(longest)
}

/// Human-readable span of a battle set, e.g. `~5 h • 12 games`.
///
/// Falls back to the bare count when no time parses, and to `—` for an
/// empty set.
pub fn period_label<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a BattleRecord>,
{
    let records: Vec<&BattleRecord> = records.into_iter().collect();
    if records.is_empty() {
        return "—".to_string();
    }
    let count = records.len();

    let times: Vec<i64> = records
        .iter()
        .filter_map(|r| r.played_at())
        .map(|t| t.timestamp_millis())
        .collect();
    let (Some(min), Some(max)) = (times.iter().min(), times.iter().max()) else {
        return format!("{} games", count);
    };

    let hours = (max - min).max(0) as f64 / MILLIS_PER_HOUR;
    let span = if hours < HOURLY_LABEL_LIMIT {
        format!("~{} h", (round_half_up(hours) as i64).max(1))
    } else {
        format!("~{} j", (round_half_up(hours / 24.0) as i64).max(1))
    };

    format!("{} • {} games", span, count)
}

/// Fold a set of battles into summary statistics.
///
/// Never fails: missing fields fall back to their defaults, and a battle
/// without a usable time still counts toward totals and the mode/map tables.
pub fn compute_stats<'a, I>(records: I) -> DerivedStats
where
    I: IntoIterator<Item = &'a BattleRecord>,
{
    let mut chronological: Vec<&BattleRecord> = records.into_iter().collect();
    chronological.sort_by_key(|r| r.sort_key());

    let total = chronological.len() as u32;
    let (mut wins, mut defeats, mut draws) = (0u32, 0u32, 0u32);
    let mut modes = GroupTally::default();
    let mut maps = GroupTally::default();
    let mut hours = [(0u32, 0u32); HOURS_PER_DAY];
    let mut durations = [0u32; DurationBucket::ALL.len()];

    let mut rolling_winrate = Vec::with_capacity(chronological.len());
    let mut trophy_deltas = Vec::with_capacity(chronological.len());
    let mut recent_results = Vec::with_capacity(chronological.len());
    let mut cumul = 0i64;

    for (i, record) in chronological.iter().enumerate() {
        let idx = i as u32 + 1;
        let result = record.result();
        let won = record.is_victory();

        match result {
            Some(BattleResult::Victory) => wins += 1,
            Some(BattleResult::Defeat) => defeats += 1,
            Some(BattleResult::Draw) => draws += 1,
            _ => {}
        }

        modes.record(record.mode(), won);
        maps.record(record.map_name(), won);

        if let Some(hour) = record.hour() {
            let slot = &mut hours[hour as usize];
            slot.1 += 1;
            if won {
                slot.0 += 1;
            }
        }

        if let Some(seconds) = record.duration() {
            let bucket = DurationBucket::for_seconds(seconds);
            if let Some(pos) = DurationBucket::ALL.iter().position(|b| *b == bucket) {
                durations[pos] += 1;
            }
        }

        rolling_winrate.push(RollingPoint {
            idx,
            wr: percentage(wins, idx),
        });

        let delta = record.trophy_change();
        cumul += delta;
        trophy_deltas.push(TrophyPoint { idx, delta, cumul });

        recent_results.push(RecentResult {
            idx,
            result: result.unwrap_or(BattleResult::Draw),
            mode: record.mode().to_string(),
        });
    }

    let streak = longest_streak(chronological.iter().map(|r| r.result()));
    let avg_delta = if total == 0 {
        0.0
    } else {
        round_half_up(cumul as f64 / total as f64 * 10.0) / 10.0
    };

    DerivedStats {
        total,
        wins,
        defeats,
        draws,
        winrate: percentage(wins, total),
        trophy_delta_sum: cumul,
        avg_delta,
        modes: modes.into_rows(),
        maps: maps.into_rows(),
        hours: hours
            .iter()
            .enumerate()
            .map(|(hour, &(wins, total))| HourStat {
                hour: hour as u32,
                wins,
                total,
                winrate: percentage(wins, total.max(1)),
            })
            .collect(),
        durations: DurationBucket::ALL
            .iter()
            .zip(durations)
            .map(|(bucket, count)| DurationCount {
                bucket: *bucket,
                label: bucket.to_string(),
                count,
            })
            .collect(),
        rolling_winrate,
        trophy_deltas,
        recent_results,
        streak,
        streak_label: streak.label(),
        period_label: period_label(chronological.iter().copied()),
    }
}
