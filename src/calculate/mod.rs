//! Statistics calculation engine.
//!
//! Pure functions that turn raw upstream records into derived metrics:
//! - Battle filtering per player and brawler
//! - Battle-log aggregates (winrates, streaks, trophy curves)
//! - Account completion ratios
//! - Head-to-head profile comparison and verdict

pub mod battles;
pub mod compare;
pub mod completion;
pub mod filter;

pub use battles::{compute_stats, period_label};
pub use compare::{build_comparisons, compare_players, player_profile, score, summarize, verdict};
pub use completion::{brawler_item_completion, compute_completion, sanitize_catalog};
pub use filter::{filter_by_player_and_brawler, recent_window};

/// Round half up (toward positive infinity), matching the dashboard's
/// display rounding for negative values too.
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Rounded percentage `part / whole * 100`, 0 when `whole` is 0.
pub fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        0
    } else {
        round_half_up(part as f64 / whole as f64 * 100.0) as u32
    }
}

/// Mean rounded to one decimal, 0 when empty.
pub fn average_one_decimal(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    round_half_up(mean * 10.0) / 10.0
}

/// Nearest-rank percentile: sort ascending, pick `round(p/100 * (n-1))`.
/// Returns 0 for an empty list.
pub fn percentile(values: &[i64], p: f64) -> i64 {
    if values.is_empty() {
        return 0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let last = sorted.len() - 1;
    let idx = round_half_up(p / 100.0 * last as f64).clamp(0.0, last as f64) as usize;
    sorted[idx]
}

/// Number of values at or above `threshold`.
pub fn count_at_least<T: PartialOrd + Copy>(values: &[T], threshold: T) -> u32 {
    values.iter().filter(|v| **v >= threshold).count() as u32
}
