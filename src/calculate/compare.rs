//! Head-to-head player comparison.
//!
//! Each player's roster is reduced to a distribution profile, the two
//! profiles are compared metric by metric, and the tally is classified into
//! a verdict tier.

use tracing::debug;

use crate::models::{
    CatalogBrawler, CompareOutcome, Comparison, Metric, Player, PlayerProfile,
    PlayerSummary, PlayerTag, Scoreboard, Side, Verdict, VerdictTier,
};

use super::{
    average_one_decimal, compute_completion, count_at_least, percentage, percentile,
    round_half_up,
};

/// Reduce a roster to averages, maxima, percentiles and threshold counts.
pub fn player_profile(player: &Player) -> PlayerProfile {
    let powers: Vec<u32> = player.brawlers.iter().map(|b| b.power).collect();
    let ranks: Vec<u32> = player.brawlers.iter().map(|b| b.rank).collect();
    let trophies: Vec<i64> = player.brawlers.iter().map(|b| b.trophies).collect();

    let as_f64 = |values: &[u32]| values.iter().map(|v| *v as f64).collect::<Vec<_>>();
    let trophies_f64: Vec<f64> = trophies.iter().map(|t| *t as f64).collect();

    PlayerProfile {
        avg_power: average_one_decimal(&as_f64(&powers)),
        avg_rank: average_one_decimal(&as_f64(&ranks)),
        max_power: powers.iter().copied().max().unwrap_or(0),
        max_rank: ranks.iter().copied().max().unwrap_or(0),
        avg_brawler_trophies: round_half_up(average_one_decimal(&trophies_f64)) as i64,
        p50_trophies: percentile(&trophies, 50.0),
        p75_trophies: percentile(&trophies, 75.0),
        p90_trophies: percentile(&trophies, 90.0),
        power_11: count_at_least(&powers, 11),
        power_10_plus: count_at_least(&powers, 10),
        power_9_plus: count_at_least(&powers, 9),
        rank_30_plus: count_at_least(&ranks, 30),
        rank_25_plus: count_at_least(&ranks, 25),
        rank_20_plus: count_at_least(&ranks, 20),
        trophies_500_plus: count_at_least(&trophies, 500),
        trophies_600_plus: count_at_least(&trophies, 600),
        trophies_750_plus: count_at_least(&trophies, 750),
        trophies_1000_plus: count_at_least(&trophies, 1000),
        gears_owned: player.brawlers.iter().map(|b| b.gears.len() as u32).sum(),
    }
}

/// Headline figures, completion and profile for one player.
pub fn summarize(player: &Player, catalog: &[CatalogBrawler]) -> PlayerSummary {
    PlayerSummary {
        tag: player.player_tag(),
        name: player.name.clone(),
        trophies: player.trophies,
        highest_trophies: player.highest_trophies,
        exp_level: player.exp_level,
        club_name: player.club_name().map(str::to_string),
        three_vs_three_victories: player.three_vs_three_victories,
        completion: compute_completion(player, catalog),
        profile: player_profile(player),
    }
}

fn metric_value(metric: Metric, s: &PlayerSummary) -> f64 {
    let p = &s.profile;
    match metric {
        Metric::Trophies => s.trophies as f64,
        Metric::HighestTrophies => s.highest_trophies as f64,
        Metric::Level => s.exp_level as f64,
        Metric::AvgPower => p.avg_power,
        Metric::MaxPower => p.max_power as f64,
        Metric::AvgRank => p.avg_rank,
        Metric::MaxRank => p.max_rank as f64,
        Metric::Power11 => p.power_11 as f64,
        Metric::Power10Plus => p.power_10_plus as f64,
        Metric::Power9Plus => p.power_9_plus as f64,
        Metric::Rank30Plus => p.rank_30_plus as f64,
        Metric::Rank25Plus => p.rank_25_plus as f64,
        Metric::Rank20Plus => p.rank_20_plus as f64,
        Metric::Trophies500Plus => p.trophies_500_plus as f64,
        Metric::Trophies600Plus => p.trophies_600_plus as f64,
        Metric::Trophies750Plus => p.trophies_750_plus as f64,
        Metric::Trophies1000Plus => p.trophies_1000_plus as f64,
        Metric::AvgTrophiesPerBrawler => p.avg_brawler_trophies as f64,
        Metric::P50PerBrawler => p.p50_trophies as f64,
        Metric::P75PerBrawler => p.p75_trophies as f64,
        Metric::P90PerBrawler => p.p90_trophies as f64,
        Metric::TotalGearsEquipped => p.gears_owned as f64,
        Metric::Victories3v3 => s.three_vs_three_victories as f64,
    }
}

/// The fixed, ordered comparison set between two players.
pub fn build_comparisons(a: &PlayerSummary, b: &PlayerSummary) -> Vec<Comparison> {
    Metric::ALL
        .iter()
        .map(|&metric| Comparison {
            metric,
            a: metric_value(metric, a),
            b: metric_value(metric, b),
            better: metric.better(),
        })
        .collect()
}

/// Tally wins per side; equal values count as ties.
pub fn score(comparisons: &[Comparison]) -> Scoreboard {
    let mut board = Scoreboard::default();
    for comparison in comparisons {
        match comparison.winner() {
            Some(Side::A) => board.score_a += 1,
            Some(Side::B) => board.score_b += 1,
            None => board.ties += 1,
        }
    }
    board
}

/// Classify a tally. Ties are left out of the winner percentage.
pub fn verdict(board: &Scoreboard) -> Verdict {
    let decided = board.score_a + board.score_b;
    let winner_pct = if decided == 0 {
        50
    } else {
        percentage(board.score_a.max(board.score_b), decided)
    };

    Verdict {
        tier: VerdictTier::from_scores(board.score_a, board.score_b),
        leader: board.leader(),
        diff: board.diff(),
        winner_pct,
    }
}

/// Compare two players, degrading when either could not be loaded.
///
/// With one player missing only that player's summary is produced and no
/// scoring happens; with both missing nothing is computed.
pub fn compare_players(
    a_tag: &PlayerTag,
    a: Option<&Player>,
    b_tag: &PlayerTag,
    b: Option<&Player>,
    catalog: &[CatalogBrawler],
) -> CompareOutcome {
    match (a, b) {
        (Some(a), Some(b)) => {
            let a = summarize(a, catalog);
            let b = summarize(b, catalog);
            let comparisons = build_comparisons(&a, &b);
            let scoreboard = score(&comparisons);
            let verdict = verdict(&scoreboard);
            debug!(
                "Compared {} vs {}: {}-{} ({} ties), {}",
                a.tag, b.tag, scoreboard.score_a, scoreboard.score_b, scoreboard.ties, verdict.tier
            );
            CompareOutcome::Full {
                a: Box::new(a),
                b: Box::new(b),
                comparisons,
                scoreboard,
                verdict,
            }
        }
        (Some(a), None) => CompareOutcome::Partial {
            available_side: Side::A,
            available: Box::new(summarize(a, catalog)),
            missing_tag: b_tag.clone(),
        },
        (None, Some(b)) => CompareOutcome::Partial {
            available_side: Side::B,
            available: Box::new(summarize(b, catalog)),
            missing_tag: a_tag.clone(),
        },
        (None, None) => CompareOutcome::Unavailable {
            a_tag: a_tag.clone(),
            b_tag: b_tag.clone(),
        },
    }
}
