//! Head-to-head comparison models.

use serde::{Deserialize, Serialize};

use super::{Completion, PlayerTag};

/// Which direction wins a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Better {
    #[default]
    Higher,
    Lower,
}

/// One side of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(&self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Distribution profile of a player's roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Mean power level, one decimal
    pub avg_power: f64,
    /// Mean rank, one decimal
    pub avg_rank: f64,
    pub max_power: u32,
    pub max_rank: u32,

    /// Mean brawler trophies, rounded
    pub avg_brawler_trophies: i64,
    pub p50_trophies: i64,
    pub p75_trophies: i64,
    pub p90_trophies: i64,

    pub power_11: u32,
    pub power_10_plus: u32,
    pub power_9_plus: u32,
    pub rank_30_plus: u32,
    pub rank_25_plus: u32,
    pub rank_20_plus: u32,
    pub trophies_500_plus: u32,
    pub trophies_600_plus: u32,
    pub trophies_750_plus: u32,
    pub trophies_1000_plus: u32,

    /// Gears equipped across all brawlers
    pub gears_owned: u32,
}

/// A named comparison metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Trophies,
    HighestTrophies,
    Level,
    AvgPower,
    MaxPower,
    AvgRank,
    MaxRank,
    Power11,
    Power10Plus,
    Power9Plus,
    Rank30Plus,
    Rank25Plus,
    Rank20Plus,
    Trophies500Plus,
    Trophies600Plus,
    Trophies750Plus,
    Trophies1000Plus,
    AvgTrophiesPerBrawler,
    P50PerBrawler,
    P75PerBrawler,
    P90PerBrawler,
    TotalGearsEquipped,
    Victories3v3,
}

impl Metric {
    /// Every metric, in display order.
    pub const ALL: [Metric; 23] = [
        Metric::Trophies,
        Metric::HighestTrophies,
        Metric::Level,
        Metric::AvgPower,
        Metric::MaxPower,
        Metric::AvgRank,
        Metric::MaxRank,
        Metric::Power11,
        Metric::Power10Plus,
        Metric::Power9Plus,
        Metric::Rank30Plus,
        Metric::Rank25Plus,
        Metric::Rank20Plus,
        Metric::Trophies500Plus,
        Metric::Trophies600Plus,
        Metric::Trophies750Plus,
        Metric::Trophies1000Plus,
        Metric::AvgTrophiesPerBrawler,
        Metric::P50PerBrawler,
        Metric::P75PerBrawler,
        Metric::P90PerBrawler,
        Metric::TotalGearsEquipped,
        Metric::Victories3v3,
    ];

    pub fn better(&self) -> Better {
        Better::Higher
    }
}

/// Values of one metric for both players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub metric: Metric,
    pub a: f64,
    pub b: f64,
    pub better: Better,
}

impl Comparison {
    /// Winning side, `None` on a tie.
    pub fn winner(&self) -> Option<Side> {
        if self.a == self.b {
            return None;
        }
        let a_wins = match self.better {
            Better::Higher => self.a > self.b,
            Better::Lower => self.a < self.b,
        };
        Some(if a_wins { Side::A } else { Side::B })
    }
}

/// Tally over all comparisons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score_a: u32,
    pub score_b: u32,
    pub ties: u32,
}

impl Scoreboard {
    pub fn total(&self) -> u32 {
        self.score_a + self.score_b + self.ties
    }

    pub fn diff(&self) -> u32 {
        self.score_a.abs_diff(self.score_b)
    }

    pub fn leader(&self) -> Option<Side> {
        match self.score_a.cmp(&self.score_b) {
            std::cmp::Ordering::Greater => Some(Side::A),
            std::cmp::Ordering::Less => Some(Side::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Decisiveness of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictTier {
    Draw,
    /// Score gap of at most 2
    Narrow,
    /// Score gap of 3 to 5
    Moderate,
    /// Score gap above 5
    Dominant,
}

impl VerdictTier {
    /// Classify a scoreboard.
    pub fn from_scores(score_a: u32, score_b: u32) -> Self {
        let diff = score_a.abs_diff(score_b);
        if diff == 0 {
            VerdictTier::Draw
        } else if diff <= 2 {
            VerdictTier::Narrow
        } else if diff <= 5 {
            VerdictTier::Moderate
        } else {
            VerdictTier::Dominant
        }
    }
}

impl std::fmt::Display for VerdictTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerdictTier::Draw => write!(f, "draw"),
            VerdictTier::Narrow => write!(f, "narrow"),
            VerdictTier::Moderate => write!(f, "moderate"),
            VerdictTier::Dominant => write!(f, "dominant"),
        }
    }
}

/// Outcome of scoring two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub tier: VerdictTier,
    pub leader: Option<Side>,
    pub diff: u32,
    /// Leader's share of decided metrics, 50 when nothing was decided
    pub winner_pct: u32,
}

/// Headline figures for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub tag: PlayerTag,
    pub name: String,
    pub trophies: i64,
    pub highest_trophies: i64,
    pub exp_level: u32,
    pub club_name: Option<String>,
    pub three_vs_three_victories: u64,
    pub completion: Completion,
    pub profile: PlayerProfile,
}

/// Result of comparing two players, some of whom may be unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CompareOutcome {
    /// Both players loaded
    Full {
        a: Box<PlayerSummary>,
        b: Box<PlayerSummary>,
        comparisons: Vec<Comparison>,
        scoreboard: Scoreboard,
        verdict: Verdict,
    },
    /// Only one player loaded; no scoring
    Partial {
        available_side: Side,
        available: Box<PlayerSummary>,
        missing_tag: PlayerTag,
    },
    /// Neither player loaded
    Unavailable { a_tag: PlayerTag, b_tag: PlayerTag },
}

impl CompareOutcome {
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            CompareOutcome::Full { verdict, .. } => Some(verdict),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_tier_thresholds() {
        assert_eq!(VerdictTier::from_scores(5, 5), VerdictTier::Draw);
        assert_eq!(VerdictTier::from_scores(6, 5), VerdictTier::Narrow);
        assert_eq!(VerdictTier::from_scores(7, 5), VerdictTier::Narrow);
        assert_eq!(VerdictTier::from_scores(8, 5), VerdictTier::Moderate);
        assert_eq!(VerdictTier::from_scores(10, 5), VerdictTier::Moderate);
        assert_eq!(VerdictTier::from_scores(11, 5), VerdictTier::Dominant);
    }

    #[test]
    fn test_verdict_tier_symmetric() {
        for (a, b) in [(0, 3), (4, 1), (12, 2), (7, 7)] {
            assert_eq!(VerdictTier::from_scores(a, b), VerdictTier::from_scores(b, a));
        }
    }

    #[test]
    fn test_comparison_winner_higher() {
        let c = Comparison {
            metric: Metric::Trophies,
            a: 10.0,
            b: 5.0,
            better: Better::Higher,
        };
        assert_eq!(c.winner(), Some(Side::A));
    }

    #[test]
    fn test_comparison_winner_lower() {
        let c = Comparison {
            metric: Metric::Trophies,
            a: 10.0,
            b: 5.0,
            better: Better::Lower,
        };
        assert_eq!(c.winner(), Some(Side::B));
    }

    #[test]
    fn test_comparison_tie() {
        let c = Comparison {
            metric: Metric::Level,
            a: 3.0,
            b: 3.0,
            better: Better::Higher,
        };
        assert_eq!(c.winner(), None);
    }

    #[test]
    fn test_scoreboard_leader() {
        let s = Scoreboard {
            score_a: 3,
            score_b: 5,
            ties: 1,
        };
        assert_eq!(s.leader(), Some(Side::B));
        assert_eq!(s.diff(), 2);
        assert_eq!(s.total(), 9);
        assert_eq!(Side::B.other(), Side::A);
    }

    #[test]
    fn test_metric_serialization() {
        assert_eq!(
            serde_json::to_string(&Metric::Victories3v3).unwrap(),
            "\"victories3v3\""
        );
        assert_eq!(
            serde_json::to_string(&Metric::Trophies1000Plus).unwrap(),
            "\"trophies1000_plus\""
        );
    }
}
