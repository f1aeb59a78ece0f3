//! Derived battle statistics.

use serde::{Deserialize, Serialize};

use super::BattleResult;

/// Wins/total for one mode, map or hour slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStat {
    pub label: String,
    pub wins: u32,
    pub total: u32,
    /// Rounded percentage, 0..=100
    pub winrate: u32,
}

/// Wins/total for one hour of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourStat {
    pub hour: u32,
    pub wins: u32,
    pub total: u32,
    pub winrate: u32,
}

/// Fixed battle duration buckets, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationBucket {
    UpTo60,
    From61To90,
    From91To120,
    From121To150,
    From151To180,
    Over180,
}

impl DurationBucket {
    pub const ALL: [DurationBucket; 6] = [
        DurationBucket::UpTo60,
        DurationBucket::From61To90,
        DurationBucket::From91To120,
        DurationBucket::From121To150,
        DurationBucket::From151To180,
        DurationBucket::Over180,
    ];

    /// Inclusive bounds in seconds. The last bucket is open-ended.
    pub fn bounds(&self) -> (u32, u32) {
        match self {
            DurationBucket::UpTo60 => (0, 60),
            DurationBucket::From61To90 => (61, 90),
            DurationBucket::From91To120 => (91, 120),
            DurationBucket::From121To150 => (121, 150),
            DurationBucket::From151To180 => (151, 180),
            DurationBucket::Over180 => (181, u32::MAX),
        }
    }

    pub fn contains(&self, seconds: u32) -> bool {
        let (min, max) = self.bounds();
        seconds >= min && seconds <= max
    }

    pub fn for_seconds(seconds: u32) -> Self {
        Self::ALL
            .into_iter()
            .find(|b| b.contains(seconds))
            .unwrap_or(DurationBucket::Over180)
    }
}

impl std::fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationBucket::UpTo60 => write!(f, "≤60s"),
            DurationBucket::From61To90 => write!(f, "61-90s"),
            DurationBucket::From91To120 => write!(f, "91-120s"),
            DurationBucket::From121To150 => write!(f, "121-150s"),
            DurationBucket::From151To180 => write!(f, "151-180s"),
            DurationBucket::Over180 => write!(f, "180+s"),
        }
    }
}

/// Number of battles in one duration bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationCount {
    pub bucket: DurationBucket,
    pub label: String,
    pub count: u32,
}

/// Running winrate after the `idx`-th battle (1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingPoint {
    pub idx: u32,
    pub wr: u32,
}

/// Trophy delta of the `idx`-th battle and the running sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrophyPoint {
    pub idx: u32,
    pub delta: i64,
    pub cumul: i64,
}

/// Outcome of the `idx`-th battle in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentResult {
    pub idx: u32,
    pub result: BattleResult,
    pub mode: String,
}

/// Longest same-outcome run: positive for wins, negative for losses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Streak(pub i64);

impl Streak {
    pub fn length(&self) -> u64 {
        self.0.unsigned_abs()
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Streak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            0 => write!(f, "—"),
            n if n > 0 => write!(f, "W{}", self.length()),
            _ => write!(f, "L{}", self.length()),
        }
    }
}

/// Aggregate statistics over a set of battles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub total: u32,
    pub wins: u32,
    pub defeats: u32,
    pub draws: u32,

    /// Rounded percentage of wins over all battles, 0..=100
    pub winrate: u32,

    /// Sum of trophy changes
    pub trophy_delta_sum: i64,

    /// Mean trophy change, one decimal
    pub avg_delta: f64,

    /// Per-mode table, most played first
    pub modes: Vec<GroupStat>,

    /// Per-map table, most played first
    pub maps: Vec<GroupStat>,

    /// Always 24 entries, hour 0 first
    pub hours: Vec<HourStat>,

    pub durations: Vec<DurationCount>,

    pub rolling_winrate: Vec<RollingPoint>,
    pub trophy_deltas: Vec<TrophyPoint>,
    pub recent_results: Vec<RecentResult>,

    pub streak: Streak,
    pub streak_label: String,

    /// Time span and count, e.g. `~3 h • 20 games`
    pub period_label: String,
}

impl DerivedStats {
    /// Look up a mode row by label.
    pub fn mode(&self, label: &str) -> Option<&GroupStat> {
        self.modes.iter().find(|m| m.label == label)
    }

    /// Look up a map row by label.
    pub fn map(&self, label: &str) -> Option<&GroupStat> {
        self.maps.iter().find(|m| m.label == label)
    }

    /// Final running trophy sum, 0 when empty.
    pub fn final_cumul(&self) -> i64 {
        self.trophy_deltas.last().map(|p| p.cumul).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streak_labels() {
        assert_eq!(Streak(0).label(), "—");
        assert_eq!(Streak(3).label(), "W3");
        assert_eq!(Streak(-2).label(), "L2");
        assert_eq!(Streak(-2).length(), 2);
    }

    #[test]
    fn test_duration_bucket_bounds_inclusive() {
        assert_eq!(DurationBucket::for_seconds(0), DurationBucket::UpTo60);
        assert_eq!(DurationBucket::for_seconds(60), DurationBucket::UpTo60);
        assert_eq!(DurationBucket::for_seconds(61), DurationBucket::From61To90);
        assert_eq!(DurationBucket::for_seconds(90), DurationBucket::From61To90);
        assert_eq!(DurationBucket::for_seconds(150), DurationBucket::From121To150);
        assert_eq!(DurationBucket::for_seconds(180), DurationBucket::From151To180);
        assert_eq!(DurationBucket::for_seconds(181), DurationBucket::Over180);
        assert_eq!(DurationBucket::for_seconds(600), DurationBucket::Over180);
    }

    #[test]
    fn test_duration_bucket_display() {
        assert_eq!(DurationBucket::UpTo60.to_string(), "≤60s");
        assert_eq!(DurationBucket::Over180.to_string(), "180+s");
    }

    #[test]
    fn test_streak_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Streak(-4)).unwrap(), "-4");
    }
}
