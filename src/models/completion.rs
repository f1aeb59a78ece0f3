//! Account completion ratios.

use serde::{Deserialize, Serialize};

use super::Item;

/// Owned vs. catalog totals for an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub total_brawlers: u32,
    pub owned_brawlers: u32,
    /// Rounded percentage of owned brawlers
    pub brawlers_completion: u32,
    pub star_powers_owned: u32,
    pub star_powers_total: u32,
    pub gadgets_owned: u32,
    pub gadgets_total: u32,
    pub gears_owned: u32,
    /// Estimated: at least two gear slots per brawler
    pub gears_total: u32,
}

/// Owned and missing items of one kind for a single brawler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSplit {
    pub owned: Vec<Item>,
    pub missing: Vec<Item>,
}

impl ItemSplit {
    pub fn owned_count(&self) -> u32 {
        self.owned.len() as u32
    }

    pub fn total(&self) -> u32 {
        (self.owned.len() + self.missing.len()) as u32
    }
}

/// Item-level completion for one brawler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrawlerItemCompletion {
    pub star_powers: ItemSplit,
    pub gadgets: ItemSplit,
    pub gears_owned: u32,
    pub gears_total: u32,
}
