//! # EGG Staking
//!
//! Staked EGG produces FEED every day. Chickens' daily EGG is added straight
//! to the stake; nothing is ever unstaked.

use serde::{Deserialize, Serialize};
use crate::constants::*;

/// FEED produced per day by `staked_eggs`
pub fn feed_per_day(staked_eggs: f64) -> f64 {
    FEED_PER_STAKED_EGG * staked_eggs
}

/// The farm's EGG stake
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EggStake {
    /// Total staked EGG
    pub staked_eggs: f64,
}

impl EggStake {
    /// Create a stake with an initial balance
    pub fn new(staked_eggs: f64) -> Self {
        Self { staked_eggs }
    }

    /// FEED produced per day by the current balance
    pub fn feeds_per_day(&self) -> f64 {
        feed_per_day(self.staked_eggs)
    }

    /// Stake more EGG
    pub fn add_eggs(&mut self, amount: f64) {
        self.staked_eggs += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_production() {
        assert_eq!(EggStake::default().feeds_per_day(), 0.0);
        assert_eq!(EggStake::new(10.0).feeds_per_day(), 30.0);
    }

    #[test]
    fn test_add_eggs() {
        let mut stake = EggStake::new(2.0);
        stake.add_eggs(1.25);
        stake.add_eggs(0.0);

        assert_eq!(stake.staked_eggs, 3.25);
        assert_eq!(stake.feeds_per_day(), 9.75);
    }
}
