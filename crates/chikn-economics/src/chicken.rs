//! # Chicken Growth
//!
//! A chicken's level (its weight in kg) sets both how much EGG it lays per day
//! and how much FEED it must eat to reach the next level.
//!
//! ```text
//! egg_per_day(L) = 1 + 0.25 × (L - 1)
//! max_feed(L)    = 25 × L²
//! ```

use serde::{Deserialize, Serialize};
use crate::constants::*;

/// EGG laid per day at `level`
pub fn egg_per_day(level: u32) -> f64 {
    BASE_EGG_PER_DAY + EGG_PER_DAY_PER_LEVEL * (level as f64 - 1.0)
}

/// FEED needed to go from `level` to `level + 1`
pub fn feed_for_upgrade(level: u32) -> f64 {
    let level = level as f64;
    FEED_PER_LEVEL_SQUARED * level * level
}

/// A single chicken
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chicken {
    /// Price paid for the chicken in USD
    pub base_price: f64,

    /// Current level
    pub level: u32,

    /// FEED eaten towards the next level
    pub feeding_progress: f64,
}

impl Chicken {
    /// Create a chicken with no feeding progress
    pub fn new(base_price: f64, level: u32) -> Self {
        Self {
            base_price,
            level,
            feeding_progress: 0.0,
        }
    }

    /// EGG laid per day at the current level
    pub fn egg_per_day(&self) -> f64 {
        egg_per_day(self.level)
    }

    /// FEED needed to reach the next level
    pub fn max_feed(&self) -> f64 {
        feed_for_upgrade(self.level)
    }

    /// Eat `amount` FEED, levelling up as many times as the progress allows.
    ///
    /// Returns the number of levels gained. Negative or non-finite amounts
    /// are ignored and leave the chicken unchanged.
    pub fn feed(&mut self, amount: f64) -> u32 {
        if !amount.is_finite() || amount < 0.0 {
            tracing::warn!(amount, "ignoring invalid feed amount");
            return 0;
        }

        let start = self.level;
        self.feeding_progress += amount;
        while self.feeding_progress >= self.max_feed() {
            self.feeding_progress -= self.max_feed();
            self.level += 1;
        }

        let gained = self.level - start;
        if gained > 0 {
            tracing::debug!(from = start, to = self.level, "chicken levelled up");
        }
        gained
    }
}
