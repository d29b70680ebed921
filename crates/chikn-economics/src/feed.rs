//! FEED balance shared by every chicken on the farm.

use serde::{Deserialize, Serialize};
use crate::error::{Result, SimError};

/// Unspent FEED
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedPool {
    /// Available FEED
    pub amount: f64,
}

impl FeedPool {
    /// Create a pool with an initial balance
    pub fn new(amount: f64) -> Self {
        Self { amount }
    }

    /// Deposit FEED
    pub fn add_feeds(&mut self, amount: f64) {
        self.amount += amount;
    }

    /// Withdraw FEED, leaving the balance untouched if it is too small
    pub fn use_feeds(&mut self, amount: f64) -> Result<()> {
        if amount > self.amount {
            return Err(SimError::InsufficientFeed {
                requested: amount,
                available: self.amount,
            });
        }

        self.amount -= amount;
        Ok(())
    }

    /// Whether `amount` can be withdrawn
    pub fn can_cover(&self, amount: f64) -> bool {
        self.amount >= amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_and_withdraw() {
        let mut pool = FeedPool::default();
        pool.add_feeds(30.0);
        assert!(pool.can_cover(25.0));

        pool.use_feeds(25.0).unwrap();
        assert_eq!(pool.amount, 5.0);

        // Emptying the pool exactly is allowed
        pool.use_feeds(5.0).unwrap();
        assert_eq!(pool.amount, 0.0);
    }

    #[test]
    fn test_insufficient_feed_rejected() {
        let mut pool = FeedPool::new(10.0);
        let result = pool.use_feeds(25.0);

        assert!(matches!(
            result,
            Err(SimError::InsufficientFeed { requested, available })
                if requested == 25.0 && available == 10.0
        ));
        assert_eq!(pool.amount, 10.0);
    }
}
