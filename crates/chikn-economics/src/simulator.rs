//! # Daily Simulation Loop
//!
//! Each simulated day runs, in order:
//!
//! 1. **Produce**: the stake as it stood at the end of yesterday adds
//!    `3 × staked_eggs` FEED to the pool.
//! 2. **Select**: the lowest level chicken is up for feeding (ties go to the
//!    chicken listed first).
//! 3. **Feed**: if the pool covers that chicken's full `max_feed`, exactly that
//!    much is eaten. One chicken, one meal, never a partial one.
//! 4. **Lay**: every chicken's `egg_per_day` at its new level is staked.
//! 5. **Record**: one row per chicken.

use serde::{Deserialize, Serialize};
use crate::chicken::Chicken;
use crate::error::Result;
use crate::feed::FeedPool;
use crate::params::SimulationParams;
use crate::stake::EggStake;

/// Farm state for one chicken at the end of a day
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationRow {
    /// Day number, starting at 1
    pub day: u32,
    /// Index of the chicken in input order
    pub chicken_id: usize,
    /// Chicken level after the day's feeding
    pub level: u32,
    /// Staked EGG after the day's laying
    pub staked_eggs: f64,
    /// FEED left in the pool
    pub feeds: f64,
}

/// Owns one farm and steps it forward a day at a time
#[derive(Clone, Debug)]
pub struct Simulator {
    chickens: Vec<Chicken>,
    stake: EggStake,
    feed_pool: FeedPool,
    /// Days simulated so far
    day: u32,
    rows: Vec<SimulationRow>,
}

impl Simulator {
    /// Create a simulator from already built parts
    pub fn new(chickens: Vec<Chicken>, stake: EggStake, feed_pool: FeedPool) -> Self {
        Self {
            chickens,
            stake,
            feed_pool,
            day: 0,
            rows: Vec::new(),
        }
    }

    /// Create a simulator for validated params
    pub fn from_params(params: &SimulationParams) -> Self {
        let mut sim = Self::new(
            params.build_chickens(),
            EggStake::new(params.init_egg_stake),
            FeedPool::new(params.feeds_amount),
        );
        sim.rows
            .reserve(params.sim_days as usize * params.chickens.len());
        sim
    }

    /// Chickens in input order
    pub fn chickens(&self) -> &[Chicken] {
        &self.chickens
    }

    /// The EGG stake
    pub fn stake(&self) -> &EggStake {
        &self.stake
    }

    /// The FEED pool
    pub fn feed_pool(&self) -> &FeedPool {
        &self.feed_pool
    }

    /// Days simulated so far
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Rows recorded so far, day-major
    pub fn rows(&self) -> &[SimulationRow] {
        &self.rows
    }

    /// Index of the chicken that gets fed today.
    ///
    /// Lowest level wins; among equals the earliest index wins.
    pub fn eligible_index(&self) -> Option<usize> {
        self.chickens
            .iter()
            .enumerate()
            .min_by_key(|(idx, chicken)| (chicken.level, *idx))
            .map(|(idx, _)| idx)
    }

    /// Simulate one day
    pub fn step(&mut self) -> Result<()> {
        let production = self.stake.feeds_per_day();
        self.feed_pool.add_feeds(production);

        if let Some(idx) = self.eligible_index() {
            let meal = self.chickens[idx].max_feed();
            if self.feed_pool.can_cover(meal) {
                self.feed_pool.use_feeds(meal)?;
                self.chickens[idx].feed(meal);
                tracing::debug!(
                    day = self.day + 1,
                    chicken = idx + 1,
                    meal,
                    level = self.chickens[idx].level,
                    "fed chicken"
                );
            }
        }

        let laid: f64 = self.chickens.iter().map(Chicken::egg_per_day).sum();
        self.stake.add_eggs(laid);

        self.day += 1;
        for (chicken_id, chicken) in self.chickens.iter().enumerate() {
            self.rows.push(SimulationRow {
                day: self.day,
                chicken_id,
                level: chicken.level,
                staked_eggs: self.stake.staked_eggs,
                feeds: self.feed_pool.amount,
            });
        }

        tracing::trace!(
            day = self.day,
            production,
            laid,
            staked_eggs = self.stake.staked_eggs,
            feeds = self.feed_pool.amount,
            "day complete"
        );
        Ok(())
    }

    /// Simulate `days` more days
    pub fn run(&mut self, days: u32) -> Result<()> {
        for _ in 0..days {
            self.step()?;
        }
        Ok(())
    }

    /// Consume the simulator, returning its recorded rows
    pub fn into_rows(self) -> Vec<SimulationRow> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(level: u32) -> Simulator {
        Simulator::new(vec![Chicken::new(400.0, level)], EggStake::default(), FeedPool::default())
    }

    #[test]
    fn test_first_day() {
        let mut sim = single(1);
        sim.step().unwrap();

        assert_eq!(
            sim.rows(),
            &[SimulationRow { day: 1, chicken_id: 0, level: 1, staked_eggs: 1.0, feeds: 0.0 }]
        );
    }

    #[test]
    fn test_first_level_up() {
        // Pool: 0, 3, 9, 18, then 30 on day 5 which covers the 25 FEED meal
        let mut sim = single(1);
        sim.run(5).unwrap();

        let rows = sim.rows();
        assert_eq!(rows[3].level, 1);
        assert_eq!(rows[3].feeds, 18.0);
        assert_eq!(rows[3].staked_eggs, 4.0);

        assert_eq!(rows[4].day, 5);
        assert_eq!(rows[4].level, 2);
        assert_eq!(rows[4].feeds, 5.0);
        assert_eq!(rows[4].staked_eggs, 5.25);
    }

    #[test]
    fn test_lowest_level_fed_first() {
        let chickens = vec![Chicken::new(400.0, 3), Chicken::new(400.0, 1)];
        let mut sim = Simulator::new(chickens, EggStake::default(), FeedPool::new(25.0));
        assert_eq!(sim.eligible_index(), Some(1));

        sim.step().unwrap();
        assert_eq!(sim.chickens()[0].level, 3);
        assert_eq!(sim.chickens()[1].level, 2);
        assert_eq!(sim.feed_pool().amount, 0.0);
        // 1.5 + 1.25
        assert_eq!(sim.stake().staked_eggs, 2.75);
    }

    #[test]
    fn test_tie_goes_to_first() {
        let chickens = vec![Chicken::new(400.0, 2), Chicken::new(300.0, 2)];
        let mut sim = Simulator::new(chickens, EggStake::default(), FeedPool::new(250.0));
        assert_eq!(sim.eligible_index(), Some(0));

        sim.step().unwrap();
        assert_eq!(sim.chickens()[0].level, 3);
        assert_eq!(sim.chickens()[1].level, 2);
        // Only one meal per day, the rest waits in the pool
        assert_eq!(sim.feed_pool().amount, 150.0);
    }

    #[test]
    fn test_one_meal_per_day_even_with_surplus() {
        let mut sim = Simulator::new(
            vec![Chicken::new(400.0, 1)],
            EggStake::default(),
            FeedPool::new(1_000.0),
        );
        sim.step().unwrap();

        assert_eq!(sim.chickens()[0].level, 2);
        assert_eq!(sim.feed_pool().amount, 975.0);
    }

    #[test]
    fn test_no_chickens() {
        let mut sim = Simulator::new(Vec::new(), EggStake::new(10.0), FeedPool::default());
        assert_eq!(sim.eligible_index(), None);

        sim.run(3).unwrap();
        assert_eq!(sim.day(), 3);
        assert!(sim.rows().is_empty());
        assert_eq!(sim.stake().staked_eggs, 10.0);
        assert_eq!(sim.feed_pool().amount, 90.0);
    }

    #[test]
    fn test_rows_share_day_balances() {
        let chickens = vec![Chicken::new(400.0, 1), Chicken::new(400.0, 4)];
        let mut sim = Simulator::new(chickens, EggStake::new(5.0), FeedPool::default());
        sim.run(10).unwrap();

        let rows = sim.into_rows();
        assert_eq!(rows.len(), 20);
        for pair in rows.chunks(2) {
            assert_eq!(pair[0].day, pair[1].day);
            assert_eq!((pair[0].chicken_id, pair[1].chicken_id), (0, 1));
            assert_eq!(pair[0].staked_eggs, pair[1].staked_eggs);
            assert_eq!(pair[0].feeds, pair[1].feeds);
        }
    }
}
