//! Simulation inputs.
//!
//! `SimulationParams` deserializes from a config file such as:
//!
//! ```toml
//! egg_price = 0.85
//! sim_days = 100
//! init_egg_stake = 0.0
//!
//! [[chickens]]
//! level = 1
//! base_price = 400.0
//! ```

use serde::{Deserialize, Serialize};
use crate::chicken::Chicken;
use crate::constants::*;
use crate::error::{Result, SimError};

/// One chicken to put on the farm
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChickenSpec {
    /// Starting level
    pub level: u32,
    /// Price paid in USD
    pub base_price: f64,
}

/// Everything a simulation run needs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Chickens, in input order
    #[serde(default)]
    pub chickens: Vec<ChickenSpec>,

    /// EGG price in USD
    pub egg_price: f64,

    /// Number of days to simulate
    #[serde(default = "default_sim_days")]
    pub sim_days: u32,

    /// EGG already staked on day 0
    #[serde(default)]
    pub init_egg_stake: f64,

    /// FEED already in the pool on day 0
    #[serde(default)]
    pub feeds_amount: f64,
}

fn default_sim_days() -> u32 {
    DEFAULT_SIM_DAYS
}

impl SimulationParams {
    /// Build params from parallel price and level columns
    pub fn from_columns(
        base_prices: &[f64],
        levels: &[u32],
        egg_price: f64,
        sim_days: u32,
        init_egg_stake: f64,
        feeds_amount: f64,
    ) -> Result<Self> {
        if base_prices.len() != levels.len() {
            return Err(SimError::LengthMismatch {
                base_prices: base_prices.len(),
                levels: levels.len(),
            });
        }

        let chickens = base_prices
            .iter()
            .zip(levels)
            .map(|(&base_price, &level)| ChickenSpec { level, base_price })
            .collect();

        Ok(Self {
            chickens,
            egg_price,
            sim_days,
            init_egg_stake,
            feeds_amount,
        })
    }

    /// Check every precondition of a run
    pub fn validate(&self) -> Result<()> {
        if self.chickens.is_empty() {
            return Err(SimError::NoChickens);
        }
        if self.sim_days == 0 || self.sim_days > MAX_SIM_DAYS {
            return Err(SimError::SimDaysOutOfRange {
                days: self.sim_days,
                max: MAX_SIM_DAYS,
            });
        }

        non_negative("egg_price", self.egg_price)?;
        non_negative("init_egg_stake", self.init_egg_stake)?;
        non_negative("feeds_amount", self.feeds_amount)?;

        for (idx, spec) in self.chickens.iter().enumerate() {
            if spec.level == 0 {
                return Err(SimError::InvalidInput(format!(
                    "chicken #{} has level 0, levels start at 1",
                    idx + 1
                )));
            }
            non_negative(&format!("chicken #{} base_price", idx + 1), spec.base_price)?;
        }

        Ok(())
    }

    /// Fresh chickens for a run
    pub fn build_chickens(&self) -> Vec<Chicken> {
        self.chickens
            .iter()
            .map(|spec| Chicken::new(spec.base_price, spec.level))
            .collect()
    }

    /// USD spent on chickens
    pub fn chicken_outlay(&self) -> f64 {
        self.chickens.iter().map(|c| c.base_price).sum()
    }

    /// USD spent on chickens plus the initial stake at market price
    pub fn total_outlay(&self) -> f64 {
        self.chicken_outlay() + self.init_egg_stake * self.egg_price
    }
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SimError::InvalidInput(format!(
            "{} must be a finite non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}
