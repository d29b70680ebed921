//! # USD Metrics
//!
//! Values simulation rows in USD once the EGG price is known.
//!
//! ```text
//! egg_value = staked_eggs × egg_price × 0.916667
//! gain_loss = egg_value - Σ chicken base_price - init_egg_stake × egg_price
//! ```
//!
//! The initial stake is deducted at full market price so it is not counted
//! as profit when it shows up in `staked_eggs`.

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::constants::*;
use crate::params::SimulationParams;
use crate::simulator::SimulationRow;

/// Simulation row valued in USD
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DerivedRow {
    /// Day number, starting at 1
    pub day: u32,
    /// Index of the chicken in input order
    pub chicken_id: usize,
    /// Chicken level
    pub level: u32,
    /// Staked EGG
    pub staked_eggs: f64,
    /// FEED left in the pool
    pub feeds: f64,
    /// Value of the staked EGG in USD
    pub egg_value_usd: f64,
    /// Value minus outlay in USD
    pub gain_loss_usd: f64,
}

/// When the farm pays for itself
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Payback {
    /// First day with a positive gain
    Day { day: u32, gain_loss_usd: f64 },
    /// Still in the red at the end of the horizon
    NotWithinHorizon,
}

impl Payback {
    /// Payback day, if any
    pub fn day(&self) -> Option<u32> {
        match self {
            Self::Day { day, .. } => Some(*day),
            Self::NotWithinHorizon => None,
        }
    }
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day { day, .. } => write!(f, "Payback in {} days", day),
            Self::NotWithinHorizon => {
                write!(f, "No payback within the horizon, try more simulation days")
            }
        }
    }
}

/// Turns raw rows into USD rows
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricsDerivation {
    /// EGG price in USD
    pub egg_price: f64,
    /// USD spent on chickens
    pub chicken_outlay: f64,
    /// EGG staked before day 1
    pub init_egg_stake: f64,
}

impl MetricsDerivation {
    /// Create a derivation for a price and outlay
    pub fn new(egg_price: f64, chicken_outlay: f64, init_egg_stake: f64) -> Self {
        Self {
            egg_price,
            chicken_outlay,
            init_egg_stake,
        }
    }

    /// Derivation matching a run's params
    pub fn from_params(params: &SimulationParams) -> Self {
        Self::new(params.egg_price, params.chicken_outlay(), params.init_egg_stake)
    }

    /// Total USD outlay, chickens plus the initial stake
    pub fn total_outlay(&self) -> f64 {
        self.chicken_outlay + self.init_egg_stake * self.egg_price
    }

    /// USD value of a staked EGG balance
    pub fn egg_value_usd(&self, staked_eggs: f64) -> f64 {
        staked_eggs * self.egg_price * EGG_VALUE_RATE
    }

    /// USD gain (positive) or loss (negative) for a staked EGG balance
    pub fn gain_loss_usd(&self, staked_eggs: f64) -> f64 {
        self.egg_value_usd(staked_eggs) - self.total_outlay()
    }

    /// Value a single row
    pub fn derive_row(&self, row: &SimulationRow) -> DerivedRow {
        DerivedRow {
            day: row.day,
            chicken_id: row.chicken_id,
            level: row.level,
            staked_eggs: row.staked_eggs,
            feeds: row.feeds,
            egg_value_usd: self.egg_value_usd(row.staked_eggs),
            gain_loss_usd: self.gain_loss_usd(row.staked_eggs),
        }
    }

    /// Value every row, keeping order
    pub fn derive(&self, rows: &[SimulationRow]) -> Vec<DerivedRow> {
        rows.iter().map(|row| self.derive_row(row)).collect()
    }
}

/// Find the payback day in derived rows.
///
/// Picks the smallest positive gain, which is the first crossing into profit
/// because gain/loss never falls over a run. Ties keep the earliest row.
pub fn payback_day(rows: &[DerivedRow]) -> Payback {
    let mut best: Option<&DerivedRow> = None;
    for row in rows.iter().filter(|r| r.gain_loss_usd > 0.0) {
        match best {
            Some(b) if b.gain_loss_usd <= row.gain_loss_usd => {}
            _ => best = Some(row),
        }
    }

    match best {
        Some(row) => Payback::Day {
            day: row.day,
            gain_loss_usd: row.gain_loss_usd,
        },
        None => Payback::NotWithinHorizon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(day: u32, staked_eggs: f64) -> SimulationRow {
        SimulationRow { day, chicken_id: 0, level: 1, staked_eggs, feeds: 0.0 }
    }

    #[test]
    fn test_egg_value() {
        let metrics = MetricsDerivation::new(2.0, 400.0, 0.0);
        assert_eq!(metrics.egg_value_usd(100.0), 100.0 * 2.0 * EGG_VALUE_RATE);
        assert_eq!(metrics.egg_value_usd(0.0), 0.0);
    }

    #[test]
    fn test_gain_loss_deducts_initial_stake() {
        let metrics = MetricsDerivation::new(5.0, 400.0, 20.0);
        assert_eq!(metrics.total_outlay(), 500.0);

        let derived = metrics.derive_row(&row(1, 20.0));
        assert_eq!(derived.egg_value_usd, 20.0 * 5.0 * EGG_VALUE_RATE);
        assert_eq!(derived.gain_loss_usd, derived.egg_value_usd - 500.0);
    }

    #[test]
    fn test_payback_first_crossing() {
        let metrics = MetricsDerivation::new(1.0, 10.0, 0.0);
        let rows = metrics.derive(&[row(1, 5.0), row(2, 10.0), row(3, 12.0), row(4, 20.0)]);

        // 10 × 0.916667 is still below the 10 USD outlay
        let payback = payback_day(&rows);
        assert_eq!(payback.day(), Some(3));
        assert_eq!(payback.to_string(), "Payback in 3 days");
    }

    #[test]
    fn test_no_payback() {
        let metrics = MetricsDerivation::new(1.0, 1_000.0, 0.0);
        let rows = metrics.derive(&[row(1, 5.0), row(2, 10.0)]);

        assert_eq!(payback_day(&rows), Payback::NotWithinHorizon);
        assert_eq!(payback_day(&[]), Payback::NotWithinHorizon);
        assert!(Payback::NotWithinHorizon.to_string().contains("more simulation days"));
    }

    #[test]
    fn test_payback_serializes_tagged() {
        let json = serde_json::to_string(&Payback::Day { day: 3, gain_loss_usd: 1.0 }).unwrap();
        assert_eq!(json, r#"{"status":"day","day":3,"gain_loss_usd":1.0}"#);
    }
}
