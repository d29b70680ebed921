//! # CHIKN Economics - Return Simulation
//!
//! Day-by-day model of a CHIKN farm: chickens lay EGG, staked EGG produces
//! FEED, and FEED grows chickens into heavier (higher level) birds that lay
//! more EGG.
//!
//! ## Daily Loop
//!
//! ```text
//! ┌──────────────┐  3 FEED / EGG / day   ┌──────────────┐
//! │   EggStake   │ ────────────────────► │   FeedPool   │
//! └──────────────┘                       └──────────────┘
//!        ▲                                      │ 25 × level² FEED
//!        │ 1 + 0.25 × (level - 1) EGG / day     ▼
//!        │                               ┌──────────────┐
//!        └────────────────────────────── │   Chicken    │
//!                                        └──────────────┘
//! ```
//!
//! ## Growth Table
//!
//! | Level | EGG / day | FEED to next level |
//! |-------|-----------|--------------------|
//! | 1 | 1.00 | 25 |
//! | 2 | 1.25 | 100 |
//! | 3 | 1.50 | 225 |
//! | 4 | 1.75 | 400 |
//! | 10 | 3.25 | 2,500 |
//!
//! The entry point is [`simulate`], which validates its inputs, runs the
//! [`Simulator`] and derives USD gain/loss rows through [`MetricsDerivation`].

pub mod chicken;
pub mod error;
pub mod feed;
pub mod metrics;
pub mod params;
pub mod report;
pub mod simulator;
pub mod stake;

// Re-exports
pub use chicken::Chicken;
pub use error::{Result, SimError};
pub use feed::FeedPool;
pub use metrics::{payback_day, DerivedRow, MetricsDerivation, Payback};
pub use params::{ChickenSpec, SimulationParams};
pub use report::{LevelSeries, ReturnReport, WideRow};
pub use simulator::{SimulationRow, Simulator};
pub use stake::EggStake;

/// Game constants
pub mod constants {
    /// Yield token symbol
    pub const EGG_SYMBOL: &str = "EGG";

    /// Consumable token symbol
    pub const FEED_SYMBOL: &str = "FEED";

    /// EGG laid per day by a level 1 chicken
    pub const BASE_EGG_PER_DAY: f64 = 1.0;

    /// Extra EGG per day for each level above 1
    pub const EGG_PER_DAY_PER_LEVEL: f64 = 0.25;

    /// FEED to level up is this factor times level squared
    pub const FEED_PER_LEVEL_SQUARED: f64 = 25.0;

    /// FEED produced per day for each staked EGG
    pub const FEED_PER_STAKED_EGG: f64 = 3.0;

    /// Share of EGG market value realised when converting to USD.
    ///
    /// Applied to the staked balance only; the initial stake is deducted at
    /// full price.
    pub const EGG_VALUE_RATE: f64 = 0.916667;

    /// Longest horizon accepted by [`crate::simulate`]
    pub const MAX_SIM_DAYS: u32 = 1_000;

    /// Default horizon
    pub const DEFAULT_SIM_DAYS: u32 = 100;
}

pub use constants::*;

/// Simulate a farm and derive USD gain/loss for every (day, chicken) pair.
///
/// `base_prices[i]` and `levels[i]` describe chicken `i`. Rows come back in
/// day-major order with 1-based day numbers.
pub fn simulate(
    base_prices: &[f64],
    levels: &[u32],
    egg_price: f64,
    sim_days: u32,
    init_egg_stake: f64,
    feeds_amount: f64,
) -> Result<Vec<DerivedRow>> {
    let params = SimulationParams::from_columns(
        base_prices,
        levels,
        egg_price,
        sim_days,
        init_egg_stake,
        feeds_amount,
    )?;
    Ok(ReturnReport::run(&params)?.rows)
}
