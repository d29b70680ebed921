//! # Return Report
//!
//! Runs a full simulation and reshapes its rows for presentation: a wide
//! per-day table and the three series a dashboard charts (gain/loss, level
//! per chicken, staked EGG).

use serde::{Deserialize, Serialize};
use crate::error::Result;
use crate::metrics::{payback_day, DerivedRow, MetricsDerivation, Payback};
use crate::params::SimulationParams;
use crate::simulator::Simulator;

/// Display label for a chicken index
pub fn chicken_label(chicken_id: usize) -> String {
    format!("chicken #{}", chicken_id + 1)
}

/// One day of the farm with every chicken's level side by side
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WideRow {
    /// Day number, starting at 1
    pub day: u32,
    /// Staked EGG
    pub staked_eggs: f64,
    /// FEED left in the pool
    pub feeds: f64,
    /// Value of the staked EGG in USD
    pub egg_value_usd: f64,
    /// Value minus outlay in USD
    pub gain_loss_usd: f64,
    /// Level of each chicken, in input order
    pub levels: Vec<u32>,
}

/// Level history of one chicken
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelSeries {
    /// Chicken label, e.g. `chicken #1`
    pub label: String,
    /// (day, level) points
    pub points: Vec<(u32, u32)>,
}

/// Result of one simulation run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReturnReport {
    /// Number of chickens simulated
    pub chicken_count: usize,
    /// Chickens plus initial stake, in USD
    pub total_outlay_usd: f64,
    /// Payback day, if reached
    pub payback: Payback,
    /// Day-major rows, one per (day, chicken)
    pub rows: Vec<DerivedRow>,
}

impl ReturnReport {
    /// Validate `params`, simulate and value the result
    pub fn run(params: &SimulationParams) -> Result<Self> {
        params.validate()?;

        let mut sim = Simulator::from_params(params);
        sim.run(params.sim_days)?;

        let metrics = MetricsDerivation::from_params(params);
        let rows = metrics.derive(sim.rows());
        let payback = payback_day(&rows);

        let report = Self {
            chicken_count: params.chickens.len(),
            total_outlay_usd: metrics.total_outlay(),
            payback,
            rows,
        };

        match payback {
            Payback::Day { day, .. } => tracing::info!(
                chickens = report.chicken_count,
                days = params.sim_days,
                payback_day = day,
                "simulation complete"
            ),
            Payback::NotWithinHorizon => tracing::warn!(
                chickens = report.chicken_count,
                days = params.sim_days,
                final_gain_loss = report.final_gain_loss_usd(),
                "no payback within horizon"
            ),
        }

        Ok(report)
    }

    /// Rows for the last simulated day
    fn last_day(&self) -> &[DerivedRow] {
        let start = self.rows.len().saturating_sub(self.chicken_count);
        &self.rows[start..]
    }

    /// Chicken levels at the end of the run
    pub fn final_levels(&self) -> Vec<u32> {
        self.last_day().iter().map(|r| r.level).collect()
    }

    /// Staked EGG at the end of the run
    pub fn final_staked_eggs(&self) -> f64 {
        self.rows.last().map(|r| r.staked_eggs).unwrap_or_default()
    }

    /// Gain or loss at the end of the run
    pub fn final_gain_loss_usd(&self) -> f64 {
        self.rows
            .last()
            .map(|r| r.gain_loss_usd)
            .unwrap_or(-self.total_outlay_usd)
    }

    /// Pivot to one row per day
    pub fn wide_rows(&self) -> Vec<WideRow> {
        if self.chicken_count == 0 {
            return Vec::new();
        }
        self.rows
            .chunks(self.chicken_count)
            .map(|day| WideRow {
                day: day[0].day,
                staked_eggs: day[0].staked_eggs,
                feeds: day[0].feeds,
                egg_value_usd: day[0].egg_value_usd,
                gain_loss_usd: day[0].gain_loss_usd,
                levels: day.iter().map(|r| r.level).collect(),
            })
            .collect()
    }

    /// (day, gain/loss) points
    pub fn gain_loss_series(&self) -> Vec<(u32, f64)> {
        self.per_day(|r| r.gain_loss_usd)
    }

    /// (day, staked EGG) points
    pub fn staked_eggs_series(&self) -> Vec<(u32, f64)> {
        self.per_day(|r| r.staked_eggs)
    }

    /// Level history for every chicken
    pub fn level_series(&self) -> Vec<LevelSeries> {
        let mut series: Vec<LevelSeries> = (0..self.chicken_count)
            .map(|id| LevelSeries {
                label: chicken_label(id),
                points: Vec::with_capacity(self.rows.len() / self.chicken_count.max(1)),
            })
            .collect();

        for row in &self.rows {
            if let Some(s) = series.get_mut(row.chicken_id) {
                s.points.push((row.day, row.level));
            }
        }
        series
    }

    fn per_day(&self, value: impl Fn(&DerivedRow) -> f64) -> Vec<(u32, f64)> {
        self.rows
            .iter()
            .filter(|r| r.chicken_id == 0)
            .map(|r| (r.day, value(r)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_chickens(days: u32) -> ReturnReport {
        let params =
            SimulationParams::from_columns(&[400.0, 300.0], &[1, 3], 5.0, days, 0.0, 0.0).unwrap();
        ReturnReport::run(&params).unwrap()
    }

    #[test]
    fn test_chicken_label() {
        assert_eq!(chicken_label(0), "chicken #1");
        assert_eq!(chicken_label(9), "chicken #10");
    }

    #[test]
    fn test_wide_rows() {
        let report = two_chickens(30);
        let wide = report.wide_rows();

        assert_eq!(wide.len(), 30);
        assert_eq!(wide[0].day, 1);
        assert_eq!(wide[0].levels, vec![1, 3]);
        assert_eq!(wide[29].day, 30);
        assert_eq!(wide[29].levels, report.final_levels());
        assert_eq!(wide[29].staked_eggs, report.final_staked_eggs());
    }

    #[test]
    fn test_series() {
        let report = two_chickens(20);

        let gain_loss = report.gain_loss_series();
        assert_eq!(gain_loss.len(), 20);
        assert_eq!(gain_loss[0].0, 1);
        assert_eq!(gain_loss[19].1, report.final_gain_loss_usd());

        let eggs = report.staked_eggs_series();
        // 1.0 + 1.5 on the first day
        assert_eq!(eggs[0], (1, 2.5));

        let levels = report.level_series();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[1].label, "chicken #2");
        assert_eq!(levels[1].points.len(), 20);
        assert_eq!(levels[1].points[0], (1, 3));
    }

    #[test]
    fn test_outlay_and_payback() {
        let report = two_chickens(10);
        assert_eq!(report.total_outlay_usd, 700.0);
        assert_eq!(report.payback, Payback::NotWithinHorizon);
    }

    #[test]
    fn test_level_series_skips_unknown_chicken() {
        let report: ReturnReport = serde_json::from_str(
            r#"{
                "chicken_count": 1,
                "total_outlay_usd": 400.0,
                "payback": { "status": "not_within_horizon" },
                "rows": [
                    { "day": 1, "chicken_id": 0, "level": 1, "staked_eggs": 1.0, "feeds": 0.0,
                      "egg_value_usd": 1.0, "gain_loss_usd": -399.0 },
                    { "day": 1, "chicken_id": 3, "level": 2, "staked_eggs": 1.0, "feeds": 0.0,
                      "egg_value_usd": 1.0, "gain_loss_usd": -399.0 }
                ]
            }"#,
        )
        .unwrap();

        let levels = report.level_series();
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].points, vec![(1, 1)]);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let mut params =
            SimulationParams::from_columns(&[400.0], &[1], 5.0, 10, 0.0, 0.0).unwrap();
        params.sim_days = 0;
        assert!(ReturnReport::run(&params).is_err());
    }
}
