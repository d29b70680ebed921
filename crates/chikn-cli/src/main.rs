//! CHIKN Return Calculator CLI
//!
//! Simulates a farm from a config file and/or command-line flags and prints
//! the payback day plus the daily table.

use anyhow::{bail, Context};
use chikn_economics::report::chicken_label;
use chikn_economics::{
    ChickenSpec, ReturnReport, SimulationParams, DEFAULT_SIM_DAYS, EGG_SYMBOL, EGG_VALUE_RATE,
    FEED_SYMBOL,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Highest starting level accepted on the command line
const MAX_INPUT_LEVEL: u32 = 100;

#[derive(Parser)]
#[command(name = "chikn")]
#[command(version = "0.1.0")]
#[command(about = "CHIKN Return Calculator - simulate chicken levels, staked EGG and payback", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a farm and print its returns
    Simulate {
        /// Configuration file path (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Chicken as LEVEL:PRICE, repeat for more chickens
        #[arg(long = "chicken", value_name = "LEVEL:PRICE", value_parser = parse_chicken)]
        chickens: Vec<ChickenSpec>,

        /// EGG price in USD
        #[arg(short, long)]
        egg_price: Option<f64>,

        /// Days to simulate
        #[arg(short, long)]
        days: Option<u32>,

        /// EGG staked before day 1
        #[arg(long)]
        init_eggs: Option<f64>,

        /// FEED in the pool before day 1
        #[arg(long)]
        feeds: Option<f64>,

        /// Print one row per (day, chicken) instead of one row per day
        #[arg(long)]
        long: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Version information
    Version,
}

fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_writer(std::io::stderr))
        .init();
}

fn expand_path(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(rest) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
    }
    path.to_path_buf()
}

fn parse_chicken(s: &str) -> Result<ChickenSpec, String> {
    let (level, price) = s
        .split_once(':')
        .ok_or_else(|| format!("expected LEVEL:PRICE, got '{}'", s))?;

    let level: u32 = level
        .trim()
        .parse()
        .map_err(|_| format!("invalid level '{}'", level))?;
    if !(1..=MAX_INPUT_LEVEL).contains(&level) {
        return Err(format!("level must be between 1 and {}", MAX_INPUT_LEVEL));
    }

    let base_price: f64 = price
        .trim()
        .parse()
        .map_err(|_| format!("invalid price '{}'", price))?;
    if !base_price.is_finite() || base_price < 0.0 {
        return Err(format!("price must be non-negative, got {}", base_price));
    }

    Ok(ChickenSpec { level, base_price })
}

/// Command-line values that override the config file
#[derive(Default)]
struct Overrides {
    chickens: Vec<ChickenSpec>,
    egg_price: Option<f64>,
    days: Option<u32>,
    init_eggs: Option<f64>,
    feeds: Option<f64>,
}

fn load_config(path: &Path) -> anyhow::Result<SimulationParams> {
    let path = expand_path(path);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config {:?}", path))?;
    let params = toml::from_str(&content)
        .with_context(|| format!("parsing config {:?}", path))?;
    tracing::debug!("Loaded config from {:?}", path);
    Ok(params)
}

fn resolve_params(
    base: Option<SimulationParams>,
    overrides: Overrides,
) -> anyhow::Result<SimulationParams> {
    let mut params = match (base, overrides.egg_price) {
        (Some(params), _) => params,
        (None, Some(egg_price)) => SimulationParams {
            chickens: Vec::new(),
            egg_price,
            sim_days: DEFAULT_SIM_DAYS,
            init_egg_stake: 0.0,
            feeds_amount: 0.0,
        },
        (None, None) => bail!("no EGG price given, pass --egg-price or set egg_price in a config file"),
    };

    if !overrides.chickens.is_empty() {
        params.chickens = overrides.chickens;
    }
    if let Some(egg_price) = overrides.egg_price {
        params.egg_price = egg_price;
    }
    if let Some(days) = overrides.days {
        params.sim_days = days;
    }
    if let Some(init_eggs) = overrides.init_eggs {
        params.init_egg_stake = init_eggs;
    }
    if let Some(feeds) = overrides.feeds {
        params.feeds_amount = feeds;
    }

    if params.chickens.is_empty() {
        bail!("no chickens given, pass --chicken LEVEL:PRICE or add [[chickens]] to the config");
    }
    for (idx, chicken) in params.chickens.iter().enumerate() {
        if !(1..=MAX_INPUT_LEVEL).contains(&chicken.level) {
            bail!(
                "{} has level {}, levels must be between 1 and {}",
                chicken_label(idx),
                chicken.level,
                MAX_INPUT_LEVEL
            );
        }
    }
    Ok(params)
}

fn format_wide_table(report: &ReturnReport) -> String {
    let mut header = format!(
        "{:>5} {:>14} {:>14} {:>16} {:>16}",
        "Days", "Staked Eggs", "Feeds", "Egg value [USD]", "Gain/Loss [USD]"
    );
    for id in 0..report.chicken_count {
        header.push_str(&format!(" {:>12}", chicken_label(id)));
    }
    let mut out = format!("{}\n{:-<2$}\n", header, "", header.len());

    for row in report.wide_rows() {
        out.push_str(&format!(
            "{:>5} {:>14.2} {:>14.2} {:>16.2} {:>16.2}",
            row.day, row.staked_eggs, row.feeds, row.egg_value_usd, row.gain_loss_usd
        ));
        for level in &row.levels {
            out.push_str(&format!(" {:>12}", level));
        }
        out.push('\n');
    }
    out
}

fn format_long_table(report: &ReturnReport) -> String {
    let mut out = format!(
        "{:>5} {:>12} {:>6} {:>14} {:>14} {:>16} {:>16}\n",
        "Days", "Chicken", "Level", "Staked Eggs", "Feeds", "Egg value [USD]", "Gain/Loss [USD]"
    );
    out.push_str(&format!(
        "{:-<5} {:-<12} {:-<6} {:-<14} {:-<14} {:-<16} {:-<16}\n",
        "", "", "", "", "", "", ""
    ));
    for row in &report.rows {
        out.push_str(&format!(
            "{:>5} {:>12} {:>6} {:>14.2} {:>14.2} {:>16.2} {:>16.2}\n",
            row.day,
            chicken_label(row.chicken_id),
            row.level,
            row.staked_eggs,
            row.feeds,
            row.egg_value_usd,
            row.gain_loss_usd
        ));
    }
    out
}

#[derive(Serialize)]
struct WideJson<'a> {
    chicken_count: usize,
    total_outlay_usd: f64,
    payback: &'a chikn_economics::Payback,
    rows: Vec<chikn_economics::WideRow>,
}

fn format_json(report: &ReturnReport, long: bool) -> serde_json::Result<String> {
    if long {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string_pretty(&WideJson {
            chicken_count: report.chicken_count,
            total_outlay_usd: report.total_outlay_usd,
            payback: &report.payback,
            rows: report.wide_rows(),
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Simulate {
            config,
            chickens,
            egg_price,
            days,
            init_eggs,
            feeds,
            long,
            json,
        } => {
            let base = config.as_deref().map(load_config).transpose()?;
            let params = resolve_params(
                base,
                Overrides { chickens, egg_price, days, init_eggs, feeds },
            )?;

            tracing::info!(
                "Simulating {} chicken(s) for {} days at {} USD/EGG",
                params.chickens.len(),
                params.sim_days,
                params.egg_price
            );

            let report = ReturnReport::run(&params)?;

            if json {
                println!("{}", format_json(&report, long)?);
            } else {
                println!("{}", report.payback);
                println!("Total outlay: {:.2} USD", report.total_outlay_usd);
                println!("");
                if long {
                    print!("{}", format_long_table(&report));
                } else {
                    print!("{}", format_wide_table(&report));
                }
            }
        }

        Commands::Version => {
            println!("CHIKN Return Calculator v0.1.0");
            println!("Rust: {}", rustc_version_runtime::version());
            println!("");
            println!("Model:");
            println!("  - {} per day: 1 + 0.25 x (level - 1)", EGG_SYMBOL);
            println!("  - {} per level up: 25 x level^2", FEED_SYMBOL);
            println!("  - {} per staked {} per day: 3", FEED_SYMBOL, EGG_SYMBOL);
            println!("  - {} to USD rate: {}", EGG_SYMBOL, EGG_VALUE_RATE);
        }
    }

    Ok(())
}
