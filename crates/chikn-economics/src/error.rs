//! Error types for CHIKN simulations

use thiserror::Error;

/// Result type alias for simulation operations
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors that can occur while setting up or running a simulation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    // === Input Validation ===
    /// Invalid input value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Prices and levels describe a different number of chickens
    #[error("Got {base_prices} chicken prices but {levels} levels")]
    LengthMismatch { base_prices: usize, levels: usize },

    /// No chicken to simulate
    #[error("At least one chicken is required")]
    NoChickens,

    /// Horizon outside the accepted range
    #[error("Simulation days must be between 1 and {max}, got {days}")]
    SimDaysOutOfRange { days: u32, max: u32 },

    // === Feed Pool ===
    /// Withdrawal larger than the pool balance
    #[error("Not enough FEED: requested {requested}, available {available}")]
    InsufficientFeed { requested: f64, available: f64 },
}

impl SimError {
    /// Numeric error code for callers that report errors as data
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidInput(_) => 2001,
            Self::LengthMismatch { .. } => 2002,
            Self::NoChickens => 2003,
            Self::SimDaysOutOfRange { .. } => 2004,
            Self::InsufficientFeed { .. } => 3001,
        }
    }

    /// Whether the error points at a defect in the simulator itself.
    ///
    /// The daily loop only withdraws feed it has checked for, so an
    /// `InsufficientFeed` coming out of a run is never the caller's fault.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InsufficientFeed { .. })
    }
}
