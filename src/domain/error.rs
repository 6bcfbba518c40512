//! Error types for route planning and domain validation.

use thiserror::Error;

/// Why a navigation query produced no route.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    /// The ranked trade list was empty when the query started.
    #[error("no profitable trade available from the current location")]
    NoProfitableTrade,

    /// Every ranked trade lies at or beyond the requested range.
    #[error("no profitable trade within range {range}")]
    NoTradeInRange { range: f64 },

    /// No candidate can be fuelled from the local market within the free space.
    #[error("no trade has a feasible fuel plan")]
    NoFeasibleFuelPlan,
}

/// Errors raised when a domain record violates its invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("volume per unit of {symbol} must be positive, got {volume}")]
    NonPositiveVolume { symbol: String, volume: f64 },

    #[error("price of {symbol} must be finite, got {price}")]
    NonFinitePrice { symbol: String, price: f64 },
}
