//! Trade-route domain: data model, formulas, ranking and the planner.

pub mod calculation;
pub mod entities;
pub mod error;
pub mod planner;
pub mod trade_route;

pub use entities::{
    CargoLine, FuelProfile, FuelProfiles, Good, Location, LocationKind, Ship, FUEL,
};
pub use error::{DomainError, RouteError};
pub use planner::RoutePlanner;
pub use trade_route::{
    rank_trade_options, NavigateParams, NavigationOutcome, TradeOption, TradeRoute, TripSummary,
};
