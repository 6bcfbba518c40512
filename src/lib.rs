//! Picks the most profitable single-hop trade for a cargo ship.
//!
//! Feed a [`RoutePlanner`] the known locations and the ship snapshot, then ask
//! it to [`navigate`](RoutePlanner::navigate): the answer is a destination and
//! a shopping list whose first line is the fuel to buy before departure.
//!
//! ```
//! use cargo_route_planner::{Good, Location, LocationKind, NavigateParams, RoutePlanner, Ship};
//!
//! let home = Location {
//!     symbol: "A".into(),
//!     kind: LocationKind::Planet,
//!     x: 0.0,
//!     y: 0.0,
//!     marketplace: Some(vec![
//!         Good::try_new("FUEL", 100, 1.0, 1.0, 1.0).unwrap(),
//!         Good::try_new("METAL", 100, 1.0, 5.0, 4.0).unwrap(),
//!     ]),
//! };
//! let away = Location {
//!     symbol: "B".into(),
//!     kind: LocationKind::Planet,
//!     x: 3.0,
//!     y: 4.0,
//!     marketplace: Some(vec![Good::try_new("METAL", 50, 1.0, 12.0, 10.0).unwrap()]),
//! };
//! let ship: Ship = serde_json::from_str(
//!     r#"{"id":"s1","location":"A","x":0,"y":0,"spaceAvailable":50,"class":"MK-I"}"#,
//! )
//! .unwrap();
//!
//! let planner = RoutePlanner::new(vec![home, away], ship);
//! let route = planner.navigate_strict(&NavigateParams::default()).unwrap();
//! assert_eq!(route.destination.symbol, "B");
//! assert_eq!(route.cargo[0].quantity, 5);
//! assert_eq!(route.cargo[1].quantity, 45);
//! ```

pub mod domain;
pub mod util;

pub use domain::{
    calculation, CargoLine, DomainError, FuelProfile, FuelProfiles, Good, Location, LocationKind,
    NavigateParams, NavigationOutcome, RouteError, RoutePlanner, Ship, TradeOption, TradeRoute,
    TripSummary, FUEL,
};
pub use util::config::{load_config, load_default_config, ConfigError, PlannerConfig};
