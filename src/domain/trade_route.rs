//! Trade options, routes and the ranking of candidate trades.

use serde::{Deserialize, Serialize};

use super::calculation::{
    fuel_cost, fuel_to_travel, good_cost, good_profit, good_quantity, location_distance,
    profit_per_distance_unit, sort_descending_by_key,
};
use super::entities::{CargoLine, FuelProfiles, Good, Location, Ship, FUEL};
use super::error::RouteError;

/// A potential trade: buy `origin_good` here, sell `destination_good` at `destination`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeOption {
    pub origin_good: Good,
    pub destination_good: Good,
    pub destination: Location,
    /// Net profit per distance unit; always strictly positive.
    pub profit_per_distance: f64,
}

impl TradeOption {
    pub fn good_symbol(&self) -> &str {
        &self.origin_good.symbol
    }
}

/// Where to fly and what to buy before leaving. The fuel line comes first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRoute {
    pub destination: Location,
    pub cargo: Vec<CargoLine>,
}

impl TradeRoute {
    pub fn fuel_line(&self) -> Option<&CargoLine> {
        self.cargo.first().filter(|line| line.good == FUEL)
    }

    /// Trade goods in purchase order, fuel excluded.
    pub fn goods(&self) -> &[CargoLine] {
        match self.fuel_line() {
            Some(_) => &self.cargo[1..],
            None => &self.cargo,
        }
    }

    pub fn total_volume(&self) -> f64 {
        self.cargo.iter().map(|line| line.total_volume).sum()
    }
}

/// Parameters of a navigation query.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigateParams {
    /// Maximum distance from the ship; `0` disables the range filter.
    pub range: f64,
    /// Percentage added on top of the minimum fuel requirement.
    pub fuel_margin: f64,
}

impl Default for NavigateParams {
    fn default() -> Self {
        Self {
            range: 0.0,
            fuel_margin: 5.0,
        }
    }
}

/// Result of a lenient navigation query. The failure reason is kept even
/// when the caller only cares whether a route exists.
#[derive(Clone, Debug, PartialEq)]
pub enum NavigationOutcome {
    Route(TradeRoute),
    NoRoute(RouteError),
}

impl NavigationOutcome {
    pub fn route(&self) -> Option<&TradeRoute> {
        match self {
            Self::Route(route) => Some(route),
            Self::NoRoute(_) => None,
        }
    }

    pub fn is_route(&self) -> bool {
        matches!(self, Self::Route(_))
    }

    pub fn into_result(self) -> Result<TradeRoute, RouteError> {
        match self {
            Self::Route(route) => Ok(route),
            Self::NoRoute(reason) => Err(reason),
        }
    }
}

impl From<Result<TradeRoute, RouteError>> for NavigationOutcome {
    fn from(result: Result<TradeRoute, RouteError>) -> Self {
        match result {
            Ok(route) => Self::Route(route),
            Err(reason) => Self::NoRoute(reason),
        }
    }
}

/// Per-trip breakdown of a ranked option, for inspection only.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    pub destination: String,
    pub good: String,
    pub distance: f64,
    pub fuel: u32,
    pub fuel_cost: f64,
    pub units: u32,
    pub purchase_cost: f64,
    pub revenue: f64,
    pub profit: f64,
    pub profit_per_distance: f64,
}

impl TripSummary {
    /// Breaks down a full-hold run of `option` starting from `origin`.
    pub fn for_option(
        option: &TradeOption,
        ship: &Ship,
        origin: &Location,
        fuel_unit_cost: f64,
        profiles: &FuelProfiles,
    ) -> Self {
        let fuel = fuel_to_travel(ship, origin, &option.destination, profiles);
        let fuel_cost = fuel_cost(fuel, fuel_unit_cost);
        let free_space = f64::from(ship.space_available) - f64::from(fuel);
        let units = good_quantity(free_space, option.origin_good.volume_per_unit)
            .min(option.origin_good.quantity_available);
        let purchase_cost = good_cost(&option.origin_good, units);
        let revenue = good_profit(&option.destination_good, units);

        Self {
            destination: option.destination.symbol.clone(),
            good: option.good_symbol().to_string(),
            distance: location_distance(origin, &option.destination),
            fuel,
            fuel_cost,
            units,
            purchase_cost,
            revenue,
            profit: revenue - purchase_cost - fuel_cost,
            profit_per_distance: option.profit_per_distance,
        }
    }
}

/// Builds the ranked list of profitable trades leaving `origin`.
///
/// Every other location with a marketplace is paired good-by-good with the
/// origin market; a pairing is kept when the origin has stock and the score is
/// strictly positive. The result is sorted best first; equal scores keep
/// discovery order (location order, then the destination market's good order).
pub fn rank_trade_options(
    origin: Option<&Location>,
    locations: &[Location],
    ship: &Ship,
    fuel_unit_cost: f64,
    profiles: &FuelProfiles,
) -> Vec<TradeOption> {
    let Some(origin) = origin else {
        return Vec::new();
    };
    let Some(local_market) = origin.marketplace.as_ref() else {
        return Vec::new();
    };

    let mut options = Vec::new();

    for destination in locations {
        if destination.symbol == origin.symbol {
            continue;
        }
        let Some(remote_market) = destination.marketplace.as_ref() else {
            continue;
        };

        for destination_good in remote_market.iter().filter(|g| g.has_valid_volume()) {
            let Some(origin_good) = local_market
                .iter()
                .find(|g| g.symbol == destination_good.symbol)
                .filter(|g| g.quantity_available > 0 && g.has_valid_volume())
            else {
                continue;
            };

            let score = profit_per_distance_unit(
                destination_good,
                origin_good,
                ship,
                origin,
                destination,
                fuel_unit_cost,
                profiles,
            );
            // Rejects NaN as well as non-positive scores.
            if !(score > 0.0) {
                continue;
            }

            options.push(TradeOption {
                origin_good: origin_good.clone(),
                destination_good: destination_good.clone(),
                destination: destination.clone(),
                profit_per_distance: score,
            });
        }
    }

    sort_descending_by_key(&mut options, |option| option.profit_per_distance);
    options
}
