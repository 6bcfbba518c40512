//! Stateful route planner.
//!
//! Holds the latest location list and ship snapshot, keeps a derived view of
//! where the ship is, and answers navigation queries against a ranked list of
//! trades that is rebuilt from scratch whenever either input changes.

use std::collections::HashMap;

use tracing::{debug, info, trace, Level};

use super::calculation::{
    fuel_quantity, fuel_to_travel, good_quantity, good_volume, remaining_space_after_refuel,
    validate_range,
};
use super::entities::{CargoLine, FuelProfiles, Good, Location, Ship, FUEL};
use super::error::RouteError;
use super::trade_route::{
    rank_trade_options, NavigateParams, NavigationOutcome, TradeOption, TradeRoute, TripSummary,
};
use crate::util::config::PlannerConfig;

/// Everything derived from one (locations, ship) pair.
///
/// Built in one go and swapped in whole, so readers never see a ranked list
/// that disagrees with the current location it was computed from.
#[derive(Clone, Debug, Default)]
struct Snapshot {
    current_location: Option<Location>,
    fuel_unit_cost: f64,
    trade_options: Vec<TradeOption>,
}

impl Snapshot {
    fn derive(locations: &[Location], ship: Option<&Ship>) -> Self {
        let current_location = ship.and_then(|ship| {
            locations
                .iter()
                .find(|location| location.symbol == ship.location)
                .cloned()
        });
        let fuel_unit_cost = current_location
            .as_ref()
            .and_then(|location| location.good(FUEL))
            .map(|fuel| fuel.purchase_price_per_unit)
            .unwrap_or(0.0);

        Self {
            current_location,
            fuel_unit_cost,
            trade_options: Vec::new(),
        }
    }

    fn with_ranking(mut self, locations: &[Location], ship: &Ship, profiles: &FuelProfiles) -> Self {
        self.trade_options = rank_trade_options(
            self.current_location.as_ref(),
            locations,
            ship,
            self.fuel_unit_cost,
            profiles,
        );
        self
    }
}

/// Route-selection engine for a single ship.
///
/// Starts uninitialized; once both locations and a ship have been supplied the
/// ranked trade list is built and kept current on every update. Not
/// synchronized: wrap it in a lock if several callers share one instance.
#[derive(Clone, Debug, Default)]
pub struct RoutePlanner {
    locations: Option<Vec<Location>>,
    ship: Option<Ship>,
    config: PlannerConfig,
    snapshot: Snapshot,
    initialized: bool,
}

impl RoutePlanner {
    pub fn new(locations: Vec<Location>, ship: Ship) -> Self {
        Self::with_config(locations, ship, PlannerConfig::default())
    }

    pub fn with_config(locations: Vec<Location>, ship: Ship, config: PlannerConfig) -> Self {
        let mut planner = Self {
            locations: Some(locations),
            ship: Some(ship),
            config,
            ..Self::default()
        };
        planner.rebuild();
        planner.initialized = true;
        planner
    }

    /// Replaces the known locations.
    pub fn set_locations(&mut self, locations: Vec<Location>) {
        self.locations = Some(locations);
        self.refresh();
    }

    /// Replaces the ship snapshot.
    pub fn set_ship(&mut self, ship: Ship) {
        self.ship = Some(ship);
        self.refresh();
    }

    /// Swaps in a new configuration and re-ranks with its fuel profiles.
    pub fn set_config(&mut self, config: PlannerConfig) {
        self.config = config;
        if self.initialized {
            self.rebuild();
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn locations(&self) -> &[Location] {
        self.locations.as_deref().unwrap_or_default()
    }

    pub fn ship(&self) -> Option<&Ship> {
        self.ship.as_ref()
    }

    pub fn current_location(&self) -> Option<&Location> {
        self.snapshot.current_location.as_ref()
    }

    pub fn current_market(&self) -> Option<&[Good]> {
        self.current_location()
            .and_then(|location| location.marketplace.as_deref())
    }

    /// Purchase price of FUEL at the current location, 0 when unlisted.
    pub fn fuel_unit_cost(&self) -> f64 {
        self.snapshot.fuel_unit_cost
    }

    /// Ranked trades, best first.
    pub fn trade_options(&self) -> &[TradeOption] {
        &self.snapshot.trade_options
    }

    /// Distance, fuel and profit breakdown of every ranked trade.
    pub fn trip_summaries(&self) -> Vec<TripSummary> {
        let (Some(ship), Some(origin)) = (self.ship.as_ref(), self.current_location()) else {
            return Vec::new();
        };
        self.trade_options()
            .iter()
            .map(|option| {
                TripSummary::for_option(
                    option,
                    ship,
                    origin,
                    self.fuel_unit_cost(),
                    &self.config.fuel_profiles,
                )
            })
            .collect()
    }

    /// Navigates with the configured default parameters.
    pub fn navigate_default(&self) -> NavigationOutcome {
        self.navigate(&self.config.navigation)
    }

    /// Picks the best reachable destination and builds its shopping list.
    ///
    /// Lenient form: a missing route is reported as `NoRoute` with its cause.
    pub fn navigate(&self, params: &NavigateParams) -> NavigationOutcome {
        let outcome = NavigationOutcome::from(self.plan(params));
        match &outcome {
            NavigationOutcome::Route(route) => info!(
                destination = %route.destination.symbol,
                lines = route.cargo.len(),
                volume = route.total_volume(),
                "trade route selected"
            ),
            NavigationOutcome::NoRoute(reason) => debug!(%reason, "no trade route"),
        }
        outcome
    }

    /// Strict form of [`navigate`](Self::navigate): every miss is an error.
    pub fn navigate_strict(&self, params: &NavigateParams) -> Result<TradeRoute, RouteError> {
        self.navigate(params).into_result()
    }

    fn refresh(&mut self) {
        if self.initialized || (self.locations.is_some() && self.ship.is_some()) {
            self.rebuild();
            self.initialized = true;
        } else {
            self.snapshot = Snapshot::derive(self.locations(), self.ship.as_ref());
        }
    }

    fn rebuild(&mut self) {
        let snapshot = Snapshot::derive(self.locations(), self.ship.as_ref());
        let snapshot = match self.ship.as_ref() {
            Some(ship) => snapshot.with_ranking(self.locations(), ship, &self.config.fuel_profiles),
            None => snapshot,
        };
        self.snapshot = snapshot;

        debug!(
            location = self.current_location().map(|l| l.symbol.as_str()),
            options = self.snapshot.trade_options.len(),
            "rebuilt trade ranking"
        );
        if !tracing::enabled!(Level::TRACE) {
            return;
        }
        for trip in self.trip_summaries() {
            trace!(
                destination = %trip.destination,
                good = %trip.good,
                distance = trip.distance,
                fuel = trip.fuel,
                fuel_cost = trip.fuel_cost,
                profit = trip.profit,
                score = trip.profit_per_distance,
                "ranked trip"
            );
        }
    }

    fn plan(&self, params: &NavigateParams) -> Result<TradeRoute, RouteError> {
        let (Some(ship), Some(origin)) = (self.ship.as_ref(), self.current_location()) else {
            return Err(RouteError::NoProfitableTrade);
        };
        let profiles = &self.config.fuel_profiles;

        let mut candidates: Vec<&TradeOption> = self.trade_options().iter().collect();
        if candidates.is_empty() {
            return Err(RouteError::NoProfitableTrade);
        }

        if params.range > 0.0 {
            candidates.retain(|option| validate_range(ship, params.range, &option.destination));
            if candidates.is_empty() {
                return Err(RouteError::NoTradeInRange {
                    range: params.range,
                });
            }
        }

        let fuel_available = origin
            .good(FUEL)
            .map(|fuel| fuel.quantity_available)
            .unwrap_or(0);
        let (destination, fuel) = candidates
            .iter()
            .copied()
            .find_map(|option| {
                let burn = fuel_to_travel(ship, origin, &option.destination, profiles);
                let fuel = fuel_quantity(ship, burn, params.fuel_margin);
                let feasible = fuel <= fuel_available && fuel <= ship.space_available;
                feasible.then_some((&option.destination, fuel))
            })
            .ok_or(RouteError::NoFeasibleFuelPlan)?;

        candidates.retain(|option| option.destination.symbol == destination.symbol);

        let mut cargo = vec![CargoLine {
            good: FUEL.to_string(),
            quantity: fuel,
            total_volume: f64::from(fuel),
        }];
        let mut bought: HashMap<&str, u32> = HashMap::from([(FUEL, fuel)]);
        let mut remaining = remaining_space_after_refuel(ship, fuel);

        for option in candidates {
            if remaining <= 0.0 {
                break;
            }
            let good = &option.origin_good;
            // Stock already claimed by earlier lines (fuel included) is not for sale twice.
            let already = bought.get(good.symbol.as_str()).copied().unwrap_or(0);
            let stock = good.quantity_available.saturating_sub(already);
            let quantity = good_quantity(remaining, good.volume_per_unit).min(stock);
            if quantity == 0 {
                continue;
            }

            let volume = good_volume(quantity, good);
            cargo.push(CargoLine {
                good: good.symbol.clone(),
                quantity,
                total_volume: volume,
            });
            *bought.entry(good.symbol.as_str()).or_insert(0) += quantity;
            remaining -= volume;
        }

        Ok(TradeRoute {
            destination: destination.clone(),
            cargo,
        })
    }
}
