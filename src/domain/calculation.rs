//! Pure formulas for distance, fuel, pricing and trade scoring.
//!
//! Every function here is deterministic and free of state; the planner calls
//! into this module for each arithmetic step of ranking and cargo assembly.

use std::cmp::Ordering;

use super::entities::{FuelProfiles, Good, Location, Ship, FUEL};

/// Euclidean distance between two points.
pub fn distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
}

pub fn location_distance(a: &Location, b: &Location) -> f64 {
    distance(a.x, a.y, b.x, b.y)
}

/// Fuel burned flying from `origin` to `destination`.
///
/// `round(round(d) * multiplier) + penalty + 1`, where the multiplier and
/// penalty come from the ship class profile and the penalty depends on whether
/// the origin is a planet. Never less than 1.
pub fn fuel_to_travel(
    ship: &Ship,
    origin: &Location,
    destination: &Location,
    profiles: &FuelProfiles,
) -> u32 {
    let profile = profiles.profile_for(&ship.class);
    let scaled = (location_distance(origin, destination).round() * profile.multiplier).round();
    // Negative or NaN multipliers saturate to zero.
    let scaled = if scaled > 0.0 { scaled as u32 } else { 0 };
    scaled
        .saturating_add(profile.penalty(origin))
        .saturating_add(1)
}

/// Fuel to buy on top of what the ship already holds, padded by `margin_percent`.
pub fn fuel_quantity(ship: &Ship, fuel_to_travel: u32, margin_percent: f64) -> u32 {
    let needed = fuel_to_travel.saturating_sub(ship.held_quantity(FUEL));
    let padded = (f64::from(needed) * (1.0 + margin_percent / 100.0)).ceil();
    if padded > 0.0 {
        padded as u32
    } else {
        0
    }
}

pub fn price_per_volume(price: f64, volume: f64) -> f64 {
    price / volume
}

/// Sell value per volume at the destination minus purchase cost per volume here.
/// Positive means there is an arbitrage.
pub fn good_profit_per_volume(destination_good: &Good, origin_good: &Good) -> f64 {
    price_per_volume(
        destination_good.sell_price_per_unit,
        destination_good.volume_per_unit,
    ) - price_per_volume(
        origin_good.purchase_price_per_unit,
        origin_good.volume_per_unit,
    )
}

pub fn good_profit(good: &Good, amount: u32) -> f64 {
    good.sell_price_per_unit * f64::from(amount)
}

pub fn good_cost(good: &Good, amount: u32) -> f64 {
    good.purchase_price_per_unit * f64::from(amount)
}

pub fn fuel_cost(amount: u32, unit_cost: f64) -> f64 {
    f64::from(amount) * unit_cost
}

/// Whole units of size `volume_per_unit` that fit in `space`.
pub fn good_quantity(space: f64, volume_per_unit: f64) -> u32 {
    if space <= 0.0 || volume_per_unit.is_nan() || volume_per_unit <= 0.0 {
        return 0;
    }
    (space / volume_per_unit).floor() as u32
}

pub fn good_volume(amount: u32, good: &Good) -> f64 {
    f64::from(amount) * good.volume_per_unit
}

/// Fuel takes one unit of space per unit bought.
pub fn remaining_space_after_refuel(ship: &Ship, fuel_quantity: u32) -> f64 {
    f64::from(ship.space_available) - f64::from(fuel_quantity)
}

/// Ranking score of a trade: expected profit of a full hold, net of fuel,
/// divided by the distance flown. Zero when origin and destination coincide.
pub fn profit_per_distance_unit(
    destination_good: &Good,
    origin_good: &Good,
    ship: &Ship,
    origin: &Location,
    destination: &Location,
    fuel_unit_cost: f64,
    profiles: &FuelProfiles,
) -> f64 {
    let distance = location_distance(origin, destination);
    if distance == 0.0 {
        return 0.0;
    }

    let fuel = fuel_to_travel(ship, origin, destination, profiles);
    let cost = fuel_cost(fuel, fuel_unit_cost);
    let profit_per_volume = good_profit_per_volume(destination_good, origin_good);
    let cargo_space = f64::from(ship.space_available) - f64::from(fuel);
    let profit = profit_per_volume * cargo_space - cost;

    profit / distance
}

/// True when `location` lies strictly inside `range` of the ship.
pub fn validate_range(ship: &Ship, range: f64, location: &Location) -> bool {
    range > distance(ship.x, ship.y, location.x, location.y)
}

/// Sorts larger keys first. The sort is stable, so equal keys keep their
/// incoming order; incomparable keys (NaN) are treated as equal.
pub fn sort_descending_by_key<T, F>(items: &mut [T], mut key: F)
where
    F: FnMut(&T) -> f64,
{
    items.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CargoLine, LocationKind};

    fn location(symbol: &str, kind: LocationKind, x: f64, y: f64) -> Location {
        Location {
            symbol: symbol.into(),
            kind,
            x,
            y,
            marketplace: None,
        }
    }

    fn good(symbol: &str, volume: f64, purchase: f64, sell: f64) -> Good {
        Good::try_new(symbol, 100, volume, purchase, sell).unwrap()
    }

    fn ship(class: &str, space: u32, held_fuel: u32) -> Ship {
        let cargo = if held_fuel > 0 {
            vec![CargoLine {
                good: FUEL.into(),
                quantity: held_fuel,
                total_volume: f64::from(held_fuel),
            }]
        } else {
            Vec::new()
        };
        Ship {
            id: "ship-1".into(),
            location: "A".into(),
            x: 0.0,
            y: 0.0,
            cargo,
            space_available: space,
            class: class.into(),
            manufacturer: None,
            kind: None,
            speed: None,
            max_cargo: None,
            plating: None,
            weapons: None,
        }
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_same_point() {
        assert_eq!(distance(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_eq!(distance(3.0, 4.0, 0.0, 0.0), 5.0);
        assert_eq!(distance(-2.5, 7.0, -2.5, 7.0), 0.0);
        assert!(distance(1.0, 1.0, 1.0, 1.5) > 0.0);
    }

    #[test]
    fn fuel_to_travel_applies_planet_penalty() {
        let profiles = FuelProfiles::default();
        let ship = ship("MK-I", 50, 0);
        let planet = location("A", LocationKind::Planet, 0.0, 0.0);
        let moon = location("M", LocationKind::Moon, 0.0, 0.0);
        let target = location("B", LocationKind::Asteroid, 3.0, 4.0);

        // round(round(5) * 0.25) = round(1.25) = 1
        assert_eq!(fuel_to_travel(&ship, &planet, &target, &profiles), 4);
        assert_eq!(fuel_to_travel(&ship, &moon, &target, &profiles), 2);
    }

    #[test]
    fn fuel_to_travel_uses_class_bracket() {
        let profiles = FuelProfiles::default();
        let planet = location("A", LocationKind::Planet, 0.0, 0.0);
        let far = location("B", LocationKind::Planet, 0.0, 40.0);

        assert_eq!(fuel_to_travel(&ship("MK-III", 50, 0), &planet, &far, &profiles), 15);
        assert_eq!(fuel_to_travel(&ship("UNKNOWN", 50, 0), &planet, &far, &profiles), 13);
    }

    #[test]
    fn fuel_to_travel_is_at_least_one() {
        let profiles = FuelProfiles::default();
        let here = location("A", LocationKind::Asteroid, 5.0, 5.0);
        assert_eq!(fuel_to_travel(&ship("MK-I", 0, 0), &here, &here, &profiles), 1);
    }

    #[test]
    fn fuel_quantity_subtracts_held_fuel_and_pads() {
        assert_eq!(fuel_quantity(&ship("MK-I", 50, 0), 4, 5.0), 5);
        assert_eq!(fuel_quantity(&ship("MK-I", 50, 0), 4, 0.0), 4);
        assert_eq!(fuel_quantity(&ship("MK-I", 50, 3), 4, 0.0), 1);
        assert_eq!(fuel_quantity(&ship("MK-I", 50, 4), 4, 5.0), 0);
        assert_eq!(fuel_quantity(&ship("MK-I", 50, 9), 4, 5.0), 0);
    }

    #[test]
    fn profit_per_volume_compares_unit_volume_prices() {
        let here = good("METAL", 2.0, 10.0, 8.0);
        let there = good("METAL", 2.0, 30.0, 24.0);
        assert_eq!(good_profit_per_volume(&there, &here), 7.0);
        assert!(good_profit_per_volume(&here, &there) < 0.0);
    }

    #[test]
    fn cost_and_profit_scale_with_amount() {
        let metal = good("METAL", 2.0, 10.0, 8.0);
        assert_eq!(good_cost(&metal, 3), 30.0);
        assert_eq!(good_profit(&metal, 3), 24.0);
        assert_eq!(good_volume(3, &metal), 6.0);
        assert_eq!(fuel_cost(5, 2.5), 12.5);
    }

    #[test]
    fn good_quantity_floors() {
        assert_eq!(good_quantity(10.0, 3.0), 3);
        assert_eq!(good_quantity(9.0, 3.0), 3);
        assert_eq!(good_quantity(0.0, 3.0), 0);
        assert_eq!(good_quantity(-4.0, 1.0), 0);
        assert_eq!(good_quantity(10.0, 0.0), 0);
    }

    #[test]
    fn remaining_space_counts_fuel_as_unit_volume() {
        assert_eq!(remaining_space_after_refuel(&ship("MK-I", 50, 0), 5), 45.0);
        assert_eq!(remaining_space_after_refuel(&ship("MK-I", 3, 0), 5), -2.0);
    }

    #[test]
    fn profit_per_distance_unit_is_zero_on_self() {
        let profiles = FuelProfiles::default();
        let a = location("A", LocationKind::Planet, 1.0, 1.0);
        let cheap = good("METAL", 1.0, 1.0, 1.0);
        let pricey = good("METAL", 1.0, 1000.0, 1000.0);
        let result =
            profit_per_distance_unit(&pricey, &cheap, &ship("MK-I", 50, 0), &a, &a, 1.0, &profiles);
        assert_eq!(result, 0.0);
    }

    #[test]
    fn profit_per_distance_unit_nets_fuel_cost() {
        let profiles = FuelProfiles::default();
        let a = location("A", LocationKind::Planet, 0.0, 0.0);
        let b = location("B", LocationKind::Planet, 3.0, 4.0);
        let here = good("METAL", 1.0, 5.0, 4.0);
        let there = good("METAL", 1.0, 12.0, 10.0);

        // fuel 4, cost 4; profit = 5 * (50 - 4) - 4 = 226; 226 / 5
        let score =
            profit_per_distance_unit(&there, &here, &ship("MK-I", 50, 0), &a, &b, 1.0, &profiles);
        assert!((score - 45.2).abs() < 1e-9);
    }

    #[test]
    fn validate_range_is_strict() {
        let ship = ship("MK-I", 50, 0);
        let b = location("B", LocationKind::Planet, 3.0, 4.0);
        assert!(validate_range(&ship, 5.1, &b));
        assert!(!validate_range(&ship, 5.0, &b));
    }

    #[test]
    fn sort_descending_keeps_ties_in_order() {
        let mut items = vec![("a", 1.0), ("b", 3.0), ("c", 1.0), ("d", 2.0), ("e", 3.0)];
        sort_descending_by_key(&mut items, |item| item.1);
        let order: Vec<_> = items.iter().map(|item| item.0).collect();
        assert_eq!(order, vec!["b", "e", "d", "a", "c"]);
    }
}
