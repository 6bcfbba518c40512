use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Trade symbol of the good a ship burns to travel.
pub const FUEL: &str = "FUEL";

/// One tradable commodity as listed by one marketplace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Good {
    pub symbol: String,
    pub quantity_available: u32,
    pub volume_per_unit: f64,
    pub purchase_price_per_unit: f64,
    pub sell_price_per_unit: f64,
}

impl Good {
    /// Builds a good, rejecting non-positive volumes and non-finite prices.
    pub fn try_new(
        symbol: impl Into<String>,
        quantity_available: u32,
        volume_per_unit: f64,
        purchase_price_per_unit: f64,
        sell_price_per_unit: f64,
    ) -> Result<Self, DomainError> {
        let symbol = symbol.into();
        if !(volume_per_unit.is_finite() && volume_per_unit > 0.0) {
            return Err(DomainError::NonPositiveVolume {
                symbol,
                volume: volume_per_unit,
            });
        }
        if let Some(price) = [purchase_price_per_unit, sell_price_per_unit]
            .into_iter()
            .find(|price| !price.is_finite())
        {
            return Err(DomainError::NonFinitePrice { symbol, price });
        }
        Ok(Self {
            symbol,
            quantity_available,
            volume_per_unit,
            purchase_price_per_unit,
            sell_price_per_unit,
        })
    }

    /// Goods decoded straight from JSON skip `try_new`; ranking ignores the bad ones.
    pub fn has_valid_volume(&self) -> bool {
        self.volume_per_unit.is_finite() && self.volume_per_unit > 0.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationKind {
    Planet,
    Moon,
    GasGiant,
    Asteroid,
    Wormhole,
    #[default]
    #[serde(other)]
    Other,
}

/// A point in the system, optionally hosting a marketplace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub symbol: String,
    #[serde(rename = "type", default)]
    pub kind: LocationKind,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub marketplace: Option<Vec<Good>>,
}

impl Location {
    pub fn is_planet(&self) -> bool {
        self.kind == LocationKind::Planet
    }

    pub fn has_marketplace(&self) -> bool {
        self.marketplace.is_some()
    }

    /// Looks up a listed good by symbol.
    pub fn good(&self, symbol: &str) -> Option<&Good> {
        self.marketplace
            .as_ref()
            .and_then(|goods| goods.iter().find(|good| good.symbol == symbol))
    }
}

/// A quantity of one good, either held by a ship or on a shopping list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CargoLine {
    pub good: String,
    pub quantity: u32,
    pub total_volume: f64,
}

/// Ship snapshot. Only location, position, cargo, space and class drive planning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    pub id: String,
    pub location: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub cargo: Vec<CargoLine>,
    pub space_available: u32,
    pub class: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub speed: Option<u32>,
    #[serde(default)]
    pub max_cargo: Option<u32>,
    #[serde(default)]
    pub plating: Option<u32>,
    #[serde(default)]
    pub weapons: Option<u32>,
}

impl Ship {
    /// Units of `symbol` currently held across all cargo lines.
    pub fn held_quantity(&self, symbol: &str) -> u32 {
        self.cargo
            .iter()
            .filter(|line| line.good == symbol)
            .map(|line| line.quantity)
            .sum()
    }
}

/// Fuel consumption parameters for one ship class.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelProfile {
    pub multiplier: f64,
    pub planet_penalty: u32,
    #[serde(default)]
    pub base_penalty: u32,
}

impl FuelProfile {
    pub const fn new(multiplier: f64, planet_penalty: u32) -> Self {
        Self {
            multiplier,
            planet_penalty,
            base_penalty: 0,
        }
    }

    /// Penalty applied when departing from `origin`.
    pub fn penalty(&self, origin: &Location) -> u32 {
        if origin.is_planet() {
            self.planet_penalty
        } else {
            self.base_penalty
        }
    }
}

/// Ship class -> fuel profile, with a fallback bracket for unknown classes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelProfiles {
    #[serde(default)]
    pub classes: HashMap<String, FuelProfile>,
    pub fallback: FuelProfile,
}

impl FuelProfiles {
    pub fn profile_for(&self, class: &str) -> &FuelProfile {
        self.classes.get(class).unwrap_or(&self.fallback)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FuelProfile)> {
        std::iter::once(("fallback", &self.fallback))
            .chain(self.classes.iter().map(|(class, profile)| (class.as_str(), profile)))
    }
}

impl Default for FuelProfiles {
    fn default() -> Self {
        let mk1 = FuelProfile::new(0.25, 2);
        let classes = HashMap::from([
            ("MK-I".to_string(), mk1),
            ("MK-II".to_string(), FuelProfile::new(0.25, 3)),
            ("MK-III".to_string(), FuelProfile::new(0.25, 4)),
        ]);
        Self {
            classes,
            fallback: mk1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_rejects_zero_volume() {
        let result = Good::try_new("METAL", 10, 0.0, 5.0, 10.0);
        assert!(matches!(result, Err(DomainError::NonPositiveVolume { .. })));
    }

    #[test]
    fn try_new_rejects_nan_price() {
        let result = Good::try_new("METAL", 10, 1.0, f64::NAN, 10.0);
        assert!(matches!(result, Err(DomainError::NonFinitePrice { .. })));
    }

    #[test]
    fn held_quantity_sums_matching_lines() {
        let ship = Ship {
            id: "ship-1".into(),
            location: "A".into(),
            x: 0.0,
            y: 0.0,
            cargo: vec![
                CargoLine { good: FUEL.into(), quantity: 3, total_volume: 3.0 },
                CargoLine { good: "METAL".into(), quantity: 7, total_volume: 7.0 },
                CargoLine { good: FUEL.into(), quantity: 2, total_volume: 2.0 },
            ],
            space_available: 10,
            class: "MK-I".into(),
            manufacturer: None,
            kind: None,
            speed: None,
            max_cargo: None,
            plating: None,
            weapons: None,
        };
        assert_eq!(ship.held_quantity(FUEL), 5);
        assert_eq!(ship.held_quantity("WORKERS"), 0);
    }

    #[test]
    fn unknown_class_uses_fallback() {
        let profiles = FuelProfiles::default();
        assert_eq!(profiles.profile_for("MK-III").planet_penalty, 4);
        assert_eq!(profiles.profile_for("ZEPPELIN"), &profiles.fallback);
    }

    #[test]
    fn location_decodes_from_api_json() {
        let json = r#"{
            "symbol": "OE-PM",
            "type": "PLANET",
            "x": 13,
            "y": -7,
            "marketplace": [{
                "symbol": "FUEL",
                "quantityAvailable": 900,
                "volumePerUnit": 1,
                "purchasePricePerUnit": 2,
                "sellPricePerUnit": 1
            }]
        }"#;
        let location: Location = serde_json::from_str(json).unwrap();
        assert!(location.is_planet());
        assert_eq!(location.good(FUEL).map(|g| g.quantity_available), Some(900));

        let other: Location =
            serde_json::from_str(r#"{"symbol":"X","type":"NEBULA","x":0,"y":0}"#).unwrap();
        assert_eq!(other.kind, LocationKind::Other);
        assert!(!other.has_marketplace());
    }
}
