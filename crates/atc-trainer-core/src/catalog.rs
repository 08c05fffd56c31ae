//! Aircraft model catalog.

use crate::error::{Result, ScenarioError};
use crate::models::AircraftType;
use crate::rules::GenerationRules;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Constraints used to filter the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery<'a> {
    pub aircraft_type: Option<&'a str>,
    pub speed: Option<u32>,
    pub altitude: Option<u32>,
}

/// Static table of aircraft models keyed by name.
///
/// Iteration is in name order so a seeded generator always sees the same
/// candidate list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftCatalog {
    types: BTreeMap<String, AircraftType>,
}

impl Default for AircraftCatalog {
    fn default() -> Self {
        Self::from_types([
            AircraftType::new("A320", 46, 41, Some(25)),
            AircraftType::new("B744", 51, 45, Some(20)),
            AircraftType::new("B738", 48, 41, Some(25)),
            AircraftType::new("G5", 55, 51, Some(40)),
        ])
    }
}

impl AircraftCatalog {
    pub fn from_types(types: impl IntoIterator<Item = AircraftType>) -> Self {
        Self {
            types: types.into_iter().map(|t| (t.name.clone(), t)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AircraftType> {
        self.types.get(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AircraftType> {
        self.types.values()
    }

    /// Check that every entry can be generated under `rules`.
    ///
    /// Altitude derivation rejection-samples by parity, so each band must
    /// hold at least one odd and one even level.
    pub fn validate(&self, rules: &GenerationRules) -> Result<()> {
        if self.types.is_empty() {
            return Err(ScenarioError::InvalidCatalog {
                aircraft_type: "<none>".to_string(),
                reason: "catalog is empty".to_string(),
            });
        }

        for model in self.types.values() {
            if model.max_alt < rules.min_altitude + 1 {
                return Err(ScenarioError::InvalidCatalog {
                    aircraft_type: model.name.clone(),
                    reason: format!(
                        "altitude band {}..={} must contain both odd and even levels",
                        rules.min_altitude, model.max_alt
                    ),
                });
            }
            if model.max_speed < rules.min_speed {
                return Err(ScenarioError::InvalidCatalog {
                    aircraft_type: model.name.clone(),
                    reason: format!(
                        "max speed {} is below the global minimum {}",
                        model.max_speed, rules.min_speed
                    ),
                });
            }
        }

        Ok(())
    }

    /// Every type able to fly the requested speed and altitude.
    ///
    /// An explicit type name bypasses the numeric filters.
    pub fn compatible_types(&self, query: &CatalogQuery<'_>) -> Result<Vec<&AircraftType>> {
        let candidates: Vec<&AircraftType> = match query.aircraft_type {
            Some(name) => self.types.get(name).into_iter().collect(),
            None => self
                .types
                .values()
                .filter(|model| query.speed.map_or(true, |speed| speed <= model.max_speed))
                .filter(|model| query.altitude.map_or(true, |alt| alt <= model.max_alt))
                .collect(),
        };

        if candidates.is_empty() {
            return Err(ScenarioError::NoCompatibleAircraft {
                aircraft_type: query.aircraft_type.map(str::to_string),
                speed: query.speed,
                altitude: query.altitude,
            });
        }

        Ok(candidates)
    }
}
