//! Aircraft factory: builds one fully specified aircraft from partial
//! overrides.

use crate::catalog::{AircraftCatalog, CatalogQuery};
use crate::error::{Result, ScenarioError};
use crate::models::{Aircraft, AircraftOverrides, AircraftType, Position};
use crate::rules::{resolve_heading_and_altitude, GenerationRules, KinematicConstraint};
use crate::spatial::{center_biased, normalize_heading, RadarBounds};
use rand::Rng;
use uuid::{Builder, Uuid};

pub const CALLSIGN_OPERATORS: [&str; 9] = [
    "AAL", "ACA", "BAW", "DLH", "JAL", "UPS", "FDX", "WJA", "MAL",
];

pub struct AircraftFactory {
    catalog: AircraftCatalog,
    rules: GenerationRules,
}

impl Default for AircraftFactory {
    fn default() -> Self {
        Self {
            catalog: AircraftCatalog::default(),
            rules: GenerationRules::default(),
        }
    }
}

impl AircraftFactory {
    /// Fails if `rules` are unusable or the catalog cannot be generated
    /// from under them.
    pub fn new(catalog: AircraftCatalog, rules: GenerationRules) -> Result<Self> {
        rules.validate()?;
        catalog.validate(&rules)?;
        Ok(Self { catalog, rules })
    }

    pub fn catalog(&self) -> &AircraftCatalog {
        &self.catalog
    }

    pub fn rules(&self) -> &GenerationRules {
        &self.rules
    }

    /// Build an aircraft honouring every field set in `overrides`.
    ///
    /// Returns `NoCompatibleAircraft` when no type fits the requested
    /// type/speed/altitude, `InvalidHeading` for a non-finite heading and
    /// `IncompatibleKinematics` when a forced heading and altitude break the
    /// parity rule. None of them is patched over.
    pub fn create<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        bounds: &RadarBounds,
        overrides: &AircraftOverrides,
    ) -> Result<Aircraft> {
        let candidates = self.catalog.compatible_types(&CatalogQuery {
            aircraft_type: overrides.aircraft_type.as_deref(),
            speed: overrides.speed,
            altitude: overrides.altitude,
        })?;
        let model = candidates[rng.random_range(0..candidates.len())];

        let heading = match overrides.heading {
            Some(heading) if !heading.is_finite() => {
                return Err(ScenarioError::InvalidHeading { heading });
            }
            heading => heading.map(normalize_heading),
        };
        let constraint = KinematicConstraint::from_overrides(heading, overrides.altitude);
        let (heading, altitude) =
            resolve_heading_and_altitude(rng, &self.rules, model, constraint)?;

        let speed = match overrides.speed {
            Some(speed) => speed,
            None => rng.random_range(self.rules.min_speed..=model.max_speed),
        };

        let longitude = match overrides.longitude {
            Some(longitude) => longitude,
            None => random_coordinate(rng, bounds),
        };
        let latitude = match overrides.latitude {
            Some(latitude) => latitude,
            None => random_coordinate(rng, bounds),
        };
        let position = Position::new(longitude, latitude);

        let vertical_rate = match overrides.vertical_rate {
            Some(rate) => rate,
            None => random_vertical_rate(rng, &self.rules, model),
        };

        Ok(Aircraft {
            id: random_id(rng),
            callsign: generate_callsign(rng),
            model: model.clone(),
            position,
            heading,
            altitude,
            speed,
            vertical_rate,
        })
    }
}

/// Operator prefix followed by a number in 100..=999, e.g. `DLH427`.
pub fn generate_callsign<R: Rng + ?Sized>(rng: &mut R) -> String {
    let prefix = CALLSIGN_OPERATORS[rng.random_range(0..CALLSIGN_OPERATORS.len())];
    let number: u16 = rng.random_range(100..=999);
    format!("{prefix}{number}")
}

fn random_id<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    Builder::from_random_bytes(rng.random()).into_uuid()
}

/// Center-biased coordinate within the padded band.
fn random_coordinate<R: Rng + ?Sized>(rng: &mut R, bounds: &RadarBounds) -> f64 {
    (center_biased(rng) * bounds.span()).round() + bounds.padding_px
}

/// Scenario flavour, not physics: a level change is rare, and descents run
/// up to twice the type's climb capability while climbs stay within it.
fn random_vertical_rate<R: Rng + ?Sized>(
    rng: &mut R,
    rules: &GenerationRules,
    model: &AircraftType,
) -> i32 {
    let upward = rng.random_bool(0.5);
    let changing = rng.random_bool(rules.climb_probability);
    let Some(climb) = model.climb else {
        return 0;
    };
    if !changing {
        return 0;
    }

    let magnitude = center_biased(rng) * f64::from(climb);
    if upward {
        magnitude.round() as i32
    } else {
        (-2.0 * magnitude).round() as i32
    }
}
