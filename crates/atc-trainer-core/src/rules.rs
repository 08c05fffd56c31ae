//! Airspace rules and generation thresholds.
//!
//! The kinematic convention used by the trainer is deliberately simple:
//! eastbound traffic (heading below 180°) flies odd levels, westbound traffic
//! flies even levels.

use crate::error::{Result, ScenarioError};
use crate::models::AircraftType;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for scenario generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRules {
    /// Slowest speed any generated aircraft may fly (tens of knots)
    pub min_speed: u32,
    /// Lowest flight level any generated aircraft may hold
    pub min_altitude: u32,
    /// Horizontal separation used by the proximity guard (nm)
    pub min_separation_nm: f64,
    /// Radius of the ring a conflict pair must not start inside (nm)
    pub conflict_ring_nm: f64,
    /// Placement attempts per aircraft in a random step
    pub random_attempts: usize,
    /// Construction attempts per pair in a conflict step
    pub conflict_attempts: usize,
    /// Earliest time of conflict (minutes)
    pub conflict_time_min: f64,
    /// Latest time of conflict, exclusive (minutes)
    pub conflict_time_max: f64,
    /// Speed band both members of a conflict pair are drawn from
    pub conflict_min_speed: u32,
    pub conflict_max_speed: u32,
    /// Bearings closer than this collapse into an in-trail geometry (degrees)
    pub in_trail_threshold_deg: f64,
    /// Chance that a generated aircraft is changing level
    pub climb_probability: f64,
}

impl Default for GenerationRules {
    fn default() -> Self {
        Self {
            min_speed: 25,
            min_altitude: 29,
            min_separation_nm: 5.0,
            conflict_ring_nm: 5.0,
            random_attempts: 100,
            conflict_attempts: 1000,
            conflict_time_min: 1.0,
            conflict_time_max: 6.0,
            conflict_min_speed: 25,
            conflict_max_speed: 45,
            in_trail_threshold_deg: 15.0,
            climb_probability: 0.1,
        }
    }
}

impl GenerationRules {
    /// Reject rules the generators cannot sample from.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| Err(ScenarioError::InvalidRules(reason.to_string()));

        if !(self.conflict_time_min > 0.0 && self.conflict_time_min < self.conflict_time_max) {
            return invalid("conflict time window must be positive and non-empty");
        }
        if self.conflict_min_speed == 0 || self.conflict_min_speed > self.conflict_max_speed {
            return invalid("conflict speed band must be non-empty and above zero");
        }
        if !(0.0..=1.0).contains(&self.climb_probability) {
            return invalid("climb probability must be within [0, 1]");
        }
        if self.conflict_min_speed < self.min_speed {
            return invalid("conflict speed band must not start below the minimum speed");
        }
        let positive = |nm: f64| nm.is_finite() && nm > 0.0;
        if !(positive(self.min_separation_nm) && positive(self.conflict_ring_nm)) {
            return invalid("separation and conflict ring must be finite and positive");
        }
        if self.random_attempts == 0 || self.conflict_attempts == 0 {
            return invalid("retry budgets must allow at least one attempt");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    pub fn of(altitude: u32) -> Self {
        if altitude % 2 != 0 {
            Parity::Odd
        } else {
            Parity::Even
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parity::Odd => write!(f, "odd"),
            Parity::Even => write!(f, "even"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelDirection {
    Eastbound,
    Westbound,
}

impl TravelDirection {
    pub fn of(heading: f64) -> Self {
        if is_eastbound(heading) {
            TravelDirection::Eastbound
        } else {
            TravelDirection::Westbound
        }
    }

    /// Altitude parity this direction must fly.
    pub fn required_parity(self) -> Parity {
        match self {
            TravelDirection::Eastbound => Parity::Odd,
            TravelDirection::Westbound => Parity::Even,
        }
    }
}

impl fmt::Display for TravelDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelDirection::Eastbound => write!(f, "Eastbound"),
            TravelDirection::Westbound => write!(f, "Westbound"),
        }
    }
}

pub fn is_eastbound(heading: f64) -> bool {
    heading < 180.0
}

pub fn altitude_matches_heading(altitude: u32, heading: f64) -> bool {
    Parity::of(altitude) == TravelDirection::of(heading).required_parity()
}

/// Which of heading/altitude the caller fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KinematicConstraint {
    Both { heading: f64, altitude: u32 },
    HeadingOnly(f64),
    AltitudeOnly(u32),
    Unconstrained,
}

impl KinematicConstraint {
    pub fn from_overrides(heading: Option<f64>, altitude: Option<u32>) -> Self {
        match (heading, altitude) {
            (Some(heading), Some(altitude)) => KinematicConstraint::Both { heading, altitude },
            (Some(heading), None) => KinematicConstraint::HeadingOnly(heading),
            (None, Some(altitude)) => KinematicConstraint::AltitudeOnly(altitude),
            (None, None) => KinematicConstraint::Unconstrained,
        }
    }
}

/// Resolve a consistent `(heading, altitude)` pair for `model`.
pub fn resolve_heading_and_altitude<R: Rng + ?Sized>(
    rng: &mut R,
    rules: &GenerationRules,
    model: &AircraftType,
    constraint: KinematicConstraint,
) -> Result<(f64, u32)> {
    match constraint {
        KinematicConstraint::Both { heading, altitude } => {
            if !altitude_matches_heading(altitude, heading) {
                let direction = TravelDirection::of(heading);
                return Err(ScenarioError::IncompatibleKinematics {
                    heading,
                    altitude,
                    direction,
                    required: direction.required_parity(),
                });
            }
            Ok((heading, altitude))
        }
        KinematicConstraint::HeadingOnly(heading) => Ok((
            heading,
            derive_altitude_from_heading(rng, rules, model, heading),
        )),
        KinematicConstraint::AltitudeOnly(altitude) => {
            Ok((derive_heading_from_altitude(rng, altitude), altitude))
        }
        KinematicConstraint::Unconstrained => {
            let heading = random_heading(rng);
            Ok((
                heading,
                derive_altitude_from_heading(rng, rules, model, heading),
            ))
        }
    }
}

/// Rejection-sample an altitude in `[min_altitude, model.max_alt]` whose
/// parity suits `heading`.
///
/// Terminates as long as the band holds a level of each parity, which
/// `AircraftCatalog::validate` checks up front.
pub fn derive_altitude_from_heading<R: Rng + ?Sized>(
    rng: &mut R,
    rules: &GenerationRules,
    model: &AircraftType,
    heading: f64,
) -> u32 {
    let required = TravelDirection::of(heading).required_parity();
    loop {
        let altitude = rng.random_range(rules.min_altitude..=model.max_alt);
        if Parity::of(altitude) == required {
            return altitude;
        }
    }
}

/// Odd levels get a heading in [1, 179], even levels one in [180, 359].
pub fn derive_heading_from_altitude<R: Rng + ?Sized>(rng: &mut R, altitude: u32) -> f64 {
    let heading = match Parity::of(altitude) {
        Parity::Odd => rng.random_range(1..=179),
        Parity::Even => rng.random_range(180..=359),
    };
    f64::from(heading)
}

pub fn random_heading<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    f64::from(rng.random_range(1..=360))
}
