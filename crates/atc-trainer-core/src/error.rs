//! Error types for scenario generation.

use crate::models::StepKind;
use crate::rules::{Parity, TravelDirection};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScenarioError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// No catalog entry satisfies the requested speed/altitude/type.
    #[error(
        "No aircraft can satisfy the given constraints (type: {}, speed: {}, altitude: {})",
        display_opt(.aircraft_type),
        display_opt(.speed),
        display_opt(.altitude)
    )]
    NoCompatibleAircraft {
        aircraft_type: Option<String>,
        speed: Option<u32>,
        altitude: Option<u32>,
    },

    /// Caller forced a heading and altitude that break the parity rule.
    #[error(
        "Incompatible heading ({heading}°) and altitude ({altitude}): \
         {direction} flights must use {required} altitudes; change the altitude or drop it"
    )]
    IncompatibleKinematics {
        heading: f64,
        altitude: u32,
        direction: TravelDirection,
        required: Parity,
    },

    /// Retry budget used up while searching for a valid configuration.
    #[error("{kind} placement exhausted after {attempts} attempts: placed {placed} of {requested}")]
    PlacementExhausted {
        kind: StepKind,
        requested: usize,
        placed: usize,
        attempts: usize,
    },

    #[error("Invalid aircraft catalog entry {aircraft_type}: {reason}")]
    InvalidCatalog { aircraft_type: String, reason: String },

    #[error("Invalid generation rules: {0}")]
    InvalidRules(String),

    #[error("Invalid radar bounds: range {range_px}px with padding {padding_px}px leaves no usable area")]
    InvalidBounds { range_px: f64, padding_px: f64 },

    #[error("Invalid display scale: {nm_per_px} nm per px must be finite and positive")]
    InvalidScale { nm_per_px: f64 },

    #[error("Invalid heading override ({heading}): must be a finite number of degrees")]
    InvalidHeading { heading: f64 },

    #[error("Unknown scenario step kind: {0}")]
    UnknownStepKind(String),

    #[error("Invalid scenario step: {0}")]
    InvalidStep(String),

    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

fn display_opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "any".to_string())
}
