//! ATC radar trainer core.
//!
//! Generates kinematically consistent synthetic traffic for a 2D radar
//! display: scattered non-conflicting aircraft and constructed converging
//! pairs. Rendering is left to the caller.

pub mod catalog;
pub mod conflict;
pub mod error;
pub mod factory;
pub mod models;
pub mod rules;
pub mod scenarios;
pub mod sequence;
pub mod spatial;

pub use catalog::{AircraftCatalog, CatalogQuery};
pub use conflict::{too_close, ConflictGeometry, SpeedBand};
pub use error::{Result, ScenarioError};
pub use factory::AircraftFactory;
pub use models::{
    Aircraft, AircraftOverrides, AircraftType, Position, Scene, ScenarioStep, Sequence, StepKind,
    VerticalTrend,
};
pub use rules::{altitude_matches_heading, is_eastbound, GenerationRules, Parity, TravelDirection};
pub use scenarios::{Placement, ScenarioGenerator, SceneReport, StepOutcome};
pub use sequence::{objectives, plan_sequence, Difficulty, Objective};
pub use spatial::{DisplayScale, RadarBounds};
