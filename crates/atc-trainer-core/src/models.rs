//! Core data models for the radar trainer.

use crate::error::ScenarioError;
use crate::spatial::{heading_to_unit_vector, DisplayScale};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Static performance envelope of an aircraft model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftType {
    pub name: String,
    /// Tens of knots
    pub max_speed: u32,
    /// Flight level
    pub max_alt: u32,
    /// Peak vertical rate; `None` for types that never change level
    #[serde(default)]
    pub climb: Option<u32>,
}

impl AircraftType {
    pub fn new(name: impl Into<String>, max_speed: u32, max_alt: u32, climb: Option<u32>) -> Self {
        Self {
            name: name.into(),
            max_speed,
            max_alt,
            climb,
        }
    }
}

/// Point in display space. `longitude` grows rightwards and `latitude`
/// grows downwards, both in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
}

impl Position {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.longitude - other.longitude).hypot(self.latitude - other.latitude)
    }
}

/// A generated aircraft. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    pub id: Uuid,
    pub callsign: String,
    pub model: AircraftType,
    pub position: Position,
    /// Degrees clockwise from north, in (0, 360]
    pub heading: f64,
    pub altitude: u32,
    pub speed: u32,
    /// Zero = level, positive = climbing, negative = descending
    pub vertical_rate: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalTrend {
    Level,
    Climbing,
    Descending,
}

impl Aircraft {
    pub fn trend(&self) -> VerticalTrend {
        match self.vertical_rate {
            0 => VerticalTrend::Level,
            rate if rate > 0 => VerticalTrend::Climbing,
            _ => VerticalTrend::Descending,
        }
    }

    /// Straight-line projection of the aircraft after `minutes`.
    pub fn position_after(&self, minutes: f64, scale: &DisplayScale) -> Position {
        let distance_px = scale.nm_to_px(f64::from(self.speed) * minutes / 6.0);
        let (vx, vy) = heading_to_unit_vector(self.heading);
        Position::new(
            self.position.longitude + vx * distance_px,
            self.position.latitude + vy * distance_px,
        )
    }
}

/// Optional constraints for [`crate::factory::AircraftFactory::create`].
/// Unset fields are randomised within bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AircraftOverrides {
    #[serde(default)]
    pub aircraft_type: Option<String>,
    #[serde(default)]
    pub heading: Option<f64>,
    #[serde(default)]
    pub altitude: Option<u32>,
    #[serde(default)]
    pub speed: Option<u32>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub vertical_rate: Option<i32>,
}

impl AircraftOverrides {
    pub fn with_type(mut self, name: impl Into<String>) -> Self {
        self.aircraft_type = Some(name.into());
        self
    }

    pub fn with_heading(mut self, heading: f64) -> Self {
        self.heading = Some(heading);
        self
    }

    pub fn with_altitude(mut self, altitude: u32) -> Self {
        self.altitude = Some(altitude);
        self
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.longitude = Some(position.longitude);
        self.latitude = Some(position.latitude);
        self
    }

    pub fn with_vertical_rate(mut self, rate: i32) -> Self {
        self.vertical_rate = Some(rate);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Scattered traffic with no conflicts
    Random,
    /// Converging same-level pairs
    Conflict,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::Random => write!(f, "random"),
            StepKind::Conflict => write!(f, "conflict"),
        }
    }
}

impl FromStr for StepKind {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(StepKind::Random),
            "conflict" => Ok(StepKind::Conflict),
            other => Err(ScenarioError::UnknownStepKind(other.to_string())),
        }
    }
}

/// One generation directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioStep {
    #[serde(rename = "type")]
    pub kind: StepKind,
    pub count: usize,
}

impl ScenarioStep {
    pub fn random(count: usize) -> Self {
        Self {
            kind: StepKind::Random,
            count,
        }
    }

    pub fn conflict(count: usize) -> Self {
        Self {
            kind: StepKind::Conflict,
            count,
        }
    }
}

impl fmt::Display for ScenarioStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.count)
    }
}

/// Parses `kind:count`, e.g. `conflict:2`.
impl FromStr for ScenarioStep {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, count) = s
            .split_once(':')
            .ok_or_else(|| ScenarioError::InvalidStep(s.to_string()))?;
        let count = count
            .trim()
            .parse()
            .map_err(|_| ScenarioError::InvalidStep(s.to_string()))?;
        Ok(Self {
            kind: kind.parse()?,
            count,
        })
    }
}

/// Ordered steps consumed once to build a scene.
pub type Sequence = Vec<ScenarioStep>;

/// The current set of aircraft on the radar. Owned by the caller and
/// replaced wholesale on each regeneration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub generated_at: DateTime<Utc>,
    pub aircraft: Vec<Aircraft>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            generated_at: Utc::now(),
            aircraft: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }

    pub fn extend(&mut self, aircraft: impl IntoIterator<Item = Aircraft>) {
        self.aircraft.extend(aircraft);
    }
}
