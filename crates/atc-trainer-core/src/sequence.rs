//! Difficulty levels and scenario sequence planning.

use crate::error::ScenarioError;
use crate::models::{ScenarioStep, Sequence, StepKind};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Inclusive (min, max) aircraft range for a scene.
    pub fn aircraft_range(self) -> (usize, usize) {
        match self {
            Difficulty::Easy => (3, 6),
            Difficulty::Medium => (4, 6),
            Difficulty::Hard => (8, 12),
        }
    }

    /// Cycle easy -> medium -> hard -> easy.
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ScenarioError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// Conflict step first, then background traffic.
///
/// The conflict count is rounded up to an even number so it always fills
/// whole pairs.
pub fn plan_sequence<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Sequence {
    let (min, max) = difficulty.aircraft_range();

    let mut conflict_count = rng.random_range(0..=max - min) + 1;
    if conflict_count % 2 != 0 {
        conflict_count += 1;
    }

    let headroom = max.saturating_sub(conflict_count);
    let random_count = if headroom == 0 {
        0
    } else {
        rng.random_range(0..headroom)
    };

    vec![
        ScenarioStep::conflict(conflict_count),
        ScenarioStep::random(random_count),
    ]
}

/// Trainee-facing goal derived from a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    RandomTraffic,
    PotentialConflict,
}

impl Objective {
    pub fn label(self) -> &'static str {
        match self {
            Objective::RandomTraffic => "Random Traffic",
            Objective::PotentialConflict => "Potential Conflict",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One objective per non-random step, or a single `RandomTraffic` when the
/// sequence has none.
pub fn objectives(sequence: &[ScenarioStep]) -> Vec<Objective> {
    let found: Vec<Objective> = sequence
        .iter()
        .filter_map(|step| match step.kind {
            StepKind::Random => None,
            StepKind::Conflict => Some(Objective::PotentialConflict),
        })
        .collect();

    if found.is_empty() {
        vec![Objective::RandomTraffic]
    } else {
        found
    }
}
