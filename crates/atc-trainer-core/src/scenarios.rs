//! Scenario generators.
//!
//! Generators never touch the caller's scene. They return a [`Placement`]
//! and the caller decides what to do with it, including a partial one.

use crate::conflict::{too_close, ConflictGeometry};
use crate::error::{Result, ScenarioError};
use crate::factory::AircraftFactory;
use crate::models::{Aircraft, AircraftOverrides, Scene, ScenarioStep, StepKind};
use crate::spatial::{DisplayScale, RadarBounds};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Outcome of one generator call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    pub kind: StepKind,
    pub requested: usize,
    pub aircraft: Vec<Aircraft>,
    /// Geometry of each conflict pair, in placement order
    #[serde(default)]
    pub conflicts: Vec<ConflictGeometry>,
    /// Total attempts spent
    pub attempts: usize,
    /// True when a retry budget ran out before `requested` was reached
    pub exhausted: bool,
}

impl Placement {
    fn new(kind: StepKind, requested: usize) -> Self {
        Self {
            kind,
            requested,
            aircraft: Vec::new(),
            conflicts: Vec::new(),
            attempts: 0,
            exhausted: false,
        }
    }

    pub fn placed(&self) -> usize {
        self.aircraft.len()
    }

    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.placed())
    }

    /// `PlacementExhausted` if the budget ran out, otherwise the aircraft.
    pub fn into_result(self) -> Result<Vec<Aircraft>> {
        if self.exhausted {
            return Err(ScenarioError::PlacementExhausted {
                kind: self.kind,
                requested: self.requested,
                placed: self.placed(),
                attempts: self.attempts,
            });
        }
        Ok(self.aircraft)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub step: ScenarioStep,
    pub placed: usize,
    pub shortfall: usize,
}

/// A freshly built scene plus what each step achieved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneReport {
    pub scene: Scene,
    pub outcomes: Vec<StepOutcome>,
    pub conflicts: Vec<ConflictGeometry>,
}

impl SceneReport {
    pub fn shortfall(&self) -> usize {
        self.outcomes.iter().map(|o| o.shortfall).sum()
    }

    /// Each conflict pair with the geometry it was built from.
    ///
    /// Relies on steps appending their aircraft to the scene in outcome
    /// order, two per conflict. Stops early on a report that breaks that.
    pub fn conflict_pairs(&self) -> Vec<(&Aircraft, &Aircraft, &ConflictGeometry)> {
        let mut geometries = self.conflicts.iter();
        let mut pairs = Vec::with_capacity(self.conflicts.len());
        let mut offset = 0;

        for outcome in &self.outcomes {
            let Some(placed) = self.scene.aircraft.get(offset..offset + outcome.placed) else {
                break;
            };
            offset += outcome.placed;
            if outcome.step.kind != StepKind::Conflict {
                continue;
            }
            for (pair, geometry) in placed.chunks_exact(2).zip(geometries.by_ref()) {
                pairs.push((&pair[0], &pair[1], geometry));
            }
        }

        pairs
    }
}

pub struct ScenarioGenerator {
    factory: AircraftFactory,
    scale: DisplayScale,
}

impl Default for ScenarioGenerator {
    fn default() -> Self {
        Self::new(AircraftFactory::default(), DisplayScale::default())
    }
}

impl ScenarioGenerator {
    pub fn new(factory: AircraftFactory, scale: DisplayScale) -> Self {
        Self { factory, scale }
    }

    pub fn factory(&self) -> &AircraftFactory {
        &self.factory
    }

    pub fn scale(&self) -> &DisplayScale {
        &self.scale
    }

    /// Place up to `count` scattered aircraft that are not too close to
    /// anything in `scene` or to each other.
    ///
    /// Each aircraft gets `random_attempts` tries. When one cannot be placed
    /// the step stops and reports what it managed.
    pub fn place_random<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
        bounds: &RadarBounds,
        scene: &Scene,
    ) -> Result<Placement> {
        let rules = self.factory.rules();
        let mut placement = Placement::new(StepKind::Random, count);

        for index in 0..count {
            let mut placed = None;
            for _ in 0..rules.random_attempts {
                placement.attempts += 1;
                let candidate = self
                    .factory
                    .create(rng, bounds, &AircraftOverrides::default())?;
                let safe = scene
                    .aircraft
                    .iter()
                    .chain(placement.aircraft.iter())
                    .all(|other| !too_close(other, &candidate, rules.min_separation_nm, &self.scale));
                if safe {
                    placed = Some(candidate);
                    break;
                }
            }

            match placed {
                Some(aircraft) => placement.aircraft.push(aircraft),
                None => {
                    tracing::warn!(
                        "Could not place aircraft {} of {} safely in random scenario",
                        index + 1,
                        count
                    );
                    placement.exhausted = true;
                    break;
                }
            }
        }

        Ok(placement)
    }

    /// Place `ceil(count / 2)` converging same-level pairs.
    ///
    /// Each pair gets `conflict_attempts` constructions. A construction is
    /// discarded when either aircraft would start outside the padded bounds,
    /// the factory rejects it, or either aircraft starts too close to
    /// anything in `scene` or in an earlier pair of this step.
    pub fn place_conflict_pair<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
        bounds: &RadarBounds,
        scene: &Scene,
    ) -> Placement {
        let rules = self.factory.rules();
        let pairs = count.div_ceil(2);
        let mut placement = Placement::new(StepKind::Conflict, pairs * 2);

        for pair in 0..pairs {
            let mut built = None;
            for _ in 0..rules.conflict_attempts {
                placement.attempts += 1;
                let geometry = ConflictGeometry::sample(rng, rules, bounds, &self.scale);
                if !geometry.within(bounds) {
                    tracing::debug!("Conflicting aircraft would be out of bounds, retrying");
                    continue;
                }
                let (a, b) = match self.build_pair(rng, bounds, &geometry) {
                    Ok(pair) => pair,
                    Err(err) => {
                        tracing::debug!("Conflict pair rejected, retrying: {}", err);
                        continue;
                    }
                };
                let crowded = scene
                    .aircraft
                    .iter()
                    .chain(placement.aircraft.iter())
                    .any(|other| {
                        too_close(other, &a, rules.min_separation_nm, &self.scale)
                            || too_close(other, &b, rules.min_separation_nm, &self.scale)
                    });
                if crowded {
                    tracing::debug!("Conflict pair starts too close to other traffic, retrying");
                    continue;
                }
                built = Some((a, b, geometry));
                break;
            }

            match built {
                Some((a, b, geometry)) => {
                    placement.aircraft.push(a);
                    placement.aircraft.push(b);
                    placement.conflicts.push(geometry);
                }
                None => {
                    tracing::warn!(
                        "Conflict pair {} of {} not placed after {} attempts",
                        pair + 1,
                        pairs,
                        rules.conflict_attempts
                    );
                    placement.exhausted = true;
                    break;
                }
            }
        }

        placement
    }

    /// B copies A's altitude, so both must satisfy the parity rule at it.
    fn build_pair<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        bounds: &RadarBounds,
        geometry: &ConflictGeometry,
    ) -> Result<(Aircraft, Aircraft)> {
        let a = self.factory.create(
            rng,
            bounds,
            &AircraftOverrides::default()
                .with_position(geometry.position_a)
                .with_heading(geometry.heading_a())
                .with_speed(geometry.speed_a),
        )?;
        let b = self.factory.create(
            rng,
            bounds,
            &AircraftOverrides::default()
                .with_position(geometry.position_b)
                .with_heading(geometry.heading_b())
                .with_speed(geometry.speed_b_effective)
                .with_altitude(a.altitude),
        )?;
        Ok((a, b))
    }

    /// Build a brand-new scene from `sequence`.
    ///
    /// Steps run in order and each step sees every aircraft placed by
    /// earlier steps. Shortfalls are recorded, not raised.
    pub fn run_sequence<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        sequence: &[ScenarioStep],
        bounds: &RadarBounds,
    ) -> Result<SceneReport> {
        let mut scene = Scene::new();
        let mut outcomes = Vec::with_capacity(sequence.len());
        let mut conflicts = Vec::new();

        for step in sequence {
            let placement = match step.kind {
                StepKind::Random => self.place_random(rng, step.count, bounds, &scene)?,
                StepKind::Conflict => self.place_conflict_pair(rng, step.count, bounds, &scene),
            };
            let placed = placement.placed();
            tracing::info!("  {} -> placed {} aircraft", step, placed);

            outcomes.push(StepOutcome {
                step: *step,
                placed,
                shortfall: step.count.saturating_sub(placed),
            });
            conflicts.extend(placement.conflicts);
            scene.extend(placement.aircraft);
        }

        tracing::info!("Total aircraft: {}", scene.len());
        Ok(SceneReport {
            scene,
            outcomes,
            conflicts,
        })
    }
}
