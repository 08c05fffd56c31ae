//! Proximity guard and converging-pair geometry.
//!
//! A conflict pair is built backwards from a conflict point: both aircraft
//! are placed on reciprocal bearings from the point at the distance they
//! cover in `time_min` minutes, so both arrive there together.

use crate::models::{Aircraft, Position};
use crate::rules::GenerationRules;
use crate::spatial::{center_biased, offset_by_bearing, reciprocal, DisplayScale, RadarBounds};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Same level and closer than `min_separation_nm` horizontally.
///
/// Any level difference counts as fully separated.
pub fn too_close(a: &Aircraft, b: &Aircraft, min_separation_nm: f64, scale: &DisplayScale) -> bool {
    a.position.distance_to(&b.position) < scale.nm_to_px(min_separation_nm)
        && a.altitude == b.altitude
}

/// Trailing-aircraft speeds for which the pair would already start inside
/// the conflict ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedBand {
    pub lower: f64,
    pub upper: f64,
}

impl SpeedBand {
    pub fn contains(&self, speed: f64) -> bool {
        speed >= self.lower && speed <= self.upper
    }
}

/// Returns the discriminant `c = (6·ring/t)² − (speed_a·sin Δ)²` and, when it
/// is positive, the band `[L, U]` of speeds for the second aircraft.
///
/// Speeds are tens of knots, so `speed · t / 6` is the distance in nm flown
/// in `t` minutes and `6 · ring_nm / t` is the largest relative speed whose
/// starting offset still fits inside the ring.
pub fn trailing_speed_band(
    speed_a: f64,
    delta_bearing_deg: f64,
    time_min: f64,
    ring_nm: f64,
) -> (f64, Option<SpeedBand>) {
    let delta = delta_bearing_deg.to_radians();
    let c = (6.0 * ring_nm / time_min).powi(2) - (speed_a * delta.sin()).powi(2);
    if c <= 0.0 {
        return (c, None);
    }

    let root = c.sqrt();
    let lower = speed_a * delta.cos() - root;
    let upper = lower + 2.0 * root;
    (c, Some(SpeedBand { lower, upper }))
}

/// Keep `speed_b` when it is outside the band, otherwise lift it to the
/// band's upper edge.
pub fn effective_trailing_speed(speed_b: u32, band: Option<SpeedBand>) -> u32 {
    match band {
        Some(band) if band.contains(f64::from(speed_b)) => band.upper.ceil() as u32,
        _ => speed_b,
    }
}

/// One candidate converging pair, before the aircraft are built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConflictGeometry {
    /// Minutes until both aircraft reach the conflict point
    pub time_min: f64,
    pub conflict_point: Position,
    /// Bearings from the conflict point to each aircraft
    pub bearing_a: f64,
    pub bearing_b: f64,
    pub speed_a: u32,
    /// Speed originally drawn for B
    pub speed_b: u32,
    /// Speed B actually flies
    pub speed_b_effective: u32,
    pub discriminant: f64,
    pub position_a: Position,
    pub position_b: Position,
}

impl ConflictGeometry {
    pub fn sample<R: Rng + ?Sized>(
        rng: &mut R,
        rules: &GenerationRules,
        bounds: &RadarBounds,
        scale: &DisplayScale,
    ) -> Self {
        let time_min = rng.random_range(rules.conflict_time_min..rules.conflict_time_max);
        let conflict_point = Position::new(
            (center_biased(rng) * bounds.range_px).round(),
            (center_biased(rng) * bounds.range_px).round(),
        );

        // B is drawn from A's half of the compass so both fly the same parity.
        let bearing_a = f64::from(rng.random_range(0..=360u32));
        let half_offset = if bearing_a > 180.0 { 180.0 } else { 0.0 };
        let mut bearing_b = f64::from(rng.random_range(0..=180u32)) + half_offset;
        if (bearing_b - bearing_a).abs() < rules.in_trail_threshold_deg {
            bearing_b = bearing_a;
        }

        let speed_a = rng.random_range(rules.conflict_min_speed..=rules.conflict_max_speed);
        let speed_b = rng.random_range(rules.conflict_min_speed..=rules.conflict_max_speed);
        let (discriminant, band) = trailing_speed_band(
            f64::from(speed_a),
            bearing_a - bearing_b,
            time_min,
            rules.conflict_ring_nm,
        );
        let speed_b_effective = effective_trailing_speed(speed_b, band);

        let distance_a = scale
            .nm_to_px(f64::from(speed_a) / 6.0 * time_min)
            .round();
        let distance_b = scale
            .nm_to_px(f64::from(speed_b_effective) / 6.0 * time_min)
            .round();

        Self {
            time_min,
            conflict_point,
            bearing_a,
            bearing_b,
            speed_a,
            speed_b,
            speed_b_effective,
            discriminant,
            position_a: offset_by_bearing(conflict_point, distance_a, bearing_a),
            position_b: offset_by_bearing(conflict_point, distance_b, bearing_b),
        }
    }

    /// Each aircraft flies the reciprocal of its bearing, toward the point.
    pub fn heading_a(&self) -> f64 {
        reciprocal(self.bearing_a)
    }

    pub fn heading_b(&self) -> f64 {
        reciprocal(self.bearing_b)
    }

    pub fn in_trail(&self) -> bool {
        self.bearing_a == self.bearing_b
    }

    /// Whether the band was used to change B's speed.
    pub fn speed_adjusted(&self) -> bool {
        self.speed_b != self.speed_b_effective
    }

    pub fn within(&self, bounds: &RadarBounds) -> bool {
        bounds.contains(&self.position_a) && bounds.contains(&self.position_b)
    }
}
