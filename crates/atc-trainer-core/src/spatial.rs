//! Display-space geometry and unit conversion.
//!
//! The radar is a square of `range_px` pixels. Compass angles are converted
//! to screen vectors with north pointing to negative latitude (up).

use crate::error::{Result, ScenarioError};
use crate::models::Position;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Linear pixel <-> nautical mile scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayScale {
    pub nm_per_px: f64,
}

impl Default for DisplayScale {
    fn default() -> Self {
        Self { nm_per_px: 0.1 }
    }
}

impl DisplayScale {
    /// Fails unless `nm_per_px` is finite and positive.
    pub fn new(nm_per_px: f64) -> Result<Self> {
        if !(nm_per_px.is_finite() && nm_per_px > 0.0) {
            return Err(ScenarioError::InvalidScale { nm_per_px });
        }
        Ok(Self { nm_per_px })
    }

    pub fn px_to_nm(&self, px: f64) -> f64 {
        px * self.nm_per_px
    }

    pub fn nm_to_px(&self, nm: f64) -> f64 {
        nm / self.nm_per_px
    }
}

/// Usable radar area supplied by the caller on every generation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarBounds {
    pub range_px: f64,
    pub padding_px: f64,
}

impl RadarBounds {
    pub fn new(range_px: f64, padding_px: f64) -> Result<Self> {
        let valid = range_px.is_finite()
            && padding_px.is_finite()
            && padding_px >= 0.0
            && range_px - 2.0 * padding_px > 0.0;
        if !valid {
            return Err(ScenarioError::InvalidBounds {
                range_px,
                padding_px,
            });
        }
        Ok(Self {
            range_px,
            padding_px,
        })
    }

    /// Width of the padded placement band on each axis.
    pub fn span(&self) -> f64 {
        self.range_px - 2.0 * self.padding_px
    }

    pub fn contains(&self, position: &Position) -> bool {
        let lo = self.padding_px;
        let hi = self.range_px - self.padding_px;
        (lo..=hi).contains(&position.longitude) && (lo..=hi).contains(&position.latitude)
    }
}

/// Average of two uniform draws: triangular on [0, 1], peaked at 0.5.
pub fn center_biased<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    (rng.random::<f64>() + rng.random::<f64>()) / 2.0
}

/// Screen-space unit vector for a compass heading.
pub fn heading_to_unit_vector(heading_deg: f64) -> (f64, f64) {
    let rad = heading_deg.to_radians();
    (rad.sin(), -rad.cos())
}

/// Move `distance_px` from `origin` along compass `bearing_deg`.
pub fn offset_by_bearing(origin: Position, distance_px: f64, bearing_deg: f64) -> Position {
    let (vx, vy) = heading_to_unit_vector(bearing_deg);
    Position::new(
        origin.longitude + distance_px * vx,
        origin.latitude + distance_px * vy,
    )
}

/// Map any angle into (0, 360], so north is 360 rather than 0.
pub fn normalize_heading(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped == 0.0 {
        360.0
    } else {
        wrapped
    }
}

pub fn reciprocal(bearing_deg: f64) -> f64 {
    normalize_heading(bearing_deg + 180.0)
}

/// Distance in pixels and compass bearing from `from` to `to`.
pub fn range_and_bearing(from: &Position, to: &Position) -> (f64, f64) {
    let dx = to.longitude - from.longitude;
    let dy = to.latitude - from.latitude;
    let bearing = dx.atan2(-dy).to_degrees().rem_euclid(360.0);
    (dx.hypot(dy), bearing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_scale_rejects_degenerate_factor() {
        for factor in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                DisplayScale::new(factor),
                Err(ScenarioError::InvalidScale { .. })
            ));
        }
        assert!(DisplayScale::new(0.05).is_ok());
    }

    #[test]
    fn test_scale_round_trip() {
        let scale = DisplayScale::new(0.137).unwrap();
        for px in [0.0, 1.0, 42.5, 799.9] {
            assert!((scale.nm_to_px(scale.px_to_nm(px)) - px).abs() < 1e-9);
        }
        assert!((DisplayScale::default().nm_to_px(5.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_validation() {
        assert!(RadarBounds::new(800.0, 50.0).is_ok());
        assert!(RadarBounds::new(100.0, 50.0).is_err());
        assert!(RadarBounds::new(f64::NAN, 50.0).is_err());
        assert!(RadarBounds::new(800.0, -1.0).is_err());
    }

    #[test]
    fn test_bounds_contains_padding_edges() {
        let bounds = RadarBounds::new(800.0, 50.0).unwrap();
        assert!(bounds.contains(&Position::new(50.0, 750.0)));
        assert!(!bounds.contains(&Position::new(49.9, 400.0)));
        assert!(!bounds.contains(&Position::new(400.0, 750.1)));
    }

    #[test]
    fn test_center_biased_in_unit_range() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..1000 {
            let v = center_biased(&mut rng);
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_normalize_heading() {
        assert_eq!(normalize_heading(0.0), 360.0);
        assert_eq!(normalize_heading(360.0), 360.0);
        assert_eq!(normalize_heading(-90.0), 270.0);
        assert_eq!(normalize_heading(450.0), 90.0);
        assert_eq!(reciprocal(180.0), 360.0);
        assert_eq!(reciprocal(270.0), 90.0);
    }

    #[test]
    fn test_offset_and_range_bearing_agree() {
        let origin = Position::new(400.0, 400.0);
        let target = offset_by_bearing(origin, 100.0, 135.0);
        // South-east is right and down on screen
        assert!(target.longitude > origin.longitude);
        assert!(target.latitude > origin.latitude);
        let (range, bearing) = range_and_bearing(&origin, &target);
        assert!((range - 100.0).abs() < 1e-9);
        assert!((bearing - 135.0).abs() < 1e-9);
    }
}
