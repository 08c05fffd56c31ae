//! Plain-text rendering of a generated scene.

use atc_trainer_core::spatial::range_and_bearing;
use atc_trainer_core::{objectives, Aircraft, DisplayScale, SceneReport, ScenarioStep, VerticalTrend};
use std::fmt;

/// Altitude with the climb arrow and rate, e.g. `36↑12`.
fn level_label(aircraft: &Aircraft) -> String {
    let arrow = match aircraft.trend() {
        VerticalTrend::Level => return aircraft.altitude.to_string(),
        VerticalTrend::Climbing => "↑",
        VerticalTrend::Descending => "↓",
    };
    format!(
        "{}{}{}",
        aircraft.altitude,
        arrow,
        aircraft.vertical_rate.unsigned_abs()
    )
}

/// Three-line data tag: callsign, level and speed, type.
pub fn data_tag(aircraft: &Aircraft) -> String {
    format!(
        "{}\n{} {}\n{}",
        aircraft.callsign,
        level_label(aircraft),
        aircraft.speed,
        aircraft.model.name
    )
}

/// Plain-text scene table: objectives, step outcomes, aircraft and one line
/// per conflict pair.
pub struct SceneTable<'a> {
    pub report: &'a SceneReport,
    pub sequence: &'a [ScenarioStep],
    pub scale: &'a DisplayScale,
}

impl fmt::Display for SceneTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let goals: Vec<&str> = objectives(self.sequence).iter().map(|o| o.label()).collect();
        writeln!(f, "Objectives: {}", goals.join(", "))?;
        for outcome in &self.report.outcomes {
            writeln!(
                f,
                "  {} -> placed {} (short {})",
                outcome.step, outcome.placed, outcome.shortfall
            )?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "{:<8} {:<6} {:>5} {:>7} {:>5} {:>8} {:>8}",
            "CALL", "TYPE", "HDG", "LVL", "SPD", "X", "Y"
        )?;
        for aircraft in &self.report.scene.aircraft {
            writeln!(
                f,
                "{:<8} {:<6} {:>5.0} {:>7} {:>5} {:>8.1} {:>8.1}",
                aircraft.callsign,
                aircraft.model.name,
                aircraft.heading,
                level_label(aircraft),
                aircraft.speed,
                aircraft.position.longitude,
                aircraft.position.latitude
            )?;
        }

        for (lead, other, geometry) in self.report.conflict_pairs() {
            let (range_px, bearing) = range_and_bearing(&lead.position, &other.position);
            writeln!(
                f,
                "Conflict {} / {}: {:.1}nm apart on {:03.0}°, converging in {:.1} min{}",
                lead.callsign,
                other.callsign,
                self.scale.px_to_nm(range_px),
                bearing,
                geometry.time_min,
                if geometry.in_trail() { " (in trail)" } else { "" }
            )?;
        }
        Ok(())
    }
}

pub fn render_table(report: &SceneReport, sequence: &[ScenarioStep], scale: &DisplayScale) -> String {
    SceneTable {
        report,
        sequence,
        scale,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use atc_trainer_core::{AircraftType, Position, ScenarioGenerator, RadarBounds};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uuid::Uuid;

    fn aircraft(vertical_rate: i32) -> Aircraft {
        Aircraft {
            id: Uuid::nil(),
            callsign: "DLH427".to_string(),
            model: AircraftType::new("A320", 46, 41, Some(25)),
            position: Position::new(200.0, 300.0),
            heading: 270.0,
            altitude: 36,
            speed: 42,
            vertical_rate,
        }
    }

    #[test]
    fn test_data_tag_level() {
        assert_eq!(data_tag(&aircraft(0)), "DLH427\n36 42\nA320");
    }

    #[test]
    fn test_data_tag_climb_and_descent() {
        assert_eq!(data_tag(&aircraft(12)), "DLH427\n36↑12 42\nA320");
        assert_eq!(data_tag(&aircraft(-30)), "DLH427\n36↓30 42\nA320");
    }

    #[test]
    fn test_table_lists_every_aircraft_and_conflict() {
        let generator = ScenarioGenerator::default();
        let bounds = RadarBounds::new(800.0, 50.0).unwrap();
        let sequence = vec![ScenarioStep::conflict(2), ScenarioStep::random(2)];
        let report = generator
            .run_sequence(&mut StdRng::seed_from_u64(12), &sequence, &bounds)
            .unwrap();

        let table = render_table(&report, &sequence, generator.scale());
        assert!(table.starts_with("Objectives: Potential Conflict"));
        for aircraft in &report.scene.aircraft {
            assert!(table.contains(&aircraft.callsign));
        }
        assert_eq!(table.matches("Conflict ").count(), report.conflicts.len());
    }

    #[test]
    fn test_conflict_lines_name_each_pair() {
        let generator = ScenarioGenerator::default();
        let bounds = RadarBounds::new(800.0, 50.0).unwrap();
        let sequence = vec![ScenarioStep::random(1), ScenarioStep::conflict(4)];
        let report = generator
            .run_sequence(&mut StdRng::seed_from_u64(3), &sequence, &bounds)
            .unwrap();

        let table = render_table(&report, &sequence, generator.scale());
        for (lead, other, _) in report.conflict_pairs() {
            let prefix = format!("Conflict {} / {}:", lead.callsign, other.callsign);
            assert!(table.contains(&prefix));
        }
    }
}
