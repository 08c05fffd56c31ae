//! CLI tool that builds one radar trainer scene.
//!
//! Prints either a data-tag table or JSON for a presentation layer.
//!
//! Usage:
//!   cargo run -p atc-trainer-cli --bin generate_scenario -- --difficulty hard
//!   cargo run -p atc-trainer-cli --bin generate_scenario -- --step conflict:2 --step random:4 --format json

use anyhow::Context;
use atc_trainer_cli::{render_table, Config};
use atc_trainer_core::{
    objectives, plan_sequence, AircraftCatalog, AircraftFactory, Difficulty, DisplayScale,
    GenerationRules, RadarBounds, ScenarioGenerator, ScenarioStep,
};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    /// 3-6 aircraft
    Easy,
    /// 4-6 aircraft
    Medium,
    /// 8-12 aircraft
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Data-tag table
    Table,
    /// Scene report as JSON
    Json,
}

/// Generate an ATC trainer scenario
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Difficulty used to plan the sequence when no --step is given
    #[arg(long, value_enum, default_value = "easy")]
    difficulty: DifficultyArg,

    /// Explicit step, e.g. conflict:2 or random:4 (repeatable)
    #[arg(long = "step")]
    steps: Vec<ScenarioStep>,

    /// Seed for a reproducible scene (overrides ATC_TRAINER_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Radar width in pixels (overrides ATC_TRAINER_RADAR_PX)
    #[arg(long)]
    radar_px: Option<f64>,

    /// Edge padding in pixels (overrides ATC_TRAINER_PADDING_PX)
    #[arg(long)]
    padding_px: Option<f64>,

    /// Nautical miles per pixel (overrides ATC_TRAINER_NM_PER_PX)
    #[arg(long)]
    nm_per_px: Option<f64>,

    /// Generation rules JSON file
    #[arg(long)]
    rules: Option<std::path::PathBuf>,

    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("atc_trainer_core=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    let rules = match &args.rules {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading rules from {}", path.display()))?;
            serde_json::from_str::<GenerationRules>(&raw).context("parsing generation rules")?
        }
        None => GenerationRules::default(),
    };

    let bounds = RadarBounds::new(
        args.radar_px.unwrap_or(config.radar_px),
        args.padding_px.unwrap_or(config.padding_px),
    )?;
    let scale = DisplayScale::new(args.nm_per_px.unwrap_or(config.nm_per_px))?;
    let factory = AircraftFactory::new(AircraftCatalog::default(), rules)?;
    let generator = ScenarioGenerator::new(factory, scale);

    let mut rng = match args.seed.or(config.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let difficulty = Difficulty::from(args.difficulty);
    let sequence = if args.steps.is_empty() {
        plan_sequence(&mut rng, difficulty)
    } else {
        args.steps.clone()
    };
    tracing::info!("Generating {} scenario: {:?}", difficulty, sequence);

    let report = generator.run_sequence(&mut rng, &sequence, &bounds)?;
    if report.shortfall() > 0 {
        tracing::warn!("Scene is short {} aircraft", report.shortfall());
    }

    match args.format {
        OutputFormat::Table => print!("{}", render_table(&report, &sequence, &scale)),
        OutputFormat::Json => {
            let output = json!({
                "difficulty": difficulty,
                "sequence": sequence,
                "objectives": objectives(&sequence),
                "report": report,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
