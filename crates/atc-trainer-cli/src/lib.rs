//! ATC Trainer CLI - scenario generation tools for the radar trainer.
//!
//! This crate provides:
//! - generate_scenario: build a scene for a difficulty or explicit steps

pub mod config;
pub mod summary;

pub use config::Config;
pub use summary::{data_tag, render_table, SceneTable};
