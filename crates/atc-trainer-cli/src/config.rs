//! CLI configuration from environment.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Width of the square radar area in pixels
    pub radar_px: f64,
    /// Edge padding kept clear of generated aircraft
    pub padding_px: f64,
    /// Display scale
    pub nm_per_px: f64,
    /// Fixed seed for reproducible scenes
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            radar_px: 800.0,
            padding_px: 50.0,
            nm_per_px: 0.1,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            radar_px: lookup("ATC_TRAINER_RADAR_PX")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.radar_px),
            padding_px: lookup("ATC_TRAINER_PADDING_PX")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.padding_px),
            nm_per_px: lookup("ATC_TRAINER_NM_PER_PX")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.nm_per_px),
            seed: lookup("ATC_TRAINER_SEED").and_then(|s| s.parse().ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.radar_px, 800.0);
        assert_eq!(config.padding_px, 50.0);
        assert_eq!(config.nm_per_px, 0.1);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_values_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("ATC_TRAINER_RADAR_PX", "1024"),
            ("ATC_TRAINER_PADDING_PX", "not-a-number"),
            ("ATC_TRAINER_SEED", "7"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.radar_px, 1024.0);
        assert_eq!(config.padding_px, 50.0);
        assert_eq!(config.seed, Some(7));
    }
}
