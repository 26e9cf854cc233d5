use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use freight_geo::Radius;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Web server
    pub host: String,
    pub port: u16,

    // Data
    pub locations_path: PathBuf,
    pub seed_trucks: usize,

    // Matching
    pub default_radius: Radius,

    /// Period of the random truck relocation job; `None` disables it.
    pub relocate_interval: Option<Duration>,
}

impl Config {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.log_summary();
        Ok(config)
    }

    /// Build from an arbitrary key lookup. Missing keys take their defaults;
    /// present but malformed values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let radius_miles: f64 = parse_or(&lookup, "FREIGHT_DEFAULT_RADIUS_MILES", 450.0)?;
        let default_radius = Radius::miles(radius_miles)
            .context("FREIGHT_DEFAULT_RADIUS_MILES must be a positive number")?;
        let relocate_secs: u64 = parse_or(&lookup, "FREIGHT_RELOCATE_INTERVAL_SECS", 180)?;

        Ok(Self {
            host: lookup("FREIGHT_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "FREIGHT_PORT", 8000)?,
            locations_path: lookup("FREIGHT_LOCATIONS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("uszips.csv")),
            seed_trucks: parse_or(&lookup, "FREIGHT_SEED_TRUCKS", 20)?,
            default_radius,
            relocate_interval: (relocate_secs > 0).then(|| Duration::from_secs(relocate_secs)),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  FREIGHT_HOST/PORT: {}", self.bind_addr());
        tracing::info!("  FREIGHT_LOCATIONS_PATH: {}", self.locations_path.display());
        tracing::info!("  FREIGHT_SEED_TRUCKS: {}", self.seed_trucks);
        tracing::info!("  FREIGHT_DEFAULT_RADIUS_MILES: {}", self.default_radius);
        match self.relocate_interval {
            Some(every) => tracing::info!("  FREIGHT_RELOCATE_INTERVAL_SECS: {}", every.as_secs()),
            None => tracing::info!("  FREIGHT_RELOCATE_INTERVAL_SECS: <disabled>"),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{key} has invalid value {raw:?}: {e}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.locations_path, PathBuf::from("uszips.csv"));
        assert_eq!(config.seed_trucks, 20);
        assert_eq!(config.default_radius.as_miles(), 450.0);
        assert_eq!(config.relocate_interval, Some(Duration::from_secs(180)));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("FREIGHT_PORT", "9100"),
            ("FREIGHT_DEFAULT_RADIUS_MILES", "125.5"),
            ("FREIGHT_RELOCATE_INTERVAL_SECS", "0"),
            ("FREIGHT_LOCATIONS_PATH", "/data/zips.csv"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.default_radius.as_miles(), 125.5);
        assert_eq!(config.relocate_interval, None);
        assert_eq!(config.locations_path, PathBuf::from("/data/zips.csv"));
    }

    #[test]
    fn malformed_values_are_errors() {
        assert!(Config::from_lookup(lookup_from(&[("FREIGHT_PORT", "eighty")])).is_err());
        assert!(
            Config::from_lookup(lookup_from(&[("FREIGHT_DEFAULT_RADIUS_MILES", "-4")])).is_err()
        );
    }
}
