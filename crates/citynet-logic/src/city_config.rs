//! Generation parameters and their validation.
//!
//! A `CityConfig` is everything the generator needs besides the RNG stream.
//! It can be built in code or loaded from JSON; missing fields take their
//! defaults.
//!
//! ```
//! use citynet_logic::city_config::{validate_config, CityConfig};
//!
//! let config = CityConfig::with_grid_size(12).seeded(7);
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::grid;
use crate::model::{TransitMode, ZoneCategory};

/// Parameters for one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    /// Edge length of the square grid.
    pub grid_size: i32,
    /// Seed for the RNG stream (None = fresh entropy).
    pub seed: Option<u64>,
    /// Categories the zone generator may assign, in cluster order.
    pub zone_categories: Vec<ZoneCategory>,
    /// Modes the station placer will populate.
    pub station_modes: Vec<TransitMode>,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            grid_size: grid::DEFAULT_GRID_SIZE,
            seed: None,
            zone_categories: ZoneCategory::all().to_vec(),
            station_modes: TransitMode::all().to_vec(),
        }
    }
}

impl CityConfig {
    pub fn with_grid_size(grid_size: i32) -> Self {
        Self {
            grid_size,
            ..Self::default()
        }
    }

    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_modes(mut self, modes: &[TransitMode]) -> Self {
        self.station_modes = modes.to_vec();
        self
    }

    pub fn with_categories(mut self, categories: &[ZoneCategory]) -> Self {
        self.zone_categories = categories.to_vec();
        self
    }

    /// Whether the grid size is inside the range the generator is tuned for.
    pub fn is_recommended_size(&self) -> bool {
        (grid::RECOMMENDED_MIN..=grid::RECOMMENDED_MAX).contains(&self.grid_size)
    }
}

/// A precondition violation in a `CityConfig`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid size must be positive, got {0}")]
    GridSizeNotPositive(i32),
    #[error("grid size {0} exceeds the maximum of {max}", max = grid::MAX_GRID_SIZE)]
    GridSizeTooLarge(i32),
    #[error("no zone categories configured")]
    NoZoneCategories,
    #[error("no station modes configured")]
    NoStationModes,
    #[error("zone category {0} listed more than once")]
    DuplicateZoneCategory(ZoneCategory),
    #[error("station mode {0} listed more than once")]
    DuplicateStationMode(TransitMode),
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &CityConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.grid_size <= 0 {
        errors.push(ConfigError::GridSizeNotPositive(config.grid_size));
    }
    if config.grid_size > grid::MAX_GRID_SIZE {
        errors.push(ConfigError::GridSizeTooLarge(config.grid_size));
    }

    if config.zone_categories.is_empty() {
        errors.push(ConfigError::NoZoneCategories);
    }
    for (i, c) in config.zone_categories.iter().enumerate() {
        if config.zone_categories[..i].contains(c) {
            errors.push(ConfigError::DuplicateZoneCategory(*c));
        }
    }

    if config.station_modes.is_empty() {
        errors.push(ConfigError::NoStationModes);
    }
    for (i, m) in config.station_modes.iter().enumerate() {
        if config.station_modes[..i].contains(m) {
            errors.push(ConfigError::DuplicateStationMode(*m));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CityConfig::default();
        assert!(validate_config(&config).is_empty());
        assert!(config.is_recommended_size());
    }

    #[test]
    fn test_non_positive_grid() {
        let errors = validate_config(&CityConfig::with_grid_size(0));
        assert_eq!(errors, vec![ConfigError::GridSizeNotPositive(0)]);
        let errors = validate_config(&CityConfig::with_grid_size(-3));
        assert_eq!(errors, vec![ConfigError::GridSizeNotPositive(-3)]);
    }

    #[test]
    fn test_oversized_grid() {
        let errors = validate_config(&CityConfig::with_grid_size(grid::MAX_GRID_SIZE + 1));
        assert_eq!(
            errors,
            vec![ConfigError::GridSizeTooLarge(grid::MAX_GRID_SIZE + 1)]
        );
    }

    #[test]
    fn test_empty_lists() {
        let config = CityConfig::default().with_modes(&[]).with_categories(&[]);
        let errors = validate_config(&config);
        assert!(errors.contains(&ConfigError::NoZoneCategories));
        assert!(errors.contains(&ConfigError::NoStationModes));
    }

    #[test]
    fn test_duplicates() {
        let config = CityConfig::default()
            .with_modes(&[TransitMode::Bus, TransitMode::Bus])
            .with_categories(&[ZoneCategory::Commercial, ZoneCategory::Commercial]);
        let errors = validate_config(&config);
        assert_eq!(
            errors,
            vec![
                ConfigError::DuplicateZoneCategory(ZoneCategory::Commercial),
                ConfigError::DuplicateStationMode(TransitMode::Bus),
            ]
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CityConfig = serde_json::from_str(r#"{"grid_size": 10, "seed": 3}"#).unwrap();
        assert_eq!(config.grid_size, 10);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.station_modes.len(), 3);
        assert_eq!(config.zone_categories.len(), 3);
    }

    #[test]
    fn test_small_grid_not_recommended() {
        assert!(!CityConfig::with_grid_size(2).is_recommended_size());
        assert!(!CityConfig::with_grid_size(40).is_recommended_size());
    }
}
