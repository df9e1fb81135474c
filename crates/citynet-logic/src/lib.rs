//! Procedural transit city generator.
//!
//! This crate contains the whole generation pipeline and nothing else: no
//! file I/O, no global state. Functions take plain data and an explicit RNG
//! stream and return a `CityModel`, so a seed always reproduces its city.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`batch`] | Parallel generation of many cities with per-city seed streams |
//! | [`city_config`] | Generation parameters and their validation |
//! | [`connectivity`] | Transfer, backbone, walking and repair edges; BFS reachability |
//! | [`constants`] | Densities, spacing, walk-time factors, route palettes |
//! | [`error`] | `GenerationError` |
//! | [`model`] | Zones, stations, connections, routes and the JSON schema |
//! | [`rng`] | Seedable ChaCha RNG stream and batch seed derivation |
//! | [`routes`] | Per-mode route strategies and nearest-neighbour ordering |
//! | [`stations`] | Tiered station placement with spacing and co-location |
//! | [`stats`] | Summary figures for a generated city |
//! | [`union_find`] | Disjoint sets for component repair |
//! | [`validation`] | Invariant checks over a finished model |
//! | [`zones`] | Clustered land-use zoning |
//!
//! # Pipeline
//!
//! ```text
//! CityConfig ─▶ zones ─▶ stations ─▶ connectivity ─▶ routes ─▶ CityModel
//! ```
//!
//! ```
//! use citynet_logic::{generate, CityConfig};
//!
//! let city = generate(&CityConfig::with_grid_size(8).seeded(42)).unwrap();
//! assert_eq!(city.zones.len(), 64);
//! assert!(citynet_logic::validation::validate_model(&city).is_empty());
//! ```

pub mod batch;
pub mod city_config;
pub mod connectivity;
pub mod constants;
pub mod error;
pub mod model;
pub mod rng;
pub mod routes;
pub mod stations;
pub mod stats;
pub mod union_find;
pub mod validation;
pub mod zones;

pub use city_config::CityConfig;
pub use error::GenerationError;
pub use model::CityModel;

use city_config::validate_config;
use rng::CityRng;

/// Generate one city. Uses `config.seed` when set, a fresh entropy seed
/// otherwise; the seed in use is logged so the city can be regenerated.
pub fn generate(config: &CityConfig) -> Result<CityModel, GenerationError> {
    check_config(config)?;
    let mut rng = CityRng::from_optional_seed(config.seed);
    build_city(config, &mut rng)
}

/// Generate one city from an explicit RNG stream. `config.seed` is ignored;
/// the stream's own seed is the one logged.
pub fn generate_with_rng(
    config: &CityConfig,
    rng: &mut CityRng,
) -> Result<CityModel, GenerationError> {
    check_config(config)?;
    build_city(config, rng)
}

fn build_city(config: &CityConfig, rng: &mut CityRng) -> Result<CityModel, GenerationError> {
    let grid_size = config.grid_size;
    let seed = rng.seed();

    let zones = zones::generate_zones(grid_size, &config.zone_categories, rng);
    let mut stations = stations::place_stations(grid_size, &config.station_modes, rng);
    let (connections, edge_stats) = connectivity::build_connections(&mut stations)?;
    let routes = routes::synthesize_routes(&stations);

    let model = CityModel {
        grid_size,
        zones,
        stations,
        connections,
        routes,
    };
    log::info!("{}", city_summary(&model, seed, edge_stats.bridges));
    Ok(model)
}

/// The one-line `info` record for a generated city.
fn city_summary(model: &CityModel, seed: u64, bridges: usize) -> String {
    format!(
        "city {0}x{0} seed {1}: {2} zones, {3} stations ({4} transfer), \
         {5} connections ({6} bridges), {7} routes",
        model.grid_size,
        seed,
        model.zones.len(),
        model.stations.len(),
        model.transfer_stations().count(),
        model.connections.len(),
        bridges,
        model.routes.len()
    )
}

fn check_config(config: &CityConfig) -> Result<(), GenerationError> {
    let errors = validate_config(config);
    if !errors.is_empty() {
        return Err(GenerationError::DegenerateInput(errors));
    }
    if !config.is_recommended_size() {
        log::warn!(
            "grid size {} is outside the recommended {}..={} range",
            config.grid_size,
            constants::grid::RECOMMENDED_MIN,
            constants::grid::RECOMMENDED_MAX
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_carries_grid_seed_and_counts() {
        let mut rng = CityRng::from_seed_u64(42);
        let city = generate_with_rng(&CityConfig::with_grid_size(6), &mut rng).unwrap();
        let line = city_summary(&city, 42, 0);
        assert!(line.starts_with("city 6x6 seed 42: 36 zones, "), "{}", line);
        assert!(line.contains(&format!("{} stations", city.stations.len())));
        assert!(line.contains(&format!("{} routes", city.routes.len())));
    }

    #[test]
    fn test_unseeded_generation_is_replayable() {
        let config = CityConfig::with_grid_size(7);
        let mut rng = CityRng::from_entropy();
        let seed = rng.seed();
        let first = generate_with_rng(&config, &mut rng).unwrap();
        assert_eq!(generate(&config.seeded(seed)).unwrap(), first);
    }
}
