//! Parallel generation of many independent cities.
//!
//! Each city gets its own RNG stream derived from the batch seed and its
//! index, so the output does not depend on how rayon schedules the work.

use rayon::prelude::*;

use crate::city_config::CityConfig;
use crate::error::GenerationError;
use crate::model::CityModel;
use crate::rng::{derive_city_seed, CityRng};

/// Seed used for city `index` of a batch whose base seed is `base`.
pub fn city_seed(base: u64, index: usize) -> u64 {
    derive_city_seed(base, index as u64)
}

/// Generate `count` cities from one configuration. The base seed is
/// `config.seed`, or drawn from entropy when unset. Results are in index
/// order.
pub fn generate_batch(
    config: &CityConfig,
    count: usize,
) -> Vec<Result<CityModel, GenerationError>> {
    let base = config.seed.unwrap_or_else(rand::random);
    log::info!("batch: {} cities, grid {}, base seed {}", count, config.grid_size, base);
    generate_batch_from(config, base, count)
}

/// [`generate_batch`] with an explicit base seed.
pub fn generate_batch_from(
    config: &CityConfig,
    base: u64,
    count: usize,
) -> Vec<Result<CityModel, GenerationError>> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let mut rng = CityRng::from_seed_u64(city_seed(base, i));
            crate::generate_with_rng(config, &mut rng)
        })
        .collect()
}
