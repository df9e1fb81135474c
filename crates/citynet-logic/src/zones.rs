//! Zone generation: clustered land use over the grid.
//!
//! Each category claims one square cluster around a random centre. Earlier
//! categories win overlapping cells. Whatever is left afterwards gets a
//! uniformly random category, so the grid is always fully covered.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::zoning;
use crate::model::{Zone, ZoneCategory};

/// Edge length of a category cluster for this grid.
pub fn cluster_size(grid_size: i32) -> i32 {
    (grid_size / zoning::CLUSTER_DIVISOR).max(zoning::MIN_CLUSTER_SIZE)
}

/// Fill a `grid_size × grid_size` grid with zones.
///
/// Output is column-major (x outer, y inner), one zone per cell.
/// `categories` must be non-empty; `generate` checks this up front.
pub fn generate_zones(
    grid_size: i32,
    categories: &[ZoneCategory],
    rng: &mut impl Rng,
) -> Vec<Zone> {
    let n = grid_size.max(0) as usize;
    let mut grid: Vec<Option<ZoneCategory>> = vec![None; n * n];
    let cluster = cluster_size(grid_size);
    let half = cluster / 2;

    for &category in categories {
        let cx = cluster_center(grid_size, half, rng);
        let cy = cluster_center(grid_size, half, rng);

        // Footprint spans -ceil(c/2)..=floor(c/2) around the centre.
        for dx in -(cluster + 1) / 2..=half {
            for dy in -(cluster + 1) / 2..=half {
                let (x, y) = (cx + dx, cy + dy);
                if x < 0 || y < 0 || x >= grid_size || y >= grid_size {
                    continue;
                }
                let cell = &mut grid[x as usize * n + y as usize];
                if cell.is_none() {
                    *cell = Some(category);
                }
            }
        }
    }

    let mut zones = Vec::with_capacity(n * n);
    for x in 0..grid_size {
        for y in 0..grid_size {
            let cell = grid[x as usize * n + y as usize];
            let category = match cell {
                Some(c) => c,
                None => *categories.choose(rng).unwrap_or(&ZoneCategory::Residential),
            };
            zones.push(Zone { x, y, category });
        }
    }

    log::debug!(
        "zones: {}x{} grid, cluster size {}, {} categories",
        grid_size,
        grid_size,
        cluster,
        categories.len()
    );
    zones
}

/// Random centre coordinate, inset so the cluster stays mostly on-grid.
/// Falls back to the whole grid when the inset range is empty.
fn cluster_center(grid_size: i32, half: i32, rng: &mut impl Rng) -> i32 {
    let lo = half;
    let hi = grid_size - half - 1;
    if lo <= hi {
        rng.gen_range(lo..=hi)
    } else {
        rng.gen_range(0..grid_size)
    }
}
