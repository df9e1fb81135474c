//! Station placement: Metro, then Tram, then Bus.
//!
//! Each tier sees every position placed before it. Metro is spread out by
//! rejection sampling; Tram and Bus may reuse an earlier-tier position to
//! seed a transfer and otherwise sample with a looser spacing radius.
//! Rejection sampling is attempt-capped: when no compliant cell turns up the
//! last sample is accepted, so placement always terminates.
//!
//! `is_transfer` is left false here; the connectivity stage derives it.

use rand::Rng;

use crate::constants::placement;
use crate::model::{manhattan, Station, StationId, TransitMode};

/// Target station count per mode for a grid.
pub fn station_count(grid_size: i32, mode: TransitMode) -> usize {
    let area = (grid_size.max(0) as f64).powi(2);
    let (share, floor) = match mode {
        TransitMode::Metro => (placement::METRO_SHARE, placement::METRO_MIN_COUNT),
        TransitMode::Tram => (placement::TRAM_SHARE, placement::TRAM_MIN_COUNT),
        TransitMode::Bus => (placement::BUS_SHARE, placement::BUS_MIN_COUNT),
    };
    ((area * placement::BASE_DENSITY * share) as usize).max(floor)
}

/// Minimum Manhattan spacing between metro stations.
pub fn metro_spacing(grid_size: i32) -> u32 {
    ((grid_size / placement::SPACING_DIVISOR).max(0) as u32).max(placement::MIN_SPACING)
}

/// Spacing radius and co-location chance for a tier.
fn tier_policy(mode: TransitMode, base_spacing: u32) -> (u32, f64) {
    match mode {
        TransitMode::Metro => (base_spacing, 0.0),
        TransitMode::Tram => (
            base_spacing / placement::TRAM_SPACING_DIVISOR,
            placement::TRAM_COLOCATION_CHANCE,
        ),
        TransitMode::Bus => (
            base_spacing / placement::BUS_SPACING_DIVISOR,
            placement::BUS_COLOCATION_CHANCE,
        ),
    }
}

/// Places stations tier by tier, tracking occupied positions.
struct Placer<'a, R: Rng> {
    grid_size: i32,
    rng: &'a mut R,
    /// Positions claimed so far, in placement order. A relaxed placement may
    /// repeat one.
    positions: Vec<(i32, i32)>,
    stations: Vec<Station>,
    relaxed: usize,
}

impl<'a, R: Rng> Placer<'a, R> {
    fn new(grid_size: i32, rng: &'a mut R) -> Self {
        Self {
            grid_size,
            rng,
            positions: Vec::new(),
            stations: Vec::new(),
            relaxed: 0,
        }
    }

    fn sample_cell(&mut self) -> (i32, i32) {
        (
            self.rng.gen_range(0..self.grid_size),
            self.rng.gen_range(0..self.grid_size),
        )
    }

    fn is_clear(&self, cell: (i32, i32), spacing: u32) -> bool {
        self.positions.iter().all(|&p| manhattan(cell, p) >= spacing)
    }

    /// Rejection-sample a cell at least `spacing` from every placed position.
    fn find_position(&mut self, spacing: u32) -> (i32, i32) {
        let mut cell = self.sample_cell();
        for attempt in 1..=placement::MAX_PLACEMENT_ATTEMPTS {
            if self.is_clear(cell, spacing) {
                return cell;
            }
            if attempt < placement::MAX_PLACEMENT_ATTEMPTS {
                cell = self.sample_cell();
            }
        }
        log::trace!(
            "placement exhausted after {} attempts (spacing {}), accepting {:?}",
            placement::MAX_PLACEMENT_ATTEMPTS,
            spacing,
            cell
        );
        self.relaxed += 1;
        cell
    }

    fn push_station(&mut self, cell: (i32, i32), mode: TransitMode) {
        let id = StationId(self.stations.len() as u32);
        self.stations.push(Station::new(id, cell.0, cell.1, mode));
    }

    fn place_tier(&mut self, mode: TransitMode, count: usize, base_spacing: u32) {
        let (spacing, colocation_chance) = tier_policy(mode, base_spacing);
        // Co-location targets are fixed at tier start: earlier tiers only.
        let earlier_tiers = self.positions.len();
        let relaxed_before = self.relaxed;
        let mut colocated = 0;

        for i in 0..count {
            if i < earlier_tiers && self.rng.gen_bool(colocation_chance) {
                let cell = self.positions[i];
                self.push_station(cell, mode);
                colocated += 1;
            } else {
                let cell = self.find_position(spacing);
                self.positions.push(cell);
                self.push_station(cell, mode);
            }
        }

        log::debug!(
            "stations: {} {} placed (spacing {}, {} co-located, {} relaxed)",
            count,
            mode,
            spacing,
            colocated,
            self.relaxed - relaxed_before
        );
    }
}

/// Place stations for every enabled mode. Ids are `station_0..` in
/// placement order.
pub fn place_stations(grid_size: i32, modes: &[TransitMode], rng: &mut impl Rng) -> Vec<Station> {
    let base_spacing = metro_spacing(grid_size);
    let mut placer = Placer::new(grid_size, rng);

    for &mode in TransitMode::all() {
        if !modes.contains(&mode) {
            continue;
        }
        placer.place_tier(mode, station_count(grid_size, mode), base_spacing);
    }

    placer.stations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::CityRng;
    use std::collections::HashSet;

    #[test]
    fn test_minimum_counts_on_small_grid() {
        assert_eq!(station_count(4, TransitMode::Metro), 3);
        assert_eq!(station_count(4, TransitMode::Tram), 4);
        assert_eq!(station_count(4, TransitMode::Bus), 5);
        assert_eq!(station_count(1, TransitMode::Bus), 5);
    }

    #[test]
    fn test_counts_scale_with_area() {
        // 20x20 = 400 cells, 100 stations before the split
        assert_eq!(station_count(20, TransitMode::Metro), 30);
        assert_eq!(station_count(20, TransitMode::Tram), 35);
        assert_eq!(station_count(20, TransitMode::Bus), 40);
    }

    #[test]
    fn test_spacing() {
        assert_eq!(metro_spacing(4), 2);
        assert_eq!(metro_spacing(12), 2);
        assert_eq!(metro_spacing(18), 3);
    }

    #[test]
    fn test_all_positions_on_grid() {
        for grid_size in [1, 3, 8, 15] {
            let mut rng = CityRng::from_seed_u64(grid_size as u64 * 13);
            let stations = place_stations(grid_size, TransitMode::all(), &mut rng);
            assert!(stations
                .iter()
                .all(|s| s.x >= 0 && s.y >= 0 && s.x < grid_size && s.y < grid_size));
        }
    }

    #[test]
    fn test_ids_unique_and_sequential() {
        let mut rng = CityRng::from_seed_u64(8);
        let stations = place_stations(10, TransitMode::all(), &mut rng);
        let ids: HashSet<StationId> = stations.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), stations.len());
        for (i, s) in stations.iter().enumerate() {
            assert_eq!(s.id, StationId(i as u32));
        }
    }

    #[test]
    fn test_tiers_in_order() {
        let mut rng = CityRng::from_seed_u64(21);
        let stations = place_stations(8, TransitMode::all(), &mut rng);
        let modes: Vec<TransitMode> = stations.iter().map(|s| s.mode).collect();
        let mut sorted = modes.clone();
        sorted.sort();
        assert_eq!(modes, sorted, "metro, tram, bus must be placed in that order");
        assert!(stations.iter().all(|s| !s.is_transfer));
    }

    #[test]
    fn test_disabled_mode_not_placed() {
        let mut rng = CityRng::from_seed_u64(4);
        let stations = place_stations(8, &[TransitMode::Bus, TransitMode::Metro], &mut rng);
        assert!(stations.iter().all(|s| s.mode != TransitMode::Tram));
        assert_eq!(
            stations.iter().filter(|s| s.mode == TransitMode::Bus).count(),
            station_count(8, TransitMode::Bus)
        );
    }

    #[test]
    fn test_metro_spacing_respected_when_room() {
        // 12x12 grid, spacing 2, 10 metro stations: ample room.
        let mut rng = CityRng::from_seed_u64(77);
        let stations = place_stations(12, &[TransitMode::Metro], &mut rng);
        let spacing = metro_spacing(12);
        let mut close_pairs = 0;
        for (i, a) in stations.iter().enumerate() {
            for b in &stations[i + 1..] {
                if a.distance_to(b) < spacing {
                    close_pairs += 1;
                }
            }
        }
        assert_eq!(close_pairs, 0);
    }

    #[test]
    fn test_trams_seed_transfers_at_metro_cells() {
        let mut shared = 0;
        for seed in 0..30 {
            let mut rng = CityRng::from_seed_u64(seed);
            let stations = place_stations(10, TransitMode::all(), &mut rng);
            let metro: HashSet<(i32, i32)> = stations
                .iter()
                .filter(|s| s.mode == TransitMode::Metro)
                .map(|s| s.position())
                .collect();
            shared += stations
                .iter()
                .filter(|s| s.mode == TransitMode::Tram && metro.contains(&s.position()))
                .count();
        }
        assert!(shared > 0, "no tram stop ever co-located with metro");
    }

    #[test]
    fn test_single_cell_grid_terminates() {
        let mut rng = CityRng::from_seed_u64(0);
        let stations = place_stations(1, TransitMode::all(), &mut rng);
        assert_eq!(stations.len(), 12);
        assert!(stations.iter().all(|s| s.position() == (0, 0)));
    }
}
