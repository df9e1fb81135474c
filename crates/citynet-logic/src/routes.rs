//! Route synthesis: one strategy per transit mode.
//!
//! | Mode  | Strategy     | Shape |
//! |-------|--------------|-------|
//! | Metro | `Axial`      | east–west and north–south lines from alternate stations |
//! | Tram  | `Linear`     | 1–2 overlapping windows, each nearest-neighbour ordered |
//! | Bus   | `Connecting` | up to 3 index segments, each nearest-neighbour ordered |
//!
//! Routes depend only on the station list, not on the connection graph.

use crate::constants::routing;
use crate::model::{Route, RouteId, Station, StationId, TransitMode};

/// How a mode's stations are grouped into lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStrategy {
    Axial,
    Linear,
    Connecting,
}

impl RouteStrategy {
    pub fn for_mode(mode: TransitMode) -> Self {
        match mode {
            TransitMode::Metro => RouteStrategy::Axial,
            TransitMode::Tram => RouteStrategy::Linear,
            TransitMode::Bus => RouteStrategy::Connecting,
        }
    }

    /// Candidate station sequences for one mode. Candidates may be shorter
    /// than a valid route; the caller filters them.
    pub fn build(self, stations: &[&Station]) -> Vec<Vec<StationId>> {
        if stations.len() < routing::MIN_ROUTE_LENGTH {
            return Vec::new();
        }
        match self {
            RouteStrategy::Axial => axial_routes(stations),
            RouteStrategy::Linear => linear_routes(stations),
            RouteStrategy::Connecting => connecting_routes(stations),
        }
    }
}

/// Greedy nearest-neighbour path: start at the leftmost station, then keep
/// stepping to the closest unvisited one. Ties go to the earliest station in
/// input order. Two or fewer stations are returned as given.
pub fn order_by_nearest_neighbor(stations: &[&Station]) -> Vec<StationId> {
    if stations.len() <= 2 {
        return stations.iter().map(|s| s.id).collect();
    }

    let mut visited = vec![false; stations.len()];
    let mut order = Vec::with_capacity(stations.len());

    let mut current = stations
        .iter()
        .enumerate()
        .min_by_key(|(i, s)| (s.x, *i))
        .map_or(0, |(i, _)| i);

    loop {
        visited[current] = true;
        order.push(stations[current].id);

        let next = stations
            .iter()
            .enumerate()
            .filter(|(i, _)| !visited[*i])
            .min_by_key(|(i, s)| (stations[current].distance_to(s), *i))
            .map(|(i, _)| i);

        match next {
            Some(i) => current = i,
            None => break,
        }
    }
    order
}

fn axial_routes(stations: &[&Station]) -> Vec<Vec<StationId>> {
    if stations.len() < routing::AXIAL_MIN_STATIONS {
        return vec![order_by_nearest_neighbor(stations)];
    }

    let mut by_x = stations.to_vec();
    by_x.sort_by_key(|s| s.x);
    let mut by_y = stations.to_vec();
    by_y.sort_by_key(|s| s.y);

    let east_west: Vec<StationId> = by_x.iter().step_by(2).map(|s| s.id).collect();
    let north_south: Vec<StationId> = by_y.iter().skip(1).step_by(2).map(|s| s.id).collect();

    vec![east_west, north_south]
}

fn linear_routes(stations: &[&Station]) -> Vec<Vec<StationId>> {
    let n = stations.len();
    let count = (n / routing::STATIONS_PER_TRAM_ROUTE).clamp(1, routing::MAX_TRAM_ROUTES);
    let window = n / count;

    (0..count)
        .map(|i| {
            let start = i * window;
            let end = (start + window + routing::TRAM_WINDOW_OVERLAP).min(n);
            order_by_nearest_neighbor(&stations[start..end])
        })
        .collect()
}

fn connecting_routes(stations: &[&Station]) -> Vec<Vec<StationId>> {
    let n = stations.len();
    let count = (n / routing::STATIONS_PER_BUS_ROUTE).clamp(1, routing::MAX_BUS_ROUTES);
    let segment = (n / count).max(routing::MIN_BUS_SEGMENT);

    (0..count)
        .map(|i| {
            let start = i * n / count;
            let end = (start + segment).min(n);
            order_by_nearest_neighbor(&stations[start..end])
        })
        .collect()
}

/// Line colour for the `ordinal`-th route of a mode.
pub fn route_color(mode: TransitMode, ordinal: usize) -> &'static str {
    let palette: &[&str] = match mode {
        TransitMode::Metro => &routing::METRO_COLORS,
        TransitMode::Tram => &routing::TRAM_COLORS,
        TransitMode::Bus => &routing::BUS_COLORS,
    };
    palette[ordinal % palette.len()]
}

/// Build routes for every mode present, Metro first. Route ids are
/// `route_0..` in emission order.
pub fn synthesize_routes(stations: &[Station]) -> Vec<Route> {
    let mut routes = Vec::new();

    for &mode in TransitMode::all() {
        let members: Vec<&Station> = stations.iter().filter(|s| s.mode == mode).collect();
        let strategy = RouteStrategy::for_mode(mode);
        let mut kept = 0;

        for path in strategy.build(&members) {
            if path.len() < routing::MIN_ROUTE_LENGTH {
                continue;
            }
            routes.push(Route {
                id: RouteId(routes.len() as u32),
                mode,
                stations: path,
                color: route_color(mode, kept).to_string(),
            });
            kept += 1;
        }

        if !members.is_empty() {
            log::debug!(
                "routes: {} {} lines over {} stations ({:?})",
                kept,
                mode,
                members.len(),
                strategy
            );
        }
    }

    routes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stations(mode: TransitMode, cells: &[(i32, i32)]) -> Vec<Station> {
        cells
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Station::new(StationId(i as u32), x, y, mode))
            .collect()
    }

    fn ids(raw: &[u32]) -> Vec<StationId> {
        raw.iter().map(|&i| StationId(i)).collect()
    }

    #[test]
    fn test_nearest_neighbor_starts_leftmost() {
        let s = stations(TransitMode::Bus, &[(5, 0), (0, 0), (9, 0), (2, 0)]);
        let refs: Vec<&Station> = s.iter().collect();
        assert_eq!(order_by_nearest_neighbor(&refs), ids(&[1, 3, 0, 2]));
    }

    #[test]
    fn test_nearest_neighbor_handles_identical_stations() {
        // Two stations with equal coordinates and mode must both survive.
        let s = stations(TransitMode::Bus, &[(1, 1), (1, 1), (0, 0), (4, 4)]);
        let refs: Vec<&Station> = s.iter().collect();
        let order = order_by_nearest_neighbor(&refs);
        assert_eq!(order, ids(&[2, 0, 1, 3]));
    }

    #[test]
    fn test_nearest_neighbor_small_inputs_unchanged() {
        let s = stations(TransitMode::Tram, &[(9, 9), (0, 0)]);
        let refs: Vec<&Station> = s.iter().collect();
        assert_eq!(order_by_nearest_neighbor(&refs), ids(&[0, 1]));
        assert!(order_by_nearest_neighbor(&[]).is_empty());
    }

    #[test]
    fn test_axial_two_lines() {
        let s = stations(
            TransitMode::Metro,
            &[(0, 4), (4, 0), (2, 2), (6, 1), (3, 5)],
        );
        let refs: Vec<&Station> = s.iter().collect();
        let lines = RouteStrategy::Axial.build(&refs);
        // x order: ids 0,2,4,1,3; every other from the first
        assert_eq!(lines[0], ids(&[0, 4, 3]));
        // y order: ids 1,3,2,0,4; every other from the second
        assert_eq!(lines[1], ids(&[3, 0]));
    }

    #[test]
    fn test_axial_few_stations_single_line() {
        let s = stations(TransitMode::Metro, &[(3, 3), (1, 1)]);
        let refs: Vec<&Station> = s.iter().collect();
        let lines = RouteStrategy::Axial.build(&refs);
        assert_eq!(lines, vec![ids(&[0, 1])]);
    }

    #[test]
    fn test_linear_windows_overlap() {
        let cells: Vec<(i32, i32)> = (0..8).map(|i| (i, 0)).collect();
        let s = stations(TransitMode::Tram, &cells);
        let refs: Vec<&Station> = s.iter().collect();
        let lines = RouteStrategy::Linear.build(&refs);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], ids(&[0, 1, 2, 3, 4, 5]));
        assert_eq!(lines[1], ids(&[4, 5, 6, 7]));
    }

    #[test]
    fn test_linear_single_window_for_few_stations() {
        let s = stations(TransitMode::Tram, &[(0, 0), (5, 5), (1, 1), (2, 0)]);
        let refs: Vec<&Station> = s.iter().collect();
        let lines = RouteStrategy::Linear.build(&refs);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 4);
    }

    #[test]
    fn test_connecting_segments() {
        let cells: Vec<(i32, i32)> = (0..12).map(|i| (i, i % 3)).collect();
        let s = stations(TransitMode::Bus, &cells);
        let refs: Vec<&Station> = s.iter().collect();
        let lines = RouteStrategy::Connecting.build(&refs);
        assert_eq!(lines.len(), 3);
        for (k, line) in lines.iter().enumerate() {
            assert_eq!(line.len(), 4);
            let mut sorted = line.clone();
            sorted.sort();
            let first = 4 * k as u32;
            assert_eq!(sorted, ids(&[first, first + 1, first + 2, first + 3]));
        }
    }

    #[test]
    fn test_connecting_minimum_segment() {
        // 5 stations -> one route over all of them.
        let cells: Vec<(i32, i32)> = (0..5).map(|i| (i, 0)).collect();
        let s = stations(TransitMode::Bus, &cells);
        let refs: Vec<&Station> = s.iter().collect();
        let lines = RouteStrategy::Connecting.build(&refs);
        assert_eq!(lines, vec![ids(&[0, 1, 2, 3, 4])]);
    }

    #[test]
    fn test_colors_cycle_per_mode() {
        assert_eq!(route_color(TransitMode::Metro, 0), "#FF0000");
        assert_eq!(route_color(TransitMode::Metro, 3), "#FF0000");
        assert_eq!(route_color(TransitMode::Tram, 1), "#800080");
        assert_eq!(route_color(TransitMode::Bus, 2), "#32CD32");
    }

    #[test]
    fn test_synthesize_ids_and_modes() {
        let mut all = stations(TransitMode::Metro, &[(0, 0), (4, 4), (8, 1)]);
        for (k, &(x, y)) in [(1, 1), (2, 5), (6, 6), (7, 2)].iter().enumerate() {
            all.push(Station::new(StationId(3 + k as u32), x, y, TransitMode::Tram));
        }
        let routes = synthesize_routes(&all);
        for (i, r) in routes.iter().enumerate() {
            assert_eq!(r.id, RouteId(i as u32));
            assert!(r.stations.len() >= 2);
            for id in &r.stations {
                let st = all.iter().find(|s| s.id == *id).unwrap();
                assert_eq!(st.mode, r.mode);
            }
        }
        assert_eq!(routes[0].mode, TransitMode::Metro);
        assert_eq!(routes.last().unwrap().mode, TransitMode::Tram);
    }

    #[test]
    fn test_lone_station_mode_gets_no_route() {
        let all = vec![
            Station::new(StationId(0), 0, 0, TransitMode::Metro),
            Station::new(StationId(1), 1, 1, TransitMode::Bus),
            Station::new(StationId(2), 2, 2, TransitMode::Bus),
        ];
        let routes = synthesize_routes(&all);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].mode, TransitMode::Bus);
        assert_eq!(routes[0].color, "#FFD700");
    }
}
