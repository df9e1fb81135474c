//! Summary figures for a generated city.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::model::{CityModel, TransitMode, ZoneCategory};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CityStats {
    pub grid_size: i32,
    pub zones: BTreeMap<ZoneCategory, usize>,
    pub stations: BTreeMap<TransitMode, usize>,
    pub transfer_stations: usize,
    pub connections: usize,
    pub total_walk_time: u64,
    pub mean_walk_time: f64,
    pub routes: BTreeMap<TransitMode, usize>,
    pub mean_route_length: f64,
}

impl CityStats {
    pub fn from_model(model: &CityModel) -> Self {
        let mut zones = BTreeMap::new();
        for z in &model.zones {
            *zones.entry(z.category).or_insert(0) += 1;
        }

        let mut stations = BTreeMap::new();
        for s in &model.stations {
            *stations.entry(s.mode).or_insert(0) += 1;
        }

        let mut routes = BTreeMap::new();
        for r in &model.routes {
            *routes.entry(r.mode).or_insert(0) += 1;
        }

        let total_walk_time: u64 = model.connections.iter().map(|c| c.walk_time as u64).sum();
        let route_stops: usize = model.routes.iter().map(|r| r.stations.len()).sum();

        Self {
            grid_size: model.grid_size,
            zones,
            stations,
            transfer_stations: model.transfer_stations().count(),
            connections: model.connections.len(),
            total_walk_time,
            mean_walk_time: mean(total_walk_time as f64, model.connections.len()),
            routes,
            mean_route_length: mean(route_stops as f64, model.routes.len()),
        }
    }

    pub fn station_count(&self) -> usize {
        self.stations.values().sum()
    }

    pub fn route_count(&self) -> usize {
        self.routes.values().sum()
    }
}

fn mean(total: f64, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        total / n as f64
    }
}

impl fmt::Display for CityStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0} grid", self.grid_size)?;
        for mode in TransitMode::all() {
            write!(f, ", {} {}", self.stations.get(mode).copied().unwrap_or(0), mode)?;
        }
        write!(
            f,
            ", {} transfers, {} connections (mean {:.1} min), {} routes (mean {:.1} stops)",
            self.transfer_stations,
            self.connections,
            self.mean_walk_time,
            self.route_count(),
            self.mean_route_length
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Connection, Route, RouteId, Station, StationId, Zone};

    fn zone(x: i32, y: i32, category: ZoneCategory) -> Zone {
        Zone { x, y, category }
    }

    #[test]
    fn test_empty_model() {
        let stats = CityStats::from_model(&CityModel::default());
        assert_eq!(stats.station_count(), 0);
        assert_eq!(stats.mean_walk_time, 0.0);
        assert_eq!(stats.mean_route_length, 0.0);
    }

    #[test]
    fn test_counts_and_means() {
        let mut a = Station::new(StationId(0), 0, 0, TransitMode::Metro);
        a.is_transfer = true;
        let mut b = Station::new(StationId(1), 0, 0, TransitMode::Tram);
        b.is_transfer = true;
        let c = Station::new(StationId(2), 1, 0, TransitMode::Tram);
        let model = CityModel {
            grid_size: 2,
            zones: vec![
                zone(0, 0, ZoneCategory::Residential),
                zone(0, 1, ZoneCategory::Residential),
                zone(1, 0, ZoneCategory::Industrial),
                zone(1, 1, ZoneCategory::Commercial),
            ],
            stations: vec![a, b, c],
            connections: vec![
                Connection {
                    from: StationId(0),
                    to: StationId(1),
                    walk_time: 2,
                },
                Connection {
                    from: StationId(1),
                    to: StationId(2),
                    walk_time: 120,
                },
            ],
            routes: vec![Route {
                id: RouteId(0),
                mode: TransitMode::Tram,
                stations: vec![StationId(1), StationId(2)],
                color: "#FFA500".into(),
            }],
        };

        let stats = CityStats::from_model(&model);
        assert_eq!(stats.zones[&ZoneCategory::Residential], 2);
        assert_eq!(stats.stations[&TransitMode::Tram], 2);
        assert_eq!(stats.transfer_stations, 2);
        assert_eq!(stats.total_walk_time, 122);
        assert_eq!(stats.mean_walk_time, 61.0);
        assert_eq!(stats.route_count(), 1);
        assert_eq!(stats.mean_route_length, 2.0);
        assert!(stats.to_string().starts_with("2x2 grid, 1 metro, 2 tram, 0 bus"));
    }
}
