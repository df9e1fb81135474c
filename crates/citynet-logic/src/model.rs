//! City data model: zones, stations, connections, routes.
//!
//! These types are the exchange format with every downstream consumer
//! (persistence, visualization, scheduling). Field names and enum spellings
//! follow the JSON schema:
//!
//! ```json
//! {
//!   "grid_size": 8,
//!   "zones":       [{"x": 0, "y": 0, "type": "residential"}],
//!   "stations":    [{"id": "station_0", "x": 3, "y": 5, "type": "metro", "is_transfer": true}],
//!   "connections": [{"from": "station_0", "to": "station_3", "walk_time": 2}],
//!   "routes":      [{"id": "route_0", "mode": "metro", "stations": ["station_0", "station_2"], "color": "#FF0000"}]
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Land-use category of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneCategory {
    Residential,
    Commercial,
    Industrial,
}

impl ZoneCategory {
    pub fn all() -> &'static [ZoneCategory] {
        &[
            ZoneCategory::Residential,
            ZoneCategory::Commercial,
            ZoneCategory::Industrial,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            ZoneCategory::Residential => "residential",
            ZoneCategory::Commercial => "commercial",
            ZoneCategory::Industrial => "industrial",
        }
    }
}

/// Transit mode served by a station or route.
///
/// Declaration order is the placement hierarchy: rapid transit first,
/// local service last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitMode {
    Metro,
    Tram,
    Bus,
}

impl TransitMode {
    /// All modes in placement order.
    pub fn all() -> &'static [TransitMode] {
        &[TransitMode::Metro, TransitMode::Tram, TransitMode::Bus]
    }

    pub fn name(self) -> &'static str {
        match self {
            TransitMode::Metro => "metro",
            TransitMode::Tram => "tram",
            TransitMode::Bus => "bus",
        }
    }
}

impl fmt::Display for TransitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ZoneCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Identifiers ─────────────────────────────────────────────────────────

/// Error returned when an identifier string has the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} id: {value:?}")]
pub struct ParseIdError {
    kind: &'static str,
    value: String,
}

macro_rules! prefixed_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal, $kind:literal, $expecting:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.strip_prefix($prefix)
                    .and_then(|n| n.parse::<u32>().ok())
                    .map($name)
                    .ok_or_else(|| ParseIdError {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct IdVisitor;

                impl<'de> Visitor<'de> for IdVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str($expecting)
                    }

                    fn visit_str<E: de::Error>(self, v: &str) -> Result<$name, E> {
                        v.parse().map_err(E::custom)
                    }
                }

                deserializer.deserialize_str(IdVisitor)
            }
        }
    };
}

prefixed_id!(
    /// Station identifier, serialized as `"station_<n>"`.
    StationId,
    "station_",
    "station",
    "a string of the form \"station_<n>\""
);

prefixed_id!(
    /// Route identifier, serialized as `"route_<n>"`.
    RouteId,
    "route_",
    "route",
    "a string of the form \"route_<n>\""
);

// ── Records ─────────────────────────────────────────────────────────────

/// One grid cell and its land use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type")]
    pub category: ZoneCategory,
}

/// A point of service for one transit mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type")]
    pub mode: TransitMode,
    /// Derived: another station of a different mode shares this cell.
    pub is_transfer: bool,
}

impl Station {
    pub fn new(id: StationId, x: i32, y: i32, mode: TransitMode) -> Self {
        Self {
            id,
            x,
            y,
            mode,
            is_transfer: false,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Manhattan distance to another station.
    pub fn distance_to(&self, other: &Station) -> u32 {
        manhattan((self.x, self.y), (other.x, other.y))
    }
}

/// Manhattan distance between two grid cells.
pub fn manhattan(a: (i32, i32), b: (i32, i32)) -> u32 {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

/// Undirected link between two stations. Stored once per unordered pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: StationId,
    pub to: StationId,
    pub walk_time: u32,
}

impl Connection {
    /// Order-independent key for duplicate detection.
    pub fn pair_key(&self) -> (StationId, StationId) {
        if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }
}

/// An ordered service line over stations of a single mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub mode: TransitMode,
    pub stations: Vec<StationId>,
    pub color: String,
}

/// The complete generated city. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityModel {
    pub grid_size: i32,
    pub zones: Vec<Zone>,
    pub stations: Vec<Station>,
    pub connections: Vec<Connection>,
    pub routes: Vec<Route>,
}

impl CityModel {
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    pub fn stations_by_mode(&self, mode: TransitMode) -> impl Iterator<Item = &Station> {
        self.stations.iter().filter(move |s| s.mode == mode)
    }

    pub fn transfer_stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter().filter(|s| s.is_transfer)
    }

    pub fn routes_by_mode(&self, mode: TransitMode) -> impl Iterator<Item = &Route> {
        self.routes.iter().filter(move |r| r.mode == mode)
    }

    /// Zone covering a cell, if the cell is on the grid.
    pub fn zone_at(&self, x: i32, y: i32) -> Option<&Zone> {
        if x < 0 || y < 0 || x >= self.grid_size || y >= self.grid_size {
            return None;
        }
        // Zones are emitted column-major: x outer, y inner.
        let idx = (x * self.grid_size + y) as usize;
        match self.zones.get(idx) {
            Some(z) if z.x == x && z.y == y => Some(z),
            _ => self.zones.iter().find(|z| z.x == x && z.y == y),
        }
    }
}
