//! Generation policy constants.
//!
//! Plain values shared by the generator stages and the tests. Changing any of
//! these changes the output for a given seed.

/// Grid size bounds.
pub mod grid {
    /// Recommended lower bound; smaller grids work but are cramped.
    pub const RECOMMENDED_MIN: i32 = 4;
    /// Recommended upper bound; larger grids work but route shapes degrade.
    pub const RECOMMENDED_MAX: i32 = 20;
    /// Hard cap. Connectivity passes are quadratic in station count.
    pub const MAX_GRID_SIZE: i32 = 512;
    /// Used when the config does not set one.
    pub const DEFAULT_GRID_SIZE: i32 = 8;
}

/// Zone clustering.
pub mod zoning {
    /// Smallest cluster edge length.
    pub const MIN_CLUSTER_SIZE: i32 = 2;
    /// Cluster edge length is `grid_size / CLUSTER_DIVISOR`.
    pub const CLUSTER_DIVISOR: i32 = 3;
}

/// Station counts and spacing.
pub mod placement {
    /// Stations per grid cell before the per-mode split.
    pub const BASE_DENSITY: f64 = 0.25;
    pub const METRO_SHARE: f64 = 0.30;
    pub const TRAM_SHARE: f64 = 0.35;
    pub const BUS_SHARE: f64 = 0.40;

    pub const METRO_MIN_COUNT: usize = 3;
    pub const TRAM_MIN_COUNT: usize = 4;
    pub const BUS_MIN_COUNT: usize = 5;

    /// Floor for the metro spacing radius.
    pub const MIN_SPACING: u32 = 2;
    /// Metro spacing is `grid_size / SPACING_DIVISOR`.
    pub const SPACING_DIVISOR: i32 = 6;
    /// Tram spacing is metro spacing divided by this.
    pub const TRAM_SPACING_DIVISOR: u32 = 2;
    /// Bus spacing is metro spacing divided by this.
    pub const BUS_SPACING_DIVISOR: u32 = 3;

    /// Rejection sampling budget per station.
    pub const MAX_PLACEMENT_ATTEMPTS: usize = 50;

    /// Chance a tram stop reuses an earlier-tier position.
    pub const TRAM_COLOCATION_CHANCE: f64 = 0.4;
    /// Chance a bus stop reuses an earlier-tier position.
    pub const BUS_COLOCATION_CHANCE: f64 = 0.3;
}

/// Connection walk times.
pub mod walking {
    /// In-station transfer between modes sharing a cell.
    pub const TRANSFER_MINUTES: u32 = 2;
    /// Backbone and repair edges cost this much per grid unit.
    pub const BACKBONE_TIME_PER_UNIT: u32 = 120;
    /// Different-mode stations at most this far apart get a walking link.
    pub const LOCAL_WALK_RADIUS: u32 = 2;
    /// Approximate metres per grid cell.
    pub const METRES_PER_CELL: u32 = 100;
    /// Walking speed in metres per minute.
    pub const METRES_PER_MINUTE: u32 = 60;
    /// Shortest local walking link.
    pub const MIN_WALK_MINUTES: u32 = 3;
}

/// Route synthesis.
pub mod routing {
    /// Metro below this count gets a single nearest-neighbour line.
    pub const AXIAL_MIN_STATIONS: usize = 3;
    pub const MAX_TRAM_ROUTES: usize = 2;
    /// One tram line per this many stations.
    pub const STATIONS_PER_TRAM_ROUTE: usize = 3;
    /// Shared stations between consecutive tram windows.
    pub const TRAM_WINDOW_OVERLAP: usize = 2;
    pub const MAX_BUS_ROUTES: usize = 3;
    /// One bus line per this many stations.
    pub const STATIONS_PER_BUS_ROUTE: usize = 4;
    /// Smallest bus segment.
    pub const MIN_BUS_SEGMENT: usize = 3;
    /// Routes shorter than this are dropped.
    pub const MIN_ROUTE_LENGTH: usize = 2;

    pub const METRO_COLORS: [&str; 3] = ["#FF0000", "#00FF00", "#0000FF"];
    pub const TRAM_COLORS: [&str; 3] = ["#FFA500", "#800080", "#008080"];
    pub const BUS_COLORS: [&str; 3] = ["#FFD700", "#FF69B4", "#32CD32"];
}
