//! Station graph construction.
//!
//! Four passes, in order:
//!   1. transfer edges between different-mode stations sharing a cell
//!   2. spanning backbone grown from the first station (nearest addition)
//!   3. short walking links between nearby different-mode stations
//!   4. repair: bridge the closest pair across components until one remains
//!
//! Every pass goes through [`EdgeSet`], which refuses a second edge for an
//! unordered pair already linked. The result is checked with a BFS before it
//! is returned; a disconnected graph is an error, never an output.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use crate::constants::walking;
use crate::error::GenerationError;
use crate::model::{Connection, Station, StationId};
use crate::union_find::DisjointSet;

/// Edge counts per pass, for logging and the harness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectivityStats {
    pub transfer: usize,
    pub backbone: usize,
    pub walking: usize,
    pub bridges: usize,
}

impl ConnectivityStats {
    pub fn total(&self) -> usize {
        self.transfer + self.backbone + self.walking + self.bridges
    }
}

/// Connections under construction, indexed by station position.
struct EdgeSet<'a> {
    stations: &'a [Station],
    connections: Vec<Connection>,
    pairs: HashSet<(usize, usize)>,
}

impl<'a> EdgeSet<'a> {
    fn new(stations: &'a [Station]) -> Self {
        Self {
            stations,
            connections: Vec::new(),
            pairs: HashSet::new(),
        }
    }

    fn key(a: usize, b: usize) -> (usize, usize) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    fn contains(&self, a: usize, b: usize) -> bool {
        self.pairs.contains(&Self::key(a, b))
    }

    /// Add `a -> b` unless the pair is already linked.
    fn insert(&mut self, a: usize, b: usize, walk_time: u32) -> bool {
        if a == b || !self.pairs.insert(Self::key(a, b)) {
            return false;
        }
        self.connections.push(Connection {
            from: self.stations[a].id,
            to: self.stations[b].id,
            walk_time,
        });
        true
    }
}

/// Walk time for backbone and repair edges.
pub fn backbone_walk_time(distance: u32) -> u32 {
    distance * walking::BACKBONE_TIME_PER_UNIT
}

/// Walk time for a short local link.
pub fn local_walk_time(distance: u32) -> u32 {
    let minutes = distance * walking::METRES_PER_CELL / walking::METRES_PER_MINUTE;
    minutes.max(walking::MIN_WALK_MINUTES)
}

/// Set `is_transfer` on every station that shares its cell with a station of
/// another mode. Returns station indices grouped by cell.
pub fn mark_transfers(stations: &mut [Station]) -> BTreeMap<(i32, i32), Vec<usize>> {
    let mut by_cell: BTreeMap<(i32, i32), Vec<usize>> = BTreeMap::new();
    for (i, s) in stations.iter().enumerate() {
        by_cell.entry(s.position()).or_default().push(i);
    }

    for group in by_cell.values() {
        for &i in group {
            let mode = stations[i].mode;
            let shared = group.iter().any(|&j| stations[j].mode != mode);
            stations[i].is_transfer = shared;
        }
    }

    by_cell
}

/// Build the connection list for placed stations and mark transfers.
pub fn build_connections(
    stations: &mut [Station],
) -> Result<(Vec<Connection>, ConnectivityStats), GenerationError> {
    let by_cell = mark_transfers(stations);
    let stations: &[Station] = stations;
    let mut edges = EdgeSet::new(stations);
    let mut stats = ConnectivityStats::default();

    stats.transfer = add_transfer_edges(&mut edges, &by_cell);
    stats.backbone = add_backbone_edges(&mut edges);
    stats.walking = add_walking_edges(&mut edges);

    let mut connections = edges.connections;
    stats.bridges = connect_components(stations, &mut connections);

    let reached = reachable_count(stations, &connections);
    if reached != stations.len() {
        return Err(GenerationError::ConnectivityInvariantViolation {
            reached,
            total: stations.len(),
        });
    }

    log::debug!(
        "connections: {} transfer, {} backbone, {} walking, {} bridges",
        stats.transfer,
        stats.backbone,
        stats.walking,
        stats.bridges
    );
    Ok((connections, stats))
}

fn add_transfer_edges(edges: &mut EdgeSet, by_cell: &BTreeMap<(i32, i32), Vec<usize>>) -> usize {
    let mut added = 0;
    for group in by_cell.values().filter(|g| g.len() > 1) {
        for (k, &a) in group.iter().enumerate() {
            for &b in &group[k + 1..] {
                if edges.stations[a].mode != edges.stations[b].mode
                    && edges.insert(a, b, walking::TRANSFER_MINUTES)
                {
                    added += 1;
                }
            }
        }
    }
    added
}

/// Grow a connected set from station 0, each step linking the closest
/// (connected, unconnected) pair. Ties go to the lowest connected index,
/// then the lowest unconnected index.
///
/// Keeps a best-link table per unconnected station instead of rescanning
/// every pair, which picks the same pair the full scan would.
fn add_backbone_edges(edges: &mut EdgeSet) -> usize {
    let stations = edges.stations;
    let n = stations.len();
    if n == 0 {
        return 0;
    }

    let mut connected = vec![false; n];
    // For each unconnected station: (distance, nearest connected index).
    let mut best: Vec<(u32, usize)> = vec![(u32::MAX, usize::MAX); n];
    let mut added = 0;

    let mut newest = 0;
    connected[0] = true;
    for _ in 1..n {
        for v in 0..n {
            if connected[v] {
                continue;
            }
            let d = stations[newest].distance_to(&stations[v]);
            if d < best[v].0 || (d == best[v].0 && newest < best[v].1) {
                best[v] = (d, newest);
            }
        }

        let next = (0..n)
            .filter(|&v| !connected[v])
            .min_by_key(|&v| (best[v].0, best[v].1, v));
        let Some(v) = next else { break };

        let (d, u) = best[v];
        if edges.insert(u, v, backbone_walk_time(d)) {
            added += 1;
        }
        connected[v] = true;
        newest = v;
    }
    added
}

fn add_walking_edges(edges: &mut EdgeSet) -> usize {
    let stations = edges.stations;
    let mut added = 0;
    for (i, a) in stations.iter().enumerate() {
        for (j, b) in stations.iter().enumerate().skip(i + 1) {
            if a.mode == b.mode {
                continue;
            }
            let d = a.distance_to(b);
            if d <= walking::LOCAL_WALK_RADIUS
                && !edges.contains(i, j)
                && edges.insert(i, j, local_walk_time(d))
            {
                added += 1;
            }
        }
    }
    added
}

/// Merge components by repeatedly bridging the globally closest pair of
/// stations in different components. Returns the number of bridges added.
///
/// Connections naming unknown stations are ignored.
pub fn connect_components(stations: &[Station], connections: &mut Vec<Connection>) -> usize {
    let index = station_index(stations);
    let mut sets = DisjointSet::new(stations.len());
    for c in connections.iter() {
        if let (Some(&a), Some(&b)) = (index.get(&c.from), index.get(&c.to)) {
            sets.union(a, b);
        }
    }

    let components = sets.set_count();
    let mut bridges = 0;
    while sets.set_count() > 1 {
        let mut closest: Option<(u32, usize, usize)> = None;
        for i in 0..stations.len() {
            for j in i + 1..stations.len() {
                if sets.same_set(i, j) {
                    continue;
                }
                let d = stations[i].distance_to(&stations[j]);
                if closest.map_or(true, |(best, _, _)| d < best) {
                    closest = Some((d, i, j));
                }
            }
        }

        let Some((d, i, j)) = closest else { break };
        connections.push(Connection {
            from: stations[i].id,
            to: stations[j].id,
            walk_time: backbone_walk_time(d),
        });
        sets.union(i, j);
        bridges += 1;
    }

    if bridges > 0 {
        log::warn!(
            "connectivity repair merged {} components with {} bridges",
            components,
            bridges
        );
    }
    bridges
}

fn station_index(stations: &[Station]) -> HashMap<StationId, usize> {
    stations.iter().enumerate().map(|(i, s)| (s.id, i)).collect()
}

/// Number of stations reachable from the first station over `connections`.
pub fn reachable_count(stations: &[Station], connections: &[Connection]) -> usize {
    let Some(first) = stations.first() else {
        return 0;
    };

    let index = station_index(stations);
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); stations.len()];
    for c in connections {
        if let (Some(&a), Some(&b)) = (index.get(&c.from), index.get(&c.to)) {
            adj[a].push(b);
            adj[b].push(a);
        }
    }

    let start = index[&first.id];
    let mut visited = vec![false; stations.len()];
    let mut queue = VecDeque::new();
    visited[start] = true;
    queue.push_back(start);
    let mut reached = 1;

    while let Some(current) = queue.pop_front() {
        for &next in &adj[current] {
            if !visited[next] {
                visited[next] = true;
                reached += 1;
                queue.push_back(next);
            }
        }
    }
    reached
}

/// Whether every station is reachable from every other.
pub fn is_connected(stations: &[Station], connections: &[Connection]) -> bool {
    reachable_count(stations, connections) == stations.len()
}
