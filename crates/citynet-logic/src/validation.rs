//! Invariant checks for a `CityModel`.
//!
//! Pure functions that take a model and return validation errors. Used by the
//! tests, by persistence when loading a city from disk, and by the harness.

use std::collections::{HashMap, HashSet};

use crate::connectivity;
use crate::model::{CityModel, StationId, TransitMode};

/// A model validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Error severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "[{}] {}: {}", level, self.category, self.message)
    }
}

fn error(category: &'static str, message: String) -> ValidationError {
    ValidationError {
        category,
        severity: Severity::Error,
        message,
    }
}

// ── Zones ───────────────────────────────────────────────────────────────

/// Exactly one zone per grid cell, none off-grid.
pub fn check_zone_coverage(model: &CityModel) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let g = model.grid_size;
    if g <= 0 {
        errors.push(error("zones", format!("grid size {} is not positive", g)));
        return errors;
    }

    let expected = (g as usize) * (g as usize);
    if model.zones.len() != expected {
        let found = model.zones.len();
        let message = format!("{found} zones for a {g}x{g} grid, expected {expected}");
        errors.push(error("zones", message));
    }

    let mut seen = HashSet::new();
    for z in &model.zones {
        if z.x < 0 || z.y < 0 || z.x >= g || z.y >= g {
            errors.push(error("zones", format!("zone at ({}, {}) is off the grid", z.x, z.y)));
        } else if !seen.insert((z.x, z.y)) {
            errors.push(error("zones", format!("cell ({}, {}) has more than one zone", z.x, z.y)));
        }
    }
    errors
}

// ── Stations ────────────────────────────────────────────────────────────

/// Station ids are unique.
pub fn check_station_ids(model: &CityModel) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for s in &model.stations {
        if !seen.insert(s.id) {
            errors.push(error("stations", format!("duplicate station id {}", s.id)));
        }
    }
    errors
}

/// Station coordinates lie within the grid.
pub fn check_station_bounds(model: &CityModel) -> Vec<ValidationError> {
    let g = model.grid_size;
    model
        .stations
        .iter()
        .filter(|s| s.x < 0 || s.y < 0 || s.x >= g || s.y >= g)
        .map(|s| {
            error(
                "stations",
                format!("{} at ({}, {}) is off the {}x{} grid", s.id, s.x, s.y, g, g),
            )
        })
        .collect()
}

/// `is_transfer` matches co-location with a different-mode station.
pub fn check_transfer_flags(model: &CityModel) -> Vec<ValidationError> {
    let mut modes_at: HashMap<(i32, i32), HashSet<TransitMode>> = HashMap::new();
    for s in &model.stations {
        modes_at.entry(s.position()).or_default().insert(s.mode);
    }

    let mut errors = Vec::new();
    for s in &model.stations {
        let expected = modes_at
            .get(&s.position())
            .is_some_and(|modes| modes.iter().any(|m| *m != s.mode));
        if s.is_transfer != expected {
            errors.push(error(
                "transfers",
                format!(
                    "{} has is_transfer={} but co-location says {}",
                    s.id, s.is_transfer, expected
                ),
            ));
        }
    }
    errors
}

// ── Connections ─────────────────────────────────────────────────────────

/// Endpoints exist, no self loops, no duplicate unordered pairs.
pub fn check_connections(model: &CityModel) -> Vec<ValidationError> {
    let ids: HashSet<StationId> = model.stations.iter().map(|s| s.id).collect();
    let mut pairs = HashSet::new();
    let mut errors = Vec::new();

    for c in &model.connections {
        for end in [c.from, c.to] {
            if !ids.contains(&end) {
                errors.push(error(
                    "connections",
                    format!("connection {} -> {} names unknown {}", c.from, c.to, end),
                ));
            }
        }
        if c.from == c.to {
            errors.push(error("connections", format!("self loop on {}", c.from)));
        }
        if !pairs.insert(c.pair_key()) {
            errors.push(error(
                "connections",
                format!("duplicate connection between {} and {}", c.from, c.to),
            ));
        }
    }
    errors
}

/// Every station is reachable from the first one.
pub fn check_connectivity(model: &CityModel) -> Vec<ValidationError> {
    let reached = connectivity::reachable_count(&model.stations, &model.connections);
    if reached == model.stations.len() {
        return Vec::new();
    }
    vec![error(
        "connectivity",
        format!(
            "only {} of {} stations reachable from {}",
            reached,
            model.stations.len(),
            model.stations[0].id
        ),
    )]
}

// ── Routes ──────────────────────────────────────────────────────────────

/// Routes have unique ids, at least two stations, and only reference
/// existing stations of their own mode.
pub fn check_routes(model: &CityModel) -> Vec<ValidationError> {
    let modes: HashMap<StationId, TransitMode> =
        model.stations.iter().map(|s| (s.id, s.mode)).collect();
    let mut seen = HashSet::new();
    let mut errors = Vec::new();

    for r in &model.routes {
        if !seen.insert(r.id) {
            errors.push(error("routes", format!("duplicate route id {}", r.id)));
        }
        if r.stations.len() < 2 {
            errors.push(error(
                "routes",
                format!("{} has {} stations, need at least 2", r.id, r.stations.len()),
            ));
        }
        for id in &r.stations {
            match modes.get(id) {
                None => errors.push(error("routes", format!("{} references unknown {}", r.id, id))),
                Some(m) if *m != r.mode => errors.push(error(
                    "routes",
                    format!("{} ({}) includes {} station {}", r.id, r.mode, m, id),
                )),
                Some(_) => {}
            }
        }
        if r.color.is_empty() {
            errors.push(ValidationError {
                category: "routes",
                severity: Severity::Warning,
                message: format!("{} has no colour", r.id),
            });
        }
    }
    errors
}

/// Run every check.
pub fn validate_model(model: &CityModel) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    errors.extend(check_zone_coverage(model));
    errors.extend(check_station_ids(model));
    errors.extend(check_station_bounds(model));
    errors.extend(check_transfer_flags(model));
    errors.extend(check_connections(model));
    errors.extend(check_connectivity(model));
    errors.extend(check_routes(model));
    errors
}

/// Only the `Error`-severity findings.
pub fn errors_only(findings: Vec<ValidationError>) -> Vec<ValidationError> {
    findings
        .into_iter()
        .filter(|e| e.severity == Severity::Error)
        .collect()
}
