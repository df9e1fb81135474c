//! Save/Load for generated cities.
//!
//! Two formats:
//! - JSON, the exchange schema every downstream consumer reads
//! - a bincode snapshot with a format version header, for fast reloads
//!
//! Both readers validate the model before handing it back.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use citynet_logic::batch::generate_batch;
use citynet_logic::validation::{errors_only, validate_model, ValidationError};
use citynet_logic::{CityConfig, CityModel, GenerationError};

/// Version number for the snapshot format (increment when format changes)
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors that can occur during save/load
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),
    #[error("Snapshot version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("Invalid city model: {}", join_findings(.0))]
    InvalidModel(Vec<ValidationError>),
    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),
}

fn join_findings(findings: &[ValidationError]) -> String {
    findings
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn ensure_valid(model: CityModel) -> Result<CityModel, PersistenceError> {
    let errors = errors_only(validate_model(&model));
    if errors.is_empty() {
        Ok(model)
    } else {
        Err(PersistenceError::InvalidModel(errors))
    }
}

// ── JSON ────────────────────────────────────────────────────────────────

/// Write a city as pretty-printed JSON.
pub fn write_city_json<W: Write>(writer: W, model: &CityModel) -> Result<(), PersistenceError> {
    serde_json::to_writer_pretty(writer, model)?;
    Ok(())
}

/// Read a JSON city and check its invariants.
pub fn read_city_json<R: Read>(reader: R) -> Result<CityModel, PersistenceError> {
    let model: CityModel = serde_json::from_reader(reader)?;
    ensure_valid(model)
}

/// Path of the JSON file for city `name` under `dir`.
pub fn city_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.json", name))
}

/// Save a city to `<dir>/<name>.json`, creating `dir` if needed.
pub fn save_city(dir: &Path, name: &str, model: &CityModel) -> Result<PathBuf, PersistenceError> {
    fs::create_dir_all(dir)?;
    let path = city_path(dir, name);
    let mut writer = BufWriter::new(File::create(&path)?);
    write_city_json(&mut writer, model)?;
    writer.flush()?;
    log::debug!("saved city to {}", path.display());
    Ok(path)
}

/// Load `<dir>/<name>.json`.
pub fn load_city(dir: &Path, name: &str) -> Result<CityModel, PersistenceError> {
    load_city_file(&city_path(dir, name))
}

/// Load a JSON city from an explicit path.
pub fn load_city_file(path: &Path) -> Result<CityModel, PersistenceError> {
    let reader = BufReader::new(File::open(path)?);
    read_city_json(reader)
}

// ── Snapshot ────────────────────────────────────────────────────────────

/// Write a versioned binary snapshot.
pub fn write_snapshot<W: Write>(mut writer: W, model: &CityModel) -> Result<(), PersistenceError> {
    bincode::serialize_into(&mut writer, &SNAPSHOT_VERSION)?;
    bincode::serialize_into(&mut writer, model)?;
    Ok(())
}

/// Read a snapshot written by [`write_snapshot`].
pub fn read_snapshot<R: Read>(mut reader: R) -> Result<CityModel, PersistenceError> {
    let version: u32 = bincode::deserialize_from(&mut reader)?;
    if version != SNAPSHOT_VERSION {
        return Err(PersistenceError::VersionMismatch {
            expected: SNAPSHOT_VERSION,
            found: version,
        });
    }
    let model: CityModel = bincode::deserialize_from(&mut reader)?;
    ensure_valid(model)
}

// ── Batch export ────────────────────────────────────────────────────────

/// Generate `count` cities in parallel and write them to
/// `<dir>/city_000.json`, `<dir>/city_001.json`, ... Stops at the first
/// city that fails to generate.
pub fn export_batch(
    dir: &Path,
    config: &CityConfig,
    count: usize,
) -> Result<Vec<PathBuf>, PersistenceError> {
    let cities = generate_batch(config, count);
    let mut paths = Vec::with_capacity(count);
    for (i, city) in cities.into_iter().enumerate() {
        let model = city?;
        paths.push(save_city(dir, &format!("city_{:03}", i), &model)?);
    }
    log::info!("exported {} cities to {}", paths.len(), dir.display());
    Ok(paths)
}
