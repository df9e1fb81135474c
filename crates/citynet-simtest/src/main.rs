//! CityNet Headless Harness
//!
//! Generates, exports, loads and validates transit cities from the command
//! line. Runs entirely in-process, no rendering and no services.
//!
//! Usage:
//!   cargo run -p citynet-simtest -- generate --grid 12 --seed 7
//!   cargo run -p citynet-simtest -- batch --count 20 --grid 10 --out-dir cities
//!   cargo run -p citynet-simtest -- validate cities/city_000.json
//!   cargo run -p citynet-simtest -- sweep --seeds 25 --verbose

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use citynet_core::persistence::{export_batch, load_city_file, write_city_json};
use citynet_logic::connectivity::is_connected;
use citynet_logic::stats::CityStats;
use citynet_logic::validation::{validate_model, Severity};
use citynet_logic::{generate, CityConfig, CityModel};

#[derive(Parser, Debug)]
#[command(
    name = "citynet-simtest",
    version,
    about = "Procedural transit city generator harness"
)]
struct Args {
    /// Verbose output (show debug messages)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one city and write it as JSON
    Generate {
        /// Grid edge length
        #[arg(short, long)]
        grid: Option<i32>,
        /// RNG seed (omit for a fresh random seed)
        #[arg(short, long)]
        seed: Option<u64>,
        /// JSON file with a CityConfig; --grid and --seed override it
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate many cities in parallel into a directory
    Batch {
        #[arg(short, long)]
        count: usize,
        #[arg(short, long, default_value_t = 8)]
        grid: i32,
        #[arg(short, long)]
        seed: Option<u64>,
        #[arg(long)]
        out_dir: PathBuf,
    },
    /// Load a JSON city and check every invariant
    Validate {
        file: PathBuf,
    },
    /// Generate every (grid, seed) combination and check invariants and
    /// determinism
    Sweep {
        #[arg(long, default_value_t = 10)]
        seeds: u64,
        #[arg(long, default_value_t = 1)]
        min_grid: i32,
        #[arg(long, default_value_t = 20)]
        max_grid: i32,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    match args.command {
        Command::Generate {
            grid,
            seed,
            config,
            output,
        } => run_generate(grid, seed, config.as_deref(), output.as_deref()),
        Command::Batch {
            count,
            grid,
            seed,
            out_dir,
        } => run_batch(count, grid, seed, &out_dir),
        Command::Validate { file } => run_validate(&file),
        Command::Sweep {
            seeds,
            min_grid,
            max_grid,
        } => run_sweep(seeds, min_grid, max_grid, args.verbose),
    }
}

// ── generate ────────────────────────────────────────────────────────────

fn load_config(path: &Path) -> Result<CityConfig> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse config {}", path.display()))
}

fn run_generate(
    grid: Option<i32>,
    seed: Option<u64>,
    config_path: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => load_config(path)?,
        None => CityConfig::default(),
    };
    if let Some(grid) = grid {
        config.grid_size = grid;
    }
    if seed.is_some() {
        config.seed = seed;
    }

    let city = generate(&config).context("City generation failed")?;
    log::info!("{}", CityStats::from_model(&city));

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_city_json(&mut writer, &city)?;
            writer.flush()?;
            log::info!("Wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_city_json(&mut lock, &city)?;
            writeln!(lock)?;
        }
    }
    Ok(())
}

// ── batch ───────────────────────────────────────────────────────────────

fn run_batch(count: usize, grid: i32, seed: Option<u64>, out_dir: &Path) -> Result<()> {
    let mut config = CityConfig::with_grid_size(grid);
    config.seed = seed;
    let paths = export_batch(out_dir, &config, count)
        .with_context(|| format!("Batch export to {} failed", out_dir.display()))?;
    println!("Wrote {} cities to {}", paths.len(), out_dir.display());
    Ok(())
}

// ── validate ────────────────────────────────────────────────────────────

fn run_validate(file: &Path) -> Result<()> {
    // Parse without the loader's own validation so every finding is listed.
    let reader = BufReader::new(
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?,
    );
    let city: CityModel = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    let findings = validate_model(&city);
    for f in &findings {
        println!("  {}", f);
    }
    let errors = findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count();

    println!("{}", CityStats::from_model(&city));
    if errors > 0 {
        bail!("{} has {} invariant violations", file.display(), errors);
    }
    println!("{}: OK ({} warnings)", file.display(), findings.len());
    Ok(())
}

// ── sweep ───────────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check_city(grid: i32, seed: u64) -> TestResult {
    let name = format!("grid_{}_seed_{}", grid, seed);
    let config = CityConfig::with_grid_size(grid).seeded(seed);

    let first = match generate(&config) {
        Ok(city) => city,
        Err(e) => {
            return TestResult {
                name,
                passed: false,
                detail: format!("generation failed: {}", e),
            }
        }
    };

    let findings = validate_model(&first);
    if let Some(f) = findings.iter().find(|f| f.severity == Severity::Error) {
        return TestResult {
            name,
            passed: false,
            detail: format!("{} (and {} more)", f, findings.len() - 1),
        };
    }

    let repeat = generate(&config);
    if repeat.as_ref().ok() != Some(&first) {
        return TestResult {
            name,
            passed: false,
            detail: "same seed produced a different city".into(),
        };
    }

    TestResult {
        name,
        passed: true,
        detail: format!(
            "{} stations, {} connections, connected={}",
            first.stations.len(),
            first.connections.len(),
            is_connected(&first.stations, &first.connections)
        ),
    }
}

fn run_sweep(seeds: u64, min_grid: i32, max_grid: i32, verbose: bool) -> Result<()> {
    if min_grid > max_grid {
        bail!("--min-grid {} is larger than --max-grid {}", min_grid, max_grid);
    }
    println!("=== CityNet Invariant Sweep ===\n");

    let results: Vec<TestResult> = (min_grid..=max_grid)
        .flat_map(|grid| (0..seeds).map(move |seed| check_city(grid, seed)))
        .collect();

    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed,
        results.len(),
        failed
    );

    if failed > 0 {
        bail!("{} sweep cases failed", failed);
    }
    Ok(())
}
