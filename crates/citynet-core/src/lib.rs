//! CityNet Core - persistence for generated transit cities
//!
//! The generator itself lives in `citynet-logic` and does no I/O. This crate
//! moves its output in and out of files:
//! - **JSON**: the exchange schema read by visualization and scheduling tools
//! - **Snapshots**: versioned bincode archives
//! - **Batch export**: parallel generation straight to a directory
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use citynet_core::persistence::{load_city, save_city};
//! use citynet_logic::{generate, CityConfig};
//!
//! let city = generate(&CityConfig::with_grid_size(10).seeded(7)).unwrap();
//! save_city(Path::new("out"), "city", &city).unwrap();
//! let again = load_city(Path::new("out"), "city").unwrap();
//! assert_eq!(city, again);
//! ```

pub mod persistence;

pub use persistence::PersistenceError;
