//! Errors surfaced by city generation.

use crate::city_config::ConfigError;

/// Why a city could not be generated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// The configuration violates a precondition (empty lists, bad grid size).
    #[error("degenerate input: {}", join_errors(.0))]
    DegenerateInput(Vec<ConfigError>),
    /// The repaired station graph is still disconnected. Internal logic error.
    #[error("connectivity invariant violated: reached {reached} of {total} stations")]
    ConnectivityInvariantViolation { reached: usize, total: usize },
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
