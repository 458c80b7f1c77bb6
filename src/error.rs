/*
 * Error Module
 *
 * Errors for the fallible configuration surfaces: loading and saving config
 * files, parsing names, validating parameter records. The simulation core
 * itself normalizes bad geometry instead of failing.
 */

use thiserror::Error;

/// Errors raised while loading or validating simulation configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read or write config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration: {field} {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
    #[error("unknown species `{0}` (expected fish, snake or lizard)")]
    UnknownSpecies(String),
    #[error("unknown contour mode `{0}` (expected quads or single)")]
    UnknownContourMode(String),
}
