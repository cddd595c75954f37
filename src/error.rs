//! Simulation-specific error types.
//!
//! The per-tick simulation never fails: misses, empty volleys and zero-shot
//! accuracy are ordinary values.  Errors only arise from the things validated
//! once at startup (catalog tables, configuration files) and are reported
//! through [`SimError`].
//!
//! ## Usage
//!
//! ```rust
//! use skydrop::error::{validate_positive, SimResult};
//!
//! fn check(gravity: f32) -> SimResult<()> {
//!     validate_positive("gravity", gravity)?;
//!     Ok(())
//! }
//! # assert!(check(9.8).is_ok());
//! ```

use std::fmt;

/// Top-level error enum for the skydrop core.
#[derive(Debug)]
pub enum SimError {
    /// A configuration value is outside its safe operating range.
    UnsafeConstant {
        /// Name of the value (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// A static catalog row breaks one of its invariants.
    InvalidCatalogEntry {
        /// Which catalog the row lives in (`"flyer"`, `"target"`, ...).
        catalog: &'static str,
        /// Display name of the offending row.
        entry: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// The configuration file exists but could not be read.
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::config::GameConfig`].
    ConfigParse { path: String, message: String },

    /// A flyer name (environment variable, config) matched no catalog entry.
    UnknownFlyer { name: String },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            SimError::InvalidCatalogEntry {
                catalog,
                entry,
                reason,
            } => write!(f, "{} catalog entry '{}' is invalid: {}", catalog, entry, reason),
            SimError::ConfigRead { path, source } => {
                write!(f, "failed to read config '{}': {}", path, source)
            }
            SimError::ConfigParse { path, message } => {
                write!(f, "failed to parse config '{}': {}", path, message)
            }
            SimError::UnknownFlyer { name } => write!(f, "unknown flyer type '{}'", name),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::ConfigRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is finite and strictly positive.
pub fn validate_positive(name: &'static str, value: f32) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is finite and not negative.
pub fn validate_non_negative(name: &'static str, value: f32) -> SimResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}
