//! # Error Types
//!
//! Structured error types for fdn_core. Each variant carries enough context
//! for a caller to understand and fix the problem programmatically, and all
//! variants serialize cleanly to JSON for transport layers.
//!
//! ## Example
//!
//! ```rust
//! use fdn_core::errors::{VerifyError, VerifyResult};
//!
//! fn validate_radius(base_radius_m: f64) -> VerifyResult<()> {
//!     if base_radius_m <= 0.0 {
//!         return Err(VerifyError::invalid_input(
//!             "base_radius_m",
//!             base_radius_m.to_string(),
//!             "Base radius must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for fdn_core operations
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Structured error type for foundation verification.
///
/// Geometry and soil-data errors are fatal to a verification run and reported
/// before any analyzer executes. Convergence errors are scoped to a single
/// load case and recovered locally by the orchestrator.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum VerifyError {
    /// Foundation dimensions are invalid or inconsistent.
    /// Carries every violated constraint, not just the first.
    #[error("Invalid geometry: {}", violations.join("; "))]
    Geometry { violations: Vec<String> },

    /// Soil stratigraphy is missing, overlapping, or does not cover the
    /// queried depth range
    #[error("Soil data error: {reason}")]
    SoilData { reason: String },

    /// Bounded root-finding failed for one load case
    #[error("Convergence failure in {analysis} ({load_case}) after {iterations} iterations: {reason}")]
    Convergence {
        analysis: String,
        load_case: String,
        iterations: u32,
        reason: String,
    },

    /// A required threshold or setting was not supplied
    #[error("Configuration error for '{parameter}': {reason}")]
    Configuration { parameter: String, reason: String },

    /// An input value is out of range or otherwise invalid
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },
}

impl VerifyError {
    /// Create a Geometry error from a list of violations
    pub fn geometry(violations: Vec<String>) -> Self {
        VerifyError::Geometry { violations }
    }

    /// Create a SoilData error
    pub fn soil_data(reason: impl Into<String>) -> Self {
        VerifyError::SoilData {
            reason: reason.into(),
        }
    }

    /// Create a Convergence error
    pub fn convergence(
        analysis: impl Into<String>,
        load_case: impl Into<String>,
        iterations: u32,
        reason: impl Into<String>,
    ) -> Self {
        VerifyError::Convergence {
            analysis: analysis.into(),
            load_case: load_case.into(),
            iterations,
            reason: reason.into(),
        }
    }

    /// Create a Configuration error
    pub fn configuration(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        VerifyError::Configuration {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        VerifyError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// A recoverable error affects a single load case; the orchestrator marks
    /// that case indeterminate and continues with the others.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, VerifyError::Convergence { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            VerifyError::Geometry { .. } => "GEOMETRY_ERROR",
            VerifyError::SoilData { .. } => "SOIL_DATA_ERROR",
            VerifyError::Convergence { .. } => "CONVERGENCE_ERROR",
            VerifyError::Configuration { .. } => "CONFIGURATION_ERROR",
            VerifyError::InvalidInput { .. } => "INVALID_INPUT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = VerifyError::soil_data("no layer covers depth 12.5 m");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: VerifyError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_geometry_lists_all_violations() {
        let error = VerifyError::geometry(vec![
            "base radius must exceed column radius".to_string(),
            "edge height must be positive".to_string(),
        ]);
        let msg = error.to_string();
        assert!(msg.contains("base radius"));
        assert!(msg.contains("edge height"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            VerifyError::soil_data("gap").error_code(),
            "SOIL_DATA_ERROR"
        );
        assert_eq!(
            VerifyError::configuration("min_rotational_stiffness", "missing").error_code(),
            "CONFIGURATION_ERROR"
        );
    }

    #[test]
    fn test_only_convergence_is_recoverable() {
        assert!(VerifyError::convergence("detachment", "extreme", 100, "not bracketed")
            .is_recoverable());
        assert!(!VerifyError::soil_data("empty profile").is_recoverable());
        assert!(!VerifyError::geometry(vec!["bad".into()]).is_recoverable());
    }
}
