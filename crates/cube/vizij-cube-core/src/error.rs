//! Error types for cube construction and session setup.
//!
//! Evaluation itself never fails: every runtime input is clamped. Everything
//! here is raised while building a cube, a grid, or widget configuration.

use thiserror::Error;

/// Which control-space axis an error refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    U,
    V,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::U => f.write_str("u"),
            Axis::V => f.write_str("v"),
        }
    }
}

/// Fatal configuration problems; no evaluation is attempted after one of these.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("interpolation cube needs at least one grid layer")]
    EmptyStack,

    #[error("layer {layer} has an invalid {axis} range [{min}, {max}]")]
    InvalidDomain {
        layer: usize,
        axis: Axis,
        min: f32,
        max: f32,
    },

    #[error("layer {layer} {axis} range {actual:?} differs from layer 0 range {expected:?}")]
    DomainMismatch {
        layer: usize,
        axis: Axis,
        expected: (f32, f32),
        actual: (f32, f32),
    },

    #[error("invalid pose grid: {reason}")]
    InvalidGrid { reason: String },

    #[error("failed to load grid '{reference}': {reason}")]
    GridLoad { reference: String, reason: String },

    #[error("invalid cube config field '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("invalid widget config field '{field}': {reason}")]
    InvalidWidgetConfig { field: &'static str, reason: String },
}

impl ConfigurationError {
    pub(crate) fn invalid_grid(reason: impl Into<String>) -> Self {
        Self::InvalidGrid {
            reason: reason.into(),
        }
    }
}

/// Top-level error for session setup.
#[derive(Debug, Error)]
pub enum CubeError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("ui data json: {0}")]
    UiData(#[from] serde_json::Error),
}
