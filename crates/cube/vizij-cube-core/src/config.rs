//! Core configuration for vizij-cube-core.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Knobs shared by cube construction and coordinate mapping.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeConfig {
    /// Slider value that maps to w = 1 (the slider control works on 0..100).
    pub slider_max: f32,

    /// Largest per-bound difference tolerated between a layer's (u,v) ranges
    /// and layer 0's before construction fails with a domain mismatch.
    pub domain_tolerance: f32,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            slider_max: 100.0,
            domain_tolerance: 1e-5,
        }
    }
}

impl CubeConfig {
    /// `slider_max` must be finite and positive; `domain_tolerance` finite
    /// and non-negative.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.slider_max.is_finite() || self.slider_max <= 0.0 {
            return Err(ConfigurationError::InvalidConfig {
                field: "slider_max",
                reason: format!("must be finite and > 0, got {}", self.slider_max),
            });
        }
        if !self.domain_tolerance.is_finite() || self.domain_tolerance < 0.0 {
            return Err(ConfigurationError::InvalidConfig {
                field: "domain_tolerance",
                reason: format!("must be finite and >= 0, got {}", self.domain_tolerance),
            });
        }
        Ok(())
    }
}
