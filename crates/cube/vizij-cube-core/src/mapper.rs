//! Raw control input -> clamped (u,v,w).
//!
//! The point control draws the v axis horizontally and the u axis vertically,
//! so a raw point `(x, y)` maps to `u := y`, `v := x`. Hosts rely on this
//! swap; keep it.

use serde::{Deserialize, Serialize};

use crate::config::CubeConfig;
use crate::cube::InterpolationCube;
use crate::grid::{AxisRange, GridInterpolator};

/// A point in the cube's control space, always inside
/// `[u_min,u_max] x [v_min,v_max] x [0,1]` when produced by the mapper.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCoord {
    pub u: f32,
    pub v: f32,
    pub w: f32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CoordinateMapper {
    u_range: AxisRange,
    v_range: AxisRange,
    slider_max: f32,
}

impl CoordinateMapper {
    pub fn new(u_range: AxisRange, v_range: AxisRange, slider_max: f32) -> Self {
        Self {
            u_range,
            v_range,
            slider_max,
        }
    }

    /// Mapper over the cube's shared domain.
    pub fn for_cube<G: GridInterpolator>(cube: &InterpolationCube<G>, cfg: &CubeConfig) -> Self {
        Self::new(cube.u_range(), cube.v_range(), cfg.slider_max)
    }

    pub fn u_range(&self) -> AxisRange {
        self.u_range
    }

    pub fn v_range(&self) -> AxisRange {
        self.v_range
    }

    /// Slider value (0..slider_max) to w in [0,1].
    #[inline]
    pub fn map_slider(&self, slider: f32) -> f32 {
        let w = if self.slider_max > 0.0 {
            slider / self.slider_max
        } else {
            0.0
        };
        AxisRange::UNIT.clamp(w)
    }

    /// Normalize a raw point plus slider value.
    pub fn map(&self, point: [f32; 2], slider: f32) -> NormalizedCoord {
        let [x, y] = point;
        NormalizedCoord {
            u: self.u_range.clamp(y),
            v: self.v_range.clamp(x),
            w: self.map_slider(slider),
        }
    }

    /// Point-control bounds in screen axes: (x bounds, y bounds).
    pub fn point_bounds(&self) -> (AxisRange, AxisRange) {
        (self.v_range, self.u_range)
    }
}
