//! 2D pose grids: the per-layer interpolation contract plus a reference
//! rectilinear implementation.
//!
//! Model:
//! - A layer covers a rectangular (u,v) domain and returns a blended pose for
//!   any point inside it.
//! - `PoseGrid` stores poses at the crossings of strictly increasing `u` and
//!   `v` sample axes, row-major as `samples[u][v]`.
//! - Bilinear blend: interpolate along v inside the two bracketing rows, then
//!   across u between those two results.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::pose::Pose;
use crate::ui_data::PreferredLocation;

/// Closed interval `[min, max]` on one control axis.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f32,
    pub max: f32,
}

impl AxisRange {
    pub const UNIT: AxisRange = AxisRange { min: 0.0, max: 1.0 };

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Finite bounds with `min <= max`.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    /// Clamp `x` into the range. NaN maps to `min`.
    #[inline]
    pub fn clamp(&self, x: f32) -> f32 {
        if x.is_nan() || x < self.min {
            self.min
        } else if x > self.max {
            self.max
        } else {
            x
        }
    }

    pub fn midpoint(&self) -> f32 {
        (self.min + self.max) * 0.5
    }

    pub fn approx_eq(&self, other: &AxisRange, tolerance: f32) -> bool {
        (self.min - other.min).abs() <= tolerance && (self.max - other.max).abs() <= tolerance
    }

    pub fn as_tuple(&self) -> (f32, f32) {
        (self.min, self.max)
    }
}

/// One layer of the cube: a 2D grid of poses with a bilinear lookup.
///
/// Callers are expected to clamp (u,v) into the ranges first; implementations
/// may clamp again but must not have side effects.
pub trait GridInterpolator {
    fn interpolate(&self, u: f32, v: f32) -> Pose;
    fn u_range(&self) -> AxisRange;
    fn v_range(&self) -> AxisRange;

    /// Sample stamps along u (grid lines for the point control).
    fn u_values(&self) -> &[f32] {
        &[]
    }

    /// Sample stamps along v (grid lines for the point control).
    fn v_values(&self) -> &[f32] {
        &[]
    }
}

impl<T: GridInterpolator + ?Sized> GridInterpolator for &T {
    fn interpolate(&self, u: f32, v: f32) -> Pose {
        (**self).interpolate(u, v)
    }
    fn u_range(&self) -> AxisRange {
        (**self).u_range()
    }
    fn v_range(&self) -> AxisRange {
        (**self).v_range()
    }
    fn u_values(&self) -> &[f32] {
        (**self).u_values()
    }
    fn v_values(&self) -> &[f32] {
        (**self).v_values()
    }
}

impl<T: GridInterpolator + ?Sized> GridInterpolator for Box<T> {
    fn interpolate(&self, u: f32, v: f32) -> Pose {
        (**self).interpolate(u, v)
    }
    fn u_range(&self) -> AxisRange {
        (**self).u_range()
    }
    fn v_range(&self) -> AxisRange {
        (**self).v_range()
    }
    fn u_values(&self) -> &[f32] {
        (**self).u_values()
    }
    fn v_values(&self) -> &[f32] {
        (**self).v_values()
    }
}

/// Find the segment [i, i+1] of `stamps` containing `x` and return
/// (i, i+1, local_t). Outside the axis, or on a single-stamp axis, the nearest
/// end is returned twice with local_t = 0.
fn find_segment(stamps: &[f32], x: f32) -> (usize, usize, f32) {
    let n = stamps.len();
    if n <= 1 || x <= stamps[0] {
        return (0, 0, 0.0);
    }
    if x >= stamps[n - 1] {
        return (n - 1, n - 1, 0.0);
    }
    // First stamp strictly greater than x; stamps are strictly increasing.
    let hi = stamps.partition_point(|s| *s <= x);
    let lo = hi - 1;
    let t0 = stamps[lo];
    let t1 = stamps[hi];
    let lt = (x - t0) / (t1 - t0);
    (lo, hi, lt.clamp(0.0, 1.0))
}

/// Rectilinear grid of poses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoseGrid", into = "RawPoseGrid")]
pub struct PoseGrid {
    name: String,
    u: Vec<f32>,
    v: Vec<f32>,
    samples: Vec<Vec<Pose>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawPoseGrid {
    #[serde(default)]
    name: String,
    u: Vec<f32>,
    v: Vec<f32>,
    samples: Vec<Vec<Pose>>,
}

impl TryFrom<RawPoseGrid> for PoseGrid {
    type Error = ConfigurationError;

    fn try_from(raw: RawPoseGrid) -> Result<Self, Self::Error> {
        PoseGrid::new(raw.name, raw.u, raw.v, raw.samples)
    }
}

impl From<PoseGrid> for RawPoseGrid {
    fn from(grid: PoseGrid) -> Self {
        RawPoseGrid {
            name: grid.name,
            u: grid.u,
            v: grid.v,
            samples: grid.samples,
        }
    }
}

fn validate_axis(label: &str, stamps: &[f32]) -> Result<(), ConfigurationError> {
    if stamps.is_empty() {
        return Err(ConfigurationError::invalid_grid(format!(
            "{label} axis has no samples"
        )));
    }
    if stamps.iter().any(|s| !s.is_finite()) {
        return Err(ConfigurationError::invalid_grid(format!(
            "{label} axis contains a non-finite stamp"
        )));
    }
    if stamps.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ConfigurationError::invalid_grid(format!(
            "{label} axis stamps must be strictly increasing"
        )));
    }
    Ok(())
}

impl PoseGrid {
    /// Build a grid, validating axes and sample matrix shape.
    pub fn new(
        name: impl Into<String>,
        u: Vec<f32>,
        v: Vec<f32>,
        samples: Vec<Vec<Pose>>,
    ) -> Result<Self, ConfigurationError> {
        validate_axis("u", &u)?;
        validate_axis("v", &v)?;
        if samples.len() != u.len() {
            return Err(ConfigurationError::invalid_grid(format!(
                "expected {} sample rows (one per u stamp), found {}",
                u.len(),
                samples.len()
            )));
        }
        if let Some((row, len)) = samples
            .iter()
            .enumerate()
            .map(|(i, r)| (i, r.len()))
            .find(|(_, len)| *len != v.len())
        {
            return Err(ConfigurationError::invalid_grid(format!(
                "row {row} has {len} samples, expected {}",
                v.len()
            )));
        }
        Ok(Self {
            name: name.into(),
            u,
            v,
            samples,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pose stored at grid crossing (row `iu`, column `iv`).
    pub fn sample(&self, iu: usize, iv: usize) -> Option<&Pose> {
        self.samples.get(iu).and_then(|row| row.get(iv))
    }

    fn blend_row(&self, iu: usize, v0: usize, v1: usize, tv: f32) -> Pose {
        let row = &self.samples[iu];
        if v0 == v1 {
            row[v0].clone()
        } else {
            row[v0].interpolate(tv, &row[v1])
        }
    }
}

impl GridInterpolator for PoseGrid {
    fn interpolate(&self, u: f32, v: f32) -> Pose {
        let u = self.u_range().clamp(u);
        let v = self.v_range().clamp(v);
        let (u0, u1, tu) = find_segment(&self.u, u);
        let (v0, v1, tv) = find_segment(&self.v, v);

        let lower = self.blend_row(u0, v0, v1, tv);
        if u0 == u1 {
            return lower;
        }
        let upper = self.blend_row(u1, v0, v1, tv);
        lower.interpolate(tu, &upper)
    }

    fn u_range(&self) -> AxisRange {
        AxisRange::new(self.u[0], self.u[self.u.len() - 1])
    }

    fn v_range(&self) -> AxisRange {
        AxisRange::new(self.v[0], self.v[self.v.len() - 1])
    }

    fn u_values(&self) -> &[f32] {
        &self.u
    }

    fn v_values(&self) -> &[f32] {
        &self.v
    }
}

/// Result of asking the grid-loading collaborator for a stack.
#[derive(Debug)]
pub struct LoadedStack<G> {
    /// Layers in w order (index 0 sits at w = 0).
    pub layers: Vec<G>,
    /// Set when the loader resolved the grids from a different location than
    /// requested; the host should persist it back into the UI record.
    pub preferred_location: Option<PreferredLocation>,
}

/// Grid-loading collaborator. Implementations own file formats and storage;
/// the cube only consumes the returned layers.
pub trait GridSource {
    type Grid: GridInterpolator;

    fn load_stack(
        &mut self,
        references: &[String],
        location: &PreferredLocation,
    ) -> Result<LoadedStack<Self::Grid>, ConfigurationError>;
}

/// In-memory source keyed by grid reference.
#[derive(Debug, Default)]
pub struct VecGridSource<G> {
    grids: HashMap<String, G>,
}

impl<G> VecGridSource<G> {
    pub fn new() -> Self {
        Self {
            grids: HashMap::new(),
        }
    }

    pub fn with_grid(mut self, reference: impl Into<String>, grid: G) -> Self {
        self.grids.insert(reference.into(), grid);
        self
    }

    pub fn insert(&mut self, reference: impl Into<String>, grid: G) {
        self.grids.insert(reference.into(), grid);
    }
}

impl<G: GridInterpolator + Clone> GridSource for VecGridSource<G> {
    type Grid = G;

    fn load_stack(
        &mut self,
        references: &[String],
        _location: &PreferredLocation,
    ) -> Result<LoadedStack<G>, ConfigurationError> {
        let mut layers = Vec::with_capacity(references.len());
        for reference in references {
            let grid = self
                .grids
                .get(reference)
                .ok_or_else(|| ConfigurationError::GridLoad {
                    reference: reference.clone(),
                    reason: "no grid registered under this reference".into(),
                })?;
            layers.push(grid.clone());
        }
        Ok(LoadedStack {
            layers,
            preferred_location: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn p(x: f32) -> Pose {
        Pose::new().with("x", Value::Float(x))
    }

    fn x_of(pose: &Pose) -> f32 {
        match pose.get("x") {
            Some(Value::Float(x)) => *x,
            other => panic!("expected float channel, got {other:?}"),
        }
    }

    // x = 10*u + v on a 2x3 grid
    fn grid() -> PoseGrid {
        PoseGrid::new(
            "plane",
            vec![0.0, 1.0],
            vec![0.0, 0.5, 1.0],
            vec![
                vec![p(0.0), p(0.5), p(1.0)],
                vec![p(10.0), p(10.5), p(11.0)],
            ],
        )
        .expect("valid grid")
    }

    #[test]
    fn find_segment_edges() {
        let stamps = [0.0, 0.5, 1.0];
        assert_eq!(find_segment(&stamps, -1.0), (0, 0, 0.0));
        assert_eq!(find_segment(&stamps, 2.0), (2, 2, 0.0));
        assert_eq!(find_segment(&stamps, 0.5), (1, 2, 0.0));
        let (a, b, t) = find_segment(&stamps, 0.75);
        assert_eq!((a, b), (1, 2));
        assert!((t - 0.5).abs() < 1e-6);
        assert_eq!(find_segment(&[3.0], 7.0), (0, 0, 0.0));
    }

    #[test]
    fn corners_are_exact() {
        let g = grid();
        assert_eq!(g.interpolate(0.0, 0.0), p(0.0));
        assert_eq!(g.interpolate(1.0, 1.0), p(11.0));
        assert_eq!(g.interpolate(0.0, 0.5), p(0.5));
    }

    #[test]
    fn bilinear_interior() {
        let g = grid();
        let x = x_of(&g.interpolate(0.5, 0.25));
        assert!((x - 5.25).abs() < 1e-5, "x={x}");
    }

    #[test]
    fn sample_reads_grid_crossings() {
        let g = grid();
        assert_eq!(g.sample(1, 2), Some(&p(11.0)));
        assert_eq!(g.sample(0, 1), Some(&p(0.5)));
        assert_eq!(g.sample(2, 0), None);
        assert_eq!(g.sample(0, 3), None);
    }

    #[test]
    fn clamps_outside_domain() {
        let g = grid();
        assert_eq!(g.interpolate(-4.0, 9.0), p(1.0));
        assert_eq!(g.interpolate(f32::NAN, f32::NAN), p(0.0));
    }

    #[test]
    fn rejects_malformed_grids() {
        let err = PoseGrid::new("bad", vec![0.0, 1.0], vec![0.0], vec![vec![p(0.0)]])
            .expect_err("row count mismatch");
        assert!(matches!(err, ConfigurationError::InvalidGrid { .. }));

        let err = PoseGrid::new(
            "bad",
            vec![1.0, 0.0],
            vec![0.0],
            vec![vec![p(0.0)], vec![p(1.0)]],
        )
        .expect_err("decreasing axis");
        assert!(matches!(err, ConfigurationError::InvalidGrid { .. }));

        let err = PoseGrid::new("bad", vec![], vec![0.0], vec![]).expect_err("empty axis");
        assert!(matches!(err, ConfigurationError::InvalidGrid { .. }));
    }

    #[test]
    fn vec_source_reports_missing_reference() {
        let mut source = VecGridSource::new().with_grid("a", grid());
        let refs = vec!["a".to_string(), "missing".to_string()];
        let err = source
            .load_stack(&refs, &PreferredLocation::Scene)
            .expect_err("missing grid");
        assert!(matches!(err, ConfigurationError::GridLoad { ref reference, .. } if reference == "missing"));
    }
}
