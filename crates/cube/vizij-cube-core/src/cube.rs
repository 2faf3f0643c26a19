//! InterpolationCube: an ordered stack of 2D pose grids blended trilinearly.
//!
//! Layer `i` of `N` sits at `w = i / (N - 1)`. Evaluating (u,v,w) runs the
//! bilinear lookup on the two layers bracketing `w` and blends the results
//! linearly across the layer axis. A single-layer stack ignores `w`.

use log::trace;

use crate::config::CubeConfig;
use crate::error::{Axis, ConfigurationError};
use crate::grid::{AxisRange, GridInterpolator};
use crate::mapper::NormalizedCoord;
use crate::pose::Pose;

/// The two layers bracketing a w position and the blend factor between them.
///
/// `blend` is the fractional position from `lower` toward `upper`; it is 0
/// when both indices coincide.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayerSelection {
    pub lower: usize,
    pub upper: usize,
    pub blend: f32,
}

#[derive(Debug)]
pub struct InterpolationCube<G> {
    layers: Vec<G>,
    u_range: AxisRange,
    v_range: AxisRange,
}

fn check_domain(layer: usize, axis: Axis, range: AxisRange) -> Result<(), ConfigurationError> {
    if range.is_valid() {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidDomain {
            layer,
            axis,
            min: range.min,
            max: range.max,
        })
    }
}

fn check_match(
    layer: usize,
    axis: Axis,
    expected: AxisRange,
    actual: AxisRange,
    tolerance: f32,
) -> Result<(), ConfigurationError> {
    if actual.approx_eq(&expected, tolerance) {
        Ok(())
    } else {
        Err(ConfigurationError::DomainMismatch {
            layer,
            axis,
            expected: expected.as_tuple(),
            actual: actual.as_tuple(),
        })
    }
}

impl<G: GridInterpolator> InterpolationCube<G> {
    /// Build a cube from layers ordered along w.
    ///
    /// Fails on an empty stack, on a layer with a non-finite or inverted
    /// range, and on any layer whose (u,v) domain differs from layer 0's.
    /// An invalid `cfg` is rejected before any layer is inspected.
    pub fn new(layers: Vec<G>, cfg: &CubeConfig) -> Result<Self, ConfigurationError> {
        cfg.validate()?;
        let first = layers.first().ok_or(ConfigurationError::EmptyStack)?;
        let u_range = first.u_range();
        let v_range = first.v_range();

        for (i, layer) in layers.iter().enumerate() {
            let (lu, lv) = (layer.u_range(), layer.v_range());
            check_domain(i, Axis::U, lu)?;
            check_domain(i, Axis::V, lv)?;
            check_match(i, Axis::U, u_range, lu, cfg.domain_tolerance)?;
            check_match(i, Axis::V, v_range, lv, cfg.domain_tolerance)?;
        }

        Ok(Self {
            layers,
            u_range,
            v_range,
        })
    }

    #[inline]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> &[G] {
        &self.layers
    }

    /// Shared u domain (read from layer 0).
    pub fn u_range(&self) -> AxisRange {
        self.u_range
    }

    /// Shared v domain (read from layer 0).
    pub fn v_range(&self) -> AxisRange {
        self.v_range
    }

    /// Pick the two integer-adjacent layers around `w` (clamped to [0,1]).
    pub fn select_layers(&self, w: f32) -> LayerSelection {
        let n = self.layers.len();
        if n == 1 {
            return LayerSelection {
                lower: 0,
                upper: 0,
                blend: 0.0,
            };
        }
        let last = (n - 1) as f32;
        let w = AxisRange::UNIT.clamp(w);
        let f = (w * last).clamp(0.0, last);
        let lower = f.floor() as usize;
        let upper = (f.ceil() as usize).min(n - 1);
        let weight_a = if lower == upper {
            1.0
        } else {
            upper as f32 - f
        };
        let selection = LayerSelection {
            lower,
            upper,
            blend: 1.0 - weight_a,
        };
        trace!("cube: w={w} -> {selection:?}");
        selection
    }

    /// Blended pose at (u,v,w). u and v are clamped to the shared domain.
    pub fn evaluate(&self, u: f32, v: f32, w: f32) -> Pose {
        let u = self.u_range.clamp(u);
        let v = self.v_range.clamp(v);
        let sel = self.select_layers(w);

        let pose_a = self.layers[sel.lower].interpolate(u, v);
        if sel.lower == sel.upper {
            // Same result as pose_a.interpolate(0, pose_a).
            return pose_a;
        }
        let pose_b = self.layers[sel.upper].interpolate(u, v);
        pose_a.interpolate(sel.blend, &pose_b)
    }

    pub fn evaluate_coord(&self, coord: NormalizedCoord) -> Pose {
        self.evaluate(coord.u, coord.v, coord.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    /// Layer whose pose is constant over a fixed domain.
    #[derive(Debug)]
    struct Flat {
        x: f32,
        u: AxisRange,
        v: AxisRange,
    }

    impl GridInterpolator for Flat {
        fn interpolate(&self, _u: f32, _v: f32) -> Pose {
            Pose::new().with("x", Value::Float(self.x))
        }
        fn u_range(&self) -> AxisRange {
            self.u
        }
        fn v_range(&self) -> AxisRange {
            self.v
        }
    }

    fn flat(x: f32) -> Flat {
        Flat {
            x,
            u: AxisRange::UNIT,
            v: AxisRange::UNIT,
        }
    }

    fn cube(n: usize) -> InterpolationCube<Flat> {
        let layers = (0..n).map(|i| flat(i as f32)).collect();
        InterpolationCube::new(layers, &CubeConfig::default()).expect("cube")
    }

    #[test]
    fn selection_on_exact_layers() {
        let c = cube(3);
        assert_eq!(
            c.select_layers(0.5),
            LayerSelection {
                lower: 1,
                upper: 1,
                blend: 0.0
            }
        );
        assert_eq!(c.select_layers(1.0).lower, 2);
        assert_eq!(c.select_layers(1.0).upper, 2);
    }

    #[test]
    fn selection_between_layers_keeps_both_neighbours() {
        let c = cube(3);
        let sel = c.select_layers(0.25);
        assert_eq!((sel.lower, sel.upper), (0, 1));
        assert_eq!(sel.blend, 0.5);

        // Very close to an integer still blends the bracketing pair.
        let sel = c.select_layers(0.4999);
        assert_eq!((sel.lower, sel.upper), (0, 1));
        assert!(sel.blend > 0.99);
    }

    #[test]
    fn selection_clamps_w() {
        let c = cube(4);
        assert_eq!(c.select_layers(-2.0).lower, 0);
        assert_eq!(c.select_layers(9.0).upper, 3);
        assert_eq!(c.select_layers(f32::NAN).lower, 0);
    }

    #[test]
    fn single_layer_ignores_w() {
        let c = cube(1);
        for w in [0.0, 0.3, 1.0, -1.0, 5.0] {
            assert_eq!(c.select_layers(w).upper, 0);
            assert_eq!(c.evaluate(0.5, 0.5, w), flat(0.0).interpolate(0.5, 0.5));
        }
    }

    #[test]
    fn empty_stack_is_rejected() {
        let err = InterpolationCube::<Flat>::new(Vec::new(), &CubeConfig::default())
            .expect_err("empty");
        assert_eq!(err, ConfigurationError::EmptyStack);
    }

    #[test]
    fn mismatched_domains_are_rejected() {
        let layers = vec![
            flat(0.0),
            Flat {
                x: 1.0,
                u: AxisRange::UNIT,
                v: AxisRange::new(0.0, 2.0),
            },
        ];
        let err = InterpolationCube::new(layers, &CubeConfig::default()).expect_err("mismatch");
        assert!(matches!(
            err,
            ConfigurationError::DomainMismatch {
                layer: 1,
                axis: Axis::V,
                ..
            }
        ));
    }

    #[test]
    fn inverted_domain_is_rejected() {
        let layers = vec![Flat {
            x: 0.0,
            u: AxisRange::new(1.0, 0.0),
            v: AxisRange::UNIT,
        }];
        let err = InterpolationCube::new(layers, &CubeConfig::default()).expect_err("inverted");
        assert!(matches!(
            err,
            ConfigurationError::InvalidDomain {
                layer: 0,
                axis: Axis::U,
                ..
            }
        ));
    }

    #[test]
    fn invalid_config_is_rejected_before_domain_checks() {
        for cfg in [
            CubeConfig {
                domain_tolerance: -1.0,
                ..Default::default()
            },
            CubeConfig {
                domain_tolerance: f32::NAN,
                ..Default::default()
            },
            CubeConfig {
                slider_max: 0.0,
                ..Default::default()
            },
        ] {
            let err = InterpolationCube::new(vec![flat(0.0)], &cfg).expect_err("bad config");
            assert!(
                matches!(err, ConfigurationError::InvalidConfig { .. }),
                "{cfg:?} -> {err:?}"
            );
        }
    }
}
