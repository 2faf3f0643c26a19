//! CubeSession: one live control session over an immutable cube.
//!
//! The widget toolkit owns subscription and event delivery; it calls
//! `on_point_changed` / `on_slider_changed` with the new value and a view of
//! the other control. Each call runs map -> evaluate -> apply -> redraw to
//! completion before returning.

use log::{debug, error, info};

use crate::config::CubeConfig;
use crate::cube::InterpolationCube;
use crate::error::ConfigurationError;
use crate::grid::{GridInterpolator, GridSource};
use crate::mapper::CoordinateMapper;
use crate::outputs::{Evaluation, EventSource};
use crate::pose::Pose;
use crate::ui_data::CubeUiData;
use crate::widget::{PointWidgetConfig, PointWidgetLayout, SliderWidgetConfig, SliderWidgetLayout};

/// Read access to the current value of both controls.
pub trait ControlSurface {
    /// Raw position of the point control, in its own (x, y) space.
    fn current_point(&self) -> [f32; 2];
    /// Raw slider value on the 0..100 scale.
    fn current_slider(&self) -> f32;
}

/// Scene-application collaborator. Failures are the host's concern.
pub trait PoseApplier {
    fn apply_pose(&mut self, pose: &Pose, time: f32);
}

/// Asks the host to redraw every viewport.
pub trait RedrawRequester {
    fn request_redraw(&mut self);
}

#[derive(Debug)]
pub struct CubeSession<G> {
    cube: InterpolationCube<G>,
    mapper: CoordinateMapper,
    ui_data: CubeUiData,
}

impl<G: GridInterpolator> CubeSession<G> {
    /// Load the grid stack named by `ui_data` and build the cube.
    ///
    /// Errors are logged and returned; no evaluation happens on failure.
    pub fn open<S>(
        source: &mut S,
        ui_data: CubeUiData,
        cfg: &CubeConfig,
    ) -> Result<Self, ConfigurationError>
    where
        S: GridSource<Grid = G> + ?Sized,
    {
        info!(
            "cube session: loading {} grid(s) from '{}'",
            ui_data.primary.len(),
            ui_data.location.as_str()
        );
        match Self::open_inner(source, ui_data, cfg) {
            Ok(session) => {
                info!(
                    "cube session: ready with {} layer(s)",
                    session.cube.layer_count()
                );
                Ok(session)
            }
            Err(e) => {
                error!("cube session: setup failed: {e}");
                Err(e)
            }
        }
    }

    fn open_inner<S>(
        source: &mut S,
        mut ui_data: CubeUiData,
        cfg: &CubeConfig,
    ) -> Result<Self, ConfigurationError>
    where
        S: GridSource<Grid = G> + ?Sized,
    {
        cfg.validate()?;
        if ui_data.primary.is_empty() {
            return Err(ConfigurationError::EmptyStack);
        }
        let loaded = source.load_stack(&ui_data.primary, &ui_data.location)?;
        if let Some(location) = loaded.preferred_location {
            ui_data = ui_data.with_location(location);
        }
        let cube = InterpolationCube::new(loaded.layers, cfg)?;
        Ok(Self::with_ui_data(cube, cfg, ui_data))
    }

    /// Session over an already-built cube.
    pub fn from_cube(cube: InterpolationCube<G>, cfg: &CubeConfig) -> Self {
        Self::with_ui_data(cube, cfg, CubeUiData::default())
    }

    fn with_ui_data(cube: InterpolationCube<G>, cfg: &CubeConfig, ui_data: CubeUiData) -> Self {
        let mapper = CoordinateMapper::for_cube(&cube, cfg);
        Self {
            cube,
            mapper,
            ui_data,
        }
    }

    pub fn cube(&self) -> &InterpolationCube<G> {
        &self.cube
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// UI record to persist; reflects any location change from the loader.
    pub fn ui_data(&self) -> &CubeUiData {
        &self.ui_data
    }

    /// Pure part of a control event: normalize and evaluate.
    pub fn evaluate_at(&self, source: EventSource, point: [f32; 2], slider: f32) -> Evaluation {
        let coord = self.mapper.map(point, slider);
        let pose = self.cube.evaluate_coord(coord);
        Evaluation {
            source,
            coord,
            pose,
        }
    }

    /// Point control moved; the slider value comes from `controls`.
    pub fn on_point_changed<C, A, R>(
        &self,
        point: [f32; 2],
        controls: &C,
        applier: &mut A,
        redraw: &mut R,
        time: f32,
    ) -> Evaluation
    where
        C: ControlSurface + ?Sized,
        A: PoseApplier + ?Sized,
        R: RedrawRequester + ?Sized,
    {
        let slider = controls.current_slider();
        self.run(EventSource::Point, point, slider, applier, redraw, time)
    }

    /// Slider moved; the point position comes from `controls`.
    pub fn on_slider_changed<C, A, R>(
        &self,
        slider: f32,
        controls: &C,
        applier: &mut A,
        redraw: &mut R,
        time: f32,
    ) -> Evaluation
    where
        C: ControlSurface + ?Sized,
        A: PoseApplier + ?Sized,
        R: RedrawRequester + ?Sized,
    {
        let point = controls.current_point();
        self.run(EventSource::Slider, point, slider, applier, redraw, time)
    }

    fn run<A, R>(
        &self,
        source: EventSource,
        point: [f32; 2],
        slider: f32,
        applier: &mut A,
        redraw: &mut R,
        time: f32,
    ) -> Evaluation
    where
        A: PoseApplier + ?Sized,
        R: RedrawRequester + ?Sized,
    {
        let eval = self.evaluate_at(source, point, slider);
        debug!(
            "cube session: {:?} event -> u={} v={} w={}",
            source, eval.coord.u, eval.coord.v, eval.coord.w
        );
        applier.apply_pose(&eval.pose, time);
        redraw.request_redraw();
        eval
    }

    /// Point-control layout for the current cube and attributes.
    pub fn point_layout(
        &self,
        config: &PointWidgetConfig,
    ) -> Result<PointWidgetLayout, ConfigurationError> {
        PointWidgetLayout::for_cube(&self.cube, config)
    }

    /// Slider layout for the current cube and attributes.
    pub fn slider_layout(
        &self,
        config: &SliderWidgetConfig,
    ) -> Result<SliderWidgetLayout, ConfigurationError> {
        SliderWidgetLayout::for_cube(&self.cube, config)
    }
}
