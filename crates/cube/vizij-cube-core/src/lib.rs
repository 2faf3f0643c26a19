//! Vizij Cube Core (engine-agnostic)
//!
//! A pose interpolation cube: a stack of 2D pose grids blended trilinearly
//! from a live (u, v, w) control coordinate. The crate defines the value and
//! pose model, the per-layer grid contract with a reference rectilinear grid,
//! the cube itself, raw-input normalization, typed widget configuration, and
//! a control session that wires events to injected host collaborators.

pub mod blend;
pub mod config;
pub mod cube;
pub mod error;
pub mod grid;
pub mod mapper;
pub mod outputs;
pub mod pose;
pub mod session;
pub mod ui_data;
pub mod value;
pub mod widget;

// Re-exports for consumers (adapters)
pub use blend::blend_values;
pub use config::CubeConfig;
pub use cube::{InterpolationCube, LayerSelection};
pub use error::{Axis, ConfigurationError, CubeError};
pub use grid::{AxisRange, GridInterpolator, GridSource, LoadedStack, PoseGrid, VecGridSource};
pub use mapper::{CoordinateMapper, NormalizedCoord};
pub use outputs::{Evaluation, EventSource};
pub use pose::Pose;
pub use session::{ControlSurface, CubeSession, PoseApplier, RedrawRequester};
pub use ui_data::{CubeUiData, PreferredLocation};
pub use value::{Value, ValueKind};
pub use widget::{
    ColorRgba8, Justify, PointStyle, PointWidgetConfig, PointWidgetLayout, SliderWidgetConfig,
    SliderWidgetLayout,
};
