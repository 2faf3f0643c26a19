//! Typed configuration for the two on-screen controls driving a cube.
//!
//! The widget toolkit renders and hit-tests; this module only validates the
//! user-editable attributes and derives the static layout each control needs
//! from the cube domain.

use serde::{Deserialize, Serialize};

use crate::cube::InterpolationCube;
use crate::error::ConfigurationError;
use crate::grid::{AxisRange, GridInterpolator};

/// 8-bit RGBA color as stored in control attributes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorRgba8 {
    pub const WHITE: ColorRgba8 = ColorRgba8::rgb(255, 255, 255);
    pub const BLACK: ColorRgba8 = ColorRgba8::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointStyle {
    #[default]
    Circle,
    Square,
    Triangle,
    Diamond,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Justify {
    Left,
    #[default]
    Center,
    Right,
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidWidgetConfig {
            field,
            reason: format!("must be a positive finite number, got {value}"),
        })
    }
}

/// User-editable attributes of the 2D point control. Re-read whenever the
/// host reports the control node changed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointWidgetConfig {
    pub size: f32,
    pub show_limits: bool,
    pub label: String,
    pub label_color: ColorRgba8,
    pub label_bg_color: ColorRgba8,
    pub label_font: String,
    pub label_size: f32,
    pub label_screen_space: bool,
    pub inner_color: ColorRgba8,
    pub show_grid_lines: bool,
}

impl Default for PointWidgetConfig {
    fn default() -> Self {
        Self {
            size: 1.0,
            show_limits: true,
            label: String::new(),
            label_color: ColorRgba8::WHITE,
            label_bg_color: ColorRgba8::rgba(0, 0, 0, 128),
            label_font: "Arial".into(),
            label_size: 12.0,
            label_screen_space: true,
            inner_color: ColorRgba8::rgb(255, 200, 0),
            show_grid_lines: true,
        }
    }
}

impl PointWidgetConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        positive("size", self.size)?;
        positive("label_size", self.label_size)?;
        Ok(())
    }
}

/// User-editable attributes of the w slider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderWidgetConfig {
    /// Shared widget size attribute; the slider radius scales with it.
    pub size: f32,
    pub frame_color: ColorRgba8,
    pub slider_color: ColorRgba8,
}

impl Default for SliderWidgetConfig {
    fn default() -> Self {
        Self {
            size: 1.0,
            frame_color: ColorRgba8::rgb(80, 80, 80),
            slider_color: ColorRgba8::rgb(255, 200, 0),
        }
    }
}

impl SliderWidgetConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        positive("size", self.size)
    }

    pub fn radius(&self) -> f32 {
        self.size * 7.5
    }
}

/// Static properties of the point control derived from the cube domain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointWidgetLayout {
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    /// Vertical grid lines (v stamps of layer 0).
    pub x_values: Vec<f32>,
    /// Horizontal grid lines (u stamps of layer 0).
    pub y_values: Vec<f32>,
    pub label_pos: [f32; 2],
    pub label_justify: Justify,
    pub point_style: PointStyle,
    pub selection_color: ColorRgba8,
    pub outer_color: ColorRgba8,
}

impl PointWidgetLayout {
    pub fn for_cube<G: GridInterpolator>(
        cube: &InterpolationCube<G>,
        config: &PointWidgetConfig,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let layer0 = &cube.layers()[0];
        let x_range = cube.v_range();
        let y_range = cube.u_range();
        Ok(Self {
            x_range,
            y_range,
            x_values: layer0.v_values().to_vec(),
            y_values: layer0.u_values().to_vec(),
            label_pos: [x_range.midpoint(), y_range.max + config.size * 10.0],
            label_justify: Justify::Center,
            point_style: PointStyle::Circle,
            selection_color: ColorRgba8::WHITE,
            outer_color: ColorRgba8::BLACK,
        })
    }
}

/// Static properties of the vertical w slider, placed right of the point control.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SliderWidgetLayout {
    pub position: [f32; 2],
    pub length: f32,
    pub horizontal: bool,
    pub radius: f32,
    pub slider_selection_color: ColorRgba8,
    pub frame_selection_color: ColorRgba8,
}

impl SliderWidgetLayout {
    pub const LENGTH: f32 = 3.0;

    pub fn for_cube<G: GridInterpolator>(
        cube: &InterpolationCube<G>,
        config: &SliderWidgetConfig,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            position: [cube.v_range().max + 0.5, -Self::LENGTH / 2.0],
            length: Self::LENGTH,
            horizontal: false,
            radius: config.radius(),
            slider_selection_color: ColorRgba8::rgba(150, 150, 255, 255),
            frame_selection_color: ColorRgba8::rgba(200, 200, 255, 255),
        })
    }
}
