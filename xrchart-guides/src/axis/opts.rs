use serde::{Deserialize, Serialize};
use xrchart_common::vec3::Vec3;
use xrchart_scenegraph::marks::text::TextAlign;

/// Spatial dimension an axis runs along. The z axis runs into the scene,
/// toward negative z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisDimension {
    X,
    Y,
    Z,
}

impl AxisDimension {
    pub fn name(&self) -> &'static str {
        match self {
            AxisDimension::X => "x",
            AxisDimension::Y => "y",
            AxisDimension::Z => "z",
        }
    }

    /// Point at `distance` along the axis from the origin
    pub fn along(&self, distance: f64) -> Vec3 {
        match self {
            AxisDimension::X => Vec3::new(distance, 0.0, 0.0),
            AxisDimension::Y => Vec3::new(0.0, distance, 0.0),
            AxisDimension::Z => Vec3::new(0.0, 0.0, -distance),
        }
    }

    pub fn label_rotation(&self) -> Vec3 {
        match self {
            AxisDimension::X => Vec3::new(-90.0, 0.0, -90.0),
            AxisDimension::Y => Vec3::ZERO,
            AxisDimension::Z => Vec3::new(-90.0, 0.0, 0.0),
        }
    }

    pub fn label_align(&self) -> TextAlign {
        match self {
            AxisDimension::X => TextAlign::Left,
            AxisDimension::Y => TextAlign::Center,
            AxisDimension::Z => TextAlign::Right,
        }
    }
}

/// Label placement and styling shared by all axes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    /// Offset along x of y and z axis labels
    pub label_x_delta: f64,
    /// Lift of x and z axis labels above the floor
    pub label_y_delta: f64,
    /// Offset along z of x axis labels, in front of the chart
    pub x_label_z_delta: f64,
    pub tick_count: usize,
    pub line_color: String,
    pub label_color: String,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            label_x_delta: -0.5,
            label_y_delta: 0.01,
            x_label_z_delta: 0.5,
            tick_count: 5,
            line_color: "black".to_string(),
            label_color: "black".to_string(),
        }
    }
}

impl AxisConfig {
    /// Anchor of a label sitting at `distance` along the given axis
    pub fn label_position(&self, dimension: AxisDimension, distance: f64) -> Vec3 {
        match dimension {
            AxisDimension::X => Vec3::new(distance, self.label_y_delta, self.x_label_z_delta),
            AxisDimension::Y => Vec3::new(self.label_x_delta, distance, 0.0),
            AxisDimension::Z => Vec3::new(self.label_x_delta, self.label_y_delta, -distance),
        }
    }
}
