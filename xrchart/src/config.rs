use std::path::Path;

use serde::{Deserialize, Serialize};
use xrchart_common::color::ColorPalette;
use xrchart_common::vec3::Vec3;
use xrchart_guides::axis::opts::AxisConfig;

use crate::constants::*;
use crate::error::XrChartError;

/// Layout constants applied when a specification leaves a value unset.
///
/// Every field has a default, so a partial JSON object such as
/// `{"width": 6, "palette": ["black", "white"]}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartDefaults {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub bar_size: f64,
    pub bar_height_without_y: f64,
    pub pie_radius: f64,
    pub pie_inner_radius: f64,
    pub pie_thickness: f64,
    pub pie_rotation: Vec3,
    pub point_radius: f64,
    pub point_color: String,
    pub point_x_separation: f64,
    pub image_width: f64,
    pub image_height: f64,
    pub gltf_scale: Vec3,
    pub palette: ColorPalette,
    pub axis: AxisConfig,
}

impl Default for ChartDefaults {
    fn default() -> Self {
        Self {
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
            depth: DEFAULT_CHART_DEPTH,
            bar_size: DEFAULT_BAR_SIZE,
            bar_height_without_y: DEFAULT_BAR_HEIGHT_WITHOUT_Y,
            pie_radius: DEFAULT_PIE_RADIUS,
            pie_inner_radius: DEFAULT_PIE_INNER_RADIUS,
            pie_thickness: DEFAULT_PIE_THICKNESS,
            pie_rotation: Vec3::from(DEFAULT_PIE_ROTATION),
            point_radius: DEFAULT_POINT_RADIUS,
            point_color: DEFAULT_POINT_COLOR.to_string(),
            point_x_separation: DEFAULT_POINT_X_SEPARATION,
            image_width: DEFAULT_IMAGE_WIDTH,
            image_height: DEFAULT_IMAGE_HEIGHT,
            gltf_scale: Vec3::from(DEFAULT_GLTF_SCALE),
            palette: ColorPalette::default(),
            axis: AxisConfig {
                label_x_delta: LABELS_X_DELTA,
                label_y_delta: LABELS_Y_DELTA,
                x_label_z_delta: X_LABELS_Z_DELTA,
                tick_count: DEFAULT_TICK_COUNT,
                line_color: AXIS_COLOR.to_string(),
                label_color: AXIS_COLOR.to_string(),
            },
        }
    }
}

impl ChartDefaults {
    pub fn from_json(json: &str) -> Result<Self, XrChartError> {
        let defaults: Self = serde_json::from_str(json)?;
        defaults.validate()?;
        Ok(defaults)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, XrChartError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn validate(&self) -> Result<(), XrChartError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
            ("bar_size", self.bar_size),
            ("bar_height_without_y", self.bar_height_without_y),
            ("pie_radius", self.pie_radius),
            ("pie_thickness", self.pie_thickness),
            ("point_radius", self.point_radius),
            ("point_x_separation", self.point_x_separation),
            ("image_width", self.image_width),
            ("image_height", self.image_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(XrChartError::ValidationError(format!(
                    "Invalid default `{name}`: expected a positive number, got {value}"
                )));
            }
        }
        if !(self.pie_inner_radius >= 0.0 && self.pie_inner_radius < self.pie_radius) {
            return Err(XrChartError::ValidationError(format!(
                "Invalid default `pie_inner_radius`: expected a value in [0, {}), got {}",
                self.pie_radius, self.pie_inner_radius
            )));
        }
        xrchart_common::color::validate_color(&self.point_color)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() -> Result<(), XrChartError> {
        let defaults = ChartDefaults::from_json(r#"{"width": 6, "palette": ["black", "white"]}"#)?;
        assert_eq!(defaults.width, 6.0);
        assert_eq!(defaults.height, DEFAULT_CHART_HEIGHT);
        assert_eq!(defaults.palette.color_at(3), "white");
        assert_eq!(defaults.axis.tick_count, 5);
        Ok(())
    }

    #[test]
    fn test_invalid_config() {
        assert!(ChartDefaults::from_json(r#"{"depth": -1}"#).is_err());
        assert!(ChartDefaults::from_json(r#"{"palette": []}"#).is_err());
        assert!(ChartDefaults::from_json(r#"{"pie_inner_radius": 2}"#).is_err());
    }
}
