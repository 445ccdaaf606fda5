use xrchart_common::format::{format_number, round_label};
use xrchart_common::vec3::Vec3;

use crate::error::XrGuidesError;

use super::opts::{AxisConfig, AxisDimension};
use super::spec::AxisSpec;

/// Build a quantitative axis of the given `length`.
///
/// `ticks` are `(distance along axis, data value)` pairs; values are rounded
/// to two decimals for display.
pub fn make_numeric_axis(
    dimension: AxisDimension,
    length: f64,
    ticks: &[(f64, f64)],
    config: &AxisConfig,
) -> Result<AxisSpec, XrGuidesError> {
    let labels_pos = ticks
        .iter()
        .map(|(distance, _)| config.label_position(dimension, *distance))
        .collect();
    let labels_values = ticks
        .iter()
        .map(|(_, value)| format_number(round_label(*value)))
        .collect();

    AxisSpec::try_new(
        Vec3::ZERO,
        dimension.along(length),
        labels_pos,
        labels_values,
        dimension.label_rotation(),
        dimension.label_align(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use xrchart_scales::scales::linear::ExtentScale;

    #[test]
    fn test_y_axis_from_extent_scale() -> Result<(), XrGuidesError> {
        let config = AxisConfig::default();
        let scale = ExtentScale::try_new(&[10.0, 20.0], 4.0)?;
        let ticks = scale.ticks(config.tick_count, 0.0);
        let axis = make_numeric_axis(AxisDimension::Y, 4.0, &ticks, &config)?;

        assert_eq!(axis.start(), Some(Vec3::ZERO));
        assert_eq!(axis.end(), Some(Vec3::new(0.0, 4.0, 0.0)));
        assert_eq!(axis.labels_values(), ["4", "8", "12", "16", "20"]);
        assert_eq!(axis.labels_pos()[0], Vec3::new(-0.5, 0.8, 0.0));
        for (i, pos) in axis.labels_pos().iter().enumerate() {
            assert_approx_eq!(f64, pos.y, 0.8 * (i + 1) as f64, epsilon = 1e-9);
        }
        assert_eq!(axis.labels_rotation(), Vec3::ZERO);
        Ok(())
    }

    #[test]
    fn test_z_axis_runs_backwards() -> Result<(), XrGuidesError> {
        let config = AxisConfig::default();
        let axis = make_numeric_axis(AxisDimension::Z, 2.0, &[(2.0, 7.0)], &config)?;
        assert_eq!(axis.end(), Some(Vec3::new(0.0, 0.0, -2.0)));
        assert_eq!(axis.labels_pos()[0], Vec3::new(-0.5, 0.01, -2.0));
        Ok(())
    }
}
