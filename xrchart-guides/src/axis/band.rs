use itertools::Itertools;
use xrchart_common::vec3::Vec3;
use xrchart_scales::scales::band::BandScale;

use crate::error::XrGuidesError;

use super::opts::{AxisConfig, AxisDimension};
use super::spec::AxisSpec;

/// Build a nominal axis with one label per slot of a band scale
pub fn make_band_axis(
    dimension: AxisDimension,
    scale: &BandScale,
    config: &AxisConfig,
) -> Result<AxisSpec, XrGuidesError> {
    let labels = scale
        .centers()
        .into_iter()
        .zip(scale.domain().iter().map(|v| v.to_string()))
        .collect_vec();
    make_category_axis(dimension, scale.extent(), &labels, config)
}

/// Build an axis with explicit `(distance along axis, label)` pairs
pub fn make_category_axis(
    dimension: AxisDimension,
    length: f64,
    labels: &[(f64, String)],
    config: &AxisConfig,
) -> Result<AxisSpec, XrGuidesError> {
    let (labels_pos, labels_values): (Vec<Vec3>, Vec<String>) = labels
        .iter()
        .map(|(distance, label)| (config.label_position(dimension, *distance), label.clone()))
        .unzip();

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
    use xrchart_scales::category::CategoryValue;

    #[test]
    fn test_band_axis_labels_centered() -> Result<(), XrGuidesError> {
        let values = vec![
            CategoryValue::text("y"),
            CategoryValue::text("x"),
        ];
        let scale = BandScale::try_new(&values, 2.0)?;
        let axis = make_band_axis(AxisDimension::X, &scale, &AxisConfig::default())?;

        assert_eq!(axis.end(), Some(Vec3::new(4.0, 0.0, 0.0)));
        assert_eq!(axis.labels_values(), ["x", "y"]);
        assert_eq!(
            axis.labels_pos(),
            [Vec3::new(1.0, 0.01, 0.5), Vec3::new(3.0, 0.01, 0.5)]
        );
        assert_eq!(axis.labels_rotation(), Vec3::new(-90.0, 0.0, -90.0));
        Ok(())
    }
}
