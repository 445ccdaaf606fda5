use xrchart_scenegraph::marks::line::SceneLineMark;
use xrchart_scenegraph::marks::mark::SceneMark;
use xrchart_scenegraph::marks::text::SceneTextMark;
use xrchart_common::value::ScalarOrArray;

use super::opts::{AxisConfig, AxisDimension};
use super::spec::{AxisSpec, Axes};

/// Scene marks for one axis: the line, then its labels.
///
/// Suppressed axes produce no marks.
pub fn make_axis_marks(
    dimension: AxisDimension,
    axis: &AxisSpec,
    config: &AxisConfig,
) -> Vec<SceneMark> {
    let (Some(start), Some(end)) = (axis.start(), axis.end()) else {
        return vec![];
    };

    let mut marks: Vec<SceneMark> = vec![SceneLineMark {
        name: format!("{}_axis_line", dimension.name()),
        start,
        end,
        color: config.line_color.clone(),
    }
    .into()];

    if !axis.labels_values().is_empty() {
        marks.push(
            SceneTextMark {
                name: format!("{}_axis_labels", dimension.name()),
                len: axis.labels_values().len() as u32,
                text: ScalarOrArray::Array(axis.labels_values().to_vec()),
                position: ScalarOrArray::Array(axis.labels_pos().to_vec()),
                rotation: ScalarOrArray::Scalar(axis.labels_rotation()),
                align: ScalarOrArray::Scalar(axis.labels_align()),
                color: ScalarOrArray::Scalar(config.label_color.clone()),
            }
            .into(),
        );
    }
    marks
}

/// Marks for every visible axis in x, y, z order
pub fn make_axes_marks(axes: &Axes, config: &AxisConfig) -> Vec<SceneMark> {
    axes.visible()
        .into_iter()
        .flat_map(|(dimension, axis)| make_axis_marks(dimension, axis, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::numeric::make_numeric_axis;
    use xrchart_scenegraph::primitive::ToPrimitives;

    #[test]
    fn test_suppressed_axis_has_no_marks() {
        let marks = make_axis_marks(
            AxisDimension::X,
            &AxisSpec::suppressed(),
            &AxisConfig::default(),
        );
        assert!(marks.is_empty());
    }

    #[test]
    fn test_line_then_labels() {
        let config = AxisConfig::default();
        let axis = make_numeric_axis(AxisDimension::Y, 4.0, &[(2.0, 5.0), (4.0, 10.0)], &config)
            .unwrap();
        let marks = make_axis_marks(AxisDimension::Y, &axis, &config);
        assert_eq!(marks.len(), 2);

        let line = marks[0].to_primitives().unwrap();
        assert_eq!(
            line[0].get("line"),
            Some("start: 0 0 0; end: 0 4 0; color: black")
        );
        let labels = marks[1].to_primitives().unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[1].get("value"), Some("10"));
        assert_eq!(labels[1].get("position"), Some("-0.5 4 0"));
    }
}
