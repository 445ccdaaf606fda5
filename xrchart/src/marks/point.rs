use xrchart_common::value::ScalarOrArray;
use xrchart_common::vec3::Vec3;
use xrchart_guides::axis::band::make_category_axis;
use xrchart_guides::axis::numeric::make_numeric_axis;
use xrchart_guides::axis::opts::AxisDimension;
use xrchart_guides::axis::spec::Axes;
use xrchart_scales::scales::ordinal::OrdinalScale;
use xrchart_scales::scales::point::{linspace, PointScale};
use xrchart_scenegraph::marks::sphere::SceneSphereMark;

use crate::config::ChartDefaults;
use crate::data::column::{category_values, display_values, numeric_values_or_zero};
use crate::data::table::DataTable;
use crate::encoding::ResolvedEncoding;
use crate::error::XrChartError;
use crate::marks::{row_ids, ChartLayout, CompiledChart};
use crate::spec::encoding::Channel;
use crate::spec::mark::PointMarkOptions;

fn max_magnitude(values: &[f64], field: &str) -> Result<f64, XrChartError> {
    let max = values.iter().map(|v| v.abs()).fold(0.0, f64::max);
    if !(max.is_finite() && max > 0.0) {
        return Err(XrChartError::DataError(format!(
            "Cannot scale points by `{field}`: its maximum absolute value is zero"
        )));
    }
    Ok(max)
}

/// Lay out one sphere per row.
///
/// Rows are spread along x in row order at a fixed separation. Heights are
/// proportional to y relative to the largest magnitude, radii proportional to
/// size, and z categories are spread evenly through the chart depth. When
/// every y value is non-positive the y axis runs down from the floor.
pub fn compile_point(
    options: &PointMarkOptions,
    encoding: &ResolvedEncoding,
    table: &DataTable,
    layout: &ChartLayout,
    defaults: &ChartDefaults,
) -> Result<CompiledChart, XrChartError> {
    let len = table.num_rows();
    if len == 0 {
        return Ok(CompiledChart::default());
    }
    let max_radius = options.max_radius.unwrap_or(defaults.point_radius);
    let separation = defaults.point_x_separation;
    let mut axes = Axes::default();

    let radii = match encoding.quantitative(Channel::Size)? {
        Some(size) => {
            let values = numeric_values_or_zero(table.column(&size.field)?)?;
            let max = max_magnitude(&values, &size.field)?;
            values.iter().map(|v| v.abs() / max * max_radius).collect()
        }
        None => vec![max_radius; len],
    };

    let x_start = radii[0];
    let xs: Vec<f64> = match encoding.get(Channel::X) {
        Some(x) => {
            let xs: Vec<f64> = (0..len).map(|i| x_start + i as f64 * separation).collect();
            if x.axis {
                let labels: Vec<(f64, String)> = xs
                    .iter()
                    .copied()
                    .zip(display_values(table.column(&x.field)?)?)
                    .collect();
                let length = separation * len as f64 + max_radius;
                axes.x = make_category_axis(AxisDimension::X, length, &labels, &defaults.axis)?;
            }
            xs
        }
        None => vec![x_start; len],
    };

    let ys: Vec<f64> = match encoding.quantitative(Channel::Y)? {
        Some(y) => {
            let values = numeric_values_or_zero(table.column(&y.field)?)?;
            let max = max_magnitude(&values, &y.field)?;
            if y.axis {
                let sign = if values.iter().all(|v| *v <= 0.0) { -1.0 } else { 1.0 };
                let count = defaults.axis.tick_count;
                let length = sign * layout.height;
                let extreme = sign * max;
                let ticks: Vec<(f64, f64)> = linspace(length / count as f64, length, count)
                    .into_iter()
                    .zip(linspace(extreme / count as f64, extreme, count))
                    .collect();
                axes.y = make_numeric_axis(AxisDimension::Y, length, &ticks, &defaults.axis)?;
            }
            values.iter().map(|v| v / max * layout.height).collect()
        }
        None => vec![max_radius; len],
    };

    let zs: Vec<f64> = match encoding.get(Channel::Z) {
        Some(z) => {
            let categories = category_values(table.column(&z.field)?)?;
            let scale = PointScale::try_new(&categories, -max_radius, -layout.depth + max_radius)?;
            if z.axis {
                let labels: Vec<(f64, String)> = scale
                    .positions()
                    .iter()
                    .map(|p| -p)
                    .zip(scale.domain().iter().map(|c| c.to_string()))
                    .collect();
                axes.z = make_category_axis(AxisDimension::Z, layout.depth, &labels, &defaults.axis)?;
            }
            categories
                .iter()
                .map(|c| scale.position(c))
                .collect::<Result<_, _>>()?
        }
        None => vec![-max_radius; len],
    };

    let colors: ScalarOrArray<String> = match encoding.get(Channel::Color) {
        Some(color) => {
            let categories = category_values(table.column(&color.field)?)?;
            let scale = OrdinalScale::try_new(&categories, defaults.palette.colors().to_vec())?;
            ScalarOrArray::Array(
                categories
                    .iter()
                    .map(|c| scale.scale(c).cloned())
                    .collect::<Result<_, _>>()?,
            )
        }
        None => ScalarOrArray::Scalar(defaults.point_color.clone()),
    };

    let mut id_columns = vec![];
    for channel in [Channel::X, Channel::Y, Channel::Z] {
        if let Some(resolved) = encoding.get(channel) {
            id_columns.push(display_values(table.column(&resolved.field)?)?);
        }
    }

    let positions = xs
        .into_iter()
        .zip(ys)
        .zip(zs)
        .map(|((x, y), z)| Vec3::new(x, y, z))
        .collect();
    let points = SceneSphereMark {
        name: "points".to_string(),
        len: len as u32,
        ids: Some(row_ids(&id_columns, len)),
        position: ScalarOrArray::Array(positions),
        radius: ScalarOrArray::Array(radii),
        color: colors,
    };

    Ok(CompiledChart {
        marks: vec![points.into()],
        axes,
        rotation_offset: Default::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::table_from_records;
    use crate::encoding::resolve_encoding;
    use crate::spec::encoding::EncodingSpec;
    use crate::spec::mark::MarkType;
    use float_cmp::assert_approx_eq;
    use serde_json::{json, Value};
    use xrchart_scenegraph::marks::mark::SceneMark;

    fn compile(data: Value, encoding: Value) -> Result<CompiledChart, XrChartError> {
        let table = table_from_records(&serde_json::from_value(data)?)?;
        let encoding: EncodingSpec = serde_json::from_value(encoding)?;
        let resolved = resolve_encoding(&encoding, MarkType::Point, &table)?;
        let defaults = ChartDefaults::default();
        let layout = ChartLayout {
            width: defaults.width,
            height: defaults.height,
            depth: defaults.depth,
        };
        compile_point(&Default::default(), &resolved, &table, &layout, &defaults)
    }

    fn points(chart: &CompiledChart) -> &SceneSphereMark {
        match &chart.marks[0] {
            SceneMark::Sphere(points) => points,
            other => panic!("expected sphere mark, got {other:?}"),
        }
    }

    #[test]
    fn test_bubbles() -> Result<(), XrChartError> {
        let chart = compile(
            json!([
                {"model": "leon", "sales": 10, "size": 4, "motor": "diesel"},
                {"model": "ibiza", "sales": 20, "size": 2, "motor": "gasoline"},
                {"model": "arona", "sales": 5, "size": 1, "motor": "diesel"},
            ]),
            json!({"x": "model", "y": "sales", "z": "motor", "size": "size", "color": "motor"}),
        )?;
        let points = points(&chart);

        assert_eq!(points.radius.as_vec(3), vec![0.5, 0.25, 0.125]);

        let positions = points.position.as_vec(3);
        assert_approx_eq!(f64, positions[0].x, 0.5);
        assert_approx_eq!(f64, positions[1].x, 1.5);
        assert_approx_eq!(f64, positions[2].x, 2.5);
        assert_approx_eq!(f64, positions[1].y, 4.0);
        assert_approx_eq!(f64, positions[0].y, 2.0);
        assert_approx_eq!(f64, positions[0].z, -0.5);
        assert_approx_eq!(f64, positions[1].z, -1.5);

        assert_eq!(points.color.as_vec(3), vec!["red", "green", "red"]);
        assert_eq!(points.ids.clone().unwrap()[0], "leon : 10 : diesel");

        assert_eq!(chart.axes.x.labels_values(), ["leon", "ibiza", "arona"]);
        assert_eq!(chart.axes.x.end(), Some(Vec3::new(3.5, 0.0, 0.0)));
        assert_eq!(chart.axes.y.labels_values(), ["4", "8", "12", "16", "20"]);
        assert_eq!(chart.axes.z.labels_values(), ["diesel", "gasoline"]);
        Ok(())
    }

    #[test]
    fn test_defaults_without_channels() -> Result<(), XrChartError> {
        let chart = compile(
            json!([{"a": 1, "b": 2}, {"a": 3, "b": 4}]),
            json!({"x": "a", "y": "b"}),
        )?;
        let points = points(&chart);
        assert_eq!(points.radius.as_vec(2), vec![0.5, 0.5]);
        assert_eq!(points.color, ScalarOrArray::Scalar("blue".to_string()));
        assert_approx_eq!(f64, points.position.as_vec(2)[1].z, -0.5);
        assert!(chart.axes.z.is_suppressed());
        Ok(())
    }

    #[test]
    fn test_default_height_without_y() -> Result<(), XrChartError> {
        let chart = compile(
            json!([{"a": 1, "m": "d"}, {"a": 2, "m": "g"}]),
            json!({"x": "a", "z": "m"}),
        )?;
        let positions = points(&chart).position.as_vec(2);
        assert!(positions.iter().all(|p| p.y == 0.5));
        assert_approx_eq!(f64, positions[1].z, -1.5);
        assert!(chart.axes.y.is_suppressed());
        assert_eq!(chart.axes.z.labels_values(), ["d", "g"]);
        Ok(())
    }

    #[test]
    fn test_negative_y_axis_runs_down() -> Result<(), XrChartError> {
        let chart = compile(
            json!([{"a": 1, "b": -10}, {"a": 2, "b": -20}]),
            json!({"x": "a", "y": "b"}),
        )?;
        let positions = points(&chart).position.as_vec(2);
        assert_approx_eq!(f64, positions[0].y, -2.0);
        assert_approx_eq!(f64, positions[1].y, -4.0);
        assert_eq!(chart.axes.y.end(), Some(Vec3::new(0.0, -4.0, 0.0)));
        assert_eq!(chart.axes.y.labels_values(), ["-4", "-8", "-12", "-16", "-20"]);
        assert_approx_eq!(f64, chart.axes.y.labels_pos()[4].y, -4.0);
        Ok(())
    }

    #[test]
    fn test_zero_size() {
        let err = compile(
            json!([{"a": 1, "b": 2, "s": 0}]),
            json!({"x": "a", "y": "b", "size": "s"}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("`s`"));
    }

    #[test]
    fn test_nominal_y_rejected() {
        let err = compile(
            json!([{"a": 1, "b": "x"}]),
            json!({"x": "a", "y": "b"}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("quantitative"));
    }
}
