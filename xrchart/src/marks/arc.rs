use xrchart_common::value::ScalarOrArray;
use xrchart_common::vec3::Vec3;
use xrchart_scales::scales::ordinal::OrdinalScale;
use xrchart_scenegraph::marks::arc::SceneArcMark;

use crate::config::ChartDefaults;
use crate::data::column::{category_values, display_values, numeric_values_or_zero};
use crate::data::table::DataTable;
use crate::encoding::ResolvedEncoding;
use crate::error::XrChartError;
use crate::marks::{row_ids, CompiledChart};
use crate::spec::encoding::Channel;
use crate::spec::mark::ArcMarkOptions;

/// Lay out one slice per row around a shared center.
///
/// Slice angles are proportional to `|theta| / sum(|theta|)` and start where
/// the previous slice ended, so the slices sweep exactly 360 degrees. Colors
/// follow the sorted categories of the color field.
pub fn compile_arc(
    options: &ArcMarkOptions,
    encoding: &ResolvedEncoding,
    table: &DataTable,
    defaults: &ChartDefaults,
) -> Result<CompiledChart, XrChartError> {
    let rotation_offset = defaults.pie_rotation;
    let len = table.num_rows();
    if len == 0 {
        return Ok(CompiledChart {
            rotation_offset,
            ..Default::default()
        });
    }

    let (Some(color), Some(theta)) = (
        encoding.get(Channel::Color),
        encoding.quantitative(Channel::Theta)?,
    ) else {
        return Err(XrChartError::ValidationError(
            "arc chart requires the `color` and `theta` channels".to_string(),
        ));
    };

    let magnitudes: Vec<f64> = numeric_values_or_zero(table.column(&theta.field)?)?
        .into_iter()
        .map(f64::abs)
        .collect();
    let total: f64 = magnitudes.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(XrChartError::DataError(format!(
            "Cannot compute arc angles: the values of `{}` sum to zero",
            theta.field
        )));
    }

    let theta_length: Vec<f64> = magnitudes.iter().map(|v| v / total * 360.0).collect();
    let theta_start: Vec<f64> = theta_length
        .iter()
        .scan(0.0, |start, length| {
            let current = *start;
            *start += length;
            Some(current)
        })
        .collect();

    let categories = category_values(table.column(&color.field)?)?;
    let color_scale = OrdinalScale::try_new(&categories, defaults.palette.colors().to_vec())?;
    let colors = categories
        .iter()
        .map(|c| color_scale.scale(c).cloned())
        .collect::<Result<Vec<_>, _>>()?;

    let ids = row_ids(
        &[
            display_values(table.column(&color.field)?)?,
            display_values(table.column(&theta.field)?)?,
        ],
        len,
    );

    let outer_radius = options.radius.unwrap_or(defaults.pie_radius);
    let inner_radius = options.inner_radius.unwrap_or(defaults.pie_inner_radius);
    let slices = SceneArcMark {
        name: "arcs".to_string(),
        len: len as u32,
        ids: Some(ids),
        position: ScalarOrArray::Scalar(Vec3::ZERO),
        outer_radius: ScalarOrArray::Scalar(outer_radius),
        inner_radius: ScalarOrArray::Scalar(inner_radius),
        thickness: defaults.pie_thickness,
        theta_start: ScalarOrArray::Array(theta_start),
        theta_length: ScalarOrArray::Array(theta_length),
        color: ScalarOrArray::Array(colors),
    };

    Ok(CompiledChart {
        marks: vec![slices.into()],
        axes: Default::default(),
        rotation_offset,
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

    fn compile(data: Value, options: ArcMarkOptions) -> Result<CompiledChart, XrChartError> {
        let table = table_from_records(&serde_json::from_value(data)?)?;
        let encoding: EncodingSpec =
            serde_json::from_value(json!({"color": "motor", "theta": "sales"}))?;
        let resolved = resolve_encoding(&encoding, MarkType::Arc, &table)?;
        compile_arc(&options, &resolved, &table, &ChartDefaults::default())
    }

    fn slices(chart: &CompiledChart) -> &SceneArcMark {
        match &chart.marks[0] {
            SceneMark::Arc(slices) => slices,
            other => panic!("expected arc mark, got {other:?}"),
        }
    }

    #[test]
    fn test_pie() -> Result<(), XrChartError> {
        let chart = compile(
            json!([
                {"motor": "gasoline", "sales": 30},
                {"motor": "diesel", "sales": 10},
                {"motor": "electric", "sales": -20},
            ]),
            Default::default(),
        )?;
        let slices = slices(&chart);
        let lengths = slices.theta_length.as_vec(3);
        assert_approx_eq!(f64, lengths[0], 180.0);
        assert_approx_eq!(f64, lengths[1], 60.0);
        assert_approx_eq!(f64, lengths[2], 120.0);
        assert_approx_eq!(f64, lengths.iter().sum::<f64>(), 360.0);

        let starts = slices.theta_start.as_vec(3);
        assert_approx_eq!(f64, starts[0], 0.0);
        assert_approx_eq!(f64, starts[1], 180.0);
        assert_approx_eq!(f64, starts[2], 240.0);

        // Palette assigned over sorted categories: diesel, electric, gasoline
        assert_eq!(slices.color.as_vec(3), vec!["blue", "red", "green"]);
        assert_eq!(slices.ids.clone().unwrap()[2], "electric : -20");
        assert_eq!(chart.rotation_offset, Vec3::new(-90.0, 0.0, 0.0));
        assert!(chart.axes.x.is_suppressed());
        Ok(())
    }

    #[test]
    fn test_doughnut_radii() -> Result<(), XrChartError> {
        let chart = compile(
            json!([{"motor": "diesel", "sales": 1}]),
            ArcMarkOptions {
                radius: Some(2.0),
                inner_radius: Some(0.5),
            },
        )?;
        let slices = slices(&chart);
        assert_eq!(slices.outer_radius, ScalarOrArray::Scalar(2.0));
        assert_eq!(slices.inner_radius, ScalarOrArray::Scalar(0.5));
        assert_approx_eq!(f64, slices.theta_length.as_vec(1)[0], 360.0);
        Ok(())
    }

    #[test]
    fn test_zero_sum() {
        let err = compile(
            json!([{"motor": "diesel", "sales": 0}, {"motor": "gasoline", "sales": 0}]),
            Default::default(),
        )
        .unwrap_err();
        assert!(matches!(err, XrChartError::DataError(_)));
    }
}
